// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host and configurable generators shared by the unit tests.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Size;

use crate::capability::{
    DisplayEvents, Displayable, FoldState, Foldable, IndexTitled, Movable, Selectable, Sizable,
    SwipeActionsConfiguration, Swipeable,
};
use crate::event::Event;
use crate::generator::{CellGenerator, HeaderGenerator};
use crate::host::ListHost;
use crate::types::{IndexPath, RowAnimation, ScrollPosition};

/// One instruction received by [`RecordingHost`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Instruction {
    ReloadData,
    BeginUpdates,
    EndUpdates,
    InsertRows(Vec<IndexPath>, RowAnimation),
    DeleteRows(Vec<IndexPath>, RowAnimation),
    ReloadRows(Vec<IndexPath>, RowAnimation),
    InsertSections(Vec<usize>, RowAnimation),
    DeleteSections(Vec<usize>, RowAnimation),
    ReloadSections(Vec<usize>, RowAnimation),
    ScrollToRow(IndexPath, ScrollPosition, bool),
    DeselectRow(IndexPath, bool),
}

/// Host that logs every instruction instead of drawing.
#[derive(Debug)]
pub(crate) struct RecordingHost {
    pub(crate) log: Vec<Instruction>,
    pub(crate) registered: Vec<String>,
    pub(crate) viewport: Size,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self {
            log: Vec::new(),
            registered: Vec::new(),
            viewport: Size::new(320.0, 480.0),
        }
    }
}

impl ListHost for RecordingHost {
    type Cell = String;
    type Header = String;
    type ContentKey = String;

    fn reload_data(&mut self) {
        self.log.push(Instruction::ReloadData);
    }

    fn begin_updates(&mut self) {
        self.log.push(Instruction::BeginUpdates);
    }

    fn end_updates(&mut self) {
        self.log.push(Instruction::EndUpdates);
    }

    fn insert_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.log.push(Instruction::InsertRows(rows.to_vec(), animation));
    }

    fn delete_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.log.push(Instruction::DeleteRows(rows.to_vec(), animation));
    }

    fn reload_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.log.push(Instruction::ReloadRows(rows.to_vec(), animation));
    }

    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.log
            .push(Instruction::InsertSections(sections.to_vec(), animation));
    }

    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.log
            .push(Instruction::DeleteSections(sections.to_vec(), animation));
    }

    fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.log
            .push(Instruction::ReloadSections(sections.to_vec(), animation));
    }

    fn scroll_to_row(&mut self, row: IndexPath, position: ScrollPosition, animated: bool) {
        self.log
            .push(Instruction::ScrollToRow(row, position, animated));
    }

    fn deselect_row(&mut self, row: IndexPath, animated: bool) {
        self.log.push(Instruction::DeselectRow(row, animated));
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

/// Subscribes a listener that records every payload.
pub(crate) fn record<T: Clone + 'static>(event: &Event<T>) -> Rc<RefCell<Vec<T>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    event.add_listener(move |value: &T| sink.borrow_mut().push(value.clone()));
    seen
}

#[derive(Debug, Default)]
pub(crate) struct SelectState {
    pub(crate) did_select: Event<()>,
    pub(crate) needs_deselect: bool,
}

impl Selectable for SelectState {
    fn did_select_event(&self) -> &Event<()> {
        &self.did_select
    }

    fn needs_deselect(&self) -> bool {
        self.needs_deselect
    }
}

#[derive(Debug)]
pub(crate) struct Movability {
    can_move: bool,
    other_section: bool,
}

impl Movable for Movability {
    fn can_move(&self) -> bool {
        self.can_move
    }

    fn can_move_in_other_section(&self) -> bool {
        self.other_section
    }
}

#[derive(Debug)]
pub(crate) struct FixedSize(Size);

impl Sizable for FixedSize {
    fn size(&self, available: Size) -> Size {
        Size::new(self.0.width.min(available.width), self.0.height)
    }
}

#[derive(Debug)]
pub(crate) struct Title {
    title: String,
    visible: bool,
}

impl IndexTitled for Title {
    fn index_title(&self) -> &str {
        &self.title
    }

    fn needs_index_title(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Default)]
pub(crate) struct SwipeState {
    leading: Option<SwipeActionsConfiguration>,
    trailing: Option<SwipeActionsConfiguration>,
    pub(crate) did_swipe: Event<String>,
}

impl Swipeable for SwipeState {
    fn leading_swipe_actions(&self) -> Option<&SwipeActionsConfiguration> {
        self.leading.as_ref()
    }

    fn trailing_swipe_actions(&self) -> Option<&SwipeActionsConfiguration> {
        self.trailing.as_ref()
    }

    fn did_swipe_event(&self) -> &Event<String> {
        &self.did_swipe
    }
}

/// Text row whose capabilities are switched on one by one.
#[derive(Debug, Default)]
pub(crate) struct TestRow {
    pub(crate) title: String,
    pub(crate) height: Option<f64>,
    pub(crate) select: Option<SelectState>,
    pub(crate) movable: Option<Movability>,
    pub(crate) fold: Option<FoldState<String>>,
    pub(crate) size: Option<FixedSize>,
    pub(crate) index_title: Option<Title>,
    pub(crate) display: Option<DisplayEvents>,
    pub(crate) prefetch: Option<String>,
    pub(crate) swipe: Option<SwipeState>,
}

impl TestRow {
    pub(crate) fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub(crate) fn selectable(mut self, needs_deselect: bool) -> Self {
        self.select = Some(SelectState {
            did_select: Event::new(),
            needs_deselect,
        });
        self
    }

    pub(crate) fn movable(mut self, can_move: bool, other_section: bool) -> Self {
        self.movable = Some(Movability {
            can_move,
            other_section,
        });
        self
    }

    pub(crate) fn foldable(mut self, children: &[&str]) -> Self {
        self.fold = Some(FoldState::new(
            children.iter().map(|child| child.to_string()).collect(),
        ));
        self
    }

    pub(crate) fn with_size(mut self, size: Size) -> Self {
        self.size = Some(FixedSize(size));
        self
    }

    pub(crate) fn with_index_title(mut self, title: &str) -> Self {
        self.index_title = Some(Title {
            title: title.to_string(),
            visible: true,
        });
        self
    }

    pub(crate) fn with_hidden_index_title(mut self, title: &str) -> Self {
        self.index_title = Some(Title {
            title: title.to_string(),
            visible: false,
        });
        self
    }

    pub(crate) fn displayable(mut self) -> Self {
        self.display = Some(DisplayEvents::new());
        self
    }

    pub(crate) fn with_prefetch_key(mut self, key: &str) -> Self {
        self.prefetch = Some(key.to_string());
        self
    }

    pub(crate) fn swipeable(
        mut self,
        leading: Option<SwipeActionsConfiguration>,
        trailing: Option<SwipeActionsConfiguration>,
    ) -> Self {
        self.swipe = Some(SwipeState {
            leading,
            trailing,
            did_swipe: Event::new(),
        });
        self
    }
}

impl CellGenerator<RecordingHost> for TestRow {
    fn generate(&mut self, _host: &mut RecordingHost, _position: IndexPath) -> String {
        self.title.clone()
    }

    fn register(&self, host: &mut RecordingHost) {
        host.registered.push(self.title.clone());
    }

    fn cell_height(&self) -> Option<f64> {
        self.height
    }

    fn prefetch_key(&self) -> Option<String> {
        self.prefetch.clone()
    }

    fn as_selectable(&self) -> Option<&dyn Selectable> {
        self.select.as_ref().map(|s| s as &dyn Selectable)
    }

    fn as_movable(&self) -> Option<&dyn Movable> {
        self.movable.as_ref().map(|m| m as &dyn Movable)
    }

    fn as_foldable(&self) -> Option<&dyn Foldable> {
        self.fold.as_ref().map(|f| f as &dyn Foldable)
    }

    fn as_foldable_mut(&mut self) -> Option<&mut dyn Foldable> {
        self.fold.as_mut().map(|f| f as &mut dyn Foldable)
    }

    fn as_sizable(&self) -> Option<&dyn Sizable> {
        self.size.as_ref().map(|s| s as &dyn Sizable)
    }

    fn as_index_titled(&self) -> Option<&dyn IndexTitled> {
        self.index_title.as_ref().map(|t| t as &dyn IndexTitled)
    }

    fn as_displayable(&self) -> Option<&dyn Displayable> {
        self.display.as_ref().map(|d| d as &dyn Displayable)
    }

    fn as_swipeable(&self) -> Option<&dyn Swipeable> {
        self.swipe.as_ref().map(|s| s as &dyn Swipeable)
    }
}

/// Titled header with a fixed height.
#[derive(Debug)]
pub(crate) struct TestHeader {
    pub(crate) title: String,
    pub(crate) height: f64,
    pub(crate) display: DisplayEvents,
}

impl TestHeader {
    pub(crate) fn new(title: &str, height: f64) -> Self {
        Self {
            title: title.to_string(),
            height,
            display: DisplayEvents::new(),
        }
    }
}

impl HeaderGenerator<RecordingHost> for TestHeader {
    fn generate(&mut self, _host: &mut RecordingHost, _section: usize) -> Option<String> {
        Some(self.title.clone())
    }

    fn height(&self, _host: &RecordingHost, _section: usize) -> f64 {
        self.height
    }

    fn as_displayable(&self) -> Option<&dyn Displayable> {
        Some(&self.display)
    }
}

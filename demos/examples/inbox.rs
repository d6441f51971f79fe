// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sectioned inbox driven through `understory_list_binding` with a console host.
//!
//! This example shows how to:
//! - implement `ListHost` for a widget (here, one that prints instructions),
//! - build a manager with display, fold, and prefetch plugins,
//! - react to selection, swipe actions, drag reordering, and pagination.
//!
//! Run:
//! - `cargo run -p understory_demos --example inbox`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Point;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use understory_list_binding::{
    BoxedCell, CellGenerator, ContentPrefetcher, DisplayEvents, Displayable, Event, FoldState,
    Foldable, HeaderGenerator, IndexPath, ListHost, ListManager, Movable, MoveOutcome,
    PrefetchPlugin, RowAnimation, ScrollPosition, Selectable, SwipeAction, SwipeActionStyle,
    SwipeActionsConfiguration, SwipeEdge, Swipeable,
};
use understory_list_binding::{DisplayablePlugin, FoldablePlugin};

/// A widget stand-in that prints every instruction it receives.
#[derive(Debug, Default)]
struct ConsoleHost {
    depth: usize,
}

impl ConsoleHost {
    fn say(&self, line: &str) {
        println!("{:indent$}host: {line}", "", indent = self.depth * 2);
    }
}

impl ListHost for ConsoleHost {
    type Cell = String;
    type Header = String;
    type ContentKey = String;

    fn reload_data(&mut self) {
        self.say("reload all");
    }

    fn begin_updates(&mut self) {
        self.say("begin updates");
        self.depth += 1;
    }

    fn end_updates(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.say("end updates");
    }

    fn insert_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.say(&format!("insert rows {rows:?} ({animation:?})"));
    }

    fn delete_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.say(&format!("delete rows {rows:?} ({animation:?})"));
    }

    fn reload_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.say(&format!("reload rows {rows:?} ({animation:?})"));
    }

    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.say(&format!("insert sections {sections:?} ({animation:?})"));
    }

    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.say(&format!("delete sections {sections:?} ({animation:?})"));
    }

    fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.say(&format!("reload sections {sections:?} ({animation:?})"));
    }

    fn scroll_to_row(&mut self, row: IndexPath, position: ScrollPosition, animated: bool) {
        self.say(&format!("scroll to {row:?} at {position:?} (animated: {animated})"));
    }

    fn deselect_row(&mut self, row: IndexPath, animated: bool) {
        self.say(&format!("deselect {row:?} (animated: {animated})"));
    }
}

/// One message in the inbox.
struct Mail {
    sender: &'static str,
    subject: &'static str,
    did_select: Event<()>,
    display: DisplayEvents,
    trailing: SwipeActionsConfiguration,
    did_swipe: Event<String>,
}

impl Mail {
    fn new(sender: &'static str, subject: &'static str) -> Self {
        Self {
            sender,
            subject,
            did_select: Event::new(),
            display: DisplayEvents::new(),
            trailing: SwipeActionsConfiguration::new(vec![
                SwipeAction::new("delete", SwipeActionStyle::Destructive).with_title("Delete"),
                SwipeAction::new("archive", SwipeActionStyle::Normal).with_title("Archive"),
            ]),
            did_swipe: Event::new(),
        }
    }
}

impl Selectable for Mail {
    fn did_select_event(&self) -> &Event<()> {
        &self.did_select
    }
}

impl Movable for Mail {
    fn can_move_in_other_section(&self) -> bool {
        true
    }
}

impl Swipeable for Mail {
    fn trailing_swipe_actions(&self) -> Option<&SwipeActionsConfiguration> {
        Some(&self.trailing)
    }

    fn did_swipe_event(&self) -> &Event<String> {
        &self.did_swipe
    }
}

impl CellGenerator<ConsoleHost> for Mail {
    fn generate(&mut self, _host: &mut ConsoleHost, _position: IndexPath) -> String {
        format!("{:<8} {}", self.sender, self.subject)
    }

    fn register(&self, host: &mut ConsoleHost) {
        host.say(&format!("register mail row for {}", self.sender));
    }

    fn prefetch_key(&self) -> Option<String> {
        Some(format!("avatars/{}.png", self.sender.to_lowercase()))
    }

    fn as_selectable(&self) -> Option<&dyn Selectable> {
        Some(self)
    }

    fn as_movable(&self) -> Option<&dyn Movable> {
        Some(self)
    }

    fn as_displayable(&self) -> Option<&dyn Displayable> {
        Some(&self.display)
    }

    fn as_swipeable(&self) -> Option<&dyn Swipeable> {
        Some(self)
    }
}

/// A conversation that folds its replies away.
struct Thread {
    subject: &'static str,
    replies: FoldState<&'static str>,
}

impl CellGenerator<ConsoleHost> for Thread {
    fn generate(&mut self, _host: &mut ConsoleHost, _position: IndexPath) -> String {
        let marker = if self.replies.is_expanded() { "v" } else { ">" };
        let mut line = format!("{marker} {} ({} replies)", self.subject, self.replies.child_count());
        if self.replies.is_expanded() {
            for reply in &self.replies.children {
                line.push_str(&format!("\n      - {reply}"));
            }
        }
        line
    }

    fn cell_height(&self) -> Option<f64> {
        Some(if self.replies.is_expanded() { 96.0 } else { 44.0 })
    }

    fn as_foldable(&self) -> Option<&dyn Foldable> {
        Some(&self.replies)
    }

    fn as_foldable_mut(&mut self) -> Option<&mut dyn Foldable> {
        Some(&mut self.replies)
    }
}

struct DayHeader(&'static str);

impl HeaderGenerator<ConsoleHost> for DayHeader {
    fn generate(&mut self, _host: &mut ConsoleHost, _section: usize) -> Option<String> {
        Some(self.0.to_uppercase())
    }

    fn height(&self, _host: &ConsoleHost, _section: usize) -> f64 {
        28.0
    }
}

/// Stands in for an image cache.
#[derive(Debug, Default)]
struct AvatarCache;

impl ContentPrefetcher for AvatarCache {
    type Key = String;

    fn start_prefetching(&mut self, keys: &[String]) {
        println!("  cache: start {keys:?}");
    }

    fn cancel_prefetching(&mut self, keys: &[String]) {
        println!("  cache: cancel {keys:?}");
    }
}

/// Pulls every row through the manager the way a widget would after a reload.
fn render(manager: &mut ListManager<ConsoleHost>) {
    for section in 0..manager.number_of_sections() {
        if let Some(header) = manager.header_view(section) {
            println!("  [{header}] ({}pt)", manager.header_height(section));
        }
        for row in 0..manager.number_of_rows(section) {
            let position = IndexPath::new(section, row);
            manager.will_display_cell(position);
            if let Some(cell) = manager.cell_for_row(position) {
                println!("    {cell}  ({}pt)", manager.row_height(position));
            }
        }
    }
}

fn mail(sender: &'static str, subject: &'static str) -> BoxedCell<ConsoleHost> {
    Box::new(Mail::new(sender, subject))
}

fn main() {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logger");

    let mut manager = ListManager::builder(ConsoleHost::default())
        .add_plugin(DisplayablePlugin::new())
        .add_plugin(FoldablePlugin::new())
        .add_plugin(PrefetchPlugin::new(AvatarCache))
        .swipe_actions()
        .build();

    let needs_page = Rc::new(Cell::new(false));
    let flag = Rc::clone(&needs_page);
    manager
        .events()
        .last_cell_showing
        .add_listener(move |_| flag.set(true));
    manager
        .events()
        .cell_changed_position
        .add_listener(|(from, to)| println!("  moved {from:?} -> {to:?}"));

    println!("== fill");
    let today = manager.add_section_header(DayHeader("Today"));
    let first = Mail::new("Ada", "Engine notes");
    first
        .did_select
        .add_listener(|_| println!("  opening 'Engine notes'"));
    first
        .display
        .will_display_event()
        .add_listener(|_| println!("  'Engine notes' on screen"));
    let first = manager.add_generator(first);
    manager
        .add_generators_to_header(
            today,
            [mail("Grace", "Compiler review"), mail("Linus", "Patch v2")],
        )
        .expect("header was just added");
    manager.add_section_header(DayHeader("Earlier"));
    let thread = manager.add_generator(Thread {
        subject: "Offsite planning",
        replies: FoldState::new(vec!["Barbara: works for me", "Ken: +1"]),
    });
    manager.force_refill();
    render(&mut manager);

    println!("== prefetch");
    manager.prefetch_rows(&[IndexPath::new(0, 1), IndexPath::new(0, 2), IndexPath::new(1, 0)]);

    println!("== select and fold");
    manager.did_select_row(IndexPath::new(0, 0));
    manager.did_select_row(IndexPath::new(1, 0));
    manager.update(&[thread]).expect("thread is in the list");
    render(&mut manager);

    println!("== insert");
    manager
        .insert_after(first, Mail::new("Alan", "Re: Engine notes"), RowAnimation::Fade)
        .expect("anchor is in the list");

    println!("== swipe to delete");
    let swiped = IndexPath::new(0, 2);
    if let Some(actions) = manager.swipe_actions(swiped, SwipeEdge::Trailing) {
        let titles: Vec<_> = actions.actions.iter().filter_map(|a| a.title.as_deref()).collect();
        println!("  offering {titles:?}");
    }
    if manager.perform_swipe_action(swiped, SwipeEdge::Trailing, 0)
        && let Some(id) = manager.store().id_at(swiped)
    {
        manager
            .remove(id, RowAnimation::Left, Some(ScrollPosition::Middle), true)
            .expect("row is in the list");
    }

    println!("== drag");
    match manager.move_row(IndexPath::new(0, 0), IndexPath::new(1, 5)) {
        MoveOutcome::Moved { .. } => {
            // Next turn of the host's event loop.
            manager.run_deferred_updates();
        }
        MoveOutcome::Rejected => println!("  move rejected"),
    }

    println!("== scroll to the end");
    manager.did_scroll(Point::new(0.0, 400.0));
    render(&mut manager);
    if needs_page.replace(false) {
        println!("== next page");
        manager.add_generators([mail("Edsger", "Structured notes"), mail("Donald", "Errata")]);
        manager.force_refill_then(|| println!("  page settled"));
        render(&mut manager);
    }

    println!("== reorder check");
    manager
        .swap(first, thread)
        .expect("both rows are in the list");
    manager
        .scroll_to(first, ScrollPosition::Top, true)
        .expect("row is in the list");
    render(&mut manager);
}

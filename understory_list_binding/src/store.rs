// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-level section/row container.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::error::ListError;
use crate::generator::{CellGenerator, EmptyHeaderGenerator, HeaderGenerator};
use crate::host::ListHost;
use crate::types::{Capabilities, GeneratorId, HeaderId, IndexPath};

/// A boxed row generator as held by the store.
pub type BoxedCell<H> = Box<dyn CellGenerator<H>>;

/// A boxed header generator as held by the store.
pub type BoxedHeader<H> = Box<dyn HeaderGenerator<H>>;

struct CellSlot<H: ListHost> {
    generator: BoxedCell<H>,
    position: IndexPath,
}

struct HeaderSlot<H: ListHost> {
    generator: BoxedHeader<H>,
    section: usize,
}

/// Ordered sections of generators, each section owned by one header.
///
/// Generators and headers live in arenas keyed by [`GeneratorId`] and
/// [`HeaderId`]; sections are ordered lists of ids. Every arena entry records
/// its current position, which is kept up to date on each mutation, so
/// resolving an id to a position never scans.
///
/// The number of sections always equals the number of headers. Appending a
/// generator to a store with no headers opens a section owned by an
/// [`EmptyHeaderGenerator`].
///
/// ## Example
///
/// ```rust
/// # use understory_list_binding::{IndexPath, ListHost, RowAnimation, ScrollPosition};
/// # struct Host;
/// # impl ListHost for Host {
/// #     type Cell = ();
/// #     type Header = ();
/// #     type ContentKey = ();
/// #     fn reload_data(&mut self) {}
/// #     fn begin_updates(&mut self) {}
/// #     fn end_updates(&mut self) {}
/// #     fn insert_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
/// #     fn delete_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
/// #     fn reload_rows(&mut self, _: &[IndexPath], _: RowAnimation) {}
/// #     fn insert_sections(&mut self, _: &[usize], _: RowAnimation) {}
/// #     fn delete_sections(&mut self, _: &[usize], _: RowAnimation) {}
/// #     fn reload_sections(&mut self, _: &[usize], _: RowAnimation) {}
/// #     fn scroll_to_row(&mut self, _: IndexPath, _: ScrollPosition, _: bool) {}
/// #     fn deselect_row(&mut self, _: IndexPath, _: bool) {}
/// # }
/// # struct Row;
/// # impl understory_list_binding::CellGenerator<Host> for Row {
/// #     fn generate(&mut self, _: &mut Host, _: IndexPath) {}
/// # }
/// use understory_list_binding::SectionStore;
///
/// let mut store = SectionStore::<Host>::new();
/// let a = store.append(Box::new(Row));
/// let c = store.append(Box::new(Row));
/// let b = store.insert_after(a, Box::new(Row)).unwrap();
///
/// assert_eq!(store.section_count(), 1);
/// assert_eq!(store.section(0), &[a, b, c]);
/// assert_eq!(store.position_of(c), Some(IndexPath::new(0, 2)));
/// ```
pub struct SectionStore<H: ListHost> {
    cells: HashMap<GeneratorId, CellSlot<H>>,
    headers: HashMap<HeaderId, HeaderSlot<H>>,
    sections: Vec<Vec<GeneratorId>>,
    section_headers: Vec<HeaderId>,
    next_id: u64,
}

impl<H: ListHost> fmt::Debug for SectionStore<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionStore")
            .field("sections", &self.sections)
            .field("section_headers", &self.section_headers)
            .finish_non_exhaustive()
    }
}

impl<H: ListHost> Default for SectionStore<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// A generator taken out of the store by [`SectionStore::remove`].
pub struct Removed<H: ListHost> {
    /// The generator itself.
    pub generator: BoxedCell<H>,
    /// Where it was before removal.
    pub position: IndexPath,
    /// Whether its now-empty section was removed as well.
    pub section_removed: bool,
}

impl<H: ListHost> fmt::Debug for Removed<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Removed")
            .field("position", &self.position)
            .field("section_removed", &self.section_removed)
            .finish_non_exhaustive()
    }
}

/// Result of [`SectionStore::replace`].
pub struct Replaced<H: ListHost> {
    /// Id of the generator now occupying the slot.
    pub id: GeneratorId,
    /// The generator that was replaced.
    pub previous: BoxedCell<H>,
    /// The shared position.
    pub position: IndexPath,
}

impl<H: ListHost> fmt::Debug for Replaced<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replaced")
            .field("id", &self.id)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<H: ListHost> SectionStore<H> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            headers: HashMap::new(),
            sections: Vec::new(),
            section_headers: Vec::new(),
            next_id: 0,
        }
    }

    // --- queries ---

    /// Number of sections (always equal to the number of headers).
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of rows in `section`, or zero if the section does not exist.
    #[must_use]
    pub fn row_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Vec::len)
    }

    /// Total number of generators across all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no generator is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Ids of the generators in `section`, in row order; empty if the section does not exist.
    #[must_use]
    pub fn section(&self, section: usize) -> &[GeneratorId] {
        self.sections.get(section).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if `id` is currently stored.
    #[must_use]
    pub fn contains(&self, id: GeneratorId) -> bool {
        self.cells.contains_key(&id)
    }

    /// Current position of a generator.
    #[must_use]
    pub fn position_of(&self, id: GeneratorId) -> Option<IndexPath> {
        self.cells.get(&id).map(|slot| slot.position)
    }

    /// Id of the generator at `position`.
    #[must_use]
    pub fn id_at(&self, position: IndexPath) -> Option<GeneratorId> {
        self.sections
            .get(position.section)
            .and_then(|rows| rows.get(position.row))
            .copied()
    }

    /// Shared access to a generator.
    #[must_use]
    pub fn generator(&self, id: GeneratorId) -> Option<&(dyn CellGenerator<H> + 'static)> {
        self.cells.get(&id).map(|slot| slot.generator.as_ref())
    }

    /// Mutable access to a generator.
    pub fn generator_mut(
        &mut self,
        id: GeneratorId,
    ) -> Option<&mut (dyn CellGenerator<H> + 'static)> {
        self.cells.get_mut(&id).map(|slot| slot.generator.as_mut())
    }

    /// Shared access to the generator at `position`.
    #[must_use]
    pub fn generator_at(&self, position: IndexPath) -> Option<&(dyn CellGenerator<H> + 'static)> {
        self.id_at(position).and_then(|id| self.generator(id))
    }

    /// Mutable access to the generator at `position`.
    pub fn generator_at_mut(
        &mut self,
        position: IndexPath,
    ) -> Option<&mut (dyn CellGenerator<H> + 'static)> {
        let id = self.id_at(position)?;
        self.generator_mut(id)
    }

    /// Id of the header owning `section`.
    #[must_use]
    pub fn header_id_at(&self, section: usize) -> Option<HeaderId> {
        self.section_headers.get(section).copied()
    }

    /// Section owned by `header`.
    #[must_use]
    pub fn section_of(&self, header: HeaderId) -> Option<usize> {
        self.headers.get(&header).map(|slot| slot.section)
    }

    /// Shared access to the header owning `section`.
    #[must_use]
    pub fn header_at(&self, section: usize) -> Option<&(dyn HeaderGenerator<H> + 'static)> {
        let id = self.header_id_at(section)?;
        self.headers.get(&id).map(|slot| slot.generator.as_ref())
    }

    /// Mutable access to the header owning `section`.
    pub fn header_at_mut(
        &mut self,
        section: usize,
    ) -> Option<&mut (dyn HeaderGenerator<H> + 'static)> {
        let id = self.header_id_at(section)?;
        self.headers.get_mut(&id).map(|slot| slot.generator.as_mut())
    }

    /// Position of the last row of the last non-empty section.
    #[must_use]
    pub fn last_position(&self) -> Option<IndexPath> {
        self.sections
            .iter()
            .enumerate()
            .rev()
            .find(|(_, rows)| !rows.is_empty())
            .map(|(section, rows)| IndexPath::new(section, rows.len() - 1))
    }

    /// Iterates every generator in section order, then row order.
    pub fn iter(&self) -> impl Iterator<Item = (IndexPath, GeneratorId)> + '_ {
        self.sections.iter().enumerate().flat_map(|(section, rows)| {
            rows.iter()
                .enumerate()
                .map(move |(row, id)| (IndexPath::new(section, row), *id))
        })
    }

    /// Iterates the generators whose capabilities contain all of `required`, in order.
    pub fn iter_with(
        &self,
        required: Capabilities,
    ) -> impl Iterator<Item = (IndexPath, GeneratorId)> + '_ {
        self.iter().filter(move |(_, id)| {
            self.generator(*id)
                .is_some_and(|generator| generator.capabilities().contains(required))
        })
    }

    // --- mutations ---

    /// Appends a header and opens its (empty) section at the end.
    pub fn push_header(&mut self, header: BoxedHeader<H>) -> HeaderId {
        self.open_section(header, Vec::new())
    }

    /// Appends a generator to the last section.
    ///
    /// If the store has no sections yet, a section owned by an
    /// [`EmptyHeaderGenerator`] is opened first.
    pub fn append(&mut self, generator: BoxedCell<H>) -> GeneratorId {
        if self.section_headers.is_empty() {
            self.push_header(Box::new(EmptyHeaderGenerator));
        }
        let section = self.sections.len() - 1;
        let row = self.sections[section].len();
        self.place(IndexPath::new(section, row), generator)
    }

    /// Appends a generator to the end of the section owned by `header`.
    pub fn append_to_header(
        &mut self,
        header: HeaderId,
        generator: BoxedCell<H>,
    ) -> Result<GeneratorId, ListError> {
        let section = self
            .section_of(header)
            .ok_or(ListError::HeaderNotFound(header))?;
        let row = self.sections[section].len();
        Ok(self.place(IndexPath::new(section, row), generator))
    }

    /// Inserts a generator at `position`, shifting later rows down.
    ///
    /// `position.row` may equal the section's row count to append.
    pub fn insert_at(
        &mut self,
        position: IndexPath,
        generator: BoxedCell<H>,
    ) -> Result<GeneratorId, ListError> {
        let rows = self
            .sections
            .get(position.section)
            .ok_or(ListError::OutOfRange(position))?;
        if position.row > rows.len() {
            return Err(ListError::OutOfRange(position));
        }
        Ok(self.place(position, generator))
    }

    /// Inserts a generator directly after `anchor`.
    pub fn insert_after(
        &mut self,
        anchor: GeneratorId,
        generator: BoxedCell<H>,
    ) -> Result<GeneratorId, ListError> {
        let at = self.anchor(anchor)?;
        Ok(self.place(IndexPath::new(at.section, at.row + 1), generator))
    }

    /// Inserts a generator directly before `anchor`.
    pub fn insert_before(
        &mut self,
        anchor: GeneratorId,
        generator: BoxedCell<H>,
    ) -> Result<GeneratorId, ListError> {
        let at = self.anchor(anchor)?;
        Ok(self.place(at, generator))
    }

    /// Inserts a batch of generators after `anchor`, keeping their order.
    ///
    /// Nothing is inserted if `anchor` is missing.
    pub fn insert_all_after(
        &mut self,
        anchor: GeneratorId,
        generators: impl IntoIterator<Item = BoxedCell<H>>,
    ) -> Result<Vec<GeneratorId>, ListError> {
        let at = self.anchor(anchor)?;
        let mut row = at.row + 1;
        let mut ids = Vec::new();
        for generator in generators {
            ids.push(self.place(IndexPath::new(at.section, row), generator));
            row += 1;
        }
        Ok(ids)
    }

    /// Removes a generator.
    ///
    /// With `remove_empty_section`, a section left empty by the removal is
    /// removed together with its header.
    pub fn remove(
        &mut self,
        id: GeneratorId,
        remove_empty_section: bool,
    ) -> Result<Removed<H>, ListError> {
        let slot = self
            .cells
            .remove(&id)
            .ok_or(ListError::GeneratorNotFound(id))?;
        let position = slot.position;
        self.sections[position.section].remove(position.row);
        self.reindex_rows(position.section, position.row);

        let section_removed =
            remove_empty_section && self.sections[position.section].is_empty();
        if section_removed {
            self.close_section(position.section);
        }
        Ok(Removed {
            generator: slot.generator,
            position,
            section_removed,
        })
    }

    /// Puts `generator` in the slot held by `old`, keeping the position.
    pub fn replace(
        &mut self,
        old: GeneratorId,
        generator: BoxedCell<H>,
    ) -> Result<Replaced<H>, ListError> {
        let slot = self
            .cells
            .remove(&old)
            .ok_or(ListError::GeneratorNotFound(old))?;
        let position = slot.position;
        let id = self.next_generator_id();
        self.sections[position.section][position.row] = id;
        self.cells.insert(
            id,
            CellSlot {
                generator,
                position,
            },
        );
        Ok(Replaced {
            id,
            previous: slot.generator,
            position,
        })
    }

    /// Exchanges the positions of two generators.
    ///
    /// The two slots are exchanged in place, so neither position shifts even when
    /// both generators share a section. Returns the previous positions of `a`
    /// and `b`.
    pub fn swap(
        &mut self,
        a: GeneratorId,
        b: GeneratorId,
    ) -> Result<(IndexPath, IndexPath), ListError> {
        let pa = self.position_of(a).ok_or(ListError::GeneratorNotFound(a))?;
        let pb = self.position_of(b).ok_or(ListError::GeneratorNotFound(b))?;
        if a == b {
            return Ok((pa, pb));
        }
        self.sections[pa.section][pa.row] = b;
        self.sections[pb.section][pb.row] = a;
        if let Some(slot) = self.cells.get_mut(&a) {
            slot.position = pb;
        }
        if let Some(slot) = self.cells.get_mut(&b) {
            slot.position = pa;
        }
        Ok((pa, pb))
    }

    /// Moves the row at `from` so that it ends up at `to`.
    ///
    /// `to` is a post-move position; a row past the end of the destination
    /// section is clamped to its end. Returns the final position.
    pub fn move_row(&mut self, from: IndexPath, to: IndexPath) -> Result<IndexPath, ListError> {
        let id = self.id_at(from).ok_or(ListError::OutOfRange(from))?;
        if to.section >= self.sections.len() {
            return Err(ListError::SectionOutOfRange(to.section));
        }
        self.sections[from.section].remove(from.row);
        let row = to.row.min(self.sections[to.section].len());
        self.sections[to.section].insert(row, id);

        if from.section == to.section {
            self.reindex_rows(from.section, from.row.min(row));
        } else {
            self.reindex_rows(from.section, from.row);
            self.reindex_rows(to.section, row);
        }
        Ok(IndexPath::new(to.section, row))
    }

    /// Drops every generator. Sections and headers stay in place, now empty.
    pub fn clear_generators(&mut self) {
        self.cells.clear();
        for rows in &mut self.sections {
            rows.clear();
        }
    }

    /// Drops every header.
    ///
    /// Empty sections go with their headers. Sections that still hold rows keep
    /// them and get an [`EmptyHeaderGenerator`] in place of their header.
    pub fn clear_headers(&mut self) {
        self.headers.clear();
        self.section_headers.clear();
        let sections = core::mem::take(&mut self.sections);
        for rows in sections.into_iter().filter(|rows| !rows.is_empty()) {
            self.open_section(Box::new(EmptyHeaderGenerator), rows);
        }
    }

    /// Removes every generator in the section owned by `header`, returning them in row order.
    pub fn remove_all_in(&mut self, header: HeaderId) -> Result<Vec<BoxedCell<H>>, ListError> {
        let section = self
            .section_of(header)
            .ok_or(ListError::HeaderNotFound(header))?;
        let ids = core::mem::take(&mut self.sections[section]);
        Ok(ids
            .into_iter()
            .filter_map(|id| self.cells.remove(&id))
            .map(|slot| slot.generator)
            .collect())
    }

    // --- internals ---

    fn next_generator_id(&mut self) -> GeneratorId {
        self.next_id += 1;
        GeneratorId(self.next_id)
    }

    fn anchor(&self, anchor: GeneratorId) -> Result<IndexPath, ListError> {
        self.position_of(anchor)
            .ok_or(ListError::GeneratorNotFound(anchor))
    }

    /// Stores `generator` at a position already known to be valid.
    fn place(&mut self, position: IndexPath, generator: BoxedCell<H>) -> GeneratorId {
        let id = self.next_generator_id();
        self.sections[position.section].insert(position.row, id);
        self.cells.insert(
            id,
            CellSlot {
                generator,
                position,
            },
        );
        self.reindex_rows(position.section, position.row + 1);
        id
    }

    fn open_section(&mut self, header: BoxedHeader<H>, rows: Vec<GeneratorId>) -> HeaderId {
        self.next_id += 1;
        let id = HeaderId(self.next_id);
        let section = self.sections.len();
        self.headers.insert(
            id,
            HeaderSlot {
                generator: header,
                section,
            },
        );
        self.section_headers.push(id);
        self.sections.push(rows);
        self.reindex_rows(section, 0);
        id
    }

    fn close_section(&mut self, section: usize) {
        let rows = self.sections.remove(section);
        debug_assert!(rows.is_empty(), "only empty sections are closed");
        let header = self.section_headers.remove(section);
        self.headers.remove(&header);
        for later in section..self.sections.len() {
            self.reindex_rows(later, 0);
            if let Some(slot) = self.headers.get_mut(&self.section_headers[later]) {
                slot.section = later;
            }
        }
    }

    fn reindex_rows(&mut self, section: usize, from_row: usize) {
        let Some(rows) = self.sections.get(section) else {
            return;
        };
        for (row, id) in rows.iter().enumerate().skip(from_row) {
            if let Some(slot) = self.cells.get_mut(id) {
                slot.position = IndexPath::new(section, row);
            }
        }
    }
}

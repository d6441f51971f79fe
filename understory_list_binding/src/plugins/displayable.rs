// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::capability::Displayable;
use crate::host::ListHost;
use crate::plugin::{ListPlugin, TableEvent};
use crate::store::SectionStore;

/// Forwards display lifecycle events to [`Displayable`] rows and headers.
#[derive(Copy, Clone, Debug, Default)]
pub struct DisplayablePlugin;

impl DisplayablePlugin {
    /// Creates the plugin.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<H: ListHost> ListPlugin<H> for DisplayablePlugin {
    type Event = TableEvent;

    fn process(&mut self, event: &TableEvent, store: &mut SectionStore<H>) {
        let (target, appearing): (Option<&dyn Displayable>, bool) = match event {
            TableEvent::WillDisplayCell(position) => (
                store
                    .generator_at(*position)
                    .and_then(|generator| generator.as_displayable()),
                true,
            ),
            TableEvent::DidEndDisplayCell(position) => (
                store
                    .generator_at(*position)
                    .and_then(|generator| generator.as_displayable()),
                false,
            ),
            TableEvent::WillDisplayHeader(section) => (
                store
                    .header_at(*section)
                    .and_then(|header| header.as_displayable()),
                true,
            ),
            TableEvent::DidEndDisplayHeader(section) => (
                store
                    .header_at(*section)
                    .and_then(|header| header.as_displayable()),
                false,
            ),
            TableEvent::DidSelect(_) | TableEvent::Move { .. } => return,
        };
        let Some(target) = target else {
            return;
        };
        log::trace!("display lifecycle {event:?}");
        if appearing {
            target.will_display_event().invoke(&());
        } else {
            target.did_end_display_event().invoke(&());
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::DisplayablePlugin;
    use crate::capability::Displayable;
    use crate::plugin::{ListPlugin, TableEvent};
    use crate::store::SectionStore;
    use crate::test_support::{RecordingHost, TestHeader, TestRow, record};
    use crate::types::IndexPath;

    #[test]
    fn rows_and_headers_hear_their_own_lifecycle() {
        let row = TestRow::new("A").displayable();
        let shown = record(row.display.as_ref().unwrap().will_display_event());
        let hidden = record(row.display.as_ref().unwrap().did_end_display_event());
        let header = TestHeader::new("H", 20.0);
        let header_shown = record(header.display.will_display_event());

        let mut store = SectionStore::<RecordingHost>::new();
        store.push_header(Box::new(header));
        store.append(Box::new(row));
        store.append(Box::new(TestRow::new("plain")));

        let mut plugin = DisplayablePlugin::new();
        let at = IndexPath::new(0, 0);
        plugin.process(&TableEvent::WillDisplayCell(at), &mut store);
        plugin.process(&TableEvent::DidEndDisplayCell(at), &mut store);
        plugin.process(&TableEvent::WillDisplayHeader(0), &mut store);
        // No capability, and out of range: both ignored.
        plugin.process(&TableEvent::WillDisplayCell(IndexPath::new(0, 1)), &mut store);
        plugin.process(&TableEvent::WillDisplayHeader(4), &mut store);

        assert_eq!(shown.borrow().len(), 1);
        assert_eq!(hidden.borrow().len(), 1);
        assert_eq!(header_shown.borrow().len(), 1);
    }
}

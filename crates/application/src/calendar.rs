use std::collections::BTreeMap;

use talentra_domain::{EventRecord, dates};

const NO_EVENTS: &[EventRecord] = &[];

/// Date-keyed lookup over the event list.
///
/// Rebuilt wholesale whenever the underlying list changes; there is no
/// incremental update path. Events whose date fails to normalize are
/// excluded rather than crashing the render path.
#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    days: BTreeMap<String, Vec<EventRecord>>,
}

impl EventIndex {
    /// Builds the index, keying each event by its canonical day.
    ///
    /// Insertion order within a day follows the source list order.
    #[must_use]
    pub fn build(events: &[EventRecord]) -> Self {
        let mut days: BTreeMap<String, Vec<EventRecord>> = BTreeMap::new();
        for event in events {
            let day = dates::normalize(&event.date_event);
            if day.is_empty() {
                continue;
            }
            days.entry(day).or_default().push(event.clone());
        }

        Self { days }
    }

    /// Returns the events on a day, given any normalizable date form.
    ///
    /// Absent days and unparseable input yield an empty slice, never an
    /// error.
    #[must_use]
    pub fn lookup(&self, date: &str) -> &[EventRecord] {
        let day = dates::normalize(date);
        if day.is_empty() {
            return NO_EVENTS;
        }

        self.days.get(&day).map(Vec::as_slice).unwrap_or(NO_EVENTS)
    }

    /// Iterates days in ascending order with their events.
    pub fn days(&self) -> impl Iterator<Item = (&str, &[EventRecord])> {
        self.days
            .iter()
            .map(|(day, events)| (day.as_str(), events.as_slice()))
    }

    /// Returns how many distinct days hold at least one event.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Returns whether the index holds no events at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

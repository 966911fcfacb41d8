//! The selected calendar day and the records that fall on it.
//!
//! A `SelectionStore` is created by the page that owns the calendar and handed
//! to every region that shows the selection. Cloning the store yields another
//! handle to the same state. The store is single-threaded: mutation and
//! notification happen synchronously on the caller's thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::date::CalendarDate;
use crate::matcher;
use crate::record::ScheduleRecord;

/// Snapshot of the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub selected_date: Option<CalendarDate>,
    pub selected_records: Vec<ScheduleRecord>,
}

type Listener = Rc<dyn Fn(&SelectionState)>;

#[derive(Default)]
struct Inner {
    state: SelectionState,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
    /// Set while listeners run; changes made meanwhile wait in `pending`.
    notifying: bool,
    pending: VecDeque<SelectionState>,
}

impl Inner {
    fn listener(&self, id: u64) -> Option<Listener> {
        self.listeners
            .iter()
            .find(|(lid, _)| *lid == id)
            .map(|(_, l)| Rc::clone(l))
    }
}

#[derive(Clone, Default)]
pub struct SelectionStore {
    inner: Rc<RefCell<Inner>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `date` and recompute its records from `all_records`.
    ///
    /// Subscribers are notified only when the resulting state differs from
    /// the current one.
    pub fn set_selected_date(&self, date: CalendarDate, all_records: &[ScheduleRecord]) {
        let next = SelectionState {
            selected_date: Some(date),
            selected_records: matcher::filter_by_date(all_records, date),
        };
        tracing::debug!(%date, matched = next.selected_records.len(), "date selected");
        self.replace(next);
    }

    /// Recompute the current selection against a new record set.
    pub fn refresh(&self, all_records: &[ScheduleRecord]) {
        let current = self.inner.borrow().state.selected_date;
        if let Some(date) = current {
            self.set_selected_date(date, all_records);
        }
    }

    /// Drop the selection.
    pub fn clear(&self) {
        self.replace(SelectionState::default());
    }

    pub fn state(&self) -> SelectionState {
        self.inner.borrow().state.clone()
    }

    /// Register `callback` for every change. Dropping the returned
    /// `Subscription` unregisters it.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SelectionState) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(callback)));

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn replace(&self, next: SelectionState) {
        let mut snapshot = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == next {
                return;
            }
            inner.state = next;
            if inner.notifying {
                let queued = inner.state.clone();
                inner.pending.push_back(queued);
                return;
            }
            inner.notifying = true;
            inner.state.clone()
        };

        // Changes made by listeners are delivered after the current one, in order.
        loop {
            self.notify(&snapshot);

            let mut inner = self.inner.borrow_mut();
            match inner.pending.pop_front() {
                Some(queued) => snapshot = queued,
                None => {
                    inner.notifying = false;
                    return;
                }
            }
        }
    }

    fn notify(&self, snapshot: &SelectionState) {
        let ids: Vec<u64> = self.inner.borrow().listeners.iter().map(|(id, _)| *id).collect();

        for id in ids {
            // Borrow released before the call: listeners may read, write or unsubscribe.
            let listener = self.inner.borrow().listener(id);
            if let Some(listener) = listener {
                listener(snapshot);
            }
        }
    }
}

/// Handle returned by `SelectionStore::subscribe`.
pub struct Subscription {
    store: Weak<RefCell<Inner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Category, RecordDate};
    use std::cell::Cell;

    fn record(id: &str, date: &str) -> ScheduleRecord {
        ScheduleRecord {
            id: id.to_string(),
            title: id.to_string(),
            date: RecordDate::parse(date),
            time: "19:00".to_string(),
            location: "Salón".to_string(),
            description: None,
            image: None,
            category: Category::Exhibition,
            capacity: 40,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_starts_empty() {
        let store = SelectionStore::new();
        assert_eq!(store.state(), SelectionState::default());
    }

    #[test]
    fn test_repeated_selection_notifies_once() {
        let store = SelectionStore::new();
        let records = vec![record("a", "2025-06-01")];
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let _sub = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.set_selected_date(date(2025, 6, 1), &records);
        let first = store.state();
        store.set_selected_date(date(2025, 6, 1), &records);

        assert_eq!(calls.get(), 1);
        assert_eq!(store.state(), first);
    }

    #[test]
    fn test_records_always_follow_the_matcher() {
        let store = SelectionStore::new();
        let mut records = vec![record("a", "2025-06-01"), record("b", "2025-06-02")];

        store.set_selected_date(date(2025, 6, 1), &records);
        assert_eq!(
            store.state().selected_records,
            matcher::filter_by_date(&records, date(2025, 6, 1))
        );

        records.push(record("c", "2025-06-01T21:00:00"));
        store.refresh(&records);
        let ids: Vec<_> = store.state().selected_records.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_every_subscriber_sees_the_change() {
        let store = SelectionStore::new();
        let grid_seen = Rc::new(RefCell::new(None));
        let panel_seen = Rc::new(RefCell::new(0usize));

        let grid = Rc::clone(&grid_seen);
        let _grid_sub = store.subscribe(move |s| *grid.borrow_mut() = s.selected_date);
        let panel = Rc::clone(&panel_seen);
        let _panel_sub = store.subscribe(move |s| *panel.borrow_mut() = s.selected_records.len());

        store.set_selected_date(date(2025, 6, 1), &[record("a", "2025-06-01")]);

        assert_eq!(*grid_seen.borrow(), Some(date(2025, 6, 1)));
        assert_eq!(*panel_seen.borrow(), 1);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let store = SelectionStore::new();
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let sub = store.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(store.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);

        store.set_selected_date(date(2025, 6, 1), &[]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_listener_can_read_the_store() {
        let store = SelectionStore::new();
        let seen = Rc::new(RefCell::new(None));

        let reader = store.clone();
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe(move |_| *sink.borrow_mut() = reader.state().selected_date);

        store.set_selected_date(date(2025, 6, 3), &[]);
        assert_eq!(*seen.borrow(), Some(date(2025, 6, 3)));
    }

    #[test]
    fn test_clear_notifies_and_resets() {
        let store = SelectionStore::new();
        store.set_selected_date(date(2025, 6, 1), &[record("a", "2025-06-01")]);

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = store.subscribe(move |s| {
            assert!(s.selected_date.is_none());
            counter.set(counter.get() + 1);
        });

        store.clear();
        store.clear();
        assert_eq!(calls.get(), 1);
        assert!(store.state().selected_records.is_empty());
    }

    #[test]
    fn test_write_from_listener_is_delivered_in_order() {
        let store = SelectionStore::new();
        let records = vec![record("a", "2025-06-01"), record("b", "2025-06-02")];

        let writer = store.clone();
        let all = records.clone();
        let _redirect = store.subscribe(move |s| {
            if s.selected_date == Some(date(2025, 6, 1)) {
                writer.set_selected_date(date(2025, 6, 2), &all);
            }
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _panel = store.subscribe(move |s| sink.borrow_mut().push(s.selected_date));

        store.set_selected_date(date(2025, 6, 1), &records);

        let state = store.state();
        assert_eq!(state.selected_date, Some(date(2025, 6, 2)));
        assert_eq!(state.selected_records, matcher::filter_by_date(&records, date(2025, 6, 2)));
        assert_eq!(
            *seen.borrow(),
            vec![Some(date(2025, 6, 1)), Some(date(2025, 6, 2))]
        );

        // Delivery finished: a later change notifies normally.
        store.clear();
        assert_eq!(seen.borrow().last(), Some(&None));
    }

    #[test]
    fn test_listener_dropped_mid_change_is_not_called() {
        let store = SelectionStore::new();
        let calls = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&victim);
        let _first = store.subscribe(move |_| {
            slot.borrow_mut().take();
        });
        let counter = Rc::clone(&calls);
        *victim.borrow_mut() = Some(store.subscribe(move |_| counter.set(counter.get() + 1)));
        assert_eq!(store.subscriber_count(), 2);

        store.set_selected_date(date(2025, 6, 1), &[]);

        assert_eq!(calls.get(), 0);
        assert_eq!(store.subscriber_count(), 1);
    }
}

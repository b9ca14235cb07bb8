use std::{collections::VecDeque, sync::Arc};

use tracing::warn;

use crate::panel::types::Message;

// The deque grows past this on demand.
const INITIAL_CAPACITY_CAP: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngestOutcome {
    pub evicted: bool,
    /// Set on the ingest that makes the sticky count reach the warning
    /// threshold; re-armed by a clear.
    pub sticky_threshold_reached: bool,
}

/// Arrival-ordered messages (most recent last). Normal messages roll over at
/// `max_messages`; sticky ones stay until cleared.
#[derive(Debug)]
pub struct MessageStore {
    messages: VecDeque<Arc<Message>>,
    max_messages: usize,
    normal_count: usize,
    sticky_count: usize,
    sticky_warn_threshold: usize,
    sticky_warned: bool,
}

impl MessageStore {
    pub fn new(max_messages: usize, sticky_warn_threshold: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_messages.min(INITIAL_CAPACITY_CAP)),
            max_messages,
            normal_count: 0,
            sticky_count: 0,
            sticky_warn_threshold,
            sticky_warned: false,
        }
    }

    pub fn ingest(&mut self, message: Message) -> IngestOutcome {
        let sticky = message.is_sticky();
        self.messages.push_back(Arc::new(message));

        let mut outcome = IngestOutcome {
            evicted: false,
            sticky_threshold_reached: false,
        };

        if sticky {
            self.sticky_count += 1;
            if self.sticky_warn_threshold > 0
                && !self.sticky_warned
                && self.sticky_count >= self.sticky_warn_threshold
            {
                self.sticky_warned = true;
                outcome.sticky_threshold_reached = true;
                warn!(
                    "store: {} sticky messages retained; only a clear releases them",
                    self.sticky_count
                );
            }
            return outcome;
        }

        self.normal_count += 1;
        if self.normal_count > self.max_messages {
            if let Some(idx) = self.messages.iter().position(|msg| !msg.is_sticky()) {
                self.messages.remove(idx);
                self.normal_count -= 1;
                outcome.evicted = true;
            }
        }
        outcome
    }

    pub fn clear_all(&mut self) {
        self.messages.clear();
        self.normal_count = 0;
        self.sticky_count = 0;
        self.sticky_warned = false;
    }

    pub fn clear_sticky(&mut self) {
        self.messages.retain(|msg| !msg.is_sticky());
        self.sticky_count = 0;
        self.sticky_warned = false;
    }

    /// Shares the current messages without exposing the store itself.
    pub fn snapshot(&self) -> Vec<Arc<Message>> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn normal_count(&self) -> usize {
        self.normal_count
    }

    pub fn sticky_count(&self) -> usize {
        self.sticky_count
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use proptest::prelude::*;

    use super::*;
    use crate::panel::types::Importance;

    fn msg(text: &str, importance: Importance) -> Message {
        Message::new(text, "test", importance, Local::now()).expect("message")
    }

    fn texts(store: &MessageStore) -> Vec<String> {
        store
            .snapshot()
            .iter()
            .map(|m| m.text().to_string())
            .collect()
    }

    #[test]
    fn keeps_most_recent_normal_messages() {
        let mut store = MessageStore::new(3, 0);
        for i in 0..5 {
            store.ingest(msg(&format!("m{i}"), Importance::Info));
        }
        assert_eq!(texts(&store), ["m2", "m3", "m4"]);
    }

    #[test]
    fn sticky_survives_rollover() {
        let mut store = MessageStore::new(3, 0);
        store.ingest(msg("warn", Importance::Warning));
        for i in 0..10 {
            store.ingest(msg(&format!("m{i}"), Importance::Info));
        }
        assert_eq!(texts(&store), ["warn", "m7", "m8", "m9"]);
        assert_eq!(store.sticky_count(), 1);
        assert_eq!(store.normal_count(), 3);
    }

    #[test]
    fn clear_all_empties_store() {
        let mut store = MessageStore::new(3, 0);
        store.ingest(msg("a", Importance::Error));
        store.ingest(msg("b", Importance::Info));
        store.clear_all();
        assert!(store.snapshot().is_empty());
        assert_eq!(store.normal_count(), 0);
        assert_eq!(store.sticky_count(), 0);
    }

    #[test]
    fn clear_sticky_keeps_normal_messages() {
        let mut store = MessageStore::new(3, 0);
        store.ingest(msg("a", Importance::Error));
        store.ingest(msg("b", Importance::Info));
        store.ingest(msg("c", Importance::Warning));
        store.clear_sticky();
        assert_eq!(texts(&store), ["b"]);
    }

    #[test]
    fn zero_capacity_drops_normal_messages() {
        let mut store = MessageStore::new(0, 0);
        let outcome = store.ingest(msg("a", Importance::Info));
        assert!(outcome.evicted);
        assert!(store.is_empty());
    }

    #[test]
    fn huge_cap_does_not_reserve_up_front() {
        let mut store = MessageStore::new(usize::MAX, 0);
        assert_eq!(store.max_messages(), usize::MAX);
        for i in 0..100 {
            store.ingest(msg(&format!("m{i}"), Importance::Info));
        }
        assert_eq!(store.len(), 100);
    }

    #[test]
    fn sticky_threshold_fires_once_until_cleared() {
        let mut store = MessageStore::new(3, 2);
        assert!(!store.ingest(msg("a", Importance::Error)).sticky_threshold_reached);
        assert!(store.ingest(msg("b", Importance::Error)).sticky_threshold_reached);
        assert!(!store.ingest(msg("c", Importance::Error)).sticky_threshold_reached);
        store.clear_all();
        store.ingest(msg("d", Importance::Error));
        assert!(store.ingest(msg("e", Importance::Error)).sticky_threshold_reached);
    }

    #[test]
    fn snapshot_is_detached_from_later_ingest() {
        let mut store = MessageStore::new(3, 0);
        store.ingest(msg("a", Importance::Info));
        let before = store.snapshot();
        store.ingest(msg("b", Importance::Info));
        store.clear_all();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].text(), "a");
    }

    fn importance_strategy() -> impl Strategy<Value = Importance> {
        prop_oneof![
            4 => Just(Importance::Info),
            1 => Just(Importance::Warning),
            1 => Just(Importance::Error),
            1 => Just(Importance::Control),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn normal_portion_never_exceeds_capacity(
            max in 0usize..8,
            seq in prop::collection::vec(importance_strategy(), 0..60)
        ) {
            let mut store = MessageStore::new(max, 0);
            let mut sticky_ingested = 0usize;
            for (i, importance) in seq.iter().enumerate() {
                store.ingest(msg(&format!("m{i}"), *importance));
                if importance.is_sticky() {
                    sticky_ingested += 1;
                }
                let snapshot = store.snapshot();
                let normal = snapshot.iter().filter(|m| !m.is_sticky()).count();
                let sticky = snapshot.iter().filter(|m| m.is_sticky()).count();
                prop_assert!(normal <= max);
                prop_assert_eq!(sticky, sticky_ingested);
            }
        }

        #[test]
        fn snapshot_preserves_arrival_order(
            seq in prop::collection::vec(importance_strategy(), 0..40)
        ) {
            let mut store = MessageStore::new(5, 0);
            for (i, importance) in seq.iter().enumerate() {
                store.ingest(msg(&format!("{i:03}"), *importance));
            }
            let order: Vec<String> = texts(&store);
            let mut sorted = order.clone();
            sorted.sort();
            prop_assert_eq!(order, sorted);
        }
    }
}

//! Bounded log of dispatched actions, oldest first

use std::collections::VecDeque;

use crate::actions::ActionRecord;

#[derive(Debug, Clone)]
pub struct ActionHistory {
    records: VecDeque<ActionRecord>,
    capacity: usize,
}

impl ActionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest ones past capacity
    pub fn push(&mut self, record: ActionRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<ActionRecord> {
        self.records.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::UserAction;
    use proptest::prelude::*;

    fn record(ts: i64) -> ActionRecord {
        ActionRecord::new(UserAction::IncrementConsumption, ts)
    }

    #[test]
    fn test_evicts_oldest() {
        let mut history = ActionHistory::new(3);
        for ts in 0..5 {
            history.push(record(ts));
        }
        let timestamps: Vec<i64> = history.iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![2, 3, 4]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = ActionHistory::new(0);
        history.push(record(1));
        assert!(history.is_empty());
    }

    proptest! {
        #[test]
        fn keeps_the_most_recent_records(capacity in 1usize..60, count in 0usize..200) {
            let mut history = ActionHistory::new(capacity);
            for ts in 0..count {
                history.push(record(ts as i64));
            }
            prop_assert_eq!(history.len(), count.min(capacity));
            if count > 0 {
                prop_assert_eq!(history.iter().last().map(|r| r.timestamp), Some(count as i64 - 1));
                let first = count.saturating_sub(capacity) as i64;
                prop_assert_eq!(history.iter().next().map(|r| r.timestamp), Some(first));
            }
        }
    }
}

//! # Identifier Allocation
//!
//! Account, loan and offer ids are timestamp-derived, like the ids users see
//! in the dashboard, but never collide: an allocated id is always greater
//! than every id already present and every id previously handed out.

use super::entities::TransactionId;

/// Monotonic id source shared by accounts, loans and offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdAllocator {
    last_issued: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id: `max(now_millis, existing_max + 1, last_issued + 1)`.
    pub fn next(&mut self, now_millis: u64, existing_max: Option<u64>) -> u64 {
        let floor = existing_max.map_or(0, |max| max.saturating_add(1));
        let id = now_millis
            .max(floor)
            .max(self.last_issued.saturating_add(1));
        self.last_issued = id;
        id
    }
}

/// `TXN` followed by the next sequence number, zero-padded to six digits.
///
/// Ids that do not follow the `TXN<digits>` form are ignored when computing
/// the sequence.
pub fn next_transaction_id<'a>(existing: impl IntoIterator<Item = &'a TransactionId>) -> TransactionId {
    let next = existing
        .into_iter()
        .filter_map(TransactionId::sequence)
        .max()
        .map_or(1, |max| max.saturating_add(1));
    TransactionId(format!("{}{:06}", TransactionId::PREFIX, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_the_clock() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next(1_700_000_000_000, Some(104)), 1_700_000_000_000);
        assert_eq!(ids.next(1_700_000_000_500, Some(104)), 1_700_000_000_500);
    }

    #[test]
    fn test_ids_never_repeat_within_one_millisecond() {
        let mut ids = IdAllocator::new();
        let first = ids.next(1_000, None);
        let second = ids.next(1_000, None);
        let third = ids.next(999, None);
        assert!(first < second && second < third);
    }

    #[test]
    fn test_ids_stay_above_existing() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next(5, Some(104)), 105);
    }

    #[test]
    fn test_transaction_sequence() {
        let existing = vec![
            TransactionId("TXN001".into()),
            TransactionId("TXN003".into()),
            TransactionId("legacy".into()),
        ];
        assert_eq!(next_transaction_id(&existing).0, "TXN000004");
        assert_eq!(next_transaction_id(&[]).0, "TXN000001");
    }
}

use std::collections::HashSet;

use crate::record::HotlistRecord;

/// Append the records from `incoming` whose timestamp is not already
/// present in `existing`. Returns a new collection; `existing` is never
/// mutated, so concurrent readers of a previous snapshot stay consistent.
///
/// Only existing-vs-incoming is deduplicated: two incoming records that
/// share a timestamp both survive.
pub fn merge_unique(existing: &[HotlistRecord], incoming: Vec<HotlistRecord>) -> Vec<HotlistRecord> {
    let seen: HashSet<i64> = existing.iter().map(|r| r.timestamp).collect();

    let mut merged = existing.to_vec();
    merged.extend(incoming.into_iter().filter(|r| !seen.contains(&r.timestamp)));
    merged
}

/// Stable descending sort by timestamp (newest first).
pub fn sort_newest_first(records: &mut [HotlistRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(timestamp: i64, coin: &str) -> HotlistRecord {
        HotlistRecord {
            timestamp,
            raw_time: String::new(),
            color: String::new(),
            contract: String::new(),
            coin_name: coin.to_string(),
            occurrences: 0,
            groups: 0,
            price: serde_json::Value::Null,
            initial_market_cap: serde_json::Value::Null,
            market_cap: serde_json::Value::Null,
            top10_holdings: serde_json::Value::Null,
            holders: 0,
            popularity: serde_json::Value::Null,
            people: 0,
        }
    }

    #[test]
    fn skips_timestamps_already_present() {
        let existing = vec![rec(1_700_000_000, "OLD")];
        let incoming = vec![rec(1_700_000_000, "DUP"), rec(1_700_000_100, "NEW")];

        let merged = merge_unique(&existing, incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].coin_name, "OLD");
        assert_eq!(merged[1].timestamp, 1_700_000_100);
    }

    #[test]
    fn remerging_same_batch_changes_nothing() {
        let batch = vec![rec(1, "A"), rec(2, "B")];
        let once = merge_unique(&[], batch.clone());
        let twice = merge_unique(&once, batch);
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn duplicates_within_incoming_both_survive() {
        let incoming = vec![rec(5, "FIRST"), rec(5, "SECOND")];
        let merged = merge_unique(&[], incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].coin_name, "FIRST");
        assert_eq!(merged[1].coin_name, "SECOND");
    }

    #[test]
    fn sort_orders_newest_first_and_is_stable() {
        let mut records = vec![rec(1, "A"), rec(3, "B"), rec(2, "C"), rec(3, "D")];
        sort_newest_first(&mut records);

        let order: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
        assert_eq!(order, vec![3, 3, 2, 1]);
        // Equal keys keep their input order.
        assert_eq!(records[0].coin_name, "B");
        assert_eq!(records[1].coin_name, "D");
    }
}

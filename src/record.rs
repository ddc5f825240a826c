use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel stored when the upstream query-time string does not parse.
pub const INVALID_TIMESTAMP: i64 = -1;

/// Format of the upstream `查询时间` field, e.g. `2024-01-01 00:01:00`.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One raw hotlist item exactly as the upstream sends it.
///
/// Deserialization fails when a required field is missing, so a malformed
/// item is rejected at the envelope boundary instead of producing a
/// half-populated record. Metric fields arrive as numbers or strings
/// depending on upstream mood, so they stay opaque `Value`s.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHotlistItem {
    #[serde(rename = "查询时间")]
    pub query_time: String,
    #[serde(rename = "颜色")]
    pub color: String,
    #[serde(rename = "合约")]
    pub contract: String,
    #[serde(rename = "币名")]
    pub coin_name: String,
    #[serde(rename = "次数")]
    pub occurrences: i64,
    #[serde(rename = "群数")]
    pub groups: i64,
    #[serde(rename = "价格")]
    pub price: Value,
    #[serde(rename = "首发市值")]
    pub initial_market_cap: Value,
    #[serde(rename = "市值")]
    pub market_cap: Value,
    #[serde(rename = "Top10持仓")]
    pub top10_holdings: Value,
    #[serde(rename = "持有人")]
    pub holders: i64,
    #[serde(rename = "热度")]
    pub popularity: Value,
    #[serde(rename = "人数")]
    pub people: i64,
}

/// Canonical record: the normalized unit of storage and of every API
/// response. `timestamp` is the unique key and the sort key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotlistRecord {
    pub timestamp: i64,
    pub raw_time: String,
    pub color: String,
    pub contract: String,
    pub coin_name: String,
    pub occurrences: i64,
    pub groups: i64,
    pub price: Value,
    pub initial_market_cap: Value,
    pub market_cap: Value,
    pub top10_holdings: Value,
    pub holders: i64,
    pub popularity: Value,
    pub people: i64,
}

/// Parse an upstream query-time string into epoch seconds (UTC).
pub fn to_timestamp_secs(raw: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(raw.trim(), QUERY_TIME_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().timestamp())
}

/// Map one raw item into its canonical shape.
///
/// Never fails: an unparseable query time is logged and recorded with
/// [`INVALID_TIMESTAMP`], keeping the item visible rather than dropping it.
pub fn normalize(item: RawHotlistItem) -> HotlistRecord {
    let timestamp = match to_timestamp_secs(&item.query_time) {
        Some(ts) => ts,
        None => {
            tracing::warn!(
                query_time = %item.query_time,
                coin = %item.coin_name,
                "unparseable query time, recording sentinel timestamp"
            );
            INVALID_TIMESTAMP
        }
    };

    HotlistRecord {
        timestamp,
        raw_time: item.query_time,
        color: item.color,
        contract: item.contract,
        coin_name: item.coin_name,
        occurrences: item.occurrences,
        groups: item.groups,
        price: item.price,
        initial_market_cap: item.initial_market_cap,
        market_cap: item.market_cap,
        top10_holdings: item.top10_holdings,
        holders: item.holders,
        popularity: item.popularity,
        people: item.people,
    }
}

/// Raw upstream item as JSON, for tests across modules.
#[cfg(test)]
pub(crate) fn raw_item_json(query_time: &str) -> Value {
    serde_json::json!({
        "查询时间": query_time,
        "颜色": "绿色",
        "合约": "0xabc123",
        "币名": "PEPE",
        "次数": 3,
        "群数": 7,
        "价格": "0.0000012",
        "首发市值": "50K",
        "市值": "1.2M",
        "Top10持仓": "18%",
        "持有人": 412,
        "热度": 88.5,
        "人数": 120,
    })
}

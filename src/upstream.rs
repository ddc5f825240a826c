use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde_json::Value;

use crate::config::HubConfig;
use crate::record::RawHotlistItem;

/// HTTP client for the upstream hotlist endpoint.
pub struct HotlistClient {
    http: Client,
    url: String,
    page: u32,
    limit: u32,
}

impl HotlistClient {
    pub fn new(cfg: &HubConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            http,
            url: cfg.upstream_url.clone(),
            page: cfg.page,
            limit: cfg.limit,
        })
    }

    /// Fetch one page of the hotlist.
    ///
    /// Transport or HTTP failures are errors; a non-success envelope or a
    /// missing `data` array is just an empty batch (logged, not fatal).
    pub async fn fetch_hotlist(&self) -> Result<Vec<RawHotlistItem>> {
        let resp = self
            .http
            .get(&self.url)
            .query(&[("page", self.page), ("limit", self.limit)])
            .send()
            .await
            .context("hotlist request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("hotlist HTTP {status}");
        }

        let body: Value = resp.json().await.context("hotlist response json")?;
        Ok(decode_envelope(&body))
    }
}

/// Unwrap the upstream `{code, data}` envelope.
///
/// Anything other than `code == 0` with a `data` array yields an empty
/// batch. Items inside `data` that fail the schema are skipped with a
/// warning rather than poisoning the whole batch.
pub fn decode_envelope(body: &Value) -> Vec<RawHotlistItem> {
    let code = body.get("code").and_then(Value::as_i64);
    if code != Some(0) {
        tracing::warn!(?code, "unexpected hotlist envelope");
        return Vec::new();
    }

    let Some(items) = body.get("data").and_then(Value::as_array) else {
        tracing::warn!("hotlist envelope has no data array");
        return Vec::new();
    };

    let mut out = Vec::with_capacity(items.len());
    for raw in items {
        match serde_json::from_value::<RawHotlistItem>(raw.clone()) {
            Ok(item) => out.push(item),
            Err(e) => tracing::warn!("skipping malformed hotlist item: {e}"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::raw_item_json;
    use serde_json::json;

    #[test]
    fn decodes_success_envelope() {
        let body = json!({
            "code": 0,
            "data": [raw_item_json("2024-01-01 00:00:00"), raw_item_json("2024-01-01 00:01:00")],
        });
        let items = decode_envelope(&body);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].query_time, "2024-01-01 00:00:00");
    }

    #[test]
    fn error_code_yields_empty_batch() {
        let body = json!({ "code": 1, "msg": "rate limited" });
        assert!(decode_envelope(&body).is_empty());
    }

    #[test]
    fn missing_or_null_data_yields_empty_batch() {
        assert!(decode_envelope(&json!({ "code": 0 })).is_empty());
        assert!(decode_envelope(&json!({ "code": 0, "data": null })).is_empty());
    }

    #[test]
    fn malformed_items_are_skipped_not_fatal() {
        let body = json!({
            "code": 0,
            "data": [
                raw_item_json("2024-01-01 00:00:00"),
                { "查询时间": "2024-01-01 00:01:00" },
            ],
        });
        let items = decode_envelope(&body);
        assert_eq!(items.len(), 1);
    }
}

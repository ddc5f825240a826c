use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::ReadMode;
use crate::merge;
use crate::record::{self, HotlistRecord};
use crate::state::AppState;

/// One fetch → normalize → merge → persist pass.
///
/// Returns the number of newly appended records. Every failure is local
/// to the cycle: an upstream error or an empty batch leaves both the
/// cache and the data file untouched, and a failed save leaves the
/// already-published in-memory state in place for the next cycle's retry.
pub async fn run_cycle(state: &AppState) -> Result<usize> {
    let batch = state.client.fetch_hotlist().await?;
    if batch.is_empty() {
        tracing::debug!("empty hotlist batch, nothing to ingest");
        return Ok(0);
    }

    let incoming: Vec<HotlistRecord> = batch.into_iter().map(record::normalize).collect();

    let current: Vec<HotlistRecord> = match state.config.read_mode {
        ReadMode::Cache => state.snapshot().await.as_ref().clone(),
        ReadMode::File => state.store.load(),
    };
    let before = current.len();

    let mut merged = merge::merge_unique(&current, incoming);
    let added = merged.len() - before;

    match state.config.read_mode {
        ReadMode::Cache => {
            merge::sort_newest_first(&mut merged);
            let published = Arc::new(merged);
            // Publish before persisting so concurrent reads see the new
            // data without waiting on file I/O.
            state.install(Arc::clone(&published)).await;
            state.store.save(&published)?;
        }
        ReadMode::File => {
            state.store.save(&merged)?;
        }
    }

    Ok(added)
}

/// Background task: run one cycle immediately, then one per poll interval.
///
/// The single task awaits each cycle to completion before the next tick,
/// so cycles never overlap.
pub fn spawn_poller(state: Arc<AppState>) {
    let poll_secs = state.config.poll_secs;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(poll_secs));
        loop {
            interval.tick().await;
            match run_cycle(&state).await {
                Ok(0) => {}
                Ok(added) => tracing::info!(added, "ingested new hotlist records"),
                Err(e) => tracing::warn!("hotlist cycle failed: {e:#}"),
            }
        }
    });
}

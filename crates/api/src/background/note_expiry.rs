//! Periodic purge of expired recycle-bin notes.
//!
//! Spawns a background task that permanently deletes notes whose
//! `expires_at` has passed. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use notecrypt_db::repositories::NoteRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run one sweep: delete every recycle-bin note expired as of now.
///
/// Returns the number of notes purged.
pub async fn sweep_once(pool: &PgPool) -> Result<u64, sqlx::Error> {
    NoteRepo::purge_expired(pool, Utc::now()).await
}

/// Run the expiry sweep loop until `cancel` is triggered.
///
/// Failures are logged and retried on the next tick.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Note expiry sweep started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Note expiry sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                match sweep_once(&pool).await {
                    Ok(purged) => {
                        if purged > 0 {
                            tracing::info!(purged, "Note expiry sweep: purged expired notes");
                        } else {
                            tracing::debug!("Note expiry sweep: nothing expired");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Note expiry sweep failed");
                    }
                }
            }
        }
    }
}

//! Order Number Generator
//!
//! Produces day-scoped sequential order numbers (`INV<YYYYMMDD>-<NNN>`)
//! from a single persisted counter record (`counter:orders`). The
//! read-modify-write is one conditional `UPSERT` statement, so concurrent
//! generators are serialized by the store's transaction isolation — no
//! application-level locking on top. Contention is absorbed by a bounded
//! retry loop with exponential backoff.

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::utils::time::{Clock, day_stamp};

/// Atomic increment-or-reset of the daily counter.
///
/// A stored date other than today's (or a missing record) resets the count
/// to 1; otherwise the count advances by one.
const NEXT_COUNT_QUERY: &str = "\
    UPSERT counter:orders SET \
        count = IF date = $day { count + 1 } ELSE { 1 }, \
        date = $day \
    RETURN AFTER";

const BACKOFF_BASE_MS: u64 = 20;

#[derive(Debug, Deserialize)]
struct CounterRow {
    count: i64,
}

#[derive(Clone)]
pub struct OrderNumberGenerator {
    base: BaseRepository,
    clock: Arc<dyn Clock>,
    tz: Tz,
    max_retries: u32,
}

impl OrderNumberGenerator {
    pub fn new(db: Surreal<Db>, clock: Arc<dyn Clock>, tz: Tz, max_retries: u32) -> Self {
        Self {
            base: BaseRepository::new(db),
            clock,
            tz,
            max_retries,
        }
    }

    /// Next unique order number for today (business timezone).
    ///
    /// Never returns a duplicate for the same calendar day; the sequence
    /// restarts at 1 on the first call of a new day.
    pub async fn next_order_no(&self) -> RepoResult<String> {
        let day = day_stamp(self.clock.now_utc(), self.tz);

        let mut attempt: u32 = 0;
        loop {
            match self.next_count(&day).await {
                Ok(count) => {
                    if count > 999 {
                        // Padding widens past 999; uniqueness and day-prefix
                        // search are unaffected.
                        tracing::warn!(day = %day, count, "Daily order sequence passed 999");
                    }
                    return Ok(format_order_no(&day, count));
                }
                Err(err) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = Duration::from_millis(BACKOFF_BASE_MS << (attempt - 1));
                    tracing::warn!(
                        error = %err,
                        attempt,
                        "Order number generation conflicted, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    return Err(RepoError::Database(format!(
                        "Order number generation failed after {} retries: {}",
                        self.max_retries, err
                    )));
                }
            }
        }
    }

    async fn next_count(&self, day: &str) -> RepoResult<i64> {
        let rows: Vec<CounterRow> = self
            .base
            .db()
            .query(NEXT_COUNT_QUERY)
            .bind(("day", day.to_string()))
            .await?
            .take(0)?;

        rows.into_iter()
            .next()
            .map(|row| row.count)
            .ok_or_else(|| RepoError::Database("Counter upsert returned no record".to_string()))
    }
}

/// Format a day stamp and count as an order number
fn format_order_no(day: &str, count: i64) -> String {
    format!("INV{}-{:03}", day, count)
}

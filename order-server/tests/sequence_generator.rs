//! Order number generator tests on the in-memory engine
//!
//! Run: cargo test -p order-server --test sequence_generator

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use order_server::db::DbService;
use order_server::db::repository::OrderNumberGenerator;
use order_server::utils::time::FixedClock;

fn clock_at(y: i32, m: u32, d: u32) -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap())
}

async fn generator(clock: FixedClock, retries: u32) -> (DbService, OrderNumberGenerator) {
    let db = DbService::open_memory().await.expect("open in-memory db");
    let generator =
        OrderNumberGenerator::new(db.db.clone(), Arc::new(clock), chrono_tz::UTC, retries);
    (db, generator)
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_generation_yields_a_contiguous_sequence() {
    const CALLERS: usize = 25;

    let (_db, generator) = generator(clock_at(2024, 1, 15), 10).await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..CALLERS {
        let generator = generator.clone();
        tasks.spawn(async move { generator.next_order_no().await.expect("generate") });
    }

    let mut numbers = Vec::new();
    while let Some(result) = tasks.join_next().await {
        numbers.push(result.expect("task"));
    }

    // All distinct, all stamped with the same day
    let distinct: HashSet<&String> = numbers.iter().collect();
    assert_eq!(distinct.len(), CALLERS);
    for number in &numbers {
        assert!(number.starts_with("INV20240115-"), "got {number}");
    }

    // The counts form exactly 1..=N — no gaps, no duplicates
    let mut counts: Vec<u32> = numbers
        .iter()
        .map(|n| n.rsplit('-').next().unwrap().parse().unwrap())
        .collect();
    counts.sort_unstable();
    let expected: Vec<u32> = (1..=CALLERS as u32).collect();
    assert_eq!(counts, expected);
}

#[tokio::test]
async fn sequence_resets_on_day_rollover() {
    let clock = clock_at(2024, 1, 15);
    let (_db, generator) = generator(clock.clone(), 3).await;

    assert_eq!(generator.next_order_no().await.unwrap(), "INV20240115-001");
    assert_eq!(generator.next_order_no().await.unwrap(), "INV20240115-002");

    // Next calendar day: the count restarts regardless of yesterday's final
    clock.set(Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 1).unwrap());
    assert_eq!(generator.next_order_no().await.unwrap(), "INV20240116-001");

    // And keeps counting within the new day
    assert_eq!(generator.next_order_no().await.unwrap(), "INV20240116-002");
}

#[tokio::test]
async fn sequence_respects_the_business_timezone() {
    // 2024-01-15 23:30 UTC is already Jan 16 in Jakarta (UTC+7)
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap());
    let db = DbService::open_memory().await.expect("open in-memory db");
    let generator = OrderNumberGenerator::new(
        db.db.clone(),
        Arc::new(clock),
        chrono_tz::Asia::Jakarta,
        3,
    );

    assert_eq!(generator.next_order_no().await.unwrap(), "INV20240116-001");
}

#[tokio::test]
async fn sequence_widens_past_three_digits() {
    let (db, generator) = generator(clock_at(2024, 1, 15), 3).await;

    // Seed the counter at the documented padding boundary
    db.db
        .query("UPSERT counter:orders SET count = 999, date = '20240115'")
        .await
        .expect("seed counter")
        .check()
        .expect("seed counter");

    assert_eq!(generator.next_order_no().await.unwrap(), "INV20240115-1000");
}

use crate::conf::MonitorConfig;
use crate::monitor::LogMonitor;
use crate::test_helpers::access_line;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

fn fast_config() -> MonitorConfig {
    MonitorConfig {
        alarm_threshold: 3,
        tick_interval_ms: 10,
        ..MonitorConfig::new("/tmp/access.log")
    }
}

async fn wait_until(mut cond: impl FnMut() -> bool) {
    timeout(Duration::from_secs(2), async {
        while !cond() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition reached in time");
}

#[tokio::test]
async fn started_monitor_ingests_and_raises_alarm() {
    // Arrange
    let monitor = Arc::new(LogMonitor::new(fast_config()).unwrap());
    let (tx, rx) = mpsc::channel::<String>(16);
    let handle = monitor.start(rx);

    // Act
    for user in ["a", "b", "c"] {
        tx.send(access_line(user, "GET", "/api/x", Utc::now()))
            .await
            .unwrap();
    }
    tx.send("not a log line".into()).await.unwrap();

    // Assert
    wait_until(|| monitor.alarm_active()).await;
    assert_eq!(monitor.size(), 3);
    assert_eq!(monitor.error_count(), 1);

    handle.stop().await;
}

#[tokio::test]
async fn stop_halts_the_tick_loop() {
    let monitor = Arc::new(LogMonitor::new(fast_config()).unwrap());
    let (_tx, rx) = mpsc::channel::<String>(1);
    let handle = monitor.start(rx);
    wait_until(|| monitor.ticks() >= 2).await;

    handle.stop().await;
    let after_stop = monitor.ticks();
    sleep(Duration::from_millis(60)).await;

    assert_eq!(monitor.ticks(), after_stop);
}

#[tokio::test]
async fn exhausted_source_ends_ingest_but_ticks_continue() {
    let monitor = Arc::new(LogMonitor::new(fast_config()).unwrap());
    let (tx, rx) = mpsc::channel::<String>(4);
    tx.send(access_line("a", "GET", "/x", Utc::now())).await.unwrap();
    drop(tx);

    let handle = monitor.start(rx);
    wait_until(|| handle.ingest_finished()).await;
    let ticks = monitor.ticks();
    wait_until(|| monitor.ticks() > ticks).await;

    assert_eq!(monitor.size(), 1);
    handle.stop().await;
}

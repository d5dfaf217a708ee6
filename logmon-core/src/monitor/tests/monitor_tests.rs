use crate::alarm::{AlarmTransition, AlertKind};
use crate::clock::ManualClock;
use crate::conf::{ConfigError, MonitorConfig};
use crate::monitor::{LogMonitor, TickError};
use crate::record::ParseError;
use crate::test_helpers::{access_line, test_epoch};
use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn config(threshold: usize, retention_seconds: u64) -> MonitorConfig {
    MonitorConfig {
        alarm_threshold: threshold,
        retention_seconds,
        ..MonitorConfig::new("/tmp/access.log")
    }
}

fn monitor_with(cfg: MonitorConfig) -> (LogMonitor, ManualClock) {
    let clock = ManualClock::new(test_epoch());
    let monitor = LogMonitor::with_clock(cfg, Arc::new(clock.clone())).unwrap();
    (monitor, clock)
}

fn line(user: &str, path: &str, at: DateTime<Utc>) -> String {
    access_line(user, "GET", path, at)
}

#[test]
fn empty_log_path_refuses_to_build() {
    let err = LogMonitor::new(MonitorConfig::default()).unwrap_err();

    assert!(matches!(err, ConfigError::EmptyLogFilePath));
}

#[test]
fn valid_lines_are_cached_without_errors() {
    // Arrange
    let (monitor, _clock) = monitor_with(config(10, 120));

    // Act
    for (user, path) in [("james", "/report"), ("jill", "/api/user"), ("frank", "/api/user")] {
        monitor.handle_line(&line(user, path, test_epoch()));
    }

    // Assert
    assert_eq!(monitor.size(), 3);
    assert!(monitor.errors().is_empty());
    assert_eq!(
        monitor.top_sections(2),
        vec![("/api".into(), 2), ("/report".into(), 1)]
    );
}

#[test]
fn invalid_lines_go_to_the_error_log() {
    let (monitor, _clock) = monitor_with(config(10, 120));

    monitor.handle_line("garbage");
    monitor.handle_line(&line("jill", "/api", test_epoch()));

    let errors = monitor.errors();
    assert_eq!(monitor.size(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].cause, ParseError::Malformed);
    assert_eq!(errors[0].line, "garbage");
    assert_eq!(errors[0].at, test_epoch());
    assert_eq!(monitor.error_count(), 1);
}

#[test]
fn section_totals_match_ingested_lines() {
    let (monitor, _clock) = monitor_with(config(100, 120));
    let paths = ["/a/1", "/b", "a/x", "/a", "/c/d/e", "/b/z"];
    for path in paths {
        monitor.handle_line(&line("u", path, test_epoch()));
    }

    let total: u64 = monitor.top_sections(4).iter().map(|(_, c)| c).sum();

    assert_eq!(total, paths.len() as u64);
}

#[test]
fn hysteresis_breach_then_recover_with_peak() {
    // Arrange
    let (monitor, clock) = monitor_with(config(5, 10));
    let t0 = test_epoch();

    // 5 records at t0 -> breach at exactly the threshold
    for i in 0..5 {
        monitor.handle_line(&line(&format!("u{i}"), "/api", t0));
    }
    let report = monitor.tick().unwrap();
    assert_eq!(report.transition, AlarmTransition::Breached { hits: 5 });
    assert!(monitor.alarm_active());
    assert_eq!(monitor.alerts()[0].kind, AlertKind::Breach);

    // Two more records later in the episode -> peak of 7
    clock.advance(Duration::seconds(8));
    monitor.handle_line(&line("x", "/api", t0));
    monitor.handle_line(&line("y", "/api", t0));
    monitor.tick().unwrap();
    assert_eq!(monitor.alerts().len(), 1);

    // The first five expire, two remain
    clock.advance(Duration::seconds(5));

    // Act
    let report = monitor.tick().unwrap();

    // Assert
    assert_eq!(report.pruned, 5);
    assert_eq!(report.transition, AlarmTransition::Recovered { hits: 2, peak: 7 });
    assert!(!monitor.alarm_active());

    let alerts = monitor.alerts();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].kind, AlertKind::Recovery);
    assert_eq!(alerts[0].hits, 2);
    assert_eq!(alerts[1].kind, AlertKind::Breach);
    assert_eq!(alerts[1].hits, 7);
    assert_eq!(alerts[1].timestamp, t0);
}

#[test]
fn one_below_threshold_does_not_breach() {
    let (monitor, _clock) = monitor_with(config(5, 10));
    for i in 0..4 {
        monitor.handle_line(&line(&format!("u{i}"), "/api", test_epoch()));
    }

    let report = monitor.tick().unwrap();

    assert_eq!(report.transition, AlarmTransition::Quiet);
    assert!(monitor.alerts().is_empty());
}

#[test]
fn retention_boundary_uses_inclusive_window() {
    // Arrange: embedded timestamps drive retention
    let cfg = MonitorConfig {
        ignore_timestamp: false,
        ..config(100, 10)
    };
    let (monitor, _clock) = monitor_with(cfg);
    let now = test_epoch();
    monitor.handle_line(&line("edge", "/a", now - Duration::seconds(10)));
    monitor.handle_line(&line("stale", "/a", now - Duration::seconds(11)));

    // Act
    let report = monitor.tick().unwrap();

    // Assert
    assert_eq!(report.pruned, 1);
    assert_eq!(monitor.size(), 1);
    assert_eq!(monitor.last_n(10)[0].remote_user, "edge");
}

#[test]
fn ignore_timestamp_expires_by_ingestion_time() {
    let (monitor, clock) = monitor_with(config(100, 10));
    // Embedded time far in the past is irrelevant
    monitor.handle_line(&line("old", "/a", test_epoch() - Duration::days(30)));

    monitor.tick().unwrap();
    assert_eq!(monitor.size(), 1);

    clock.advance(Duration::seconds(11));
    monitor.tick().unwrap();
    assert_eq!(monitor.size(), 0);
}

#[test]
fn repeated_ticks_prune_idempotently() {
    let (monitor, clock) = monitor_with(config(100, 10));
    monitor.handle_line(&line("a", "/a", test_epoch()));
    clock.advance(Duration::seconds(5));
    monitor.handle_line(&line("b", "/a", test_epoch()));
    clock.advance(Duration::seconds(6));

    let first = monitor.tick().unwrap();
    let second = monitor.tick().unwrap();

    assert_eq!(first.cached_records, 1);
    assert_eq!(second.cached_records, 1);
    assert_eq!(second.pruned, 0);
}

#[test]
fn last_n_on_empty_monitor_is_one_placeholder_row() {
    let (monitor, _clock) = monitor_with(config(10, 120));

    let rows = monitor.last_n(10);

    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_placeholder());
}

#[test]
fn short_term_reset_keeps_cache_and_alerts() {
    // Arrange
    let (monitor, _clock) = monitor_with(config(2, 120));
    monitor.handle_line(&line("a", "/x", test_epoch()));
    monitor.handle_line(&line("b", "/y", test_epoch()));
    monitor.tick().unwrap();

    // Act
    monitor.reset_short_term_stats();

    // Assert
    assert!(monitor.top_sections(10).is_empty());
    assert!(monitor.top_users(10).is_empty());
    assert_eq!(monitor.size(), 2);
    assert_eq!(monitor.alerts().len(), 1);

    monitor.handle_line(&line("c", "/z", test_epoch()));
    assert_eq!(monitor.top_users(10), vec![("c".into(), 1)]);
}

#[test]
fn failed_tick_is_counted_and_the_next_one_runs() {
    // Arrange
    let (monitor, _clock) = monitor_with(config(10, 120));
    monitor.poison_state();

    // Act
    let absorbed = monitor.run_tick();

    // Assert
    assert!(absorbed.is_none());
    assert_eq!(monitor.tick_failures(), 1);

    assert!(monitor.run_tick().is_some());
    assert_eq!(monitor.ticks(), 1);
    assert_eq!(monitor.tick_failures(), 1);
}

#[test]
fn poisoned_lock_surfaces_as_tick_error() {
    let (monitor, _clock) = monitor_with(config(10, 120));
    monitor.poison_state();

    let err = monitor.tick().unwrap_err();

    assert!(matches!(err, TickError::StatePoisoned));
    assert!(monitor.tick().is_ok());
}

#[test]
fn huge_retention_still_ticks_and_raises_the_alarm() {
    // Arrange: now - retention falls before the earliest representable instant
    let (monitor, _clock) = monitor_with(config(2, 10_000_000_000_000));
    for user in ["jon", "jane", "bob"] {
        monitor.handle_line(&line(user, "/api", test_epoch()));
    }

    // Act
    let reports: Vec<_> = (0..5).map(|_| monitor.run_tick()).collect();

    // Assert
    assert!(reports.iter().all(Option::is_some));
    assert_eq!(reports[0].unwrap().pruned, 0);
    assert_eq!(monitor.tick_failures(), 0);
    assert_eq!(monitor.size(), 3);
    assert!(monitor.alarm_active());
}

#[test]
fn tick_at_the_start_of_time_prunes_nothing() {
    let (monitor, clock) = monitor_with(config(10, 120));
    monitor.handle_line(&line("jon", "/api", test_epoch()));
    clock.set(DateTime::<Utc>::MIN_UTC);

    let report = monitor.tick().unwrap();

    assert_eq!(report.pruned, 0);
    assert_eq!(report.cached_records, 1);
}

#[test]
fn snapshot_is_consistent_view() {
    let (monitor, _clock) = monitor_with(config(2, 120));
    monitor.handle_line(&line("jon", "/users/create", test_epoch()));
    monitor.handle_line(&line("jane", "/users/delete", test_epoch()));
    monitor.handle_line("bad line");
    monitor.tick().unwrap();

    let snap = monitor.snapshot(1, 5, 1);

    assert_eq!(snap.cached_records, 2);
    assert!(snap.alarm_active);
    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(snap.last_requests.len(), 1);
    assert_eq!(snap.last_requests[0].remote_user, "jane");
    assert_eq!(snap.stats.top_sections, vec![("/users".into(), 2)]);
    assert_eq!(snap.stats.top_users, vec![("jon".into(), 1)]);
    assert_eq!(snap.stats.total_hits, 2);
    assert_eq!(snap.parse_errors, 1);
    assert_eq!(snap.tick_failures, 0);
    assert_eq!(snap.alarm_threshold, 2);
}

use crate::record::parse_line;
use crate::store::RecordStore;
use crate::test_helpers::{access_line, test_epoch};
use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;

fn record_at(user: &str, path: &str, processed_at: DateTime<Utc>) -> crate::record::LogRecord {
    parse_line(&access_line(user, "GET", path, processed_at), processed_at).unwrap()
}

#[test]
fn ingest_appends_in_order() {
    // Arrange
    let mut store = RecordStore::new(true);

    // Act
    store.ingest(record_at("a", "/one", test_epoch()));
    store.ingest(record_at("b", "/two", test_epoch()));
    store.ingest(record_at("a", "/one", test_epoch()));

    // Assert
    assert_eq!(store.size(), 3);
    let users: Vec<_> = store.iter().map(|r| r.remote_user.as_str()).collect();
    assert_eq!(users, vec!["a", "b", "a"]);
}

#[test]
fn prune_keeps_record_exactly_at_cutoff() {
    // Arrange
    let retention = Duration::seconds(10);
    let now = test_epoch();
    let mut store = RecordStore::new(true);
    store.ingest(record_at("old", "/a", now - retention - Duration::seconds(1)));
    store.ingest(record_at("edge", "/a", now - retention));
    store.ingest(record_at("new", "/a", now));

    // Act
    let removed = store.prune_older_than(now - retention);

    // Assert
    assert_eq!(removed, 1);
    let users: Vec<_> = store.iter().map(|r| r.remote_user.as_str()).collect();
    assert_eq!(users, vec!["edge", "new"]);
}

#[test]
fn prune_is_idempotent() {
    let now = test_epoch();
    let mut store = RecordStore::new(true);
    for secs in [30, 20, 5, 0] {
        store.ingest(record_at("u", "/a", now - Duration::seconds(secs)));
    }
    let cutoff = now - Duration::seconds(10);

    store.prune_older_than(cutoff);
    let first = store.size();
    let removed_again = store.prune_older_than(cutoff);

    assert_eq!(first, 2);
    assert_eq!(store.size(), first);
    assert_eq!(removed_again, 0);
}

#[test]
fn prune_uses_embedded_time_when_not_ignoring_timestamps() {
    // Arrange
    let now = test_epoch();
    let stale_line = access_line("stale", "GET", "/a", now - Duration::minutes(5));
    let fresh_line = access_line("fresh", "GET", "/a", now);
    let mut store = RecordStore::new(false);

    // Both processed "now", only the embedded time differs
    store.ingest(parse_line(&stale_line, now).unwrap());
    store.ingest(parse_line(&fresh_line, now).unwrap());

    // Act
    store.prune_older_than(now - Duration::seconds(120));

    // Assert
    assert_eq!(store.size(), 1);
    assert_eq!(store.iter().next().unwrap().remote_user, "fresh");
}

#[test]
fn prune_with_out_of_order_embedded_times_keeps_survivor_order() {
    let now = test_epoch();
    let mut store = RecordStore::new(false);
    let lines = [
        ("a", now),
        ("b", now - Duration::minutes(10)),
        ("c", now - Duration::seconds(1)),
        ("d", now - Duration::minutes(20)),
        ("e", now),
    ];
    for (user, at) in lines {
        store.ingest(parse_line(&access_line(user, "GET", "/x", at), now).unwrap());
    }

    store.prune_older_than(now - Duration::seconds(60));

    let users: Vec<_> = store.iter().map(|r| r.remote_user.as_str()).collect();
    assert_eq!(users, vec!["a", "c", "e"]);
}

#[test]
fn last_n_on_empty_store_is_single_placeholder() {
    let store = RecordStore::new(true);

    let rows = store.last_n(10);

    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_placeholder());
    assert_eq!(rows[0].remote_addr, "");
    assert_eq!(rows[0].request, "");
}

#[test]
fn last_n_returns_most_recent_in_insertion_order() {
    let mut store = RecordStore::new(true);
    for user in ["a", "b", "c", "d"] {
        store.ingest(record_at(user, "/x", test_epoch()));
    }

    let rows = store.last_n(2);
    let all = store.last_n(10);

    let users: Vec<_> = rows.iter().map(|r| r.remote_user.as_str()).collect();
    assert_eq!(users, vec!["c", "d"]);
    assert_eq!(all.len(), 4);
}

#[test]
fn last_zero_of_non_empty_store_is_empty() {
    let mut store = RecordStore::new(true);
    store.ingest(record_at("a", "/x", test_epoch()));

    assert!(store.last_n(0).is_empty());
}

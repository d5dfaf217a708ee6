use crate::alarm::AlertKind;
use crate::monitor::MonitorSnapshot;
use crate::record::RequestRow;
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// Static facts shown in the dashboard header.
pub struct DashboardHeader<'a> {
    pub log_file: &'a Path,
    pub uptime: Duration,
    pub refresh: Duration,
}

pub fn render_dashboard(snapshot: &MonitorSnapshot, header: &DashboardHeader<'_>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "logmon\n\
         ======\n\
         uptime: {}s | cached records: {} | parse errors: {} | tick failures: {}\n\
         Monitoring {} | refreshing every {}s | retaining records for {}s\n\n",
        header.uptime.as_secs(),
        snapshot.cached_records,
        snapshot.parse_errors,
        snapshot.tick_failures,
        header.log_file.display(),
        header.refresh.as_secs_f64(),
        snapshot.retention_seconds,
    ));

    render_ranking(&mut out, "Top Sections", "section", &snapshot.stats.top_sections);
    render_ranking(&mut out, "Top Users", "user", &snapshot.stats.top_users);

    let s = &snapshot.stats.status;
    out.push_str(&format!(
        "Hits: {} | bytes: {} | 2xx={} 3xx={} 4xx={} 5xx={} other={}\n\n",
        snapshot.stats.total_hits,
        snapshot.stats.body_bytes,
        s.ok,
        s.redirect,
        s.client_err,
        s.server_err,
        s.other
    ));

    render_alerts(&mut out, snapshot);
    render_requests(&mut out, &snapshot.last_requests);

    out
}

fn render_ranking(out: &mut String, title: &str, key: &str, rows: &[(String, u64)]) {
    out.push_str(&format!("{title}:\n"));

    if rows.is_empty() {
        out.push_str("  <no hits>\n\n");
        return;
    }

    out.push_str(&format!("  {:<30} {:>8}\n", key, "hits"));
    for (name, hits) in rows {
        out.push_str(&format!("  {name:<30} {hits:>8}\n"));
    }
    out.push('\n');
}

fn render_alerts(out: &mut String, snapshot: &MonitorSnapshot) {
    if snapshot.alerts.is_empty() {
        out.push_str(&format!(
            "Alerts: none (threshold {} records)\n\n",
            snapshot.alarm_threshold
        ));
        return;
    }

    out.push_str("Alerts:\n");
    for alert in &snapshot.alerts {
        let at = alert.timestamp.format("%Y-%m-%d %H:%M:%S");
        let line = match alert.kind {
            AlertKind::Breach => format!(
                "High traffic generated an alert - hits = {}, triggered at {at}",
                alert.hits
            )
            .red()
            .to_string(),
            AlertKind::Recovery => {
                format!("Traffic levels have returned to normal, triggered at {at}")
                    .green()
                    .to_string()
            }
        };
        out.push_str(&format!("  {line}\n"));
    }
    out.push('\n');
}

fn render_requests(out: &mut String, rows: &[RequestRow]) {
    out.push_str("Last Requests:\n");
    out.push_str(&format!(
        "  {:<16} {:<12} {:<26} {:<6} {}\n",
        "remote_addr", "remote_user", "time_local", "status", "request"
    ));
    for row in rows {
        out.push_str(&format!(
            "  {:<16} {:<12} {:<26} {:<6} {}\n",
            row.remote_addr, row.remote_user, row.time_local, row.status, row.request
        ));
    }
}

pub fn redraw(output: &str) {
    print!("\x1b[2J\x1b[H");
    println!("{output}");
    let _ = io::stdout().flush();
}

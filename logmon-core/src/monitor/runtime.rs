use crate::monitor::log_monitor::LogMonitor;
use crate::tail::{FileTail, LineSource, TailError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

const SOURCE_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Running monitor tasks.
///
/// Dropping the handle also stops both tasks (the shutdown sender goes away), but only
/// [`MonitorHandle::stop`] waits for them to finish.
#[derive(Debug)]
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    tick_task: JoinHandle<()>,
    ingest_task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Stop ticking and release the line source. No state changes after this returns.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);

        if let Err(e) = self.ingest_task.await {
            tracing::warn!(error = %e, "ingest task ended abnormally");
        }
        if let Err(e) = self.tick_task.await {
            tracing::warn!(error = %e, "tick task ended abnormally");
        }

        tracing::info!("log monitor stopped");
    }

    /// True once the line source has been exhausted or the monitor was stopped.
    pub fn ingest_finished(&self) -> bool {
        self.ingest_task.is_finished()
    }
}

impl LogMonitor {
    /// Start consuming `source` and ticking in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S>(self: &Arc<Self>, source: S) -> MonitorHandle
    where
        S: LineSource + 'static,
    {
        let (shutdown, rx) = watch::channel(false);

        let tick_task = tokio::spawn(tick_loop(Arc::clone(self), rx.clone()));
        let ingest_task = tokio::spawn(ingest_loop(Arc::clone(self), source, rx));

        tracing::info!(
            path = %self.config.log_file_path.display(),
            retention_seconds = self.config.retention_seconds,
            alarm_threshold = self.config.alarm_threshold,
            tick_interval_ms = self.config.tick_interval_ms,
            "log monitor started"
        );

        MonitorHandle {
            shutdown,
            tick_task,
            ingest_task,
        }
    }

    /// Open the configured log file and start following it.
    pub async fn follow_file(self: &Arc<Self>) -> Result<MonitorHandle, TailError> {
        let tail = FileTail::open(&self.config.log_file_path, self.config.read_from_start).await?;
        Ok(self.start(tail))
    }
}

async fn tick_loop(monitor: Arc<LogMonitor>, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = interval(monitor.config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                monitor.run_tick();
            }
        }
    }
}

async fn ingest_loop<S: LineSource>(
    monitor: Arc<LogMonitor>,
    mut source: S,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            line = source.next_line() => match line {
                Ok(Some(line)) => monitor.handle_line(&line),
                Ok(None) => {
                    tracing::info!("line source exhausted");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "line source failed, retrying");
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        _ = tokio::time::sleep(SOURCE_RETRY_BACKOFF) => {}
                    }
                }
            }
        }
    }
}

//! Broadcast scheduler background task.
//!
//! Runs beside the read loop. Every scheduled message gets its own
//! repeating timer; all timers live in one [`TimerSet`] that is torn down
//! and rebuilt whenever the messages file is reloaded, so a reload never
//! leaves old timers running.

use super::messages::{Broadcast, load_messages};
use crate::config::Config;
use crate::network::Outbound;
use crate::protocol::privmsg;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodically sends scheduled messages to the channel.
pub struct BroadcastScheduler {
    path: PathBuf,
    channel: String,
    unit: Duration,
    reload_every: Duration,
    outbound: Outbound,
    messages: Vec<Broadcast>,
}

impl BroadcastScheduler {
    pub fn new(
        path: impl Into<PathBuf>,
        channel: impl Into<String>,
        unit: Duration,
        reload_every: Duration,
        outbound: Outbound,
    ) -> Self {
        Self {
            path: path.into(),
            channel: channel.into(),
            unit,
            reload_every,
            outbound,
            messages: Vec::new(),
        }
    }

    pub fn from_config(config: &Config, outbound: Outbound) -> Self {
        Self::new(
            config.files.broadcasts.clone(),
            config.channel.name.clone(),
            config.broadcast.interval_unit(),
            config.broadcast.reload_interval(),
            outbound,
        )
    }

    pub fn messages(&self) -> &[Broadcast] {
        &self.messages
    }

    /// Re-read the messages file. On failure the current set is kept.
    pub fn reload(&mut self) -> usize {
        match load_messages(&self.path) {
            Ok(messages) => self.messages = messages,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to load broadcasts, keeping previous set");
            }
        }
        self.messages.len()
    }

    /// Run until `shutdown` is cancelled.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let mut timers = TimerSet::new(self.outbound.clone(), shutdown.clone());

        loop {
            self.reload();
            timers.rebuild(&self.channel, &self.messages, self.unit).await;
            info!(timers = timers.len(), "Broadcast timers started");

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.reload_every) => {
                    info!("Reloading scheduled broadcasts");
                }
            }
        }

        timers.shutdown().await;
        debug!("Broadcast scheduler stopped");
    }
}

/// The live set of repeating broadcast timers.
pub struct TimerSet {
    tasks: JoinSet<()>,
    outbound: Outbound,
    shutdown: CancellationToken,
}

impl TimerSet {
    pub fn new(outbound: Outbound, shutdown: CancellationToken) -> Self {
        Self {
            tasks: JoinSet::new(),
            outbound,
            shutdown,
        }
    }

    /// Stop every running timer, then start one per message.
    pub async fn rebuild(&mut self, channel: &str, messages: &[Broadcast], unit: Duration) {
        self.tasks.shutdown().await;

        for message in messages {
            let period = message.interval(unit);
            if period.is_zero() {
                warn!(text = %message.text, "skipping broadcast with zero interval");
                continue;
            }
            self.tasks.spawn(repeat(
                message.text.clone(),
                privmsg(channel, &message.text),
                period,
                self.outbound.clone(),
                self.shutdown.clone(),
            ));
        }
    }

    /// Number of timers currently running.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Stop every timer and wait for them to finish.
    pub async fn shutdown(&mut self) {
        self.tasks.shutdown().await;
    }
}

/// Send `line` every `period`, first after one full period.
async fn repeat(
    text: String,
    line: String,
    period: Duration,
    outbound: Outbound,
    shutdown: CancellationToken,
) {
    let Some(start) = Instant::now().checked_add(period) else {
        warn!(text = %text, period = ?period, "broadcast interval out of range, not scheduling");
        return;
    };
    let mut ticker = interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                if outbound.send(line.clone()).await.is_err() {
                    debug!("outbound closed, stopping broadcast timer");
                    break;
                }
                info!(text = %text, "Broadcast sent");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    const UNIT: Duration = Duration::from_millis(1);
    const WAIT: Duration = Duration::from_secs(3);

    async fn next_line(rx: &mut mpsc::Receiver<String>) -> String {
        timeout(WAIT, rx.recv())
            .await
            .expect("timed out waiting for broadcast")
            .expect("outbound closed")
    }

    fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn timers_repeat() {
        let (outbound, mut rx) = Outbound::channel(16);
        let mut timers = TimerSet::new(outbound, CancellationToken::new());
        timers
            .rebuild("#lobby", &[Broadcast::new("hello", 1)], UNIT)
            .await;
        assert_eq!(timers.len(), 1);

        assert_eq!(next_line(&mut rx).await, "PRIVMSG #lobby :hello");
        assert_eq!(next_line(&mut rx).await, "PRIVMSG #lobby :hello");
        timers.shutdown().await;
    }

    #[tokio::test]
    async fn rebuild_replaces_previous_timers() {
        let (outbound, mut rx) = Outbound::channel(64);
        let mut timers = TimerSet::new(outbound, CancellationToken::new());
        timers
            .rebuild("#lobby", &[Broadcast::new("old", 1), Broadcast::new("older", 1)], UNIT)
            .await;
        assert_eq!(timers.len(), 2);
        next_line(&mut rx).await;

        timers
            .rebuild("#lobby", &[Broadcast::new("new", 1)], UNIT)
            .await;
        assert_eq!(timers.len(), 1);
        drain(&mut rx);

        tokio::time::sleep(Duration::from_millis(300)).await;
        let lines = drain(&mut rx);
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|line| line == "PRIVMSG #lobby :new"), "{:?}", lines);
        timers.shutdown().await;
        assert!(timers.is_empty());
    }

    #[tokio::test]
    async fn cancelled_timers_stop_sending() {
        let (outbound, mut rx) = Outbound::channel(16);
        let shutdown = CancellationToken::new();
        let mut timers = TimerSet::new(outbound, shutdown.clone());
        timers
            .rebuild("#lobby", &[Broadcast::new("tick", 1)], UNIT)
            .await;
        drop(timers);

        // Dropping the set aborts its tasks, which releases every sender.
        assert_eq!(timeout(WAIT, rx.recv()).await.unwrap(), None);
        assert!(!shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn unrepresentable_interval_is_not_scheduled() {
        let (outbound, mut rx) = Outbound::channel(4);
        timeout(
            WAIT,
            repeat(
                "far".into(),
                "PRIVMSG #lobby :far".into(),
                Duration::MAX,
                outbound,
                CancellationToken::new(),
            ),
        )
        .await
        .expect("timer should give up immediately");
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn scheduler_reloads_file_without_leaking_timers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("messages.txt");
        std::fs::write(&path, "first 1\n").unwrap();

        let (outbound, mut rx) = Outbound::channel(64);
        let scheduler = BroadcastScheduler::new(
            &path,
            "#lobby",
            UNIT,
            Duration::from_millis(200),
            outbound,
        );
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(scheduler.run(shutdown.clone()));

        assert_eq!(next_line(&mut rx).await, "PRIVMSG #lobby :first");
        std::fs::write(&path, "second 1\n").unwrap();

        loop {
            if next_line(&mut rx).await == "PRIVMSG #lobby :second" {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(150)).await;
        let later = drain(&mut rx);
        assert!(
            later.iter().all(|line| line == "PRIVMSG #lobby :second"),
            "{:?}",
            later
        );

        shutdown.cancel();
        timeout(WAIT, task).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_messages() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("messages.txt");
        std::fs::write(&path, "keep me 2\n").unwrap();

        let (outbound, _rx) = Outbound::channel(4);
        let mut scheduler =
            BroadcastScheduler::new(&path, "#lobby", UNIT, Duration::from_secs(60), outbound);
        assert_eq!(scheduler.reload(), 1);

        // A directory where the file was makes the read fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        assert_eq!(scheduler.reload(), 1);
        assert_eq!(scheduler.messages()[0].text, "keep me");
    }
}

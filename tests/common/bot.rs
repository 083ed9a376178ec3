//! Runs the bot in-process against a [`FakeServer`](super::FakeServer).

use medalbot::config::Config;
use medalbot::error::BotError;
use medalbot::network::{self, Session};
use medalbot::state::{AdminList, MedalStore};
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const NICK: &str = "MedalBot";
pub const CHANNEL: &str = "#arena";

/// Knobs for one test bot.
#[derive(Default)]
pub struct BotOptions {
    pub admins: Vec<String>,
    /// Initial contents of the medal file.
    pub medals: Option<String>,
    pub auth: bool,
}

pub struct TestBot {
    dir: TempDir,
    shutdown: CancellationToken,
    handle: JoinHandle<Result<(), BotError>>,
}

impl TestBot {
    /// Start a bot that connects to `127.0.0.1:<port>`.
    pub fn spawn(port: u16, options: BotOptions) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let admins_path = dir.path().join("admins.txt");
        let medals_path = dir.path().join("voiced.txt");
        std::fs::write(&admins_path, options.admins.join("\n"))?;
        if let Some(medals) = &options.medals {
            std::fs::write(&medals_path, medals)?;
        }

        let config = config_for(port, &dir, options.auth)?;
        let admins = AdminList::load(&config.files.admins)?;
        let medals = MedalStore::open(&config.files.medals)?;
        let session = Session::from_config(&config, medals, admins);

        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let handle = tokio::spawn(async move { network::run(&config, session, token).await });

        Ok(Self {
            dir,
            shutdown,
            handle,
        })
    }

    pub fn medals_path(&self) -> PathBuf {
        self.dir.path().join("voiced.txt")
    }

    /// Request a shutdown and wait for the bot to finish.
    pub async fn stop(self) -> anyhow::Result<Result<(), BotError>> {
        self.shutdown.cancel();
        self.join().await
    }

    /// Wait for the bot to finish on its own.
    pub async fn join(self) -> anyhow::Result<Result<(), BotError>> {
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), self.handle).await??;
        Ok(result)
    }
}

fn config_for(port: u16, dir: &TempDir, auth: bool) -> anyhow::Result<Config> {
    let root = dir.path().display();
    let mut text = format!(
        r##"
[server]
host = "127.0.0.1"
port = {port}
nick = "{NICK}"

[channel]
name = "{CHANNEL}"
join_delay_ms = 0

[files]
admins = '{root}/admins.txt'
medals = '{root}/voiced.txt'
broadcasts = '{root}/messages.txt'

[broadcast]
enabled = false
"##
    );
    if auth {
        text.push_str(
            r#"
[auth]
account = "medalbot"
password = "sekrit"
delay_ms = 0
"#,
        );
    }
    Ok(toml::from_str(&text)?)
}

//! Fake IRC server.
//!
//! Accepts the bot's connection and lets a test play the server side of
//! the conversation line by line.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::time::timeout;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A listener on an ephemeral loopback port.
pub struct FakeServer {
    listener: TcpListener,
}

impl FakeServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Wait for the bot to connect.
    pub async fn accept(&self) -> anyhow::Result<ServerConn> {
        let (stream, _) = timeout(RECV_TIMEOUT, self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(ServerConn {
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }
}

/// The server side of one bot connection.
pub struct ServerConn {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl ServerConn {
    /// Send a raw line to the bot.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line from the bot, without the trailing CRLF.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        self.recv_line_timeout(RECV_TIMEOUT).await
    }

    pub async fn recv_line_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("bot closed the connection");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until one satisfies `predicate`; returns all of them.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv_line().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Collect whatever arrives within `dur`.
    #[allow(dead_code)]
    pub async fn drain(&mut self, dur: Duration) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = self.recv_line_timeout(dur).await {
            lines.push(line);
        }
        lines
    }

    /// Play the registration: read NICK/USER, then welcome the bot.
    pub async fn register(&mut self, nick: &str) -> anyhow::Result<()> {
        let lines = self.recv_until(|line| line.starts_with("USER ")).await?;
        anyhow::ensure!(
            lines.iter().any(|line| line == &format!("NICK {}", nick)),
            "no NICK in {:?}",
            lines
        );
        self.send_line(&format!(":irc.test 001 {} :Welcome to the test network", nick))
            .await
    }

    /// Drop the connection from the server side.
    pub async fn close(mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}

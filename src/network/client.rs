//! Connection lifecycle: connect, register, read loop, shutdown.

use super::codec::LineCodec;
use super::handshake::{Action, Handshake};
use super::outbound::{Outbound, write_lines};
use super::session::Session;
use crate::broadcast::BroadcastScheduler;
use crate::config::Config;
use crate::error::BotError;
use crate::protocol;
use futures_util::StreamExt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, trace, warn};

/// How long queued lines (e.g. QUIT) get to reach the socket on the way out.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);
const QUIT_MESSAGE: &str = "Shutting down";

/// Run one bot connection until `shutdown` fires or the server goes away.
///
/// Returns `Ok(())` after a requested shutdown and an error if the
/// connection was lost or could not be made.
pub async fn run(
    config: &Config,
    mut session: Session,
    shutdown: CancellationToken,
) -> Result<(), BotError> {
    let addr = config.server.address();
    info!(addr = %addr, "Connecting");
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| BotError::Connect {
            addr: addr.clone(),
            source,
        })?;
    info!(addr = %addr, "Connected");

    let (read_half, write_half) = stream.into_split();
    let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(config.server.line_max_len));
    let writer = FramedWrite::new(write_half, LineCodec::new());

    let (outbound, rx) = Outbound::channel(config.broadcast.outbound_capacity);
    let mut writer_task = tokio::spawn(write_lines(rx, writer));

    // Cancelled when this connection ends, whatever the reason.
    let local = shutdown.child_token();

    let mut handshake = Handshake::from_config(config);
    let scheduler_task = config.broadcast.enabled.then(|| {
        let scheduler = BroadcastScheduler::from_config(config, outbound.clone());
        tokio::spawn(scheduler.run(local.clone()))
    });

    let result = async {
        for line in handshake.greeting() {
            outbound.send(line).await?;
        }
        read_loop(&mut reader, &mut handshake, &mut session, &outbound, &local).await
    }
    .await;

    // Stop the broadcast timers and any pending delayed sends.
    local.cancel();
    if let Some(task) = scheduler_task
        && let Err(e) = task.await
    {
        warn!(error = %e, "broadcast scheduler task failed");
    }

    drop(outbound);
    match tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut writer_task).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => error!(error = %e, "outbound writer failed"),
        Ok(Err(e)) => error!(error = %e, "outbound writer task panicked"),
        Err(_) => {
            warn!("outbound writer did not drain in time");
            writer_task.abort();
        }
    }

    result
}

async fn read_loop(
    reader: &mut FramedRead<OwnedReadHalf, LineCodec>,
    handshake: &mut Handshake,
    session: &mut Session,
    outbound: &Outbound,
    shutdown: &CancellationToken,
) -> Result<(), BotError> {
    loop {
        let next = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested");
                outbound.send(protocol::quit(QUIT_MESSAGE)).await?;
                return Ok(());
            }
            next = reader.next() => next,
        };

        let line = match next {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(e.into()),
            None => return Err(BotError::Disconnected),
        };
        trace!(line = %line, "<<");

        for action in handshake.on_line(&line) {
            match action {
                Action::Send(out) => outbound.send(out).await?,
                Action::SendAfter(delay, out) => {
                    outbound.send_after(delay, out, shutdown.child_token())
                }
            }
        }

        for out in session.handle_line(&line) {
            outbound.send(out).await?;
        }
    }
}

// src/bot.rs
//
// Owns the gateway session: logs in, waits for READY, then arms the
// repeating status-check cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};
use twilight_gateway::{
    Event, EventTypeFlags, Intents, Shard, ShardId, StreamExt as _,
};

use crate::Error;
use crate::config::BotConfig;
use crate::minecraft::PingProbe;
use crate::presence::GatewayPresenceSink;
use crate::tasks::{PollHandle, spawn_status_poll_task};

const POLL_PERIOD: Duration = Duration::from_secs(60);

pub struct BotController {
    config: BotConfig,
    shard_task: Option<JoinHandle<()>>,
    poll: Option<PollHandle>,
}

impl BotController {
    pub fn new(config: BotConfig) -> Self {
        Self {
            config,
            shard_task: None,
            poll: None,
        }
    }

    /// Logs in, waits for the gateway READY signal, then starts the
    /// status-check cycle (first run immediately, then every 60 seconds).
    /// Returns only if the gateway event stream ends, which is fatal.
    pub async fn start(mut self) -> Result<(), Error> {
        let shard = Shard::new(ShardId::ONE, self.config.token.clone(), Intents::GUILDS);
        let sender = shard.sender();

        let (ready_tx, ready_rx) = oneshot::channel();
        self.shard_task = Some(tokio::spawn(shard_runner(shard, ready_tx)));

        let tag = ready_rx
            .await
            .map_err(|_| Error::Platform("gateway closed before READY".into()))?;
        info!("This bot is ready to go! Logged in as {tag}");

        let probe = Arc::new(PingProbe::new(self.config.host.clone(), self.config.port));
        let sink = Arc::new(GatewayPresenceSink::new(sender));
        self.poll = Some(spawn_status_poll_task(probe, sink, POLL_PERIOD));

        if let Some(task) = self.shard_task.take() {
            let _ = task.await;
        }
        if let Some(poll) = self.poll.take() {
            poll.stop();
        }
        Err(Error::Platform("gateway event stream ended".into()))
    }
}

/// Drives the shard until its event stream ends. Resolves `ready_tx`
/// exactly once, on the first READY. Receive errors are logged and the
/// loop continues; the gateway reconnects on its own.
async fn shard_runner(mut shard: Shard, ready_tx: oneshot::Sender<String>) {
    let mut ready_tx = Some(ready_tx);

    while let Some(item) = shard.next_event(EventTypeFlags::READY).await {
        match item {
            Ok(Event::Ready(ready)) => {
                info!(
                    "Shard READY as {}#{} (ID={})",
                    ready.user.name, ready.user.discriminator, ready.user.id
                );
                if let Some(tx) = ready_tx.take() {
                    let _ = tx.send(format!("{}#{}", ready.user.name, ready.user.discriminator));
                }
            }
            Ok(event) => {
                trace!("Unhandled event: {event:?}");
            }
            Err(err) => {
                error!("Error receiving gateway event: {err:?}");
            }
        }
    }

    warn!("Gateway event loop ended.");
}

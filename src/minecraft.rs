// src/minecraft.rs
//
// One-shot Java Server List Ping against the monitored server.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a single status query. Every failure mode (timeout, refusal,
/// protocol mismatch) collapses to `Offline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Online { online: u32, max: u32 },
    Offline,
}

#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn probe(&self) -> ServerStatus;
}

/// Pings a fixed host/port once per call. No retries.
pub struct PingProbe {
    host: String,
    port: u16,
}

impl PingProbe {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

#[async_trait]
impl StatusProbe for PingProbe {
    /// Never fails: any ping error is logged and mapped to `Offline`. The
    /// ping transport is blocking, so it runs on the blocking pool.
    async fn probe(&self) -> ServerStatus {
        let address = format!("{}:{}", self.host, self.port);
        let result = tokio::task::spawn_blocking(move || {
            mcping::get_status(&address, Some(PING_TIMEOUT))
        })
        .await;

        match result {
            Ok(Ok((_latency, response))) => {
                let online = u32::try_from(response.players.online).unwrap_or(0);
                let max = u32::try_from(response.players.max).unwrap_or(0);
                info!("Server is online: {online}/{max} players");
                ServerStatus::Online { online, max }
            }
            Ok(Err(e)) => {
                error!("Server ping failed: {e}");
                ServerStatus::Offline
            }
            Err(e) => {
                error!("Server ping task failed: {e}");
                ServerStatus::Offline
            }
        }
    }
}

// src/presence.rs
//
// Maps probe results onto the bot's gateway presence.

use twilight_gateway::MessageSender;
use twilight_model::gateway::payload::outgoing::update_presence::UpdatePresence;
use twilight_model::gateway::presence::{ActivityType, MinimalActivity, Status};

use crate::Error;
use crate::minecraft::ServerStatus;

const OFFLINE_STREAM_URL: &str = "https://dimension-studio.net";

/// Builds the presence payload for a probe result. Total over both
/// variants: online servers show a watching activity with the player
/// count, offline servers an idle streaming activity.
pub fn presence_payload(status: &ServerStatus) -> UpdatePresence {
    let (activity, presence_status) = match status {
        ServerStatus::Online { online, max } => (
            MinimalActivity {
                kind: ActivityType::Watching,
                name: format!("{online}/{max} players online"),
                url: None,
            },
            Status::Online,
        ),
        ServerStatus::Offline => (
            MinimalActivity {
                kind: ActivityType::Streaming,
                name: "Server is Offline".to_string(),
                // Streaming activities require a url.
                url: Some(OFFLINE_STREAM_URL.to_string()),
            },
            Status::Idle,
        ),
    };

    // Exactly one activity is always supplied, so validation cannot fail.
    UpdatePresence::new(vec![activity.into()], false, None, presence_status)
        .expect("presence payload with one activity is valid")
}

pub trait PresenceSink: Send + Sync {
    fn publish(&self, status: &ServerStatus) -> Result<(), Error>;
}

/// Sends presence updates over the shard's command channel.
pub struct GatewayPresenceSink {
    sender: MessageSender,
}

impl GatewayPresenceSink {
    pub fn new(sender: MessageSender) -> Self {
        Self { sender }
    }
}

impl PresenceSink for GatewayPresenceSink {
    fn publish(&self, status: &ServerStatus) -> Result<(), Error> {
        let payload = presence_payload(status);
        self.sender
            .command(&payload)
            .map_err(|e| Error::Platform(format!("presence update failed: {e}")))
    }
}

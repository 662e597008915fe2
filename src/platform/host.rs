//! Messaging with the embedding host page
//!
//! Inbound: the host wraps its messages in a `devvit-message` envelope; the
//! only one we act on is `startGame`, which carries the stored win/loss
//! counters. Outbound: `saveStats` after every win or loss. Both directions
//! are fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::stats::SessionStats;

/// Envelope type the host uses for its messages
const HOST_ENVELOPE: &str = "devvit-message";

/// Message from the host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostMessage {
    #[serde(rename = "startGame")]
    StartGame(SessionStats),
}

/// Message to the host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OutboundMessage {
    #[serde(rename = "saveStats")]
    SaveStats(SessionStats),
}

impl OutboundMessage {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    data: Option<EnvelopeData>,
}

#[derive(Deserialize)]
struct EnvelopeData {
    message: Option<serde_json::Value>,
}

/// Decode a raw `message` event payload.
///
/// Returns `None` for anything that is not a well-formed `startGame`.
pub fn parse_host_message(json: &str) -> Option<HostMessage> {
    let envelope: Envelope = match serde_json::from_str(json) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::debug!("Ignoring non-envelope message: {}", e);
            return None;
        }
    };
    if envelope.kind != HOST_ENVELOPE {
        log::debug!("Ignoring message of type {}", envelope.kind);
        return None;
    }
    let inner = envelope.data?.message?;
    match serde_json::from_value(inner) {
        Ok(message) => {
            log::info!("Message received from host: {:?}", message);
            Some(message)
        }
        Err(e) => {
            log::debug!("Ignoring host message: {}", e);
            None
        }
    }
}

/// Outbound transport to the host
pub trait HostChannel {
    fn post(&mut self, message: &OutboundMessage);
}

/// Transport that records what was sent (tests and native runs)
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub sent: Vec<OutboundMessage>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&OutboundMessage> {
        self.sent.last()
    }
}

impl HostChannel for RecordingHost {
    fn post(&mut self, message: &OutboundMessage) {
        self.sent.push(message.clone());
    }
}

/// Posts to `window.parent` (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ParentWindowHost;

#[cfg(target_arch = "wasm32")]
impl HostChannel for ParentWindowHost {
    fn post(&mut self, message: &OutboundMessage) {
        let Ok(json) = message.to_json() else {
            return;
        };
        let Ok(value) = js_sys::JSON::parse(&json) else {
            return;
        };
        let parent = web_sys::window().and_then(|w| w.parent().ok().flatten());
        if let Some(parent) = parent {
            if parent.post_message(&value, "*").is_err() {
                log::warn!("postMessage to host failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_game_parsed() {
        let raw = r#"{"type":"devvit-message","data":{"message":{"type":"startGame","data":{"wins":5,"losses":2}}}}"#;
        assert_eq!(
            parse_host_message(raw),
            Some(HostMessage::StartGame(SessionStats::new(5, 2)))
        );
    }

    #[test]
    fn test_unexpected_shapes_ignored() {
        for raw in [
            "",
            "42",
            r#"{"type":"other","data":{"message":{"type":"startGame","data":{"wins":1,"losses":1}}}}"#,
            r#"{"type":"devvit-message"}"#,
            r#"{"type":"devvit-message","data":{}}"#,
            r#"{"type":"devvit-message","data":{"message":{"type":"somethingElse"}}}"#,
            r#"{"type":"devvit-message","data":{"message":{"type":"startGame","data":{"wins":"x"}}}}"#,
            r#"{"type":"devvit-message","data":{"message":{"type":"startGame"}}}"#,
        ] {
            assert_eq!(parse_host_message(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_save_stats_wire_shape() {
        let json = OutboundMessage::SaveStats(SessionStats::new(3, 4))
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"type":"saveStats","data":{"wins":3,"losses":4}}"#);
    }

    #[test]
    fn test_recording_host() {
        let mut host = RecordingHost::new();
        host.post(&OutboundMessage::SaveStats(SessionStats::new(1, 0)));
        assert_eq!(host.sent.len(), 1);
        assert_eq!(
            host.last(),
            Some(&OutboundMessage::SaveStats(SessionStats::new(1, 0)))
        );
    }
}

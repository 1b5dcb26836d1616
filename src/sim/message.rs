//! Location uplink messages
//!
//! Tags publish JSON fixes on `<namespace>/node/<id>/uplink/location`:
//!
//! ```json
//! { "position": { "x": 6.9, "y": 1.2, "z": 0.9, "quality": 87 }, "superFrameNumber": 412 }
//! ```

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::PaddleSide;
use crate::config::Config;

/// Tag position fix (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Fix quality reported by the tag, 0-100
    #[serde(default)]
    pub quality: f32,
}

/// Payload of a location uplink message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMessage {
    pub position: TagPosition,
    #[serde(default)]
    pub super_frame_number: u64,
}

impl LocationMessage {
    pub fn parse(payload: &[u8]) -> Result<Self, MessageError> {
        serde_json::from_slice(payload).map_err(MessageError::Payload)
    }

    /// Position as a sample for the aggregator
    pub fn sample(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.y, self.position.z)
    }
}

/// Why an inbound message was dropped
#[derive(Debug)]
pub enum MessageError {
    /// Topic does not belong to either paddle
    UnknownTopic(String),
    /// Payload is not a location message
    Payload(serde_json::Error),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::UnknownTopic(topic) => write!(f, "no paddle on topic {}", topic),
            MessageError::Payload(e) => write!(f, "malformed location payload: {}", e),
        }
    }
}

impl std::error::Error for MessageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MessageError::Payload(e) => Some(e),
            MessageError::UnknownTopic(_) => None,
        }
    }
}

/// Maps subscription topics to paddles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRouter {
    topics: [String; 2],
}

impl TopicRouter {
    pub fn new(config: &Config) -> Self {
        Self {
            topics: config.subscriptions(),
        }
    }

    /// Topics to subscribe to, left paddle first
    pub fn topics(&self) -> &[String; 2] {
        &self.topics
    }

    pub fn route(&self, topic: &str) -> Result<PaddleSide, MessageError> {
        PaddleSide::ALL
            .into_iter()
            .find(|side| self.topics[side.index()] == topic)
            .ok_or_else(|| MessageError::UnknownTopic(topic.to_string()))
    }

    /// Route and parse in one go
    pub fn decode(&self, topic: &str, payload: &[u8]) -> Result<(PaddleSide, Vec3), MessageError> {
        let side = self.route(topic)?;
        let message = LocationMessage::parse(payload)?;
        Ok((side, message.sample()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let msg = LocationMessage::parse(
            br#"{"position":{"x":6.5,"y":1.25,"z":0.5,"quality":87},"superFrameNumber":412}"#,
        )
        .unwrap();
        assert_eq!(msg.sample(), Vec3::new(6.5, 1.25, 0.5));
        assert_eq!(msg.position.quality, 87.0);
        assert_eq!(msg.super_frame_number, 412);
    }

    #[test]
    fn test_parse_without_optional_fields() {
        let msg = LocationMessage::parse(br#"{"position":{"x":1,"y":2,"z":3}}"#).unwrap();
        assert_eq!(msg.sample(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(msg.super_frame_number, 0);
    }

    #[test]
    fn test_parse_rejects_bad_payloads() {
        let payloads: [&[u8]; 5] = [
            b"not json",
            br#"{"position":{"x":1,"y":2}}"#,
            br#"{"configuration":{"label":"anchor"}}"#,
            br#"{"position":{"x":"far","y":2,"z":3}}"#,
            &[0xff, 0xfe, 0x00],
        ];
        for payload in payloads {
            assert!(matches!(
                LocationMessage::parse(payload),
                Err(MessageError::Payload(_))
            ));
        }
    }

    #[test]
    fn test_route_topics() {
        let router = TopicRouter::new(&Config::default());
        assert_eq!(
            router.route("dwm/node/4a96/uplink/location").unwrap(),
            PaddleSide::Left
        );
        assert_eq!(
            router.route("dwm/node/9a93/uplink/location").unwrap(),
            PaddleSide::Right
        );
        assert!(matches!(
            router.route("dwm/node/ffff/uplink/location"),
            Err(MessageError::UnknownTopic(_))
        ));
        // Other uplinks of a paddle node are not location fixes
        assert!(router.route("dwm/node/4a96/uplink/config").is_err());
    }

    #[test]
    fn test_decode() {
        let router = TopicRouter::new(&Config::default());
        let (side, sample) = router
            .decode(
                "dwm/node/9a93/uplink/location",
                br#"{"position":{"x":7.0,"y":0.0,"z":0.0,"quality":50},"superFrameNumber":1}"#,
            )
            .unwrap();
        assert_eq!(side, PaddleSide::Right);
        assert_eq!(sample.x, 7.0);
    }
}

//! Platform layer
//!
//! Drives a `Game` from the outside world:
//! - `web`: browser session (canvas, interval timer, MQTT over WebSocket, resize)
//! - `replay`: headless playback of a recorded message capture

pub mod replay;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::game::Game;
use crate::sim::MessageError;

/// Hand an inbound message to the game, logging anything that gets dropped.
/// Returns whether a paddle moved.
pub fn deliver(game: &mut Game, topic: &str, payload: &[u8]) -> bool {
    match game.handle_message(topic, payload) {
        Ok(_) => true,
        Err(MessageError::UnknownTopic(topic)) => {
            log::info!("ignoring message on topic {}", topic);
            false
        }
        Err(e) => {
            log::warn!("dropping message on {}: {}", topic, e);
            false
        }
    }
}

//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - Seeded RNG only (launches are reproducible from the seed)
//! - Elapsed time is passed in, never read from a clock
//! - Paddle positions are read once per tick through `PaddleReadout`

pub mod aggregator;
pub mod collision;
pub mod message;
pub mod state;
pub mod tick;

pub use aggregator::{PositionAggregator, SmoothingWindow};
pub use collision::{Bounce, PaddleBox};
pub use message::{LocationMessage, MessageError, TagPosition, TopicRouter};
pub use state::{Ball, Court, GameEvent, GameState, PaddleSide, Score, map_position};
pub use tick::{PaddleReadout, TickReport, tick};

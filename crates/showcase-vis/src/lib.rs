//! Showcase playback server
//!
//! Plays the step-by-step demos over time and serves the portfolio site
//! services alongside them.
//!
//! # Architecture
//!
//! - **Playback**: Cursor state machine over a demo's steps, driven by a timer
//! - **Scheduler**: Virtual clock for tests, tokio timers in production
//! - **Player**: One task per demo, publishing frames on a broadcast channel
//! - **WebSocket**: Streams frames and accepts play/pause/reset
//! - **REST API**: Demo control, content, storage, challenge and snippet
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! VisServer::new(&config)?.serve().await?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod frames;
pub mod playback;
pub mod player;
pub mod scheduler;
pub mod server;

pub use catalog::Catalog;
pub use config::VisConfig;
pub use error::{Error, Result};
pub use frames::{Frame, WsCommand, WsEvent};
pub use playback::{Control, Playback, PlaybackState, PlaybackStatus, Tick};
pub use player::{spawn_player, DemoInfo, PlayerHandle};
pub use scheduler::{ManualScheduler, Scheduler, TimerToken, TokioScheduler};
pub use server::{AppState, VisServer};

//! Frames streamed to the front end.
//!
//! A frame is everything needed to render one demo at one cursor: the
//! playback status, the raw step and the projected view, already in JSON so
//! demos of different shapes share one channel type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use showcase_steps::Demo;

use crate::error::Result;
use crate::playback::{Control, PlaybackStatus};

/// One rendered cursor position of a demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub demo: &'static str,
    pub status: PlaybackStatus,
    /// Step under the cursor, absent for an empty sequence
    pub step: Option<Value>,
    pub view: Value,
}

impl Frame {
    /// Project `demo` at the status cursor.
    pub fn capture<D: Demo>(demo: &D, status: PlaybackStatus) -> Result<Self> {
        let step = demo
            .steps()
            .get(status.cursor)
            .map(serde_json::to_value)
            .transpose()?;
        let view = serde_json::to_value(demo.project(status.cursor))?;
        Ok(Self {
            demo: demo.name(),
            status,
            step,
            view,
        })
    }
}

/// Messages a WebSocket client may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsCommand {
    GetFrame,
    Play,
    Pause,
    Reset,
}

impl WsCommand {
    pub fn control(&self) -> Option<Control> {
        match self {
            WsCommand::GetFrame => None,
            WsCommand::Play => Some(Control::Play),
            WsCommand::Pause => Some(Control::Pause),
            WsCommand::Reset => Some(Control::Reset),
        }
    }
}

/// Messages sent to a WebSocket client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsEvent {
    Frame(Frame),
    Status(PlaybackStatus),
    /// Frames were dropped because the client fell behind
    Lagged { skipped: u64 },
    Error { message: String },
}

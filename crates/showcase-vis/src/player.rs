//! Async driver that plays one demo.
//!
//! Each player is a tokio task owning a [`Playback`] over a
//! [`TokioScheduler`]. Commands come in over an `mpsc` channel and every
//! cursor or state change goes out as a [`Frame`] on a `broadcast` channel.
//! When the last [`PlayerHandle`] is dropped the task ends and its pending
//! timer is aborted.

use serde::Serialize;
use showcase_steps::Demo;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::frames::Frame;
use crate::playback::{Control, Playback, PlaybackStatus, Tick};
use crate::scheduler::TokioScheduler;

/// Frames buffered per subscriber before it starts lagging.
pub const FRAME_BUFFER: usize = 64;

const COMMAND_BUFFER: usize = 32;

/// Static facts about a playing demo.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DemoInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub total_steps: usize,
    pub looping: bool,
}

enum Command {
    Control(Control, oneshot::Sender<PlaybackStatus>),
    Frame(oneshot::Sender<Frame>),
}

/// Cheap, cloneable access to a running player.
#[derive(Clone)]
pub struct PlayerHandle {
    info: Arc<DemoInfo>,
    commands: mpsc::Sender<Command>,
    frames: broadcast::Sender<Frame>,
}

impl PlayerHandle {
    pub fn info(&self) -> &DemoInfo {
        &self.info
    }

    pub fn name(&self) -> &'static str {
        self.info.name
    }

    /// Receive every frame published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Frame> {
        self.frames.subscribe()
    }

    pub async fn control(&self, control: Control) -> Result<PlaybackStatus> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Control(control, tx)).await?;
        rx.await.map_err(|_| Error::PlayerGone(self.name()))
    }

    /// Frame at the current cursor.
    pub async fn frame(&self) -> Result<Frame> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Frame(tx)).await?;
        rx.await.map_err(|_| Error::PlayerGone(self.name()))
    }

    pub async fn status(&self) -> Result<PlaybackStatus> {
        Ok(self.frame().await?.status)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| Error::PlayerGone(self.name()))
    }
}

/// Spawn a player task for `demo`, optionally starting playback at once.
pub fn spawn_player<D>(demo: D, title: &'static str, autoplay: bool) -> PlayerHandle
where
    D: Demo + Send + Sync + 'static,
{
    let (scheduler, mut fired) = TokioScheduler::new();
    let mut playback = Playback::for_demo(&demo, scheduler);

    let info = Arc::new(DemoInfo {
        name: demo.name(),
        title,
        total_steps: playback.total_steps(),
        looping: playback.looping(),
    });
    let (commands, mut command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (frames, _) = broadcast::channel(FRAME_BUFFER);

    let handle = PlayerHandle {
        info: Arc::clone(&info),
        commands,
        frames: frames.clone(),
    };

    tokio::spawn(async move {
        info!(
            "Player {} started with {} steps",
            info.name, info.total_steps
        );
        if autoplay {
            playback.play();
        }

        loop {
            tokio::select! {
                Some(token) = fired.recv() => {
                    match playback.on_timer(token) {
                        Tick::Ignored => continue,
                        Tick::Restarted => debug!("Player {} restarted", info.name),
                        Tick::Completed => debug!("Player {} completed", info.name),
                        Tick::Advanced(_) => {}
                    }
                    publish(&demo, &playback, &frames);
                }
                command = command_rx.recv() => {
                    match command {
                        Some(Command::Control(control, reply)) => {
                            if playback.apply(control) {
                                debug!("Player {} {:?}", info.name, control);
                                publish(&demo, &playback, &frames);
                            }
                            let _ = reply.send(PlaybackStatus::from(&playback));
                        }
                        Some(Command::Frame(reply)) => {
                            match Frame::capture(&demo, PlaybackStatus::from(&playback)) {
                                Ok(frame) => {
                                    let _ = reply.send(frame);
                                }
                                Err(e) => warn!("Player {} failed to render: {}", info.name, e),
                            }
                        }
                        None => break,
                    }
                }
            }
        }

        info!("Player {} stopped", info.name);
    });

    handle
}

fn publish<D: Demo>(
    demo: &D,
    playback: &Playback<TokioScheduler>,
    frames: &broadcast::Sender<Frame>,
) {
    match Frame::capture(demo, PlaybackStatus::from(playback)) {
        // No subscribers is fine
        Ok(frame) => {
            let _ = frames.send(frame);
        }
        Err(e) => warn!("Failed to render frame for {}: {}", demo.name(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;
    use showcase_steps::halves::{HalvesRun, RESTART_DELAY, SHOW_DELAY, SPLIT_DELAY};
    use std::time::Duration;
    use tokio::time::sleep;

    const EPS: Duration = Duration::from_millis(1);

    #[tokio::test(start_paused = true)]
    async fn autoplay_advances_on_step_delays() {
        let player = spawn_player(HalvesRun::new("1212"), "Halves", true);
        let status = player.status().await.unwrap();
        assert_eq!(status.state, PlaybackState::Running);
        assert_eq!(status.cursor, 0);

        sleep(SHOW_DELAY + EPS).await;
        assert_eq!(player.status().await.unwrap().cursor, 1);

        sleep(SPLIT_DELAY).await;
        let status = player.status().await.unwrap();
        assert_eq!(status.cursor, 2);
        assert_eq!(status.state, PlaybackState::Completed);

        sleep(RESTART_DELAY).await;
        let status = player.status().await.unwrap();
        assert_eq!(status.cursor, 0);
        assert_eq!(status.cycles, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn frames_are_broadcast() {
        let player = spawn_player(HalvesRun::new("1212"), "Halves", false);
        let mut frames = player.subscribe();

        let status = player.control(Control::Play).await.unwrap();
        assert_eq!(status.state, PlaybackState::Running);
        let frame = frames.recv().await.unwrap();
        assert_eq!(frame.demo, "halves");
        assert_eq!(frame.status.cursor, 0);

        let frame = frames.recv().await.unwrap();
        assert_eq!(frame.status.cursor, 1);
        assert_eq!(frame.view["left"], "12");
    }

    #[tokio::test(start_paused = true)]
    async fn pause_holds_cursor() {
        let player = spawn_player(HalvesRun::new("1212"), "Halves", true);
        sleep(SHOW_DELAY + EPS).await;

        let status = player.control(Control::Pause).await.unwrap();
        assert_eq!(status.state, PlaybackState::Paused);
        sleep(Duration::from_secs(10)).await;
        assert_eq!(player.status().await.unwrap().cursor, 1);

        player.control(Control::Play).await.unwrap();
        sleep(SPLIT_DELAY + EPS).await;
        assert_eq!(player.status().await.unwrap().cursor, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restarts_from_zero() {
        let player = spawn_player(HalvesRun::new("1212"), "Halves", true);
        sleep(SHOW_DELAY + SPLIT_DELAY + EPS).await;
        assert_eq!(player.status().await.unwrap().state, PlaybackState::Completed);

        let status = player.control(Control::Reset).await.unwrap();
        assert_eq!(status.cursor, 0);
        assert_eq!(status.state, PlaybackState::Running);
        assert_eq!(status.cycles, 0);
    }

    #[tokio::test]
    async fn info_reflects_demo() {
        let player = spawn_player(HalvesRun::new("12"), "Halves", false);
        assert_eq!(
            player.info(),
            &DemoInfo {
                name: "halves",
                title: "Halves",
                total_steps: 3,
                looping: true,
            }
        );
        assert_eq!(player.status().await.unwrap().state, PlaybackState::Idle);
    }
}

//! The "impossible button" challenge.
//!
//! A hidden switch gates a button that writes one key/value pair into the
//! store. A background checker polls the store for `challenge = pwned` and
//! only accepts it when the switch is on and the button was actually used,
//! which it verifies through a hash over both.

use crate::error::{Error, Result};
use crate::storage::Storage;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// Store key the checker watches.
pub const CHALLENGE_KEY: &str = "challenge";

/// Value that triggers an evaluation.
pub const CHALLENGE_VALUE: &str = "pwned";

/// Recorded when the button is pressed.
pub const BUTTON_TOKEN: &str = "4a131074-765a-4ab1-a6eb-cc9dfe6b84c7";

/// What the button check reads before the button is pressed.
pub const UNPRESSED: &str = "null";

/// `derive_id(["true", BUTTON_TOKEN])`.
pub const EXPECTED_ID: &str = "b9eaa08b";

/// How often the checker polls the store.
pub const CHECK_INTERVAL: Duration = Duration::from_millis(500);

/// Shown next to the button.
pub const INSTRUCTIONS: &str =
    "Sätt nyckeln \"challenge\" i localStorage till \"pwned\" för att klara utmaningen";

/// djb2 variant with xor, over `parts` joined by `|`.
///
/// Hashes UTF-16 code units with 32-bit wrapping arithmetic and renders the
/// result as unpadded lowercase hex.
pub fn derive_id<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("|");

    let hash = joined
        .encode_utf16()
        .fold(5381i32, |hash, unit| hash.wrapping_mul(33) ^ i32::from(unit));

    format!("{:x}", hash as u32)
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Solved,
    /// Flag set without going through the button
    NiceTry,
}

impl Verdict {
    /// Alert text shown to the visitor.
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Solved => "Där satt den, snyggt!",
            Verdict::NiceTry => "Bra försök, men enklast är att använda knappen ;)",
        }
    }
}

/// Whether the button can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonState {
    pub enabled: bool,
    /// 0 when reachable by keyboard, -1 otherwise
    pub tab_index: i8,
}

impl ButtonState {
    fn for_switch(on: bool) -> Self {
        Self {
            enabled: on,
            tab_index: if on { 0 } else { -1 },
        }
    }
}

/// Snapshot served to the front end.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeStatus {
    pub switch: bool,
    pub button: ButtonState,
    pub button_check: &'static str,
    pub last_verdict: Option<Verdict>,
    pub instructions: &'static str,
}

pub struct Challenge {
    storage: Arc<Storage>,
    switch: watch::Sender<bool>,
    button_check: watch::Sender<&'static str>,
    verdict: watch::Sender<Option<Verdict>>,
}

impl Challenge {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            switch: watch::channel(false).0,
            button_check: watch::channel(UNPRESSED).0,
            verdict: watch::channel(None).0,
        }
    }

    pub fn switch(&self) -> bool {
        *self.switch.borrow()
    }

    /// Flip the hidden switch. The button follows it.
    pub fn set_switch(&self, on: bool) {
        let was = self.switch.send_replace(on);
        if was != on {
            debug!("Secret switch {}", if on { "on" } else { "off" });
        }
    }

    /// Observe the switch.
    pub fn subscribe_switch(&self) -> watch::Receiver<bool> {
        self.switch.subscribe()
    }

    pub fn button(&self) -> ButtonState {
        ButtonState::for_switch(self.switch())
    }

    /// Press the button: record the check token and store `key = value`.
    pub fn press(&self, key: &str, value: &str) -> Result<()> {
        if !self.switch() {
            return Err(Error::ButtonDisabled);
        }
        if key.is_empty() {
            return Err(Error::InvalidInput("key must not be empty".to_string()));
        }

        self.button_check.send_replace(BUTTON_TOKEN);
        self.storage.set(key, value);
        info!("Button pressed, stored key {:?}", key);
        Ok(())
    }

    pub fn button_check(&self) -> &'static str {
        *self.button_check.borrow()
    }

    /// Observe evaluations.
    pub fn subscribe_verdicts(&self) -> watch::Receiver<Option<Verdict>> {
        self.verdict.subscribe()
    }

    pub fn status(&self) -> ChallengeStatus {
        let switch = self.switch();
        ChallengeStatus {
            switch,
            button: ButtonState::for_switch(switch),
            button_check: self.button_check(),
            last_verdict: *self.verdict.borrow(),
            instructions: INSTRUCTIONS,
        }
    }

    /// Evaluate the flag once. The key is removed whatever the outcome.
    pub fn check(&self) -> Option<Verdict> {
        if self.storage.get(CHALLENGE_KEY).as_deref() != Some(CHALLENGE_VALUE) {
            return None;
        }

        let id = derive_id(&[self.switch().to_string().as_str(), self.button_check()]);
        debug!("Challenge id {}", id);

        let verdict = if id == EXPECTED_ID {
            Verdict::Solved
        } else {
            Verdict::NiceTry
        };
        self.storage.remove(CHALLENGE_KEY);
        self.verdict.send_replace(Some(verdict));
        info!("Challenge evaluated: {:?}", verdict);

        Some(verdict)
    }

    /// Poll the store every [`CHECK_INTERVAL`], starting immediately.
    pub fn spawn_checker(self: &Arc<Self>) -> JoinHandle<()> {
        let challenge = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = interval(CHECK_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                challenge.check();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready_ok, task};

    fn challenge() -> Arc<Challenge> {
        Arc::new(Challenge::new(Arc::new(Storage::in_memory())))
    }

    #[test]
    fn derive_id_matches_known_values() {
        assert_eq!(derive_id(&["true", BUTTON_TOKEN]), EXPECTED_ID);
        assert_eq!(derive_id(&["false", BUTTON_TOKEN]), "6d359440");
        assert_eq!(derive_id(&["true", UNPRESSED]), "b50c34");
        assert_eq!(derive_id(&["false", UNPRESSED]), "b148473f");
    }

    #[test]
    fn button_follows_switch() {
        let c = challenge();
        assert_eq!(c.button(), ButtonState { enabled: false, tab_index: -1 });
        c.set_switch(true);
        assert_eq!(c.button(), ButtonState { enabled: true, tab_index: 0 });
    }

    #[test]
    fn disabled_button_does_nothing() {
        let c = challenge();
        assert!(matches!(
            c.press(CHALLENGE_KEY, CHALLENGE_VALUE),
            Err(Error::ButtonDisabled)
        ));
        assert_eq!(c.button_check(), UNPRESSED);
        assert_eq!(c.check(), None);
    }

    #[test]
    fn pressing_with_switch_on_solves() {
        let c = challenge();
        c.set_switch(true);
        c.press(CHALLENGE_KEY, CHALLENGE_VALUE).unwrap();
        assert_eq!(c.button_check(), BUTTON_TOKEN);

        assert_eq!(c.check(), Some(Verdict::Solved));
        assert_eq!(c.storage.get(CHALLENGE_KEY), None);
        assert_eq!(c.status().last_verdict, Some(Verdict::Solved));

        // Flag consumed
        assert_eq!(c.check(), None);
    }

    #[test]
    fn writing_the_flag_directly_is_a_nice_try() {
        let c = challenge();
        c.storage.set(CHALLENGE_KEY, CHALLENGE_VALUE);
        assert_eq!(c.check(), Some(Verdict::NiceTry));
        assert_eq!(c.storage.get(CHALLENGE_KEY), None);

        // Switch flipped back off after pressing
        c.set_switch(true);
        c.press("other", "x").unwrap();
        c.set_switch(false);
        c.storage.set(CHALLENGE_KEY, CHALLENGE_VALUE);
        assert_eq!(c.check(), Some(Verdict::NiceTry));
    }

    #[test]
    fn other_values_are_ignored() {
        let c = challenge();
        c.storage.set(CHALLENGE_KEY, "nope");
        assert_eq!(c.check(), None);
        assert_eq!(c.storage.get(CHALLENGE_KEY).as_deref(), Some("nope"));
    }

    #[test]
    fn switch_is_observable() {
        let c = challenge();
        let mut rx = c.subscribe_switch();
        let mut changed = task::spawn(rx.changed());
        assert_pending!(changed.poll());

        c.set_switch(true);
        assert!(changed.is_woken());
        assert_ready_ok!(changed.poll());
        drop(changed);
        assert!(*rx.borrow());
    }

    #[tokio::test(start_paused = true)]
    async fn checker_polls_the_store() {
        let c = challenge();
        let mut verdicts = c.subscribe_verdicts();
        let checker = c.spawn_checker();

        c.set_switch(true);
        c.press(CHALLENGE_KEY, CHALLENGE_VALUE).unwrap();

        tokio::time::sleep(CHECK_INTERVAL + Duration::from_millis(10)).await;
        verdicts.changed().await.unwrap();
        assert_eq!(*verdicts.borrow(), Some(Verdict::Solved));
        assert_eq!(c.storage.get(CHALLENGE_KEY), None);

        checker.abort();
    }
}

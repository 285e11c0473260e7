//! The set of demos served, each behind its own player.

use showcase_steps::{dial, digits, grid, halves, pattern, ranges};
use tracing::info;

use crate::error::{Error, Result};
use crate::player::{spawn_player, DemoInfo, PlayerHandle};

/// Running players, in display order.
pub struct Catalog {
    players: Vec<PlayerHandle>,
}

impl Catalog {
    pub fn new(players: Vec<PlayerHandle>) -> Self {
        Self { players }
    }

    /// Spawn a player for every demo with the inputs shown on the site.
    pub fn spawn_defaults(autoplay: bool) -> Result<Self> {
        let players = vec![
            spawn_player(
                dial::DialRun::parse(dial::DEFAULT_INPUT)?,
                "Rotating dial",
                autoplay,
            ),
            spawn_player(
                halves::HalvesRun::new(halves::DEFAULT_VALUE),
                "Split and compare",
                autoplay,
            ),
            spawn_player(
                pattern::PatternRun::new(pattern::DEFAULT_VALUE),
                "Repeating pattern",
                autoplay,
            ),
            spawn_player(
                digits::DigitsRun::new(digits::DEFAULT_BANK, digits::DEFAULT_PICKS)?,
                "Largest digits",
                autoplay,
            ),
            spawn_player(
                grid::GridRun::parse(grid::DEFAULT_INPUT)?,
                "Accessible rolls",
                autoplay,
            ),
            spawn_player(
                ranges::RangesRun::parse(&ranges::DEFAULT_RANGES, &ranges::DEFAULT_IDS)?,
                "Range coverage",
                autoplay,
            ),
        ];
        info!("Spawned {} demo players", players.len());
        Ok(Self::new(players))
    }

    pub fn get(&self, name: &str) -> Result<&PlayerHandle> {
        self.players
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| Error::UnknownDemo(name.to_string()))
    }

    pub fn list(&self) -> Vec<DemoInfo> {
        self.players.iter().map(|p| p.info().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

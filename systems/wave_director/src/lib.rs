#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave director responsible for level composition and enemy spawn cadence.

use std::iter;

use path_defence_core::{Command, EnemyKind, Event, SPAWN_INTERVAL_TICKS};

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    spawn_interval_ticks: u32,
}

impl Config {
    /// Creates a new configuration spawning one enemy every `spawn_interval_ticks`.
    #[must_use]
    pub const fn new(spawn_interval_ticks: u32) -> Self {
        Self {
            spawn_interval_ticks,
        }
    }

    /// Number of ticks between consecutive spawns.
    #[must_use]
    pub const fn spawn_interval_ticks(&self) -> u32 {
        self.spawn_interval_ticks
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_TICKS)
    }
}

/// Builds the ordered list of enemy tiers dispatched during `level`.
///
/// Weak enemies come first, then Medium, then Strong.
#[must_use]
pub fn compose_wave(level: u32) -> Vec<EnemyKind> {
    let (weak, medium, strong) = match level {
        0..=5 => (5 * level, 0, 0),
        6..=10 => (3 * level, level - 5, 0),
        _ => (2 * level, level - 5, level - 10),
    };

    let mut composition = Vec::with_capacity((weak + medium + strong) as usize);
    composition.extend(iter::repeat_n(EnemyKind::Weak, weak as usize));
    composition.extend(iter::repeat_n(EnemyKind::Medium, medium as usize));
    composition.extend(iter::repeat_n(EnemyKind::Strong, strong as usize));
    composition
}

/// Reports whether the current level has been cleared.
///
/// A level is complete once the whole wave was dispatched and no enemy is live.
#[must_use]
pub const fn is_level_complete(
    live_enemies: usize,
    spawn_cursor: usize,
    composition_len: usize,
) -> bool {
    live_enemies == 0 && spawn_cursor >= composition_len
}

/// Pure system that dispatches the active wave and announces level completion.
#[derive(Debug)]
pub struct WaveDirector {
    config: Config,
    level: u32,
    composition: Vec<EnemyKind>,
    spawn_cursor: usize,
    spawn_timer: u32,
}

impl WaveDirector {
    /// Creates a director positioned at the start of level one.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            level: 1,
            composition: compose_wave(1),
            spawn_cursor: 0,
            spawn_timer: 0,
        }
    }

    /// Level whose wave is currently being dispatched.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Ordered tiers of the active wave.
    #[must_use]
    pub fn composition(&self) -> &[EnemyKind] {
        &self.composition
    }

    /// Number of enemies of the active wave already dispatched.
    #[must_use]
    pub const fn spawn_cursor(&self) -> usize {
        self.spawn_cursor
    }

    /// Ticks accumulated since the last spawn.
    #[must_use]
    pub const fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    /// Number of enemies of the active wave still waiting to enter.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.composition.len().saturating_sub(self.spawn_cursor)
    }

    /// Consumes world events and emits spawn commands on the configured cadence.
    ///
    /// The spawn timer keeps counting while the wave is exhausted and is not
    /// reset by a level transition.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::SessionReset => self.restart(),
                Event::LevelAdvanced { level, .. } => self.begin_level(*level),
                Event::TimeAdvanced { .. } => self.advance_timer(out),
                _ => {}
            }
        }
    }

    /// Emits `Command::AdvanceLevel` when the active wave has been cleared.
    pub fn check_level_complete(&self, live_enemies: usize, out: &mut Vec<Command>) {
        if is_level_complete(live_enemies, self.spawn_cursor, self.composition.len()) {
            out.push(Command::AdvanceLevel);
        }
    }

    fn restart(&mut self) {
        self.begin_level(1);
        self.spawn_timer = 0;
    }

    fn begin_level(&mut self, level: u32) {
        self.level = level;
        self.composition = compose_wave(level);
        self.spawn_cursor = 0;
    }

    fn advance_timer(&mut self, out: &mut Vec<Command>) {
        self.spawn_timer = self.spawn_timer.saturating_add(1);
        if self.spawn_timer < self.config.spawn_interval_ticks {
            return;
        }

        let Some(kind) = self.composition.get(self.spawn_cursor).copied() else {
            return;
        };

        out.push(Command::SpawnEnemy { kind });
        self.spawn_cursor += 1;
        self.spawn_timer = 0;
    }
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

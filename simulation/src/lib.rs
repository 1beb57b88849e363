#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-rate simulation loop that owns the world and drives every system once per tick.
//!
//! Each call to [`Simulation::step`] drains one batch of player input and then
//! runs the tick phases in a fixed order: spawning, enemy movement, tower
//! cooldown and firing, projectile flight, and level completion. The loop
//! stops advancing once the session is lost or won until it is reset.

use path_defence_core::{
    Command, Event, FrameSnapshot, InputEvent, SessionState, TowerKind, TowerTarget,
};
use path_defence_system_builder::{Builder, BuilderContext};
use path_defence_system_tower_combat::TowerCombat;
use path_defence_system_tower_targeting::TowerTargeting;
use path_defence_system_wave_director::{Config as DirectorConfig, WaveDirector};
use path_defence_world::{self as world, query, World};
use tracing::debug;

/// Result of advancing the simulation by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session is still being played.
    Running,
    /// The session reached a terminal state and no longer advances.
    Finished(SessionState),
    /// The player asked to quit; the tick was not simulated.
    Quit,
}

/// Owns the authoritative world together with the systems that drive it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    director: WaveDirector,
    targeting: TowerTargeting,
    combat: TowerCombat,
    builder: Builder,
    targets: Vec<TowerTarget>,
    commands: Vec<Command>,
    batch: Vec<Event>,
    events: Vec<Event>,
}

impl Simulation {
    /// Creates a simulation on a fresh world using the default spawn cadence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_world(World::new(), DirectorConfig::default())
    }

    /// Creates a simulation around the provided world and director configuration.
    #[must_use]
    pub fn with_world(world: World, director: DirectorConfig) -> Self {
        Self {
            world,
            director: WaveDirector::new(director),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            builder: Builder::new(),
            targets: Vec::new(),
            commands: Vec::new(),
            batch: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Provides read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Provides read-only access to the wave director.
    #[must_use]
    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    /// Tower type the player armed from the selection strip, if any.
    #[must_use]
    pub fn armed(&self) -> Option<TowerKind> {
        self.builder.armed()
    }

    /// Lifecycle state of the current session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        query::session(&self.world).state
    }

    /// Events produced by the most recent [`Simulation::step`] or [`Simulation::reset`].
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Captures everything a renderer needs to draw the current frame.
    #[must_use]
    pub fn frame(&self) -> FrameSnapshot {
        query::frame(&self.world)
    }

    /// Discards the current session and starts a fresh one at level one.
    pub fn reset(&mut self) {
        self.events.clear();
        self.commands.push(Command::ResetSession);
        self.flush_commands();
        self.director.handle(&self.batch, &mut self.commands);
        self.builder.handle(
            &self.batch,
            &[],
            builder_context(&self.world),
            |_| None,
            &mut self.commands,
        );
        self.flush_commands();
    }

    /// Drains one batch of input and advances the session by a single tick.
    pub fn step(&mut self, input: &[InputEvent]) -> StepOutcome {
        self.events.clear();

        if input
            .iter()
            .any(|event| matches!(event, InputEvent::QuitRequested))
        {
            debug!(tick = query::tick_index(&self.world), "quit requested");
            return StepOutcome::Quit;
        }

        let state = self.state();
        if state.is_terminal() {
            return StepOutcome::Finished(state);
        }

        let world = &self.world;
        self.builder.handle(
            &[],
            input,
            builder_context(world),
            |position| query::tower_at(world, position),
            &mut self.commands,
        );
        self.flush_commands();

        self.commands.push(Command::Tick);
        self.flush_commands();
        self.director.handle(&self.batch, &mut self.commands);
        self.flush_commands();

        self.commands.push(Command::AdvanceEnemies);
        self.flush_commands();
        if self.state().is_terminal() {
            return self.outcome();
        }

        self.commands.push(Command::CoolTowers);
        self.flush_commands();
        let state = self.state();
        let towers = query::tower_view(&self.world);
        self.targeting.handle(
            state,
            &towers,
            &query::enemy_view(&self.world),
            &mut self.targets,
        );
        self.combat
            .handle(state, &towers, &self.targets, &mut self.commands);
        self.flush_commands();

        self.commands.push(Command::AdvanceProjectiles);
        self.flush_commands();

        self.director
            .check_level_complete(query::live_enemy_count(&self.world), &mut self.commands);
        self.flush_commands();
        self.director.handle(&self.batch, &mut self.commands);
        self.flush_commands();

        self.outcome()
    }

    fn outcome(&self) -> StepOutcome {
        match self.state() {
            SessionState::Playing => StepOutcome::Running,
            terminal => StepOutcome::Finished(terminal),
        }
    }

    /// Applies queued commands, leaving the produced events in `batch`.
    fn flush_commands(&mut self) {
        self.batch.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.batch);
        }
        self.events.extend_from_slice(&self.batch);
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

fn builder_context(world: &World) -> BuilderContext {
    BuilderContext {
        money: query::session(world).money,
        selected: query::selected_tower(world),
        playfield: *query::playfield(world),
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that translates player input into tower placement, selection and sale commands.

use glam::Vec2;
use path_defence_core::{
    Command, Event, InputEvent, Money, Playfield, PointerButton, TowerId, TowerKind,
};
use tracing::debug;

/// Key that sells the selected tower.
pub const SELL_KEY: char = 's';

/// Session facts the builder needs to decide which command an input maps to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuilderContext {
    /// Money available before any input of this tick is applied.
    pub money: Money,
    /// Tower currently selected in the world, if any.
    pub selected: Option<TowerId>,
    /// Playfield used to recognise presses inside the selection strip.
    pub playfield: Playfield,
}

/// Builder system that remembers the armed tower type between ticks.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    armed: Option<TowerKind>,
}

impl Builder {
    /// Creates a new builder system with no tower type armed.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Tower type that the next press in the play area will place.
    #[must_use]
    pub const fn armed(&self) -> Option<TowerKind> {
        self.armed
    }

    /// Consumes world events and drained input to emit builder commands.
    ///
    /// The `tower_at` closure should mirror the semantics of the world's
    /// `query::tower_at` helper so the system can identify the pressed tower.
    /// Inputs are handled in order; money spent and selections made by earlier
    /// inputs of the same batch are visible to later ones.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: &[InputEvent],
        context: BuilderContext,
        mut tower_at: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(Vec2) -> Option<TowerId>,
    {
        for event in events {
            if let Event::SessionReset = event {
                self.armed = None;
            }
        }

        let mut money = context.money;
        let mut selected = context.selected;

        for event in input {
            match *event {
                InputEvent::PointerDown { position, button } => {
                    if button != PointerButton::Primary {
                        continue;
                    }

                    if context.playfield.in_selection_strip(position) {
                        self.arm_from_strip(&context.playfield, position);
                        continue;
                    }

                    if let Some(tower) = tower_at(position) {
                        selected = Some(tower);
                        out.push(Command::SelectTower { tower });
                        continue;
                    }

                    let Some(kind) = self.armed else {
                        continue;
                    };
                    let Some(remaining) = money.checked_sub(kind.stats().cost) else {
                        debug!(?kind, money = money.get(), "armed tower unaffordable");
                        continue;
                    };
                    money = remaining;
                    self.armed = None;
                    out.push(Command::PlaceTower { kind, position });
                }
                InputEvent::KeyDown { key } => {
                    if key != SELL_KEY {
                        continue;
                    }
                    if let Some(tower) = selected.take() {
                        out.push(Command::SellTower { tower });
                    }
                }
                InputEvent::QuitRequested => {}
            }
        }
    }

    fn arm_from_strip(&mut self, playfield: &Playfield, position: Vec2) {
        let slot = playfield.strip_slot(position.x);
        match slot.and_then(TowerKind::from_index) {
            Some(kind) => self.armed = Some(kind),
            None => debug!(x = position.x, "press outside strip buttons ignored"),
        }
    }
}

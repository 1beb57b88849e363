#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns target assignments into firing commands.
//!
//! Only towers whose cooldown reached zero are asked to fire, so every
//! emitted [`Command::FireProjectile`] launches a projectile when applied.

use path_defence_core::{Command, SessionState, TowerTarget, TowerView};

/// Tower combat system that queues firing commands for ready towers.
#[derive(Clone, Copy, Debug, Default)]
pub struct TowerCombat;

impl TowerCombat {
    /// Creates a new tower combat system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits `Command::FireProjectile` entries, in target order, for towers
    /// that are live and ready to fire.
    pub fn handle(
        &self,
        state: SessionState,
        towers: &TowerView,
        tower_targets: &[TowerTarget],
        out: &mut Vec<Command>,
    ) {
        if state.is_terminal() {
            return;
        }

        out.extend(
            tower_targets
                .iter()
                .filter(|target| {
                    towers
                        .get(target.tower)
                        .is_some_and(|tower| tower.cooldown_remaining == 0)
                })
                .map(|target| Command::FireProjectile {
                    tower: target.tower,
                    target: target.enemy,
                }),
        );
    }
}

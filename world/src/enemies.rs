//! Enemy movement along the path and the demotion chain applied on lethal damage.

use glam::Vec2;
use path_defence_core::{EnemyId, EnemyKind, EnemySnapshot, Health, Money, Path};

/// Live enemy stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec2,
    pub(crate) health: Health,
    pub(crate) waypoint_index: usize,
}

/// Result of applying projectile damage to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DamageOutcome {
    /// Health remains; no reward is granted yet.
    Survived { remaining: Health },
    /// The tier was depleted and a weaker tier takes its place at full health.
    Demoted {
        from: EnemyKind,
        to: EnemyKind,
        reward: Money,
    },
    /// The weakest tier was depleted and the enemy leaves the live set.
    Destroyed { kind: EnemyKind, reward: Money },
}

impl Enemy {
    /// Creates a full-health enemy standing on the first waypoint.
    pub(crate) fn spawn(id: EnemyId, kind: EnemyKind, path: &Path) -> Self {
        Self {
            id,
            kind,
            position: path.start(),
            health: kind.max_health(),
            waypoint_index: 0,
        }
    }

    /// Moves toward the next waypoint and reports whether the path end was passed.
    ///
    /// When the remaining distance is shorter than one step the waypoint is
    /// consumed without moving, so the enemy never overshoots a corner.
    pub(crate) fn advance(&mut self, path: &Path) -> bool {
        let Some(target) = path.waypoint(self.waypoint_index + 1) else {
            return true;
        };

        let speed = self.kind.speed();
        let offset = target - self.position;
        let distance = offset.length();

        if distance < speed {
            self.waypoint_index += 1;
            return self.waypoint_index >= path.last_index();
        }

        self.position += offset / distance * speed;
        false
    }

    /// Applies damage and resolves the demotion chain in place.
    pub(crate) fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        self.health = self.health.saturating_sub(amount);
        if !self.health.is_depleted() {
            return DamageOutcome::Survived {
                remaining: self.health,
            };
        }

        let from = self.kind;
        let reward = from.reward();
        match from.demoted() {
            Some(to) => {
                self.kind = to;
                self.health = to.max_health();
                DamageOutcome::Demoted { from, to, reward }
            }
            None => DamageOutcome::Destroyed { kind: from, reward },
        }
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            health: self.health,
            max_health: self.kind.max_health(),
            waypoint_index: self.waypoint_index,
        }
    }
}

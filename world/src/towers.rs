//! Authoritative tower state management utilities.

use std::collections::BTreeMap;

use glam::Vec2;
use path_defence_core::{TowerId, TowerKind, TowerSnapshot, TOWER_SELECTION_RADIUS};

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Tower {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Centre of the tower in world units.
    pub(crate) position: Vec2,
    /// Ticks remaining before the tower may fire again.
    pub(crate) cooldown_remaining: u32,
    /// Whether the player selected this tower.
    pub(crate) selected: bool,
}

impl Tower {
    /// Counts the cooldown down by one tick, stopping at zero.
    pub(crate) fn tick(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }

    /// Fires at `target` when the cooldown elapsed, returning the heading in radians.
    pub(crate) fn fire(&mut self, target: Vec2) -> Option<f32> {
        if self.cooldown_remaining != 0 {
            return None;
        }

        let offset = target - self.position;
        self.cooldown_remaining = self.kind.stats().fire_rate;
        Some(offset.y.atan2(offset.x))
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            cooldown_remaining: self.cooldown_remaining,
            selected: self.selected,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, Tower>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Inserts a ready-to-fire tower and returns its identifier.
    pub(crate) fn place(&mut self, kind: TowerKind, position: Vec2) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(
            id,
            Tower {
                id,
                kind,
                position,
                cooldown_remaining: 0,
                selected: false,
            },
        );
        id
    }

    pub(crate) fn remove(&mut self, id: TowerId) -> Option<Tower> {
        self.entries.remove(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut Tower> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn contains(&self, id: TowerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Iterates towers in placement order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Tower> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tower> {
        self.entries.values_mut()
    }

    /// Makes `id` the only selected tower.
    pub(crate) fn select(&mut self, id: TowerId) {
        for tower in self.entries.values_mut() {
            tower.selected = tower.id == id;
        }
    }

    pub(crate) fn selected(&self) -> Option<TowerId> {
        self.iter()
            .find(|tower| tower.selected)
            .map(|tower| tower.id)
    }

    /// First tower, in placement order, whose disc contains `point`.
    pub(crate) fn tower_at(&self, point: Vec2) -> Option<TowerId> {
        self.iter()
            .find(|tower| tower.position.distance(point) < TOWER_SELECTION_RADIUS)
            .map(|tower| tower.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_empty_with_zero_identifier() {
        let registry = TowerRegistry::new();
        assert!(registry.entries.is_empty());
        assert_eq!(registry.next_tower_id.get(), 0);
    }

    #[test]
    fn placed_towers_start_ready_and_unselected() {
        let mut registry = TowerRegistry::new();
        let first = registry.place(TowerKind::Basic, Vec2::new(10.0, 10.0));
        let second = registry.place(TowerKind::Cannon, Vec2::new(50.0, 10.0));

        assert_eq!(first, TowerId::new(0));
        assert_eq!(second, TowerId::new(1));
        assert!(registry
            .iter()
            .all(|tower| tower.cooldown_remaining == 0 && !tower.selected));
    }

    #[test]
    fn firing_resets_cooldown_and_aims_at_target() {
        let mut registry = TowerRegistry::new();
        let id = registry.place(TowerKind::Sniper, Vec2::new(0.0, 0.0));
        let tower = registry.get_mut(id).expect("tower placed");

        let heading = tower.fire(Vec2::new(0.0, 10.0)).expect("ready tower fires");

        assert!((heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(tower.cooldown_remaining, 60);
        assert!(tower.fire(Vec2::new(0.0, 10.0)).is_none());
    }

    #[test]
    fn cooldown_never_drops_below_zero() {
        let mut registry = TowerRegistry::new();
        let id = registry.place(TowerKind::Basic, Vec2::ZERO);
        let tower = registry.get_mut(id).expect("tower placed");

        tower.tick();
        assert_eq!(tower.cooldown_remaining, 0);
    }

    #[test]
    fn selection_is_exclusive() {
        let mut registry = TowerRegistry::new();
        let first = registry.place(TowerKind::Basic, Vec2::new(10.0, 10.0));
        let second = registry.place(TowerKind::Basic, Vec2::new(100.0, 10.0));

        registry.select(first);
        registry.select(second);

        assert_eq!(registry.selected(), Some(second));
        assert_eq!(registry.iter().filter(|tower| tower.selected).count(), 1);
    }

    #[test]
    fn tower_at_uses_strict_selection_radius() {
        let mut registry = TowerRegistry::new();
        let id = registry.place(TowerKind::Basic, Vec2::new(100.0, 100.0));

        assert_eq!(registry.tower_at(Vec2::new(119.0, 100.0)), Some(id));
        assert_eq!(registry.tower_at(Vec2::new(120.0, 100.0)), None);
    }
}

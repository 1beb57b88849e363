#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Path Defence.
//!
//! The world owns every piece of mutable session state: placed towers, live
//! enemies, projectiles in flight and the player's counters. It changes only
//! through [`apply`], which executes one [`Command`] and reports what happened
//! as [`Event`] values. Read access for systems and adapters goes through the
//! [`query`] module.

mod enemies;
mod projectiles;
mod towers;

use glam::Vec2;
use path_defence_core::{
    Command, EnemyId, Event, Money, Path, PlacementError, Playfield, ProjectileId,
    SaleError, SessionState, TowerId, TowerKind, FINAL_LEVEL, LEVEL_BONUS, PLAYFIELD,
    STARTING_LIVES, STARTING_MONEY,
};
use tracing::{debug, info};

use crate::{
    enemies::{DamageOutcome, Enemy},
    projectiles::Projectile,
    towers::TowerRegistry,
};

/// Represents the authoritative Path Defence world state.
#[derive(Debug)]
pub struct World {
    path: Path,
    playfield: Playfield,
    towers: TowerRegistry,
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
    projectiles: Vec<Projectile>,
    next_projectile_id: ProjectileId,
    money: Money,
    lives: u32,
    level: u32,
    state: SessionState,
    tick_index: u64,
}

impl World {
    /// Creates a fresh session on the standard path ready for simulation.
    #[must_use]
    pub fn new() -> Self {
        Self::with_path(Path::standard())
    }

    /// Creates a fresh session whose enemies walk the provided path.
    #[must_use]
    pub fn with_path(path: Path) -> Self {
        Self {
            path,
            playfield: PLAYFIELD,
            towers: TowerRegistry::new(),
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            projectiles: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
            money: STARTING_MONEY,
            lives: STARTING_LIVES,
            level: 1,
            state: SessionState::Playing,
            tick_index: 0,
        }
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().wrapping_add(1));
        id
    }

    fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().wrapping_add(1));
        id
    }

    fn finish(&mut self, state: SessionState, out_events: &mut Vec<Event>) {
        self.state = state;
        info!(?state, level = self.level, money = self.money.get(), "session ended");
        out_events.push(Event::SessionEnded { state });
    }

    fn advance_enemies(&mut self, out_events: &mut Vec<Event>) {
        let path = &self.path;
        let leaked: Vec<bool> = self
            .enemies
            .iter_mut()
            .map(|enemy| enemy.advance(path))
            .collect();

        let mut flags = leaked.iter();
        let mut leaked_ids = Vec::new();
        self.enemies.retain(|enemy| {
            let has_leaked = flags.next().copied().unwrap_or(false);
            if has_leaked {
                leaked_ids.push(enemy.id);
            }
            !has_leaked
        });

        for enemy in leaked_ids {
            self.lives = self.lives.saturating_sub(1);
            debug!(enemy = enemy.get(), lives = self.lives, "enemy leaked");
            out_events.push(Event::EnemyLeaked {
                enemy,
                lives_remaining: self.lives,
            });
        }

        if self.lives == 0 {
            self.finish(SessionState::Lost, out_events);
        }
    }

    fn fire_projectile(&mut self, tower: TowerId, target: EnemyId, out_events: &mut Vec<Event>) {
        let Some(enemy_position) = self
            .enemies
            .iter()
            .find(|enemy| enemy.id == target)
            .map(|enemy| enemy.position)
        else {
            debug!(
                tower = tower.get(),
                enemy = target.get(),
                "fire request without live target"
            );
            return;
        };

        let Some(entry) = self.towers.get_mut(tower) else {
            debug!(tower = tower.get(), "fire request for missing tower");
            return;
        };
        let Some(heading) = entry.fire(enemy_position) else {
            return;
        };

        let stats = entry.kind.stats();
        let position = entry.position;
        let projectile = self.allocate_projectile_id();
        self.projectiles.push(Projectile {
            id: projectile,
            position,
            heading,
            damage: stats.damage,
            color: stats.color,
        });
        out_events.push(Event::ProjectileFired {
            projectile,
            tower,
            target,
            heading,
        });
    }

    fn advance_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let mut spent = vec![false; self.projectiles.len()];

        for (projectile, spent) in self.projectiles.iter_mut().zip(spent.iter_mut()) {
            projectile.advance();

            if let Some(index) = projectile.find_hit(&self.enemies) {
                *spent = true;
                let enemy = &mut self.enemies[index];
                let id = enemy.id;
                match enemy.take_damage(projectile.damage) {
                    DamageOutcome::Survived { remaining } => {
                        out_events.push(Event::EnemyDamaged {
                            enemy: id,
                            damage: projectile.damage,
                            remaining,
                        });
                    }
                    DamageOutcome::Demoted { from, to, reward } => {
                        self.money = self.money.saturating_add(reward);
                        out_events.push(Event::EnemyDemoted {
                            enemy: id,
                            from,
                            to,
                            reward,
                        });
                    }
                    DamageOutcome::Destroyed { kind, reward } => {
                        let _ = self.enemies.remove(index);
                        self.money = self.money.saturating_add(reward);
                        out_events.push(Event::EnemyKilled {
                            enemy: id,
                            kind,
                            reward,
                        });
                    }
                }
                continue;
            }

            if projectile.is_out_of_bounds(&self.playfield) {
                *spent = true;
                out_events.push(Event::ProjectileExpired {
                    projectile: projectile.id,
                });
            }
        }

        let mut flags = spent.iter();
        self.projectiles
            .retain(|_| !flags.next().copied().unwrap_or(false));
    }

    fn advance_level(&mut self, out_events: &mut Vec<Event>) {
        self.level = self.level.saturating_add(1);
        self.money = self.money.saturating_add(LEVEL_BONUS);
        info!(
            level = self.level,
            money = self.money.get(),
            "level advanced"
        );
        out_events.push(Event::LevelAdvanced {
            level: self.level,
            bonus: LEVEL_BONUS,
        });

        if self.level > FINAL_LEVEL {
            self.finish(SessionState::Won, out_events);
        }
    }

    fn place_tower(&mut self, kind: TowerKind, position: Vec2, out_events: &mut Vec<Event>) {
        match self.validate_placement(kind, position) {
            Ok(balance) => {
                self.money = balance;
                let tower = self.towers.place(kind, position);
                let cost = kind.stats().cost;
                debug!(tower = tower.get(), ?kind, money = self.money.get(), "tower placed");
                out_events.push(Event::TowerPlaced {
                    tower,
                    kind,
                    position,
                    cost,
                });
            }
            Err(reason) => {
                debug!(?kind, %reason, "tower placement rejected");
                out_events.push(Event::TowerPlacementRejected {
                    kind,
                    position,
                    reason,
                });
            }
        }
    }

    /// Returns the balance left after paying for the tower.
    fn validate_placement(&self, kind: TowerKind, position: Vec2) -> Result<Money, PlacementError> {
        if !self.playfield.contains(position) || self.playfield.in_selection_strip(position) {
            return Err(PlacementError::OutOfBounds);
        }

        let cost = kind.stats().cost;
        self.money
            .checked_sub(cost)
            .ok_or(PlacementError::InsufficientFunds {
                cost,
                available: self.money,
            })
    }

    fn sell_tower(&mut self, tower: TowerId, out_events: &mut Vec<Event>) {
        let Some(removed) = self.towers.remove(tower) else {
            let reason = SaleError::MissingTower;
            debug!(tower = tower.get(), %reason, "tower sale rejected");
            out_events.push(Event::TowerSaleRejected { tower, reason });
            return;
        };

        let refund = removed.kind.refund();
        self.money = self.money.saturating_add(refund);
        debug!(tower = tower.get(), refund = refund.get(), "tower sold");
        out_events.push(Event::TowerSold { tower, refund });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session reached a terminal state every command except
/// [`Command::ResetSession`] is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if let Command::ResetSession = command {
        *world = World::with_path(world.path.clone());
        info!("session reset");
        out_events.push(Event::SessionReset);
        return;
    }

    if world.state.is_terminal() {
        debug!(?command, state = ?world.state, "command ignored after session end");
        return;
    }

    match command {
        Command::ResetSession => {}
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::SpawnEnemy { kind } => {
            let enemy = world.allocate_enemy_id();
            world.enemies.push(Enemy::spawn(enemy, kind, &world.path));
            out_events.push(Event::EnemySpawned { enemy, kind });
        }
        Command::AdvanceEnemies => world.advance_enemies(out_events),
        Command::CoolTowers => {
            for tower in world.towers.iter_mut() {
                tower.tick();
            }
        }
        Command::FireProjectile { tower, target } => {
            world.fire_projectile(tower, target, out_events);
        }
        Command::AdvanceProjectiles => world.advance_projectiles(out_events),
        Command::AdvanceLevel => world.advance_level(out_events),
        Command::PlaceTower { kind, position } => world.place_tower(kind, position, out_events),
        Command::SellTower { tower } => world.sell_tower(tower, out_events),
        Command::SelectTower { tower } => {
            if world.towers.contains(tower) {
                world.towers.select(tower);
                out_events.push(Event::TowerSelected { tower });
            } else {
                debug!(tower = tower.get(), "selection of missing tower ignored");
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use path_defence_core::{
        EnemyView, FrameSnapshot, Path, Playfield, ProjectileSnapshot, SessionSnapshot,
        TowerId, TowerView,
    };

    use super::World;

    /// Captures the player-facing counters of the session.
    #[must_use]
    pub fn session(world: &World) -> SessionSnapshot {
        SessionSnapshot {
            money: world.money,
            lives: world.lives,
            level: world.level,
            state: world.state,
        }
    }

    /// Captures a read-only view of the placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures a read-only view of the live enemies in live order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures the projectiles currently in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Captures everything a renderer needs to draw the current frame.
    #[must_use]
    pub fn frame(world: &World) -> FrameSnapshot {
        FrameSnapshot {
            towers: tower_view(world),
            enemies: enemy_view(world),
            projectiles: projectiles(world),
            session: session(world),
        }
    }

    /// Provides read-only access to the path enemies walk.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        &world.path
    }

    /// Provides read-only access to the playfield dimensions.
    #[must_use]
    pub fn playfield(world: &World) -> &Playfield {
        &world.playfield
    }

    /// Finds the first tower whose selection disc contains the point.
    #[must_use]
    pub fn tower_at(world: &World, point: Vec2) -> Option<TowerId> {
        world.towers.tower_at(point)
    }

    /// Reports the currently selected tower, if any.
    #[must_use]
    pub fn selected_tower(world: &World) -> Option<TowerId> {
        world.towers.selected()
    }

    /// Number of enemies currently walking the path.
    #[must_use]
    pub fn live_enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Index of the most recent tick.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Path Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! Game constants live here as immutable statics so every crate resolves the
//! same tower and enemy tables.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of simulation ticks executed per second of wall-clock time.
pub const TICKS_PER_SECOND: u32 = 60;

/// Lives granted when a session starts.
pub const STARTING_LIVES: u32 = 20;

/// Money granted when a session starts.
pub const STARTING_MONEY: Money = Money::new(100);

/// Money awarded whenever a level is cleared.
pub const LEVEL_BONUS: Money = Money::new(50);

/// Highest level a session must clear; advancing past it wins the session.
pub const FINAL_LEVEL: u32 = 20;

/// Ticks that must elapse between consecutive enemy spawns.
pub const SPAWN_INTERVAL_TICKS: u32 = 60;

/// Distance a projectile travels each tick.
pub const PROJECTILE_SPEED: f32 = 15.0;

/// Projectiles hit enemies strictly closer than this radius.
pub const PROJECTILE_HIT_RADIUS: f32 = 15.0;

/// Pointer presses strictly closer than this radius select an existing tower.
pub const TOWER_SELECTION_RADIUS: f32 = 20.0;

/// Horizontal offset of the first selection-strip button.
pub const STRIP_BUTTON_MARGIN: f32 = 10.0;

/// Horizontal distance between consecutive selection-strip buttons.
pub const STRIP_BUTTON_PITCH: f32 = 60.0;

/// Width of a single selection-strip button.
pub const STRIP_BUTTON_WIDTH: f32 = 50.0;

/// Rectangular playing field shared by the world and adapters.
pub const PLAYFIELD: Playfield = Playfield::new(800.0, 600.0, 60.0);

const PATH_WAYPOINTS: [(f32, f32); 8] = [
    (0.0, 300.0),
    (200.0, 300.0),
    (200.0, 100.0),
    (400.0, 100.0),
    (400.0, 500.0),
    (600.0, 500.0),
    (600.0, 300.0),
    (800.0, 300.0),
];

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Discards the current session and starts a fresh one.
    ResetSession,
    /// Advances the simulation clock by a single tick.
    Tick,
    /// Requests that an enemy of the provided kind enters at the start of the path.
    SpawnEnemy {
        /// Tier of the enemy to create.
        kind: EnemyKind,
    },
    /// Moves every live enemy one step along the path and resolves leaks.
    AdvanceEnemies,
    /// Counts every tower's firing cooldown down by one tick.
    CoolTowers,
    /// Requests that a tower fires at the current position of an enemy.
    FireProjectile {
        /// Identifier of the tower attempting to fire.
        tower: TowerId,
        /// Identifier of the enemy the tower aims at.
        target: EnemyId,
    },
    /// Moves every projectile and resolves hits against live enemies.
    AdvanceProjectiles,
    /// Concludes the current level and starts the next one.
    AdvanceLevel,
    /// Requests placement of a tower at the provided position.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Centre of the tower in world units.
        position: Vec2,
    },
    /// Requests that an existing tower is sold for a partial refund.
    SellTower {
        /// Identifier of the tower targeted for sale.
        tower: TowerId,
    },
    /// Marks a tower as the single selected tower.
    SelectTower {
        /// Identifier of the tower to select.
        tower: TowerId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a fresh session started.
    SessionReset,
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just began.
        tick: u64,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
        /// Tier of the new enemy.
        kind: EnemyKind,
    },
    /// Reports that an enemy walked past the last waypoint.
    EnemyLeaked {
        /// Identifier of the enemy that leaked.
        enemy: EnemyId,
        /// Lives remaining after the leak was charged.
        lives_remaining: u32,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Centre of the tower in world units.
        position: Vec2,
        /// Money deducted for the placement.
        cost: Money,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Position provided in the placement request.
        position: Vec2,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower was sold.
    TowerSold {
        /// Identifier of the tower that was removed.
        tower: TowerId,
        /// Money returned to the player.
        refund: Money,
    },
    /// Reports that a tower sale request was rejected.
    TowerSaleRejected {
        /// Identifier of the tower targeted for sale.
        tower: TowerId,
        /// Specific reason the sale failed.
        reason: SaleError,
    },
    /// Confirms that a tower became the selected tower.
    TowerSelected {
        /// Identifier of the selected tower.
        tower: TowerId,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Enemy the tower aimed at.
        target: EnemyId,
        /// Direction of travel in radians.
        heading: f32,
    },
    /// Reports that a projectile damaged an enemy without depleting it.
    EnemyDamaged {
        /// Enemy that was hit.
        enemy: EnemyId,
        /// Damage applied by the projectile.
        damage: u32,
        /// Health remaining after the hit.
        remaining: Health,
    },
    /// Reports that lethal damage demoted an enemy into a weaker tier.
    EnemyDemoted {
        /// Enemy slot that now holds the weaker tier.
        enemy: EnemyId,
        /// Tier that was depleted.
        from: EnemyKind,
        /// Tier revealed at full health.
        to: EnemyKind,
        /// Money granted for depleting the former tier.
        reward: Money,
    },
    /// Reports that an enemy was destroyed outright.
    EnemyKilled {
        /// Enemy that was removed.
        enemy: EnemyId,
        /// Tier of the removed enemy.
        kind: EnemyKind,
        /// Money granted for the kill.
        reward: Money,
    },
    /// Reports that a projectile left the playfield without hitting anything.
    ProjectileExpired {
        /// Projectile that was removed.
        projectile: ProjectileId,
    },
    /// Announces that the previous level was cleared.
    LevelAdvanced {
        /// Level that is now active.
        level: u32,
        /// Money awarded for clearing the previous level.
        bonus: Money,
    },
    /// Announces that the session reached a terminal state.
    SessionEnded {
        /// Terminal state the session entered.
        state: SessionState,
    },
}

/// Lifecycle of a single game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// The session is running and accepts gameplay commands.
    #[default]
    Playing,
    /// Every life was lost.
    Lost,
    /// Every level was cleared.
    Won,
}

impl SessionState {
    /// Reports whether the session has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

/// Amount of in-game currency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Money(u32);

impl Money {
    /// Wraps a raw currency amount.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw currency amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds two amounts, clamping at the representable maximum.
    #[must_use]
    pub const fn saturating_add(self, other: Money) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts `other`, returning `None` when funds are insufficient.
    #[must_use]
    pub const fn checked_sub(self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

/// Remaining or maximum health of an enemy.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Health(u32);

impl Health {
    /// Wraps a raw health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw health value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no health remains.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }

    /// Subtracts damage without dropping below zero.
    #[must_use]
    pub const fn saturating_sub(self, damage: u32) -> Self {
        Self(self.0.saturating_sub(damage))
    }
}

/// Byte RGB triple used by the type tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy slot.
///
/// A demoted enemy keeps the identifier of the slot it replaced, so
/// identifiers grow in spawn order and match live iteration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Cheap, fast-firing tower with a short reach.
    Basic,
    /// Long-range tower with a slow rate of fire.
    Sniper,
    /// Heavy tower dealing large damage per shot.
    Cannon,
}

impl TowerKind {
    /// Every tower kind in selection-strip order.
    pub const ALL: [TowerKind; 3] = [TowerKind::Basic, TowerKind::Sniper, TowerKind::Cannon];

    /// Resolves the immutable stat row for the tower kind.
    #[must_use]
    pub fn stats(self) -> &'static TowerStats {
        match self {
            Self::Basic => &BASIC_TOWER,
            Self::Sniper => &SNIPER_TOWER,
            Self::Cannon => &CANNON_TOWER,
        }
    }

    /// Tower kind shown at the provided selection-strip slot.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Money returned when a tower of this kind is sold.
    ///
    /// The refund is 80% of the cost, rounded down.
    #[must_use]
    pub fn refund(self) -> Money {
        let cost = u64::from(self.stats().cost.get());
        Money::new((cost * 4 / 5) as u32)
    }
}

/// Immutable stat row describing a tower kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Display name shown by the selection UI.
    pub name: &'static str,
    /// Money required to place the tower.
    pub cost: Money,
    /// Damage carried by each projectile.
    pub damage: u32,
    /// Targeting radius in world units, inclusive.
    pub range: f32,
    /// Ticks between consecutive shots.
    pub fire_rate: u32,
    /// Color shared by the tower and its projectiles.
    pub color: Rgb,
}

const BASIC_TOWER: TowerStats = TowerStats {
    name: "Basic",
    cost: Money::new(50),
    damage: 2,
    range: 100.0,
    fire_rate: 30,
    color: Rgb::from_rgb(0, 0, 255),
};

const SNIPER_TOWER: TowerStats = TowerStats {
    name: "Sniper",
    cost: Money::new(100),
    damage: 6,
    range: 200.0,
    fire_rate: 60,
    color: Rgb::from_rgb(0, 255, 0),
};

const CANNON_TOWER: TowerStats = TowerStats {
    name: "Cannon",
    cost: Money::new(150),
    damage: 10,
    range: 150.0,
    fire_rate: 90,
    color: Rgb::from_rgb(255, 0, 0),
};

/// Enemy tiers ordered from weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Lowest tier; removed outright when depleted.
    Weak,
    /// Middle tier; demotes into [`EnemyKind::Weak`].
    Medium,
    /// Highest tier; demotes into [`EnemyKind::Medium`].
    Strong,
}

impl EnemyKind {
    /// Health a freshly created enemy of this tier starts with.
    #[must_use]
    pub const fn max_health(self) -> Health {
        match self {
            Self::Weak => Health::new(10),
            Self::Medium => Health::new(30),
            Self::Strong => Health::new(150),
        }
    }

    /// Money granted when this tier is depleted.
    #[must_use]
    pub const fn reward(self) -> Money {
        match self {
            Self::Weak => Money::new(10),
            Self::Medium => Money::new(20),
            Self::Strong => Money::new(50),
        }
    }

    /// Distance travelled along the path each tick.
    #[must_use]
    pub const fn speed(self) -> f32 {
        1.5
    }

    /// Tier revealed when this tier is depleted, if any.
    #[must_use]
    pub const fn demoted(self) -> Option<Self> {
        match self {
            Self::Strong => Some(Self::Medium),
            Self::Medium => Some(Self::Weak),
            Self::Weak => None,
        }
    }
}

/// Ordered waypoints every enemy follows from entry to exit.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    /// Creates a path from the provided waypoints.
    #[must_use]
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints }
    }

    /// The fixed route used by every session.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            PATH_WAYPOINTS
                .iter()
                .map(|&(x, y)| Vec2::new(x, y))
                .collect(),
        )
    }

    /// Waypoints in travel order.
    #[must_use]
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Retrieves the waypoint at `index`, if present.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }

    /// Entry point where enemies spawn.
    #[must_use]
    pub fn start(&self) -> Vec2 {
        self.waypoints.first().copied().unwrap_or(Vec2::ZERO)
    }

    /// Index of the final waypoint.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }
}

/// Axis-aligned playing field with a reserved selection strip along the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    width: f32,
    height: f32,
    strip_height: f32,
}

impl Playfield {
    /// Creates a new playfield descriptor.
    #[must_use]
    pub const fn new(width: f32, height: f32, strip_height: f32) -> Self {
        Self {
            width,
            height,
            strip_height,
        }
    }

    /// Width of the field in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the field in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Height of the selection strip reserved along the bottom edge.
    #[must_use]
    pub const fn strip_height(&self) -> f32 {
        self.strip_height
    }

    /// Vertical coordinate where the selection strip begins.
    #[must_use]
    pub const fn strip_top(&self) -> f32 {
        self.height - self.strip_height
    }

    /// Reports whether the point lies within the field, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Reports whether the point lies inside the selection strip.
    #[must_use]
    pub fn in_selection_strip(&self, point: Vec2) -> bool {
        point.y > self.strip_top()
    }

    /// Selection-strip slot addressed by a horizontal pointer coordinate.
    ///
    /// Slots are `STRIP_BUTTON_PITCH` units apart starting at
    /// `STRIP_BUTTON_MARGIN`; coordinates left of the first slot map to none.
    #[must_use]
    pub fn strip_slot(&self, x: f32) -> Option<usize> {
        let slot = ((x - STRIP_BUTTON_MARGIN) / STRIP_BUTTON_PITCH).floor();
        if slot < 0.0 || !slot.is_finite() {
            return None;
        }
        Some(slot as usize)
    }
}

/// Pointer buttons reported by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Left button.
    Primary,
    /// Wheel button.
    Middle,
    /// Right button.
    Secondary,
    /// Any other button identifier.
    Other(u8),
}

impl PointerButton {
    /// Maps a platform button identifier (1 = left, 2 = middle, 3 = right).
    #[must_use]
    pub const fn from_id(id: u8) -> Self {
        match id {
            1 => Self::Primary,
            2 => Self::Middle,
            3 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Discrete input drained once per tick before the simulation advances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer button was pressed.
    PointerDown {
        /// Pointer location in world units.
        position: Vec2,
        /// Button that was pressed.
        button: PointerButton,
    },
    /// A key was pressed.
    KeyDown {
        /// Character produced by the key.
        key: char,
    },
    /// The player asked to close the game.
    QuitRequested,
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The player cannot afford the tower.
    #[error("tower costs {cost:?} but only {available:?} is available")]
    InsufficientFunds {
        /// Cost of the requested tower.
        cost: Money,
        /// Money held when the request was made.
        available: Money,
    },
    /// The requested position lies outside the play area.
    #[error("tower position lies outside the play area")]
    OutOfBounds,
}

/// Reasons a tower sale request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SaleError {
    /// No tower with the provided identifier exists.
    #[error("no tower with the requested identifier exists")]
    MissingTower,
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Centre of the tower in world units.
    pub position: Vec2,
    /// Ticks remaining before the tower may fire again.
    pub cooldown_remaining: u32,
    /// Indicates whether the player selected this tower.
    pub selected: bool,
}

/// Read-only snapshot describing all live towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of `tower`, if it is live.
    #[must_use]
    pub fn get(&self, tower: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&tower, |snapshot| snapshot.id)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    /// Number of towers captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no towers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy slot.
    pub id: EnemyId,
    /// Current tier of the enemy.
    pub kind: EnemyKind,
    /// Position in world units.
    pub position: Vec2,
    /// Health remaining.
    pub health: Health,
    /// Health the current tier started with.
    pub max_health: Health,
    /// Index of the last waypoint the enemy consumed.
    pub waypoint_index: usize,
}

impl EnemySnapshot {
    /// Fraction of health remaining, used for health bars.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_health.is_depleted() {
            return 0.0;
        }
        self.health.get() as f32 / self.max_health.get() as f32
    }
}

/// Read-only snapshot describing all live enemies in live iteration order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view preserving the provided order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EnemySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in live order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemies are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Position in world units.
    pub position: Vec2,
    /// Direction of travel in radians.
    pub heading: f32,
    /// Damage delivered on hit.
    pub damage: u32,
    /// Color inherited from the firing tower.
    pub color: Rgb,
}

/// Player-facing counters for the active session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Money available for placements.
    pub money: Money,
    /// Lives remaining before the session is lost.
    pub lives: u32,
    /// Level currently being played.
    pub level: u32,
    /// Lifecycle state of the session.
    pub state: SessionState,
}

/// Everything a renderer needs to draw a single frame.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    /// Live towers in placement order.
    pub towers: TowerView,
    /// Live enemies in live order.
    pub enemies: EnemyView,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Player counters.
    pub session: SessionSnapshot,
}

/// Target assignment computed for a tower during the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that acquired the target.
    pub tower: TowerId,
    /// Enemy chosen as the target.
    pub enemy: EnemyId,
    /// Centre of the tower in world units.
    pub tower_position: Vec2,
    /// Position of the enemy when it was acquired.
    pub enemy_position: Vec2,
}

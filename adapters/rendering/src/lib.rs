#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Path Defence adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use path_defence_core::{
    EnemyId, EnemyKind, FrameSnapshot, InputEvent, Path, Playfield, Rgb, SessionSnapshot,
    SessionState, TowerId, TowerKind, STRIP_BUTTON_MARGIN, STRIP_BUTTON_PITCH, STRIP_BUTTON_WIDTH,
};
use std::time::Duration;
use thiserror::Error;

/// Radius of the disc drawn for every tower.
pub const TOWER_RADIUS: f32 = 20.0;

/// Radius of the disc drawn for every enemy.
pub const ENEMY_RADIUS: f32 = 10.0;

/// Radius of the dot drawn for every projectile.
pub const PROJECTILE_RADIUS: f32 = 5.0;

/// Width of the health bar drawn above every enemy.
pub const HEALTH_BAR_WIDTH: f32 = 30.0;

/// Height of the health bar drawn above every enemy.
pub const HEALTH_BAR_HEIGHT: f32 = 5.0;

/// Offset from an enemy's centre to the top-left corner of its health bar.
pub const HEALTH_BAR_OFFSET: Vec2 = Vec2::new(-15.0, -20.0);

/// Line width of the path polyline.
pub const PATH_WIDTH: f32 = 2.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white used to clear the playfield.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque black used behind health bars.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Grey used for the range ring of the selected tower.
    pub const GREY: Self = Self::from_rgb_u8(128, 128, 128);
    /// Green used for the path and the filled part of health bars.
    pub const GREEN: Self = Self::from_rgb_u8(0, 255, 0);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

/// Display color of an enemy tier.
///
/// Tiers are game state; their colors are a presentation concern and live here.
#[must_use]
pub const fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Weak => Color::from_rgb_u8(0, 0, 255),
        EnemyKind::Medium => Color::from_rgb_u8(0, 255, 0),
        EnemyKind::Strong => Color::from_rgb_u8(255, 0, 0),
    }
}

/// Input drained by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Discrete input events captured since the previous frame, in arrival order.
    pub events: Vec<InputEvent>,
}

/// Tells the backend whether to keep presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Present the updated scene and continue.
    Continue,
    /// Stop presenting and return from [`RenderingBackend::run`].
    Exit,
}

/// Validated playfield dimensions used by backends to size their output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayfieldPresentation {
    /// Width of the drawable area in world units.
    pub width: f32,
    /// Height of the drawable area in world units, strip included.
    pub height: f32,
    /// Height of the selection strip along the bottom edge.
    pub strip_height: f32,
}

impl PlayfieldPresentation {
    /// Validates the provided playfield for presentation.
    pub fn new(playfield: &Playfield) -> Result<Self, RenderingError> {
        let (width, height) = (playfield.width(), playfield.height());
        if !(width > 0.0 && height > 0.0) {
            return Err(RenderingError::InvalidPlayfield { width, height });
        }

        let strip_height = playfield.strip_height();
        if !(0.0..height).contains(&strip_height) {
            return Err(RenderingError::InvalidStrip {
                strip_height,
                height,
            });
        }

        Ok(Self {
            width,
            height,
            strip_height,
        })
    }

    /// Vertical coordinate where the selection strip begins.
    #[must_use]
    pub fn strip_top(&self) -> f32 {
        self.height - self.strip_height
    }
}

/// Path drawn as a polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePath {
    /// Waypoints in travel order.
    pub waypoints: Vec<Vec2>,
    /// Line color.
    pub color: Color,
    /// Line width in world units.
    pub width: f32,
}

impl ScenePath {
    fn new(path: &Path) -> Self {
        Self {
            waypoints: path.waypoints().to_vec(),
            color: Color::GREEN,
            width: PATH_WIDTH,
        }
    }
}

/// Outline circle showing how far the selected tower reaches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeRing {
    /// Targeting range of the tower.
    pub radius: f32,
    /// Outline color.
    pub color: Color,
}

/// Tower drawn as a disc in its kind's color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTower {
    /// Identifier of the tower.
    pub id: TowerId,
    /// Kind of the tower.
    pub kind: TowerKind,
    /// Centre of the tower disc.
    pub position: Vec2,
    /// Radius of the disc.
    pub radius: f32,
    /// Fill color of the disc.
    pub color: Color,
    /// Range ring, present only for the selected tower.
    pub range_ring: Option<RangeRing>,
}

/// Health bar drawn above an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    /// Top-left corner of the bar.
    pub origin: Vec2,
    /// Full width of the bar.
    pub width: f32,
    /// Height of the bar.
    pub height: f32,
    /// Width of the filled part, proportional to the health left.
    pub filled_width: f32,
    /// Color of the empty part.
    pub background: Color,
    /// Color of the filled part.
    pub fill: Color,
}

impl HealthBar {
    fn above(position: Vec2, health_ratio: f32) -> Self {
        Self {
            origin: position + HEALTH_BAR_OFFSET,
            width: HEALTH_BAR_WIDTH,
            height: HEALTH_BAR_HEIGHT,
            filled_width: HEALTH_BAR_WIDTH * health_ratio.clamp(0.0, 1.0),
            background: Color::BLACK,
            fill: Color::GREEN,
        }
    }
}

/// Enemy drawn as a disc with a health bar above it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEnemy {
    /// Identifier of the enemy slot.
    pub id: EnemyId,
    /// Centre of the enemy disc.
    pub position: Vec2,
    /// Radius of the disc.
    pub radius: f32,
    /// Tier color of the disc.
    pub color: Color,
    /// Health bar drawn above the disc.
    pub health_bar: HealthBar,
}

/// Projectile drawn as a small dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneProjectile {
    /// Centre of the dot.
    pub position: Vec2,
    /// Radius of the dot.
    pub radius: f32,
    /// Color inherited from the firing tower.
    pub color: Color,
}

/// Selection-strip button that arms a tower type.
#[derive(Clone, Debug, PartialEq)]
pub struct StripButton {
    /// Tower kind armed by the button.
    pub kind: TowerKind,
    /// Top-left corner of the square button.
    pub origin: Vec2,
    /// Side length of the square button.
    pub size: f32,
    /// Fill color of the button.
    pub color: Color,
    /// Cost label drawn on the button.
    pub label: String,
    /// Whether the kind is currently armed for placement.
    pub armed: bool,
}

/// Lays out one strip button per tower kind in table order.
#[must_use]
pub fn strip_buttons(
    playfield: &PlayfieldPresentation,
    armed: Option<TowerKind>,
) -> Vec<StripButton> {
    TowerKind::ALL
        .iter()
        .enumerate()
        .map(|(slot, kind)| {
            let stats = kind.stats();
            StripButton {
                kind: *kind,
                origin: Vec2::new(
                    STRIP_BUTTON_MARGIN + STRIP_BUTTON_PITCH * slot as f32,
                    playfield.strip_top(),
                ),
                size: STRIP_BUTTON_WIDTH,
                color: stats.color.into(),
                label: stats.cost.get().to_string(),
                armed: armed == Some(*kind),
            }
        })
        .collect()
}

/// Player counters drawn in the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Lives remaining.
    pub lives: u32,
    /// Money available.
    pub money: u32,
    /// Level being played.
    pub level: u32,
}

impl Hud {
    /// Lines of text drawn from top to bottom.
    #[must_use]
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Lives: {}", self.lives),
            format!("Money: ${}", self.money),
            format!("Level: {}", self.level),
        ]
    }
}

impl From<SessionSnapshot> for Hud {
    fn from(session: SessionSnapshot) -> Self {
        Self {
            lives: session.lives,
            money: session.money.get(),
            level: session.level,
        }
    }
}

/// Banner and button text shown over the playfield once a session ends.
#[must_use]
pub const fn outcome_banner(state: SessionState) -> Option<(&'static str, &'static str)> {
    match state {
        SessionState::Playing => None,
        SessionState::Lost => Some(("Game Over", "Play Again")),
        SessionState::Won => Some(("Victory!", "Play Again")),
    }
}

/// Scene description combining the playfield, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Dimensions of the drawable area.
    pub playfield: PlayfieldPresentation,
    /// Route the enemies follow.
    pub path: ScenePath,
    /// Towers in placement order.
    pub towers: Vec<SceneTower>,
    /// Enemies in live order.
    pub enemies: Vec<SceneEnemy>,
    /// Projectiles in flight.
    pub projectiles: Vec<SceneProjectile>,
    /// Tower selection buttons.
    pub strip: Vec<StripButton>,
    /// Player counters.
    pub hud: Hud,
    /// Terminal state reached by the session, if any.
    pub outcome: Option<SessionState>,
}

impl Scene {
    /// Creates an empty scene for the playfield with the path drawn.
    #[must_use]
    pub fn new(playfield: PlayfieldPresentation, path: &Path) -> Self {
        Self {
            playfield,
            path: ScenePath::new(path),
            towers: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            strip: strip_buttons(&playfield, None),
            hud: Hud {
                lives: 0,
                money: 0,
                level: 0,
            },
            outcome: None,
        }
    }

    /// Replaces the dynamic content of the scene with the provided frame.
    pub fn update(&mut self, frame: &FrameSnapshot, armed: Option<TowerKind>) {
        self.towers.clear();
        for tower in frame.towers.iter() {
            let stats = tower.kind.stats();
            let range_ring = tower.selected.then_some(RangeRing {
                radius: stats.range,
                color: Color::GREY,
            });
            self.towers.push(SceneTower {
                id: tower.id,
                kind: tower.kind,
                position: tower.position,
                radius: TOWER_RADIUS,
                color: stats.color.into(),
                range_ring,
            });
        }

        self.enemies.clear();
        for enemy in frame.enemies.iter() {
            self.enemies.push(SceneEnemy {
                id: enemy.id,
                position: enemy.position,
                radius: ENEMY_RADIUS,
                color: enemy_color(enemy.kind),
                health_bar: HealthBar::above(enemy.position, enemy.health_ratio()),
            });
        }

        self.projectiles.clear();
        for projectile in &frame.projectiles {
            self.projectiles.push(SceneProjectile {
                position: projectile.position,
                radius: PROJECTILE_RADIUS,
                color: projectile.color.into(),
            });
        }

        self.strip = strip_buttons(&self.playfield, armed);
        self.hud = Hud::from(frame.session);
        let state = frame.session.state;
        self.outcome = state.is_terminal().then_some(state);
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Path Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the closure asks it to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input drained since the previous frame, and mutates the scene before it
    /// is presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// The playfield must have a positive area.
    #[error("playfield must have a positive area (received {width}x{height})")]
    InvalidPlayfield {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
    /// The selection strip must fit inside the playfield.
    #[error("selection strip of height {strip_height} does not fit a playfield of height {height}")]
    InvalidStrip {
        /// Provided strip height.
        strip_height: f32,
        /// Height of the playfield.
        height: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_defence_core::{
        EnemySnapshot, EnemyView, Health, Money, ProjectileId, ProjectileSnapshot, TowerSnapshot,
        TowerView, PLAYFIELD,
    };

    fn presentation() -> PlayfieldPresentation {
        PlayfieldPresentation::new(&PLAYFIELD).expect("standard playfield is valid")
    }

    fn frame(state: SessionState) -> FrameSnapshot {
        FrameSnapshot {
            towers: TowerView::from_snapshots(vec![
                TowerSnapshot {
                    id: TowerId::new(0),
                    kind: TowerKind::Sniper,
                    position: Vec2::new(100.0, 100.0),
                    cooldown_remaining: 0,
                    selected: true,
                },
                TowerSnapshot {
                    id: TowerId::new(1),
                    kind: TowerKind::Basic,
                    position: Vec2::new(300.0, 100.0),
                    cooldown_remaining: 4,
                    selected: false,
                },
            ]),
            enemies: EnemyView::from_snapshots(vec![EnemySnapshot {
                id: EnemyId::new(3),
                kind: EnemyKind::Strong,
                position: Vec2::new(200.0, 300.0),
                health: Health::new(75),
                max_health: Health::new(150),
                waypoint_index: 1,
            }]),
            projectiles: vec![ProjectileSnapshot {
                id: ProjectileId::new(0),
                position: Vec2::new(120.0, 110.0),
                heading: 0.5,
                damage: 6,
                color: TowerKind::Sniper.stats().color,
            }],
            session: SessionSnapshot {
                money: Money::new(75),
                lives: 12,
                level: 4,
                state,
            },
        }
    }

    #[test]
    fn enemy_palette_matches_tiers() {
        assert_eq!(enemy_color(EnemyKind::Weak), Color::from_rgb_u8(0, 0, 255));
        assert_eq!(
            enemy_color(EnemyKind::Medium),
            Color::from_rgb_u8(0, 255, 0)
        );
        assert_eq!(
            enemy_color(EnemyKind::Strong),
            Color::from_rgb_u8(255, 0, 0)
        );
    }

    #[test]
    fn playfield_presentation_accepts_standard_field() {
        let playfield = presentation();
        assert!((playfield.strip_top() - 540.0).abs() < f32::EPSILON);
    }

    #[test]
    fn playfield_presentation_rejects_degenerate_fields_without_panicking() {
        let error = PlayfieldPresentation::new(&Playfield::new(0.0, 600.0, 60.0))
            .expect_err("zero width must be rejected");
        assert!(matches!(error, RenderingError::InvalidPlayfield { .. }));

        let error = PlayfieldPresentation::new(&Playfield::new(800.0, 50.0, 60.0))
            .expect_err("strip taller than field must be rejected");
        assert!(matches!(error, RenderingError::InvalidStrip { .. }));
    }

    #[test]
    fn strip_buttons_follow_tower_table() {
        let buttons = strip_buttons(&presentation(), Some(TowerKind::Cannon));

        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0].origin, Vec2::new(10.0, 540.0));
        assert_eq!(buttons[1].origin, Vec2::new(70.0, 540.0));
        assert_eq!(buttons[2].origin, Vec2::new(130.0, 540.0));
        let labels: Vec<&str> = buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["50", "100", "150"]);
        assert_eq!(buttons.iter().filter(|button| button.armed).count(), 1);
        assert!(buttons[2].armed);
    }

    #[test]
    fn scene_update_projects_frame_snapshot() {
        let mut scene = Scene::new(presentation(), &Path::standard());
        scene.update(&frame(SessionState::Playing), Some(TowerKind::Basic));

        assert_eq!(scene.path.waypoints.len(), 8);
        assert_eq!(scene.path.color, Color::GREEN);
        assert_eq!(scene.towers.len(), 2);
        assert_eq!(
            scene.towers[0].range_ring,
            Some(RangeRing {
                radius: 200.0,
                color: Color::GREY,
            })
        );
        assert_eq!(scene.towers[1].range_ring, None);
        assert_eq!(scene.towers[0].color, Color::from_rgb_u8(0, 255, 0));
        assert_eq!(scene.enemies.len(), 1);
        assert_eq!(scene.enemies[0].color, Color::from_rgb_u8(255, 0, 0));
        assert_eq!(scene.projectiles.len(), 1);
        assert!(scene.strip[0].armed);
        assert_eq!(
            scene.hud,
            Hud {
                lives: 12,
                money: 75,
                level: 4,
            }
        );
        assert_eq!(scene.outcome, None);
    }

    #[test]
    fn entities_carry_their_draw_sizes() {
        let mut scene = Scene::new(presentation(), &Path::standard());
        scene.update(&frame(SessionState::Playing), None);

        for tower in &scene.towers {
            assert_eq!(tower.radius, TOWER_RADIUS);
        }
        assert_eq!(scene.enemies[0].radius, ENEMY_RADIUS);
        assert_eq!(scene.projectiles[0].radius, PROJECTILE_RADIUS);
        assert_eq!(scene.path.width, PATH_WIDTH);
    }

    #[test]
    fn health_bar_sits_above_enemy_and_fills_by_ratio() {
        let mut scene = Scene::new(presentation(), &Path::standard());
        scene.update(&frame(SessionState::Playing), None);

        let bar = scene.enemies[0].health_bar;
        assert_eq!(bar.origin, Vec2::new(185.0, 280.0));
        assert_eq!(bar.width, HEALTH_BAR_WIDTH);
        assert_eq!(bar.height, HEALTH_BAR_HEIGHT);
        assert!((bar.filled_width - 15.0).abs() < 1e-4);
        assert_eq!(bar.background, Color::BLACK);
        assert_eq!(bar.fill, Color::GREEN);
    }

    #[test]
    fn scene_update_clears_previous_entities() {
        let mut scene = Scene::new(presentation(), &Path::standard());
        scene.update(&frame(SessionState::Playing), None);

        let empty = FrameSnapshot {
            towers: TowerView::default(),
            enemies: EnemyView::default(),
            projectiles: Vec::new(),
            session: frame(SessionState::Lost).session,
        };
        scene.update(&empty, None);

        assert!(scene.towers.is_empty());
        assert!(scene.enemies.is_empty());
        assert!(scene.projectiles.is_empty());
        assert_eq!(scene.outcome, Some(SessionState::Lost));
        assert_eq!(
            outcome_banner(SessionState::Lost),
            Some(("Game Over", "Play Again"))
        );
    }

    #[test]
    fn hud_lines_match_counter_labels() {
        let hud = Hud {
            lives: 20,
            money: 100,
            level: 1,
        };

        assert_eq!(
            hud.lines(),
            ["Lives: 20", "Money: $100", "Level: 1"].map(String::from)
        );
    }
}

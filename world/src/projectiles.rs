//! Straight-line projectiles and their proximity hit test.

use glam::Vec2;
use path_defence_core::{
    Playfield, ProjectileId, ProjectileSnapshot, Rgb, PROJECTILE_HIT_RADIUS, PROJECTILE_SPEED,
};

use crate::enemies::Enemy;

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) position: Vec2,
    pub(crate) heading: f32,
    pub(crate) damage: u32,
    pub(crate) color: Rgb,
}

impl Projectile {
    /// Moves one step along the fixed heading.
    pub(crate) fn advance(&mut self) {
        let (sin, cos) = self.heading.sin_cos();
        self.position += Vec2::new(cos, sin) * PROJECTILE_SPEED;
    }

    /// Index of the first enemy, in live order, within the hit radius.
    pub(crate) fn find_hit(&self, enemies: &[Enemy]) -> Option<usize> {
        enemies
            .iter()
            .position(|enemy| enemy.position.distance(self.position) < PROJECTILE_HIT_RADIUS)
    }

    pub(crate) fn is_out_of_bounds(&self, playfield: &Playfield) -> bool {
        !playfield.contains(self.position)
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            position: self.position,
            heading: self.heading,
            damage: self.damage,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_defence_core::{EnemyId, EnemyKind, Path, PLAYFIELD};

    fn projectile_at(position: Vec2, heading: f32) -> Projectile {
        Projectile {
            id: ProjectileId::new(0),
            position,
            heading,
            damage: 2,
            color: Rgb::from_rgb(0, 0, 255),
        }
    }

    fn enemy_at(id: u32, position: Vec2) -> Enemy {
        let mut enemy = Enemy::spawn(EnemyId::new(id), EnemyKind::Weak, &Path::standard());
        enemy.position = position;
        enemy
    }

    #[test]
    fn advance_travels_fifteen_units_along_heading() {
        let mut projectile = projectile_at(Vec2::new(100.0, 100.0), 0.0);
        projectile.advance();
        assert!((projectile.position - Vec2::new(115.0, 100.0)).length() < 1e-4);

        let mut projectile = projectile_at(Vec2::new(100.0, 100.0), std::f32::consts::PI);
        projectile.advance();
        assert!((projectile.position - Vec2::new(85.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn first_enemy_in_live_order_is_hit() {
        let projectile = projectile_at(Vec2::new(100.0, 100.0), 0.0);
        let enemies = vec![
            enemy_at(0, Vec2::new(300.0, 300.0)),
            enemy_at(1, Vec2::new(110.0, 100.0)),
            enemy_at(2, Vec2::new(100.0, 101.0)),
        ];

        assert_eq!(projectile.find_hit(&enemies), Some(1));
    }

    #[test]
    fn hit_radius_is_exclusive() {
        let projectile = projectile_at(Vec2::new(100.0, 100.0), 0.0);
        let enemies = vec![enemy_at(0, Vec2::new(115.0, 100.0))];

        assert_eq!(projectile.find_hit(&enemies), None);
    }

    #[test]
    fn leaving_the_playfield_is_detected() {
        let inside = projectile_at(Vec2::new(800.0, 600.0), 0.0);
        let outside = projectile_at(Vec2::new(801.0, 300.0), 0.0);

        assert!(!inside.is_out_of_bounds(&PLAYFIELD));
        assert!(outside.is_out_of_bounds(&PLAYFIELD));
    }
}

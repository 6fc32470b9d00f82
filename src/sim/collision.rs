//! Collision detection between the mobile entity sets
//!
//! Everything is axis-aligned bounding-box overlap; the sets hold a few
//! dozen objects, so the pairwise scan is exhaustive.

use super::rect::Rect;
use super::state::{Bullet, Enemy};

/// A bullet/enemy overlap, as indices into the two collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hit {
    pub enemy: usize,
    pub bullet: usize,
}

/// Every (enemy, bullet) pair whose boxes intersect, each exactly once.
///
/// Dead entities are ignored. Pairs come out ordered by enemy index, then
/// bullet index.
pub fn bullet_enemy_hits(bullets: &[Bullet], enemies: &[Enemy]) -> Vec<Hit> {
    let mut hits = Vec::new();
    for (ei, enemy) in enemies.iter().enumerate() {
        if !enemy.alive {
            continue;
        }
        for (bi, bullet) in bullets.iter().enumerate() {
            if bullet.alive && enemy.rect.intersects(&bullet.rect()) {
                hits.push(Hit {
                    enemy: ei,
                    bullet: bi,
                });
            }
        }
    }
    hits
}

/// Index of the first live enemy overlapping the player's box
pub fn player_enemy_hit(player: &Rect, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|e| e.alive && e.rect.intersects(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        let mut e = Enemy::new(id, 0.0);
        e.rect.x = x;
        e.rect.y = y;
        e
    }

    fn bullet_at(id: u32, x: f32, y: f32) -> Bullet {
        let mut b = Bullet::new(id, Vec2::ZERO, Vec2::X);
        b.pos = Vec2::new(x, y);
        b
    }

    #[test]
    fn test_hits_are_exhaustive() {
        let enemies = vec![enemy_at(1, 100.0, 100.0), enemy_at(2, 120.0, 100.0)];
        // Overlaps both enemies, and a second bullet only the first
        let bullets = vec![bullet_at(3, 125.0, 105.0), bullet_at(4, 101.0, 101.0)];

        let hits = bullet_enemy_hits(&bullets, &enemies);
        assert_eq!(
            hits,
            vec![
                Hit { enemy: 0, bullet: 0 },
                Hit { enemy: 0, bullet: 1 },
                Hit { enemy: 1, bullet: 0 },
            ]
        );
    }

    #[test]
    fn test_hits_skip_dead() {
        let mut enemies = vec![enemy_at(1, 100.0, 100.0)];
        let mut bullets = vec![bullet_at(2, 101.0, 101.0)];
        bullets[0].alive = false;
        assert!(bullet_enemy_hits(&bullets, &enemies).is_empty());

        bullets[0].alive = true;
        enemies[0].alive = false;
        assert!(bullet_enemy_hits(&bullets, &enemies).is_empty());
    }

    #[test]
    fn test_player_hit_first_match() {
        let enemies = vec![
            enemy_at(1, 0.0, 0.0),
            enemy_at(2, 640.0, 290.0),
            enemy_at(3, 645.0, 295.0),
        ];
        let player = Rect::from_center(Vec2::new(650.0, 300.0), Vec2::splat(50.0));
        assert_eq!(player_enemy_hit(&player, &enemies), Some(1));
    }

    #[test]
    fn test_player_miss() {
        let enemies = vec![enemy_at(1, 0.0, 0.0)];
        let player = Rect::from_center(Vec2::new(650.0, 300.0), Vec2::splat(50.0));
        assert_eq!(player_enemy_hit(&player, &enemies), None);
    }
}

//! Game state and core simulation types
//!
//! Every entity kind is a plain struct owned by a typed collection on
//! `GameState`. Updates mark entities dead; the tick compacts afterwards.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tick::TickInput;
use crate::consts::*;
use crate::{polar_degrees_to_cartesian, polar_to_cartesian, screen_center};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted; score and lives are frozen
    GameOver,
}

/// Gameplay rules that differ between variants of the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Score awarded per enemy destroyed by a bullet
    pub kill_reward: u64,
    /// Replace destroyed enemies so the population stays constant
    pub respawn_enemies: bool,
    /// Enemies alive at the start of a game
    pub enemy_count: usize,
    /// Background stars
    pub star_count: usize,
    pub starting_lives: u8,
    /// Length of the invincibility window after losing a life
    pub invincibility_ticks: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            kill_reward: 10,
            respawn_enemies: true,
            enemy_count: 8,
            star_count: 100,
            starting_lives: 3,
            invincibility_ticks: 120,
        }
    }
}

/// A background star (cosmetic only)
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed in units per tick
    pub speed: f32,
}

impl Star {
    /// Star at a random position with a random fall speed
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0..=SCREEN_WIDTH as u32) as f32,
                rng.random_range(0..=SCREEN_HEIGHT as u32) as f32,
            ),
            speed: rng.random_range(STAR_MIN_SPEED..=STAR_MAX_SPEED) as f32,
        }
    }

    /// Fall, wrapping to the top at a new random column
    pub fn update(&mut self, rng: &mut impl Rng) {
        self.pos.y += self.speed;
        if self.pos.y > SCREEN_HEIGHT {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0..=SCREEN_WIDTH as u32) as f32;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, STAR_SIZE, STAR_SIZE)
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Orbital angle (radians, unbounded)
    pub angle: f32,
    /// Orbit radius, fixed at construction
    pub radius: f32,
    /// Angular step per tick while a rotate key is held
    pub rotation_speed: f32,
    /// Ticks of invincibility remaining (0 = vulnerable)
    pub invincible_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            radius: PLAYER_ORBIT_RADIUS,
            rotation_speed: PLAYER_ROTATION_SPEED,
            invincible_ticks: 0,
        }
    }

    /// Ship center on screen, always derived from the orbital angle
    pub fn position(&self) -> Vec2 {
        screen_center() + polar_to_cartesian(self.radius, self.angle)
    }

    /// Rotation applied to the sprite (radians). The nose is drawn pointing
    /// up at angle 0, so it stays tangent to the orbit.
    pub fn facing(&self) -> f32 {
        self.angle
    }

    /// Orbit under left/right input
    pub fn update(&mut self, input: &TickInput) {
        if input.rotate_left {
            self.angle -= self.rotation_speed;
        }
        if input.rotate_right {
            self.angle += self.rotation_speed;
        }
    }

    /// Fire a bullet toward the screen center
    pub fn shoot(&self, id: u32) -> Bullet {
        let dir = -polar_to_cartesian(1.0, self.angle);
        let muzzle = self.position() + dir * MUZZLE_OFFSET;
        Bullet::new(id, muzzle, dir)
    }

    /// Back to the starting angle (after a life is lost)
    pub fn reset(&mut self) {
        self.angle = 0.0;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Visibility for the invincibility flicker
    pub fn is_visible(&self) -> bool {
        !self.is_invincible() || (self.invincible_ticks / FLICKER_TICKS) % 2 == 0
    }

    /// Bounds of the rotated ship sprite
    pub fn rect(&self) -> Rect {
        Rect::rotated_bounds(self.position(), Vec2::splat(PLAYER_SIZE), self.facing())
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    /// Top-left of the bounding box
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub alive: bool,
}

impl Bullet {
    /// Bullet whose box is centered horizontally on `muzzle` with its
    /// bottom edge on it, travelling along unit vector `dir`
    pub fn new(id: u32, muzzle: Vec2, dir: Vec2) -> Self {
        Self {
            id,
            pos: Vec2::new(muzzle.x - BULLET_WIDTH / 2.0, muzzle.y - BULLET_HEIGHT),
            vel: dir * BULLET_SPEED,
            alive: true,
        }
    }

    /// Advance one tick; dies once it crosses a screen boundary
    pub fn update(&mut self) {
        if !self.alive {
            return;
        }
        self.pos += self.vel;
        let r = self.rect();
        if r.bottom() < 0.0 || r.top() > SCREEN_HEIGHT || r.left() < 0.0 || r.right() > SCREEN_WIDTH
        {
            self.alive = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// An enemy ship spiralling out from the center
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    /// Polar angle in degrees (unbounded within a spiral)
    pub angle: f32,
    /// Distance from the center; resets to 0 when the enemy leaves the screen
    pub radius: f32,
    /// Degrees per tick
    pub angular_speed: f32,
    /// Units per tick
    pub radial_speed: f32,
    /// Bounding box; its top-left corner sits on the polar point
    pub rect: Rect,
    pub alive: bool,
}

impl Enemy {
    /// Enemy at the center, heading out along `angle` (degrees)
    pub fn new(id: u32, angle: f32) -> Self {
        let mut enemy = Self {
            id,
            angle,
            radius: 0.0,
            angular_speed: ENEMY_ANGULAR_SPEED,
            radial_speed: ENEMY_RADIAL_SPEED,
            rect: Rect::new(0.0, 0.0, ENEMY_WIDTH, ENEMY_HEIGHT),
            alive: true,
        };
        enemy.update_position();
        enemy
    }

    /// Polar point the enemy is anchored to
    pub fn polar_position(&self) -> Vec2 {
        screen_center() + polar_degrees_to_cartesian(self.radius, self.angle)
    }

    fn update_position(&mut self) {
        let p = self.polar_position();
        self.rect.x = p.x;
        self.rect.y = p.y;
    }

    /// Advance the spiral one tick.
    ///
    /// Leaving the screen first wraps the box to the opposite edge; if the
    /// box is still outside after that, the spiral restarts from the center
    /// at a random angle. Both can happen in the same tick.
    pub fn update(&mut self, rng: &mut impl Rng) {
        self.angle += self.angular_speed;
        self.radius += self.radial_speed;
        self.update_position();

        let r = &mut self.rect;
        if r.top() > SCREEN_HEIGHT {
            r.y = -r.h;
        } else if r.bottom() < 0.0 {
            r.y = SCREEN_HEIGHT;
        } else if r.left() > SCREEN_WIDTH {
            r.x = -r.w;
        } else if r.right() < 0.0 {
            r.x = SCREEN_WIDTH;
        }

        if self.rect.is_off_screen() {
            self.radius = 0.0;
            self.angle = rng.random_range(0..360) as f32;
            self.update_position();
        }
    }
}

/// Borrowed view over any drawable entity, in draw order
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Star(&'a Star),
    Player(&'a Player),
    Bullet(&'a Bullet),
    Enemy(&'a Enemy),
}

impl EntityRef<'_> {
    pub fn rect(&self) -> Rect {
        match self {
            EntityRef::Star(s) => s.rect(),
            EntityRef::Player(p) => p.rect(),
            EntityRef::Bullet(b) => b.rect(),
            EntityRef::Enemy(e) => e.rect,
        }
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rules: Rules,
    pub rng: Pcg32,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub stars: Vec<Star>,
    /// Active bullets (in spawn order)
    pub bullets: Vec<Bullet>,
    /// Active enemies (in spawn order)
    pub enemies: Vec<Enemy>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, rules: Rules) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..rules.star_count).map(|_| Star::random(&mut rng)).collect();

        let mut state = Self {
            seed,
            lives: rules.starting_lives,
            rules,
            rng,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::new(),
            stars,
            bullets: Vec::new(),
            enemies: Vec::new(),
            next_id: 1,
        };

        for _ in 0..state.rules.enemy_count {
            state.spawn_enemy();
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an enemy at the center with a random heading
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let angle = self.rng.random_range(0..360) as f32;
        self.enemies.push(Enemy::new(id, angle));
        id
    }

    /// Fire from the player's current position
    pub fn spawn_bullet(&mut self) -> u32 {
        let id = self.next_entity_id();
        let bullet = self.player.shoot(id);
        self.bullets.push(bullet);
        id
    }

    /// Drop entities marked dead during this tick
    pub fn compact(&mut self) {
        self.bullets.retain(|b| b.alive);
        self.enemies.retain(|e| e.alive);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// All live entities in draw order: stars, player, bullets, enemies
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.stars
            .iter()
            .map(EntityRef::Star)
            .chain(std::iter::once(EntityRef::Player(&self.player)))
            .chain(self.bullets.iter().filter(|b| b.alive).map(EntityRef::Bullet))
            .chain(self.enemies.iter().filter(|e| e.alive).map(EntityRef::Enemy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345, Rules::default());
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stars.len(), 100);
        assert_eq!(state.enemies.len(), 8);
        assert!(state.bullets.is_empty());
        for enemy in &state.enemies {
            assert_eq!(enemy.radius, 0.0);
            assert!((0.0..360.0).contains(&enemy.angle));
        }
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = GameState::new(1, Rules::default());
        let a = state.spawn_bullet();
        let b = state.spawn_enemy();
        assert_ne!(a, b);
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.enemies.len());
    }

    #[test]
    fn test_player_orbit_position() {
        let mut player = Player::new();
        assert_eq!(player.position(), Vec2::new(650.0, 300.0));

        let input = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        player.update(&input);
        assert_eq!(player.angle, PLAYER_ROTATION_SPEED);
        let expected = screen_center() + polar_to_cartesian(player.radius, player.angle);
        assert_eq!(player.position(), expected);
    }

    #[test]
    fn test_player_both_keys_cancel() {
        let mut player = Player::new();
        let input = TickInput {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };
        player.update(&input);
        assert_eq!(player.angle, 0.0);
    }

    #[test]
    fn test_shoot_points_at_center() {
        let player = Player::new();
        let bullet = player.shoot(7);
        assert_eq!(bullet.id, 7);
        // At angle 0 the ship sits right of center: bullet heads left
        assert!((bullet.vel - Vec2::new(-BULLET_SPEED, 0.0)).length() < 1e-4);
        let r = bullet.rect();
        assert!((r.center().x - 640.0).abs() < 1e-3);
        assert!((r.bottom() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_player_reset() {
        let mut player = Player::new();
        player.angle = 2.0;
        player.reset();
        assert_eq!(player.angle, 0.0);
        assert_eq!(player.position(), Vec2::new(650.0, 300.0));
    }

    #[test]
    fn test_player_flicker() {
        let mut player = Player::new();
        assert!(player.is_visible());
        player.invincible_ticks = FLICKER_TICKS * 2;
        assert!(player.is_visible());
        player.invincible_ticks = FLICKER_TICKS;
        assert!(!player.is_visible());
    }

    #[test]
    fn test_bullet_dies_off_screen() {
        let mut bullet = Bullet::new(1, Vec2::new(20.0, 300.0), Vec2::new(-1.0, 0.0));
        bullet.update();
        assert!(bullet.alive);
        bullet.update();
        // left edge now below 0
        assert!(!bullet.alive);
        let pos = bullet.pos;
        bullet.update();
        assert_eq!(bullet.pos, pos);
    }

    #[test]
    fn test_enemy_spiral_step() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::new(1, 0.0);
        assert_eq!(enemy.rect.x, 400.0);
        assert_eq!(enemy.rect.y, 300.0);

        enemy.update(&mut rng);
        assert_eq!(enemy.angle, 2.0);
        assert_eq!(enemy.radius, 0.5);
        let expected = screen_center() + polar_degrees_to_cartesian(0.5, 2.0);
        assert_eq!(enemy.rect.x, expected.x);
        assert_eq!(enemy.rect.y, expected.y);
    }

    #[test]
    fn test_enemy_wrap_without_reset() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Straight down, far enough that the box is past the bottom edge
        let mut enemy = Enemy::new(1, 90.0);
        enemy.angular_speed = 0.0;
        enemy.radius = 301.0;
        enemy.update(&mut rng);
        // Wrapped to just above the top edge, spiral kept going
        assert_eq!(enemy.rect.bottom(), 0.0);
        assert_eq!(enemy.radius, 301.5);
    }

    #[test]
    fn test_enemy_wrap_then_reset() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Diagonal: off the bottom and the right edge at once
        let mut enemy = Enemy::new(1, 45.0);
        enemy.angular_speed = 0.0;
        enemy.radius = 600.0;
        enemy.update(&mut rng);
        assert_eq!(enemy.radius, 0.0);
        assert!((0.0..360.0).contains(&enemy.angle));
        assert_eq!(enemy.rect.x, enemy.polar_position().x);
        assert_eq!(enemy.rect.y, enemy.polar_position().y);
    }

    #[test]
    fn test_star_wraps_to_top() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut star = Star {
            pos: Vec2::new(10.0, 599.0),
            speed: 5.0,
        };
        star.update(&mut rng);
        assert_eq!(star.pos.y, 0.0);
        assert!((0.0..=SCREEN_WIDTH).contains(&star.pos.x));
    }

    #[test]
    fn test_entities_draw_order() {
        let state = GameState::new(5, Rules::default());
        let kinds: Vec<u8> = state
            .entities()
            .map(|e| match e {
                EntityRef::Star(_) => 0,
                EntityRef::Player(_) => 1,
                EntityRef::Bullet(_) => 2,
                EntityRef::Enemy(_) => 3,
            })
            .collect();
        assert_eq!(kinds.len(), 100 + 1 + 8);
        assert!(kinds.windows(2).all(|w| w[0] <= w[1]));
    }
}

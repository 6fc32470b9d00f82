//! TCFU - an orbital arcade shooter ("They Crawled from Uranus" replica)
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, motion, collisions, game state)
//! - `session`: Screen state machine (menus, playing, game over)
//! - `sprite`: Sprite strategies (procedural shapes or an external image)
//! - `renderer`: WebGPU rendering pipeline and scene building
//! - `settings`: Data-driven configuration

pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use session::{Flow, Key, Screen, Session};
pub use settings::{Settings, SpriteMode};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Play field dimensions (logical units, origin top-left, y down)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Starfield
    pub const STAR_SIZE: f32 = 2.0;
    pub const STAR_MIN_SPEED: u32 = 1;
    pub const STAR_MAX_SPEED: u32 = 5;

    /// Player ship - orbits the screen center
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_ORBIT_RADIUS: f32 = SCREEN_HEIGHT / 2.0 - 50.0; // min(w, h) / 2 - 50
    pub const PLAYER_ROTATION_SPEED: f32 = 0.05; // radians per tick

    /// Bullets
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 10.0;
    /// Distance from the ship center to the muzzle
    pub const MUZZLE_OFFSET: f32 = 10.0;

    /// Enemies - spiral out from the center
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    pub const ENEMY_ANGULAR_SPEED: f32 = 2.0; // degrees per tick
    pub const ENEMY_RADIAL_SPEED: f32 = 0.5;

    /// Invincibility flicker half-period (ticks)
    pub const FLICKER_TICKS: u32 = 8;
}

/// Center of the play field
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH / 2.0, consts::SCREEN_HEIGHT / 2.0)
}

/// Convert polar (r, theta) to cartesian (x, y), theta in radians
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert polar (r, degrees) to cartesian (x, y)
#[inline]
pub fn polar_degrees_to_cartesian(r: f32, degrees: f32) -> Vec2 {
    polar_to_cartesian(r, degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(10.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-5 && p.y.abs() < 1e-5);

        // y grows downward on screen, so +90 degrees points down
        let p = polar_to_cartesian(10.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-5 && (p.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_polar_degrees_matches_radians() {
        let a = polar_degrees_to_cartesian(42.0, 135.0);
        let b = polar_to_cartesian(42.0, 135.0_f32.to_radians());
        assert_eq!(a, b);
    }

    #[test]
    fn test_orbit_radius() {
        assert_eq!(consts::PLAYER_ORBIT_RADIUS, 250.0);
        assert_eq!(screen_center(), Vec2::new(400.0, 300.0));
    }
}

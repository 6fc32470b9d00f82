//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Hit, bullet_enemy_hits, player_enemy_hit};
pub use rect::Rect;
pub use state::{Bullet, Enemy, EntityRef, GamePhase, GameState, Player, Rules, Star};
pub use tick::{TickInput, TickReport, resolve_collisions, tick};

//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{bullet_enemy_hits, player_enemy_hit};
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Rotate counter-clockwise on screen (held)
    pub rotate_left: bool,
    /// Rotate clockwise on screen (held)
    pub rotate_right: bool,
    /// Fire one bullet (one-shot)
    pub fire: bool,
}

/// What changed during collision resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// IDs of enemies destroyed by bullets
    pub enemies_shot: Vec<u32>,
    /// Enemy that rammed the player, if any
    pub rammed_by: Option<u32>,
    pub life_lost: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    // Frozen once the game is over
    if state.phase == GamePhase::GameOver {
        return TickReport::default();
    }

    state.time_ticks += 1;

    if input.fire {
        state.spawn_bullet();
    }

    for star in &mut state.stars {
        star.update(&mut state.rng);
    }
    state.player.update(input);
    for bullet in &mut state.bullets {
        bullet.update();
    }
    for enemy in &mut state.enemies {
        let before = enemy.radius;
        enemy.update(&mut state.rng);
        if enemy.radius < before {
            log::debug!("Enemy {} restarted its spiral at {}°", enemy.id, enemy.angle);
        }
    }
    state.compact();

    resolve_collisions(state)
}

/// Run bullet/enemy and player/enemy collision checks on the current
/// positions, applying score, lives and respawns
pub fn resolve_collisions(state: &mut GameState) -> TickReport {
    let mut report = TickReport::default();
    if state.phase == GamePhase::GameOver {
        return report;
    }

    // Bullets vs enemies: every enemy and bullet involved is destroyed
    for hit in bullet_enemy_hits(&state.bullets, &state.enemies) {
        let enemy = &mut state.enemies[hit.enemy];
        if enemy.alive {
            enemy.alive = false;
            report.enemies_shot.push(enemy.id);
        }
        state.bullets[hit.bullet].alive = false;
    }
    let kills = report.enemies_shot.len();
    state.score += state.rules.kill_reward * kills as u64;
    state.compact();
    if state.rules.respawn_enemies {
        for _ in 0..kills {
            state.spawn_enemy();
        }
    }

    // Player vs enemies
    if state.player.is_invincible() {
        state.player.invincible_ticks -= 1;
        return report;
    }

    let player_rect = state.player.rect();
    if let Some(index) = player_enemy_hit(&player_rect, &state.enemies) {
        let enemy = state.enemies.remove(index);
        report.rammed_by = Some(enemy.id);
        report.life_lost = true;
        if state.rules.respawn_enemies {
            state.spawn_enemy();
        }

        state.lives = state.lives.saturating_sub(1);
        log::debug!("Rammed by enemy {}, {} lives left", enemy.id, state.lives);

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", state.score);
        } else {
            state.player.invincible_ticks = state.rules.invincibility_ticks;
            state.player.reset();
        }
    }

    report
}

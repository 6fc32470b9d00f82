//! Frame composition
//!
//! Turns the session's current screen into one triangle list in screen space.

use glam::Vec2;

use super::shapes;
use super::text::{line_height, text, text_centered};
use super::vertex::{Vertex, colors};
use crate::consts::SCREEN_HEIGHT;
use crate::session::{Screen, Session};
use crate::sim::{EntityRef, GameState};
use crate::sprite::SpriteSet;

const TITLE_SCALE: f32 = 10.0;
const MENU_SCALE: f32 = 3.0;
const HUD_SCALE: f32 = 3.0;
const INSTRUCTION_SCALE: f32 = 2.0;

const INSTRUCTIONS: [&str; 4] = [
    "Use LEFT and RIGHT arrow keys to rotate.",
    "Press SPACE to shoot.",
    "Avoid enemies and survive as long as possible.",
    "Press ESC to return to the main menu.",
];

/// Build every vertex for the current frame
pub fn build_scene(session: &Session, sprites: &SpriteSet) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    match (session.screen(), session.game()) {
        (Screen::StartMenu, _) => start_menu(&mut vertices),
        (Screen::Instructions, _) => instructions(&mut vertices),
        (Screen::Playing, Some(game)) => {
            world(&mut vertices, game, sprites);
            hud(&mut vertices, game);
        }
        (Screen::GameOver, Some(game)) => {
            world(&mut vertices, game, sprites);
            game_over(&mut vertices, game);
        }
        _ => {}
    }
    vertices
}

/// Entities in draw order: stars, player, bullets, enemies
fn world(out: &mut Vec<Vertex>, game: &GameState, sprites: &SpriteSet) {
    for entity in game.entities() {
        match entity {
            EntityRef::Star(star) => out.extend(shapes::sprite_at(&sprites.star, star.pos)),
            EntityRef::Player(player) => {
                if player.is_visible() {
                    out.extend(shapes::sprite(
                        &sprites.player,
                        player.position(),
                        player.facing(),
                    ));
                }
            }
            EntityRef::Bullet(bullet) => {
                out.extend(shapes::sprite_at(&sprites.bullet, bullet.pos))
            }
            EntityRef::Enemy(enemy) => out.extend(shapes::sprite_at(
                &sprites.enemy,
                Vec2::new(enemy.rect.x, enemy.rect.y),
            )),
        }
    }
}

fn hud(out: &mut Vec<Vertex>, game: &GameState) {
    out.extend(text(
        &format!("SCORE: {}", game.score),
        Vec2::new(10.0, 10.0),
        HUD_SCALE,
        colors::TEXT,
    ));
    out.extend(text(
        &format!("LIVES: {}", game.lives),
        Vec2::new(10.0, 50.0),
        HUD_SCALE,
        colors::TEXT,
    ));
}

fn start_menu(out: &mut Vec<Vertex>) {
    let mid = SCREEN_HEIGHT / 2.0;
    out.extend(text_centered(
        "TCFU",
        SCREEN_HEIGHT / 3.0 - line_height(TITLE_SCALE),
        TITLE_SCALE,
        colors::TEXT,
    ));
    out.extend(text_centered("Press ENTER to Start", mid - 50.0, MENU_SCALE, colors::TEXT));
    out.extend(text_centered("Press I for Instructions", mid, MENU_SCALE, colors::TEXT));
    out.extend(text_centered("Press ESC to Quit", mid + 50.0, MENU_SCALE, colors::TEXT));
}

fn instructions(out: &mut Vec<Vertex>) {
    for (i, line) in INSTRUCTIONS.iter().enumerate() {
        out.extend(text(
            line,
            Vec2::new(20.0, 50.0 + 50.0 * i as f32),
            INSTRUCTION_SCALE,
            colors::TEXT,
        ));
    }
    out.extend(text_centered(
        "Press ESC to return",
        SCREEN_HEIGHT - 50.0,
        MENU_SCALE,
        colors::TEXT,
    ));
}

fn game_over(out: &mut Vec<Vertex>, game: &GameState) {
    let mid = SCREEN_HEIGHT / 2.0;
    out.extend(text_centered("GAME OVER", mid - 120.0, 8.0, colors::TEXT));
    out.extend(text_centered(
        &format!("FINAL SCORE: {}", game.score),
        mid - 20.0,
        MENU_SCALE,
        colors::TEXT,
    ));
    out.extend(text_centered("Press ENTER to Play Again", mid + 30.0, MENU_SCALE, colors::TEXT));
    out.extend(text_centered("Press ESC to Quit", mid + 80.0, MENU_SCALE, colors::TEXT));
}

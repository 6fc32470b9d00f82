//! Screen state machine
//!
//! A `Session` owns the current screen, the pending input for the next
//! tick and, once a game has been started, its `GameState`. The host feeds
//! it key events and calls `update` once per tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GameState, Rules, TickInput, TickReport, tick};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    StartMenu,
    Instructions,
    Playing,
    GameOver,
}

/// Logical keys, already mapped from physical ones by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Held
    RotateLeft,
    /// Held
    RotateRight,
    Fire,
    Confirm,
    Back,
    Instructions,
}

/// Whether the host should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    screen: Screen,
    rules: Rules,
    /// Produces the seed of every new game
    seeds: Pcg32,
    game: Option<GameState>,
    input: TickInput,
}

impl Session {
    /// Start at the menu. A fixed `seed` makes every game of the session
    /// reproducible; otherwise seeds come from the thread RNG.
    pub fn new(rules: Rules, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            screen: Screen::StartMenu,
            rules,
            seeds: Pcg32::seed_from_u64(seed),
            game: None,
            input: TickInput::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The current or most recent game
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Handle a key press. Returns `Flow::Quit` when the player asked to leave.
    pub fn key_pressed(&mut self, key: Key) -> Flow {
        match (self.screen, key) {
            (Screen::StartMenu | Screen::GameOver, Key::Confirm) => self.new_game(),
            (Screen::StartMenu | Screen::GameOver, Key::Back) => return self.quit(),
            (Screen::StartMenu, Key::Instructions) => self.screen = Screen::Instructions,
            (Screen::Instructions, Key::Back) => self.screen = Screen::StartMenu,
            (Screen::Playing, Key::Back) => {
                log::info!("Game abandoned");
                self.input = TickInput::default();
                self.screen = Screen::StartMenu;
            }
            (Screen::Playing, Key::RotateLeft) => self.input.rotate_left = true,
            (Screen::Playing, Key::RotateRight) => self.input.rotate_right = true,
            (Screen::Playing, Key::Fire) => self.input.fire = true,
            _ => {}
        }
        Flow::Continue
    }

    /// Handle a key release (only the rotate keys are held)
    pub fn key_released(&mut self, key: Key) {
        match key {
            Key::RotateLeft => self.input.rotate_left = false,
            Key::RotateRight => self.input.rotate_right = false,
            _ => {}
        }
    }

    /// Advance one tick. Only the playing screen simulates.
    pub fn update(&mut self) -> Option<TickReport> {
        if self.screen != Screen::Playing {
            return None;
        }
        let game = self.game.as_mut()?;
        let report = tick(game, &self.input);
        self.input.fire = false;

        if game.is_over() {
            self.input = TickInput::default();
            self.screen = Screen::GameOver;
        }
        Some(report)
    }

    /// Replace the game with a fresh one and switch to playing
    pub fn new_game(&mut self) {
        let seed = self.seeds.random();
        log::info!("New game (seed {seed})");
        self.game = Some(GameState::new(seed, self.rules.clone()));
        self.input = TickInput::default();
        self.screen = Screen::Playing;
    }

    /// Log the final state and tell the host to stop
    pub fn quit(&mut self) -> Flow {
        match &self.game {
            Some(game) => log::info!("Quitting (last score {})", game.score),
            None => log::info!("Quitting"),
        }
        Flow::Quit
    }
}

//! Game settings
//!
//! Loaded once at startup from an optional JSON file; command-line flags
//! override individual fields afterwards.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sim::Rules;
use crate::sprite::{ImageSprites, ProceduralSprites, SpriteLoader};

/// Where entity sprites come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpriteMode {
    /// Shapes drawn in code
    #[default]
    Procedural,
    /// Enemy decoded from `enemy_image`
    Image,
}

impl SpriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteMode::Procedural => "procedural",
            SpriteMode::Image => "image",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "procedural" | "proc" => Some(SpriteMode::Procedural),
            "image" | "img" => Some(SpriteMode::Image),
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sprite strategy
    pub sprites: SpriteMode,
    /// Enemy image used in `image` mode
    pub enemy_image: PathBuf,
    /// Scoring and population rules
    pub rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sprites: SpriteMode::Procedural,
            enemy_image: PathBuf::from("assets/enemy.png"),
            rules: Rules::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings file {}", path.display()))?;
        Ok(())
    }

    /// Sprite strategy for the configured mode
    pub fn loader(&self) -> Box<dyn SpriteLoader> {
        match self.sprites {
            SpriteMode::Procedural => Box::new(ProceduralSprites),
            SpriteMode::Image => Box::new(ImageSprites::new(self.enemy_image.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sprite_mode_from_str() {
        assert_eq!(SpriteMode::from_str("Image"), Some(SpriteMode::Image));
        assert_eq!(SpriteMode::from_str("procedural"), Some(SpriteMode::Procedural));
        assert_eq!(SpriteMode::from_str("vector"), None);
        assert_eq!(SpriteMode::Image.as_str(), "image");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "sprites": "image", "rules": {{ "kill_reward": 50 }} }}"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.sprites, SpriteMode::Image);
        assert_eq!(settings.enemy_image, PathBuf::from("assets/enemy.png"));
        assert_eq!(settings.rules.kill_reward, 50);
        assert!(settings.rules.respawn_enemies);
        assert_eq!(settings.rules.enemy_count, 8);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.rules.respawn_enemies = false;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_bad_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing settings file"));

        assert!(Settings::load(Path::new("no/such/settings.json")).is_err());
    }

    #[test]
    fn test_loader_matches_mode() {
        let mut settings = Settings::default();
        assert_eq!(settings.loader().describe(), "procedural");
        settings.sprites = SpriteMode::Image;
        settings.enemy_image = PathBuf::from("art/ship.png");
        assert_eq!(settings.loader().describe(), "image (art/ship.png)");
    }
}

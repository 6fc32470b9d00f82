//! Sprite strategies
//!
//! Every entity is drawn from a `Sprite`: a list of colored triangles in the
//! sprite's local box (origin top-left, y down). A `SpriteLoader` builds the
//! full set once at startup, either from procedural shapes or with the enemy
//! taken from an external image.

use std::path::{Path, PathBuf};

use glam::Vec2;
use image::RgbaImage;

use crate::consts::*;
use crate::renderer::vertex::colors;

/// A filled triangle in sprite-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vec2; 3],
    pub color: [f32; 4],
}

/// A drawable shape with its nominal box size
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub size: Vec2,
    pub triangles: Vec<Triangle>,
}

impl Sprite {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            triangles: Vec::new(),
        }
    }

    pub fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.triangles.push(Triangle {
            points: [a, b, c],
            color,
        });
    }

    pub fn push_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let tl = Vec2::new(x, y);
        let tr = Vec2::new(x + w, y);
        let bl = Vec2::new(x, y + h);
        let br = Vec2::new(x + w, y + h);
        self.push_triangle(tl, tr, bl, color);
        self.push_triangle(bl, tr, br, color);
    }

    /// Solid rectangle filling the whole box
    pub fn solid(size: Vec2, color: [f32; 4]) -> Self {
        let mut sprite = Self::new(size);
        sprite.push_rect(0.0, 0.0, size.x, size.y, color);
        sprite
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Sprites for every entity kind
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub player: Sprite,
    pub enemy: Sprite,
    pub bullet: Sprite,
    pub star: Sprite,
}

/// Fatal asset problems, reported before the game loop starts
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("sprite image {path:?} not found")]
    Missing { path: PathBuf },
    #[error("could not decode sprite image {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("sprite image {path:?} has no opaque pixels")]
    Empty { path: PathBuf },
}

/// Strategy that produces the sprite set
pub trait SpriteLoader {
    /// Short description for logs
    fn describe(&self) -> String;

    fn load(&self) -> Result<SpriteSet, AssetError>;
}

/// Shapes drawn in code; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralSprites;

impl ProceduralSprites {
    /// White arrowhead, nose up
    pub fn player() -> Sprite {
        let mut sprite = Sprite::new(Vec2::splat(PLAYER_SIZE));
        sprite.push_triangle(
            Vec2::new(25.0, 0.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(0.0, 50.0),
            colors::PLAYER,
        );
        sprite
    }

    /// Red ship with a small engine block
    pub fn enemy() -> Sprite {
        let mut sprite = Sprite::new(Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT));
        sprite.push_triangle(
            Vec2::new(20.0, 0.0),
            Vec2::new(40.0, 30.0),
            Vec2::new(0.0, 30.0),
            colors::ENEMY,
        );
        sprite.push_rect(15.0, 20.0, 10.0, 5.0, colors::ENEMY);
        sprite
    }

    pub fn bullet() -> Sprite {
        Sprite::solid(Vec2::new(BULLET_WIDTH, BULLET_HEIGHT), colors::BULLET)
    }

    pub fn star() -> Sprite {
        Sprite::solid(Vec2::splat(STAR_SIZE), colors::STAR)
    }
}

impl SpriteLoader for ProceduralSprites {
    fn describe(&self) -> String {
        "procedural".to_string()
    }

    fn load(&self) -> Result<SpriteSet, AssetError> {
        Ok(SpriteSet {
            player: Self::player(),
            enemy: Self::enemy(),
            bullet: Self::bullet(),
            star: Self::star(),
        })
    }
}

/// Enemy sprite decoded from an image file; everything else procedural
#[derive(Debug, Clone)]
pub struct ImageSprites {
    pub enemy_path: PathBuf,
}

impl ImageSprites {
    pub fn new(enemy_path: impl Into<PathBuf>) -> Self {
        Self {
            enemy_path: enemy_path.into(),
        }
    }
}

impl SpriteLoader for ImageSprites {
    fn describe(&self) -> String {
        format!("image ({})", self.enemy_path.display())
    }

    fn load(&self) -> Result<SpriteSet, AssetError> {
        let enemy = load_image_sprite(&self.enemy_path, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))?;
        Ok(SpriteSet {
            enemy,
            ..ProceduralSprites.load()?
        })
    }
}

/// Decode an image file and convert it to a sprite of the given box size
pub fn load_image_sprite(path: &Path, size: Vec2) -> Result<Sprite, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing {
            path: path.to_path_buf(),
        });
    }

    let image = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let sprite = sprite_from_image(&image, size);
    if sprite.is_empty() {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }
    log::info!(
        "Loaded sprite {} ({}x{}, {} triangles)",
        path.display(),
        image.width(),
        image.height(),
        sprite.triangles.len()
    );
    Ok(sprite)
}

/// Turn opaque pixels into quads scaled to `size`.
///
/// Runs of identical pixels on a row are merged into one quad.
pub fn sprite_from_image(image: &RgbaImage, size: Vec2) -> Sprite {
    let mut sprite = Sprite::new(size);
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return sprite;
    }
    let sx = size.x / width as f32;
    let sy = size.y / height as f32;

    for y in 0..height {
        let mut x = 0;
        while x < width {
            let pixel = image.get_pixel(x, y).0;
            if pixel[3] == 0 {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && image.get_pixel(x, y).0 == pixel {
                x += 1;
            }
            sprite.push_rect(
                start as f32 * sx,
                y as f32 * sy,
                (x - start) as f32 * sx,
                sy,
                pixel_color(pixel),
            );
        }
    }

    sprite
}

/// sRGB pixel to the linear color the pipeline expects
fn pixel_color(pixel: [u8; 4]) -> [f32; 4] {
    let linear = |c: u8| (c as f32 / 255.0).powf(2.2);
    [
        linear(pixel[0]),
        linear(pixel[1]),
        linear(pixel[2]),
        pixel[3] as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_procedural_set() {
        let set = ProceduralSprites.load().unwrap();
        assert_eq!(set.player.size, Vec2::splat(50.0));
        assert_eq!(set.enemy.size, Vec2::new(40.0, 30.0));
        assert_eq!(set.enemy.triangles.len(), 3);
        assert_eq!(set.bullet.triangles.len(), 2);
        assert_eq!(set.star.size, Vec2::splat(2.0));
    }

    #[test]
    fn test_image_runs_are_merged() {
        let mut img = RgbaImage::new(4, 2);
        let red = Rgba([255, 0, 0, 255]);
        // Row 0: three red pixels then a transparent one
        for x in 0..3 {
            img.put_pixel(x, 0, red);
        }
        // Row 1: red, blue, transparent, red
        img.put_pixel(0, 1, red);
        img.put_pixel(1, 1, Rgba([0, 0, 255, 255]));
        img.put_pixel(3, 1, red);

        let sprite = sprite_from_image(&img, Vec2::new(40.0, 30.0));
        // 1 quad on row 0, 3 on row 1
        assert_eq!(sprite.triangles.len(), 8);
        // First quad spans three scaled pixels
        let first = sprite.triangles[0];
        assert_eq!(first.points[0], Vec2::new(0.0, 0.0));
        assert_eq!(first.points[1], Vec2::new(30.0, 0.0));
        assert_eq!(first.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_transparent_image_is_empty() {
        let img = RgbaImage::new(8, 8);
        assert!(sprite_from_image(&img, Vec2::splat(10.0)).is_empty());
    }

    #[test]
    fn test_missing_image_is_fatal() {
        let loader = ImageSprites::new("definitely/not/here.png");
        let err = loader.load().unwrap_err();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert!(err.to_string().contains("not found"));
    }
}

//! Shape generation for 2D primitives
//!
//! All positions are in screen space (pixels, y down); the pipeline maps
//! them to clip space when uploading.

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::Rect;
use crate::sprite::Sprite;

/// Generate vertices for a filled axis-aligned rectangle
pub fn quad(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a sprite centered on `center`, rotated by `angle`
/// radians about that center
pub fn sprite(sprite: &Sprite, center: Vec2, angle: f32) -> Vec<Vertex> {
    let half = sprite.size / 2.0;
    let rot = Vec2::from_angle(angle);

    let mut vertices = Vec::with_capacity(sprite.triangles.len() * 3);
    for tri in &sprite.triangles {
        for p in tri.points {
            let world = center + rot.rotate(p - half);
            vertices.push(Vertex::new(world.x, world.y, tri.color));
        }
    }
    vertices
}

/// Generate vertices for an unrotated sprite whose box has its top-left at `top_left`
pub fn sprite_at(s: &Sprite, top_left: Vec2) -> Vec<Vertex> {
    sprite(s, top_left + s.size / 2.0, 0.0)
}

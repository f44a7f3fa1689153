use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size, Vec2};

/// Simulation extent. Actors live in `[0, width - actor.width] x [0, height - actor.height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn clamp_position(&self, position: Vec2, size: Size) -> Vec2 {
        Vec2 {
            x: clamp(position.x, 0.0, self.width - size.width),
            y: clamp(position.y, 0.0, self.height - size.height),
        }
    }
}

/// Visible window onto the world, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Constrains `value` to `[min, max]`. An empty range (`min > max`) resolves to `min`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if max < min || value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Top-left corner of the canvas in world space, centred on `target` and kept inside the world.
pub fn camera_offset(target: Rect, canvas: Canvas, world: World) -> Vec2 {
    let x = target.x - canvas.width / 2.0 + target.width / 2.0;
    let y = target.y - canvas.height / 2.0 + target.height / 2.0;
    Vec2 {
        x: clamp(x, 0.0, world.width - canvas.width),
        y: clamp(y, 0.0, world.height - canvas.height),
    }
}

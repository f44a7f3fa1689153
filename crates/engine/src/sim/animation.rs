use std::fmt;

use super::geometry::Rect;

/// Moving frames per animation frame advance.
pub const FRAME_DURATION_TICKS: u64 = 8;
const PULSE_AMPLITUDE: f32 = 0.1;
const PULSE_RATE: f32 = 0.5;
const COLOR_STEP: (u64, u64, u64) = (40, 85, 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock {
    frame_index: u64,
    tick: u64,
    frame_duration: u64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(FRAME_DURATION_TICKS)
    }
}

impl AnimationClock {
    pub fn new(frame_duration: u64) -> Self {
        Self {
            frame_index: 0,
            tick: 0,
            frame_duration: frame_duration.max(1),
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// `tick` keeps counting across idle frames; only `frame_index` snaps back to zero.
    pub fn advance(&mut self, moving: bool) {
        if !moving {
            self.frame_index = 0;
            return;
        }

        self.tick = self.tick.wrapping_add(1);
        if self.tick % self.frame_duration == 0 {
            self.frame_index = self.frame_index.wrapping_add(1);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPose {
    pub scale: f32,
    pub color: Rgb,
}

impl AnimationPose {
    pub fn from_frame_index(frame_index: u64) -> Self {
        let scale = 1.0 + PULSE_AMPLITUDE * (frame_index as f32 * PULSE_RATE).sin();
        let channel = |step: u64| (frame_index.wrapping_mul(step) % 255) as u8;
        Self {
            scale,
            color: Rgb::new(
                channel(COLOR_STEP.0),
                channel(COLOR_STEP.1),
                channel(COLOR_STEP.2),
            ),
        }
    }

    /// Scaled copy of `hitbox` sharing its centre.
    pub fn display_rect(&self, hitbox: Rect) -> Rect {
        let width = hitbox.width * self.scale;
        let height = hitbox.height * self.scale;
        Rect::new(
            hitbox.x - (width - hitbox.width) / 2.0,
            hitbox.y - (height - hitbox.height) / 2.0,
            width,
            height,
        )
    }
}

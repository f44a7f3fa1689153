use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::app::{Direction, InputState};

use super::animation::{AnimationClock, AnimationPose, Rgb, FRAME_DURATION_TICKS};
use super::bounds::{camera_offset, Canvas, World};
use super::geometry::{Rect, Size, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub position: Vec2,
    pub size: Size,
    pub speed: f32,
    pub frame_duration: u64,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            position: Vec2::new(10.0, 10.0),
            size: Size::new(30.0, 30.0),
            speed: 3.0,
            frame_duration: FRAME_DURATION_TICKS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// A direction key was held, whether or not the move survived.
    pub moving: bool,
    /// Index of the obstacle that forced the rollback.
    pub collided_with: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub rect: Rect,
    pub scale: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone)]
pub struct Actor {
    hitbox: Rect,
    speed: f32,
    animation: AnimationClock,
}

impl Actor {
    pub fn new(config: ActorConfig) -> Self {
        Self {
            hitbox: Rect::from_parts(config.position, config.size),
            speed: config.speed,
            animation: AnimationClock::new(config.frame_duration),
        }
    }

    pub fn rect(&self) -> Rect {
        self.hitbox
    }

    pub fn position(&self) -> Vec2 {
        self.hitbox.position()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn frame_index(&self) -> u64 {
        self.animation.frame_index()
    }

    pub fn tick(&self) -> u64 {
        self.animation.tick()
    }

    /// Reports the animation pose (`frame_index == 0`), not whether keys are held:
    /// it stays true for the first frames of a move until the first frame advance.
    pub fn is_idle(&self) -> bool {
        self.animation.frame_index() == 0
    }

    /// One simulation frame: move by held keys, clamp to the world, and undo the
    /// whole frame's motion if the result overlaps any obstacle.
    ///
    /// Diagonals are not normalised, and a blocked frame with keys held still
    /// advances the animation.
    pub fn update(
        &mut self,
        input: &InputState,
        world: &World,
        obstacles: &[Rect],
    ) -> StepOutcome {
        let saved = self.hitbox.position();
        let moving = self.apply_held_directions(input);

        let clamped = world.clamp_position(self.hitbox.position(), self.hitbox.size());
        self.hitbox = self.hitbox.with_position(clamped);

        let collided_with = obstacles
            .iter()
            .position(|obstacle| self.hitbox.intersects(obstacle));
        if let Some(index) = collided_with {
            trace!(
                obstacle = index,
                x = self.hitbox.x,
                y = self.hitbox.y,
                "actor_collision_rollback"
            );
            self.hitbox = self.hitbox.with_position(saved);
        }

        self.animation.advance(moving);

        StepOutcome {
            moving,
            collided_with,
        }
    }

    fn apply_held_directions(&mut self, input: &InputState) -> bool {
        let mut moving = false;
        for direction in Direction::ALL {
            if !input.is_direction_held(direction) {
                continue;
            }
            let delta = direction.delta();
            self.hitbox.x += delta.x * self.speed;
            self.hitbox.y += delta.y * self.speed;
            moving = true;
        }
        moving
    }

    pub fn render_state(&self) -> RenderState {
        let pose = AnimationPose::from_frame_index(self.animation.frame_index());
        RenderState {
            rect: pose.display_rect(self.hitbox),
            scale: pose.scale,
            color: pose.color,
        }
    }

    pub fn camera_offset(&self, canvas: Canvas, world: World) -> Vec2 {
        camera_offset(self.hitbox, canvas, world)
    }
}

mod actor;
mod animation;
mod bounds;
mod geometry;

pub use actor::{Actor, ActorConfig, RenderState, StepOutcome};
pub use animation::{AnimationClock, AnimationPose, Rgb, FRAME_DURATION_TICKS};
pub use bounds::{camera_offset, clamp, Canvas, World};
pub use geometry::{Rect, Size, Vec2};

pub mod app;
pub mod sim;

pub use app::{
    key_name_for, run_app, world_to_screen, AppError, Direction, FrameView, InputState,
    LoopConfig, LoopMetricsSnapshot, Quad, Renderer, Scene, ScreenRect, Viewport,
};
pub use sim::{
    camera_offset, clamp, Actor, ActorConfig, AnimationClock, AnimationPose, Canvas, Rect,
    RenderState, Rgb, Size, StepOutcome, Vec2, World, FRAME_DURATION_TICKS,
};

mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::{Direction, InputState};
pub use loop_runner::{key_name_for, run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{world_to_screen, Renderer, ScreenRect, Viewport};
pub use scene::{FrameView, Quad, Scene};

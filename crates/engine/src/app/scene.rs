use super::input::InputState;
use crate::sim::{Rect, Rgb, StepOutcome, Vec2};

/// Filled world-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    pub color: Rgb,
}

/// Everything the renderer needs for one frame, finalised by the scene after its step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameView {
    pub camera_offset: Vec2,
    pub clear_color: Rgb,
    pub quads: Vec<Quad>,
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, input: &InputState) -> StepOutcome;
    fn frame(&self) -> FrameView;
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

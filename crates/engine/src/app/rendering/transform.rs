use crate::sim::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Half-open pixel span `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRect {
    pub fn clipped_to(self, viewport: Viewport) -> Option<ScreenRect> {
        let clipped = ScreenRect {
            left: self.left.max(0),
            top: self.top.max(0),
            right: self.right.min(viewport.width as i32),
            bottom: self.bottom.min(viewport.height as i32),
        };
        (clipped.left < clipped.right && clipped.top < clipped.bottom).then_some(clipped)
    }
}

pub fn world_to_screen(rect: Rect, camera_offset: Vec2) -> ScreenRect {
    let left = (rect.x - camera_offset.x).round() as i32;
    let top = (rect.y - camera_offset.y).round() as i32;
    let right = (rect.right() - camera_offset.x).round() as i32;
    let bottom = (rect.bottom() - camera_offset.y).round() as i32;
    ScreenRect {
        left,
        top,
        right,
        bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 400,
        height: 400,
    };

    #[test]
    fn zero_offset_maps_world_to_screen_directly() {
        let screen = world_to_screen(Rect::new(150.0, 150.0, 100.0, 100.0), Vec2::default());
        assert_eq!(
            screen,
            ScreenRect {
                left: 150,
                top: 150,
                right: 250,
                bottom: 250,
            }
        );
    }

    #[test]
    fn camera_offset_shifts_screen_position() {
        let screen = world_to_screen(
            Rect::new(500.0, 300.0, 150.0, 50.0),
            Vec2::new(215.0, 115.0),
        );
        assert_eq!(
            screen,
            ScreenRect {
                left: 285,
                top: 185,
                right: 435,
                bottom: 235,
            }
        );
    }

    #[test]
    fn clipping_trims_to_viewport() {
        let screen = ScreenRect {
            left: -20,
            top: 390,
            right: 30,
            bottom: 450,
        };
        assert_eq!(
            screen.clipped_to(VIEWPORT),
            Some(ScreenRect {
                left: 0,
                top: 390,
                right: 30,
                bottom: 400,
            })
        );
    }

    #[test]
    fn fully_offscreen_rect_clips_to_none() {
        let screen = world_to_screen(Rect::new(600.0, 600.0, 50.0, 50.0), Vec2::default());
        assert_eq!(screen.clipped_to(VIEWPORT), None);
    }
}

use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::FrameView;
use crate::sim::Rgb;

use super::{world_to_screen, ScreenRect, Viewport};

/// Software renderer: a canvas-sized RGBA buffer scaled onto the window surface.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>, viewport: Viewport) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), viewport, size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), self.viewport, width, height)?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        viewport: Viewport,
        surface_width: u32,
        surface_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width, surface_height, window);
        Pixels::new(viewport.width, viewport.height, surface)
    }

    pub fn render(&mut self, view: &FrameView) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }
        draw_frame(self.pixels.frame_mut(), self.viewport, view);
        self.pixels.render()
    }
}

fn draw_frame(frame: &mut [u8], viewport: Viewport, view: &FrameView) {
    clear(frame, view.clear_color);
    for quad in &view.quads {
        let screen = world_to_screen(quad.rect, view.camera_offset);
        if let Some(visible) = screen.clipped_to(viewport) {
            fill_rect(frame, viewport.width as usize, visible, quad.color.to_rgba());
        }
    }
}

fn clear(frame: &mut [u8], color: Rgb) {
    let rgba = color.to_rgba();
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&rgba);
    }
}

fn fill_rect(frame: &mut [u8], width: usize, rect: ScreenRect, color: [u8; 4]) {
    for y in rect.top..rect.bottom {
        let row_start = y as usize * width;
        let start = (row_start + rect.left as usize) * 4;
        let end = (row_start + rect.right as usize) * 4;
        let Some(row) = frame.get_mut(start..end) else {
            return;
        };
        for chunk in row.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Quad;
    use crate::sim::{Rect, Vec2};

    const VIEWPORT: Viewport = Viewport {
        width: 8,
        height: 8,
    };

    fn blank_frame() -> Vec<u8> {
        vec![0; (VIEWPORT.width * VIEWPORT.height * 4) as usize]
    }

    fn pixel(frame: &[u8], x: usize, y: usize) -> [u8; 4] {
        let offset = (y * VIEWPORT.width as usize + x) * 4;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn renderer_type_is_non_generic() {
        let _renderer: Option<Renderer> = None;
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut frame = blank_frame();
        clear(&mut frame, Rgb::new(1, 2, 3));
        assert!(frame.chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
    }

    #[test]
    fn quads_are_offset_by_camera_and_clipped() {
        let mut frame = blank_frame();
        let view = FrameView {
            camera_offset: Vec2::new(2.0, 2.0),
            clear_color: Rgb::new(10, 10, 10),
            quads: vec![Quad {
                rect: Rect::new(8.0, 8.0, 4.0, 4.0),
                color: Rgb::new(200, 0, 0),
            }],
        };
        draw_frame(&mut frame, VIEWPORT, &view);

        assert_eq!(pixel(&frame, 5, 5), [10, 10, 10, 255]);
        assert_eq!(pixel(&frame, 6, 6), [200, 0, 0, 255]);
        assert_eq!(pixel(&frame, 7, 7), [200, 0, 0, 255]);
    }

    #[test]
    fn later_quads_draw_over_earlier_ones() {
        let mut frame = blank_frame();
        let view = FrameView {
            camera_offset: Vec2::default(),
            clear_color: Rgb::default(),
            quads: vec![
                Quad {
                    rect: Rect::new(0.0, 0.0, 4.0, 4.0),
                    color: Rgb::new(128, 128, 128),
                },
                Quad {
                    rect: Rect::new(2.0, 2.0, 2.0, 2.0),
                    color: Rgb::new(0, 255, 0),
                },
            ],
        };
        draw_frame(&mut frame, VIEWPORT, &view);

        assert_eq!(pixel(&frame, 1, 1), [128, 128, 128, 255]);
        assert_eq!(pixel(&frame, 3, 3), [0, 255, 0, 255]);
        assert_eq!(pixel(&frame, 4, 4), [0, 0, 0, 255]);
    }
}

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::sim::Canvas;

use super::metrics::MetricsAccumulator;
use super::{Direction, InputState, Renderer, Scene, Viewport};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub canvas: Canvas,
    pub window_scale: u32,
    pub max_render_fps: Option<u32>,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Overworld".to_string(),
            canvas: Canvas::new(400.0, 400.0),
            window_scale: 2,
            max_render_fps: Some(60),
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Drives `scene` from the host event loop: one step and one render per redraw.
pub fn run_app(config: LoopConfig, mut scene: Box<dyn Scene>) -> Result<(), AppError> {
    let viewport = viewport_for_canvas(config.canvas);
    let window_scale = config.window_scale.max(1);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(window_size_for(viewport, window_scale))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer =
        Renderer::new(Arc::clone(&window), viewport).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);
    let mut input_collector = InputCollector::default();

    scene.load();
    info!(
        canvas_width = viewport.width,
        canvas_height = viewport.height,
        window_scale,
        render_fps_cap = %format_render_cap(effective_render_cap),
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        "loop_config"
    );

    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => {
                    // Key-up events are lost while unfocused.
                    input_collector.release_all();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep =
                        compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    let outcome = scene.update(&input_collector.input);

                    if let Err(error) = renderer.render(&scene.frame()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();

                    let next_title = scene.debug_title();
                    if next_title != last_applied_title {
                        match &next_title {
                            Some(title) => window.set_title(title),
                            None => window.set_title(&config.window_title),
                        }
                        last_applied_title = next_title;
                    }
                    metrics_accumulator.record_frame(raw_frame_dt, outcome);

                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            frame_time_ms = snapshot.frame_time_ms,
                            slowest_frame_ms = snapshot.slowest_frame_ms,
                            moving_frames = snapshot.moving_frames,
                            blocked_frames = snapshot.blocked_frames,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                scene.unload();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    input: InputState,
    quit_requested: bool,
}

impl InputCollector {
    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.handle_physical_key(key_event.physical_key, is_pressed);
    }

    fn handle_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        if code == KeyCode::Escape && is_pressed {
            self.quit_requested = true;
            return;
        }
        let Some(name) = key_name_for(code) else {
            return;
        };
        if is_pressed {
            self.input.key_down(name);
        } else {
            self.input.key_up(name);
        }
    }

    fn release_all(&mut self) {
        self.input.clear();
    }
}

/// Browser-style key name for the keys the simulation reads. WASD alias the arrows.
pub fn key_name_for(code: KeyCode) -> Option<&'static str> {
    let direction = match code {
        KeyCode::ArrowUp | KeyCode::KeyW => Direction::Up,
        KeyCode::ArrowDown | KeyCode::KeyS => Direction::Down,
        KeyCode::ArrowLeft | KeyCode::KeyA => Direction::Left,
        KeyCode::ArrowRight | KeyCode::KeyD => Direction::Right,
        _ => return None,
    };
    Some(direction.key_name())
}

fn viewport_for_canvas(canvas: Canvas) -> Viewport {
    Viewport {
        width: canvas.width.round().max(1.0) as u32,
        height: canvas.height.round().max(1.0) as u32,
    }
}

fn window_size_for(viewport: Viewport, window_scale: u32) -> LogicalSize<f64> {
    LogicalSize::new(
        viewport.width.saturating_mul(window_scale) as f64,
        viewport.height.saturating_mul(window_scale) as f64,
    )
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

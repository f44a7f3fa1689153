use engine::{
    Actor, Canvas, FrameView, InputState, Quad, Rect, Rgb, Scene, StepOutcome, Vec2, World,
};
use tracing::{debug, info};

use super::session::SessionConfig;

const CLEAR_COLOR: Rgb = Rgb::new(255, 255, 255);
const OBSTACLE_COLOR: Rgb = Rgb::new(128, 128, 128);

/// Single-actor session: the actor walks an oversized world around fixed obstacles.
pub(crate) struct OverworldScene {
    session: SessionConfig,
    actor: Actor,
    last_outcome: StepOutcome,
    frame_counter: u64,
}

impl OverworldScene {
    pub(crate) fn new(session: SessionConfig) -> Self {
        let actor = Actor::new(session.actor);
        Self {
            session,
            actor,
            last_outcome: StepOutcome::default(),
            frame_counter: 0,
        }
    }

    fn world(&self) -> World {
        self.session.world
    }

    fn canvas(&self) -> Canvas {
        self.session.canvas
    }

    fn obstacles(&self) -> &[Rect] {
        &self.session.obstacles
    }

    fn camera_offset(&self) -> Vec2 {
        self.actor.camera_offset(self.canvas(), self.world())
    }
}

impl Scene for OverworldScene {
    fn load(&mut self) {
        self.actor = Actor::new(self.session.actor);
        self.last_outcome = StepOutcome::default();
        self.frame_counter = 0;
        info!(
            x = self.actor.position().x,
            y = self.actor.position().y,
            obstacle_count = self.obstacles().len(),
            "scene_loaded"
        );
    }

    fn update(&mut self, input: &InputState) -> StepOutcome {
        let world = self.session.world;
        let outcome = self.actor.update(input, &world, &self.session.obstacles);
        self.frame_counter = self.frame_counter.wrapping_add(1);

        if let Some(obstacle) = outcome.collided_with {
            if self.last_outcome.collided_with != Some(obstacle) {
                debug!(
                    obstacle,
                    x = self.actor.position().x,
                    y = self.actor.position().y,
                    "actor_blocked"
                );
            }
        }
        if outcome.moving != self.last_outcome.moving {
            debug!(moving = outcome.moving, frame = self.frame_counter, "actor_motion_changed");
        }
        self.last_outcome = outcome;
        outcome
    }

    fn frame(&self) -> FrameView {
        let mut quads: Vec<Quad> = self
            .obstacles()
            .iter()
            .map(|obstacle| Quad {
                rect: *obstacle,
                color: OBSTACLE_COLOR,
            })
            .collect();
        let actor = self.actor.render_state();
        quads.push(Quad {
            rect: actor.rect,
            color: actor.color,
        });

        FrameView {
            camera_offset: self.camera_offset(),
            clear_color: CLEAR_COLOR,
            quads,
        }
    }

    fn unload(&mut self) {
        info!(frames = self.frame_counter, "scene_unload");
    }

    fn debug_title(&self) -> Option<String> {
        let position = self.actor.position();
        let camera = self.camera_offset();
        Some(format!(
            "{} | Actor ({:.0}, {:.0}) | Camera ({:.0}, {:.0}) | Frame {}",
            self.session.window_title,
            position.x,
            position.y,
            camera.x,
            camera.y,
            self.actor.frame_index()
        ))
    }
}

#[cfg(test)]
mod tests;

use engine::{LoopConfig, Scene};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::OverworldScene;
use super::session::{load_session_config, SessionConfig};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

/// Returns `None` when the session config cannot be loaded; the failure is already logged.
pub(crate) fn build_app() -> Option<AppWiring> {
    init_tracing();
    info!("=== Overworld Startup ===");

    let session = match load_session_config() {
        Ok(session) => session,
        Err(err) => {
            error!(error = %err, "session_config_failed");
            return None;
        }
    };
    warn_on_degenerate_session(&session);
    info!(
        world_width = session.world.width,
        world_height = session.world.height,
        canvas_width = session.canvas.width,
        canvas_height = session.canvas.height,
        obstacle_count = session.obstacles.len(),
        actor_speed = session.actor.speed,
        "session_ready"
    );

    let config = LoopConfig {
        window_title: session.window_title.clone(),
        canvas: session.canvas,
        window_scale: session.window_scale,
        max_render_fps: session.max_render_fps,
        ..LoopConfig::default()
    };

    Some(AppWiring {
        config,
        scene: Box::new(OverworldScene::new(session)),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn warn_on_degenerate_session(session: &SessionConfig) {
    let actor = session.actor.size;
    if actor.width > session.world.width || actor.height > session.world.height {
        warn!(
            actor_width = actor.width,
            actor_height = actor.height,
            world_width = session.world.width,
            world_height = session.world.height,
            "actor larger than world; position will be pinned to the origin"
        );
    }
    if let Some(obstacle) = session.spawn_overlap() {
        warn!(
            obstacle,
            x = session.actor.position.x,
            y = session.actor.position.y,
            "actor spawns inside an obstacle; every move will be rolled back"
        );
    }
    if session.canvas.width > session.world.width || session.canvas.height > session.world.height {
        warn!(
            canvas_width = session.canvas.width,
            canvas_height = session.canvas.height,
            "canvas larger than world; camera will stay at the origin"
        );
    }
}

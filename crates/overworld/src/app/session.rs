use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine::{ActorConfig, Canvas, Rect, Size, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub(crate) const SESSION_ENV_VAR: &str = "OVERWORLD_SESSION";
const MAX_WINDOW_SCALE: u32 = 16;
const MAX_CANVAS_EXTENT: f32 = 4096.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SessionConfig {
    pub(crate) world: World,
    pub(crate) canvas: Canvas,
    pub(crate) actor: ActorConfig,
    pub(crate) obstacles: Vec<Rect>,
    pub(crate) window_title: String,
    pub(crate) window_scale: u32,
    pub(crate) max_render_fps: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world: World::new(800.0, 800.0),
            canvas: Canvas::new(400.0, 400.0),
            actor: ActorConfig::default(),
            obstacles: vec![
                Rect::new(150.0, 150.0, 100.0, 100.0),
                Rect::new(500.0, 300.0, 150.0, 50.0),
                Rect::new(300.0, 600.0, 200.0, 100.0),
            ],
            window_title: "Overworld".to_string(),
            window_scale: 2,
            max_render_fps: Some(60),
        }
    }
}

impl SessionConfig {
    /// First obstacle overlapping the actor's spawn box. Rollback keeps such an actor stuck.
    pub(crate) fn spawn_overlap(&self) -> Option<usize> {
        let spawn = Rect::from_parts(self.actor.position, self.actor.size);
        self.obstacles
            .iter()
            .position(|obstacle| spawn.intersects(obstacle))
    }
}

#[derive(Debug, Error)]
pub(crate) enum SessionConfigError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to read session config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse session config at {json_path}: {source}")]
    Parse {
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid session config at {field}: {message}")]
    Invalid { field: String, message: String },
}

pub(crate) fn load_session_config() -> Result<SessionConfig, SessionConfigError> {
    load_session_config_from_env_value(env::var(SESSION_ENV_VAR))
}

fn load_session_config_from_env_value(
    value: Result<String, env::VarError>,
) -> Result<SessionConfig, SessionConfigError> {
    match value {
        Ok(raw) => load_session_config_from_path(Path::new(raw.trim())),
        Err(env::VarError::NotPresent) => {
            info!(env_var = SESSION_ENV_VAR, "session_config_defaults");
            Ok(SessionConfig::default())
        }
        Err(source) => Err(SessionConfigError::EnvVar {
            var: SESSION_ENV_VAR,
            source,
        }),
    }
}

pub(crate) fn load_session_config_from_path(
    path: &Path,
) -> Result<SessionConfig, SessionConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| SessionConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_session_json(&raw)?;
    validate_session(&config)?;
    info!(path = %path.display(), "session_config_loaded");
    Ok(config)
}

fn parse_session_json(raw: &str) -> Result<SessionConfig, SessionConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, SessionConfig>(&mut deserializer).map_err(|error| {
        let json_path = error.path().to_string();
        SessionConfigError::Parse {
            json_path,
            source: error.into_inner(),
        }
    })
}

fn validate_session(config: &SessionConfig) -> Result<(), SessionConfigError> {
    require_positive_extent("world", config.world.width, config.world.height)?;
    require_positive_extent("canvas", config.canvas.width, config.canvas.height)?;
    for (axis, value) in [("width", config.canvas.width), ("height", config.canvas.height)] {
        if value > MAX_CANVAS_EXTENT {
            return Err(invalid(
                &format!("canvas.{axis}"),
                format!("expected at most {MAX_CANVAS_EXTENT}, got {value}"),
            ));
        }
    }
    if !(1..=MAX_WINDOW_SCALE).contains(&config.window_scale) {
        return Err(invalid(
            "window_scale",
            format!(
                "expected 1..={MAX_WINDOW_SCALE}, got {}",
                config.window_scale
            ),
        ));
    }
    require_positive_size("actor.size", config.actor.size)?;
    require_finite("actor.position.x", config.actor.position.x)?;
    require_finite("actor.position.y", config.actor.position.y)?;
    require_finite("actor.speed", config.actor.speed)?;
    if config.actor.speed < 0.0 {
        return Err(invalid("actor.speed", "must not be negative"));
    }
    for (index, obstacle) in config.obstacles.iter().enumerate() {
        let field = format!("obstacles[{index}]");
        require_finite(&format!("{field}.x"), obstacle.x)?;
        require_finite(&format!("{field}.y"), obstacle.y)?;
        require_positive_size(&field, obstacle.size())?;
    }
    Ok(())
}

fn require_positive_extent(field: &str, width: f32, height: f32) -> Result<(), SessionConfigError> {
    require_positive_size(field, Size::new(width, height))
}

fn require_positive_size(field: &str, size: Size) -> Result<(), SessionConfigError> {
    for (axis, value) in [("width", size.width), ("height", size.height)] {
        let path = format!("{field}.{axis}");
        require_finite(&path, value)?;
        if value <= 0.0 {
            return Err(invalid(&path, format!("expected positive number, got {value}")));
        }
    }
    Ok(())
}

fn require_finite(field: &str, value: f32) -> Result<(), SessionConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("expected finite number, got {value}")))
    }
}

fn invalid(field: &str, message: impl Into<String>) -> SessionConfigError {
    SessionConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}

use super::*;
use engine::{ActorConfig, Size};

fn small_session(obstacles: Vec<Rect>) -> SessionConfig {
    SessionConfig {
        world: World::new(100.0, 100.0),
        canvas: Canvas::new(40.0, 40.0),
        actor: ActorConfig {
            position: Vec2::new(0.0, 0.0),
            size: Size::new(10.0, 10.0),
            speed: 5.0,
            ..ActorConfig::default()
        },
        obstacles,
        ..SessionConfig::default()
    }
}

fn loaded_scene(obstacles: Vec<Rect>) -> OverworldScene {
    let mut scene = OverworldScene::new(small_session(obstacles));
    scene.load();
    scene
}

fn held(keys: &[&str]) -> InputState {
    let mut input = InputState::new();
    for key in keys {
        input.key_down(key);
    }
    input
}

#[test]
fn update_moves_actor_right() {
    let mut scene = loaded_scene(Vec::new());
    scene.update(&held(&["ArrowRight"]));

    assert_eq!(scene.actor.position(), Vec2::new(5.0, 0.0));
    assert!(scene.last_outcome.moving);
}

#[test]
fn update_is_blocked_by_obstacle() {
    let mut scene = loaded_scene(vec![Rect::new(5.0, 0.0, 10.0, 10.0)]);
    scene.update(&held(&["ArrowRight"]));

    assert_eq!(scene.actor.position(), Vec2::new(0.0, 0.0));
    assert_eq!(scene.last_outcome.collided_with, Some(0));
}

#[test]
fn update_returns_step_outcome_for_metrics() {
    let mut scene = loaded_scene(vec![Rect::new(5.0, 0.0, 10.0, 10.0)]);

    let blocked = scene.update(&held(&["ArrowRight"]));
    assert_eq!(blocked.collided_with, Some(0));
    assert!(blocked.moving);

    let idle = scene.update(&InputState::new());
    assert_eq!(idle, StepOutcome::default());
}

#[test]
fn frame_draws_obstacles_then_actor() {
    let obstacles = vec![
        Rect::new(50.0, 50.0, 10.0, 10.0),
        Rect::new(70.0, 10.0, 5.0, 5.0),
    ];
    let scene = loaded_scene(obstacles.clone());
    let view = scene.frame();

    assert_eq!(view.quads.len(), 3);
    assert_eq!(view.quads[0].rect, obstacles[0]);
    assert_eq!(view.quads[1].rect, obstacles[1]);
    assert_eq!(view.quads[0].color, OBSTACLE_COLOR);
    assert_eq!(view.quads[2].rect, Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(view.quads[2].color, Rgb::new(0, 0, 0));
    assert_eq!(view.clear_color, CLEAR_COLOR);
}

#[test]
fn frame_camera_follows_actor_and_respects_world_edges() {
    let mut scene = loaded_scene(Vec::new());
    assert_eq!(scene.frame().camera_offset, Vec2::new(0.0, 0.0));

    let right_down = held(&["ArrowRight", "ArrowDown"]);
    for _ in 0..30 {
        scene.update(&right_down);
    }
    assert_eq!(scene.actor.position(), Vec2::new(90.0, 90.0));
    assert_eq!(scene.frame().camera_offset, Vec2::new(60.0, 60.0));
}

#[test]
fn releasing_keys_returns_actor_to_idle_pose() {
    let mut scene = loaded_scene(Vec::new());
    let right = held(&["ArrowRight"]);
    for _ in 0..8 {
        scene.update(&right);
    }
    assert_eq!(scene.actor.frame_index(), 1);
    assert_eq!(scene.frame().quads[0].color, Rgb::new(40, 85, 60));

    scene.update(&InputState::new());
    assert_eq!(scene.actor.frame_index(), 0);
    assert!(!scene.last_outcome.moving);
}

#[test]
fn load_resets_actor_to_spawn() {
    let mut scene = loaded_scene(Vec::new());
    scene.update(&held(&["ArrowDown"]));
    assert_eq!(scene.actor.position(), Vec2::new(0.0, 5.0));

    scene.load();
    assert_eq!(scene.actor.position(), Vec2::new(0.0, 0.0));
    assert_eq!(scene.frame_counter, 0);
}

#[test]
fn debug_title_reports_actor_camera_and_frame() {
    let mut scene = loaded_scene(Vec::new());
    scene.update(&held(&["ArrowRight"]));

    assert_eq!(
        scene.debug_title().as_deref(),
        Some("Overworld | Actor (5, 0) | Camera (0, 0) | Frame 0")
    );
}

#[test]
fn default_session_spawn_is_clear_of_obstacles() {
    let session = SessionConfig::default();
    let spawn = Rect::from_parts(session.actor.position, session.actor.size);
    assert!(session
        .obstacles
        .iter()
        .all(|obstacle| !spawn.intersects(obstacle)));
}

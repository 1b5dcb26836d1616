//! Whole-game scenarios driven through the public API

use std::cell::Cell;

use glam::Vec2;
use uwb_pong::platform::replay::{self, ReplayOptions};
use uwb_pong::renderer::{DrawCommand, RecordingSurface};
use uwb_pong::sim::{GameEvent, PaddleSide};
use uwb_pong::{Config, CuePlayer, Game, SilentCue};

const LEFT: &str = "dwm/node/4a96/uplink/location";
const RIGHT: &str = "dwm/node/9a93/uplink/location";

#[derive(Default)]
struct CountingCue {
    count: Cell<u32>,
}

impl CuePlayer for CountingCue {
    fn play_cue(&self) {
        self.count.set(self.count.get() + 1);
    }
}

fn location(x: f32) -> Vec<u8> {
    format!(
        r#"{{"position":{{"x":{},"y":2.4,"z":1.1,"quality":88}},"superFrameNumber":301}}"#,
        x
    )
    .into_bytes()
}

#[test]
fn test_centered_tag_centers_paddle() {
    let mut game = Game::new(Config::default(), 3, 800.0, 600.0);
    game.handle_message(LEFT, &location(6.9)).unwrap();
    game.start(0.0);
    game.step(0.0);

    let paddle = game.state().paddle(PaddleSide::Left);
    assert_eq!(paddle.x, 40.0);
    assert!((paddle.y - 300.0).abs() < 1e-2);
}

#[test]
fn test_ball_travels_one_second() {
    let mut game = Game::new(Config::default(), 3, 800.0, 600.0);
    game.start(0.0);
    game.state_mut().ball.pos = Vec2::new(400.0, 300.0);
    game.state_mut().ball.vel = Vec2::new(-300.0, 0.0);

    let report = game.step(1000.0);
    assert!(report.events.is_empty());
    assert!((game.state().ball.pos - Vec2::new(100.0, 300.0)).length() < 1e-3);
}

#[test]
fn test_rally_between_centered_paddles() {
    let mut game = Game::new(Config::default(), 3, 800.0, 600.0);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let cue = CountingCue::default();

    game.handle_message(LEFT, &location(6.9)).unwrap();
    game.handle_message(RIGHT, &location(6.9)).unwrap();
    game.start(0.0);
    game.state_mut().ball.pos = Vec2::new(400.0, 300.0);
    game.state_mut().ball.vel = Vec2::new(300.0, 0.0);

    let mut hits = Vec::new();
    for i in 1..=400 {
        let report = game.frame(i as f64 * 25.0, &mut surface, &cue);
        hits.extend(report.paddle_hits());
        assert!(report.points().next().is_none());
    }

    // First return comes off the right paddle, then they alternate
    assert!(hits.len() >= 3);
    assert_eq!(hits[0], PaddleSide::Right);
    for pair in hits.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert_eq!(cue.count.get() as usize, hits.len());
    assert_eq!(surface.frames(), 400);
    assert_eq!(game.state().score.left + game.state().score.right, 0);
}

#[test]
fn test_unattended_replay_scores_points() {
    // Paddles parked at the top edge never meet a ball launched from center
    let mut game = Game::new(Config::default(), 2024, 800.0, 600.0);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let options = ReplayOptions {
        linger_ms: 10_000.0,
        ..ReplayOptions::default()
    };
    let summary = replay::run(&mut game, &[], options, &mut surface, &SilentCue);

    assert_eq!(summary.paddle_hits, 0);
    assert!(summary.points.len() >= 5);
    assert_eq!(
        (summary.score.left + summary.score.right) as usize,
        summary.points.len()
    );
    for (t_ms, _) in &summary.points {
        assert!(*t_ms > 1000.0);
    }

    // Score text of the last frame matches the final score
    let texts: Vec<&str> = surface.texts().collect();
    assert_eq!(
        texts,
        [
            summary.score.left.to_string(),
            summary.score.right.to_string()
        ]
    );
}

#[test]
fn test_replay_capture_moves_paddles() {
    let capture = replay::parse_capture(&format!(
        "# two tags walking across the court\n\
         0   {LEFT}  {{\"position\":{{\"x\":6.1,\"y\":0,\"z\":0}}}}\n\
         50  {RIGHT} {{\"position\":{{\"x\":7.7,\"y\":0,\"z\":0}}}}\n\
         100 {LEFT}  {{\"position\":{{\"x\":7.7,\"y\":0,\"z\":0}}}}\n"
    ));
    assert_eq!(capture.len(), 3);

    let mut game = Game::new(Config::default(), 11, 800.0, 600.0);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let summary = replay::run(
        &mut game,
        &capture,
        ReplayOptions::default(),
        &mut surface,
        &SilentCue,
    );

    assert_eq!(summary.delivered, 3);
    assert_eq!(game.state().paddle(PaddleSide::Left).y, 600.0);
    assert_eq!(game.state().paddle(PaddleSide::Right).y, 600.0);

    // Both paddles are drawn at the bottom edge, centred on their y
    let paddle_rects = surface
        .rects()
        .filter(|cmd| matches!(cmd, DrawCommand::Rect { height, .. } if *height == 120.0))
        .count();
    assert_eq!(paddle_rects, 2);
}

#[test]
fn test_custom_namespace_routes_messages() {
    let config = Config::from_json_str(
        r#"{"namespace":"arena","leftPaddleNodeId":"aa01","rightPaddleNodeId":"bb02"}"#,
    )
    .unwrap();
    let mut game = Game::new(config, 0, 800.0, 600.0);

    assert_eq!(
        game.handle_message("arena/node/bb02/uplink/location", &location(7.0))
            .unwrap(),
        PaddleSide::Right
    );
    assert!(game.handle_message(LEFT, &location(7.0)).is_err());

    game.start(0.0);
    let report = game.step(0.0);
    assert!(!report.events.contains(&GameEvent::Scored(PaddleSide::Left)));
    assert!(game.state().paddle(PaddleSide::Right).y > 300.0);
}

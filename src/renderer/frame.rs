//! Frame drawing: background, net, scores, paddles, ball

use super::{Color, Surface};
use crate::consts::*;
use crate::sim::{GameState, PaddleSide};

const BACKGROUND: Color = Color::BLACK;
const FOREGROUND: Color = Color::TERMINAL_GREEN;

/// Draw the whole game state
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    surface.clear(BACKGROUND);
    draw_net(surface, state);
    draw_scores(surface, state);
    for side in PaddleSide::ALL {
        draw_paddle(surface, state, side);
    }
    surface.fill_circle(state.ball.pos, state.ball.radius, FOREGROUND);
}

/// Dashed vertical net down the middle, one cell every two cell heights
fn draw_net<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let court = &state.court;
    let spacing = court.net_height * 2.0;
    let cells = (court.height / spacing).ceil().max(0.0) as usize;
    let x = court.width / 2.0 - court.net_width / 2.0;

    for i in 0..cells {
        surface.fill_rect(
            x,
            i as f32 * spacing,
            court.net_width,
            court.net_height,
            FOREGROUND,
        );
    }
}

fn draw_scores<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let width = state.court.width;
    surface.fill_text(
        &state.score.left.to_string(),
        LEFT_SCORE_X_FRACTION * width,
        SCORE_BASELINE_Y,
        SCORE_FONT_PX,
        FOREGROUND,
    );
    surface.fill_text(
        &state.score.right.to_string(),
        RIGHT_SCORE_X_FRACTION * width,
        SCORE_BASELINE_Y,
        SCORE_FONT_PX,
        FOREGROUND,
    );
}

fn draw_paddle<S: Surface + ?Sized>(surface: &mut S, state: &GameState, side: PaddleSide) {
    let court = &state.court;
    let center = state.paddle(side);
    surface.fill_rect(
        center.x - court.paddle_width / 2.0,
        center.y - court.paddle_height / 2.0,
        court.paddle_width,
        court.paddle_height,
        FOREGROUND,
    );
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::CourtRange;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::{PaddleReadout, tick};

    fn state() -> GameState {
        let mut state = GameState::new(3, 800.0, 600.0, CourtRange::new(6.1, 7.7));
        tick(&mut state, PaddleReadout::new(6.9, 7.7), 0.0);
        state
    }

    #[test]
    fn test_frame_order() {
        let state = state();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_frame(&mut surface, &state);

        let commands = surface.commands();
        assert_eq!(commands[0], DrawCommand::Clear(Color::BLACK));
        // 10 net cells + 2 paddles
        assert_eq!(surface.rects().count(), 12);
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["0", "0"]);
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Circle {
                center: state.ball.pos,
                radius: BALL_RADIUS,
                color: Color::TERMINAL_GREEN,
            })
        );
    }

    #[test]
    fn test_net_cells() {
        let mut state = state();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_net(&mut surface, &state);
        let cells: Vec<_> = surface.rects().cloned().collect();
        assert_eq!(cells.len(), 10);
        assert_eq!(
            cells[1],
            DrawCommand::Rect {
                x: 395.0,
                y: 60.0,
                width: 10.0,
                height: 30.0,
                color: Color::TERMINAL_GREEN,
            }
        );

        // A partial cell at the bottom still gets drawn
        state.court.resize(800.0, 610.0);
        let mut surface = RecordingSurface::new(800.0, 610.0);
        draw_net(&mut surface, &state);
        assert_eq!(surface.rects().count(), 11);
    }

    #[test]
    fn test_scores_and_paddles() {
        let mut state = state();
        state.score.left = 4;
        state.score.right = 11;
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_frame(&mut surface, &state);

        let texts: Vec<_> = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .cloned()
            .collect();
        assert_eq!(
            texts[0],
            DrawCommand::Text {
                text: "4".to_string(),
                x: LEFT_SCORE_X_FRACTION * 800.0,
                y: SCORE_BASELINE_Y,
                font_px: SCORE_FONT_PX,
                color: Color::TERMINAL_GREEN,
            }
        );
        assert!(matches!(&texts[1], DrawCommand::Text { text, .. } if text == "11"));

        // Right paddle is pinned to the bottom (x = 7.7 m)
        let right = state.paddle(PaddleSide::Right);
        assert_eq!(right, Vec2::new(760.0, 600.0));
        assert!(surface.rects().any(|c| *c
            == DrawCommand::Rect {
                x: 745.0,
                y: 540.0,
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
                color: Color::TERMINAL_GREEN,
            }));
    }
}

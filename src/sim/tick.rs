//! Per-frame simulation step
//!
//! One call per animation frame. Input arrives as a `TickInput` command
//! collected between frames and consumed at the start of the step, so the
//! state has a single writer.

use rand::Rng;

use super::collision::{
    ball_lost, brick_deflection, overlaps_rect, paddle_deflection, reflect_off_walls, wall_hit,
};
use super::confetti;
use super::state::{GameEvent, GameState, SessionPhase};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Desired paddle center in game space (last value wins)
    pub paddle_x: Option<f32>,
    /// Launch the resting ball (ignored once in flight)
    pub launch: bool,
}

impl TickInput {
    /// Fold a later command into this one
    pub fn merge(&mut self, later: TickInput) {
        if later.paddle_x.is_some() {
            self.paddle_x = later.paddle_x;
        }
        self.launch |= later.launch;
    }
}

/// Advance the game by one frame.
///
/// `multiplier` is elapsed time in nominal frames (1.0 at 60 Hz); ball and
/// confetti displacement scale with it.
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    multiplier: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let delta = if multiplier.is_finite() {
        multiplier.max(0.0).min(tuning.max_tick_multiplier.max(0.0))
    } else {
        0.0
    };

    match state.phase {
        SessionPhase::NotStarted => {
            apply_paddle_target(state, input);
            // Ball rides on the paddle until launched
            state.ball.pos.x = state.paddle.center_x();

            if input.launch {
                let dir_x = rng.random_range(-1.0f32..1.0);
                if state.ball.launch(dir_x) {
                    state.phase = SessionPhase::Running;
                    events.push(GameEvent::Launched);
                }
            }
        }

        SessionPhase::Running => {
            apply_paddle_target(state, input);
            step_ball(state, delta, tuning, &mut events);

            if state.phase == SessionPhase::Won {
                confetti::spawn_burst(
                    &mut state.confetti,
                    tuning.confetti_burst,
                    state.layout.viewport_width,
                    rng,
                );
            }
        }

        SessionPhase::Won => {
            confetti::update(
                &mut state.confetti,
                state.layout.viewport_width,
                state.layout.viewport_height,
                delta,
                tuning.confetti_burst,
                tuning.confetti_floor,
                rng,
            );
        }

        SessionPhase::Lost => {}
    }

    events
}

fn apply_paddle_target(state: &mut GameState, input: &TickInput) {
    if let Some(x) = input.paddle_x {
        state.paddle.move_to(x, state.layout.viewport_width);
    }
}

/// Integrate the ball and resolve walls, paddle, bottom exit and bricks
fn step_ball(state: &mut GameState, delta: f32, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let layout = state.layout;
    let ball = &mut state.ball;

    ball.pos += ball.dir * ball.speed * delta;

    let hit = wall_hit(ball.pos, ball.radius, layout.viewport_width);
    ball.dir = reflect_off_walls(ball.dir, hit);

    if overlaps_rect(ball.pos, ball.radius, &state.paddle.rect()) {
        ball.dir = paddle_deflection(ball.pos.x, &state.paddle, tuning.paddle_deflection);
    }

    if ball_lost(ball.pos, layout.viewport_height) {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost { lives: state.lives });

        if state.lives == 0 {
            state.phase = SessionPhase::Lost;
            events.push(GameEvent::Lost);
        } else {
            ball.rest_on(&state.paddle, layout.ball_rest_y());
            state.phase = SessionPhase::NotStarted;
        }
        return;
    }

    // Row-major scan, first visible overlap wins
    let pos = ball.pos;
    let radius = ball.radius;
    if let Some(brick) = state
        .bricks
        .iter_mut()
        .find(|b| b.visible && overlaps_rect(pos, radius, &b.rect))
    {
        brick.visible = false;
        ball.dir = brick_deflection(ball.dir);
        events.push(GameEvent::BrickCleared {
            row: brick.row,
            col: brick.col,
        });
    }

    if state.all_cleared() {
        state.phase = SessionPhase::Won;
        events.push(GameEvent::Won);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameState, Tuning, Pcg32) {
        let tuning = Tuning::default();
        let state = GameState::new(Layout::for_width(756), &tuning);
        (state, tuning, Pcg32::seed_from_u64(12345))
    }

    fn launch() -> TickInput {
        TickInput {
            launch: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_not_started_to_running() {
        let (mut state, tuning, mut rng) = setup();

        let events = tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert!(events.is_empty());
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.ball.dir, Vec2::ZERO);

        let events = tick(&mut state, &launch(), 1.0, &tuning, &mut rng);
        assert_eq!(events, vec![GameEvent::Launched]);
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.ball.dir.y, -1.0);
        assert!(state.ball.dir.x >= -1.0 && state.ball.dir.x < 1.0);
    }

    #[test]
    fn test_second_launch_is_noop() {
        let (mut state, tuning, mut rng) = setup();
        tick(&mut state, &launch(), 1.0, &tuning, &mut rng);
        let dir = state.ball.dir;
        let events = tick(&mut state, &launch(), 0.0, &tuning, &mut rng);
        assert!(!events.contains(&GameEvent::Launched));
        assert_eq!(state.ball.dir, dir);
    }

    #[test]
    fn test_resting_ball_tracks_paddle() {
        let (mut state, tuning, mut rng) = setup();
        let input = TickInput {
            paddle_x: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input, 1.0, &tuning, &mut rng);
        assert_eq!(state.paddle.x, 50.0);
        assert_eq!(state.ball.pos.x, 100.0);
        assert_eq!(state.ball.pos.y, state.layout.ball_rest_y());
    }

    #[test]
    fn test_displacement_scales_with_multiplier() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        state.ball.pos = Vec2::new(378.0, 200.0);
        state.ball.dir = Vec2::new(0.0, -1.0);
        tick(&mut state, &TickInput::default(), 2.0, &tuning, &mut rng);
        assert_eq!(state.ball.pos, Vec2::new(378.0, 190.0));
    }

    #[test]
    fn test_paddle_hit_sets_upward_direction() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        // Right quarter of the paddle, moving down onto it
        state.ball.pos = Vec2::new(state.paddle.center_x() + 25.0, 272.0);
        state.ball.dir = Vec2::new(0.0, 1.0);
        tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(state.ball.dir, Vec2::new(0.75, -1.0));
    }

    #[test]
    fn test_brick_hit_clears_one_brick() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        // Directly below brick (3, 0), close enough to touch after one step
        let rect = state.brick(3, 0).unwrap().rect;
        state.ball.pos = Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h + 12.0);
        state.ball.dir = Vec2::new(0.0, -1.0);

        let events = tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(events, vec![GameEvent::BrickCleared { row: 3, col: 0 }]);
        assert!(!state.brick(3, 0).unwrap().visible);
        assert_eq!(state.ball.dir, Vec2::new(0.0, 1.0));
        assert_eq!(state.bricks_remaining(), 39);
    }

    #[test]
    fn test_corner_overlap_resolves_first_in_row_major_order() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        // In the gap between (0,0) and (0,1), touching both
        let left = state.brick(0, 0).unwrap().rect;
        state.ball.pos = Vec2::new(left.x + left.w + 5.0, left.y + 5.0);
        state.ball.dir = Vec2::new(0.0, 0.0001);

        let events = tick(&mut state, &TickInput::default(), 0.0, &tuning, &mut rng);
        assert_eq!(events, vec![GameEvent::BrickCleared { row: 0, col: 0 }]);
        assert!(state.brick(0, 1).unwrap().visible);
    }

    #[test]
    fn test_bottom_exit_costs_a_life_and_reparks() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        state.ball.pos = Vec2::new(20.0, 322.0);
        state.ball.dir = Vec2::new(0.0, 1.0);

        let events = tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(events, vec![GameEvent::LifeLost { lives: 2 }]);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, SessionPhase::NotStarted);
        assert_eq!(state.ball.dir, Vec2::ZERO);
        assert_eq!(state.ball.pos.x, state.paddle.center_x());
    }

    #[test]
    fn test_last_life_loses() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        state.lives = 1;
        state.ball.pos = Vec2::new(20.0, 322.0);
        state.ball.dir = Vec2::new(0.0, 1.0);

        let events = tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(events, vec![GameEvent::LifeLost { lives: 0 }, GameEvent::Lost]);
        assert_eq!(state.phase, SessionPhase::Lost);

        // Frozen afterwards
        let pos = state.ball.pos;
        assert!(tick(&mut state, &launch(), 1.0, &tuning, &mut rng).is_empty());
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_clearing_last_brick_wins_with_confetti() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        for brick in state.bricks.iter_mut().skip(1) {
            brick.visible = false;
        }
        let rect = state.bricks[0].rect;
        state.ball.pos = Vec2::new(rect.x + 10.0, rect.y + rect.h + 10.0);
        state.ball.dir = Vec2::new(0.0, -1.0);

        let events = tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(
            events,
            vec![GameEvent::BrickCleared { row: 0, col: 0 }, GameEvent::Won]
        );
        assert_eq!(state.phase, SessionPhase::Won);
        assert_eq!(state.confetti.len(), tuning.confetti_burst);

        // Physics no longer runs, confetti does
        let ball = state.ball.pos;
        let first = state.confetti[0].pos;
        tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(state.ball.pos, ball);
        assert_ne!(state.confetti[0].pos, first);
    }

    #[test]
    fn test_side_wall_reflects() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        state.ball.pos = Vec2::new(10.0, 250.0);
        state.ball.dir = Vec2::new(-1.0, -1.0);
        tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(state.ball.dir, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_multiplier_is_clamped() {
        let (mut state, tuning, mut rng) = setup();
        state.phase = SessionPhase::Running;
        state.ball.pos = Vec2::new(378.0, 250.0);
        state.ball.dir = Vec2::new(0.0, -1.0);
        tick(&mut state, &TickInput::default(), 100.0, &tuning, &mut rng);
        assert_eq!(state.ball.pos.y, 250.0 - 5.0 * tuning.max_tick_multiplier);
        tick(&mut state, &TickInput::default(), f32::NAN, &tuning, &mut rng);
        assert_eq!(state.ball.pos.y, 250.0 - 5.0 * tuning.max_tick_multiplier);
    }

    #[test]
    fn test_negative_multiplier_cap_does_not_panic() {
        let (mut state, mut tuning, mut rng) = setup();
        tuning.max_tick_multiplier = -1.0;
        state.phase = SessionPhase::Running;
        state.ball.pos = Vec2::new(378.0, 250.0);
        state.ball.dir = Vec2::new(0.0, -1.0);
        tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(state.ball.pos.y, 250.0);

        let tuning = Tuning::from_json(r#"{"max_tick_multiplier": -1.0}"#);
        tick(&mut state, &TickInput::default(), 1.0, &tuning, &mut rng);
        assert_eq!(state.ball.pos.y, 250.0);
    }

    #[test]
    fn test_merge_last_target_wins() {
        let mut pending = TickInput::default();
        pending.merge(TickInput {
            paddle_x: Some(10.0),
            launch: true,
        });
        pending.merge(TickInput {
            paddle_x: Some(20.0),
            launch: false,
        });
        pending.merge(TickInput::default());
        assert_eq!(pending.paddle_x, Some(20.0));
        assert!(pending.launch);
    }
}

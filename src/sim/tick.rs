//! Fixed-cadence simulation tick
//!
//! Advances the session by one step: speed ramp, basket movement, falling
//! objects, catches, misses and difficulty escalation, in that order.

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Movement intents held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one simulation tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Frozen until an explicit restart
    if state.game_over {
        return;
    }

    let previous_score = state.score;

    state.time_ticks += 1;
    if state.time_ticks % SPEED_RAMP_INTERVAL_TICKS == 0 {
        state.speed_multiplier += SPEED_RAMP_STEP;
        state.events.push(GameEvent::SpeedUp {
            multiplier: state.speed_multiplier,
        });
    }

    move_basket(state, input);
    update_objects(state);

    if state.game_over {
        return;
    }

    escalate_difficulty(state, previous_score);

    log::trace!(
        "tick {}: {} objects, score {}, lives {}",
        state.time_ticks,
        state.objects.len(),
        state.score,
        state.lives
    );
}

/// Step the basket for each held intent, staying inside the play area.
/// Left and right are checked independently, so holding both cancels out.
fn move_basket(state: &mut GameState, input: &TickInput) {
    let max_x = state.basket.max_x(state.area);
    let bounds = &mut state.basket.bounds;

    if input.left && bounds.left() > 0 {
        bounds.pos.x = (bounds.pos.x - BASKET_STEP).max(0);
    }
    if input.right && bounds.right() < state.area.width {
        bounds.pos.x = (bounds.pos.x + BASKET_STEP).min(max_x);
    }
}

/// Move every object down, then resolve catches and misses.
/// Walks newest to oldest so removal keeps the remaining indices valid.
fn update_objects(state: &mut GameState) {
    let basket = state.basket.bounds;
    let floor = state.area.height;

    for i in (0..state.objects.len()).rev() {
        let obj = &mut state.objects[i];
        obj.fall();

        if obj.bounds.intersects(&basket) {
            let obj = state.objects.remove(i);
            if obj.kind.is_bomb() {
                state.lives -= 1;
                state.events.push(GameEvent::BombHit {
                    lives_left: state.lives,
                });

                if state.lives <= 0 {
                    state.game_over = true;
                    state.events.push(GameEvent::GameOver { score: state.score });
                    return;
                }
            } else {
                let points = obj.kind.points();
                state.score += points;
                state.events.push(GameEvent::Caught {
                    kind: obj.kind,
                    points,
                });
            }
        } else if obj.bounds.top() > floor {
            let obj = state.objects.remove(i);
            state.events.push(GameEvent::Missed { kind: obj.kind });
        }
    }
}

/// Raise the base difficulty once for every score threshold crossed this tick.
/// A score resting on a threshold does not raise it again.
fn escalate_difficulty(state: &mut GameState, previous_score: u32) {
    let crossed = state.score / DIFFICULTY_SCORE_STEP - previous_score / DIFFICULTY_SCORE_STEP;
    if state.score == 0 || crossed == 0 {
        return;
    }

    state.difficulty += crossed;
    state.events.push(GameEvent::DifficultyUp {
        level: state.difficulty,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{FallingObject, ObjectKind};
    use proptest::prelude::*;

    /// Push an object whose next step lands it on the basket
    fn drop_on_basket(state: &mut GameState, kind: ObjectKind) -> u32 {
        let id = state.next_object_id();
        let basket = state.basket.bounds;
        state.objects.push(FallingObject {
            id,
            bounds: Rect::new(basket.left() + 10, basket.top() - 20, 20, 20),
            kind,
            speed: 5,
        });
        id
    }

    fn drop_far_away(state: &mut GameState, kind: ObjectKind, y: i32, speed: i32) -> u32 {
        let id = state.next_object_id();
        state.objects.push(FallingObject {
            id,
            bounds: Rect::new(60, y, 30, 30),
            kind,
            speed,
        });
        id
    }

    #[test]
    fn test_speed_ramp_after_100_ticks() {
        let mut state = GameState::default();
        let input = TickInput::default();

        for _ in 0..99 {
            tick(&mut state, &input);
        }
        assert_eq!(state.speed_multiplier, 1.0);

        tick(&mut state, &input);
        assert_eq!(state.time_ticks, 100);
        assert!((state.speed_multiplier - 1.01).abs() < 1e-6);
        assert!(matches!(state.events[0], GameEvent::SpeedUp { .. }));
    }

    #[test]
    fn test_basket_left_guard_at_zero() {
        let mut state = GameState::default();
        state.basket.bounds.pos.x = 0;
        tick(&mut state, &TickInput { left: true, right: false });
        assert_eq!(state.basket.bounds.left(), 0);
    }

    #[test]
    fn test_basket_moves_by_step() {
        let mut state = GameState::default();
        tick(&mut state, &TickInput { left: true, right: false });
        assert_eq!(state.basket.bounds.left(), 335);
        tick(&mut state, &TickInput { left: false, right: true });
        tick(&mut state, &TickInput { left: false, right: true });
        assert_eq!(state.basket.bounds.left(), 365);
    }

    #[test]
    fn test_basket_both_intents_cancel() {
        let mut state = GameState::default();
        tick(&mut state, &TickInput { left: true, right: true });
        assert_eq!(state.basket.bounds.left(), 350);
    }

    #[test]
    fn test_basket_clamps_to_edges() {
        let mut state = GameState::default();
        state.basket.bounds.pos.x = 5;
        tick(&mut state, &TickInput { left: true, right: false });
        assert_eq!(state.basket.bounds.left(), 0);

        state.basket.bounds.pos.x = 695;
        tick(&mut state, &TickInput { left: false, right: true });
        assert_eq!(state.basket.bounds.right(), 800);
        tick(&mut state, &TickInput { left: false, right: true });
        assert_eq!(state.basket.bounds.right(), 800);
    }

    #[test]
    fn test_object_falls_and_is_missed() {
        let mut state = GameState::default();
        let id = drop_far_away(&mut state, ObjectKind::Apple, -30, 5);
        let input = TickInput::default();

        for _ in 0..6 {
            tick(&mut state, &input);
        }
        assert_eq!(state.object(id).map(|o| o.bounds.top()), Some(0));

        let mut ticks = 6;
        while state.object(id).is_some() {
            tick(&mut state, &input);
            ticks += 1;
        }
        // Removed on the first tick its top is below the floor (y = 605)
        assert_eq!(ticks, 127);
        assert!(state.events.contains(&GameEvent::Missed { kind: ObjectKind::Apple }));
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_catch_fruit_scores() {
        for (kind, points) in [
            (ObjectKind::Apple, 10),
            (ObjectKind::Banana, 20),
            (ObjectKind::Grape, 30),
        ] {
            let mut state = GameState::default();
            drop_on_basket(&mut state, kind);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.score, points);
            assert_eq!(state.lives, 3);
            assert!(state.objects.is_empty());
            assert_eq!(state.events, vec![GameEvent::Caught { kind, points }]);
        }
    }

    #[test]
    fn test_catch_bomb_costs_life() {
        let mut state = GameState::default();
        drop_on_basket(&mut state, ObjectKind::Bomb);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_last_bomb_ends_game_and_freezes_state() {
        let mut state = GameState::default();
        state.lives = 1;
        state.score = 40;
        // Older fruit would also land this tick; newest (the bomb) resolves first
        drop_on_basket(&mut state, ObjectKind::Grape);
        drop_on_basket(&mut state, ObjectKind::Bomb);

        tick(&mut state, &TickInput::default());
        assert!(state.game_over);
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 40);
        assert!(state.events.contains(&GameEvent::GameOver { score: 40 }));

        let frozen = state.clone();
        drop_far_away(&mut state, ObjectKind::Apple, 100, 5);
        let objects_before = state.objects.clone();
        for _ in 0..10 {
            tick(&mut state, &TickInput { left: true, right: false });
        }
        assert_eq!(state.time_ticks, frozen.time_ticks);
        assert_eq!(state.basket, frozen.basket);
        assert_eq!(state.score, frozen.score);
        assert_eq!(state.objects, objects_before);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_simultaneous_catches_all_resolve() {
        let mut state = GameState::default();
        drop_on_basket(&mut state, ObjectKind::Apple);
        drop_on_basket(&mut state, ObjectKind::Banana);
        drop_on_basket(&mut state, ObjectKind::Bomb);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 30);
        assert_eq!(state.lives, 2);
        assert!(state.objects.is_empty());
        // Newest first
        assert_eq!(state.events[0], GameEvent::BombHit { lives_left: 2 });
        assert_eq!(
            state.events[1],
            GameEvent::Caught { kind: ObjectKind::Banana, points: 20 }
        );
    }

    #[test]
    fn test_difficulty_rises_once_at_500() {
        let mut state = GameState::default();
        state.score = 490;
        drop_on_basket(&mut state, ObjectKind::Apple);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 500);
        assert_eq!(state.difficulty, 6);

        // Score resting on 500 must not keep raising it
        for _ in 0..50 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.difficulty, 6);
    }

    #[test]
    fn test_difficulty_rises_when_threshold_skipped() {
        let mut state = GameState::default();
        state.score = 480;
        drop_on_basket(&mut state, ObjectKind::Grape);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 510);
        assert_eq!(state.difficulty, 6);
        assert!(state.events.contains(&GameEvent::DifficultyUp { level: 6 }));
    }

    #[test]
    fn test_removed_objects_never_reappear() {
        let mut state = GameState::default();
        let caught = drop_on_basket(&mut state, ObjectKind::Apple);
        let missed = drop_far_away(&mut state, ObjectKind::Bomb, 598, 5);

        tick(&mut state, &TickInput::default());
        assert!(state.object(caught).is_none());
        assert!(state.object(missed).is_none());
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
            assert!(state.object(caught).is_none());
            assert!(state.object(missed).is_none());
        }
        assert_eq!(state.lives, 3);
    }

    proptest! {
        #[test]
        fn prop_basket_stays_in_bounds(inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 0..300)) {
            let mut state = GameState::default();
            for (left, right) in inputs {
                tick(&mut state, &TickInput { left, right });
                let x = state.basket.bounds.left();
                prop_assert!(x >= 0);
                prop_assert!(x <= state.area.width - BASKET_WIDTH);
            }
        }

        #[test]
        fn prop_fruit_never_costs_lives(kinds in prop::collection::vec(0usize..3, 1..20)) {
            let mut state = GameState::default();
            let mut expected = 0;
            for k in kinds {
                let kind = ObjectKind::FRUITS[k];
                expected += kind.points();
                drop_on_basket(&mut state, kind);
                tick(&mut state, &TickInput::default());
            }
            prop_assert_eq!(state.score, expected);
            prop_assert_eq!(state.lives, 3);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Rules;
    use crate::{GameState, RoundOutcome, RoundResult, ScoreError, StateError};

    #[test]
    fn default_state_seats_the_four_winds() {
        let s = GameState::default();
        assert_eq!(s.player_names, vec!["East", "South", "West", "North"]);
        assert!(s.history.is_empty());
        assert_eq!(s.totals(), vec![0, 0, 0, 0]);
        s.validate().unwrap();
    }

    #[test]
    fn commit_outcomes_and_totals() {
        let r = Rules::default();
        let s0 = GameState::default();
        let s1 = s0.commit_outcome(&RoundOutcome::discard(0, 2, 3), &r).unwrap();
        let s2 = s1.commit_outcome(&RoundOutcome::self_draw(0, 3), &r).unwrap();

        assert!(s0.history.is_empty());
        assert_eq!(s1.history, vec![RoundResult::new(vec![16, -4, -8, -4])]);
        assert_eq!(s2.totals(), vec![40, -12, -16, -12]);
        assert_eq!(s2.round_label(&r), "East 3 (West deals)");
        s2.validate().unwrap();
    }

    #[test]
    fn preview_does_not_record() {
        let r = Rules::default();
        let s = GameState::default();
        let d = s.preview(&RoundOutcome::discard(1, 0, 5), &r).unwrap();
        assert_eq!(d, vec![-24, 48, -12, -12]);
        assert!(s.history.is_empty());
    }

    #[test]
    fn commit_rejects_bad_rounds() {
        let s = GameState::default();
        assert_eq!(
            s.commit_round(RoundResult::new(vec![1, -1])).unwrap_err(),
            StateError::WrongLength {
                expected: 4,
                got: 2
            }
        );
        assert_eq!(
            s.commit_round(RoundResult::new(vec![1, 1, 1, 1])).unwrap_err(),
            StateError::NotZeroSum(4)
        );
    }

    #[test]
    fn score_errors_surface_through_state() {
        let r = Rules::default();
        let err = GameState::default()
            .commit_outcome(&RoundOutcome::discard(0, 1, 20), &r)
            .unwrap_err();
        assert_eq!(
            err,
            StateError::Score(ScoreError::FanOutOfRange { fan: 20, max: 13 })
        );
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let s = GameState::default();
        assert_eq!(s.undo_last_round(), s);
    }

    #[test]
    fn undo_restores_previous_state() {
        let r = Rules::default();
        let s1 = GameState::default()
            .commit_outcome(&RoundOutcome::discard(3, 1, 2), &r)
            .unwrap();
        let s2 = s1.commit_outcome(&RoundOutcome::no_winner(), &r).unwrap();
        assert_eq!(s2.history.last().unwrap().deltas, vec![0, 0, 0, 0]);
        assert_eq!(s2.undo_last_round(), s1);
    }

    #[test]
    fn rename_and_reset() {
        let r = Rules::default();
        let s = GameState::default()
            .rename_player(2, "Cy")
            .unwrap()
            .commit_outcome(&RoundOutcome::discard(2, 0, 1), &r)
            .unwrap();
        assert_eq!(s.player_names[2], "Cy");
        assert_eq!(s.history.len(), 1);

        let fresh = s.reset();
        assert_eq!(fresh.player_names, s.player_names);
        assert!(fresh.history.is_empty());

        assert_eq!(
            s.rename_player(4, "X").unwrap_err(),
            StateError::SeatOutOfRange {
                seat: 4,
                player_count: 4
            }
        );
    }

    #[test]
    fn validate_flags_corrupt_history() {
        let mut s = GameState::default();
        s.history.push(RoundResult::new(vec![5, -1, -1, -1]));
        assert!(matches!(
            s.validate(),
            Err(StateError::BadRound { index: 0, .. })
        ));

        let lonely = GameState::with_names(vec!["Solo".to_string()]);
        assert_eq!(lonely.validate().unwrap_err(), StateError::TooFewPlayers(1));
    }

    #[test]
    fn totals_past_i32_range_stay_exact() {
        let round = RoundResult::new(vec![2_000_000_000, -2_000_000_000, 0, 0]);
        let s = GameState {
            history: vec![round.clone(), round],
            ..GameState::default()
        };
        s.validate().unwrap();
        assert_eq!(s.totals(), vec![4_000_000_000, -4_000_000_000, 0, 0]);
    }

    #[test]
    fn json_shape_uses_camel_case_names() {
        let s = GameState::default()
            .commit_round(RoundResult::new(vec![3, -1, -1, -1]))
            .unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"playerNames":["East","South","West","North"],"history":[{"deltas":[3,-1,-1,-1]}]}"#
        );
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}

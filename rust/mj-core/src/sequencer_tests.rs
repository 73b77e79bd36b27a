#[cfg(test)]
mod tests {
    use crate::config::{Rotation, Rules};
    use crate::{
        append_round, current_round, current_round_for_history, delete_last_round,
        is_game_complete, round_label, RoundResult,
    };

    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn names() -> Vec<String> {
        ["Ann", "Bo", "Cy", "Di"].iter().map(|s| s.to_string()).collect()
    }

    fn rounds(v: &[[i32; 4]]) -> Vec<RoundResult> {
        v.iter().map(|d| RoundResult::new(d.to_vec())).collect()
    }

    #[test]
    fn dealer_and_wind_from_history_length() {
        let p = current_round(0, 4);
        assert_eq!((p.dealer, p.wind), (0, 0));
        let p = current_round(4, 4);
        assert_eq!((p.dealer, p.wind), (0, 1));
        let p = current_round(5, 4);
        assert_eq!((p.dealer, p.wind), (1, 1));
        let p = current_round(15, 4);
        assert_eq!((p.dealer, p.wind), (3, 3));
        // Winds cycle back to East after North.
        let p = current_round(16, 4);
        assert_eq!((p.dealer, p.wind), (0, 0));
    }

    #[test]
    fn labels_use_wind_and_dealer_name() {
        let r = Rules::default();
        assert_eq!(round_label(current_round(0, 4), &names(), &r), "East 1 (Ann deals)");
        assert_eq!(round_label(current_round(5, 4), &names(), &r), "South 2 (Bo deals)");
        assert_eq!(round_label(current_round(11, 4), &names(), &r), "West 4 (Di deals)");
    }

    #[test]
    #[should_panic]
    fn zero_players_panics() {
        let _ = current_round(3, 0);
    }

    #[test]
    fn delete_last_on_empty_is_noop() {
        assert!(delete_last_round(&[]).is_empty());
    }

    #[test]
    fn append_leaves_input_untouched() {
        let h = rounds(&[[3, -1, -1, -1]]);
        let h2 = append_round(&h, RoundResult::new(vec![0, 0, 0, 0]));
        assert_eq!(h.len(), 1);
        assert_eq!(h2.len(), 2);
        assert_eq!(h2[0], h[0]);
    }

    #[test]
    fn delete_last_undoes_append() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let len = rng.gen_range(0..20);
            let h: Vec<RoundResult> = (0..len)
                .map(|_| {
                    let a = rng.gen_range(-64..64);
                    let b = rng.gen_range(-64..64);
                    let c = rng.gen_range(-64..64);
                    RoundResult::new(vec![a, b, c, -(a + b + c)])
                })
                .collect();
            let d = RoundResult::new(vec![24, -8, -8, -8]);
            assert_eq!(delete_last_round(&append_round(&h, d)), h);
        }
    }

    #[test]
    fn fixed_rotation_ignores_outcomes() {
        let h = rounds(&[[3, -1, -1, -1], [0, 0, 0, 0], [-1, -1, 3, -1]]);
        assert_eq!(
            current_round_for_history(&h, 4, Rotation::Fixed),
            current_round(3, 4)
        );
    }

    #[test]
    fn repeat_rotation_keeps_deal_on_dealer_win_or_tie() {
        let r = Rules {
            rotation: Rotation::RepeatOnDealerWinOrTie,
            ..Rules::default()
        };
        // Dealer 0 wins, then a drawn round: deal stays with seat 0.
        let h = rounds(&[[3, -1, -1, -1], [0, 0, 0, 0]]);
        let p = current_round_for_history(&h, 4, r.rotation);
        assert_eq!((p.dealer, p.wind, p.repeat), (0, 0, 2));
        assert_eq!(round_label(p, &names(), &r), "East 1 (Ann deals) repeat 2");

        // Seat 2 wins: deal passes to seat 1.
        let h = append_round(&h, RoundResult::new(vec![-1, -1, 3, -1]));
        let p = current_round_for_history(&h, 4, r.rotation);
        assert_eq!((p.dealer, p.wind, p.repeat), (1, 0, 0));
        assert_eq!(round_label(p, &names(), &r), "East 2 (Bo deals)");
    }

    #[test]
    fn fake_win_by_dealer_replays_the_deal() {
        let r = Rules {
            rotation: Rotation::RepeatOnDealerWinOrTie,
            ..Rules::default()
        };
        let fake = crate::compute_deltas(&crate::RoundOutcome::fake_win(0, 3), 4, &r).unwrap();
        assert_eq!(fake, vec![-12, 4, 4, 4]);

        let h = vec![RoundResult::new(fake)];
        let p = current_round_for_history(&h, 4, r.rotation);
        assert_eq!((p.dealer, p.repeat), (0, 1));

        // A penalty round where the dealer pays still passes the deal.
        let h = rounds(&[[-8, 8, 0, 0]]);
        let p = current_round_for_history(&h, 4, r.rotation);
        assert_eq!((p.dealer, p.repeat), (1, 0));
    }

    #[test]
    fn game_completes_after_four_winds() {
        let one = RoundResult::new(vec![-1, 3, -1, -1]);
        let h: Vec<RoundResult> = (0..15).map(|_| one.clone()).collect();
        assert!(!is_game_complete(&h, 4, Rotation::Fixed));
        let h = append_round(&h, one);
        assert!(is_game_complete(&h, 4, Rotation::Fixed));
    }

    #[test]
    fn repeats_delay_completion() {
        // Seat 1 always wins: every dealer other than seat 1 passes the deal,
        // seat 1 keeps it forever once dealing.
        let one = RoundResult::new(vec![-1, 3, -1, -1]);
        let h: Vec<RoundResult> = (0..40).map(|_| one.clone()).collect();
        assert!(!is_game_complete(&h, 4, Rotation::RepeatOnDealerWinOrTie));
        let p = current_round_for_history(&h, 4, Rotation::RepeatOnDealerWinOrTie);
        assert_eq!((p.dealer, p.repeat), (1, 39));
    }
}

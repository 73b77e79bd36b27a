//! Round scoring: turn one round outcome into a zero-sum delta vector.
//!
//! Everything here is a pure function of the outcome, the player count and
//! the (read-only) rules. Calling it twice with the same inputs yields the
//! same vector, so front ends can preview a round before committing it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{FanOverflow, Rules, TiePolicy};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("player count must be >= 2, got {0}")]
    PlayerCount(usize),
    #[error("{role} seat {seat} out of range for {player_count} players")]
    SeatOutOfRange {
        role: &'static str,
        seat: usize,
        player_count: usize,
    },
    #[error("fan {fan} out of range (max {max})")]
    FanOutOfRange { fan: u8, max: u8 },
    #[error("penalty seat {0} is the winner")]
    PenaltyIsWinner(usize),
    #[error("round has no winner and ties are not scored")]
    NoWinner,
    #[error("fake win requires the offending seat as winner")]
    FakeWinWithoutOffender,
    #[error("payout does not fit in i32")]
    Overflow,
}

/// Inputs for one finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Winning seat; `None` for a drawn round.
    pub winner: Option<usize>,
    /// Seat that discarded the winning tile. Equal to `winner` for self-draw.
    pub discarder: usize,
    pub fan: u8,
    /// Seat that alone pays every loss.
    pub penalty: Option<usize>,
    /// `winner` declared a false win and pays everyone instead.
    pub fake_win: bool,
}

impl RoundOutcome {
    /// Win off another player's discard.
    pub fn discard(winner: usize, discarder: usize, fan: u8) -> Self {
        Self {
            winner: Some(winner),
            discarder,
            fan,
            ..Self::default()
        }
    }

    pub fn self_draw(winner: usize, fan: u8) -> Self {
        Self::discard(winner, winner, fan)
    }

    /// Drawn round (nobody won).
    pub fn no_winner() -> Self {
        Self::default()
    }

    pub fn fake_win(offender: usize, fan: u8) -> Self {
        Self {
            winner: Some(offender),
            discarder: offender,
            fan,
            penalty: None,
            fake_win: true,
        }
    }

    pub fn with_penalty(mut self, seat: usize) -> Self {
        self.penalty = Some(seat);
        self
    }

    pub fn is_self_draw(&self) -> bool {
        self.winner == Some(self.discarder)
    }
}

/// Resolve the base loss for `fan` under `rules`.
///
/// Fans above `rules.max_fan` are rejected or clamped per `rules.fan_overflow`.
pub fn base_value(fan: u8, rules: &Rules) -> Result<i32, ScoreError> {
    let fan = if fan > rules.max_fan {
        match rules.fan_overflow {
            FanOverflow::Reject => {
                return Err(ScoreError::FanOutOfRange {
                    fan,
                    max: rules.max_fan,
                })
            }
            FanOverflow::Clamp => rules.max_fan,
        }
    } else {
        fan
    };
    rules.base_value(fan).ok_or(ScoreError::FanOutOfRange {
        fan,
        max: rules.max_fan,
    })
}

fn check_seat(role: &'static str, seat: usize, player_count: usize) -> Result<(), ScoreError> {
    if seat >= player_count {
        return Err(ScoreError::SeatOutOfRange {
            role,
            seat,
            player_count,
        });
    }
    Ok(())
}

/// Compute the per-player deltas for one round.
///
/// - every non-winner starts at `-base`
/// - self-draw doubles every loss, otherwise only the discarder's
/// - a zero loss is floored to `-minimum_payment`
/// - the winner collects the negated sum of all losses
/// - with a penalty seat, that seat alone pays the whole sum
///
/// The returned vector always sums to zero. Table values too large for
/// `i32` payouts yield [`ScoreError::Overflow`].
pub fn compute_deltas(
    outcome: &RoundOutcome,
    player_count: usize,
    rules: &Rules,
) -> Result<Vec<i32>, ScoreError> {
    if player_count < 2 {
        return Err(ScoreError::PlayerCount(player_count));
    }

    let Some(winner) = outcome.winner else {
        if outcome.fake_win {
            return Err(ScoreError::FakeWinWithoutOffender);
        }
        return match rules.tie_policy {
            TiePolicy::RecordZero => Ok(vec![0; player_count]),
            TiePolicy::Reject => Err(ScoreError::NoWinner),
        };
    };
    check_seat("winner", winner, player_count)?;
    let base = base_value(outcome.fan, rules)?;

    if outcome.fake_win {
        return fake_win_deltas(winner, base, player_count, rules);
    }

    check_seat("discarder", outcome.discarder, player_count)?;
    if let Some(p) = outcome.penalty {
        check_seat("penalty", p, player_count)?;
        if p == winner {
            return Err(ScoreError::PenaltyIsWinner(p));
        }
    }

    let loss_each = base.checked_neg().ok_or(ScoreError::Overflow)?;
    let mut deltas = vec![loss_each; player_count];
    if outcome.is_self_draw() {
        for d in deltas.iter_mut() {
            *d = double(*d)?;
        }
    } else {
        deltas[outcome.discarder] = double(deltas[outcome.discarder])?;
    }

    let floor = rules.minimum_payment.checked_neg().ok_or(ScoreError::Overflow)?;
    for (seat, d) in deltas.iter_mut().enumerate() {
        if seat != winner && *d == 0 {
            *d = floor;
        }
    }

    deltas[winner] = 0;
    let loss = checked_sum(&deltas)?;
    let collected = loss.checked_neg().ok_or(ScoreError::Overflow)?;

    if let Some(p) = outcome.penalty {
        for (seat, d) in deltas.iter_mut().enumerate() {
            *d = if seat == p { loss } else { 0 };
        }
    }

    deltas[winner] = collected;
    Ok(deltas)
}

fn double(d: i32) -> Result<i32, ScoreError> {
    d.checked_mul(2).ok_or(ScoreError::Overflow)
}

fn checked_sum(deltas: &[i32]) -> Result<i32, ScoreError> {
    deltas
        .iter()
        .try_fold(0i32, |acc, &d| acc.checked_add(d))
        .ok_or(ScoreError::Overflow)
}

/// Offender pays every other seat `max(base, minimum_payment)`.
fn fake_win_deltas(
    offender: usize,
    base: i32,
    player_count: usize,
    rules: &Rules,
) -> Result<Vec<i32>, ScoreError> {
    let each = base.max(rules.minimum_payment);
    let mut deltas = vec![each; player_count];
    deltas[offender] = 0;
    let paid = checked_sum(&deltas)?;
    deltas[offender] = paid.checked_neg().ok_or(ScoreError::Overflow)?;
    Ok(deltas)
}

pub fn is_zero_sum(deltas: &[i32]) -> bool {
    deltas.iter().map(|&d| d as i64).sum::<i64>() == 0
}

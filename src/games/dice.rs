//! Roll-under dice
//!
//! The player picks a threshold in `[2, 98]`; the roll is uniform in
//! `[0, 100)` and wins when it lands at or under the threshold. The
//! 98/T payout bakes in the ~2% house edge.

use crate::errors::{ParlorError, ParlorResult};
use crate::games::types::{GameKind, RoundDetail, RoundOutcome, RoundReport};
use crate::rng::RandomSource;
use crate::session::Session;

pub const MIN_THRESHOLD: u8 = 2;
pub const MAX_THRESHOLD: u8 = 98;

/// Play one dice round: debit, roll, settle.
pub fn play(
    session: &mut Session,
    rng: &mut dyn RandomSource,
    stake: f64,
    threshold: u8,
) -> ParlorResult<RoundReport> {
    if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
        return Err(ParlorError::selection(format!(
            "dice threshold must be in {}..={}, got {}",
            MIN_THRESHOLD, MAX_THRESHOLD, threshold
        )));
    }

    let receipt = session.place_bet(stake)?;
    let roll = rng.next_f64() * 100.0;
    let won = roll <= f64::from(threshold);
    let multiplier = if won { 98.0 / f64::from(threshold) } else { 0.0 };
    let payout = stake * multiplier;
    let entry = session.settle(receipt, payout, GameKind::Dice, multiplier);

    Ok(RoundReport {
        game: GameKind::Dice,
        bet: stake,
        payout,
        multiplier,
        outcome: entry.outcome,
        detail: RoundDetail::Dice { threshold, roll },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::rng::ScriptedRandom;

    fn session_with_balance(balance: f64) -> Session {
        let mut session = Session::new(SessionConfig::default());
        session.deposit(balance).expect("deposit");
        session
    }

    #[test]
    fn test_win_iff_roll_at_or_under_threshold() {
        // roll = 30.0 <= 50 -> win
        let mut session = session_with_balance(1000.0);
        let mut rng = ScriptedRandom::new([0.30]);
        let report = play(&mut session, &mut rng, 10.0, 50).expect("play");
        assert_eq!(report.outcome, RoundOutcome::Win);
        assert_eq!(report.payout, 19.6);

        // roll = 50.000000001-ish above threshold -> loss
        let mut session = session_with_balance(1000.0);
        let mut rng = ScriptedRandom::new([0.501]);
        let report = play(&mut session, &mut rng, 10.0, 50).expect("play");
        assert_eq!(report.outcome, RoundOutcome::Loss);
        assert_eq!(report.payout, 0.0);
    }

    #[test]
    fn test_end_to_end_ledger_scenario() {
        // stake=100, T=50, roll=30 => payout 196, balance delta +96
        let mut session = session_with_balance(1000.0);
        let mut rng = ScriptedRandom::new([0.30]);
        let report = play(&mut session, &mut rng, 100.0, 50).expect("play");

        assert_eq!(report.payout, 196.0);
        assert_eq!(report.multiplier, 1.96);
        assert_eq!(session.balance(), 1096.0);

        let entry = &session.log()[0];
        assert_eq!(entry.outcome, RoundOutcome::Win);
        assert_eq!(entry.multiplier, 1.96);
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_threshold_bounds_enforced() {
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([0.5]);
        assert!(play(&mut session, &mut rng, 10.0, 1).is_err());
        assert!(play(&mut session, &mut rng, 10.0, 99).is_err());
        // rejection leaves the balance untouched
        assert_eq!(session.balance(), 100.0);
    }

    #[test]
    fn test_insufficient_funds_rejected_before_rolling() {
        let mut session = session_with_balance(5.0);
        let mut rng = ScriptedRandom::new([0.5]);
        let err = play(&mut session, &mut rng, 10.0, 50).unwrap_err();
        assert!(matches!(err, ParlorError::InsufficientFunds { .. }));
        assert!(session.log().is_empty());
    }
}

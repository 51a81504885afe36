//! Limbo
//!
//! The player names a target multiplier up front; the house generates a
//! heavy-tailed multiplier and pays the target iff the generated value
//! reaches it.

use crate::errors::{ParlorError, ParlorResult};
use crate::games::curve::heavy_tail;
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::RandomSource;
use crate::session::Session;

/// Smallest target the house accepts; 1.00x would be a guaranteed push.
pub const MIN_TARGET: f64 = 1.01;

/// Play one limbo round: debit, generate, settle.
pub fn play(
    session: &mut Session,
    rng: &mut dyn RandomSource,
    stake: f64,
    target: f64,
) -> ParlorResult<RoundReport> {
    if !target.is_finite() || target < MIN_TARGET {
        return Err(ParlorError::selection(format!(
            "limbo target must be at least {MIN_TARGET}"
        )));
    }

    let receipt = session.place_bet(stake)?;
    let generated = heavy_tail(rng.next_f64());
    let won = generated >= target;
    let multiplier = if won { target } else { 0.0 };
    let payout = stake * multiplier;
    let entry = session.settle(receipt, payout, GameKind::Limbo, multiplier);

    Ok(RoundReport {
        game: GameKind::Limbo,
        bet: stake,
        payout,
        multiplier,
        outcome: entry.outcome,
        detail: RoundDetail::Limbo { target, generated },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::games::types::RoundOutcome;
    use crate::rng::ScriptedRandom;

    fn session_with_balance(balance: f64) -> Session {
        let mut session = Session::new(SessionConfig::default());
        session.deposit(balance).expect("deposit");
        session
    }

    #[test]
    fn test_pays_target_when_generated_reaches_it() {
        // u=0.5 -> generated 1.98 >= target 1.5
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([0.5]);
        let report = play(&mut session, &mut rng, 10.0, 1.5).expect("play");
        assert_eq!(report.outcome, RoundOutcome::Win);
        assert_eq!(report.payout, 15.0);
        match report.detail {
            RoundDetail::Limbo { generated, .. } => assert_eq!(generated, 1.98),
            _ => panic!("wrong detail"),
        }
    }

    #[test]
    fn test_loses_below_target() {
        // u=0.5 -> generated 1.98 < target 2.0
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([0.5]);
        let report = play(&mut session, &mut rng, 10.0, 2.0).expect("play");
        assert_eq!(report.outcome, RoundOutcome::Loss);
        assert_eq!(report.payout, 0.0);
        assert_eq!(session.balance(), 90.0);
    }

    #[test]
    fn test_target_below_minimum_rejected() {
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([0.5]);
        assert!(play(&mut session, &mut rng, 10.0, 1.0).is_err());
        assert_eq!(session.balance(), 100.0);
    }
}

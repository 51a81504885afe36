//! Three-reel slots
//!
//! Three independent uniform picks from a six-symbol alphabet. Triples
//! pay by symbol (sevens highest), any pair pays 2x.

use crate::errors::ParlorResult;
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::RandomSource;
use crate::session::Session;
use serde::{Deserialize, Serialize};

/// Reel symbols, in reel-strip order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotSymbol {
    Cherry,
    Lemon,
    Grape,
    Diamond,
    Seven,
    Bell,
}

pub const SYMBOLS: [SlotSymbol; 6] = [
    SlotSymbol::Cherry,
    SlotSymbol::Lemon,
    SlotSymbol::Grape,
    SlotSymbol::Diamond,
    SlotSymbol::Seven,
    SlotSymbol::Bell,
];

/// Multiplier for a spin result.
fn line_multiplier(reels: &[SlotSymbol; 3]) -> f64 {
    if reels[0] == reels[1] && reels[1] == reels[2] {
        match reels[0] {
            SlotSymbol::Seven => 50.0,
            SlotSymbol::Diamond => 25.0,
            _ => 10.0,
        }
    } else if reels[0] == reels[1] || reels[1] == reels[2] || reels[0] == reels[2] {
        2.0
    } else {
        0.0
    }
}

/// Play one slots round: debit, spin three reels, settle.
pub fn play(
    session: &mut Session,
    rng: &mut dyn RandomSource,
    stake: f64,
) -> ParlorResult<RoundReport> {
    let receipt = session.place_bet(stake)?;
    let reels = [
        SYMBOLS[rng.pick_index(SYMBOLS.len())],
        SYMBOLS[rng.pick_index(SYMBOLS.len())],
        SYMBOLS[rng.pick_index(SYMBOLS.len())],
    ];
    let multiplier = line_multiplier(&reels);
    let payout = stake * multiplier;
    let entry = session.settle(receipt, payout, GameKind::Slots, multiplier);

    Ok(RoundReport {
        game: GameKind::Slots,
        bet: stake,
        payout,
        multiplier,
        outcome: entry.outcome,
        detail: RoundDetail::Slots { reels },
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

    /// Scripted draw that picks the symbol at the given index.
    fn draw_for(index: usize) -> f64 {
        (index as f64 + 0.5) / 6.0
    }

    #[test]
    fn test_triple_seven_pays_50x() {
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([draw_for(4), draw_for(4), draw_for(4)]);
        let report = play(&mut session, &mut rng, 10.0).expect("play");
        assert_eq!(report.multiplier, 50.0);
        assert_eq!(report.payout, 500.0);
    }

    #[test]
    fn test_triple_diamond_pays_25x() {
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([draw_for(3), draw_for(3), draw_for(3)]);
        let report = play(&mut session, &mut rng, 10.0).expect("play");
        assert_eq!(report.multiplier, 25.0);
    }

    #[test]
    fn test_other_triples_pay_10x() {
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([draw_for(0), draw_for(0), draw_for(0)]);
        let report = play(&mut session, &mut rng, 10.0).expect("play");
        assert_eq!(report.multiplier, 10.0);
    }

    #[test]
    fn test_any_pair_pays_2x() {
        // pair may sit on any two of the three reels
        for reels in [[0usize, 0, 1], [1, 0, 0], [0, 1, 0]] {
            let mut session = session_with_balance(100.0);
            let mut rng =
                ScriptedRandom::new([draw_for(reels[0]), draw_for(reels[1]), draw_for(reels[2])]);
            let report = play(&mut session, &mut rng, 10.0).expect("play");
            assert_eq!(report.multiplier, 2.0, "reels {:?}", reels);
        }
    }

    #[test]
    fn test_no_match_pays_nothing() {
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([draw_for(0), draw_for(1), draw_for(2)]);
        let report = play(&mut session, &mut rng, 10.0).expect("play");
        assert_eq!(report.payout, 0.0);
        assert_eq!(report.outcome, RoundOutcome::Loss);
        assert_eq!(session.balance(), 90.0);
    }
}

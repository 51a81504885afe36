//! European roulette, color bets only
//!
//! The wheel layout is the published single-zero permutation. The spin
//! picks a uniform *position* on the wheel, and the animation angle and
//! red/black membership both key off that position, so the order below
//! must stay exactly as printed.

use crate::errors::ParlorResult;
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::RandomSource;
use crate::session::Session;
use serde::{Deserialize, Serialize};

/// Pocket order around the European wheel, clockwise from the zero.
pub const WHEEL: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// The 18 red pockets; every other non-zero pocket is black.
pub const RED_NUMBERS: [u8; 18] = [
    32, 19, 21, 25, 34, 27, 36, 30, 23, 5, 16, 1, 14, 9, 18, 7, 12, 3,
];

const SEGMENT_DEGREES: f64 = 360.0 / 37.0;

/// Player color choice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouletteBet {
    Red,
    Black,
    Green,
}

/// Color of a landed pocket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PocketColor {
    Red,
    Black,
    Green,
}

/// Color of a pocket by number.
pub fn pocket_color(pocket: u8) -> PocketColor {
    if pocket == 0 {
        PocketColor::Green
    } else if RED_NUMBERS.contains(&pocket) {
        PocketColor::Red
    } else {
        PocketColor::Black
    }
}

/// Wheel rotation (degrees) that parks the given wheel position under
/// the marker. Presentation helper; the outcome never depends on it.
pub fn rotation_for(position: usize) -> f64 {
    360.0 - position as f64 * SEGMENT_DEGREES
}

/// Play one roulette round: debit, spin, settle.
pub fn play(
    session: &mut Session,
    rng: &mut dyn RandomSource,
    stake: f64,
    bet: RouletteBet,
) -> ParlorResult<RoundReport> {
    let receipt = session.place_bet(stake)?;
    let position = rng.pick_index(WHEEL.len());
    let pocket = WHEEL[position];
    let color = pocket_color(pocket);

    let multiplier = match (bet, color) {
        (RouletteBet::Green, PocketColor::Green) => 36.0,
        (RouletteBet::Red, PocketColor::Red) => 2.0,
        (RouletteBet::Black, PocketColor::Black) => 2.0,
        _ => 0.0,
    };
    let payout = stake * multiplier;
    let entry = session.settle(receipt, payout, GameKind::Roulette, multiplier);

    Ok(RoundReport {
        game: GameKind::Roulette,
        bet: stake,
        payout,
        multiplier,
        outcome: entry.outcome,
        detail: RoundDetail::Roulette {
            choice: bet,
            pocket,
            color,
        },
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

    /// Scripted draw that lands on the given wheel position.
    fn draw_for_position(position: usize) -> f64 {
        (position as f64 + 0.5) / 37.0
    }

    #[test]
    fn test_wheel_is_the_published_permutation() {
        assert_eq!(WHEEL.len(), 37);
        assert_eq!(&WHEEL[..4], &[0, 32, 15, 19]);
        let mut sorted = WHEEL.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..=36).collect::<Vec<u8>>());
    }

    #[test]
    fn test_exactly_eighteen_reds_and_blacks() {
        let reds = WHEEL
            .iter()
            .filter(|&&p| pocket_color(p) == PocketColor::Red)
            .count();
        let blacks = WHEEL
            .iter()
            .filter(|&&p| pocket_color(p) == PocketColor::Black)
            .count();
        assert_eq!(reds, 18);
        assert_eq!(blacks, 18);
        assert_eq!(pocket_color(0), PocketColor::Green);
    }

    #[test]
    fn test_green_pays_36x() {
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([draw_for_position(0)]);
        let report = play(&mut session, &mut rng, 10.0, RouletteBet::Green).expect("play");
        assert_eq!(report.payout, 360.0);
        match report.detail {
            RoundDetail::Roulette { pocket, .. } => assert_eq!(pocket, 0),
            _ => panic!("wrong detail"),
        }
    }

    #[test]
    fn test_color_match_pays_2x() {
        // position 1 is pocket 32, a red number
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([draw_for_position(1)]);
        let report = play(&mut session, &mut rng, 10.0, RouletteBet::Red).expect("play");
        assert_eq!(report.payout, 20.0);
        assert_eq!(report.outcome, RoundOutcome::Win);
    }

    #[test]
    fn test_green_bet_on_nonzero_pays_nothing() {
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([draw_for_position(1)]);
        let report = play(&mut session, &mut rng, 10.0, RouletteBet::Green).expect("play");
        assert_eq!(report.payout, 0.0);
        assert_eq!(report.outcome, RoundOutcome::Loss);
    }

    #[test]
    fn test_black_bet_against_red_pocket_loses() {
        // position 2 is pocket 15, black; bet red loses
        let mut session = session_with_balance(100.0);
        let mut rng = ScriptedRandom::new([draw_for_position(2)]);
        let report = play(&mut session, &mut rng, 10.0, RouletteBet::Red).expect("play");
        assert_eq!(report.payout, 0.0);
    }

    #[test]
    fn test_rotation_keys_off_wheel_position() {
        assert_eq!(rotation_for(0), 360.0);
        assert!(rotation_for(1) < rotation_for(0));
    }
}

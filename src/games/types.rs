use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::blackjack::HandResult;
use super::roulette::{PocketColor, RouletteBet};
use super::slots::SlotSymbol;
use super::trivia::TriviaCategory;

/// Supported game types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Slots,
    Dice,
    Blackjack,
    Roulette,
    Crash,
    Mines,
    Plinko,
    Keno,
    Limbo,
    Trivia,
}

impl GameKind {
    /// All playable games, in lobby order.
    pub fn all() -> [GameKind; 10] {
        [
            GameKind::Trivia,
            GameKind::Blackjack,
            GameKind::Slots,
            GameKind::Roulette,
            GameKind::Crash,
            GameKind::Plinko,
            GameKind::Mines,
            GameKind::Keno,
            GameKind::Limbo,
            GameKind::Dice,
        ]
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameKind::Slots => "slots",
            GameKind::Dice => "dice",
            GameKind::Blackjack => "blackjack",
            GameKind::Roulette => "roulette",
            GameKind::Crash => "crash",
            GameKind::Mines => "mines",
            GameKind::Plinko => "plinko",
            GameKind::Keno => "keno",
            GameKind::Limbo => "limbo",
            GameKind::Trivia => "trivia",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slots" => Ok(GameKind::Slots),
            "dice" => Ok(GameKind::Dice),
            "blackjack" => Ok(GameKind::Blackjack),
            "roulette" => Ok(GameKind::Roulette),
            "crash" => Ok(GameKind::Crash),
            "mines" => Ok(GameKind::Mines),
            "plinko" => Ok(GameKind::Plinko),
            "keno" => Ok(GameKind::Keno),
            "limbo" => Ok(GameKind::Limbo),
            "trivia" => Ok(GameKind::Trivia),
            other => Err(format!("unknown game: {}", other)),
        }
    }
}

/// Round outcome as recorded in the session log.
///
/// A round counts as a win whenever the payout covers the stake, so a
/// blackjack push (stake returned) is labelled `Win`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoundOutcome {
    Win,
    Loss,
}

impl RoundOutcome {
    pub fn classify(stake: f64, payout: f64) -> Self {
        if payout >= stake {
            RoundOutcome::Win
        } else {
            RoundOutcome::Loss
        }
    }
}

/// Result of one completed round, returned by every game engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundReport {
    pub game: GameKind,
    pub bet: f64,
    pub payout: f64,
    pub multiplier: f64,
    pub outcome: RoundOutcome,
    #[serde(flatten)]
    pub detail: RoundDetail,
}

/// Game-specific round data (discriminated union)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "round_data", rename_all = "lowercase")]
pub enum RoundDetail {
    Dice {
        threshold: u8,
        roll: f64,
    },
    Limbo {
        target: f64,
        generated: f64,
    },
    Roulette {
        choice: RouletteBet,
        pocket: u8,
        color: PocketColor,
    },
    Slots {
        reels: [SlotSymbol; 3],
    },
    Keno {
        picks: Vec<u8>,
        drawn: Vec<u8>,
        matches: u8,
    },
    Plinko {
        bucket: u8,
    },
    Crash {
        crash_point: f64,
        cashed_out: Option<f64>,
    },
    Mines {
        mine_count: u8,
        safe_reveals: u8,
        hit_mine: bool,
    },
    Trivia {
        category: TriviaCategory,
        correct: bool,
        jackpot: bool,
    },
    Blackjack {
        player_total: u32,
        dealer_total: u32,
        natural: bool,
        result: HandResult,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification_uses_payout_vs_stake() {
        assert_eq!(RoundOutcome::classify(10.0, 19.6), RoundOutcome::Win);
        assert_eq!(RoundOutcome::classify(10.0, 0.0), RoundOutcome::Loss);
        // A push (payout == stake) is labelled a win by convention.
        assert_eq!(RoundOutcome::classify(10.0, 10.0), RoundOutcome::Win);
    }

    #[test]
    fn test_game_kind_round_trips_through_str() {
        for game in GameKind::all() {
            assert_eq!(game.to_string().parse::<GameKind>(), Ok(game));
        }
    }

    #[test]
    fn test_unknown_game_rejected() {
        assert!("baccarat".parse::<GameKind>().is_err());
    }
}

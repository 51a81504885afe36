//! Game outcome engines
//!
//! One module per game. Instant games resolve in a single [`play`]
//! call; crash, mines, trivia and blackjack hold state across player
//! decisions and expose round objects instead (begin debits the stake,
//! the terminal action settles it, ownership keeps a round from
//! settling twice).

use crate::errors::ParlorResult;
use crate::rng::RandomSource;
use crate::session::Session;
use serde::{Deserialize, Serialize};

pub mod blackjack;
pub mod crash;
pub mod curve;
pub mod dice;
pub mod keno;
pub mod limbo;
pub mod mines;
pub mod plinko;
pub mod roulette;
pub mod slots;
pub mod trivia;
pub mod types;

pub use types::{GameKind, RoundDetail, RoundOutcome, RoundReport};

/// Parameters for the single-call games.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum GameParams {
    Dice { threshold: u8 },
    Limbo { target: f64 },
    Roulette { bet: roulette::RouletteBet },
    Slots,
    Keno { picks: Vec<u8> },
    Plinko,
}

/// Dispatch one instant round by game parameters: validate, debit,
/// resolve, settle. The stateful games (crash, mines, trivia,
/// blackjack) are driven through their round types.
pub fn play(
    session: &mut Session,
    rng: &mut dyn RandomSource,
    stake: f64,
    params: GameParams,
) -> ParlorResult<RoundReport> {
    match params {
        GameParams::Dice { threshold } => dice::play(session, rng, stake, threshold),
        GameParams::Limbo { target } => limbo::play(session, rng, stake, target),
        GameParams::Roulette { bet } => roulette::play(session, rng, stake, bet),
        GameParams::Slots => slots::play(session, rng, stake),
        GameParams::Keno { picks } => keno::play(session, rng, stake, &picks),
        GameParams::Plinko => plinko::play(session, rng, stake),
    }
}

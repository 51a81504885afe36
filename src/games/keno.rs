//! Keno
//!
//! The player marks up to ten numbers on a 1..=40 board; the house
//! draws twenty distinct numbers and pays by match count.

use crate::errors::{ParlorError, ParlorResult};
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::RandomSource;
use crate::session::Session;

pub const BOARD_MAX: u8 = 40;
pub const MAX_PICKS: usize = 10;
pub const DRAW_COUNT: usize = 20;

/// Multiplier for a given match count.
fn match_multiplier(matches: usize) -> f64 {
    if matches >= 5 {
        matches as f64 * 2.0
    } else if matches >= 2 {
        matches as f64 * 0.5
    } else {
        0.0
    }
}

/// Play one keno round: debit, draw twenty numbers, settle by matches.
pub fn play(
    session: &mut Session,
    rng: &mut dyn RandomSource,
    stake: f64,
    picks: &[u8],
) -> ParlorResult<RoundReport> {
    if picks.is_empty() {
        return Err(ParlorError::selection("keno requires at least one pick"));
    }
    if picks.len() > MAX_PICKS {
        return Err(ParlorError::selection(format!(
            "keno allows at most {MAX_PICKS} picks"
        )));
    }
    for &n in picks {
        if n == 0 || n > BOARD_MAX {
            return Err(ParlorError::selection(format!(
                "keno pick {n} outside the 1..={BOARD_MAX} board"
            )));
        }
    }
    for (i, &n) in picks.iter().enumerate() {
        if picks[..i].contains(&n) {
            return Err(ParlorError::selection(format!("keno pick {n} repeated")));
        }
    }

    let receipt = session.place_bet(stake)?;

    let mut drawn: Vec<u8> = Vec::with_capacity(DRAW_COUNT);
    while drawn.len() < DRAW_COUNT {
        let n = rng.int_in(1, u32::from(BOARD_MAX)) as u8;
        if !drawn.contains(&n) {
            drawn.push(n);
        }
    }

    let matches = picks.iter().filter(|p| drawn.contains(p)).count();
    let multiplier = match_multiplier(matches);
    let payout = stake * multiplier;
    let entry = session.settle(receipt, payout, GameKind::Keno, multiplier);

    Ok(RoundReport {
        game: GameKind::Keno,
        bet: stake,
        payout,
        multiplier,
        outcome: entry.outcome,
        detail: RoundDetail::Keno {
            picks: picks.to_vec(),
            drawn,
            matches: matches as u8,
        },
    })
}

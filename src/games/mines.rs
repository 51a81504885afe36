//! Mines
//!
//! N mines hidden in a 5x5 grid. Every safe reveal multiplies the
//! running payout by 1.15; revealing a mine ends the round with
//! nothing, regardless of earlier progress. Cash-out is allowed after
//! at least one safe reveal.

use crate::errors::{ParlorError, ParlorResult};
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::RandomSource;
use crate::session::{Session, Stake};

pub const GRID_CELLS: usize = 25;
pub const MIN_MINES: u8 = 1;
pub const MAX_MINES: u8 = 24;
const STEP_MULTIPLIER: f64 = 1.15;

/// Result of revealing one cell.
#[derive(Debug, Clone)]
pub enum MinesReveal {
    /// Safe cell; the multiplier a cash-out would pay right now.
    Safe { multiplier: f64 },
    /// Mine hit; the round is settled at zero.
    Mine(RoundReport),
}

/// One in-flight mines round.
pub struct MinesRound {
    stake: Option<Stake>,
    bet: f64,
    mine_count: u8,
    mines: [bool; GRID_CELLS],
    revealed: [bool; GRID_CELLS],
    safe_reveals: u8,
}

impl MinesRound {
    /// Debit the stake and plant the mines.
    pub fn begin(
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
        mine_count: u8,
    ) -> ParlorResult<Self> {
        if !(MIN_MINES..=MAX_MINES).contains(&mine_count) {
            return Err(ParlorError::selection(format!(
                "mine count must be in {}..={}, got {}",
                MIN_MINES, MAX_MINES, mine_count
            )));
        }

        let receipt = session.place_bet(stake)?;

        let mut mines = [false; GRID_CELLS];
        let mut planted = 0;
        while planted < mine_count {
            let cell = rng.pick_index(GRID_CELLS);
            if !mines[cell] {
                mines[cell] = true;
                planted += 1;
            }
        }

        Ok(Self {
            stake: Some(receipt),
            bet: stake,
            mine_count,
            mines,
            revealed: [false; GRID_CELLS],
            safe_reveals: 0,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.stake.is_none()
    }

    pub fn safe_reveals(&self) -> u8 {
        self.safe_reveals
    }

    /// Multiplier a cash-out would pay after the current reveals.
    pub fn current_multiplier(&self) -> f64 {
        STEP_MULTIPLIER.powi(i32::from(self.safe_reveals))
    }

    /// Reveal a cell. A mine settles the round at zero immediately.
    pub fn reveal(&mut self, session: &mut Session, cell: usize) -> ParlorResult<MinesReveal> {
        if self.stake.is_none() {
            return Err(ParlorError::selection("mines round already finished"));
        }
        if cell >= GRID_CELLS {
            return Err(ParlorError::selection(format!(
                "cell {cell} outside the {GRID_CELLS}-cell grid"
            )));
        }
        if self.revealed[cell] {
            return Err(ParlorError::selection(format!("cell {cell} already revealed")));
        }

        self.revealed[cell] = true;

        if self.mines[cell] {
            let Some(receipt) = self.stake.take() else {
                return Err(ParlorError::selection("mines round already finished"));
            };
            let entry = session.settle(receipt, 0.0, GameKind::Mines, 0.0);
            return Ok(MinesReveal::Mine(RoundReport {
                game: GameKind::Mines,
                bet: self.bet,
                payout: 0.0,
                multiplier: 0.0,
                outcome: entry.outcome,
                detail: RoundDetail::Mines {
                    mine_count: self.mine_count,
                    safe_reveals: self.safe_reveals,
                    hit_mine: true,
                },
            }));
        }

        self.safe_reveals += 1;
        Ok(MinesReveal::Safe {
            multiplier: self.current_multiplier(),
        })
    }

    /// Bank the current multiplier. Requires at least one safe reveal.
    pub fn cash_out(&mut self, session: &mut Session) -> ParlorResult<RoundReport> {
        if self.stake.is_none() {
            return Err(ParlorError::selection("mines round already finished"));
        }
        if self.safe_reveals == 0 {
            return Err(ParlorError::selection(
                "cash-out requires at least one safe reveal",
            ));
        }
        let Some(receipt) = self.stake.take() else {
            return Err(ParlorError::selection("mines round already finished"));
        };

        let multiplier = self.current_multiplier();
        let payout = self.bet * multiplier;
        let entry = session.settle(receipt, payout, GameKind::Mines, multiplier);
        Ok(RoundReport {
            game: GameKind::Mines,
            bet: self.bet,
            payout,
            multiplier,
            outcome: entry.outcome,
            detail: RoundDetail::Mines {
                mine_count: self.mine_count,
                safe_reveals: self.safe_reveals,
                hit_mine: false,
            },
        })
    }
}

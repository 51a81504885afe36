//! Crash
//!
//! The crash point is committed before the ascent starts, drawn from
//! the shared heavy-tail transform. The multiplier climbs with a
//! growing step per tick; the player must cash out strictly before the
//! crash point is reached. The multiplier is captured synchronously at
//! cash-out, so no later tick can change the payout.

use crate::errors::{ParlorError, ParlorResult};
use crate::games::curve::heavy_tail;
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::RandomSource;
use crate::session::{Session, Stake};

const START_MULTIPLIER: f64 = 1.0;
const START_SPEED: f64 = 0.01;
const ACCELERATION: f64 = 0.0005;

/// Result of advancing the ascent by one tick.
#[derive(Debug, Clone)]
pub enum CrashTick {
    /// Still climbing; the multiplier the player could cash out at now.
    Climbing(f64),
    /// The pre-committed crash point was reached; the stake is gone.
    Crashed(RoundReport),
}

/// One in-flight crash round.
///
/// Created by [`CrashRound::begin`], which debits the stake. Exactly
/// one of [`tick`](CrashRound::tick) reaching the crash point or
/// [`cash_out`](CrashRound::cash_out) settles the round.
pub struct CrashRound {
    stake: Option<Stake>,
    bet: f64,
    crash_point: f64,
    multiplier: f64,
    speed: f64,
}

impl CrashRound {
    /// Debit the stake and commit the crash point.
    pub fn begin(
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
    ) -> ParlorResult<Self> {
        let receipt = session.place_bet(stake)?;
        let crash_point = heavy_tail(rng.next_f64());
        tracing::debug!(crash_point, "crash round armed");
        Ok(Self {
            stake: Some(receipt),
            bet: stake,
            crash_point,
            multiplier: START_MULTIPLIER,
            speed: START_SPEED,
        })
    }

    /// Current cash-out multiplier.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn is_finished(&self) -> bool {
        self.stake.is_none()
    }

    /// Advance the ascent one step. Settles a zero payout the moment
    /// the multiplier reaches the crash point.
    pub fn tick(&mut self, session: &mut Session) -> ParlorResult<CrashTick> {
        let Some(receipt) = self.stake.take() else {
            return Err(ParlorError::selection("crash round already finished"));
        };

        self.speed += ACCELERATION;
        self.multiplier += self.speed;

        if self.multiplier >= self.crash_point {
            let entry = session.settle(receipt, 0.0, GameKind::Crash, 0.0);
            return Ok(CrashTick::Crashed(RoundReport {
                game: GameKind::Crash,
                bet: self.bet,
                payout: 0.0,
                multiplier: 0.0,
                outcome: entry.outcome,
                detail: RoundDetail::Crash {
                    crash_point: self.crash_point,
                    cashed_out: None,
                },
            }));
        }

        self.stake = Some(receipt);
        Ok(CrashTick::Climbing(self.multiplier))
    }

    /// Cash out at the current multiplier.
    ///
    /// The multiplier is read before the round is torn down; a cash-out
    /// at or past the crash point still loses (strictly-before rule).
    pub fn cash_out(&mut self, session: &mut Session) -> ParlorResult<RoundReport> {
        let Some(receipt) = self.stake.take() else {
            return Err(ParlorError::selection("crash round already finished"));
        };

        let at = self.multiplier;
        if at >= self.crash_point {
            let entry = session.settle(receipt, 0.0, GameKind::Crash, 0.0);
            return Ok(RoundReport {
                game: GameKind::Crash,
                bet: self.bet,
                payout: 0.0,
                multiplier: 0.0,
                outcome: entry.outcome,
                detail: RoundDetail::Crash {
                    crash_point: self.crash_point,
                    cashed_out: None,
                },
            });
        }

        let payout = self.bet * at;
        let entry = session.settle(receipt, payout, GameKind::Crash, at);
        Ok(RoundReport {
            game: GameKind::Crash,
            bet: self.bet,
            payout,
            multiplier: at,
            outcome: entry.outcome,
            detail: RoundDetail::Crash {
                crash_point: self.crash_point,
                cashed_out: Some(at),
            },
        })
    }
}

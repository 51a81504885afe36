//! Batch simulation harness
//!
//! Drives whole sessions of rounds against the engines and reports
//! aggregate statistics (win rate, observed house edge). Multi-step
//! games run under small fixed policies so batches stay deterministic
//! for a seeded random source.

use crate::config::ParlorConfig;
use crate::errors::{ParlorError, ParlorResult};
use crate::games::blackjack::{BlackjackRound, TableEvent, HUMAN_SEAT};
use crate::games::crash::{CrashRound, CrashTick};
use crate::games::mines::{MinesReveal, MinesRound};
use crate::games::trivia::{TriviaProgress, TriviaRound};
use crate::games::types::{GameKind, RoundReport};
use crate::games::{blackjack, dice, keno, limbo, plinko, roulette, slots};
use crate::rng::RandomSource;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Dice policy: roll under 50 (even-ish odds).
const DICE_THRESHOLD: u8 = 50;
/// Limbo/crash policy: take profits at 2x.
const TARGET_MULTIPLIER: f64 = 2.0;
/// Keno policy: a fixed five-spot card.
const KENO_PICKS: [u8; 5] = [4, 8, 15, 16, 23];
/// Mines policy: reveal three cells, then bank.
const MINES_REVEALS: usize = 3;

const STEP_LIMIT: usize = 10_000;

/// Aggregate results for one game batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub game: GameKind,
    pub rounds: usize,
    pub wins: usize,
    pub total_wagered: f64,
    pub total_paid: f64,
    pub win_rate: f64,
    /// Observed house take as a fraction of the total wagered
    pub house_edge: f64,
    pub execution_time: Duration,
}

/// Results of a sweep across every game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub per_game: Vec<BatchReport>,
    pub total_rounds: usize,
    pub total_wagered: f64,
    pub total_paid: f64,
    pub overall_house_edge: f64,
}

/// Batch runner bound to a configuration.
pub struct SimulationHarness {
    config: ParlorConfig,
}

impl SimulationHarness {
    pub fn new(config: ParlorConfig) -> Self {
        Self { config }
    }

    /// Play `rounds` rounds of one game in a fresh funded session.
    pub fn run_batch(
        &self,
        rng: &mut dyn RandomSource,
        game: GameKind,
        rounds: usize,
        stake: f64,
    ) -> ParlorResult<BatchReport> {
        if rounds == 0 {
            return Err(ParlorError::selection("batch needs at least one round"));
        }
        if stake <= 0.0 {
            return Err(ParlorError::selection("batch stake must be positive"));
        }

        let mut session = Session::new(self.config.session.clone());
        // worst case every round loses its full stake
        session.deposit(stake * rounds as f64)?;

        let start = Instant::now();
        let mut trivia_progress = TriviaProgress::new();
        for _ in 0..rounds {
            self.play_round(&mut session, rng, game, stake, &mut trivia_progress)?;
        }
        let execution_time = start.elapsed();

        let stats = session.stats();
        tracing::info!(
            %game,
            rounds,
            house_edge = stats.house_edge,
            "batch complete"
        );
        Ok(BatchReport {
            game,
            rounds: stats.rounds,
            wins: stats.wins,
            total_wagered: stats.total_wagered,
            total_paid: stats.total_paid,
            win_rate: stats.wins as f64 / stats.rounds as f64,
            house_edge: stats.house_edge,
            execution_time,
        })
    }

    /// Run one batch per game and aggregate the totals.
    pub fn run_sweep(
        &self,
        rng: &mut dyn RandomSource,
        rounds_per_game: usize,
        stake: f64,
    ) -> ParlorResult<SweepReport> {
        let mut per_game = Vec::new();
        let mut total_rounds = 0;
        let mut total_wagered = 0.0;
        let mut total_paid = 0.0;

        for game in GameKind::all() {
            let report = self.run_batch(rng, game, rounds_per_game, stake)?;
            total_rounds += report.rounds;
            total_wagered += report.total_wagered;
            total_paid += report.total_paid;
            per_game.push(report);
        }

        let overall_house_edge = if total_wagered > 0.0 {
            (total_wagered - total_paid) / total_wagered
        } else {
            0.0
        };
        Ok(SweepReport {
            per_game,
            total_rounds,
            total_wagered,
            total_paid,
            overall_house_edge,
        })
    }

    /// One round of `game` under the harness policy.
    fn play_round(
        &self,
        session: &mut Session,
        rng: &mut dyn RandomSource,
        game: GameKind,
        stake: f64,
        trivia_progress: &mut TriviaProgress,
    ) -> ParlorResult<RoundReport> {
        match game {
            GameKind::Dice => dice::play(session, rng, stake, DICE_THRESHOLD),
            GameKind::Limbo => limbo::play(session, rng, stake, TARGET_MULTIPLIER),
            GameKind::Roulette => roulette::play(session, rng, stake, roulette::RouletteBet::Red),
            GameKind::Slots => slots::play(session, rng, stake),
            GameKind::Keno => keno::play(session, rng, stake, &KENO_PICKS),
            GameKind::Plinko => plinko::play(session, rng, stake),
            GameKind::Crash => self.play_crash(session, rng, stake),
            GameKind::Mines => self.play_mines(session, rng, stake),
            GameKind::Trivia => self.play_trivia(session, rng, stake, trivia_progress),
            GameKind::Blackjack => self.play_blackjack(session, rng, stake),
        }
    }

    /// Crash policy: ride to the target multiplier, then cash out.
    fn play_crash(
        &self,
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
    ) -> ParlorResult<RoundReport> {
        let mut round = CrashRound::begin(session, rng, stake)?;
        for _ in 0..STEP_LIMIT {
            match round.tick(session)? {
                CrashTick::Climbing(multiplier) => {
                    if multiplier >= TARGET_MULTIPLIER {
                        return round.cash_out(session);
                    }
                }
                CrashTick::Crashed(report) => return Ok(report),
            }
        }
        round.cash_out(session)
    }

    /// Mines policy: reveal a few random cells, then bank the run.
    fn play_mines(
        &self,
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
    ) -> ParlorResult<RoundReport> {
        let mine_count = self.config.games.default_mine_count;
        let mut round = MinesRound::begin(session, rng, stake, mine_count)?;

        let mut revealed = Vec::with_capacity(MINES_REVEALS);
        while revealed.len() < MINES_REVEALS {
            let cell = rng.pick_index(crate::games::mines::GRID_CELLS);
            if revealed.contains(&cell) {
                continue;
            }
            revealed.push(cell);
            if let MinesReveal::Mine(report) = round.reveal(session, cell)? {
                return Ok(report);
            }
        }
        round.cash_out(session)
    }

    /// Trivia policy: guess uniformly at random.
    fn play_trivia(
        &self,
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
        progress: &mut TriviaProgress,
    ) -> ParlorResult<RoundReport> {
        let mut round = TriviaRound::begin(session, rng, stake)?;
        let options = round.question().options.len();
        let choice = rng.pick_index(options);
        round.answer(session, progress, choice)
    }

    /// Blackjack policy: the human mirrors the dealer (hit under 17).
    fn play_blackjack(
        &self,
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
    ) -> ParlorResult<RoundReport> {
        let mut round = BlackjackRound::begin(session, rng, stake)?;
        for _ in 0..STEP_LIMIT {
            match round.step(session, rng)? {
                TableEvent::AwaitingPlayer => {
                    let hand = &round.seats()[HUMAN_SEAT].hand;
                    if blackjack::hand_value(hand) < 17 {
                        round.hit(rng)?;
                    } else {
                        round.stand()?;
                    }
                }
                TableEvent::Settled(report) => return Ok(report),
                _ => {}
            }
        }
        Err(ParlorError::selection("blackjack round failed to settle"))
    }
}

/// Render a batch report as a plain-text block.
pub fn render_batch(report: &BatchReport) -> String {
    format!(
        "{:<10} rounds: {:<6} wins: {:<6} wagered: {:>12.2} paid: {:>12.2} win rate: {:>5.1}% edge: {:>6.2}% ({:?})",
        report.game.to_string(),
        report.rounds,
        report.wins,
        report.total_wagered,
        report.total_paid,
        report.win_rate * 100.0,
        report.house_edge * 100.0,
        report.execution_time,
    )
}

/// Render a sweep report as a plain-text table.
pub fn render_sweep(report: &SweepReport) -> String {
    let mut out = String::new();
    for batch in &report.per_game {
        out.push_str(&render_batch(batch));
        out.push('\n');
    }
    out.push_str(&format!(
        "total: {} rounds, {:.2} wagered, {:.2} paid, overall edge {:.2}%\n",
        report.total_rounds,
        report.total_wagered,
        report.total_paid,
        report.overall_house_edge * 100.0,
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;

    #[test]
    fn test_batch_accounting_is_consistent() {
        let harness = SimulationHarness::new(ParlorConfig::default());
        let mut rng = SeededRandom::from_seed(42);
        let report = harness
            .run_batch(&mut rng, GameKind::Dice, 200, 10.0)
            .expect("batch");

        assert_eq!(report.rounds, 200);
        assert_eq!(report.total_wagered, 2000.0);
        assert!(report.wins <= report.rounds);
        assert!((0.0..=1.0).contains(&report.win_rate));
    }

    #[test]
    fn test_batches_are_reproducible_for_a_seed() {
        let harness = SimulationHarness::new(ParlorConfig::default());
        let mut a = SeededRandom::from_seed(7);
        let mut b = SeededRandom::from_seed(7);
        let ra = harness
            .run_batch(&mut a, GameKind::Limbo, 100, 5.0)
            .expect("batch");
        let rb = harness
            .run_batch(&mut b, GameKind::Limbo, 100, 5.0)
            .expect("batch");
        assert_eq!(ra.total_paid, rb.total_paid);
        assert_eq!(ra.wins, rb.wins);
    }

    #[test]
    fn test_every_game_survives_a_small_batch() {
        let harness = SimulationHarness::new(ParlorConfig::default());
        let mut rng = SeededRandom::from_seed(99);
        for game in GameKind::all() {
            let report = harness
                .run_batch(&mut rng, game, 25, 10.0)
                .unwrap_or_else(|e| panic!("{} batch failed: {}", game, e));
            assert_eq!(report.rounds, 25, "{}", game);
            assert_eq!(report.total_wagered, 250.0, "{}", game);
        }
    }

    #[test]
    fn test_sweep_aggregates_all_games() {
        let harness = SimulationHarness::new(ParlorConfig::default());
        let mut rng = SeededRandom::from_seed(1);
        let sweep = harness.run_sweep(&mut rng, 10, 10.0).expect("sweep");
        assert_eq!(sweep.per_game.len(), 10);
        assert_eq!(sweep.total_rounds, 100);
        let rendered = render_sweep(&sweep);
        assert!(rendered.contains("overall edge"));
    }

    #[test]
    fn test_zero_round_batch_rejected() {
        let harness = SimulationHarness::new(ParlorConfig::default());
        let mut rng = SeededRandom::from_seed(1);
        assert!(harness.run_batch(&mut rng, GameKind::Dice, 0, 10.0).is_err());
        assert!(harness
            .run_batch(&mut rng, GameKind::Dice, 10, 0.0)
            .is_err());
    }
}

//! Parlor - Simulated Casino Engine
//!
//! A session ledger (fake-currency balance plus an append-only round
//! log) and ten independent game outcome engines: slots, dice,
//! blackjack, roulette, crash, mines, plinko, keno, limbo and the
//! trivia wheel. Every engine draws randomness through an injectable
//! source and resolves synchronously; animation pacing belongs to the
//! caller. No persistence, no network, no real money.

pub mod concierge;
pub mod config;
pub mod errors;
pub mod games;
pub mod lobby;
pub mod rng;
pub mod session;
pub mod simulate;

pub use config::{GamesConfig, ParlorConfig, SessionConfig};
pub use errors::{ParlorError, ParlorResult};
pub use games::{GameKind, GameParams, RoundDetail, RoundOutcome, RoundReport};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use session::{LogEntry, Session, SessionStats, Stake, UserProfile};

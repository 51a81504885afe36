//! Session ledger and shared wager contract
//!
//! A [`Session`] owns the fake-currency balance and the append-only
//! round log. Every game goes through the same two-step contract:
//! [`Session::place_bet`] debits the stake up front and hands back a
//! [`Stake`] receipt, and [`Session::settle`] consumes that receipt to
//! credit the payout and write exactly one [`LogEntry`]. The receipt is
//! not clonable, so a round cannot settle twice.
//!
//! The session is an explicit object injected into each game engine,
//! never a process-global.

use crate::config::SessionConfig;
use crate::errors::{ParlorError, ParlorResult};
use crate::games::types::{GameKind, RoundOutcome};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Log label used for non-game ledger entries (registration, bonuses).
pub const SYSTEM_LABEL: &str = "SYSTEM";

/// Registered player profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub joined_at: i64,
    pub vip: bool,
    pub admin: bool,
}

/// Immutable record of one completed round (or system event).
///
/// Entries are prepended to the session log, newest first, and never
/// mutated or removed. `outcome` is `Win` iff `payout >= bet`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub user: String,
    pub game: String,
    pub bet: f64,
    pub payout: f64,
    pub multiplier: f64,
    pub timestamp: i64,
    pub outcome: RoundOutcome,
}

/// Receipt for a debited stake, consumed by settlement.
#[derive(Debug)]
pub struct Stake {
    amount: f64,
}

impl Stake {
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Aggregate snapshot of the session's game rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds: usize,
    pub wins: usize,
    pub total_wagered: f64,
    pub total_paid: f64,
    /// Observed house take as a fraction of the total wagered
    pub house_edge: f64,
}

type SettleObserver = Box<dyn FnMut(&LogEntry)>;

/// Single-player session: balance, log and observer hooks.
pub struct Session {
    config: SessionConfig,
    user: Option<UserProfile>,
    balance: f64,
    log: Vec<LogEntry>,
    observers: Vec<SettleObserver>,
}

impl Session {
    /// Fresh session with zero balance and an empty log.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            user: None,
            balance: 0.0,
            log: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register the player and credit the starting bankroll.
    ///
    /// The configured admin code unlocks the operator profile and
    /// bankroll; any other name gets the welcome bonus.
    pub fn register(&mut self, name: &str) -> ParlorResult<UserProfile> {
        if self.user.is_some() {
            return Err(ParlorError::selection("session already registered"));
        }
        if name.trim().is_empty() {
            return Err(ParlorError::selection("player name must not be empty"));
        }

        let admin = name == self.config.admin_code;
        let profile = UserProfile {
            name: if admin {
                "Master Operator".to_string()
            } else {
                name.to_string()
            },
            joined_at: now_millis(),
            vip: true,
            admin,
        };
        self.user = Some(profile.clone());

        if admin {
            self.balance += self.config.admin_bankroll;
            self.push_entry(SYSTEM_LABEL.to_string(), 0.0, 0.0, 0.0);
            tracing::info!(bankroll = self.balance, "operator access granted");
        } else {
            let bonus = self.config.welcome_bonus;
            self.balance += bonus;
            self.push_entry(SYSTEM_LABEL.to_string(), 0.0, bonus, 1.0);
            tracing::info!(player = name, bonus, "player registered");
        }

        Ok(profile)
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Round log, newest entry first.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Register an observer called once per settlement (the win/loss
    /// banner and lobby feed hook point). Observers are presentation
    /// only and must not affect outcome correctness.
    pub fn on_settled(&mut self, observer: impl FnMut(&LogEntry) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Credit the balance directly (wallet deposits, admin adjustments).
    pub fn deposit(&mut self, amount: f64) -> ParlorResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ParlorError::selection("deposit amount must be non-negative"));
        }
        self.balance += amount;
        Ok(())
    }

    /// Debit the balance directly.
    pub fn withdraw(&mut self, amount: f64) -> ParlorResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ParlorError::selection("withdrawal amount must be non-negative"));
        }
        if amount > self.balance {
            return Err(ParlorError::InsufficientFunds {
                stake: amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Debit a stake before the outcome is known.
    ///
    /// Rejects with [`ParlorError::InsufficientFunds`] iff the stake
    /// exceeds the balance; the balance is unchanged on rejection.
    pub fn place_bet(&mut self, stake: f64) -> ParlorResult<Stake> {
        if !stake.is_finite() || stake < 0.0 {
            return Err(ParlorError::selection("stake must be a non-negative amount"));
        }
        if stake > self.balance {
            return Err(ParlorError::InsufficientFunds {
                stake,
                balance: self.balance,
            });
        }
        self.balance -= stake;
        tracing::debug!(stake, balance = self.balance, "stake debited");
        Ok(Stake { amount: stake })
    }

    /// Credit the payout for a completed round and append its log entry.
    ///
    /// Consumes the stake receipt, so each debit settles exactly once.
    pub fn settle(
        &mut self,
        stake: Stake,
        payout: f64,
        game: GameKind,
        multiplier: f64,
    ) -> LogEntry {
        self.balance += payout;
        tracing::debug!(
            %game,
            bet = stake.amount,
            payout,
            multiplier,
            balance = self.balance,
            "round settled"
        );

        let entry = LogEntry {
            id: Uuid::new_v4().to_string(),
            user: self.player_name(),
            game: game.to_string(),
            bet: stake.amount,
            payout,
            multiplier,
            timestamp: now_millis(),
            outcome: RoundOutcome::classify(stake.amount, payout),
        };
        self.log.insert(0, entry.clone());
        for observer in &mut self.observers {
            observer(&entry);
        }
        entry
    }

    /// Aggregate stats over game rounds (system entries excluded).
    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats {
            rounds: 0,
            wins: 0,
            total_wagered: 0.0,
            total_paid: 0.0,
            house_edge: 0.0,
        };
        for entry in &self.log {
            if entry.game == SYSTEM_LABEL {
                continue;
            }
            stats.rounds += 1;
            if entry.outcome == RoundOutcome::Win {
                stats.wins += 1;
            }
            stats.total_wagered += entry.bet;
            stats.total_paid += entry.payout;
        }
        if stats.total_wagered > 0.0 {
            stats.house_edge = (stats.total_wagered - stats.total_paid) / stats.total_wagered;
        }
        stats
    }

    fn player_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Guest".to_string())
    }

    fn push_entry(&mut self, game: String, bet: f64, payout: f64, multiplier: f64) {
        let entry = LogEntry {
            id: Uuid::new_v4().to_string(),
            user: self.player_name(),
            game,
            bet,
            payout,
            multiplier,
            timestamp: now_millis(),
            outcome: RoundOutcome::classify(bet, payout),
        };
        self.log.insert(0, entry);
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

//! Lobby feed and cross-session broadcast seam
//!
//! The lobby shows a rolling feed of chat lines and win announcements
//! from "other players". Transport is behind the [`Broadcast`] trait so
//! the feed works identically over a real channel or the no-op stub;
//! nothing here can affect game outcomes or the ledger.

use crate::errors::ParlorResult;
use crate::games::types::GameKind;
use crate::session::LogEntry;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum feed length; older messages fall off the back.
pub const FEED_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LobbyEventKind {
    Chat,
    Win,
}

/// One lobby feed item, sent and received as opaque JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyMessage {
    #[serde(rename = "type")]
    pub kind: LobbyEventKind,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameKind>,
    pub timestamp: i64,
}

impl LobbyMessage {
    pub fn chat(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: LobbyEventKind::Chat,
            user: user.into(),
            message: Some(message.into()),
            amount: None,
            game: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn win(user: impl Into<String>, amount: f64, game: GameKind) -> Self {
        Self {
            kind: LobbyEventKind::Win,
            user: user.into(),
            message: None,
            amount: Some(amount),
            game: Some(game),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Win announcement derived from a settled ledger entry, or `None`
    /// for rounds not worth announcing.
    pub fn from_settlement(entry: &LogEntry) -> Option<Self> {
        if entry.payout <= 0.0 {
            return None;
        }
        let game = entry.game.parse::<GameKind>().ok()?;
        Some(Self::win(entry.user.clone(), entry.payout, game))
    }
}

/// Same-origin broadcast transport (send/receive opaque messages).
pub trait Broadcast {
    fn publish(&mut self, message: &LobbyMessage) -> ParlorResult<()>;
    fn poll(&mut self) -> ParlorResult<Vec<LobbyMessage>>;
}

/// No-op transport for single-session and test runs.
#[derive(Debug, Default)]
pub struct NullBroadcast;

impl Broadcast for NullBroadcast {
    fn publish(&mut self, _message: &LobbyMessage) -> ParlorResult<()> {
        Ok(())
    }

    fn poll(&mut self) -> ParlorResult<Vec<LobbyMessage>> {
        Ok(Vec::new())
    }
}

/// Rolling lobby state: capped message feed plus a player roster.
pub struct LobbyFeed {
    messages: VecDeque<LobbyMessage>,
    players: Vec<String>,
}

impl LobbyFeed {
    /// Fresh feed, pre-seeded with a couple of regulars so the lobby
    /// never looks empty.
    pub fn new() -> Self {
        Self {
            messages: VecDeque::with_capacity(FEED_CAPACITY),
            players: vec!["CryptoKing".to_string(), "Sarah99".to_string()],
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &LobbyMessage> {
        self.messages.iter()
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Record a message locally, tracking its sender in the roster.
    pub fn push(&mut self, message: LobbyMessage) {
        if !message.user.is_empty()
            && message.user != "YOU"
            && !self.players.contains(&message.user)
        {
            self.players.push(message.user.clone());
        }
        self.messages.push_back(message);
        while self.messages.len() > FEED_CAPACITY {
            self.messages.pop_front();
        }
    }

    /// Publish to the transport and mirror into the local feed (the
    /// transport does not echo messages back to their sender).
    pub fn send(
        &mut self,
        transport: &mut dyn Broadcast,
        message: LobbyMessage,
    ) -> ParlorResult<()> {
        transport.publish(&message)?;
        self.push(message);
        Ok(())
    }

    /// Drain the transport into the local feed.
    pub fn sync(&mut self, transport: &mut dyn Broadcast) -> ParlorResult<()> {
        for message in transport.poll()? {
            self.push(message);
        }
        Ok(())
    }
}

impl Default for LobbyFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::types::RoundOutcome;

    #[test]
    fn test_feed_caps_at_fifty_messages() {
        let mut feed = LobbyFeed::new();
        for i in 0..120 {
            feed.push(LobbyMessage::chat(format!("user-{}", i % 7), "hi"));
        }
        assert_eq!(feed.messages().count(), FEED_CAPACITY);
    }

    #[test]
    fn test_roster_collects_distinct_senders() {
        let mut feed = LobbyFeed::new();
        feed.push(LobbyMessage::chat("Lucas", "hello"));
        feed.push(LobbyMessage::chat("Lucas", "again"));
        feed.push(LobbyMessage::win("Ana", 500.0, GameKind::Crash));
        // two seeded regulars plus two new names
        assert_eq!(feed.players().len(), 4);
    }

    #[test]
    fn test_send_mirrors_locally_over_null_transport() {
        let mut feed = LobbyFeed::new();
        let mut transport = NullBroadcast;
        feed.send(&mut transport, LobbyMessage::chat("Diego", "gl"))
            .expect("send");
        assert_eq!(feed.messages().count(), 1);
        feed.sync(&mut transport).expect("sync");
        assert_eq!(feed.messages().count(), 1);
    }

    #[test]
    fn test_settlement_bridge_skips_losses() {
        let win = LogEntry {
            id: "1".to_string(),
            user: "Ana".to_string(),
            game: "dice".to_string(),
            bet: 10.0,
            payout: 19.6,
            multiplier: 1.96,
            timestamp: 0,
            outcome: RoundOutcome::Win,
        };
        let loss = LogEntry {
            payout: 0.0,
            outcome: RoundOutcome::Loss,
            ..win.clone()
        };
        assert!(LobbyMessage::from_settlement(&win).is_some());
        assert!(LobbyMessage::from_settlement(&loss).is_none());
    }
}

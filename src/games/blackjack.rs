//! Multiplayer blackjack table
//!
//! One human seat plus three bot seats against the dealer. The round is
//! an explicit state machine (`Playing -> DealerTurn -> Ended`) driven
//! one action at a time by [`BlackjackRound::step`], so the caller owns
//! all pacing. Bots follow the dealer policy (hit under 17) and are
//! purely cosmetic: only the human seat settles against the ledger.

use crate::errors::{ParlorError, ParlorResult};
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::{shuffle, RandomSource};
use crate::session::{Session, Stake};
use serde::{Deserialize, Serialize};

/// Index of the human seat at the table.
pub const HUMAN_SEAT: usize = 1;
const SEAT_COUNT: usize = 4;
const DEALER_STANDS_AT: u32 = 17;
const BLACKJACK: u32 = 21;

const BOT_NAMES: [&str; 10] = [
    "Lucas",
    "Ana",
    "Diego",
    "Sofía",
    "Max",
    "Valentina",
    "Leo",
    "Camila",
    "Mateo",
    "Isabella",
];

const HIT_PHRASES: [&str; 5] = ["One more.", "Hit me.", "Again.", "Risking it.", "Deal it."];
const STAND_PHRASES: [&str; 5] = ["I'll stay.", "Enough.", "Holding.", "Good here.", "Standing."];
const BUST_PHRASES: [&str; 5] = ["Bust.", "Too many.", "Over.", "Ouch.", "I'm out."];
const WIN_PHRASES: [&str; 5] = ["Nice!", "Got it.", "Lucky.", "Let's go.", "Yes!"];
const LOSE_PHRASES: [&str; 5] = ["Lost it.", "Close.", "Dealer wins.", "Bad one.", "Ugh."];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

pub const SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    /// Counting value before soft-ace reduction (ace counts 11).
    fn base_value(self) -> u32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

/// Fresh 52-card deck, unshuffled.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in SUITS {
        for rank in RANKS {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Blackjack hand value with repeated soft-ace reduction: aces count 11
/// until the total busts, then drop to 1 one at a time.
pub fn hand_value(hand: &[Card]) -> u32 {
    let mut total = 0;
    let mut aces = 0;
    for card in hand {
        total += card.rank.base_value();
        if card.rank == Rank::Ace {
            aces += 1;
        }
    }
    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total
}

fn is_natural(hand: &[Card]) -> bool {
    hand.len() == 2 && hand_value(hand) == BLACKJACK
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Playing,
    Stood,
    Bust,
    Blackjack,
    Won,
    Lost,
    Push,
}

/// Final outcome of a seat against the dealer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HandResult {
    Won,
    Lost,
    Push,
}

/// One seat at the table.
#[derive(Debug, Clone, Serialize)]
pub struct Seat {
    pub name: String,
    pub is_human: bool,
    pub bet: f64,
    pub hand: Vec<Card>,
    pub status: SeatStatus,
    /// Cosmetic table talk, refreshed on each action
    pub chat: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Playing,
    DealerTurn,
    Ended,
}

/// One observable table transition produced by [`BlackjackRound::step`].
#[derive(Debug, Clone)]
pub enum TableEvent {
    /// The human seat is up and has a decision to make.
    AwaitingPlayer,
    BotHit { seat: usize, busted: bool },
    BotStood { seat: usize },
    PlayerBlackjack,
    PlayerBust,
    DealerDrew,
    /// The round ended and the human seat was settled.
    Settled(RoundReport),
}

fn pick_phrase(rng: &mut dyn RandomSource, pool: &[&'static str]) -> &'static str {
    pool[rng.pick_index(pool.len())]
}

/// One blackjack round: dealer plus four seats, turn order by seat index.
pub struct BlackjackRound {
    stake: Option<Stake>,
    bet: f64,
    deck: Vec<Card>,
    dealer: Vec<Card>,
    seats: Vec<Seat>,
    active: usize,
    state: TableState,
}

impl BlackjackRound {
    /// Debit the stake, shuffle a fresh deck and deal the table.
    pub fn begin(
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
    ) -> ParlorResult<Self> {
        let mut deck = standard_deck();
        shuffle(rng, &mut deck);
        Self::begin_with_deck(session, rng, stake, deck)
    }

    /// Deal from a caller-supplied deck (drawn by popping from the end).
    /// Randomness is still used for bot names, side bets and chat.
    pub fn begin_with_deck(
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
        deck: Vec<Card>,
    ) -> ParlorResult<Self> {
        let receipt = session.place_bet(stake)?;

        let mut names: Vec<&'static str> = BOT_NAMES.to_vec();
        shuffle(rng, &mut names);

        let mut round = Self {
            stake: Some(receipt),
            bet: stake,
            deck,
            dealer: Vec::new(),
            seats: Vec::with_capacity(SEAT_COUNT),
            active: 0,
            state: TableState::Playing,
        };

        for index in 0..SEAT_COUNT {
            let is_human = index == HUMAN_SEAT;
            let hand = vec![round.draw()?, round.draw()?];
            round.seats.push(Seat {
                name: if is_human {
                    "You".to_string()
                } else {
                    names[if index < HUMAN_SEAT { index } else { index - 1 }].to_string()
                },
                is_human,
                bet: if is_human {
                    stake
                } else {
                    f64::from(rng.int_in(50, 549))
                },
                hand,
                status: SeatStatus::Playing,
                chat: None,
            });
        }
        round.dealer = vec![round.draw()?, round.draw()?];

        tracing::debug!(stake, "blackjack table dealt");
        Ok(round)
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Dealer hand. The second card is dealt face down and should stay
    /// hidden in any presentation until the dealer's turn.
    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer
    }

    pub fn dealer_total(&self) -> u32 {
        hand_value(&self.dealer)
    }

    /// Seat whose turn it is, while play is in progress.
    pub fn active_seat(&self) -> Option<usize> {
        match self.state {
            TableState::Playing => Some(self.active),
            _ => None,
        }
    }

    /// True when the human seat is up and still has a live hand.
    pub fn is_human_turn(&self) -> bool {
        self.state == TableState::Playing
            && self.active == HUMAN_SEAT
            && self.seats[HUMAN_SEAT].status == SeatStatus::Playing
    }

    fn draw(&mut self) -> ParlorResult<Card> {
        self.deck
            .pop()
            .ok_or_else(|| ParlorError::selection("deck exhausted"))
    }

    fn advance_turn(&mut self) {
        if self.active + 1 < SEAT_COUNT {
            self.active += 1;
        } else {
            self.state = TableState::DealerTurn;
        }
    }

    /// Human action: take a card. Busting ends the seat's turn.
    pub fn hit(&mut self, rng: &mut dyn RandomSource) -> ParlorResult<u32> {
        if !self.is_human_turn() {
            return Err(ParlorError::selection("no active turn for the player"));
        }
        if is_natural(&self.seats[HUMAN_SEAT].hand) {
            return Err(ParlorError::selection("blackjack hands are already resolved"));
        }

        let card = self.draw()?;
        let seat = &mut self.seats[HUMAN_SEAT];
        seat.hand.push(card);
        let value = hand_value(&seat.hand);
        if value > BLACKJACK {
            seat.status = SeatStatus::Bust;
            seat.chat = Some(pick_phrase(rng, &BUST_PHRASES));
            self.advance_turn();
        }
        Ok(value)
    }

    /// Human action: stand and pass the turn.
    pub fn stand(&mut self) -> ParlorResult<()> {
        if !self.is_human_turn() {
            return Err(ParlorError::selection("no active turn for the player"));
        }
        self.seats[HUMAN_SEAT].status = SeatStatus::Stood;
        self.advance_turn();
        Ok(())
    }

    /// Advance the table by one action: a bot decision, a human
    /// auto-resolution (natural/bust), a dealer draw, or the final
    /// settlement. Returns `AwaitingPlayer` without changing anything
    /// while the human seat has a decision pending.
    pub fn step(
        &mut self,
        session: &mut Session,
        rng: &mut dyn RandomSource,
    ) -> ParlorResult<TableEvent> {
        match self.state {
            TableState::Playing => {
                let index = self.active;
                if self.seats[index].is_human {
                    let value = hand_value(&self.seats[index].hand);
                    if is_natural(&self.seats[index].hand) {
                        self.seats[index].status = SeatStatus::Blackjack;
                        self.advance_turn();
                        Ok(TableEvent::PlayerBlackjack)
                    } else if value > BLACKJACK {
                        self.seats[index].status = SeatStatus::Bust;
                        self.advance_turn();
                        Ok(TableEvent::PlayerBust)
                    } else {
                        Ok(TableEvent::AwaitingPlayer)
                    }
                } else {
                    let value = hand_value(&self.seats[index].hand);
                    if value < DEALER_STANDS_AT {
                        let card = self.draw()?;
                        let seat = &mut self.seats[index];
                        seat.hand.push(card);
                        let busted = hand_value(&seat.hand) > BLACKJACK;
                        if busted {
                            seat.status = SeatStatus::Bust;
                            seat.chat = Some(pick_phrase(rng, &BUST_PHRASES));
                            self.advance_turn();
                        } else {
                            seat.chat = Some(pick_phrase(rng, &HIT_PHRASES));
                        }
                        Ok(TableEvent::BotHit {
                            seat: index,
                            busted,
                        })
                    } else {
                        let seat = &mut self.seats[index];
                        seat.status = SeatStatus::Stood;
                        seat.chat = Some(pick_phrase(rng, &STAND_PHRASES));
                        self.advance_turn();
                        Ok(TableEvent::BotStood { seat: index })
                    }
                }
            }
            TableState::DealerTurn => {
                if self.dealer_total() < DEALER_STANDS_AT {
                    let card = self.draw()?;
                    self.dealer.push(card);
                    Ok(TableEvent::DealerDrew)
                } else {
                    let report = self.settle_round(session, rng)?;
                    Ok(TableEvent::Settled(report))
                }
            }
            TableState::Ended => Err(ParlorError::selection("round already ended")),
        }
    }

    /// Compare every seat against the dealer and settle the human seat.
    fn settle_round(
        &mut self,
        session: &mut Session,
        rng: &mut dyn RandomSource,
    ) -> ParlorResult<RoundReport> {
        let Some(receipt) = self.stake.take() else {
            return Err(ParlorError::selection("round already settled"));
        };
        self.state = TableState::Ended;
        let dealer_total = hand_value(&self.dealer);

        let mut human_result = HandResult::Lost;
        let mut human_total = 0;
        let mut human_natural = false;
        let mut multiplier = 0.0;

        for seat in &mut self.seats {
            let total = hand_value(&seat.hand);
            let natural = seat.status == SeatStatus::Blackjack;

            let (result, seat_multiplier) = if seat.status == SeatStatus::Bust {
                (HandResult::Lost, 0.0)
            } else if dealer_total > BLACKJACK || total > dealer_total {
                (HandResult::Won, if natural { 2.5 } else { 2.0 })
            } else if total == dealer_total {
                (HandResult::Push, 1.0)
            } else {
                (HandResult::Lost, 0.0)
            };

            seat.status = match result {
                HandResult::Won => SeatStatus::Won,
                HandResult::Push => SeatStatus::Push,
                HandResult::Lost => SeatStatus::Lost,
            };
            seat.chat = Some(match result {
                HandResult::Won => pick_phrase(rng, &WIN_PHRASES),
                HandResult::Push => "Push.",
                HandResult::Lost => pick_phrase(rng, &LOSE_PHRASES),
            });

            if seat.is_human {
                human_result = result;
                human_total = total;
                human_natural = natural;
                multiplier = seat_multiplier;
            }
        }

        let payout = self.bet * multiplier;
        let entry = session.settle(receipt, payout, GameKind::Blackjack, multiplier);
        Ok(RoundReport {
            game: GameKind::Blackjack,
            bet: self.bet,
            payout,
            multiplier,
            outcome: entry.outcome,
            detail: RoundDetail::Blackjack {
                player_total: human_total,
                dealer_total,
                natural: human_natural,
                result: human_result,
            },
        })
    }
}

//! Trivia wheel
//!
//! The stake buys a wheel spin that lands on one of six categories,
//! then a random question from that category's fixed bank. A correct
//! answer pays 2x; answering all six categories correctly across the
//! session pays a 50x jackpot on top and resets the badge collection.

use crate::errors::{ParlorError, ParlorResult};
use crate::games::types::{GameKind, RoundDetail, RoundReport};
use crate::rng::RandomSource;
use crate::session::{Session, Stake};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const SEGMENT_DEGREES: f64 = 360.0 / 6.0;
const FULL_SPINS_DEGREES: f64 = 2160.0;
const BASE_MULTIPLIER: f64 = 2.0;
const JACKPOT_BONUS: f64 = 50.0;

/// Wheel categories, in wheel order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum TriviaCategory {
    Geography,
    History,
    Art,
    Science,
    Entertainment,
    Sports,
}

pub const CATEGORIES: [TriviaCategory; 6] = [
    TriviaCategory::Geography,
    TriviaCategory::History,
    TriviaCategory::Art,
    TriviaCategory::Science,
    TriviaCategory::Entertainment,
    TriviaCategory::Sports,
];

/// One bank question: four options, one correct index.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub answer: usize,
}

/// Fixed question bank for a category.
pub fn question_bank(category: TriviaCategory) -> &'static [Question] {
    match category {
        TriviaCategory::Geography => &[
            Question {
                prompt: "What is the capital of Australia?",
                options: ["Sydney", "Melbourne", "Canberra", "Perth"],
                answer: 2,
            },
            Question {
                prompt: "Which continent is Egypt in?",
                options: ["Asia", "Africa", "Europe", "Oceania"],
                answer: 1,
            },
            Question {
                prompt: "What is the longest river in the world?",
                options: ["Nile", "Amazon", "Yangtze", "Mississippi"],
                answer: 1,
            },
        ],
        TriviaCategory::History => &[
            Question {
                prompt: "In which year did Columbus reach America?",
                options: ["1492", "1500", "1485", "1510"],
                answer: 0,
            },
            Question {
                prompt: "Who was the first president of the United States?",
                options: ["Lincoln", "Washington", "Jefferson", "Adams"],
                answer: 1,
            },
        ],
        TriviaCategory::Art => &[
            Question {
                prompt: "Who painted 'The Starry Night'?",
                options: ["Picasso", "Monet", "Van Gogh", "Dali"],
                answer: 2,
            },
            Question {
                prompt: "Where is the Prado Museum?",
                options: ["Paris", "London", "Madrid", "Rome"],
                answer: 2,
            },
        ],
        TriviaCategory::Science => &[
            Question {
                prompt: "What is the chemical symbol for iron?",
                options: ["Fe", "Hi", "Ir", "In"],
                answer: 0,
            },
            Question {
                prompt: "Which planet is known as the Red Planet?",
                options: ["Venus", "Mars", "Jupiter", "Saturn"],
                answer: 1,
            },
        ],
        TriviaCategory::Entertainment => &[
            Question {
                prompt: "Who played Jack in Titanic?",
                options: ["Brad Pitt", "Tom Cruise", "Leonardo DiCaprio", "Johnny Depp"],
                answer: 2,
            },
            Question {
                prompt: "Which series has dragons and thrones?",
                options: ["Vikings", "Game of Thrones", "The Witcher", "Merlin"],
                answer: 1,
            },
        ],
        TriviaCategory::Sports => &[
            Question {
                prompt: "How many players are on a soccer team?",
                options: ["9", "10", "11", "12"],
                answer: 2,
            },
            Question {
                prompt: "Which sport uses a racket?",
                options: ["Soccer", "Tennis", "Basketball", "Swimming"],
                answer: 1,
            },
        ],
    }
}

/// Session-scoped badge collection.
#[derive(Debug, Clone, Default)]
pub struct TriviaProgress {
    badges: BTreeSet<TriviaCategory>,
}

impl TriviaProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn badges(&self) -> &BTreeSet<TriviaCategory> {
        &self.badges
    }

    pub fn badge_count(&self) -> usize {
        self.badges.len()
    }
}

/// One in-flight trivia round: wheel already spun, answer pending.
pub struct TriviaRound {
    stake: Option<Stake>,
    bet: f64,
    wheel_index: usize,
    category: TriviaCategory,
    question: Question,
}

impl TriviaRound {
    /// Debit the stake and spin the wheel.
    pub fn begin(
        session: &mut Session,
        rng: &mut dyn RandomSource,
        stake: f64,
    ) -> ParlorResult<Self> {
        let receipt = session.place_bet(stake)?;
        let wheel_index = rng.pick_index(CATEGORIES.len());
        let category = CATEGORIES[wheel_index];
        let bank = question_bank(category);
        let question = bank[rng.pick_index(bank.len())];
        tracing::debug!(?category, "trivia wheel landed");

        Ok(Self {
            stake: Some(receipt),
            bet: stake,
            wheel_index,
            category,
            question,
        })
    }

    pub fn category(&self) -> TriviaCategory {
        self.category
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn is_finished(&self) -> bool {
        self.stake.is_none()
    }

    /// Total wheel rotation (degrees) that parks the landed segment
    /// under the pointer after the cosmetic full spins.
    pub fn wheel_rotation(&self) -> f64 {
        FULL_SPINS_DEGREES + (360.0 - self.wheel_index as f64 * SEGMENT_DEGREES)
    }

    /// Answer the question and settle the round.
    ///
    /// A correct answer pays 2x and collects the category badge; the
    /// sixth distinct badge adds the 50x jackpot and resets the
    /// collection.
    pub fn answer(
        &mut self,
        session: &mut Session,
        progress: &mut TriviaProgress,
        choice: usize,
    ) -> ParlorResult<RoundReport> {
        if self.stake.is_none() {
            return Err(ParlorError::selection("trivia round already answered"));
        }
        if choice >= self.question.options.len() {
            return Err(ParlorError::selection(format!(
                "answer index {choice} out of range"
            )));
        }
        let Some(receipt) = self.stake.take() else {
            return Err(ParlorError::selection("trivia round already answered"));
        };

        let correct = choice == self.question.answer;
        let mut jackpot = false;
        let (multiplier, payout) = if correct {
            progress.badges.insert(self.category);
            if progress.badges.len() == CATEGORIES.len() {
                jackpot = true;
                progress.badges.clear();
                (
                    BASE_MULTIPLIER + JACKPOT_BONUS,
                    self.bet * BASE_MULTIPLIER + self.bet * JACKPOT_BONUS,
                )
            } else {
                (BASE_MULTIPLIER, self.bet * BASE_MULTIPLIER)
            }
        } else {
            (0.0, 0.0)
        };

        let entry = session.settle(receipt, payout, GameKind::Trivia, multiplier);
        Ok(RoundReport {
            game: GameKind::Trivia,
            bet: self.bet,
            payout,
            multiplier,
            outcome: entry.outcome,
            detail: RoundDetail::Trivia {
                category: self.category,
                correct,
                jackpot,
            },
        })
    }
}

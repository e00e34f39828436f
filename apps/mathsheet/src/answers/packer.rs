//! Card Packer: flows answer cards into rows for the answer sheet.
//!
//! Greedy, single pass, one row at a time:
//! - a card that would push the row past the full line width starts a new row
//! - a long card always ends its row
//! - every 5 cards within a round switch to the next of 4 color schemes
//! - each round is packed independently and closes its last row
//!
//! Output is a typed entry stream per round; turning it into markup is the
//! renderer's job.

use serde::{Deserialize, Serialize};

use crate::answers::estimator::{classify, estimate_width, CardType};
use crate::layout::group_position;

const LINE_WIDTH: f32 = 1.0;
const SCHEME_PERIOD: usize = 5;
const SCHEME_COUNT: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Answer text for one question, keyed by its printed number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSlot {
    pub index: usize,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub index: usize,
    pub formatted_text: String,
    pub card_type: CardType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PackEntry {
    Card(Card),
    LineBreak,
    /// Cards from here on use color scheme `scheme` (1..=4).
    ColorScheme { scheme: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedRound {
    pub round_num: usize,
    pub entries: Vec<PackEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackedAnswers {
    pub rounds: Vec<PackedRound>,
}

// ────────────────────────────────────────────────────────────────────────────
// Packing
// ────────────────────────────────────────────────────────────────────────────

/// Builds the card for one answer.
pub fn make_card(index: usize, markup: &str) -> Card {
    Card {
        index,
        formatted_text: format_answer(markup),
        card_type: classify(estimate_width(markup)),
    }
}

/// Trims and collapses whitespace runs to single spaces.
pub fn format_answer(markup: &str) -> String {
    markup.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Color scheme (1-based) for a 1-based position within a round.
pub fn color_scheme(position_in_round: usize) -> u8 {
    // Bounded by SCHEME_COUNT, so the cast is lossless.
    (position_in_round.saturating_sub(1) / SCHEME_PERIOD % SCHEME_COUNT + 1) as u8
}

/// Packs answers in order, splitting rounds every `items_per_group` answers
/// (`0` = a single round).
pub fn pack_answers(answers: &[AnswerSlot], items_per_group: usize) -> PackedAnswers {
    let mut rounds = Vec::new();
    let mut current: Option<RoundBuilder> = None;

    for (k, slot) in answers.iter().enumerate() {
        let (round_num, position) = group_position(k, items_per_group);
        if current.as_ref().map(|r| r.round_num) != Some(round_num) {
            if let Some(done) = current.take() {
                rounds.push(done.finish());
            }
        }
        current
            .get_or_insert_with(|| RoundBuilder::new(round_num))
            .push(make_card(slot.index, &slot.answer), position);
    }
    if let Some(done) = current {
        rounds.push(done.finish());
    }

    PackedAnswers { rounds }
}

struct RoundBuilder {
    round_num: usize,
    entries: Vec<PackEntry>,
    line_width: f32,
}

impl RoundBuilder {
    fn new(round_num: usize) -> Self {
        Self {
            round_num,
            entries: Vec::new(),
            line_width: 0.0,
        }
    }

    fn break_line(&mut self) {
        self.entries.push(PackEntry::LineBreak);
        self.line_width = 0.0;
    }

    fn push(&mut self, card: Card, position: usize) {
        let width = card.card_type.width();
        if self.line_width > 0.0 && self.line_width + width > LINE_WIDTH {
            self.break_line();
        }
        if (position - 1) % SCHEME_PERIOD == 0 {
            self.entries.push(PackEntry::ColorScheme {
                scheme: color_scheme(position),
            });
        }

        let long = card.card_type == CardType::LongCard;
        self.entries.push(PackEntry::Card(card));
        self.line_width += width;
        if long {
            self.break_line();
        }
    }

    fn finish(mut self) -> PackedRound {
        if self.line_width > 0.0 {
            self.break_line();
        }
        PackedRound {
            round_num: self.round_num,
            entries: self.entries,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

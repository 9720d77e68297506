use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// Cards dealt to each player at the start of a round.
pub const HAND_SIZE: usize = 7;

/// Identifier handed to the engine by the hosting session.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        PlayerId(s)
    }
}

/// A seated player's hand and running score.
///
/// `points` accumulates round scores for the whole game and never decreases: the
/// perfect-meld bonus is reported in the round results but not subtracted.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    hand: Vec<Card>,
    points: i32,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hand(hand: Vec<Card>, points: i32) -> Self {
        Self { hand, points }
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn holds(&self, card: CardId) -> bool {
        self.hand.iter().any(|c| c.id() == card)
    }

    pub fn give_card(&mut self, c: Card) {
        self.hand.push(c);
    }

    /// Removes and returns the card with id `card`, if held.
    pub fn take_card(&mut self, card: CardId) -> Option<Card> {
        let idx = self.hand.iter().position(|c| c.id() == card)?;
        Some(self.hand.remove(idx))
    }

    pub fn set_hand(&mut self, hand: Vec<Card>) {
        self.hand = hand;
    }

    pub fn clear_cards(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }

    /// Adds a round score to the total. Negative scores leave the total unchanged.
    pub fn add_points(&mut self, amount: i32) {
        self.points = self.points.saturating_add(amount.max(0));
    }
}

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{standard_cards, Card, Rank, Suit};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Deck composition, fixed for the whole game by the size of the starting roster.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeckVariant {
    /// 52 cards, no jokers (two players)
    Standard,
    /// 52 cards plus the red and black jokers (three or four players)
    WithJokers,
}

impl DeckVariant {
    pub fn for_players(num_players: usize) -> DeckVariant {
        if num_players <= 2 {
            DeckVariant::Standard
        } else {
            DeckVariant::WithJokers
        }
    }

    pub fn size(self) -> usize {
        match self {
            DeckVariant::Standard => 52,
            DeckVariant::WithJokers => 54,
        }
    }

    /// Unshuffled cards for this variant.
    pub fn cards(self) -> Vec<Card> {
        let mut v = standard_cards();
        if self == DeckVariant::WithJokers {
            v.push(Card::new(Rank::RedJoker, Suit::Hearts));
            v.push(Card::new(Rank::BlackJoker, Suit::Spades));
        }
        v
    }
}

/// Unshuffled deck for a game with `num_players` players.
pub fn build_deck(num_players: usize) -> Vec<Card> {
    DeckVariant::for_players(num_players).cards()
}

/// Injected shuffle capability. The engine never generates entropy itself;
/// every reordering of cards goes through an implementation of this trait.
pub trait Shuffler {
    fn shuffle(&mut self, cards: Vec<Card>) -> Vec<Card>;
}

impl<F> Shuffler for F
where
    F: FnMut(Vec<Card>) -> Vec<Card>,
{
    fn shuffle(&mut self, cards: Vec<Card>) -> Vec<Card> {
        self(cards)
    }
}

/// Deterministic shuffler backed by ChaCha20. Two shufflers built from the same
/// seed produce the same sequence of orderings.
#[derive(Debug, Clone)]
pub struct SeededShuffler {
    rng: ChaCha20Rng,
}

impl SeededShuffler {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededShuffler {
    fn default() -> Self {
        Self::new_with_seed(DEFAULT_SEED)
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&mut self, mut cards: Vec<Card>) -> Vec<Card> {
        cards.shuffle(&mut self.rng);
        cards
    }
}

/// Shuffler that leaves the order untouched. Useful for scripted games.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShuffle;

impl Shuffler for NoShuffle {
    fn shuffle(&mut self, cards: Vec<Card>) -> Vec<Card> {
        cards
    }
}

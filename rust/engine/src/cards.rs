use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseCardError;

/// Point value charged for a joker left unmatched at the end of a round.
pub const JOKER_POINTS: u8 = 50;

/// Represents one of the four suits.
/// Jokers carry a nominal suit (Hearts for the red joker, Spades for the black one)
/// that never takes part in run or set matching.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    fn index(self) -> u8 {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }

    fn letter(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }

    fn from_letter(c: char) -> Option<Suit> {
        match c {
            'H' => Some(Suit::Hearts),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Rank of a card as an ordinal from Ace (1) through King (13).
/// The two jokers sit above the standard ranks at 14 and 15 so that consecutive
/// ordinals always mean adjacent ranks for run detection.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1)
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Red joker (14)
    RedJoker,
    /// Black joker (15)
    BlackJoker,
}

impl Rank {
    pub fn from_u8(v: u8) -> Option<Rank> {
        let rank = match v {
            1 => Rank::Ace,
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::RedJoker,
            15 => Rank::BlackJoker,
            _ => return None,
        };
        Some(rank)
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Rank::RedJoker | Rank::BlackJoker)
    }

    /// Points charged for this rank when the card is left out of every combo.
    pub fn point_value(self) -> u8 {
        match self {
            Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::RedJoker | Rank::BlackJoker => JOKER_POINTS,
            r => r.ordinal(),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::RedJoker => "JR",
            Rank::BlackJoker => "JB",
        }
    }
}

/// Stable identity of a physical card within a deck (0..=53).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single playing card. Cards are immutable values identified by [`CardId`];
/// equality and hashing look at the id only.
///
/// Deserialization goes back through [`Card::new`], so an `id` that disagrees with
/// `rank` and `suit` is rejected.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    id: CardId,
    rank: Rank,
    suit: Suit,
}

#[derive(Deserialize)]
struct RawCard {
    id: CardId,
    rank: Rank,
    suit: Suit,
}

impl TryFrom<RawCard> for Card {
    type Error = ParseCardError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        let card = Card::new(raw.rank, raw.suit);
        if card.id != raw.id || card.suit != raw.suit {
            return Err(ParseCardError(format!(
                "{} {:?} {:?}",
                raw.id, raw.rank, raw.suit
            )));
        }
        Ok(card)
    }
}

impl Card {
    /// Builds a card. Joker ranks ignore `suit` and take their nominal one
    /// (Hearts for the red joker, Spades for the black).
    pub fn new(rank: Rank, suit: Suit) -> Card {
        match rank {
            Rank::RedJoker => Card {
                id: CardId(52),
                rank,
                suit: Suit::Hearts,
            },
            Rank::BlackJoker => Card {
                id: CardId(53),
                rank,
                suit: Suit::Spades,
            },
            _ => Card {
                id: CardId(suit.index() * 13 + rank.ordinal() - 1),
                rank,
                suit,
            },
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn ordinal(&self) -> u8 {
        self.rank.ordinal()
    }

    pub fn point_value(&self) -> u8 {
        self.rank.point_value()
    }

    pub fn is_joker(&self) -> bool {
        self.rank.is_joker()
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_joker() {
            f.write_str(self.rank.symbol())
        } else {
            write!(f, "{}{}", self.rank.symbol(), self.suit.letter())
        }
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses the short form used by [`Card`]'s `Display`: `"AH"`, `"10S"`, `"QD"`, `"JR"`, `"JB"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "JR" => return Ok(Card::new(Rank::RedJoker, Suit::Hearts)),
            "JB" => return Ok(Card::new(Rank::BlackJoker, Suit::Spades)),
            _ => {}
        }
        let mut chars = s.chars();
        let suit = chars
            .next_back()
            .and_then(Suit::from_letter)
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let rank = match chars.as_str() {
            "A" => Rank::Ace,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            n => n
                .parse::<u8>()
                .ok()
                .filter(|v| (2..=10).contains(v))
                .and_then(Rank::from_u8)
                .ok_or_else(|| ParseCardError(s.to_string()))?,
        };
        Ok(Card::new(rank, suit))
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
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
    ]
}

/// The 52 standard cards, suit by suit, in ascending rank order.
pub fn standard_cards() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(r, s));
        }
    }
    v
}

/// Orders cards for display: by ordinal, then by suit.
pub fn sort_for_display(cards: &mut [Card]) {
    cards.sort_by_key(|c| (c.ordinal(), c.suit()));
}

/// Sum of the point values of `cards`.
pub fn points_of(cards: &[Card]) -> i32 {
    cards.iter().map(|c| i32::from(c.point_value())).sum()
}

/// Parses a whitespace- or comma-separated list of cards, e.g. `"AH 2H 3H"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

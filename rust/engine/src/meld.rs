use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::permutations::Permutations;

/// Cards a player holds while deciding to meld: the dealt hand plus the card just drawn.
pub const MELD_HAND_SIZE: usize = 8;
/// Highest point value allowed for the single card left out of a discard-shape meld.
pub const MAX_LEFTOVER_POINTS: u8 = 5;

/// Ways a 7-card arrangement can end a round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MeldShape {
    /// All seven cards form one run
    SevenRun,
    /// A six-card run plus one low card
    SixRunAndLeftover,
    /// A four-card combo followed by a three-card combo
    FourThree,
    /// Two three-card combos plus one low card
    ThreeThreeAndLeftover,
}

impl MeldShape {
    /// Perfect melds leave nothing over and earn the scoring bonus.
    pub fn is_perfect(self) -> bool {
        matches!(self, MeldShape::SevenRun | MeldShape::FourThree)
    }
}

/// One ordering of the 7 remaining cards together with the shape it satisfies.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    pub shape: MeldShape,
    pub cards: Vec<Card>,
}

/// Same-suit cards with distinct consecutive ordinals, jokers filling the gaps.
///
/// Jokers only fill gaps between the lowest and highest natural card; a group made of
/// jokers alone is not a run.
pub fn is_run(cards: &[Card]) -> bool {
    let mut suit: Option<Suit> = None;
    let mut mask: u16 = 0;
    let mut naturals = 0u32;
    let mut jokers = 0u32;
    for c in cards {
        if c.is_joker() {
            jokers += 1;
            continue;
        }
        match suit {
            None => suit = Some(c.suit()),
            Some(s) if s != c.suit() => return false,
            Some(_) => {}
        }
        let bit = 1u16 << c.ordinal();
        if mask & bit != 0 {
            return false;
        }
        mask |= bit;
        naturals += 1;
    }
    if mask == 0 {
        return false;
    }
    let low = mask.trailing_zeros();
    let high = 15 - mask.leading_zeros();
    naturals + jokers >= high - low + 1
}

/// Cards sharing one rank once jokers are set aside.
pub fn is_set(cards: &[Card]) -> bool {
    let mut rank: Option<Rank> = None;
    for c in cards.iter().filter(|c| !c.is_joker()) {
        match rank {
            None => rank = Some(c.rank()),
            Some(r) if r != c.rank() => return false,
            Some(_) => {}
        }
    }
    true
}

pub fn is_combo(cards: &[Card]) -> bool {
    is_set(cards) || is_run(cards)
}

fn low_leftover(card: &Card) -> bool {
    card.point_value() <= MAX_LEFTOVER_POINTS
}

/// Classifies a 7-card arrangement, checking fixed prefix splits in order.
///
/// Only the given order is examined (apart from the 7-run, which ignores order); use
/// [`can_meld`] to search over all orderings.
pub fn meld_shape(arrangement: &[Card]) -> Option<MeldShape> {
    if arrangement.len() != MELD_HAND_SIZE - 1 {
        return None;
    }
    if is_run(arrangement) {
        return Some(MeldShape::SevenRun);
    }
    let leftover = &arrangement[6];
    if low_leftover(leftover) && is_run(&arrangement[..6]) {
        return Some(MeldShape::SixRunAndLeftover);
    }
    if is_combo(&arrangement[..4]) && is_combo(&arrangement[4..7]) {
        return Some(MeldShape::FourThree);
    }
    if low_leftover(leftover) && is_combo(&arrangement[..3]) && is_combo(&arrangement[3..6]) {
        return Some(MeldShape::ThreeThreeAndLeftover);
    }
    None
}

fn remainder_after(hand: &[Card], candidate: &Card) -> Option<Vec<Card>> {
    if hand.len() != MELD_HAND_SIZE {
        return None;
    }
    let idx = hand.iter().position(|c| c == candidate)?;
    let mut rest = hand.to_vec();
    rest.remove(idx);
    Some(rest)
}

/// Whether discarding `candidate` from an 8-card `hand` leaves 7 cards that split
/// completely into valid combos.
///
/// Returns `false` when the hand does not hold exactly 8 cards or does not contain
/// `candidate`. The search stops at the first satisfying ordering.
///
/// # Examples
///
/// ```
/// use chinchon_engine::cards::{parse_cards, Card};
/// use chinchon_engine::meld::can_meld;
///
/// let hand = parse_cards("AH 2H 3H 4H 5H 6H 7H 8H").unwrap();
/// let eight: Card = "8H".parse().unwrap();
/// let three: Card = "3H".parse().unwrap();
/// assert!(can_meld(&hand, &eight));
/// assert!(!can_meld(&hand, &three));
/// ```
pub fn can_meld(hand: &[Card], candidate: &Card) -> bool {
    let Some(rest) = remainder_after(hand, candidate) else {
        return false;
    };
    if is_run(&rest) {
        return true;
    }
    let mut perms = Permutations::new(&rest);
    while let Some(p) = perms.advance() {
        if meld_shape(p).is_some() {
            return true;
        }
    }
    false
}

/// Every ordering of the remaining 7 cards that melds, with its shape.
///
/// Unlike [`can_meld`] this walks all 5040 orderings; orderings that differ only inside
/// a combo are listed separately.
pub fn meldable_arrangements(hand: &[Card], candidate: &Card) -> Vec<Arrangement> {
    let Some(rest) = remainder_after(hand, candidate) else {
        return Vec::new();
    };
    let mut found = Vec::new();
    let mut perms = Permutations::new(&rest);
    while let Some(p) = perms.advance() {
        if let Some(shape) = meld_shape(p) {
            found.push(Arrangement {
                shape,
                cards: p.to_vec(),
            });
        }
    }
    found
}

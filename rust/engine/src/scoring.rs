use serde::{Deserialize, Serialize};

use crate::cards::{points_of, Card};
use crate::meld::{is_combo, is_run};
use crate::permutations::Permutations;

/// Score awarded when seven of the cards form a 7-run or a 4+3 split.
pub const PERFECT_MELD_BONUS: i32 = -10;
/// Largest hand the scorer searches; longer hands are charged their full value.
pub const MAX_SCORED_HAND: usize = 8;

/// Lowest-cost outcome for a hand at round end.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandScore {
    /// Points charged to the player (may be negative for a perfect meld)
    pub points: i32,
    /// Ordering of the hand that produced `points`; combos come first, leftovers last
    pub best_partition: Vec<Card>,
}

/// Finds the lowest score over every ordering of `hand`.
///
/// Each ordering is read as a prefix of combos followed by leftover cards whose point
/// values are summed. The baseline is the sum over the whole hand. Ties keep the
/// first ordering found; a perfect meld ends the search at once.
///
/// # Examples
///
/// ```
/// use chinchon_engine::cards::parse_cards;
/// use chinchon_engine::scoring::{score_hand, PERFECT_MELD_BONUS};
///
/// let hand = parse_cards("AS 2S 3S 4S 9H 9D 9C").unwrap();
/// assert_eq!(score_hand(&hand).points, PERFECT_MELD_BONUS);
///
/// let hand = parse_cards("AS 2S 3S KH 9D 9C 4C").unwrap();
/// assert_eq!(score_hand(&hand).points, 10 + 9 + 9 + 4);
/// ```
pub fn score_hand(hand: &[Card]) -> HandScore {
    let mut best = HandScore {
        points: points_of(hand),
        best_partition: hand.to_vec(),
    };
    if hand.len() > MAX_SCORED_HAND {
        return best;
    }
    let mut perms = Permutations::new(hand);
    while let Some(p) = perms.advance() {
        let Some(points) = evaluate(p) else {
            continue;
        };
        if points < best.points {
            best.points = points;
            best.best_partition.copy_from_slice(p);
            if points == PERFECT_MELD_BONUS {
                break;
            }
        }
    }
    best
}

/// Best score this particular ordering allows, if any prefix forms a scoring shape.
fn evaluate(p: &[Card]) -> Option<i32> {
    let n = p.len();
    let mut best: Option<i32> = None;
    let mut consider = |prefix: usize| {
        let points = if prefix == 7 {
            PERFECT_MELD_BONUS
        } else {
            points_of(&p[prefix..])
        };
        best = Some(best.map_or(points, |b| b.min(points)));
    };

    if n >= 7 && (is_run(&p[..7]) || (is_combo(&p[..4]) && is_combo(&p[4..7]))) {
        consider(7);
    }
    if n >= 6 && (is_run(&p[..6]) || (is_combo(&p[..3]) && is_combo(&p[3..6]))) {
        consider(6);
    }
    if n >= 5 && is_run(&p[..5]) {
        consider(5);
    }
    if n >= 4 && is_combo(&p[..4]) {
        consider(4);
    }
    if n >= 3 && is_combo(&p[..3]) {
        consider(3);
    }
    best
}

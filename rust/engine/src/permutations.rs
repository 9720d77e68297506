use crate::cards::Card;

/// Lazy sequence of every ordering of a hand, generated with Heap's algorithm.
///
/// The generator copies its input into a buffer it owns and permutes that buffer in
/// place with single swaps, so each step costs O(1) and callers' hands are never
/// touched. Orderings are lent out one at a time through [`Permutations::advance`];
/// [`Permutations::restart`] rewinds to the first ordering.
///
/// A hand of `n` cards yields exactly `n!` orderings (one, empty, for `n == 0`).
#[derive(Debug, Clone)]
pub struct Permutations {
    original: Vec<Card>,
    buf: Vec<Card>,
    counters: Vec<usize>,
    i: usize,
    started: bool,
}

impl Permutations {
    pub fn new(cards: &[Card]) -> Self {
        Self {
            original: cards.to_vec(),
            buf: cards.to_vec(),
            counters: vec![0; cards.len()],
            i: 1,
            started: false,
        }
    }

    /// Returns the next ordering, or `None` once all have been produced.
    pub fn advance(&mut self) -> Option<&[Card]> {
        if !self.started {
            self.started = true;
            return Some(&self.buf);
        }
        let n = self.buf.len();
        while self.i < n {
            let i = self.i;
            if self.counters[i] < i {
                if i % 2 == 0 {
                    self.buf.swap(0, i);
                } else {
                    self.buf.swap(self.counters[i], i);
                }
                self.counters[i] += 1;
                self.i = 1;
                return Some(&self.buf);
            }
            self.counters[i] = 0;
            self.i += 1;
        }
        None
    }

    pub fn restart(&mut self) {
        self.buf.copy_from_slice(&self.original);
        self.counters.iter_mut().for_each(|c| *c = 0);
        self.i = 1;
        self.started = false;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::cards::parse_cards;

    fn collect(perms: &mut Permutations) -> Vec<Vec<Card>> {
        let mut out = Vec::new();
        while let Some(p) = perms.advance() {
            out.push(p.to_vec());
        }
        out
    }

    #[test]
    fn yields_every_ordering_exactly_once() {
        let hand = parse_cards("AH 2H 3H 4H").unwrap();
        let all = collect(&mut Permutations::new(&hand));
        assert_eq!(all.len(), 24);
        let distinct: HashSet<Vec<u8>> = all
            .iter()
            .map(|p| p.iter().map(|c| c.id().0).collect())
            .collect();
        assert_eq!(distinct.len(), 24);
    }

    #[test]
    fn first_ordering_is_the_input() {
        let hand = parse_cards("KS 5D JR").unwrap();
        let mut perms = Permutations::new(&hand);
        assert_eq!(perms.advance().unwrap(), hand.as_slice());
    }

    #[test]
    fn restart_replays_the_same_sequence() {
        let hand = parse_cards("AH 2C 3D 4S 5H").unwrap();
        let mut perms = Permutations::new(&hand);
        let first = collect(&mut perms);
        assert!(perms.advance().is_none());
        perms.restart();
        let second = collect(&mut perms);
        assert_eq!(first, second);
        assert_eq!(first.len(), 120);
    }

    #[test]
    fn empty_and_single_inputs() {
        assert_eq!(collect(&mut Permutations::new(&[])).len(), 1);
        let one = parse_cards("9C").unwrap();
        assert_eq!(collect(&mut Permutations::new(&one)), vec![one]);
    }
}

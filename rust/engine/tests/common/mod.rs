#![allow(dead_code)]

use std::collections::HashSet;

use chinchon_engine::cards::{parse_cards, Card};
use chinchon_engine::deck::DeckVariant;
use chinchon_engine::game::GameState;
use chinchon_engine::player::{PlayerId, PlayerState};

pub fn pid(name: &str) -> PlayerId {
    PlayerId::from(name)
}

pub fn ids(names: &[&str]) -> Vec<PlayerId> {
    names.iter().map(|n| pid(n)).collect()
}

pub fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid card list")
}

pub fn card(s: &str) -> Card {
    s.parse().expect("valid card")
}

/// Scripted position: each seat gets the listed hand and points, `draw_top` ends up on
/// top of the draw pile with every unused card of the variant below it, and the
/// discard pile holds `discard`.
pub fn scripted(
    variant: DeckVariant,
    seats: &[(&str, &str, i32)],
    draw_top: &str,
    discard: &str,
) -> GameState {
    let seats: Vec<(PlayerId, PlayerState)> = seats
        .iter()
        .map(|(id, hand, points)| (pid(id), PlayerState::with_hand(cards(hand), *points)))
        .collect();
    let top = cards(draw_top);
    let discard = cards(discard);
    let used: HashSet<Card> = seats
        .iter()
        .flat_map(|(_, p)| p.hand().to_vec())
        .chain(top.iter().copied())
        .chain(discard.iter().copied())
        .collect();
    let mut draw_pile: Vec<Card> = variant
        .cards()
        .into_iter()
        .filter(|c| !used.contains(c))
        .collect();
    draw_pile.extend(top);
    GameState::from_parts(variant, seats, draw_pile, discard)
}

/// Every card of the variant appears exactly once across piles and hands.
pub fn assert_conserved(state: &GameState) {
    let all = state.all_cards();
    let unique: HashSet<Card> = all.iter().copied().collect();
    assert_eq!(all.len(), state.variant().size(), "card count drifted");
    assert_eq!(unique.len(), all.len(), "a card appears twice");
}

use chinchon_engine::cards::{parse_cards, points_of, Card, Suit};
use chinchon_engine::deck::build_deck;
use chinchon_engine::meld::{is_combo, is_run};
use chinchon_engine::permutations::Permutations;
use chinchon_engine::scoring::{score_hand, PERFECT_MELD_BONUS};
use proptest::prelude::*;

fn score(s: &str) -> i32 {
    score_hand(&parse_cards(s).unwrap()).points
}

fn same_cards(a: &[Card], b: &[Card]) -> bool {
    let mut a: Vec<u8> = a.iter().map(|c| c.id().0).collect();
    let mut b: Vec<u8> = b.iter().map(|c| c.id().0).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[test]
fn hand_without_combos_scores_its_full_value() {
    let hand = parse_cards("AS 5H 9C KD 2D 7S QH").unwrap();
    let result = score_hand(&hand);
    assert_eq!(result.points, 1 + 5 + 9 + 10 + 2 + 7 + 10);
    assert_eq!(result.best_partition, hand);
}

#[test]
fn seven_card_run_is_a_perfect_meld() {
    let result = score_hand(&parse_cards("3C 4C 5C 6C 7C 8C 9C").unwrap());
    assert_eq!(result.points, PERFECT_MELD_BONUS);
    assert!(is_run(&result.best_partition));
}

#[test]
fn four_plus_three_is_a_perfect_meld() {
    assert_eq!(score("KH KD KC KS 4D 5D 6D"), PERFECT_MELD_BONUS);
    assert_eq!(score("9H 9C 9S JR 4D 5D 6D"), PERFECT_MELD_BONUS);
}

#[test]
fn six_card_run_charges_the_leftover() {
    assert_eq!(score("2H 3H 4H 5H 6H 7H KC"), 10);
}

#[test]
fn two_triples_charge_the_leftover() {
    let result = score_hand(&parse_cards("9H 9C 9S 4D 5D 6D KC").unwrap());
    assert_eq!(result.points, 10);
    assert_eq!(result.best_partition[6], "KC".parse::<Card>().unwrap());
}

#[test]
fn five_card_run_charges_two_leftovers() {
    assert_eq!(score("AS 2S 3S 4S 5S 9H 9D"), 18);
}

#[test]
fn single_combo_charges_the_rest() {
    // a four-card set leaves the other three
    assert_eq!(score("7H 7D 7C 7S KD QC 2H"), 10 + 10 + 2);
    // a three-card run leaves four
    assert_eq!(score("AS 2S 3S KH 9D 9C 4C"), 10 + 9 + 9 + 4);
}

#[test]
fn jokers_left_over_are_expensive() {
    // the joker joins whichever combo strands the cheapest cards
    assert_eq!(score("JR 2H 3H 9C 9D KS QS"), 2 + 3 + 9 + 9);
    // with nothing to join, it costs 50
    assert_eq!(score("JR AC 5H 9C KD QS 2D"), 50 + 1 + 5 + 9 + 10 + 10 + 2);
}

#[test]
fn eight_card_hand_with_a_perfect_seven_earns_the_bonus() {
    assert_eq!(score("AH 2H 3H 4H 5H 6H 7H KS"), PERFECT_MELD_BONUS);
    assert_eq!(score("KH KD KC KS 4D 5D 6D 9C"), PERFECT_MELD_BONUS);
    let result = score_hand(&parse_cards("9C 7H 6H 5H 4H 3H 2H AH").unwrap());
    assert_eq!(result.points, PERFECT_MELD_BONUS);
    assert!(is_run(&result.best_partition[..7]));
}

#[test]
fn eight_card_hand_without_a_perfect_seven_charges_leftovers() {
    // 6-run leaves KS and 9C
    assert_eq!(score("AH 2H 3H 4H 5H 6H 9C KS"), 19);
}

#[test]
fn empty_hand_scores_zero() {
    let result = score_hand(&[]);
    assert_eq!(result.points, 0);
    assert!(result.best_partition.is_empty());
}

#[test]
fn oversized_hand_is_charged_in_full() {
    let hand = parse_cards("AH 2H 3H 4H 5H 6H 7H 8H 9H").unwrap();
    let result = score_hand(&hand);
    assert_eq!(result.points, points_of(&hand));
    assert_eq!(result.best_partition, hand);
}

fn forms_perfect_meld(hand: &[Card]) -> bool {
    let mut perms = Permutations::new(hand);
    while let Some(p) = perms.advance() {
        if is_run(p) || (is_combo(&p[..4]) && is_combo(&p[4..])) {
            return true;
        }
    }
    false
}

/// Seven cards drawn from hearts, diamonds and the jokers, so combos are common.
fn seven_card_hand() -> impl Strategy<Value = Vec<Card>> {
    let pool: Vec<Card> = build_deck(4)
        .into_iter()
        .filter(|c| c.is_joker() || matches!(c.suit(), Suit::Hearts | Suit::Diamonds))
        .collect();
    Just(pool).prop_shuffle().prop_map(|d| d[..7].to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn score_never_exceeds_baseline(hand in seven_card_hand()) {
        let result = score_hand(&hand);
        prop_assert!(result.points <= points_of(&hand));
        prop_assert!(same_cards(&result.best_partition, &hand));
    }

    #[test]
    fn bonus_exactly_when_a_perfect_meld_exists(hand in seven_card_hand()) {
        let result = score_hand(&hand);
        prop_assert_eq!(result.points == PERFECT_MELD_BONUS, forms_perfect_meld(&hand));
    }
}

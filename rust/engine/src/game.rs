use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::DeckVariant;
use crate::player::{PlayerId, PlayerState};
use crate::turn::{Phase, Stage, TurnOrder, TurnPhase};

/// What a player scored in the round that just ended and the arrangement that earned it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub points: i32,
    pub hand: Vec<Card>,
}

/// Complete snapshot of a game.
///
/// Moves never mutate a snapshot; [`crate::engine::Engine::apply_move`] returns the next
/// one. Across the draw pile, discard pile and every hand, each card of the deck variant
/// appears exactly once.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) variant: DeckVariant,
    pub(crate) round: u32,
    /// Top of the pile is the last element
    pub(crate) draw_pile: Vec<Card>,
    /// Top of the pile is the last element
    pub(crate) discard_pile: Vec<Card>,
    pub(crate) players: BTreeMap<PlayerId, PlayerState>,
    pub(crate) order: TurnOrder,
    pub(crate) turn: TurnPhase,
    /// Filled when a round ends by a meld, emptied when the next round is dealt
    pub(crate) round_end_state: BTreeMap<PlayerId, RoundResult>,
}

impl GameState {
    /// Builds a snapshot from explicit parts, with the first seat to act in the draw
    /// stage of round 1. Intended for hosting layers restoring a game and for scripted
    /// positions; the caller is responsible for the card-conservation invariant.
    pub fn from_parts(
        variant: DeckVariant,
        seats: Vec<(PlayerId, PlayerState)>,
        draw_pile: Vec<Card>,
        discard_pile: Vec<Card>,
    ) -> Self {
        let order = TurnOrder::new(seats.iter().map(|(id, _)| id.clone()).collect());
        Self {
            variant,
            round: 1,
            draw_pile,
            discard_pile,
            players: seats.into_iter().collect(),
            order,
            turn: TurnPhase::Play(Stage::Draw),
            round_end_state: BTreeMap::new(),
        }
    }

    pub fn variant(&self) -> DeckVariant {
        self.variant
    }

    /// 1-based number of the round being played.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn discard_top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn players(&self) -> &BTreeMap<PlayerId, PlayerState> {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerState> {
        self.players.get(id)
    }

    /// Players still in the game, in seating order.
    pub fn play_order(&self) -> &[PlayerId] {
        self.order.players()
    }

    pub fn play_order_pos(&self) -> usize {
        self.order.pos()
    }

    pub fn turn_order(&self) -> &TurnOrder {
        &self.order
    }

    /// Player holding the turn during the play phase.
    pub fn current_player(&self) -> Option<&PlayerId> {
        self.order.current()
    }

    pub fn turn(&self) -> &TurnPhase {
        &self.turn
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase()
    }

    /// Stage `player` is in, or `None` when they have nothing to do.
    pub fn stage_for(&self, player: &PlayerId) -> Option<Stage> {
        if !self.order.contains(player) {
            return None;
        }
        self.turn.stage_for(player, self.order.current())
    }

    pub fn round_end_state(&self) -> &BTreeMap<PlayerId, RoundResult> {
        &self.round_end_state
    }

    pub fn is_eliminated(&self, player: &PlayerId) -> bool {
        self.players.contains_key(player) && !self.order.contains(player)
    }

    /// Every card in the game: draw pile, discard pile, then each hand.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut v = Vec::with_capacity(self.variant.size());
        v.extend_from_slice(&self.draw_pile);
        v.extend_from_slice(&self.discard_pile);
        for p in self.players.values() {
            v.extend_from_slice(p.hand());
        }
        v
    }

    pub(crate) fn player_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(id)
    }
}

/// The winner, once a single player remains in the play order.
pub fn check_end(state: &GameState) -> Option<PlayerId> {
    match state.play_order() {
        [winner] => Some(winner.clone()),
        _ => None,
    }
}

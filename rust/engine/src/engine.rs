use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info};

use crate::cards::{sort_for_display, Card, CardId};
use crate::config::RulesConfig;
use crate::deck::{DeckVariant, SeededShuffler, Shuffler, DEFAULT_SEED};
use crate::errors::{InvalidMove, SetupError};
use crate::game::{check_end, GameState, RoundResult};
use crate::meld::can_meld;
use crate::player::{PlayerId, PlayerState, HAND_SIZE};
use crate::rules::{validate_stage, Move};
use crate::scoring::score_hand;
use crate::turn::{Stage, TurnEvent, TurnPhase};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Result of asking the engine to apply a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was legal; this is the next snapshot
    Applied(GameState),
    /// The move was refused; the input snapshot is still current
    Rejected(InvalidMove),
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    pub fn state(&self) -> Option<&GameState> {
        match self {
            MoveOutcome::Applied(s) => Some(s),
            MoveOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&InvalidMove> {
        match self {
            MoveOutcome::Applied(_) => None,
            MoveOutcome::Rejected(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<GameState, InvalidMove> {
        match self {
            MoveOutcome::Applied(s) => Ok(s),
            MoveOutcome::Rejected(e) => Err(e),
        }
    }
}

impl From<Result<GameState, InvalidMove>> for MoveOutcome {
    fn from(r: Result<GameState, InvalidMove>) -> Self {
        match r {
            Ok(s) => MoveOutcome::Applied(s),
            Err(e) => MoveOutcome::Rejected(e),
        }
    }
}

/// Rule engine for one game: deals rounds, applies moves, scores melds and
/// eliminates players.
///
/// The engine holds no game state of its own. Each operation takes the current
/// [`GameState`] and, when legal, returns the next one; the hosting layer keeps the
/// authoritative copy and must not apply two moves to the same game concurrently.
///
/// # Examples
///
/// ```
/// use chinchon_engine::config::RulesConfig;
/// use chinchon_engine::engine::Engine;
/// use chinchon_engine::player::PlayerId;
///
/// let mut engine = Engine::seeded(RulesConfig::default());
/// let roster = [PlayerId::from("0"), PlayerId::from("1")];
/// let state = engine.setup(&roster).expect("two players is a valid roster");
/// assert_eq!(state.draw_pile().len(), 37);
///
/// let next = engine
///     .draw_from_draw_pile(&state, &roster[0])
///     .into_result()
///     .expect("first player may draw");
/// assert_eq!(next.player(&roster[0]).unwrap().hand().len(), 8);
/// ```
#[derive(Debug)]
pub struct Engine<S: Shuffler = SeededShuffler> {
    config: RulesConfig,
    shuffler: S,
}

impl Engine<SeededShuffler> {
    /// Engine with a ChaCha20 shuffler seeded from `config.seed`.
    pub fn seeded(config: RulesConfig) -> Self {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        Self::new(config, SeededShuffler::new_with_seed(seed))
    }
}

impl Default for Engine<SeededShuffler> {
    fn default() -> Self {
        Self::seeded(RulesConfig::default())
    }
}

impl<S: Shuffler> Engine<S> {
    pub fn new(config: RulesConfig, shuffler: S) -> Self {
        Self { config, shuffler }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Seats `roster` in the given order and deals the first round.
    ///
    /// # Errors
    ///
    /// - [`SetupError::PlayerCount`] - fewer than 2 or more than 4 players
    /// - [`SetupError::DuplicatePlayer`] - a player id appears twice
    pub fn setup(&mut self, roster: &[PlayerId]) -> Result<GameState, SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&roster.len()) {
            return Err(SetupError::PlayerCount(roster.len()));
        }
        let mut seen = HashSet::new();
        for id in roster {
            if !seen.insert(id) {
                return Err(SetupError::DuplicatePlayer(id.clone()));
            }
        }

        let variant = DeckVariant::for_players(roster.len());
        let seats = roster
            .iter()
            .map(|id| (id.clone(), PlayerState::new()))
            .collect();
        let mut state = GameState::from_parts(variant, seats, Vec::new(), Vec::new());
        self.deal_round(&mut state);

        info!(
            players = roster.len(),
            variant = ?variant,
            threshold = self.config.elimination_threshold,
            "game set up"
        );
        Ok(state)
    }

    /// Applies `mv` for `player` to `state`.
    ///
    /// `state` itself is never modified: a legal move yields
    /// [`MoveOutcome::Applied`] with the next snapshot, anything else
    /// [`MoveOutcome::Rejected`] with the reason.
    pub fn apply_move(&mut self, state: &GameState, player: &PlayerId, mv: Move) -> MoveOutcome {
        let mut next = state.clone();
        match self.try_apply(&mut next, player, mv) {
            Ok(()) => {
                debug!(player = %player, mv = ?mv, round = next.round(), "move applied");
                MoveOutcome::Applied(next)
            }
            Err(e) => {
                debug!(player = %player, mv = ?mv, reason = %e, "move rejected");
                MoveOutcome::Rejected(e)
            }
        }
    }

    pub fn draw_from_draw_pile(&mut self, state: &GameState, player: &PlayerId) -> MoveOutcome {
        self.apply_move(state, player, Move::DrawFromDrawPile)
    }

    pub fn draw_from_discard_pile(&mut self, state: &GameState, player: &PlayerId) -> MoveOutcome {
        self.apply_move(state, player, Move::DrawFromDiscardPile)
    }

    pub fn discard_card(&mut self, state: &GameState, player: &PlayerId, card: CardId) -> MoveOutcome {
        self.apply_move(state, player, Move::DiscardCard(card))
    }

    pub fn meld_hand_with_card(
        &mut self,
        state: &GameState,
        player: &PlayerId,
        card: CardId,
    ) -> MoveOutcome {
        self.apply_move(state, player, Move::MeldHandWithCard(card))
    }

    pub fn end_review(&mut self, state: &GameState, player: &PlayerId) -> MoveOutcome {
        self.apply_move(state, player, Move::EndReview)
    }

    fn try_apply(
        &mut self,
        state: &mut GameState,
        player: &PlayerId,
        mv: Move,
    ) -> Result<(), InvalidMove> {
        if check_end(state).is_some() {
            return Err(InvalidMove::GameOver);
        }
        if state.player(player).is_none() {
            return Err(InvalidMove::UnknownPlayer(player.clone()));
        }
        validate_stage(player, state.stage_for(player), &mv)?;

        match mv {
            Move::DrawFromDrawPile => self.draw_from_draw(state, player),
            Move::DrawFromDiscardPile => draw_from_discard(state, player),
            Move::DiscardCard(card) => discard(state, player, card),
            Move::MeldHandWithCard(card) => self.meld(state, player, card),
            Move::EndReview => self.acknowledge_review(state, player),
        }
    }

    fn draw_from_draw(&mut self, state: &mut GameState, player: &PlayerId) -> Result<(), InvalidMove> {
        if state.draw_pile.is_empty() {
            self.recycle_discards(state);
        }
        let card = state.draw_pile.pop().ok_or(InvalidMove::EmptyDrawPile)?;
        give(state, player, card)?;
        if state.draw_pile.is_empty() {
            self.recycle_discards(state);
        }
        transition(state, player, TurnEvent::Drew)
    }

    /// Shuffles everything under the top discard into a new draw pile.
    fn recycle_discards(&mut self, state: &mut GameState) {
        if state.discard_pile.len() <= 1 {
            return;
        }
        let mut rest = std::mem::take(&mut state.discard_pile);
        let top = rest.pop();
        state.discard_pile.extend(top);
        let recycled = rest.len();
        state.draw_pile = self.shuffler.shuffle(rest);
        debug!(recycled, "discard pile recycled into draw pile");
    }

    fn meld(&mut self, state: &mut GameState, player: &PlayerId, card: CardId) -> Result<(), InvalidMove> {
        let hand = state.player(player).map(|p| p.hand()).unwrap_or_default();
        let candidate = hand
            .iter()
            .find(|c| c.id() == card)
            .copied()
            .ok_or_else(|| InvalidMove::CardNotInHand {
                player: player.clone(),
                card,
            })?;
        if !can_meld(hand, &candidate) {
            return Err(InvalidMove::MeldRejected { card });
        }

        let taken = take(state, player, card)?;
        state.discard_pile.push(taken);
        info!(player = %player, card = %taken, round = state.round(), "hand melded");

        self.score_round(state);
        state.order.advance();
        self.eliminate(state);

        let active = state.order.players().to_vec();
        transition(state, player, TurnEvent::Melded { active })?;
        if let Some(winner) = check_end(state) {
            info!(winner = %winner, round = state.round(), "game over");
        }
        Ok(())
    }

    /// Scores every active hand and adds the result to the player's total. The round
    /// results keep the signed score.
    fn score_round(&self, state: &mut GameState) {
        let mut results = BTreeMap::new();
        for id in state.order.players() {
            let Some(p) = state.players.get_mut(id) else {
                continue;
            };
            let score = score_hand(p.hand());
            p.add_points(score.points);
            info!(
                player = %id,
                points = score.points,
                total = p.points(),
                "round scored"
            );
            results.insert(
                id.clone(),
                RoundResult {
                    points: score.points,
                    hand: score.best_partition,
                },
            );
        }
        state.round_end_state = results;
    }

    /// Removes players at or over the threshold. When that would empty the table, the
    /// players with the lowest total stay in.
    fn eliminate(&self, state: &mut GameState) {
        let threshold = self.config.elimination_threshold;
        let points_of = |id: &PlayerId| state.player(id).map_or(0, |p| p.points());
        let active = state.order.players();
        let mut out: Vec<PlayerId> = active
            .iter()
            .filter(|id| points_of(*id) >= threshold)
            .cloned()
            .collect();
        if out.len() == active.len() {
            let lowest = active.iter().map(|id| points_of(id)).min().unwrap_or(0);
            out.retain(|id| points_of(id) > lowest);
        }
        for id in out {
            if state.order.remove(&id) {
                info!(player = %id, threshold, "player eliminated");
            }
        }
    }

    fn acknowledge_review(&mut self, state: &mut GameState, player: &PlayerId) -> Result<(), InvalidMove> {
        transition(state, player, TurnEvent::Acknowledged(player.clone()))?;
        if state.turn == TurnPhase::Play(Stage::Draw) {
            state.round += 1;
            self.deal_round(state);
            info!(
                round = state.round(),
                players = state.order.len(),
                "new round dealt"
            );
        }
        Ok(())
    }

    /// Shuffles a full deck and deals a fresh round to the players still in the game.
    fn deal_round(&mut self, state: &mut GameState) {
        let mut deck = self.shuffler.shuffle(state.variant.cards());
        for p in state.players.values_mut() {
            p.clear_cards();
        }
        state.discard_pile.clear();
        state.round_end_state.clear();

        for _ in 0..HAND_SIZE {
            for id in state.order.players() {
                let Some(c) = deck.pop() else {
                    break;
                };
                if let Some(p) = state.players.get_mut(id) {
                    p.give_card(c);
                }
            }
        }
        for id in state.order.players() {
            if let Some(p) = state.players.get_mut(id) {
                let mut hand = p.clear_cards();
                sort_for_display(&mut hand);
                p.set_hand(hand);
            }
        }
        state.discard_pile.extend(deck.pop());
        state.draw_pile = deck;
        state.turn = TurnPhase::Play(Stage::Draw);
    }
}

fn draw_from_discard(state: &mut GameState, player: &PlayerId) -> Result<(), InvalidMove> {
    let card = state.discard_pile.pop().ok_or(InvalidMove::EmptyDiscardPile)?;
    give(state, player, card)?;
    transition(state, player, TurnEvent::Drew)
}

fn discard(state: &mut GameState, player: &PlayerId, card: CardId) -> Result<(), InvalidMove> {
    let taken = take(state, player, card)?;
    state.discard_pile.push(taken);
    transition(state, player, TurnEvent::Discarded)?;
    state.order.advance();
    Ok(())
}

fn give(state: &mut GameState, player: &PlayerId, card: Card) -> Result<(), InvalidMove> {
    state
        .player_mut(player)
        .ok_or_else(|| InvalidMove::UnknownPlayer(player.clone()))?
        .give_card(card);
    Ok(())
}

fn take(state: &mut GameState, player: &PlayerId, card: CardId) -> Result<Card, InvalidMove> {
    state
        .player_mut(player)
        .and_then(|p| p.take_card(card))
        .ok_or_else(|| InvalidMove::CardNotInHand {
            player: player.clone(),
            card,
        })
}

fn transition(state: &mut GameState, player: &PlayerId, event: TurnEvent) -> Result<(), InvalidMove> {
    let actual = state.stage_for(player);
    let required = match event {
        TurnEvent::Drew => Stage::Draw,
        TurnEvent::Discarded | TurnEvent::Melded { .. } => Stage::Discard,
        TurnEvent::Acknowledged(_) => Stage::ReviewRound,
    };
    state.turn = state
        .turn
        .next(event)
        .ok_or_else(|| InvalidMove::WrongStage {
            player: player.clone(),
            required,
            actual,
        })?;
    Ok(())
}

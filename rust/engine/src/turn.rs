//! Phase and stage bookkeeping: which player may act, and how each accepted move
//! moves the game along.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players take turns drawing and discarding
    Play,
    /// A round just ended; everyone still in the game acknowledges the results
    Review,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Acting player must take a card from the draw or discard pile
    Draw,
    /// Acting player must discard a card or meld
    Discard,
    /// Player owes an acknowledgement of the round results
    ReviewRound,
}

/// Something that happened which may move the turn state forward.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TurnEvent {
    Drew,
    Discarded,
    Melded { active: Vec<PlayerId> },
    Acknowledged(PlayerId),
}

/// Current phase together with the data that phase needs.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The player at the turn pointer is in the given stage; everyone else waits
    Play(Stage),
    /// Players who have not yet acknowledged the round results
    Review { pending: BTreeSet<PlayerId> },
}

impl TurnPhase {
    pub fn phase(&self) -> Phase {
        match self {
            TurnPhase::Play(_) => Phase::Play,
            TurnPhase::Review { .. } => Phase::Review,
        }
    }

    /// Stage `player` is in, given who currently holds the turn. `None` means the player
    /// has nothing to do right now.
    pub fn stage_for(&self, player: &PlayerId, current: Option<&PlayerId>) -> Option<Stage> {
        match self {
            TurnPhase::Play(stage) if current == Some(player) => Some(*stage),
            TurnPhase::Play(_) => None,
            TurnPhase::Review { pending } if pending.contains(player) => Some(Stage::ReviewRound),
            TurnPhase::Review { .. } => None,
        }
    }

    /// Transition table. `None` marks an event that is illegal in the current phase.
    pub fn next(&self, event: TurnEvent) -> Option<TurnPhase> {
        match (self, event) {
            (TurnPhase::Play(Stage::Draw), TurnEvent::Drew) => Some(TurnPhase::Play(Stage::Discard)),
            (TurnPhase::Play(Stage::Discard), TurnEvent::Discarded) => {
                Some(TurnPhase::Play(Stage::Draw))
            }
            (TurnPhase::Play(Stage::Discard), TurnEvent::Melded { active }) => {
                Some(TurnPhase::Review {
                    pending: active.into_iter().collect(),
                })
            }
            (TurnPhase::Review { pending }, TurnEvent::Acknowledged(p)) if pending.contains(&p) => {
                let mut pending = pending.clone();
                pending.remove(&p);
                if pending.is_empty() {
                    Some(TurnPhase::Play(Stage::Draw))
                } else {
                    Some(TurnPhase::Review { pending })
                }
            }
            (TurnPhase::Play(_), _) | (TurnPhase::Review { .. }, _) => None,
        }
    }
}

/// Seating order of the players still in the game and the index of the one to act.
///
/// The pointer always resolves to a present member while the order is non-empty:
/// removing a player seated before the pointer shifts it down with them.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnOrder {
    play_order: Vec<PlayerId>,
    pos: usize,
}

impl TurnOrder {
    pub fn new(play_order: Vec<PlayerId>) -> Self {
        Self { play_order, pos: 0 }
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.play_order
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.play_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.play_order.is_empty()
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.play_order.contains(player)
    }

    pub fn current(&self) -> Option<&PlayerId> {
        self.play_order.get(self.pos)
    }

    pub fn advance(&mut self) {
        if !self.play_order.is_empty() {
            self.pos = (self.pos + 1) % self.play_order.len();
        }
    }

    /// Drops `player` from the order. Returns `false` when they were not in it.
    pub fn remove(&mut self, player: &PlayerId) -> bool {
        let Some(idx) = self.play_order.iter().position(|p| p == player) else {
            return false;
        };
        self.play_order.remove(idx);
        if idx < self.pos {
            self.pos -= 1;
        }
        if self.pos >= self.play_order.len() {
            self.pos = 0;
        }
        true
    }
}

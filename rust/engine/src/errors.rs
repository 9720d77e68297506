use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardId;
use crate::player::PlayerId;
use crate::turn::Stage;

/// Why a move was refused. Every variant is recoverable: the state the move was
/// applied to is left exactly as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidMove {
    #[error("The game is over")]
    GameOver,
    #[error("Player {0} is not seated in this game")]
    UnknownPlayer(PlayerId),
    #[error("Player {player} must be in the {required:?} stage (currently {actual:?})")]
    WrongStage {
        player: PlayerId,
        required: Stage,
        actual: Option<Stage>,
    },
    #[error("The draw pile is empty")]
    EmptyDrawPile,
    #[error("The discard pile is empty")]
    EmptyDiscardPile,
    #[error("Card {card} is not in player {player}'s hand")]
    CardNotInHand { player: PlayerId, card: CardId },
    #[error("The hand does not meld when discarding card {card}")]
    MeldRejected { card: CardId },
    #[error("Player {0} has no round review to acknowledge")]
    ReviewNotRequired(PlayerId),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("A game needs 2 to 4 players, got {0}")]
    PlayerCount(usize),
    #[error("Player {0} appears more than once in the roster")]
    DuplicatePlayer(PlayerId),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid card: {0:?}")]
pub struct ParseCardError(pub String);

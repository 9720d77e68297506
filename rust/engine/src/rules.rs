use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::errors::InvalidMove;
use crate::player::PlayerId;
use crate::turn::Stage;

/// A move a player asks the engine to apply.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Move {
    /// Take the top card of the draw pile
    DrawFromDrawPile,
    /// Take the top card of the discard pile
    DrawFromDiscardPile,
    /// Put a card from the hand on the discard pile, ending the turn
    DiscardCard(CardId),
    /// End the round by discarding this card and showing the remaining seven
    MeldHandWithCard(CardId),
    /// Acknowledge the round results
    EndReview,
}

impl Move {
    /// Stage the acting player has to be in for this move.
    pub fn required_stage(&self) -> Stage {
        match self {
            Move::DrawFromDrawPile | Move::DrawFromDiscardPile => Stage::Draw,
            Move::DiscardCard(_) | Move::MeldHandWithCard(_) => Stage::Discard,
            Move::EndReview => Stage::ReviewRound,
        }
    }
}

/// Checks that a move fits the stage the player is currently in.
///
/// # Errors
///
/// - [`InvalidMove::ReviewNotRequired`] - `EndReview` from a player who owes no acknowledgement
/// - [`InvalidMove::WrongStage`] - any other move made outside its stage
///
/// # Examples
///
/// ```
/// use chinchon_engine::errors::InvalidMove;
/// use chinchon_engine::player::PlayerId;
/// use chinchon_engine::rules::{validate_stage, Move};
/// use chinchon_engine::turn::Stage;
///
/// let p = PlayerId::from("0");
/// assert!(validate_stage(&p, Some(Stage::Draw), &Move::DrawFromDrawPile).is_ok());
///
/// let result = validate_stage(&p, None, &Move::DrawFromDrawPile);
/// assert!(matches!(result, Err(InvalidMove::WrongStage { .. })));
///
/// let result = validate_stage(&p, Some(Stage::Draw), &Move::EndReview);
/// assert!(matches!(result, Err(InvalidMove::ReviewNotRequired(_))));
/// ```
pub fn validate_stage(
    player: &PlayerId,
    actual: Option<Stage>,
    mv: &Move,
) -> Result<(), InvalidMove> {
    let required = mv.required_stage();
    if actual == Some(required) {
        return Ok(());
    }
    match mv {
        Move::EndReview => Err(InvalidMove::ReviewNotRequired(player.clone())),
        _ => Err(InvalidMove::WrongStage {
            player: player.clone(),
            required,
            actual,
        }),
    }
}

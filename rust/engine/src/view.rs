use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{GameState, RoundResult};
use crate::player::PlayerId;
use crate::turn::TurnPhase;

/// A player as seen by someone else at the table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Present only for the viewer's own seat
    pub hand: Option<Vec<Card>>,
    pub hand_len: usize,
    pub points: i32,
}

/// Read-only projection of a [`GameState`] for one viewer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub viewer: PlayerId,
    pub round: u32,
    pub draw_pile: Vec<Card>,
    pub draw_pile_len: usize,
    pub discard_pile: Vec<Card>,
    pub discard_pile_len: usize,
    pub discard_top: Option<Card>,
    pub players: BTreeMap<PlayerId, PlayerView>,
    pub play_order: Vec<PlayerId>,
    pub play_order_pos: usize,
    pub turn: TurnPhase,
    pub round_end_state: BTreeMap<PlayerId, RoundResult>,
}

/// Projects `state` for `viewer`: every hand but the viewer's is reduced to its size.
/// An unknown viewer sees no hands at all.
pub fn view_for(state: &GameState, viewer: &PlayerId) -> GameView {
    let players = state
        .players()
        .iter()
        .map(|(id, p)| {
            let hand = (id == viewer).then(|| p.hand().to_vec());
            let view = PlayerView {
                hand,
                hand_len: p.hand().len(),
                points: p.points(),
            };
            (id.clone(), view)
        })
        .collect();
    GameView {
        viewer: viewer.clone(),
        round: state.round(),
        draw_pile: state.draw_pile().to_vec(),
        draw_pile_len: state.draw_pile().len(),
        discard_pile: state.discard_pile().to_vec(),
        discard_pile_len: state.discard_pile().len(),
        discard_top: state.discard_top().copied(),
        players,
        play_order: state.play_order().to_vec(),
        play_order_pos: state.play_order_pos(),
        turn: state.turn().clone(),
        round_end_state: state.round_end_state().clone(),
    }
}

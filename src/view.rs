//! Read-only table projection for the display layer.
//!
//! `TableView::project` is a pure function of the game state. The engine
//! never calls it; a host renders from it between steps.

use im::Vector;
use serde::Serialize;

use crate::core::{Card, GameState, PlayerId, TurnPhase, Zone, ZoneVisibility};

/// One shared zone as the table shows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZoneView {
    pub label: &'static str,
    pub count: usize,
    /// Face-up contents, bottom to top. `None` for face-down zones.
    pub cards: Option<Vector<Card>>,
}

impl ZoneView {
    fn of(state: &GameState, zone: Zone) -> Self {
        let cards = match zone.visibility() {
            ZoneVisibility::Public => Some(state.zones.cards(zone)),
            ZoneVisibility::Hidden => None,
        };
        Self {
            label: zone.label(),
            count: state.zones.len(zone),
            cards,
        }
    }
}

/// One seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    /// Sorted by rank, then suit.
    pub hand: Vec<Card>,
    pub selected: Option<Card>,
    pub final_score: Option<u32>,
}

/// Everything the display layer renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub phase: TurnPhase,
    pub turn_number: u32,
    pub message: Option<String>,
    pub draw_pile: ZoneView,
    pub discard_pile: ZoneView,
    pub shop: ZoneView,
    pub players: Vec<PlayerView>,
}

impl TableView {
    #[must_use]
    pub fn project(state: &GameState) -> Self {
        let players = state
            .player_ids()
            .map(|id| {
                let mut hand: Vec<Card> = state.zones.iter(Zone::Hand(id)).collect();
                hand.sort_unstable();
                PlayerView {
                    id,
                    name: state.player_name(id),
                    hand,
                    selected: state.selected(id),
                    final_score: state.final_score(id),
                }
            })
            .collect();

        Self {
            phase: state.phase(),
            turn_number: state.turn_number(),
            message: state.message().map(str::to_owned),
            draw_pile: ZoneView::of(state, Zone::DrawPile),
            discard_pile: ZoneView::of(state, Zone::DiscardPile),
            shop: ZoneView::of(state, Zone::Shop),
            players,
        }
    }

    /// The seat whose turn it is, if a turn is in progress.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.phase.active_player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    #[test]
    fn test_draw_pile_is_face_down() {
        let mut state = GameState::new(GameConfig::new(2, 0)).unwrap();
        state.zones.move_all(Zone::DiscardPile, Zone::DrawPile);

        let view = TableView::project(&state);
        assert_eq!(view.draw_pile.count, 52);
        assert_eq!(view.draw_pile.cards, None);
        assert_eq!(view.discard_pile.cards.map(|c| c.len()), Some(0));
        assert_eq!(view.draw_pile.label, "Draw Pile");
    }

    #[test]
    fn test_hands_are_sorted() {
        let mut state = GameState::new(GameConfig::new(2, 0).with_names(["Ann"])).unwrap();
        let p0 = PlayerId::new(0);
        for s in ["Kd", "2s", "Kc", "9h"] {
            state.zones.move_one(Zone::DiscardPile, Zone::Hand(p0), s.parse().unwrap()).unwrap();
        }
        state.select(p0, "9h".parse().unwrap()).unwrap();
        state.announce("It's Ann's turn to discard a card!");

        let view = TableView::project(&state);
        let hand: Vec<String> = view.players[0].hand.iter().map(ToString::to_string).collect();
        assert_eq!(hand, vec!["2s", "9h", "Kc", "Kd"]);
        assert_eq!(view.players[0].name, "Ann");
        assert_eq!(view.players[1].name, "Player 1");
        assert_eq!(view.players[0].selected, Some("9h".parse().unwrap()));
        assert_eq!(view.message.as_deref(), Some("It's Ann's turn to discard a card!"));
    }
}

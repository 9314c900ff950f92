//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` is the only place cards change zones. It tracks:
//! - card -> zone, so membership checks are O(1)
//! - per-zone order, so piles have a top
//!
//! Every primitive keeps the two views in sync. Composed by setup, turns and
//! scoring, they keep each of the 52 cards in exactly one zone between steps.
//!
//! The top of a zone is its last card: `move_all` and `place` put cards on
//! top, `draw_n` and `move_top` take from it.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::core::card::Card;
use crate::core::config::Zone;
use crate::core::error::{EngineError, Result};
use crate::core::rng::GameRng;

/// Manages card locations across zones.
///
/// ## Usage
///
/// ```
/// use rust_shopdraw::core::{Card, Zone};
/// use rust_shopdraw::zones::ZoneManager;
///
/// let mut zones = ZoneManager::with_cards(Zone::DrawPile, Card::standard_deck());
///
/// let drawn = zones.draw_into(Zone::DrawPile, Zone::Shop, 3);
/// assert_eq!(drawn, 3);
/// assert_eq!(zones.len(Zone::Shop), 3);
/// assert_eq!(zones.len(Zone::DrawPile), 49);
///
/// zones.move_all(Zone::Shop, Zone::DiscardPile);
/// assert!(zones.is_empty(Zone::Shop));
/// assert!(zones.conserves(&Card::standard_deck()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: card -> zone
    locations: FxHashMap<Card, Zone>,

    /// Ordered contents per zone, bottom first.
    contents: FxHashMap<Zone, Vector<Card>>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager holding `cards` in `zone`.
    #[must_use]
    pub fn with_cards(zone: Zone, cards: impl IntoIterator<Item = Card>) -> Self {
        let mut manager = Self::new();
        manager.place(zone, cards);
        manager
    }

    /// Put untracked cards on top of a zone.
    ///
    /// Panics if a card is already tracked: a card can only be in one zone.
    pub fn place(&mut self, zone: Zone, cards: impl IntoIterator<Item = Card>) {
        let order = self.contents.entry(zone).or_default();
        for card in cards {
            if let Some(existing) = self.locations.insert(card, zone) {
                panic!("Card {card} already tracked in {existing}");
            }
            order.push_back(card);
        }
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, card: Card) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn contains(&self, zone: Zone, card: Card) -> bool {
        self.locations.get(&card) == Some(&zone)
    }

    /// Snapshot of a zone's cards, bottom first. O(1).
    #[must_use]
    pub fn cards(&self, zone: Zone) -> Vector<Card> {
        self.contents.get(&zone).cloned().unwrap_or_default()
    }

    /// Iterate a zone's cards, bottom first.
    pub fn iter(&self, zone: Zone) -> impl Iterator<Item = Card> + '_ {
        self.contents.get(&zone).into_iter().flatten().copied()
    }

    /// Get the number of cards in a zone.
    #[must_use]
    pub fn len(&self, zone: Zone) -> usize {
        self.contents.get(&zone).map_or(0, Vector::len)
    }

    #[must_use]
    pub fn is_empty(&self, zone: Zone) -> bool {
        self.len(zone) == 0
    }

    /// The top card of a zone.
    #[must_use]
    pub fn top(&self, zone: Zone) -> Option<Card> {
        self.contents.get(&zone)?.back().copied()
    }

    /// Move every card from `source` onto `destination`.
    ///
    /// Source order is preserved, so the old top stays on top. Returns the
    /// number of cards moved.
    pub fn move_all(&mut self, source: Zone, destination: Zone) -> usize {
        if source == destination {
            return self.len(source);
        }

        let moved = self.contents.remove(&source).unwrap_or_default();
        let count = moved.len();
        for &card in &moved {
            self.locations.insert(card, destination);
        }
        self.contents.entry(destination).or_default().append(moved);

        trace!(%source, %destination, count, "moved all cards");
        count
    }

    /// Move one specific card from `source` onto `destination`.
    ///
    /// Fails with `CardNotFound` if the card is not in `source`.
    pub fn move_one(&mut self, source: Zone, destination: Zone, card: Card) -> Result<()> {
        if !self.contains(source, card) {
            return Err(EngineError::CardNotFound { card, zone: source });
        }

        if let Some(order) = self.contents.get_mut(&source) {
            if let Some(index) = order.index_of(&card) {
                order.remove(index);
            }
        }
        self.locations.insert(card, destination);
        self.contents.entry(destination).or_default().push_back(card);

        trace!(%card, %source, %destination, "moved card");
        Ok(())
    }

    /// Move the top card of `source` onto `destination`.
    ///
    /// Fails with `InsufficientCards` if `source` is empty.
    pub fn move_top(&mut self, source: Zone, destination: Zone) -> Result<Card> {
        let card = self.top(source).ok_or(EngineError::InsufficientCards {
            zone: source,
            requested: 1,
            available: 0,
        })?;
        self.move_one(source, destination, card)?;
        Ok(card)
    }

    /// Remove and return up to `n` cards from the top of `source`.
    ///
    /// Returns fewer than `n` only when `source` runs out. The returned cards
    /// are untracked until they are `place`d somewhere.
    pub fn draw_n(&mut self, source: Zone, n: usize) -> Vec<Card> {
        let Some(order) = self.contents.get_mut(&source) else {
            return Vec::new();
        };

        let mut drawn = Vec::with_capacity(n.min(order.len()));
        while drawn.len() < n {
            let Some(card) = order.pop_back() else {
                break;
            };
            self.locations.remove(&card);
            drawn.push(card);
        }
        drawn
    }

    /// Draw up to `n` cards from `source` and place them on `destination`.
    ///
    /// Returns the number of cards moved.
    pub fn draw_into(&mut self, source: Zone, destination: Zone, n: usize) -> usize {
        let drawn = self.draw_n(source, n);
        let count = drawn.len();
        self.place(destination, drawn);
        count
    }

    /// Deal `k` cards to each destination, one card at a time round-robin.
    ///
    /// Consumes `k * destinations.len()` cards. Fails with
    /// `InsufficientCards` before moving anything if `source` is short.
    pub fn deal_to(&mut self, source: Zone, destinations: &[Zone], k: usize) -> Result<()> {
        let requested = k * destinations.len();
        let available = self.len(source);
        if available < requested {
            return Err(EngineError::InsufficientCards {
                zone: source,
                requested,
                available,
            });
        }

        for _ in 0..k {
            for &destination in destinations {
                self.move_top(source, destination)?;
            }
        }
        Ok(())
    }

    /// Shuffle a zone uniformly with the shared RNG.
    pub fn shuffle(&mut self, zone: Zone, rng: &mut GameRng) {
        if let Some(order) = self.contents.get_mut(&zone) {
            let mut cards: Vec<Card> = order.iter().copied().collect();
            rng.shuffle(&mut cards);
            *order = cards.into_iter().collect();
        }
    }

    /// Check that every card of `deck` is tracked in exactly one zone and
    /// nothing else is tracked.
    #[must_use]
    pub fn conserves(&self, deck: &[Card]) -> bool {
        let listed: usize = self.contents.values().map(Vector::len).sum();
        if listed != self.locations.len() || self.locations.len() != deck.len() {
            return false;
        }

        let listed_where_located = self.contents.iter().all(|(zone, order)| {
            order
                .iter()
                .all(|card| self.locations.get(card) == Some(zone))
        });

        listed_where_located && deck.iter().all(|card| self.locations.contains_key(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn hand(i: u8) -> Zone {
        Zone::Hand(PlayerId::new(i))
    }

    #[test]
    fn test_place_and_lookup() {
        let manager = ZoneManager::with_cards(Zone::Shop, [card("Ah"), card("Kd")]);

        assert_eq!(manager.zone_of(card("Ah")), Some(Zone::Shop));
        assert_eq!(manager.zone_of(card("2c")), None);
        assert!(manager.contains(Zone::Shop, card("Kd")));
        assert!(!manager.contains(Zone::DrawPile, card("Kd")));
        assert_eq!(manager.top(Zone::Shop), Some(card("Kd")));
        assert_eq!(manager.len(Zone::Shop), 2);
    }

    #[test]
    fn test_move_all_preserves_order_and_count() {
        let mut manager = ZoneManager::with_cards(Zone::Shop, [card("2c"), card("3c")]);
        manager.place(Zone::DiscardPile, [card("4c")]);

        let moved = manager.move_all(Zone::Shop, Zone::DiscardPile);

        assert_eq!(moved, 2);
        assert!(manager.is_empty(Zone::Shop));
        let discard: Vec<_> = manager.iter(Zone::DiscardPile).collect();
        assert_eq!(discard, vec![card("4c"), card("2c"), card("3c")]);
        assert_eq!(manager.zone_of(card("2c")), Some(Zone::DiscardPile));
    }

    #[test]
    fn test_move_all_from_empty_zone() {
        let mut manager = ZoneManager::with_cards(Zone::DiscardPile, [card("4c")]);
        assert_eq!(manager.move_all(Zone::Shop, Zone::DiscardPile), 0);
        assert_eq!(manager.len(Zone::DiscardPile), 1);
    }

    #[test]
    fn test_move_one() {
        let mut manager = ZoneManager::with_cards(hand(0), [card("2c"), card("3c"), card("4c")]);

        manager.move_one(hand(0), Zone::DiscardPile, card("3c")).unwrap();

        let remaining: Vec<_> = manager.iter(hand(0)).collect();
        assert_eq!(remaining, vec![card("2c"), card("4c")]);
        assert_eq!(manager.top(Zone::DiscardPile), Some(card("3c")));
    }

    #[test]
    fn test_move_one_card_not_found() {
        let mut manager = ZoneManager::with_cards(hand(0), [card("2c")]);
        manager.place(hand(1), [card("3c")]);

        let err = manager.move_one(hand(0), Zone::DiscardPile, card("3c")).unwrap_err();
        assert_eq!(
            err,
            EngineError::CardNotFound {
                card: card("3c"),
                zone: hand(0),
            }
        );
        // Nothing moved
        assert!(manager.contains(hand(1), card("3c")));
    }

    #[test]
    fn test_move_top_empty() {
        let mut manager = ZoneManager::new();
        let err = manager.move_top(Zone::DrawPile, hand(0)).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientCards { requested: 1, available: 0, .. }));
    }

    #[test]
    fn test_draw_n_takes_from_top_without_padding() {
        let mut manager = ZoneManager::with_cards(Zone::DrawPile, [card("2c"), card("3c"), card("4c")]);

        let drawn = manager.draw_n(Zone::DrawPile, 2);
        assert_eq!(drawn, vec![card("4c"), card("3c")]);
        assert_eq!(manager.zone_of(card("4c")), None);

        let rest = manager.draw_n(Zone::DrawPile, 5);
        assert_eq!(rest, vec![card("2c")]);

        assert!(manager.draw_n(Zone::DrawPile, 3).is_empty());
        assert!(manager.draw_n(Zone::Shop, 3).is_empty());
    }

    #[test]
    fn test_deal_round_robin() {
        let deck = Card::standard_deck();
        let mut manager = ZoneManager::with_cards(Zone::DrawPile, deck.clone());

        manager.deal_to(Zone::DrawPile, &[hand(0), hand(1)], 2).unwrap();

        // Top of the pile is the end of the deck vec
        let h0: Vec<_> = manager.iter(hand(0)).collect();
        let h1: Vec<_> = manager.iter(hand(1)).collect();
        assert_eq!(h0, vec![deck[51], deck[49]]);
        assert_eq!(h1, vec![deck[50], deck[48]]);
        assert_eq!(manager.len(Zone::DrawPile), 48);
        assert!(manager.conserves(&deck));
    }

    #[test]
    fn test_deal_insufficient_moves_nothing() {
        let mut manager = ZoneManager::with_cards(Zone::DrawPile, [card("2c"), card("3c"), card("4c")]);

        let err = manager.deal_to(Zone::DrawPile, &[hand(0), hand(1)], 2).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientCards {
                zone: Zone::DrawPile,
                requested: 4,
                available: 3,
            }
        );
        assert_eq!(manager.len(Zone::DrawPile), 3);
        assert!(manager.is_empty(hand(0)));
    }

    #[test]
    fn test_shuffle() {
        let deck = Card::standard_deck();
        let mut manager = ZoneManager::with_cards(Zone::DiscardPile, deck.clone());

        let before: Vec<_> = manager.iter(Zone::DiscardPile).collect();
        let mut rng = GameRng::new(42);
        manager.shuffle(Zone::DiscardPile, &mut rng);
        let after: Vec<_> = manager.iter(Zone::DiscardPile).collect();

        assert_ne!(before, after);
        assert!(manager.conserves(&deck));
    }

    #[test]
    fn test_conserves_detects_loss() {
        let deck = Card::standard_deck();
        let mut manager = ZoneManager::with_cards(Zone::DrawPile, deck.clone());
        assert!(manager.conserves(&deck));

        // Drawn but never placed
        let _lost = manager.draw_n(Zone::DrawPile, 1);
        assert!(!manager.conserves(&deck));
    }

    #[test]
    #[should_panic(expected = "already tracked")]
    fn test_duplicate_card_panics() {
        let mut manager = ZoneManager::with_cards(Zone::Shop, [card("Ah")]);
        manager.place(Zone::DiscardPile, [card("Ah")]);
    }
}

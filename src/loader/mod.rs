//! Deck loaders
//!
//! Parsers for the deck format (.dck) that hands sessions pre-normalized card lists

pub mod deck;
pub mod deck_async;

pub use deck::{DeckEntry, DeckList, DeckLoader};
pub use deck_async::{load_deck, load_decks};

//! Deck file loader (.dck format)
//!
//! Decks arrive already normalized (one canonical card name per line); this
//! only turns the text into entries a session can import.

use crate::{Result, TableError};
use std::fs;
use std::path::Path;

/// Deck loader for .dck files
pub struct DeckLoader;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Main,
    Commander,
    Sideboard,
}

impl DeckLoader {
    /// Load a deck from a .dck file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck from its text content
    ///
    /// Lines are `COUNT Card Name` or `COUNT Card Name|SET`. `[Main]`,
    /// `[Commander]` and `[Sideboard]` switch sections; other `[...]` headers,
    /// `#` comments and `key=value` metadata lines are skipped.
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut deck = DeckList::default();
        let mut section = Section::Main;

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') {
                let header = line.to_lowercase();
                if header.contains("sideboard") {
                    section = Section::Sideboard;
                } else if header.contains("commander") {
                    section = Section::Commander;
                } else if header.contains("main") {
                    section = Section::Main;
                }
                continue;
            }
            if line.contains('=') {
                continue;
            }

            let Some((count_str, rest)) = line.split_once(' ') else {
                return Err(TableError::InvalidDeckFormat(format!(
                    "line {}: expected 'COUNT Card Name', got '{line}'",
                    line_no + 1
                )));
            };
            let count = count_str.parse::<u8>().map_err(|_| {
                TableError::InvalidDeckFormat(format!("line {}: bad count '{count_str}'", line_no + 1))
            })?;

            // Extract card name (before pipe if present)
            let card_name = match rest.split_once('|') {
                Some((name, _set)) => name.trim(),
                None => rest.trim(),
            };
            if card_name.is_empty() {
                return Err(TableError::InvalidDeckFormat(format!(
                    "line {}: missing card name",
                    line_no + 1
                )));
            }

            let entry = DeckEntry {
                card_name: card_name.to_string(),
                count,
            };
            match section {
                Section::Main => deck.main_deck.push(entry),
                Section::Commander => deck.commander.push(entry),
                Section::Sideboard => deck.sideboard.push(entry),
            }
        }

        if deck.main_deck.is_empty() && deck.commander.is_empty() {
            return Err(TableError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(deck)
    }
}

/// Represents a deck entry (card name and count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub card_name: String,
    pub count: u8,
}

/// Represents a complete deck list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckList {
    pub main_deck: Vec<DeckEntry>,
    pub commander: Vec<DeckEntry>,
    pub sideboard: Vec<DeckEntry>,
}

impl DeckList {
    /// Cards that go on the table (main deck plus commanders)
    pub fn total_cards(&self) -> usize {
        self.main_deck
            .iter()
            .chain(self.commander.iter())
            .map(|e| e.count as usize)
            .sum()
    }

    /// Total cards in sideboard
    pub fn sideboard_size(&self) -> usize {
        self.sideboard.iter().map(|e| e.count as usize).sum()
    }

    /// A deck of `count` copies of one card, handy for demos and tests
    pub fn uniform(card_name: &str, count: u8) -> Self {
        DeckList {
            main_deck: vec![DeckEntry {
                card_name: card_name.to_string(),
                count,
            }],
            ..DeckList::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_deck() {
        let content = r#"
[metadata]
Name=Test Deck

[Main]
20 Mountain
40 Lightning Bolt|M10

[Sideboard]
15 Shock
"#;

        let deck = DeckLoader::parse(content).unwrap();
        assert_eq!(deck.main_deck.len(), 2);
        assert_eq!(deck.total_cards(), 60);

        assert_eq!(deck.main_deck[0].card_name, "Mountain");
        assert_eq!(deck.main_deck[0].count, 20);

        assert_eq!(deck.main_deck[1].card_name, "Lightning Bolt");
        assert_eq!(deck.main_deck[1].count, 40);

        assert_eq!(deck.sideboard_size(), 15);
        assert_eq!(deck.sideboard[0].card_name, "Shock");
    }

    #[test]
    fn test_parse_commander_section() {
        let content = "[Commander]\n1 Atraxa, Praetors' Voice\n[Main]\n99 Forest\n";

        let deck = DeckLoader::parse(content).unwrap();
        assert_eq!(deck.commander[0].card_name, "Atraxa, Praetors' Voice");
        assert_eq!(deck.total_cards(), 100);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            DeckLoader::parse("# nothing here\n"),
            Err(TableError::InvalidDeckFormat(_))
        ));
        assert!(matches!(
            DeckLoader::parse("x Forest\n"),
            Err(TableError::InvalidDeckFormat(_))
        ));
        assert!(matches!(
            DeckLoader::parse("Forest\n"),
            Err(TableError::InvalidDeckFormat(_))
        ));
    }
}

//! Async deck loading
//!
//! Host processes serving many rooms load decks without blocking a runtime
//! worker thread.

use crate::loader::deck::{DeckList, DeckLoader};
use crate::{Result, TableError};
use std::path::Path;

/// Read and parse a .dck file on the tokio runtime
pub async fn load_deck(path: impl AsRef<Path>) -> Result<DeckList> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    DeckLoader::parse(&content)
}

/// Load several decks concurrently, preserving input order
pub async fn load_decks<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<DeckList>> {
    let mut tasks = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref().to_path_buf();
        tasks.push(tokio::spawn(async move { load_deck(path).await }));
    }

    let mut decks = Vec::with_capacity(tasks.len());
    for task in tasks {
        let deck = task
            .await
            .map_err(|e| TableError::IoError(std::io::Error::other(e)))??;
        decks.push(deck);
    }
    Ok(decks)
}

//! Favorite template storage

use crate::types::{Favorite, FavoriteId, LedgerError};
use std::collections::HashMap;

/// Ordered favorites with an ID index
#[derive(Debug, Default)]
pub struct FavoriteStore {
    favorites: Vec<Favorite>,
    index: HashMap<FavoriteId, usize>,
}

impl FavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, favorite: Favorite) -> &Favorite {
        let position = self.favorites.len();
        self.index.entry(favorite.id.clone()).or_insert(position);
        self.favorites.push(favorite);
        &self.favorites[position]
    }

    pub fn get(&self, id: &str) -> Option<&Favorite> {
        self.index.get(id).map(|&position| &self.favorites[position])
    }

    /// Get a favorite by ID, failing with `FavoriteNotFound`
    pub fn find(&self, id: &str) -> Result<&Favorite, LedgerError> {
        self.get(id).ok_or_else(|| LedgerError::favorite_not_found(id))
    }

    /// Insert a favorite, or overwrite the one with the same ID
    ///
    /// Returns `true` when a new favorite was inserted.
    pub fn upsert(&mut self, favorite: Favorite) -> bool {
        match self.index.get(&favorite.id) {
            Some(&position) => {
                self.favorites[position] = favorite;
                false
            }
            None => {
                self.insert(favorite);
                true
            }
        }
    }

    pub fn all(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }
}

//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Bookmark, BookmarkFilter, BookmarkId, BookmarkUpdate, NewBookmark};

/// Trait for storing and retrieving bookmarks
///
/// Implemented by the infrastructure layer (trove-store). Every operation is
/// scoped to an owner; bookmarks belonging to someone else behave as absent.
pub trait BookmarkStore {
    /// Error type for store operations
    type Error;

    /// Persist a new bookmark
    ///
    /// `created_at` overrides the creation time; `None` means "now". The
    /// override exists for summary artifacts, which take their sources' date.
    fn create_bookmark(
        &mut self,
        owner: &str,
        bookmark: NewBookmark,
        created_at: Option<u64>,
    ) -> Result<Bookmark, Self::Error>;

    /// Get a bookmark by ID
    fn get_bookmark(&self, owner: &str, id: BookmarkId) -> Result<Option<Bookmark>, Self::Error>;

    /// Get several bookmarks; one entry per requested id, `None` when
    /// missing or not owned
    fn get_bookmarks_by_ids(
        &self,
        owner: &str,
        ids: &[BookmarkId],
    ) -> Result<Vec<Option<Bookmark>>, Self::Error>;

    /// Apply a partial update; `None` if the bookmark does not exist
    fn update_bookmark(
        &mut self,
        owner: &str,
        id: BookmarkId,
        update: BookmarkUpdate,
    ) -> Result<Option<Bookmark>, Self::Error>;

    /// Delete a bookmark; false if it did not exist
    fn delete_bookmark(&mut self, owner: &str, id: BookmarkId) -> Result<bool, Self::Error>;

    /// List bookmarks matching a filter, newest first
    fn list_bookmarks(
        &self,
        owner: &str,
        filter: &BookmarkFilter,
    ) -> Result<Vec<Bookmark>, Self::Error>;
}

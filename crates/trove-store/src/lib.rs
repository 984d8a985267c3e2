//! Trove Storage Layer
//!
//! Implements the `BookmarkStore` trait on SQLite.
//!
//! # Architecture
//!
//! - One `bookmarks` table, scoped by owner
//! - Categories stored as a JSON array, in insertion order
//! - Flag and owner predicates run in SQL; category, date and text predicates
//!   reuse `BookmarkFilter::matches` so every caller sees the same rules
//!
//! # Examples
//!
//! ```no_run
//! use trove_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for bookmark operations
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use trove_domain::category;
use trove_domain::traits::BookmarkStore;
use trove_domain::{
    now_millis, Bookmark, BookmarkFilter, BookmarkId, BookmarkKind, BookmarkUpdate, NewBookmark,
};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The owner already saved this URL
    #[error("Duplicate bookmark: {0}")]
    Duplicate(String),

    /// Rejected input
    #[error("Invalid bookmark: {0}")]
    Invalid(String),
}

const SELECT_COLUMNS: &str = "SELECT id, owner, kind, url, title, content, domain, is_read, is_favorite, categories, created_at, updated_at FROM bookmarks";

/// SQLite-based implementation of BookmarkStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store behind a `Mutex`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Convert BookmarkId to bytes for storage
    fn id_to_bytes(id: BookmarkId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to BookmarkId
    fn bytes_to_id(bytes: &[u8]) -> Result<BookmarkId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for BookmarkId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(BookmarkId::from_value(u128::from_be_bytes(arr)))
    }

    fn encode_categories(categories: &[String]) -> Result<String, StoreError> {
        serde_json::to_string(categories).map_err(|e| StoreError::InvalidData(e.to_string()))
    }

    fn row_to_bookmark(row: &Row<'_>) -> rusqlite::Result<Bookmark> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let url: String = row.get(3)?;
        let kind = row
            .get::<_, Option<String>>(2)?
            .as_deref()
            .and_then(BookmarkKind::parse)
            .unwrap_or_else(|| BookmarkKind::from_url(&url));

        let categories_json: String = row.get(9)?;
        let categories: Vec<String> = serde_json::from_str(&categories_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Bookmark {
            id,
            owner: row.get(1)?,
            kind,
            url,
            title: row.get(4)?,
            content: row.get(5)?,
            domain: row.get(6)?,
            is_read: row.get(7)?,
            is_favorite: row.get(8)?,
            categories,
            created_at: row.get::<_, i64>(10)? as u64,
            updated_at: row.get::<_, i64>(11)? as u64,
        })
    }

    fn map_insert_error(err: rusqlite::Error, url: &str) -> StoreError {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                StoreError::Duplicate(url.to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

impl BookmarkStore for SqliteStore {
    type Error = StoreError;

    fn create_bookmark(
        &mut self,
        owner: &str,
        bookmark: NewBookmark,
        created_at: Option<u64>,
    ) -> Result<Bookmark, Self::Error> {
        let url = bookmark.url.trim().to_string();
        if url.is_empty() {
            return Err(StoreError::Invalid("url is empty".to_string()));
        }
        if owner.trim().is_empty() {
            return Err(StoreError::Invalid("owner is empty".to_string()));
        }

        let now = now_millis();
        let domain = bookmark.domain();
        let title = match bookmark.title.trim() {
            "" if !domain.is_empty() => domain.clone(),
            "" => url.clone(),
            t => t.to_string(),
        };

        let stored = Bookmark {
            id: BookmarkId::new(),
            owner: owner.to_string(),
            kind: bookmark.kind,
            url,
            title,
            content: bookmark.content,
            domain,
            is_read: bookmark.is_read,
            is_favorite: bookmark.is_favorite,
            categories: category::dedupe(&bookmark.categories),
            created_at: created_at.unwrap_or(now),
            updated_at: now,
        };

        self.conn
            .execute(
                "INSERT INTO bookmarks (id, owner, kind, url, title, content, domain, is_read, is_favorite, categories, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    Self::id_to_bytes(stored.id),
                    &stored.owner,
                    stored.kind.as_str(),
                    &stored.url,
                    &stored.title,
                    &stored.content,
                    &stored.domain,
                    stored.is_read,
                    stored.is_favorite,
                    Self::encode_categories(&stored.categories)?,
                    stored.created_at as i64,
                    stored.updated_at as i64,
                ],
            )
            .map_err(|e| Self::map_insert_error(e, &stored.url))?;

        debug!(id = %stored.id, kind = stored.kind.as_str(), "Created bookmark");
        Ok(stored)
    }

    fn get_bookmark(&self, owner: &str, id: BookmarkId) -> Result<Option<Bookmark>, Self::Error> {
        let sql = format!("{} WHERE id = ?1 AND owner = ?2", SELECT_COLUMNS);
        let bookmark = self
            .conn
            .query_row(&sql, params![Self::id_to_bytes(id), owner], Self::row_to_bookmark)
            .optional()?;
        Ok(bookmark)
    }

    fn get_bookmarks_by_ids(
        &self,
        owner: &str,
        ids: &[BookmarkId],
    ) -> Result<Vec<Option<Bookmark>>, Self::Error> {
        ids.iter().map(|id| self.get_bookmark(owner, *id)).collect()
    }

    fn update_bookmark(
        &mut self,
        owner: &str,
        id: BookmarkId,
        update: BookmarkUpdate,
    ) -> Result<Option<Bookmark>, Self::Error> {
        let Some(mut bookmark) = self.get_bookmark(owner, id)? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(bookmark));
        }

        if let Some(title) = update.title {
            let title = title.trim();
            if !title.is_empty() {
                bookmark.title = title.to_string();
            }
        }
        if let Some(is_read) = update.is_read {
            bookmark.is_read = is_read;
        }
        if let Some(is_favorite) = update.is_favorite {
            bookmark.is_favorite = is_favorite;
        }
        if let Some(categories) = update.categories {
            bookmark.categories = category::dedupe(&categories);
        }
        bookmark.updated_at = now_millis();

        self.conn.execute(
            "UPDATE bookmarks SET title = ?1, is_read = ?2, is_favorite = ?3, categories = ?4, updated_at = ?5
             WHERE id = ?6 AND owner = ?7",
            params![
                &bookmark.title,
                bookmark.is_read,
                bookmark.is_favorite,
                Self::encode_categories(&bookmark.categories)?,
                bookmark.updated_at as i64,
                Self::id_to_bytes(id),
                owner,
            ],
        )?;

        Ok(Some(bookmark))
    }

    fn delete_bookmark(&mut self, owner: &str, id: BookmarkId) -> Result<bool, Self::Error> {
        let deleted = self.conn.execute(
            "DELETE FROM bookmarks WHERE id = ?1 AND owner = ?2",
            params![Self::id_to_bytes(id), owner],
        )?;
        Ok(deleted > 0)
    }

    fn list_bookmarks(
        &self,
        owner: &str,
        filter: &BookmarkFilter,
    ) -> Result<Vec<Bookmark>, Self::Error> {
        let mut sql = format!("{} WHERE owner = ?", SELECT_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(owner.to_string())];

        if let Some(is_read) = filter.is_read {
            sql.push_str(" AND is_read = ?");
            params.push(Box::new(is_read));
        }

        if let Some(is_favorite) = filter.is_favorite {
            sql.push_str(" AND is_favorite = ?");
            params.push(Box::new(is_favorite));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let now = now_millis();
        let bookmarks = stmt
            .query_map(&param_refs[..], Self::row_to_bookmark)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|b| filter.matches(b, now))
            .collect();

        Ok(bookmarks)
    }
}

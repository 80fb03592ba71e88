use std::collections::HashMap;

use crate::db::{DbConnection, DbPool};
use crate::domain::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::association::OwnerRef;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::tag::{NewTag, Tag};
use crate::domain::types::{ArticleId, OwnerType, VideoId};
use crate::domain::video::{NewVideo, Video, VideoUpdate};

pub mod article;
pub mod association;
pub mod errors;
#[cfg(test)]
pub mod test;
pub mod video;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for article entities.
pub trait ArticleReader {
    /// List all articles with their tags and comments, ordered by id.
    fn list_articles(&self) -> RepositoryResult<Vec<Article>>;
    /// Retrieve an article with its tags and comments.
    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>>;
    /// Whether an article with `id` is stored; loads no associations.
    fn article_exists(&self, id: ArticleId) -> RepositoryResult<bool>;
}

/// Write operations for article entities.
pub trait ArticleWriter {
    /// Persist a new article together with its embedded associations.
    fn create_article(&self, article: &NewArticle) -> RepositoryResult<Article>;
    /// Apply a partial update and attach any embedded associations.
    ///
    /// Fails with [`RepositoryError::NotFound`] when the article is absent.
    fn update_article(&self, id: ArticleId, update: &ArticleUpdate) -> RepositoryResult<Article>;
}

/// Read-only operations for video entities.
pub trait VideoReader {
    /// List all videos with their tags and comments, ordered by id.
    fn list_videos(&self) -> RepositoryResult<Vec<Video>>;
    /// Retrieve a video with its tags and comments.
    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>>;
    fn video_exists(&self, id: VideoId) -> RepositoryResult<bool>;
}

/// Write operations for video entities.
pub trait VideoWriter {
    /// Persist a new video together with its embedded associations.
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<Video>;
    /// Apply a partial update and attach any embedded associations.
    fn update_video(&self, id: VideoId, update: &VideoUpdate) -> RepositoryResult<Video>;
}

/// Lookup of polymorphic association rows by owner.
///
/// Only rows whose stored `(owner_id, owner_type)` match exactly are
/// returned. No match is an empty result, never an error.
pub trait AssociationReader {
    /// Tags owned by `owner`.
    fn load_tags(&self, owner: OwnerRef) -> RepositoryResult<Vec<Tag>>;
    /// Comments owned by `owner`.
    fn load_comments(&self, owner: OwnerRef) -> RepositoryResult<Vec<Comment>>;
    /// Tags for a set of owners of one type, grouped by owner id.
    fn load_tags_for_owners(
        &self,
        owner_type: OwnerType,
        owner_ids: &[i32],
    ) -> RepositoryResult<HashMap<i32, Vec<Tag>>>;
    /// Comments for a set of owners of one type, grouped by owner id.
    fn load_comments_for_owners(
        &self,
        owner_type: OwnerType,
        owner_ids: &[i32],
    ) -> RepositoryResult<HashMap<i32, Vec<Comment>>>;
}

/// Attaching association rows to an owner.
///
/// New rows are stamped with `owner` and inserted; rows carrying an id are
/// updated in place. A row already owned by someone else is rejected with
/// [`RepositoryError::AssociationOwnerMismatch`] and nothing is written.
pub trait AssociationWriter {
    /// Attach tags to `owner`, returning the stored rows.
    fn attach_tags(&self, owner: OwnerRef, tags: &[NewTag]) -> RepositoryResult<Vec<Tag>>;
    /// Attach comments to `owner`, returning the stored rows.
    fn attach_comments(
        &self,
        owner: OwnerRef,
        comments: &[NewComment],
    ) -> RepositoryResult<Vec<Comment>>;
}

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{NaiveDateTime, Utc};

use crate::domain::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::association::{AssociationOwner, OwnerRef, ensure_owner};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::tag::{NewTag, Tag};
use crate::domain::types::{ArticleId, CommentId, OwnerType, TagId, VideoId};
use crate::domain::video::{NewVideo, Video, VideoUpdate};
use crate::repository::{
    ArticleReader, ArticleWriter, AssociationReader, AssociationWriter, RepositoryError,
    RepositoryResult, VideoReader, VideoWriter,
};

/// Last id handed out per table; ids of different tables overlap like in SQL.
#[derive(Default)]
struct Sequences {
    article: i32,
    video: i32,
    tag: i32,
    comment: i32,
}

fn next(sequence: &mut i32) -> i32 {
    *sequence += 1;
    *sequence
}

#[derive(Default)]
struct State {
    sequences: Sequences,
    articles: Vec<Article>,
    videos: Vec<Video>,
    tags: Vec<Tag>,
    comments: Vec<Comment>,
}

impl State {
    fn owner_exists(&self, owner: OwnerRef) -> bool {
        match owner.owner_type {
            OwnerType::Article => self.articles.iter().any(|a| a.id == owner.owner_id),
            OwnerType::Video => self.videos.iter().any(|v| v.id == owner.owner_id),
        }
    }

    fn tags_of(&self, owner: OwnerRef) -> Vec<Tag> {
        self.tags
            .iter()
            .filter(|t| t.owner() == owner)
            .cloned()
            .collect()
    }

    fn comments_of(&self, owner: OwnerRef) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.owner() == owner)
            .cloned()
            .collect()
    }

    /// Reject `rows` for `owner` without touching any state.
    fn check_tags(&self, owner: OwnerRef, rows: &[NewTag]) -> RepositoryResult<()> {
        for row in rows {
            ensure_owner("tag", row.id.map(TagId::get), row.owner, owner)?;
            if let Some(id) = row.id {
                let existing = self.tags.iter().find(|t| t.id == id).ok_or_else(|| {
                    RepositoryError::ValidationError(format!("tag {id} does not exist"))
                })?;
                ensure_owner("tag", Some(id.get()), Some(existing.owner()), owner)?;
            }
        }
        Ok(())
    }

    fn check_comments(&self, owner: OwnerRef, rows: &[NewComment]) -> RepositoryResult<()> {
        for row in rows {
            ensure_owner("comment", row.id.map(CommentId::get), row.owner, owner)?;
            if let Some(id) = row.id {
                let existing = self.comments.iter().find(|c| c.id == id).ok_or_else(|| {
                    RepositoryError::ValidationError(format!("comment {id} does not exist"))
                })?;
                ensure_owner("comment", Some(id.get()), Some(existing.owner()), owner)?;
            }
        }
        Ok(())
    }

    /// Write rows already accepted by [`State::check_tags`].
    fn write_tags(
        &mut self,
        owner: OwnerRef,
        rows: &[NewTag],
        now: NaiveDateTime,
    ) -> RepositoryResult<Vec<Tag>> {
        let mut attached = Vec::with_capacity(rows.len());
        for row in rows {
            let tag = match row.id {
                Some(id) => {
                    let tag = self
                        .tags
                        .iter_mut()
                        .find(|t| t.id == id)
                        .ok_or(RepositoryError::NotFound)?;
                    if let Some(name) = &row.name {
                        tag.name = name.clone();
                    }
                    tag.updated_at = now;
                    tag.clone()
                }
                None => {
                    let tag = Tag {
                        id: TagId::new(next(&mut self.sequences.tag))?,
                        created_at: now,
                        updated_at: now,
                        name: row.name.clone().unwrap_or_default(),
                        owner_id: owner.owner_id,
                        owner_type: owner.owner_type,
                    };
                    self.tags.push(tag.clone());
                    tag
                }
            };
            attached.push(tag);
        }
        Ok(attached)
    }

    fn write_comments(
        &mut self,
        owner: OwnerRef,
        rows: &[NewComment],
        now: NaiveDateTime,
    ) -> RepositoryResult<Vec<Comment>> {
        let mut attached = Vec::with_capacity(rows.len());
        for row in rows {
            let comment = match row.id {
                Some(id) => {
                    let comment = self
                        .comments
                        .iter_mut()
                        .find(|c| c.id == id)
                        .ok_or(RepositoryError::NotFound)?;
                    if let Some(content) = &row.content {
                        comment.content = content.clone();
                    }
                    comment.updated_at = now;
                    comment.clone()
                }
                None => {
                    let comment = Comment {
                        id: CommentId::new(next(&mut self.sequences.comment))?,
                        created_at: now,
                        updated_at: now,
                        content: row.content.clone().unwrap_or_default(),
                        owner_id: owner.owner_id,
                        owner_type: owner.owner_type,
                    };
                    self.comments.push(comment.clone());
                    comment
                }
            };
            attached.push(comment);
        }
        Ok(attached)
    }

    fn article(&self, mut article: Article) -> Article {
        let owner = OwnerRef::of(&article);
        article.tags = self.tags_of(owner);
        article.comments = self.comments_of(owner);
        article
    }

    fn video(&self, mut video: Video) -> Video {
        let owner = OwnerRef::of(&video);
        video.tags = self.tags_of(owner);
        video.comments = self.comments_of(owner);
        video
    }
}

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
    fail: bool,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every call fails with a database error.
    pub fn failing() -> Self {
        Self {
            state: Mutex::default(),
            fail: true,
        }
    }

    fn state(&self) -> RepositoryResult<std::sync::MutexGuard<'_, State>> {
        if self.fail {
            return Err(RepositoryError::DatabaseError(
                diesel::result::Error::BrokenTransactionManager,
            ));
        }
        Ok(self.state.lock().unwrap())
    }
}

impl ArticleReader for TestRepository {
    fn list_articles(&self) -> RepositoryResult<Vec<Article>> {
        let state = self.state()?;
        Ok(state
            .articles
            .iter()
            .map(|a| state.article(a.clone()))
            .collect())
    }

    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>> {
        let state = self.state()?;
        Ok(state
            .articles
            .iter()
            .find(|a| a.id == id)
            .map(|a| state.article(a.clone())))
    }

    fn article_exists(&self, id: ArticleId) -> RepositoryResult<bool> {
        Ok(self.state()?.owner_exists(OwnerRef::new(OwnerType::Article, id.get())))
    }
}

impl ArticleWriter for TestRepository {
    fn create_article(&self, article: &NewArticle) -> RepositoryResult<Article> {
        let mut state = self.state()?;
        let stored = Article {
            id: ArticleId::new(next(&mut state.sequences.article))?,
            created_at: article.created_at,
            updated_at: article.updated_at,
            title: article.title.clone(),
            content: article.content.clone(),
            tags: vec![],
            comments: vec![],
        };
        let owner = OwnerRef::of(&stored);
        state.check_tags(owner, &article.tags)?;
        state.check_comments(owner, &article.comments)?;

        state.articles.push(stored.clone());
        state.write_tags(owner, &article.tags, article.created_at)?;
        state.write_comments(owner, &article.comments, article.created_at)?;
        Ok(state.article(stored))
    }

    fn update_article(&self, id: ArticleId, update: &ArticleUpdate) -> RepositoryResult<Article> {
        let mut state = self.state()?;
        let owner = OwnerRef::new(Article::OWNER_TYPE, id.get());
        if !state.owner_exists(owner) {
            return Err(RepositoryError::NotFound);
        }
        state.check_tags(owner, &update.tags)?;
        state.check_comments(owner, &update.comments)?;
        state.write_tags(owner, &update.tags, update.updated_at)?;
        state.write_comments(owner, &update.comments, update.updated_at)?;

        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if let Some(title) = &update.title {
            article.title = title.clone();
        }
        if let Some(content) = &update.content {
            article.content = content.clone();
        }
        article.updated_at = update.updated_at;
        let article = article.clone();
        Ok(state.article(article))
    }
}

impl VideoReader for TestRepository {
    fn list_videos(&self) -> RepositoryResult<Vec<Video>> {
        let state = self.state()?;
        Ok(state.videos.iter().map(|v| state.video(v.clone())).collect())
    }

    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>> {
        let state = self.state()?;
        Ok(state
            .videos
            .iter()
            .find(|v| v.id == id)
            .map(|v| state.video(v.clone())))
    }

    fn video_exists(&self, id: VideoId) -> RepositoryResult<bool> {
        Ok(self.state()?.owner_exists(OwnerRef::new(OwnerType::Video, id.get())))
    }
}

impl VideoWriter for TestRepository {
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<Video> {
        let mut state = self.state()?;
        let stored = Video {
            id: VideoId::new(next(&mut state.sequences.video))?,
            created_at: video.created_at,
            updated_at: video.updated_at,
            title: video.title.clone(),
            url: video.url.clone(),
            tags: vec![],
            comments: vec![],
        };
        let owner = OwnerRef::of(&stored);
        state.check_tags(owner, &video.tags)?;
        state.check_comments(owner, &video.comments)?;

        state.videos.push(stored.clone());
        state.write_tags(owner, &video.tags, video.created_at)?;
        state.write_comments(owner, &video.comments, video.created_at)?;
        Ok(state.video(stored))
    }

    fn update_video(&self, id: VideoId, update: &VideoUpdate) -> RepositoryResult<Video> {
        let mut state = self.state()?;
        let owner = OwnerRef::new(Video::OWNER_TYPE, id.get());
        if !state.owner_exists(owner) {
            return Err(RepositoryError::NotFound);
        }
        state.check_tags(owner, &update.tags)?;
        state.check_comments(owner, &update.comments)?;
        state.write_tags(owner, &update.tags, update.updated_at)?;
        state.write_comments(owner, &update.comments, update.updated_at)?;

        let video = state
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if let Some(title) = &update.title {
            video.title = title.clone();
        }
        if let Some(url) = &update.url {
            video.url = url.clone();
        }
        video.updated_at = update.updated_at;
        let video = video.clone();
        Ok(state.video(video))
    }
}

impl AssociationReader for TestRepository {
    fn load_tags(&self, owner: OwnerRef) -> RepositoryResult<Vec<Tag>> {
        Ok(self.state()?.tags_of(owner))
    }

    fn load_comments(&self, owner: OwnerRef) -> RepositoryResult<Vec<Comment>> {
        Ok(self.state()?.comments_of(owner))
    }

    fn load_tags_for_owners(
        &self,
        owner_type: OwnerType,
        owner_ids: &[i32],
    ) -> RepositoryResult<HashMap<i32, Vec<Tag>>> {
        let state = self.state()?;
        let mut grouped: HashMap<i32, Vec<Tag>> = HashMap::new();
        for tag in state
            .tags
            .iter()
            .filter(|t| t.owner_type == owner_type && owner_ids.contains(&t.owner_id))
        {
            grouped.entry(tag.owner_id).or_default().push(tag.clone());
        }
        Ok(grouped)
    }

    fn load_comments_for_owners(
        &self,
        owner_type: OwnerType,
        owner_ids: &[i32],
    ) -> RepositoryResult<HashMap<i32, Vec<Comment>>> {
        let state = self.state()?;
        let mut grouped: HashMap<i32, Vec<Comment>> = HashMap::new();
        for comment in state
            .comments
            .iter()
            .filter(|c| c.owner_type == owner_type && owner_ids.contains(&c.owner_id))
        {
            grouped
                .entry(comment.owner_id)
                .or_default()
                .push(comment.clone());
        }
        Ok(grouped)
    }
}

impl AssociationWriter for TestRepository {
    fn attach_tags(&self, owner: OwnerRef, tags: &[NewTag]) -> RepositoryResult<Vec<Tag>> {
        let mut state = self.state()?;
        if !state.owner_exists(owner) {
            return Err(RepositoryError::NotFound);
        }
        state.check_tags(owner, tags)?;
        state.write_tags(owner, tags, Utc::now().naive_utc())
    }

    fn attach_comments(
        &self,
        owner: OwnerRef,
        comments: &[NewComment],
    ) -> RepositoryResult<Vec<Comment>> {
        let mut state = self.state()?;
        if !state.owner_exists(owner) {
            return Err(RepositoryError::NotFound);
        }
        state.check_comments(owner, comments)?;
        state.write_comments(owner, comments, Utc::now().naive_utc())
    }
}

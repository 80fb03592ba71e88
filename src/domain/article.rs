use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::association::AssociationOwner;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::tag::{NewTag, Tag};
use crate::domain::types::{ArticleId, OwnerType};

/// A text article together with its eagerly loaded associations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub title: String,
    pub content: String,
    pub tags: Vec<Tag>,
    pub comments: Vec<Comment>,
}

impl AssociationOwner for Article {
    const OWNER_TYPE: OwnerType = OwnerType::Article;

    fn owner_id(&self) -> i32 {
        self.id.get()
    }
}

/// Data required to insert a new [`Article`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub tags: Vec<NewTag>,
    pub comments: Vec<NewComment>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of an [`Article`].
///
/// `None` fields keep their stored value. Tags and comments are attached in
/// addition to the existing ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Vec<NewTag>,
    pub comments: Vec<NewComment>,
    pub updated_at: NaiveDateTime,
}

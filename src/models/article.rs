use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::article::{
    Article as DomainArticle, ArticleUpdate as DomainArticleUpdate,
    NewArticle as DomainNewArticle,
};
use crate::domain::association::AssociationOwner;
use crate::domain::comment::Comment as DomainComment;
use crate::domain::tag::Tag as DomainTag;
use crate::domain::types::{OwnerType, TypeConstraintError};

/// Diesel model representing the `articles` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::articles)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl AssociationOwner for Article {
    const OWNER_TYPE: OwnerType = OwnerType::Article;

    fn owner_id(&self) -> i32 {
        self.id
    }
}

impl Article {
    /// Combine the row with its already loaded associations.
    pub fn into_domain(
        self,
        tags: Vec<DomainTag>,
        comments: Vec<DomainComment>,
    ) -> Result<DomainArticle, TypeConstraintError> {
        Ok(DomainArticle {
            id: self.id.try_into()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            title: self.title,
            content: self.content,
            tags,
            comments,
        })
    }
}

/// Insertable form of [`Article`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::articles)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Patch applied to an [`Article`]; `None` columns are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::articles)]
pub struct ArticleChangeset {
    pub title: Option<String>,
    pub content: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<&DomainNewArticle> for NewArticle {
    fn from(article: &DomainNewArticle) -> Self {
        Self {
            title: article.title.clone(),
            content: article.content.clone(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

impl From<&DomainArticleUpdate> for ArticleChangeset {
    fn from(update: &DomainArticleUpdate) -> Self {
        Self {
            title: update.title.clone(),
            content: update.content.clone(),
            updated_at: update.updated_at,
        }
    }
}

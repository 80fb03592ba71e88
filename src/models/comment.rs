use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::association::OwnerRef;
use crate::domain::comment::Comment as DomainComment;
use crate::domain::types::{OwnerType, TypeConstraintError};

/// Diesel model representing the `comments` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::comments)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub owner_id: i32,
    pub owner_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Comment`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub content: String,
    pub owner_id: i32,
    pub owner_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Edit applied to an existing [`Comment`]; a `None` content is left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::comments)]
pub struct CommentChangeset {
    pub content: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewComment {
    pub fn new(content: String, owner: OwnerRef, now: NaiveDateTime) -> Self {
        Self {
            content,
            owner_id: owner.owner_id,
            owner_type: owner.owner_type.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Comment {
    pub fn owner(&self) -> Result<OwnerRef, TypeConstraintError> {
        Ok(OwnerRef::new(
            OwnerType::try_from(self.owner_type.as_str())?,
            self.owner_id,
        ))
    }
}

impl TryFrom<Comment> for DomainComment {
    type Error = TypeConstraintError;

    fn try_from(comment: Comment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: comment.id.try_into()?,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            content: comment.content,
            owner_id: comment.owner_id,
            owner_type: comment.owner_type.try_into()?,
        })
    }
}

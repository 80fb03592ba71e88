use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::association::OwnerRef;
use crate::domain::types::{CommentId, OwnerType};

/// A comment left on an article or a video.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub content: String,
    pub owner_id: i32,
    pub owner_type: OwnerType,
}

impl Comment {
    pub fn owner(&self) -> OwnerRef {
        OwnerRef::new(self.owner_type, self.owner_id)
    }
}

/// Comment row supplied inside an owner's create/update payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub id: Option<CommentId>,
    /// `None` keeps the stored content.
    pub content: Option<String>,
    pub owner: Option<OwnerRef>,
}

impl NewComment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: Some(content.into()),
            owner: None,
        }
    }
}

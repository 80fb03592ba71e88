use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::association::AssociationOwner;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::tag::{NewTag, Tag};
use crate::domain::types::{OwnerType, VideoId};

/// A video link together with its eagerly loaded associations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: VideoId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub title: String,
    pub url: String,
    pub tags: Vec<Tag>,
    pub comments: Vec<Comment>,
}

impl AssociationOwner for Video {
    const OWNER_TYPE: OwnerType = OwnerType::Video;

    fn owner_id(&self) -> i32 {
        self.id.get()
    }
}

/// Data required to insert a new [`Video`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub url: String,
    pub tags: Vec<NewTag>,
    pub comments: Vec<NewComment>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`Video`]; `None` fields keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Vec<NewTag>,
    pub comments: Vec<NewComment>,
    pub updated_at: NaiveDateTime,
}

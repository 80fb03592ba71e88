use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::association::AssociationOwner;
use crate::domain::comment::Comment as DomainComment;
use crate::domain::tag::Tag as DomainTag;
use crate::domain::types::{OwnerType, TypeConstraintError};
use crate::domain::video::{
    NewVideo as DomainNewVideo, Video as DomainVideo, VideoUpdate as DomainVideoUpdate,
};

/// Diesel model representing the `videos` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::videos)]
pub struct Video {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl AssociationOwner for Video {
    const OWNER_TYPE: OwnerType = OwnerType::Video;

    fn owner_id(&self) -> i32 {
        self.id
    }
}

impl Video {
    pub fn into_domain(
        self,
        tags: Vec<DomainTag>,
        comments: Vec<DomainComment>,
    ) -> Result<DomainVideo, TypeConstraintError> {
        Ok(DomainVideo {
            id: self.id.try_into()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            title: self.title,
            url: self.url,
            tags,
            comments,
        })
    }
}

/// Insertable form of [`Video`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::videos)]
pub struct NewVideo {
    pub title: String,
    pub url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::videos)]
pub struct VideoChangeset {
    pub title: Option<String>,
    pub url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<&DomainNewVideo> for NewVideo {
    fn from(video: &DomainNewVideo) -> Self {
        Self {
            title: video.title.clone(),
            url: video.url.clone(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

impl From<&DomainVideoUpdate> for VideoChangeset {
    fn from(update: &DomainVideoUpdate) -> Self {
        Self {
            title: update.title.clone(),
            url: update.url.clone(),
            updated_at: update.updated_at,
        }
    }
}

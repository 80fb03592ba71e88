use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::association::OwnerRef;
use crate::domain::types::{OwnerType, TagId};

/// A label attached to an article or a video.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub name: String,
    pub owner_id: i32,
    pub owner_type: OwnerType,
}

impl Tag {
    pub fn owner(&self) -> OwnerRef {
        OwnerRef::new(self.owner_type, self.owner_id)
    }
}

/// Tag row supplied inside an owner's create/update payload.
///
/// `id` is set when the payload refers to an already persisted tag; `owner`
/// is set when the payload explicitly names the row's owner. A missing
/// `name` keeps the stored one, or is empty for a new row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTag {
    pub id: Option<TagId>,
    pub name: Option<String>,
    pub owner: Option<OwnerRef>,
}

impl NewTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            owner: None,
        }
    }
}

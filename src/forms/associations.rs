use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::association::OwnerRef;
use crate::domain::comment::NewComment;
use crate::domain::tag::NewTag;
use crate::domain::types::{CommentId, OwnerType, TagId};
use crate::forms::FormError;

/// Tag embedded in an article or video payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagForm {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub owner_id: Option<i32>,
    pub owner_type: Option<OwnerType>,
}

/// Comment embedded in an article or video payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub id: Option<i32>,
    pub content: Option<String>,
    pub owner_id: Option<i32>,
    pub owner_type: Option<OwnerType>,
}

fn owner_claim(
    owner_id: Option<i32>,
    owner_type: Option<OwnerType>,
) -> Result<Option<OwnerRef>, FormError> {
    match (owner_id, owner_type) {
        (Some(owner_id), Some(owner_type)) => Ok(Some(OwnerRef::new(owner_type, owner_id))),
        (None, None) => Ok(None),
        _ => Err(FormError::Validation(
            "ownerId and ownerType must be given together".to_string(),
        )),
    }
}

impl TryFrom<TagForm> for NewTag {
    type Error = FormError;

    fn try_from(value: TagForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            id: value.id.map(TagId::new).transpose()?,
            name: value.name,
            owner: owner_claim(value.owner_id, value.owner_type)?,
        })
    }
}

impl TryFrom<CommentForm> for NewComment {
    type Error = FormError;

    fn try_from(value: CommentForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            id: value.id.map(CommentId::new).transpose()?,
            content: value.content,
            owner: owner_claim(value.owner_id, value.owner_type)?,
        })
    }
}

/// Convert every embedded tag, failing on the first invalid one.
pub fn into_new_tags(forms: Option<Vec<TagForm>>) -> Result<Vec<NewTag>, FormError> {
    forms
        .unwrap_or_default()
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

/// Convert every embedded comment, failing on the first invalid one.
pub fn into_new_comments(forms: Option<Vec<CommentForm>>) -> Result<Vec<NewComment>, FormError> {
    forms
        .unwrap_or_default()
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

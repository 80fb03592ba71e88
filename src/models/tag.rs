use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::association::OwnerRef;
use crate::domain::tag::Tag as DomainTag;
use crate::domain::types::{OwnerType, TypeConstraintError};

/// Diesel model representing the `tags` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tags)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub owner_id: i32,
    pub owner_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Tag`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag {
    pub name: String,
    pub owner_id: i32,
    pub owner_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Edit applied to an existing [`Tag`]; a `None` name is left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::tags)]
pub struct TagChangeset {
    pub name: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewTag {
    pub fn new(name: String, owner: OwnerRef, now: NaiveDateTime) -> Self {
        Self {
            name,
            owner_id: owner.owner_id,
            owner_type: owner.owner_type.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Tag {
    pub fn owner(&self) -> Result<OwnerRef, TypeConstraintError> {
        Ok(OwnerRef::new(
            OwnerType::try_from(self.owner_type.as_str())?,
            self.owner_id,
        ))
    }
}

impl TryFrom<Tag> for DomainTag {
    type Error = TypeConstraintError;

    fn try_from(tag: Tag) -> Result<Self, Self::Error> {
        Ok(Self {
            id: tag.id.try_into()?,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
            name: tag.name,
            owner_id: tag.owner_id,
            owner_type: tag.owner_type.try_into()?,
        })
    }
}

//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers and discriminators are checked at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use utoipa::ToSchema;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Generates a positive `i32` identifier wrapper.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd,
            Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        // Association rows keep the raw owner id.
        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

id_newtype!(ArticleId, "Unique identifier for an article.", "article_id");
id_newtype!(VideoId, "Unique identifier for a video.", "video_id");
id_newtype!(TagId, "Unique identifier for a tag.", "tag_id");
id_newtype!(CommentId, "Unique identifier for a comment.", "comment_id");

/// Concrete type of the entity owning a tag or comment row.
///
/// The variant name is what gets stored in the `owner_type` column.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum OwnerType {
    Article,
    Video,
}

impl OwnerType {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::Video => "Video",
        }
    }
}

impl Display for OwnerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for OwnerType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Article" => Ok(Self::Article),
            "Video" => Ok(Self::Video),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "owner type: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for OwnerType {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<OwnerType> for String {
    fn from(value: OwnerType) -> Self {
        value.as_str().to_string()
    }
}

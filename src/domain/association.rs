//! Polymorphic ownership of tag and comment rows.
//!
//! A single `tags` (or `comments`) table serves every owner type. Each row
//! stores the owner's id next to a discriminator naming the owner's concrete
//! type, so equal ids coming from different tables never collide.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::domain::types::OwnerType;

/// The `(owner_id, owner_type)` pair stored on an association row.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    pub owner_id: i32,
    pub owner_type: OwnerType,
}

impl OwnerRef {
    pub const fn new(owner_type: OwnerType, owner_id: i32) -> Self {
        Self {
            owner_id,
            owner_type,
        }
    }

    /// Reference to `owner`, with the discriminator taken from its type.
    pub fn of<O: AssociationOwner>(owner: &O) -> Self {
        Self::new(O::OWNER_TYPE, owner.owner_id())
    }
}

impl Display for OwnerRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.owner_type, self.owner_id)
    }
}

/// Entity types that may own tags and comments.
pub trait AssociationOwner {
    /// Discriminator written next to the owner id.
    const OWNER_TYPE: OwnerType;

    /// Raw primary key of this owner.
    fn owner_id(&self) -> i32;
}

/// Return the discriminator for `owner`, fixed by its static type.
pub fn resolve_discriminator<O: AssociationOwner>(_owner: &O) -> OwnerType {
    O::OWNER_TYPE
}

/// An association row already belongs to a different owner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} {row} belongs to {existing}, cannot attach it to {requested}")]
pub struct AssociationOwnerMismatch {
    /// `"tag"` or `"comment"`.
    pub kind: &'static str,
    /// Row id, or `"new"` for a row that is not persisted yet.
    pub row: String,
    pub existing: OwnerRef,
    pub requested: OwnerRef,
}

/// Check that a row claiming `existing` may be attached to `requested`.
///
/// Rows without an owner claim are always accepted.
pub fn ensure_owner(
    kind: &'static str,
    row: Option<i32>,
    existing: Option<OwnerRef>,
    requested: OwnerRef,
) -> Result<(), AssociationOwnerMismatch> {
    match existing {
        Some(existing) if existing != requested => Err(AssociationOwnerMismatch {
            kind,
            row: row.map_or_else(|| "new".to_string(), |id| id.to_string()),
            existing,
            requested,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clip(i32);

    impl AssociationOwner for Clip {
        const OWNER_TYPE: OwnerType = OwnerType::Video;

        fn owner_id(&self) -> i32 {
            self.0
        }
    }

    #[test]
    fn discriminator_comes_from_the_type() {
        assert_eq!(resolve_discriminator(&Clip(1)), OwnerType::Video);
        assert_eq!(OwnerRef::of(&Clip(7)), OwnerRef::new(OwnerType::Video, 7));
    }

    #[test]
    fn same_id_with_other_type_is_a_mismatch() {
        let article = OwnerRef::new(OwnerType::Article, 1);
        let video = OwnerRef::new(OwnerType::Video, 1);

        let err = ensure_owner("tag", Some(3), Some(article), video).unwrap_err();
        assert_eq!(err.existing, article);
        assert_eq!(err.requested, video);
        assert_eq!(
            err.to_string(),
            "tag 3 belongs to Article 1, cannot attach it to Video 1"
        );
    }

    #[test]
    fn unclaimed_and_matching_rows_are_accepted() {
        let owner = OwnerRef::new(OwnerType::Article, 5);
        assert!(ensure_owner("comment", None, None, owner).is_ok());
        assert!(ensure_owner("comment", Some(2), Some(owner), owner).is_ok());
    }
}

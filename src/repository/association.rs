//! Loading and attaching rows of the polymorphic `tags` and `comments` tables.
//!
//! The free functions work on a borrowed connection so that owner writes can
//! run them inside their own transaction.

use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::association::{OwnerRef, ensure_owner};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::tag::{NewTag, Tag};
use crate::domain::types::OwnerType;
use crate::models::comment::{
    Comment as DbComment, CommentChangeset, NewComment as DbNewComment,
};
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, TagChangeset};
use crate::repository::{
    AssociationReader, AssociationWriter, DieselRepository, RepositoryError, RepositoryResult,
};

/// Upper bound on ids bound into a single `IN (...)` clause.
const MAX_IDS_PER_QUERY: usize = 500;

/// Whether the entity named by `owner` exists in its own table.
pub(crate) fn owner_exists(conn: &mut SqliteConnection, owner: OwnerRef) -> QueryResult<bool> {
    use crate::schema::{articles, videos};

    match owner.owner_type {
        OwnerType::Article => diesel::select(diesel::dsl::exists(
            articles::table.filter(articles::id.eq(owner.owner_id)),
        ))
        .get_result(conn),
        OwnerType::Video => diesel::select(diesel::dsl::exists(
            videos::table.filter(videos::id.eq(owner.owner_id)),
        ))
        .get_result(conn),
    }
}

pub(crate) fn load_tags(
    conn: &mut SqliteConnection,
    owner: OwnerRef,
) -> RepositoryResult<Vec<Tag>> {
    use crate::schema::tags;

    let tags = tags::table
        .filter(tags::owner_type.eq(owner.owner_type.as_str()))
        .filter(tags::owner_id.eq(owner.owner_id))
        .order(tags::id.asc())
        .load::<DbTag>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Tag>, _>>()?;

    Ok(tags)
}

pub(crate) fn load_comments(
    conn: &mut SqliteConnection,
    owner: OwnerRef,
) -> RepositoryResult<Vec<Comment>> {
    use crate::schema::comments;

    let comments = comments::table
        .filter(comments::owner_type.eq(owner.owner_type.as_str()))
        .filter(comments::owner_id.eq(owner.owner_id))
        .order(comments::id.asc())
        .load::<DbComment>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Comment>, _>>()?;

    Ok(comments)
}

pub(crate) fn load_tags_for_owners(
    conn: &mut SqliteConnection,
    owner_type: OwnerType,
    owner_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<Tag>>> {
    use crate::schema::tags;

    let mut grouped: HashMap<i32, Vec<Tag>> = HashMap::new();
    for chunk in owner_ids.chunks(MAX_IDS_PER_QUERY) {
        let rows = tags::table
            .filter(tags::owner_type.eq(owner_type.as_str()))
            .filter(tags::owner_id.eq_any(chunk.to_vec()))
            .order(tags::id.asc())
            .load::<DbTag>(conn)?;

        for row in rows {
            let tag: Tag = row.try_into()?;
            grouped.entry(tag.owner_id).or_default().push(tag);
        }
    }

    Ok(grouped)
}

pub(crate) fn load_comments_for_owners(
    conn: &mut SqliteConnection,
    owner_type: OwnerType,
    owner_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<Comment>>> {
    use crate::schema::comments;

    let mut grouped: HashMap<i32, Vec<Comment>> = HashMap::new();
    for chunk in owner_ids.chunks(MAX_IDS_PER_QUERY) {
        let rows = comments::table
            .filter(comments::owner_type.eq(owner_type.as_str()))
            .filter(comments::owner_id.eq_any(chunk.to_vec()))
            .order(comments::id.asc())
            .load::<DbComment>(conn)?;

        for row in rows {
            let comment: Comment = row.try_into()?;
            grouped.entry(comment.owner_id).or_default().push(comment);
        }
    }

    Ok(grouped)
}

/// Insert or update `rows` as tags of `owner`.
///
/// Must run inside a transaction: a mismatch on a later row does not undo
/// the rows written before it.
pub(crate) fn attach_tags(
    conn: &mut SqliteConnection,
    owner: OwnerRef,
    rows: &[NewTag],
    now: NaiveDateTime,
) -> RepositoryResult<Vec<Tag>> {
    use crate::schema::tags;

    let mut attached: Vec<Tag> = Vec::with_capacity(rows.len());
    for row in rows {
        ensure_owner("tag", row.id.map(|id| id.get()), row.owner, owner)?;

        let stored = match row.id {
            None => diesel::insert_into(tags::table)
                .values(DbNewTag::new(
                    row.name.clone().unwrap_or_default(),
                    owner,
                    now,
                ))
                .get_result::<DbTag>(conn)?,
            Some(id) => {
                let existing = tags::table
                    .filter(tags::id.eq(id.get()))
                    .first::<DbTag>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        RepositoryError::ValidationError(format!("tag {id} does not exist"))
                    })?;
                ensure_owner("tag", Some(existing.id), Some(existing.owner()?), owner)?;

                diesel::update(tags::table.filter(tags::id.eq(existing.id)))
                    .set(TagChangeset {
                        name: row.name.clone(),
                        updated_at: now,
                    })
                    .get_result::<DbTag>(conn)?
            }
        };

        attached.push(stored.try_into()?);
    }

    Ok(attached)
}

/// Insert or update `rows` as comments of `owner`. See [`attach_tags`].
pub(crate) fn attach_comments(
    conn: &mut SqliteConnection,
    owner: OwnerRef,
    rows: &[NewComment],
    now: NaiveDateTime,
) -> RepositoryResult<Vec<Comment>> {
    use crate::schema::comments;

    let mut attached: Vec<Comment> = Vec::with_capacity(rows.len());
    for row in rows {
        ensure_owner("comment", row.id.map(|id| id.get()), row.owner, owner)?;

        let stored = match row.id {
            None => diesel::insert_into(comments::table)
                .values(DbNewComment::new(
                    row.content.clone().unwrap_or_default(),
                    owner,
                    now,
                ))
                .get_result::<DbComment>(conn)?,
            Some(id) => {
                let existing = comments::table
                    .filter(comments::id.eq(id.get()))
                    .first::<DbComment>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        RepositoryError::ValidationError(format!("comment {id} does not exist"))
                    })?;
                ensure_owner("comment", Some(existing.id), Some(existing.owner()?), owner)?;

                diesel::update(comments::table.filter(comments::id.eq(existing.id)))
                    .set(CommentChangeset {
                        content: row.content.clone(),
                        updated_at: now,
                    })
                    .get_result::<DbComment>(conn)?
            }
        };

        attached.push(stored.try_into()?);
    }

    Ok(attached)
}

impl AssociationReader for DieselRepository {
    fn load_tags(&self, owner: OwnerRef) -> RepositoryResult<Vec<Tag>> {
        let mut conn = self.conn()?;
        load_tags(&mut conn, owner)
    }

    fn load_comments(&self, owner: OwnerRef) -> RepositoryResult<Vec<Comment>> {
        let mut conn = self.conn()?;
        load_comments(&mut conn, owner)
    }

    fn load_tags_for_owners(
        &self,
        owner_type: OwnerType,
        owner_ids: &[i32],
    ) -> RepositoryResult<HashMap<i32, Vec<Tag>>> {
        let mut conn = self.conn()?;
        load_tags_for_owners(&mut conn, owner_type, owner_ids)
    }

    fn load_comments_for_owners(
        &self,
        owner_type: OwnerType,
        owner_ids: &[i32],
    ) -> RepositoryResult<HashMap<i32, Vec<Comment>>> {
        let mut conn = self.conn()?;
        load_comments_for_owners(&mut conn, owner_type, owner_ids)
    }
}

impl AssociationWriter for DieselRepository {
    fn attach_tags(&self, owner: OwnerRef, tags: &[NewTag]) -> RepositoryResult<Vec<Tag>> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            if !owner_exists(conn, owner)? {
                return Err(RepositoryError::NotFound);
            }
            attach_tags(conn, owner, tags, now)
        })
    }

    fn attach_comments(
        &self,
        owner: OwnerRef,
        comments: &[NewComment],
    ) -> RepositoryResult<Vec<Comment>> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            if !owner_exists(conn, owner)? {
                return Err(RepositoryError::NotFound);
            }
            attach_comments(conn, owner, comments, now)
        })
    }
}

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::association::{AssociationOwner, OwnerRef};
use crate::domain::types::{OwnerType, VideoId};
use crate::domain::video::{NewVideo, Video, VideoUpdate};
use crate::models::video::{NewVideo as DbNewVideo, Video as DbVideo, VideoChangeset};
use crate::repository::association::{
    attach_comments, attach_tags, load_comments, load_comments_for_owners, load_tags,
    load_tags_for_owners, owner_exists,
};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, VideoReader, VideoWriter,
};

/// Eager-load the tags and comments of a single video row.
fn with_associations(conn: &mut SqliteConnection, row: DbVideo) -> RepositoryResult<Video> {
    let owner = OwnerRef::of(&row);
    let tags = load_tags(conn, owner)?;
    let comments = load_comments(conn, owner)?;
    Ok(row.into_domain(tags, comments)?)
}

impl VideoReader for DieselRepository {
    fn list_videos(&self) -> RepositoryResult<Vec<Video>> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        let rows = videos::table
            .order(videos::id.asc())
            .load::<DbVideo>(&mut conn)?;

        let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        let mut tags = load_tags_for_owners(&mut conn, DbVideo::OWNER_TYPE, &ids)?;
        let mut comments = load_comments_for_owners(&mut conn, DbVideo::OWNER_TYPE, &ids)?;

        let videos = rows
            .into_iter()
            .map(|row| {
                let tags = tags.remove(&row.id).unwrap_or_default();
                let comments = comments.remove(&row.id).unwrap_or_default();
                row.into_domain(tags, comments)
            })
            .collect::<Result<Vec<Video>, _>>()?;

        Ok(videos)
    }

    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        let row = videos::table
            .filter(videos::id.eq(id.get()))
            .first::<DbVideo>(&mut conn)
            .optional()?;

        row.map(|row| with_associations(&mut conn, row)).transpose()
    }

    fn video_exists(&self, id: VideoId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        Ok(owner_exists(
            &mut conn,
            OwnerRef::new(OwnerType::Video, id.get()),
        )?)
    }
}

impl VideoWriter for DieselRepository {
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<Video> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(videos::table)
                .values(DbNewVideo::from(video))
                .get_result::<DbVideo>(conn)?;

            let owner = OwnerRef::of(&row);
            let tags = attach_tags(conn, owner, &video.tags, video.created_at)?;
            let comments = attach_comments(conn, owner, &video.comments, video.created_at)?;

            Ok(row.into_domain(tags, comments)?)
        })
    }

    fn update_video(&self, id: VideoId, update: &VideoUpdate) -> RepositoryResult<Video> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::update(videos::table.filter(videos::id.eq(id.get())))
                .set(VideoChangeset::from(update))
                .get_result::<DbVideo>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let owner = OwnerRef::of(&row);
            attach_tags(conn, owner, &update.tags, update.updated_at)?;
            attach_comments(conn, owner, &update.comments, update.updated_at)?;

            with_associations(conn, row)
        })
    }
}

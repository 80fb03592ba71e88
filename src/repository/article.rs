use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::article::{Article, ArticleUpdate, NewArticle};
use crate::domain::association::{AssociationOwner, OwnerRef};
use crate::domain::types::{ArticleId, OwnerType};
use crate::models::article::{Article as DbArticle, ArticleChangeset, NewArticle as DbNewArticle};
use crate::repository::association::{
    attach_comments, attach_tags, load_comments, load_comments_for_owners, load_tags,
    load_tags_for_owners, owner_exists,
};
use crate::repository::{
    ArticleReader, ArticleWriter, DieselRepository, RepositoryError, RepositoryResult,
};

/// Eager-load the tags and comments of a single article row.
fn with_associations(conn: &mut SqliteConnection, row: DbArticle) -> RepositoryResult<Article> {
    let owner = OwnerRef::of(&row);
    let tags = load_tags(conn, owner)?;
    let comments = load_comments(conn, owner)?;
    Ok(row.into_domain(tags, comments)?)
}

impl ArticleReader for DieselRepository {
    fn list_articles(&self) -> RepositoryResult<Vec<Article>> {
        use crate::schema::articles;

        let mut conn = self.conn()?;

        let rows = articles::table
            .order(articles::id.asc())
            .load::<DbArticle>(&mut conn)?;

        let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        let mut tags = load_tags_for_owners(&mut conn, DbArticle::OWNER_TYPE, &ids)?;
        let mut comments = load_comments_for_owners(&mut conn, DbArticle::OWNER_TYPE, &ids)?;

        let articles = rows
            .into_iter()
            .map(|row| {
                let tags = tags.remove(&row.id).unwrap_or_default();
                let comments = comments.remove(&row.id).unwrap_or_default();
                row.into_domain(tags, comments)
            })
            .collect::<Result<Vec<Article>, _>>()?;

        Ok(articles)
    }

    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>> {
        use crate::schema::articles;

        let mut conn = self.conn()?;

        let row = articles::table
            .filter(articles::id.eq(id.get()))
            .first::<DbArticle>(&mut conn)
            .optional()?;

        row.map(|row| with_associations(&mut conn, row)).transpose()
    }

    fn article_exists(&self, id: ArticleId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        Ok(owner_exists(
            &mut conn,
            OwnerRef::new(OwnerType::Article, id.get()),
        )?)
    }
}

impl ArticleWriter for DieselRepository {
    fn create_article(&self, article: &NewArticle) -> RepositoryResult<Article> {
        use crate::schema::articles;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(articles::table)
                .values(DbNewArticle::from(article))
                .get_result::<DbArticle>(conn)?;

            let owner = OwnerRef::of(&row);
            let tags = attach_tags(conn, owner, &article.tags, article.created_at)?;
            let comments = attach_comments(conn, owner, &article.comments, article.created_at)?;

            Ok(row.into_domain(tags, comments)?)
        })
    }

    fn update_article(&self, id: ArticleId, update: &ArticleUpdate) -> RepositoryResult<Article> {
        use crate::schema::articles;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::update(articles::table.filter(articles::id.eq(id.get())))
                .set(ArticleChangeset::from(update))
                .get_result::<DbArticle>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let owner = OwnerRef::of(&row);
            attach_tags(conn, owner, &update.tags, update.updated_at)?;
            attach_comments(conn, owner, &update.comments, update.updated_at)?;

            with_associations(conn, row)
        })
    }
}

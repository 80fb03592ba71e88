use crate::domain::article::Article;
use crate::domain::types::ArticleId;
use crate::forms::articles::{ArticleForm, ArticleFormPayload};
use crate::forms::decode_json;
use crate::repository::{ArticleReader, ArticleWriter};

use super::{ServiceError, ServiceResult, repository_failure};

/// All articles with their tags and comments.
pub fn list_articles<R>(repo: &R) -> ServiceResult<Vec<Article>>
where
    R: ArticleReader,
{
    repo.list_articles()
        .map_err(|e| repository_failure("list articles", e))
}

/// A single article with its tags and comments.
pub fn show_article<R>(article_id: i32, repo: &R) -> ServiceResult<Article>
where
    R: ArticleReader,
{
    let article_id = ArticleId::new(article_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_article_by_id(article_id) {
        Ok(Some(article)) => Ok(article),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(repository_failure("get article", e)),
    }
}

/// Decode `body` and store it as a new article with its embedded tags and
/// comments.
pub fn create_article<R>(body: &[u8], repo: &R) -> ServiceResult<Article>
where
    R: ArticleWriter,
{
    let form: ArticleForm = decode_json(body)?;
    let payload: ArticleFormPayload = form.try_into()?;

    repo.create_article(&payload.into_new_article())
        .map_err(|e| repository_failure("create article", e))
}

/// Overlay the fields present in `body` onto an existing article.
///
/// The article is looked up before the body is decoded, so an unknown id is
/// reported as [`ServiceError::NotFound`] whatever the body contains.
pub fn update_article<R>(article_id: i32, body: &[u8], repo: &R) -> ServiceResult<Article>
where
    R: ArticleReader + ArticleWriter,
{
    let article_id = ArticleId::new(article_id).map_err(|_| ServiceError::NotFound)?;

    match repo.article_exists(article_id) {
        Ok(true) => {}
        Ok(false) => return Err(ServiceError::NotFound),
        Err(e) => return Err(repository_failure("look up article", e)),
    }

    let form: ArticleForm = decode_json(body)?;
    let payload: ArticleFormPayload = form.try_into()?;

    repo.update_article(article_id, &payload.into_article_update())
        .map_err(|e| repository_failure("update article", e))
}

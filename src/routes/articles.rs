use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::domain::article::Article;
use crate::forms::articles::ArticleForm;
use crate::repository::DieselRepository;
use crate::routes::{ErrorResponse, service_error_response};
use crate::services::articles::{
    create_article as create_article_service, list_articles as list_articles_service,
    show_article as show_article_service, update_article as update_article_service,
};

const NOT_FOUND: &str = "Article not found";

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    tag = "articles",
    responses(
        (status = 200, description = "Every article with its tags and comments", body = [Article]),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
#[get("/articles")]
pub async fn list_articles(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_articles_service(repo.get_ref()) {
        Ok(articles) => HttpResponse::Ok().json(articles),
        Err(err) => service_error_response(err, NOT_FOUND, "Error fetching articles"),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{article_id}",
    tag = "articles",
    params(("article_id" = i32, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article with its tags and comments", body = Article),
        (status = 404, description = "No such article", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
#[get("/articles/{article_id}")]
pub async fn show_article(
    article_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_article_service(article_id.into_inner(), repo.get_ref()) {
        Ok(article) => HttpResponse::Ok().json(article),
        Err(err) => service_error_response(err, NOT_FOUND, "Error fetching article"),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    tag = "articles",
    request_body = ArticleForm,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 400, description = "Malformed payload or foreign association row", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
#[post("/articles")]
pub async fn create_article(body: web::Bytes, repo: web::Data<DieselRepository>) -> impl Responder {
    match create_article_service(&body, repo.get_ref()) {
        Ok(article) => HttpResponse::Created().json(article),
        Err(err) => service_error_response(err, NOT_FOUND, "Failed to create article"),
    }
}

/// Fields left out of the body keep their stored values.
#[utoipa::path(
    put,
    path = "/api/v1/articles/{article_id}",
    tag = "articles",
    params(("article_id" = i32, Path, description = "Article id")),
    request_body = ArticleForm,
    responses(
        (status = 200, description = "Article updated", body = Article),
        (status = 400, description = "Malformed payload or foreign association row", body = ErrorResponse),
        (status = 404, description = "No such article", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
#[put("/articles/{article_id}")]
pub async fn update_article(
    article_id: web::Path<i32>,
    body: web::Bytes,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match update_article_service(article_id.into_inner(), &body, repo.get_ref()) {
        Ok(article) => HttpResponse::Ok().json(article),
        Err(err) => service_error_response(err, NOT_FOUND, "Failed to update article"),
    }
}

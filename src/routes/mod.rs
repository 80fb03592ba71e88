use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::services::ServiceError;

pub mod articles;
pub mod openapi;
pub mod videos;

/// Body returned with every error status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        message: message.into(),
    })
}

/// Map a service failure to its HTTP response.
///
/// `not_found` and `internal` are the entity-specific messages for the two
/// variants that carry no text of their own.
pub fn service_error_response(err: ServiceError, not_found: &str, internal: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, not_found),
        ServiceError::Validation(message) => {
            json_error(StatusCode::BAD_REQUEST, format!("Invalid input: {message}"))
        }
        ServiceError::AssociationOwnerMismatch(message) => {
            json_error(StatusCode::BAD_REQUEST, message)
        }
        ServiceError::Internal => json_error(StatusCode::INTERNAL_SERVER_ERROR, internal),
    }
}

/// Cross-origin policy: any origin, the common methods, no credentials.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"])
        .allowed_headers([header::ORIGIN, header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(12 * 60 * 60)
}

/// Register the `/api/v1` routes and the Swagger UI.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Ids that do not parse address nothing.
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, json_error(StatusCode::NOT_FOUND, "Not found")).into()
    }))
    .service(
        web::scope("/api/v1")
            .service(articles::list_articles)
            .service(articles::show_article)
            .service(articles::create_article)
            .service(articles::update_article)
            .service(videos::list_videos)
            .service(videos::show_video)
            .service(videos::create_video)
            .service(videos::update_video),
    )
    .service(
        SwaggerUi::new("/swagger/{_:.*}")
            .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
    );
}

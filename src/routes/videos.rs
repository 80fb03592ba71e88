use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::domain::video::Video;
use crate::forms::videos::VideoForm;
use crate::repository::DieselRepository;
use crate::routes::{ErrorResponse, service_error_response};
use crate::services::videos::{
    create_video as create_video_service, list_videos as list_videos_service,
    show_video as show_video_service, update_video as update_video_service,
};

const NOT_FOUND: &str = "Video not found";

#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Every video with its tags and comments", body = [Video]),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
#[get("/videos")]
pub async fn list_videos(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_videos_service(repo.get_ref()) {
        Ok(videos) => HttpResponse::Ok().json(videos),
        Err(err) => service_error_response(err, NOT_FOUND, "Error fetching videos"),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/videos/{video_id}",
    tag = "videos",
    params(("video_id" = i32, Path, description = "Video id")),
    responses(
        (status = 200, description = "The video with its tags and comments", body = Video),
        (status = 404, description = "No such video", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
#[get("/videos/{video_id}")]
pub async fn show_video(
    video_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_video_service(video_id.into_inner(), repo.get_ref()) {
        Ok(video) => HttpResponse::Ok().json(video),
        Err(err) => service_error_response(err, NOT_FOUND, "Error fetching video"),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/videos",
    tag = "videos",
    request_body = VideoForm,
    responses(
        (status = 201, description = "Video created", body = Video),
        (status = 400, description = "Malformed payload or foreign association row", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
#[post("/videos")]
pub async fn create_video(body: web::Bytes, repo: web::Data<DieselRepository>) -> impl Responder {
    match create_video_service(&body, repo.get_ref()) {
        Ok(video) => HttpResponse::Created().json(video),
        Err(err) => service_error_response(err, NOT_FOUND, "Failed to create video"),
    }
}

/// Fields left out of the body keep their stored values.
#[utoipa::path(
    put,
    path = "/api/v1/videos/{video_id}",
    tag = "videos",
    params(("video_id" = i32, Path, description = "Video id")),
    request_body = VideoForm,
    responses(
        (status = 200, description = "Video updated", body = Video),
        (status = 400, description = "Malformed payload or foreign association row", body = ErrorResponse),
        (status = 404, description = "No such video", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
#[put("/videos/{video_id}")]
pub async fn update_video(
    video_id: web::Path<i32>,
    body: web::Bytes,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match update_video_service(video_id.into_inner(), &body, repo.get_ref()) {
        Ok(video) => HttpResponse::Ok().json(video),
        Err(err) => service_error_response(err, NOT_FOUND, "Failed to update video"),
    }
}

use crate::domain::types::VideoId;
use crate::domain::video::Video;
use crate::forms::decode_json;
use crate::forms::videos::{VideoForm, VideoFormPayload};
use crate::repository::{VideoReader, VideoWriter};

use super::{ServiceError, ServiceResult, repository_failure};

pub fn list_videos<R>(repo: &R) -> ServiceResult<Vec<Video>>
where
    R: VideoReader,
{
    repo.list_videos()
        .map_err(|e| repository_failure("list videos", e))
}

pub fn show_video<R>(video_id: i32, repo: &R) -> ServiceResult<Video>
where
    R: VideoReader,
{
    let video_id = VideoId::new(video_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_video_by_id(video_id) {
        Ok(Some(video)) => Ok(video),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => Err(repository_failure("get video", e)),
    }
}

pub fn create_video<R>(body: &[u8], repo: &R) -> ServiceResult<Video>
where
    R: VideoWriter,
{
    let form: VideoForm = decode_json(body)?;
    let payload: VideoFormPayload = form.try_into()?;

    repo.create_video(&payload.into_new_video())
        .map_err(|e| repository_failure("create video", e))
}

/// Overlay the fields present in `body` onto an existing video.
pub fn update_video<R>(video_id: i32, body: &[u8], repo: &R) -> ServiceResult<Video>
where
    R: VideoReader + VideoWriter,
{
    let video_id = VideoId::new(video_id).map_err(|_| ServiceError::NotFound)?;

    match repo.video_exists(video_id) {
        Ok(true) => {}
        Ok(false) => return Err(ServiceError::NotFound),
        Err(e) => return Err(repository_failure("look up video", e)),
    }

    let form: VideoForm = decode_json(body)?;
    let payload: VideoFormPayload = form.try_into()?;

    repo.update_video(video_id, &payload.into_video_update())
        .map_err(|e| repository_failure("update video", e))
}

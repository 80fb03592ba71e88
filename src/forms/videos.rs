use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::comment::NewComment;
use crate::domain::tag::NewTag;
use crate::domain::video::{NewVideo, VideoUpdate};
use crate::forms::FormError;
use crate::forms::associations::{CommentForm, TagForm, into_new_comments, into_new_tags};

/// Video body accepted by `POST` and `PUT`. See [`crate::forms::articles::ArticleForm`].
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoForm {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<TagForm>>,
    pub comments: Option<Vec<CommentForm>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoFormPayload {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Vec<NewTag>,
    pub comments: Vec<NewComment>,
}

impl TryFrom<VideoForm> for VideoFormPayload {
    type Error = FormError;

    fn try_from(value: VideoForm) -> Result<Self, Self::Error> {
        Ok(Self {
            title: value.title,
            url: value.url,
            tags: into_new_tags(value.tags)?,
            comments: into_new_comments(value.comments)?,
        })
    }
}

impl VideoFormPayload {
    pub fn into_new_video(self) -> NewVideo {
        let now = Utc::now().naive_utc();
        NewVideo {
            title: self.title.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            tags: self.tags,
            comments: self.comments,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_video_update(self) -> VideoUpdate {
        VideoUpdate {
            title: self.title,
            url: self.url,
            tags: self.tags,
            comments: self.comments,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::decode_json;

    #[test]
    fn url_is_kept_verbatim() {
        let form: VideoForm =
            decode_json(br#"{"title":"Talk","url":"https://example.com/v/1"}"#).unwrap();
        let video = VideoFormPayload::try_from(form).unwrap().into_new_video();

        assert_eq!(video.url, "https://example.com/v/1");
        assert_eq!(video.created_at, video.updated_at);
    }

    #[test]
    fn empty_embedded_comment_is_accepted() {
        let form: VideoForm =
            decode_json(br#"{"comments":[{"content":"ok"},{"content":""}]}"#).unwrap();
        let video = VideoFormPayload::try_from(form).unwrap().into_new_video();

        assert_eq!(video.comments[1], NewComment::new(""));
    }

    #[test]
    fn invalid_embedded_comment_fails_the_whole_payload() {
        let form: VideoForm =
            decode_json(br#"{"comments":[{"content":"ok"},{"id":-1}]}"#).unwrap();
        assert!(VideoFormPayload::try_from(form).is_err());
    }
}

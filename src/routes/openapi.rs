//! OpenAPI document for the `/api/v1` surface, served through Swagger UI.

use utoipa::OpenApi;

use crate::domain::article::Article;
use crate::domain::comment::Comment;
use crate::domain::tag::Tag;
use crate::domain::types::OwnerType;
use crate::domain::video::Video;
use crate::forms::articles::ArticleForm;
use crate::forms::associations::{CommentForm, TagForm};
use crate::forms::videos::VideoForm;
use crate::routes::{ErrorResponse, articles, videos};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "polycms",
        description = "Articles and videos sharing polymorphic tags and comments."
    ),
    paths(
        articles::list_articles,
        articles::show_article,
        articles::create_article,
        articles::update_article,
        videos::list_videos,
        videos::show_video,
        videos::create_video,
        videos::update_video,
    ),
    components(schemas(
        Article,
        Video,
        Tag,
        Comment,
        OwnerType,
        ArticleForm,
        VideoForm,
        TagForm,
        CommentForm,
        ErrorResponse,
    )),
    tags(
        (name = "articles", description = "Text articles"),
        (name = "videos", description = "Linked videos")
    )
)]
pub struct ApiDoc;

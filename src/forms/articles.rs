use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::article::{ArticleUpdate, NewArticle};
use crate::domain::comment::NewComment;
use crate::domain::tag::NewTag;
use crate::forms::FormError;
use crate::forms::associations::{CommentForm, TagForm, into_new_comments, into_new_tags};

/// Article body accepted by `POST` and `PUT`.
///
/// Every field is optional: on create a missing text field is stored empty,
/// on update it keeps the stored value. `null` counts as missing.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<TagForm>>,
    pub comments: Option<Vec<CommentForm>>,
}

/// Validated contents of an [`ArticleForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleFormPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Vec<NewTag>,
    pub comments: Vec<NewComment>,
}

impl TryFrom<ArticleForm> for ArticleFormPayload {
    type Error = FormError;

    fn try_from(value: ArticleForm) -> Result<Self, Self::Error> {
        Ok(Self {
            title: value.title,
            content: value.content,
            tags: into_new_tags(value.tags)?,
            comments: into_new_comments(value.comments)?,
        })
    }
}

impl ArticleFormPayload {
    pub fn into_new_article(self) -> NewArticle {
        let now = Utc::now().naive_utc();
        NewArticle {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            tags: self.tags,
            comments: self.comments,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_article_update(self) -> ArticleUpdate {
        ArticleUpdate {
            title: self.title,
            content: self.content,
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

    fn payload(body: &str) -> ArticleFormPayload {
        let form: ArticleForm = decode_json(body.as_bytes()).unwrap();
        form.try_into().unwrap()
    }

    #[test]
    fn new_article_uses_one_timestamp() {
        let article = payload(r#"{"title":"Hello","content":"World"}"#).into_new_article();

        assert_eq!(article.title, "Hello");
        assert_eq!(article.created_at, article.updated_at);
    }

    #[test]
    fn missing_fields_default_to_empty_on_create() {
        let article = payload("{}").into_new_article();

        assert_eq!(article.title, "");
        assert_eq!(article.content, "");
        assert!(article.tags.is_empty());
    }

    #[test]
    fn update_only_carries_present_fields() {
        let update = payload(r#"{"title":"new","content":null}"#).into_article_update();

        assert_eq!(update.title.as_deref(), Some("new"));
        assert_eq!(update.content, None);
    }

    #[test]
    fn empty_string_is_an_explicit_value() {
        let update = payload(r#"{"content":""}"#).into_article_update();
        assert_eq!(update.content.as_deref(), Some(""));
    }

    #[test]
    fn embedded_rows_are_converted() {
        let payload = payload(r#"{"tags":[{"name":"x"}],"comments":[{"content":"nice"}]}"#);

        assert_eq!(payload.tags, vec![NewTag::new("x")]);
        assert_eq!(payload.comments, vec![NewComment::new("nice")]);
    }

    #[test]
    fn non_object_body_fails_to_decode() {
        assert!(decode_json::<ArticleForm>(b"not json").is_err());
        assert!(decode_json::<ArticleForm>(b"[]").is_err());
        assert!(decode_json::<ArticleForm>(b"").is_err());
    }
}

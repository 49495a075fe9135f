pub mod comment;
pub mod post;

pub use comment::Comment;
pub use post::{LikeResponse, Post};

use serde::{Deserialize, Serialize};

pub type PostId = i64;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Account details sent to `/api/auth/register`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewPost<'a> {
    pub content: &'a str,
    pub hashtags: &'a [String],
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewComment<'a> {
    pub content: &'a str,
}

/// Body of `/suggest-hashtags` on the suggestion service.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest<'a> {
    pub content: &'a str,
    pub max_suggestions: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

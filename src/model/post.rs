use serde::{Deserialize, Serialize};

use super::PostId;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub username: String,
    pub full_name: String,
    pub created_at: String,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub liked_by_current_user: bool,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl Post {
    /// Apply the outcome of a like toggle as reported by the server.
    pub fn apply_like(&mut self, liked: bool) {
        self.liked_by_current_user = liked;
        self.like_count += if liked { 1 } else { -1 };
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeResponse {
    pub liked: bool,
}

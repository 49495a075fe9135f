use log::debug;
use serde_json::{json, Value};

use crate::{
    hashtag::normalize,
    model::{LikeResponse, NewPost, Post, PostId},
};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct PostService {
    client: ApiClient,
}

impl PostService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_post(&self, content: &str, hashtags: &[String]) -> Result<Value, ApiError> {
        let post = NewPost { content, hashtags };
        self.client.post("/api/posts", &post).await
    }

    pub async fn get_all_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.client.get("/api/posts").await
    }

    pub async fn toggle_like(&self, post_id: PostId) -> Result<LikeResponse, ApiError> {
        self.client
            .post(&format!("/api/posts/{}/likes", post_id), &json!({}))
            .await
    }

    /// Posts carrying `tag`, which is normalized the same way drafts are.
    pub async fn get_posts_by_hashtag(&self, tag: &str) -> Result<Vec<Post>, ApiError> {
        let tag = normalize(tag);
        debug!("Listing posts tagged #{}", tag);
        let path = format!("/api/hashtags/{}/posts", urlencoding::encode(&tag));
        self.client.get(&path).await
    }
}

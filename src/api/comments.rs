use serde_json::Value;

use crate::model::{Comment, NewComment, PostId};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct CommentService {
    client: ApiClient,
}

impl CommentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/api/posts/{}/comments", post_id), &NewComment { content })
            .await
    }

    pub async fn get_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError> {
        self.client
            .get(&format!("/api/posts/{}/comments", post_id))
            .await
    }
}

use log::debug;

use crate::model::{SuggestionRequest, SuggestionResponse};

use super::{ApiClient, ApiError};

/// Number of tags asked for when the caller has no preference.
pub const MAX_SUGGESTIONS: usize = 5;

/// Client of the hashtag suggestion service, which runs apart from the backend.
#[derive(Debug, Clone)]
pub struct SuggestionService {
    client: ApiClient,
}

impl SuggestionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Hashtags the service proposes for `content`, as it spells them.
    pub async fn suggest_hashtags(
        &self,
        content: &str,
        max_suggestions: usize,
    ) -> Result<Vec<String>, ApiError> {
        let request = SuggestionRequest {
            content,
            max_suggestions,
        };
        let response: SuggestionResponse = self.client.post("/suggest-hashtags", &request).await?;
        debug!("{} hashtags suggested", response.suggestions.len());
        Ok(response.suggestions)
    }
}

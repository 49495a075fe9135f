use std::collections::HashMap;

use log::{debug, error, info};

use crate::{
    api::{suggestions::MAX_SUGGESTIONS, CommentService, PostService, SuggestionService},
    hashtag::{normalize, DraftHashtags},
    model::{Comment, Post, PostId},
    utils,
};

/// Character limit of posts and comments, enforced on input like a `maxlength`.
pub const MAX_LENGTH: usize = 280;

/// Keys the hashtag input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// What the input should do with a key after the view handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The key was consumed; the surrounding form must not submit.
    PreventDefault,
    Default,
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_LENGTH).collect()
}

/// Post composer and feed.
#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    pub posts: Vec<Post>,
    new_post_content: String,
    pub current_hashtag: String,
    hashtags: DraftHashtags,
    suggestions: DraftHashtags,
    posting: bool,
    filter: Option<String>,
    show_comments: HashMap<PostId, bool>,
    comments: HashMap<PostId, Vec<Comment>>,
    new_comment_content: HashMap<PostId, String>,
}

impl TimelineView {
    pub fn new() -> Self {
        Self::default()
    }

    //--------------------------------------------------------------------------
    // Feed
    //--------------------------------------------------------------------------

    pub async fn load_posts(&mut self, posts: &PostService) {
        let result = match &self.filter {
            Some(tag) => posts.get_posts_by_hashtag(tag).await,
            None => posts.get_all_posts().await,
        };
        match result {
            Ok(list) => {
                debug!("Loaded {} posts", list.len());
                self.posts = list;
            }
            Err(e) => error!("Error loading posts: {}", e),
        }
    }

    /// Show only posts tagged `tag` until [`TimelineView::clear_filter`].
    pub async fn filter_by_hashtag(&mut self, tag: &str, posts: &PostService) {
        let tag = normalize(tag);
        if tag.is_empty() {
            return;
        }
        self.filter = Some(tag);
        self.load_posts(posts).await;
    }

    pub async fn clear_filter(&mut self, posts: &PostService) {
        if self.filter.take().is_some() {
            self.load_posts(posts).await;
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn post(&self, post_id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    fn post_mut(&mut self, post_id: PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == post_id)
    }

    //--------------------------------------------------------------------------
    // Composer
    //--------------------------------------------------------------------------

    pub fn post_content(&self) -> &str {
        &self.new_post_content
    }

    pub fn set_post_content(&mut self, content: &str) {
        self.new_post_content = truncate(content);
    }

    pub fn chars_remaining(&self) -> usize {
        MAX_LENGTH.saturating_sub(self.new_post_content.chars().count())
    }

    pub fn is_posting(&self) -> bool {
        self.posting
    }

    pub fn can_post(&self) -> bool {
        !self.new_post_content.trim().is_empty() && !self.posting
    }

    pub fn hashtags(&self) -> &DraftHashtags {
        &self.hashtags
    }

    pub fn can_add_hashtag(&self) -> bool {
        !self.current_hashtag.trim().is_empty()
    }

    /// Move the hashtag input into the draft. The input is kept when the tag is
    /// rejected so it can be corrected.
    pub fn add_hashtag(&mut self) -> bool {
        let Some(tag) = self.hashtags.add(&self.current_hashtag) else {
            return false;
        };
        self.suggestions.remove(tag);
        self.current_hashtag.clear();
        true
    }

    pub fn remove_hashtag(&mut self, tag: &str) {
        self.hashtags.remove(tag);
    }

    pub fn on_hashtag_key(&mut self, key: Key) -> KeyAction {
        match key {
            Key::Enter => {
                self.add_hashtag();
                KeyAction::PreventDefault
            }
            _ => KeyAction::Default,
        }
    }

    pub fn suggestions(&self) -> &DraftHashtags {
        &self.suggestions
    }

    /// Ask for hashtags fitting the draft text. Tags already in the draft are
    /// left out and a blank draft only clears the previous suggestions.
    pub async fn suggest_hashtags(&mut self, suggester: &SuggestionService) {
        let content = self.new_post_content.trim();
        if content.is_empty() {
            self.suggestions.clear();
            return;
        }

        match suggester.suggest_hashtags(content, MAX_SUGGESTIONS).await {
            Ok(list) => {
                let mut suggestions = DraftHashtags::default();
                for raw in &list {
                    if !self.hashtags.contains(&normalize(raw)) {
                        suggestions.add(raw);
                    }
                }
                debug!("{} of {} suggestions are new", suggestions.len(), list.len());
                self.suggestions = suggestions;
            }
            Err(e) => error!("Error suggesting hashtags: {}", e),
        }
    }

    /// Move a suggested tag into the draft.
    pub fn accept_suggestion(&mut self, tag: &str) -> bool {
        let tag = normalize(tag);
        if !self.suggestions.contains(&tag) {
            return false;
        }
        self.suggestions.remove(&tag);
        self.hashtags.add(&tag).is_some()
    }

    /// Publish the draft, then reload the feed. Blank drafts are not sent.
    pub async fn create_post(&mut self, posts: &PostService) -> bool {
        let content = self.new_post_content.trim().to_string();
        if content.is_empty() {
            return false;
        }

        self.posting = true;
        let result = posts.create_post(&content, self.hashtags.as_slice()).await;
        self.posting = false;

        match result {
            Ok(_) => {
                info!("Posted with {} hashtags", self.hashtags.len());
                self.new_post_content.clear();
                self.hashtags.clear();
                self.suggestions.clear();
                self.current_hashtag.clear();
                self.load_posts(posts).await;
                true
            }
            Err(e) => {
                error!("Error creating post: {}", e);
                false
            }
        }
    }

    //--------------------------------------------------------------------------
    // Likes
    //--------------------------------------------------------------------------

    /// Toggle the like and apply whatever the server says the new state is.
    pub async fn toggle_like(&mut self, post_id: PostId, posts: &PostService) {
        match posts.toggle_like(post_id).await {
            Ok(response) => {
                if let Some(post) = self.post_mut(post_id) {
                    post.apply_like(response.liked);
                }
            }
            Err(e) => error!("Error toggling like: {}", e),
        }
    }

    //--------------------------------------------------------------------------
    // Comments
    //--------------------------------------------------------------------------

    pub fn is_comments_open(&self, post_id: PostId) -> bool {
        self.show_comments.get(&post_id).copied().unwrap_or(false)
    }

    pub fn comments(&self, post_id: PostId) -> Option<&[Comment]> {
        self.comments.get(&post_id).map(Vec::as_slice)
    }

    /// Open or close the comment panel, fetching the comments the first time.
    pub async fn toggle_comments(&mut self, post_id: PostId, comments: &CommentService) {
        let open = !self.is_comments_open(post_id);
        self.show_comments.insert(post_id, open);

        if open && !self.comments.contains_key(&post_id) {
            self.load_comments(post_id, comments).await;
        }
    }

    pub async fn load_comments(&mut self, post_id: PostId, comments: &CommentService) {
        match comments.get_comments(post_id).await {
            Ok(list) => {
                self.comments.insert(post_id, list);
            }
            Err(e) => error!("Error loading comments: {}", e),
        }
    }

    pub fn comment_draft(&self, post_id: PostId) -> &str {
        self.new_comment_content
            .get(&post_id)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set_comment_draft(&mut self, post_id: PostId, content: &str) {
        self.new_comment_content.insert(post_id, truncate(content));
    }

    pub fn can_comment(&self, post_id: PostId) -> bool {
        !self.comment_draft(post_id).trim().is_empty()
    }

    pub async fn add_comment(&mut self, post_id: PostId, comments: &CommentService) -> bool {
        let content = self.comment_draft(post_id).trim().to_string();
        if content.is_empty() {
            return false;
        }

        match comments.create_comment(post_id, &content).await {
            Ok(_) => {
                self.new_comment_content.insert(post_id, String::new());
                self.load_comments(post_id, comments).await;
                if let Some(post) = self.post_mut(post_id) {
                    post.comment_count += 1;
                }
                true
            }
            Err(e) => {
                error!("Error creating comment: {}", e);
                false
            }
        }
    }

    pub fn format_date(&self, created_at: &str) -> String {
        utils::format_date(created_at)
    }
}

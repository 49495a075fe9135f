pub mod api;
pub mod config;
pub mod hashtag;
pub mod model;
pub mod render;
pub mod shell;
pub mod utils;
pub mod view;

pub use api::{
    ApiClient, ApiError, AuthService, CommentService, PostService, Session, SuggestionService,
};
pub use config::Config;
pub use view::{AppView, AuthView, TimelineView};

use log::{debug, error};

use crate::api::{ApiClient, AuthService, CommentService, PostService, SuggestionService};

use super::{AuthView, TimelineView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Timeline,
}

/// Root of the client: the services plus whichever screen is showing.
#[derive(Debug)]
pub struct AppView {
    pub auth: AuthService,
    pub posts: PostService,
    pub comments: CommentService,
    pub suggestions: Option<SuggestionService>,
    pub auth_view: AuthView,
    timeline: Option<TimelineView>,
}

impl AppView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            posts: PostService::new(client.clone()),
            comments: CommentService::new(client),
            suggestions: None,
            auth_view: AuthView::new(),
            timeline: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: SuggestionService) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// Resolve an existing server session, then show the matching screen.
    pub async fn init(&mut self) {
        if let Err(e) = self.auth.check_auth_status().await {
            error!("Session check did not finish: {}", e);
        }
        self.sync().await;
    }

    pub fn screen(&self) -> Screen {
        if self.auth.is_logged_in() {
            Screen::Timeline
        } else {
            Screen::Auth
        }
    }

    pub fn greeting(&self) -> Option<String> {
        self.auth
            .current_user()
            .map(|user| format!("Welcome, {}!", user))
    }

    /// Bring the mounted screen in line with the session.
    pub async fn sync(&mut self) {
        match (self.screen(), self.timeline.is_some()) {
            (Screen::Timeline, false) => {
                debug!("Showing timeline");
                let mut timeline = TimelineView::new();
                timeline.load_posts(&self.posts).await;
                self.timeline = Some(timeline);
            }
            (Screen::Auth, true) => {
                debug!("Showing login");
                self.timeline = None;
                self.auth_view = AuthView::new();
            }
            _ => {}
        }
    }

    /// Submit the auth form and switch screens if that logged us in.
    ///
    /// The form only exists while logged out, so this refuses to run on the
    /// timeline. After a registration it waits for the login that follows.
    pub async fn submit_auth(&mut self) -> bool {
        if self.screen() == Screen::Timeline {
            debug!("Ignoring auth form while logged in");
            return false;
        }

        let ok = self.auth_view.submit(&self.auth).await && self.auth_view.finish_login().await;
        self.sync().await;
        ok
    }

    /// Log out. A failed request is logged and the current screen stays.
    pub async fn logout(&mut self) {
        if let Err(e) = self.auth.logout().await {
            error!("Logout error: {}", e);
        }
        self.sync().await;
    }

    /// Refresh the hashtag suggestions for the draft. Returns `false` when no
    /// suggestion service is configured or nobody is logged in.
    pub async fn suggest_hashtags(&mut self) -> bool {
        let (Some(timeline), Some(suggester)) = (self.timeline.as_mut(), self.suggestions.as_ref())
        else {
            return false;
        };
        timeline.suggest_hashtags(suggester).await;
        true
    }

    pub fn timeline(&self) -> Option<&TimelineView> {
        self.timeline.as_ref()
    }

    /// The timeline together with the services its actions need.
    pub fn timeline_mut(&mut self) -> Option<(&mut TimelineView, &PostService, &CommentService)> {
        let timeline = self.timeline.as_mut()?;
        Some((timeline, &self.posts, &self.comments))
    }
}

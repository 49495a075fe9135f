//! In-process stand-in for the Mini Twitter backend.

#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use mini_twitter::{
    model::{Comment, Post},
    ApiClient, AppView, Config, SuggestionService,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
struct User {
    password: String,
    full_name: String,
}

#[derive(Debug, Default)]
struct Backend {
    users: HashMap<String, User>,
    sessions: HashMap<String, String>,
    posts: Vec<Post>,
    likes: HashSet<(i64, String)>,
    comments: HashMap<i64, Vec<Comment>>,
    hits: HashMap<String, usize>,
    next_id: i64,
    next_token: u64,
    fail_logout: bool,
    fail_login: bool,
}

impl Backend {
    fn hit(&mut self, route: String) {
        *self.hits.entry(route).or_default() += 1;
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, headers: &HeaderMap) -> Option<String> {
        let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().strip_prefix("JSESSIONID="))
            .find_map(|token| self.sessions.get(token).cloned())
    }

    fn view(&self, post: &Post, user: Option<&str>) -> Post {
        let mut post = post.clone();
        post.liked_by_current_user =
            user.is_some_and(|user| self.likes.contains(&(post.id, user.to_string())));
        post
    }

    fn new_post(&mut self, username: &str, content: &str, hashtags: Vec<String>) -> Post {
        let full_name = self
            .users
            .get(username)
            .map(|u| u.full_name.clone())
            .unwrap_or_default();
        let post = Post {
            id: self.next_id(),
            content: content.to_string(),
            username: username.to_string(),
            full_name,
            created_at: now(),
            like_count: 0,
            comment_count: 0,
            liked_by_current_user: false,
            hashtags,
        };
        self.posts.insert(0, post.clone());
        post
    }

    fn new_comment(&mut self, post_id: i64, username: &str, content: &str) -> Option<Comment> {
        let full_name = self
            .users
            .get(username)
            .map(|u| u.full_name.clone())
            .unwrap_or_default();
        let id = self.next_id();
        let post = self.posts.iter_mut().find(|p| p.id == post_id)?;
        post.comment_count += 1;
        let comment = Comment {
            id,
            content: content.to_string(),
            username: username.to_string(),
            full_name,
            created_at: now(),
        };
        self.comments.entry(post_id).or_default().push(comment.clone());
        Some(comment)
    }
}

type Shared = Arc<Mutex<Backend>>;

fn now() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.3f")
        .to_string()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit("POST /api/auth/login".into());
    if backend.fail_login {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Login service unavailable");
    }
    let (username, password) = (field(&body, "username"), field(&body, "password"));
    let valid = backend
        .users
        .get(username)
        .is_some_and(|user| user.password == password);
    if !valid {
        return error(StatusCode::BAD_REQUEST, "Invalid username or password");
    }

    backend.next_token += 1;
    let token = format!("token-{}", backend.next_token);
    backend.sessions.insert(token.clone(), username.to_string());
    (
        [(header::SET_COOKIE, format!("JSESSIONID={}; Path=/; HttpOnly", token))],
        Json(json!({ "message": "Login successful", "user": username })),
    )
        .into_response()
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit("POST /api/auth/register".into());
    let username = field(&body, "username").to_string();
    if backend.users.contains_key(&username) {
        return error(StatusCode::BAD_REQUEST, "Username already exists");
    }
    backend.users.insert(
        username.clone(),
        User {
            password: field(&body, "password").to_string(),
            full_name: field(&body, "fullName").to_string(),
        },
    );
    Json(json!({ "message": "Registration successful", "user": username })).into_response()
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit("POST /api/auth/logout".into());
    if backend.fail_logout {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Logout failed");
    }
    if let Some(user) = backend.user(&headers) {
        backend.sessions.retain(|_, u| *u != user);
    }
    Json(json!({ "message": "Logout successful" })).into_response()
}

async fn current(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit("GET /api/auth/current".into());
    match backend.user(&headers) {
        Some(user) => Json(json!({ "user": user })).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

async fn list_posts(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit("GET /api/posts".into());
    let user = backend.user(&headers);
    let posts: Vec<Post> = backend
        .posts
        .iter()
        .map(|p| backend.view(p, user.as_deref()))
        .collect();
    Json(posts).into_response()
}

async fn create_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit("POST /api/posts".into());
    let Some(user) = backend.user(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let hashtags = body
        .get("hashtags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let post = backend.new_post(&user, field(&body, "content"), hashtags);
    Json(json!({ "id": post.id, "content": post.content, "likeCount": 0 })).into_response()
}

async fn toggle_like(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit(format!("POST /api/posts/{}/likes", id));
    let Some(user) = backend.user(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let key = (id, user);
    let liked = if backend.likes.remove(&key) {
        false
    } else {
        backend.likes.insert(key);
        true
    };
    let Some(post) = backend.posts.iter_mut().find(|p| p.id == id) else {
        return error(StatusCode::BAD_REQUEST, "Post not found");
    };
    post.like_count += if liked { 1 } else { -1 };
    Json(json!({ "liked": liked })).into_response()
}

async fn list_comments(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit(format!("GET /api/posts/{}/comments", id));
    let comments = backend.comments.get(&id).cloned().unwrap_or_default();
    Json(comments).into_response()
}

async fn create_comment(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit(format!("POST /api/posts/{}/comments", id));
    let Some(user) = backend.user(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    match backend.new_comment(id, &user, field(&body, "content")) {
        Some(comment) => Json(json!({ "id": comment.id, "content": comment.content })).into_response(),
        None => error(StatusCode::BAD_REQUEST, "Post not found"),
    }
}

async fn tagged_posts(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(tag): Path<String>,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit(format!("GET /api/hashtags/{}/posts", tag));
    let user = backend.user(&headers);
    let posts: Vec<Post> = backend
        .posts
        .iter()
        .filter(|p| p.hashtags.contains(&tag))
        .map(|p| backend.view(p, user.as_deref()))
        .collect();
    Json(posts).into_response()
}

/// Suggests every word longer than three characters, spelled as written.
async fn suggest_hashtags(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = state.lock().unwrap();
    backend.hit("POST /suggest-hashtags".into());
    let Some(content) = body.get("content").and_then(Value::as_str) else {
        return error(StatusCode::BAD_REQUEST, "No content provided");
    };
    let max = body
        .get("max_suggestions")
        .and_then(Value::as_u64)
        .unwrap_or(5) as usize;
    let suggestions: Vec<&str> = content
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .take(max)
        .collect();
    Json(json!({ "suggestions": suggestions, "content": content })).into_response()
}

pub struct FakeBackend {
    pub url: String,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/auth/logout", post(logout))
            .route("/api/auth/current", get(current))
            .route("/api/posts", get(list_posts).post(create_post))
            .route("/api/posts/:id/likes", post(toggle_like))
            .route("/api/posts/:id/comments", get(list_comments).post(create_comment))
            .route("/api/hashtags/:tag/posts", get(tagged_posts))
            .route("/suggest-hashtags", post(suggest_hashtags))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { url, state }
    }

    pub fn config(&self) -> Config {
        Config::with_base_url(&self.url).with_suggest_url(&self.url)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).unwrap()
    }

    pub fn suggester(&self) -> SuggestionService {
        let config = self.config();
        SuggestionService::new(ApiClient::connect(&config, config.suggest_url()).unwrap())
    }

    pub fn app(&self) -> AppView {
        AppView::new(self.client()).with_suggestions(self.suggester())
    }

    pub fn add_user(&self, username: &str, password: &str, full_name: &str) {
        self.state.lock().unwrap().users.insert(
            username.to_string(),
            User {
                password: password.to_string(),
                full_name: full_name.to_string(),
            },
        );
    }

    pub fn add_post(&self, username: &str, content: &str, hashtags: &[&str]) -> i64 {
        let hashtags = hashtags.iter().map(|t| t.to_string()).collect();
        self.state
            .lock()
            .unwrap()
            .new_post(username, content, hashtags)
            .id
    }

    pub fn add_comment(&self, post_id: i64, username: &str, content: &str) {
        self.state
            .lock()
            .unwrap()
            .new_comment(post_id, username, content)
            .unwrap();
    }

    pub fn post(&self, post_id: i64) -> Option<Post> {
        let backend = self.state.lock().unwrap();
        backend.posts.iter().find(|p| p.id == post_id).cloned()
    }

    pub fn hits(&self, route: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .hits
            .get(route)
            .copied()
            .unwrap_or_default()
    }

    pub fn fail_logout(&self, fail: bool) {
        self.state.lock().unwrap().fail_logout = fail;
    }

    pub fn fail_login(&self, fail: bool) {
        self.state.lock().unwrap().fail_login = fail;
    }
}

/// A backend with `alice` (password `wonderland`) and two posts by her.
pub async fn seeded() -> FakeBackend {
    let backend = FakeBackend::start().await;
    backend.add_user("alice", "wonderland", "Alice Liddell");
    backend.add_user("bob", "builder", "Bob");
    backend.add_post("alice", "First post", &["hello"]);
    backend.add_post("bob", "Second post", &["rust", "hello"]);
    backend
}

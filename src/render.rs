//! Plain text templates for the views.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::{
    model::{Comment, Post},
    utils::format_relative,
    view::{AppView, AuthMode, AuthView, Screen, TimelineView},
};

pub fn app(view: &AppView, now: DateTime<Local>) -> String {
    let mut out = String::new();
    match view.screen() {
        Screen::Auth => out.push_str(&auth(&view.auth_view)),
        Screen::Timeline => {
            if let Some(greeting) = view.greeting() {
                let _ = writeln!(out, "Mini Twitter | {}", greeting);
                out.push('\n');
            }
            if let Some(timeline) = view.timeline() {
                out.push_str(&self::timeline(timeline, now));
            }
        }
    }
    out
}

pub fn auth(view: &AuthView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.title());
    if view.mode == AuthMode::Register {
        let _ = writeln!(out, "Full Name: {}", view.form.full_name);
        let _ = writeln!(out, "Email:     {}", view.form.email);
    }
    let _ = writeln!(out, "Username:  {}", view.form.username);
    let _ = writeln!(out, "Password:  {}", "*".repeat(view.form.password.chars().count()));
    let _ = writeln!(out, "[{}]  ({})", view.submit_label(), view.toggle_label());
    if let Some(error) = view.error() {
        let _ = writeln!(out, "! {}", error);
    }
    out
}

pub fn timeline(view: &TimelineView, now: DateTime<Local>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "What's happening?");
    if !view.post_content().is_empty() {
        let _ = writeln!(out, "> {}", view.post_content());
    }
    if !view.hashtags().is_empty() {
        let tags: Vec<String> = view.hashtags().iter().map(|t| format!("#{}", t)).collect();
        let _ = writeln!(out, "  {}", tags.join(" "));
    }
    if !view.suggestions().is_empty() {
        let tags: Vec<String> = view.suggestions().iter().map(|t| format!("#{}", t)).collect();
        let _ = writeln!(out, "  suggested: {}", tags.join(" "));
    }
    let _ = writeln!(
        out,
        "  {} left{}",
        view.chars_remaining(),
        if view.is_posting() { " | Posting..." } else { "" }
    );
    out.push('\n');

    if let Some(tag) = view.filter() {
        let _ = writeln!(out, "Posts tagged #{}", tag);
        out.push('\n');
    }
    if view.posts.is_empty() {
        let _ = writeln!(out, "No posts yet.");
    }
    for post in &view.posts {
        out.push_str(&self::post(post, now));
        if view.is_comments_open(post.id) {
            match view.comments(post.id) {
                Some(comments) if !comments.is_empty() => {
                    for comment in comments {
                        out.push_str(&self::comment(comment, now));
                    }
                }
                Some(_) => {
                    let _ = writeln!(out, "    No comments yet.");
                }
                None => {
                    let _ = writeln!(out, "    Loading comments...");
                }
            }
        }
        out.push('\n');
    }
    out
}

pub fn post(post: &Post, now: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {} @{} · {}",
        post.id,
        post.full_name,
        post.username,
        format_relative(&post.created_at, now)
    );
    let _ = writeln!(out, "  {}", post.content);
    if !post.hashtags.is_empty() {
        let tags: Vec<String> = post.hashtags.iter().map(|t| format!("#{}", t)).collect();
        let _ = writeln!(out, "  {}", tags.join(" "));
    }
    let _ = writeln!(
        out,
        "  {} {}  💬 {}",
        if post.liked_by_current_user { "❤️" } else { "🤍" },
        post.like_count,
        post.comment_count
    );
    out
}

pub fn comment(comment: &Comment, now: DateTime<Local>) -> String {
    format!(
        "    {} @{} · {}\n      {}\n",
        comment.full_name,
        comment.username,
        format_relative(&comment.created_at, now),
        comment.content
    )
}

use std::error::Error;

use chrono::Local;
use futures::future::join_all;
use log::{info, warn};
use mini_twitter::{
    config::Command, hashtag::DraftHashtags, render, shell, unit_short, ApiClient, AppView, Config,
    SuggestionService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.init_logger();

    let client = ApiClient::new(&config)?;
    let suggester = SuggestionService::new(ApiClient::connect(&config, config.suggest_url())?);
    let mut app = AppView::new(client.clone()).with_suggestions(suggester.clone());
    let command = config.command();

    if command != Command::Shell {
        if let Some((username, password)) = config.credentials() {
            unit_short!("login", app.auth.login(username, password).await?);
        } else if command.needs_login() {
            app.auth.check_auth_status().await?;
            if !app.auth.is_logged_in() {
                return Err("not logged in, pass --session or --username and --password".into());
            }
        }
    }

    let now = Local::now();
    match command {
        Command::Shell => {
            info!("# Mini Twitter # {}", config.base_url());
            shell::run(&mut app).await?;
        }
        Command::Feed { comments } => {
            let posts = unit_short!("feed", app.posts.get_all_posts().await?);
            let threads = if comments {
                let requests = posts.iter().map(|post| app.comments.get_comments(post.id));
                unit_short!("comments", join_all(requests).await)
            } else {
                vec![]
            };

            if posts.is_empty() {
                println!("No posts yet.");
            }
            for (index, post) in posts.iter().enumerate() {
                print!("{}", render::post(post, now));
                match threads.get(index) {
                    Some(Ok(list)) => list
                        .iter()
                        .for_each(|comment| print!("{}", render::comment(comment, now))),
                    Some(Err(e)) => warn!("Comments of post {} failed: {}", post.id, e),
                    None => {}
                }
                println!();
            }
        }
        Command::Tagged { tag } => {
            let posts = unit_short!("tagged", app.posts.get_posts_by_hashtag(&tag).await?);
            info!("{} posts tagged #{}", posts.len(), tag);
            for post in &posts {
                println!("{}", render::post(post, now));
            }
        }
        Command::Post { content, tags } => {
            let content = content.trim();
            if content.is_empty() {
                return Err("refusing to publish an empty post".into());
            }
            let mut draft = DraftHashtags::default();
            for tag in &tags {
                if draft.add(tag).is_none() {
                    warn!("Skipping hashtag `{}`", tag);
                }
            }
            unit_short!("post", app.posts.create_post(content, draft.as_slice()).await?);
            info!("Posted as {}", app.auth.current_user().unwrap_or_default());
        }
        Command::Like { post_id } => {
            let response = app.posts.toggle_like(post_id).await?;
            if response.liked {
                println!("Liked post {}", post_id);
            } else {
                println!("Unliked post {}", post_id);
            }
        }
        Command::Comments { post_id } => {
            let comments = app.comments.get_comments(post_id).await?;
            if comments.is_empty() {
                println!("No comments yet.");
            }
            for comment in &comments {
                print!("{}", render::comment(comment, now));
            }
        }
        Command::Comment { post_id, content } => {
            let content = content.trim();
            if content.is_empty() {
                return Err("refusing to publish an empty comment".into());
            }
            app.comments.create_comment(post_id, content).await?;
            println!("Commented on post {}", post_id);
        }
        Command::Whoami => {
            println!("{}", app.auth.current_user().unwrap_or_default());
            if let Some(cookies) = client.cookies() {
                info!("Reuse this session with --session '{}'", cookies);
            }
        }
        Command::Suggest { content, max } => {
            let suggestions = unit_short!("suggest", suggester.suggest_hashtags(&content, max).await?);
            let mut tags = DraftHashtags::default();
            for raw in &suggestions {
                tags.add(raw);
            }
            if tags.is_empty() {
                println!("No suggestions.");
            }
            for tag in tags.iter() {
                println!("#{}", tag);
            }
        }
    }

    Ok(())
}

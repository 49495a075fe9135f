use std::io::Write;

use chrono::Local;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    model::{PostId, RegisterProfile},
    render,
    view::{AppView, AuthMode, Key, Screen},
};

const HELP: &str = "\
login <username> <password>
register <username> <password> <email> <full name>
feed                     reload the feed
draft <text>             write the next post without publishing it
post [text]              publish, with the tags added so far
tag <tag> | untag <tag>  edit the tags of the next post
suggest                  suggest tags for the text set with `draft`
accept <tag>             add a suggested tag
like <id>                like or unlike a post
comments <id>            open or close the comments of a post
comment <id> <text>      comment on a post
tagged <tag> | all       filter the feed by hashtag
logout | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login { username: String, password: String },
    Register(RegisterProfile),
    Feed,
    Draft(String),
    Post(Option<String>),
    Tag(String),
    Suggest,
    Accept(String),
    Untag(String),
    Like(PostId),
    Comments(PostId),
    Comment(PostId, String),
    Tagged(String),
    All,
    Logout,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        fn id(value: &str) -> Result<PostId, String> {
            value
                .parse()
                .map_err(|_| format!("`{}` is not a post id", value))
        }
        fn text(value: &str, usage: &str) -> Result<String, String> {
            if value.is_empty() {
                Err(format!("usage: {}", usage))
            } else {
                Ok(value.to_string())
            }
        }

        let command = match name {
            "login" => match rest.split_whitespace().collect::<Vec<_>>()[..] {
                [username, password] => Self::Login {
                    username: username.into(),
                    password: password.into(),
                },
                _ => return Err("usage: login <username> <password>".into()),
            },
            "register" => {
                let mut parts = rest.splitn(4, char::is_whitespace);
                match (parts.next(), parts.next(), parts.next(), parts.next()) {
                    (Some(username), Some(password), Some(email), Some(full_name))
                        if !username.is_empty() && !full_name.trim().is_empty() =>
                    {
                        Self::Register(RegisterProfile {
                            username: username.into(),
                            password: password.into(),
                            email: email.into(),
                            full_name: full_name.trim().into(),
                        })
                    }
                    _ => {
                        return Err(
                            "usage: register <username> <password> <email> <full name>".into()
                        )
                    }
                }
            }
            "feed" | "refresh" => Self::Feed,
            "draft" => Self::Draft(text(rest, "draft <text>")?),
            "post" => Self::Post(Some(rest.to_string()).filter(|text| !text.is_empty())),
            "tag" => Self::Tag(text(rest, "tag <tag>")?),
            "untag" => Self::Untag(text(rest, "untag <tag>")?),
            "suggest" => Self::Suggest,
            "accept" => Self::Accept(text(rest, "accept <tag>")?),
            "like" => Self::Like(id(rest)?),
            "comments" => Self::Comments(id(rest)?),
            "comment" => {
                let (post, content) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Self::Comment(id(post)?, text(content.trim(), "comment <id> <text>")?)
            }
            "tagged" => Self::Tagged(text(rest, "tagged <tag>")?),
            "all" => Self::All,
            "logout" => Self::Logout,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{}`, try `help`", other)),
        };
        Ok(command)
    }

    fn is_auth(&self) -> bool {
        matches!(self, Self::Login { .. } | Self::Register(_))
    }

    fn needs_timeline(&self) -> bool {
        !self.is_auth() && !matches!(self, Self::Help | Self::Quit)
    }
}

/// Apply one command to the app. Returns `false` once the user asked to quit.
pub async fn execute(app: &mut AppView, command: ShellCommand) -> Result<bool, String> {
    if command.needs_timeline() && app.screen() != Screen::Timeline {
        return Err("log in first".into());
    }
    if command.is_auth() && app.screen() == Screen::Timeline {
        return Err("log out first".into());
    }

    match command {
        ShellCommand::Login { username, password } => {
            if app.auth_view.mode != AuthMode::Login {
                app.auth_view.toggle_mode();
            }
            app.auth_view.form.username = username;
            app.auth_view.form.password = password;
            app.submit_auth().await;
        }
        ShellCommand::Register(profile) => {
            if app.auth_view.mode != AuthMode::Register {
                app.auth_view.toggle_mode();
            }
            app.auth_view.form = profile;
            app.submit_auth().await;
        }
        ShellCommand::Logout => app.logout().await,
        ShellCommand::Suggest => {
            if !app.suggest_hashtags().await {
                return Err("no hashtag suggestion service configured".into());
            }
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return Ok(false),
        command => {
            let Some((timeline, posts, comments)) = app.timeline_mut() else {
                return Err("log in first".into());
            };
            match command {
                ShellCommand::Feed => timeline.load_posts(posts).await,
                ShellCommand::Draft(content) => timeline.set_post_content(&content),
                ShellCommand::Post(content) => {
                    if let Some(content) = content {
                        timeline.set_post_content(&content);
                    }
                    if !timeline.create_post(posts).await {
                        return Err("the post was not published".into());
                    }
                }
                ShellCommand::Tag(tag) => {
                    timeline.current_hashtag = tag;
                    timeline.on_hashtag_key(Key::Enter);
                }
                ShellCommand::Untag(tag) => timeline.remove_hashtag(&tag),
                ShellCommand::Accept(tag) => {
                    if !timeline.accept_suggestion(&tag) {
                        return Err(format!("`{}` was not suggested", tag));
                    }
                }
                ShellCommand::Like(id) => timeline.toggle_like(id, posts).await,
                ShellCommand::Comments(id) => timeline.toggle_comments(id, comments).await,
                ShellCommand::Comment(id, content) => {
                    timeline.set_comment_draft(id, &content);
                    if !timeline.is_comments_open(id) {
                        timeline.toggle_comments(id, comments).await;
                    }
                    if !timeline.add_comment(id, comments).await {
                        return Err("the comment was not published".into());
                    }
                }
                ShellCommand::Tagged(tag) => timeline.filter_by_hashtag(&tag, posts).await,
                ShellCommand::All => timeline.clear_filter(posts).await,
                _ => {}
            }
        }
    }
    Ok(true)
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run(app: &mut AppView) -> std::io::Result<()> {
    app.init().await;
    print!("{}", render::app(app, Local::now()));
    info!("Type `help` for the list of commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        let redraw = !matches!(command, ShellCommand::Help);
        match execute(app, command).await {
            Ok(false) => break,
            Ok(true) if redraw => print!("{}", render::app(app, Local::now())),
            Ok(true) => {}
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}

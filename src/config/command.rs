use std::fmt;

use clap::Subcommand;

#[derive(Debug, Clone, Subcommand, PartialEq, Eq, Default)]
pub enum Command {
    /// Interactive session (default)
    #[default]
    Shell,
    /// Print the feed
    Feed {
        /// Also fetch the comments of every post
        #[arg(short, long)]
        comments: bool,
    },
    /// Print the posts carrying a hashtag
    Tagged { tag: String },
    /// Publish a post
    Post {
        content: String,
        /// Hashtag to attach, may be repeated
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
    },
    /// Like or unlike a post
    Like { post_id: i64 },
    /// Print the comments of a post
    Comments { post_id: i64 },
    /// Comment on a post
    Comment { post_id: i64, content: String },
    /// Print the logged in user
    Whoami,
    /// Ask the suggestion service for hashtags fitting a text
    Suggest {
        content: String,
        /// Most suggestions to ask for
        #[arg(short, long, default_value = "5")]
        max: usize,
    },
}

impl Command {
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            Self::Post { .. } | Self::Like { .. } | Self::Comment { .. } | Self::Whoami
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Shell => write!(f, "shell"),
            Self::Feed { .. } => write!(f, "feed"),
            Self::Tagged { .. } => write!(f, "tagged"),
            Self::Post { .. } => write!(f, "post"),
            Self::Like { .. } => write!(f, "like"),
            Self::Comments { .. } => write!(f, "comments"),
            Self::Comment { .. } => write!(f, "comment"),
            Self::Whoami => write!(f, "whoami"),
            Self::Suggest { .. } => write!(f, "suggest"),
        }
    }
}

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the admin API, e.g. http://localhost:3000/api
    #[arg(short, long, env = "ADMIN_API_URL")]
    pub server: Option<String>,

    #[arg(long)]
    pub token_file: Option<PathBuf>,

    /// More detailed logs on stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    Logout,

    Status,

    /// Headline numbers and the recent activity feed
    Dashboard {
        #[arg(long, default_value_t = 5)]
        activities: usize,

        /// Print the numbers as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    #[command(subcommand)]
    Blogs(BlogCommands),

    #[command(subcommand)]
    Podcasts(PodcastCommands),

    #[command(subcommand)]
    Users(UserCommands),

    #[command(subcommand)]
    Reports(ReportCommands),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub sort_by: Option<String>,
}

// ==================== Блог ====================

#[derive(Subcommand)]
pub enum BlogCommands {
    List(ListArgs),

    Get {
        #[arg(short, long)]
        id: String,
    },

    Create(BlogArgs),

    Update {
        #[arg(short, long)]
        id: String,

        #[command(flatten)]
        fields: BlogArgs,
    },

    Delete {
        #[arg(short, long)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    #[command(subcommand)]
    Comment(CommentCommands),
}

#[derive(Args, Debug, Clone, Default)]
pub struct BlogArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub content: Option<String>,

    #[arg(long)]
    pub excerpt: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Comma-separated, at most 10
    #[arg(long)]
    pub tags: Option<String>,

    /// draft, published or scheduled
    #[arg(long)]
    pub status: Option<String>,

    /// RFC 3339 timestamp, required when the status is scheduled
    #[arg(long)]
    pub scheduled_at: Option<DateTime<Utc>>,

    #[arg(long)]
    pub featured: Option<bool>,

    /// JPEG, PNG or WebP, up to 5MB
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum CommentCommands {
    Add {
        #[arg(short, long)]
        blog: String,

        #[arg(short, long)]
        text: String,
    },

    Delete {
        #[arg(short, long)]
        blog: String,

        #[arg(short, long)]
        comment: String,

        #[arg(short, long)]
        yes: bool,
    },
}

// ==================== Подкасты ====================

#[derive(Subcommand)]
pub enum PodcastCommands {
    List(ListArgs),

    Create(PodcastArgs),

    Update {
        #[arg(short, long)]
        id: String,

        #[command(flatten)]
        fields: PodcastArgs,
    },

    Delete {
        #[arg(short, long)]
        id: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PodcastArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub excerpt: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub scheduled_at: Option<DateTime<Utc>>,

    #[arg(long)]
    pub featured: Option<bool>,

    /// User id or email of the author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Free-form, e.g. "45:10"
    #[arg(long)]
    pub duration: Option<String>,

    #[arg(long)]
    pub image: Option<PathBuf>,

    /// MP3 file
    #[arg(long)]
    pub audio: Option<PathBuf>,
}

// ==================== Пользователи ====================

#[derive(Subcommand)]
pub enum UserCommands {
    List(ListArgs),

    Create(UserArgs),

    Update {
        #[arg(short, long)]
        id: String,

        #[command(flatten)]
        fields: UserArgs,
    },

    Delete {
        #[arg(short, long)]
        id: String,

        #[arg(short, long)]
        yes: bool,
    },

    /// Write the registrations as CSV
    Export {
        #[command(flatten)]
        filter: ListArgs,

        /// Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct UserArgs {
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub email: Option<String>,

    #[arg(short, long)]
    pub phone: Option<String>,

    #[arg(short, long)]
    pub location: Option<String>,

    /// Basic, Standard, Premium or Enterprise
    #[arg(long)]
    pub package: Option<String>,

    /// pending, active or inactive
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub total_spent: Option<f64>,
}

// ==================== Обращения ====================

#[derive(Subcommand)]
pub enum ReportCommands {
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Mark a report as read
    Read {
        #[arg(short, long)]
        id: String,
    },

    Export {
        #[arg(long)]
        search: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

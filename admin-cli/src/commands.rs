use crate::cli::*;
use crate::output::{self, OrToast};
use crate::token::TokenManager;
use admin_client::dashboard::{time_ago, PodcastStats, RegistrationStats, ReportStats};
use admin_client::export::{registrations_csv, reports_csv};
use admin_client::forms::{guess_mime, BlogForm, PodcastForm, RegistrationForm, TagList, Upload};
use admin_client::list::{ListQuery, Paginator, REPORTS_PER_PAGE};
use admin_client::models::{Package, PostStatus, UserStatus};
use admin_client::session::TokenStore;
use admin_client::AdminClient;
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

pub async fn run(client: &AdminClient, tokens: &TokenManager, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => login(client, tokens, &email, &password).await,
        Commands::Logout => logout(client, tokens),
        Commands::Status => status(client, tokens),
        Commands::Dashboard { activities, json } => dashboard(client, activities, json).await,
        Commands::Blogs(command) => blogs(client, command).await,
        Commands::Podcasts(command) => podcasts(client, command).await,
        Commands::Users(command) => users(client, command).await,
        Commands::Reports(command) => reports(client, command).await,
    }
}

// ==================== Авторизация ====================

async fn login(
    client: &AdminClient,
    tokens: &TokenManager,
    email: &str,
    password: &str,
) -> Result<()> {
    output::info(format!("Logging in as: {}", email));

    client
        .login(email, password)
        .await
        .map_err(|e| anyhow!(e.login_message()))?;

    output::success("Login successful!");
    output::field("Token file", tokens.path().display());
    Ok(())
}

fn logout(client: &AdminClient, tokens: &TokenManager) -> Result<()> {
    if !client.is_authenticated() {
        output::info("Not logged in");
        return Ok(());
    }
    tokens.clear();
    output::success("Logged out");
    Ok(())
}

fn status(client: &AdminClient, tokens: &TokenManager) -> Result<()> {
    output::field("Server", client.base_url());
    output::field("Token file", tokens.path().display());

    match tokens.load() {
        Some(token) => {
            let preview: String = token.chars().take(12).collect();
            output::field("Token", format!("{}...", preview));
            output::success("Logged in");
        }
        None => {
            output::info("Not logged in");
            output::info("Please login first: admin-cli login --email <email> --password <password>");
        }
    }
    Ok(())
}

// ==================== Дашборд ====================

async fn dashboard(client: &AdminClient, activities: usize, json: bool) -> Result<()> {
    let stats = client
        .dashboard_stats()
        .await
        .or_toast("Failed to load dashboard")?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&stats).context("Failed to serialize dashboard stats")?;
        println!("{}", rendered);
        return Ok(());
    }

    output::heading("Dashboard");
    output::field("Users", format!("{} ({} active)", stats.total_users, stats.active_users));
    output::field(
        "Posts",
        format!(
            "{} ({} published, {} draft, {} scheduled)",
            stats.total_posts, stats.published_posts, stats.draft_posts, stats.scheduled_posts
        ),
    );
    output::field("Views", stats.total_views);

    if activities == 0 {
        return Ok(());
    }

    // feed errors don't hide the stats
    match client.list_activities().await {
        Ok(feed) => {
            println!();
            output::heading("Recent activity");
            if feed.is_empty() {
                println!("   No recent activity");
            }
            let now = Utc::now();
            for activity in feed.iter().take(activities) {
                let when = activity
                    .created_at
                    .map(|at| time_ago(at, now))
                    .unwrap_or_default();
                println!(
                    "   [{}] {} by {} {}",
                    activity.kind, activity.action, activity.user, when
                );
            }
        }
        Err(e) => output::error(e.toast_message("Failed to load recent activity")),
    }
    Ok(())
}

// ==================== Блог ====================

fn list_query(args: &ListArgs) -> ListQuery {
    let mut query = ListQuery::new();
    if let Some(search) = &args.search {
        query = query.search(search);
    }
    if let Some(status) = &args.status {
        query = query.status(status);
    }
    if let Some(sort_by) = &args.sort_by {
        query = query.sort_by(sort_by);
    }
    query
}

fn parse_post_status(value: &str) -> Result<PostStatus> {
    PostStatus::parse(&value.to_lowercase())
        .ok_or_else(|| anyhow!("Unknown status '{}', expected draft, published or scheduled", value))
}

/// Reads a file for upload, guessing its MIME type from the extension.
fn read_upload(path: &Path) -> Result<(String, &'static str, Vec<u8>)> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{:?} is not a file", path))?;
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok((file_name.clone(), guess_mime(&file_name), bytes))
}

/// Size and type are checked before the file is read.
fn read_image(path: &Path) -> Result<(String, &'static str, Vec<u8>)> {
    let size = fs::metadata(path)
        .with_context(|| format!("Failed to read {:?}", path))?
        .len();
    Upload::check_image(guess_mime(&path.to_string_lossy()), size)?;
    read_upload(path)
}

fn apply_blog_args(form: &mut BlogForm, args: BlogArgs) -> Result<()> {
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(content) = args.content {
        form.content = content;
    }
    if let Some(excerpt) = args.excerpt {
        form.excerpt = excerpt;
    }
    if let Some(category) = args.category {
        form.category = category;
    }
    if let Some(tags) = args.tags {
        form.tags = TagList::from_csv(&tags);
    }
    if let Some(status) = args.status {
        form.status = parse_post_status(&status)?;
    }
    if let Some(at) = args.scheduled_at {
        form.scheduled_at = Some(at);
    }
    if let Some(featured) = args.featured {
        form.featured = featured;
    }
    if let Some(path) = args.image {
        let (file_name, mime, bytes) = read_image(&path)?;
        form.set_image(file_name, mime, bytes)?;
    }
    Ok(())
}

async fn blogs(client: &AdminClient, command: BlogCommands) -> Result<()> {
    match command {
        BlogCommands::List(args) => {
            let posts = client
                .list_blogs(&list_query(&args))
                .await
                .or_toast("Failed to fetch blogs")?;

            output::success(format!("Found {} posts", posts.len()));
            if posts.is_empty() {
                println!("   No posts found");
                println!("   Tip: admin-cli blogs create --title \"My Post\" --content \"Hello\"");
            }
            for (i, post) in posts.iter().enumerate() {
                println!(
                    "   {}. [{}] {} ({}, {} views)",
                    i + 1,
                    post.id,
                    post.title,
                    post.status,
                    post.views
                );
                if !post.excerpt.is_empty() {
                    println!("      {}", output::truncate(&post.excerpt, 60));
                }
            }
        }

        BlogCommands::Get { id } => {
            let post = client.get_blog(&id).await.map_err(|e| {
                if e.is_not_found() {
                    anyhow!("Post {} not found. Tip: use 'blogs list' to see available posts", id)
                } else {
                    anyhow!(e.toast_message("Failed to fetch blog"))
                }
            })?;

            output::heading(&post.title);
            output::field("ID", &post.id);
            output::field("Status", post.status);
            if let Some(at) = post.scheduled_at {
                output::field("Scheduled", at.to_rfc3339());
            }
            output::field("Category", &post.category);
            output::field("Tags", post.tags.join(", "));
            output::field("Featured", post.featured);
            output::field("Views", post.views);
            if let Some(author) = &post.author {
                output::field("Author", author.display_name());
            }
            println!();
            println!("{}", post.content);

            if !post.comments.is_empty() {
                println!();
                output::heading(&format!("Comments ({})", post.comments.len()));
                for comment in &post.comments {
                    let author = comment
                        .author
                        .as_ref()
                        .map(|a| a.display_name().to_string())
                        .unwrap_or_else(|| "Anonymous".to_string());
                    println!("   [{}] {}: {}", comment.id, author, comment.text);
                }
            }
        }

        BlogCommands::Create(args) => {
            let mut form = BlogForm::default();
            apply_blog_args(&mut form, args)?;

            let post = client
                .create_blog(&form)
                .await
                .or_toast("Failed to create blog post")?;
            output::success("Blog post created successfully!");
            output::field("ID", &post.id);
            output::field("Title", &post.title);
            output::field("Status", post.status);
        }

        BlogCommands::Update { id, fields } => {
            let existing = client.get_blog(&id).await.or_toast("Failed to fetch blog")?;
            let mut form = BlogForm::from_post(&existing);
            apply_blog_args(&mut form, fields)?;

            let post = client
                .update_blog(&id, &form)
                .await
                .or_toast("Failed to update blog post")?;
            output::success("Blog post updated successfully!");
            output::field("ID", &post.id);
            output::field("Title", &post.title);
        }

        BlogCommands::Delete { id, yes } => {
            if !output::confirm(&format!("Delete blog post {}?", id), yes)? {
                output::info("Cancelled");
                return Ok(());
            }
            client
                .delete_blog(&id)
                .await
                .or_toast("Failed to delete blog post")?;
            output::success("Blog post deleted successfully!");
        }

        BlogCommands::Comment(CommentCommands::Add { blog, text }) => {
            client
                .add_comment(&blog, &text)
                .await
                .or_toast("Failed to add comment")?;
            output::success("Comment added");
        }

        BlogCommands::Comment(CommentCommands::Delete { blog, comment, yes }) => {
            if !output::confirm("Delete this comment?", yes)? {
                output::info("Cancelled");
                return Ok(());
            }
            client
                .delete_comment(&blog, &comment)
                .await
                .or_toast("Failed to delete comment")?;
            output::success("Comment deleted");
        }
    }
    Ok(())
}

// ==================== Подкасты ====================

/// Accepts a user id or an email, resolved against the user list.
async fn resolve_author(client: &AdminClient, author: &str) -> Result<String> {
    if !author.contains('@') {
        return Ok(author.to_string());
    }
    let users = client
        .list_users(&ListQuery::new().search(author))
        .await
        .or_toast("Failed to fetch authors")?;
    users
        .into_iter()
        .find(|u| u.email.eq_ignore_ascii_case(author))
        .map(|u| u.id)
        .with_context(|| format!("No user with email {}", author))
}

async fn apply_podcast_args(
    client: &AdminClient,
    form: &mut PodcastForm,
    args: PodcastArgs,
) -> Result<()> {
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(excerpt) = args.excerpt {
        form.excerpt = excerpt;
    }
    if let Some(category) = args.category {
        form.category = category;
    }
    if let Some(tags) = args.tags {
        form.tags = TagList::from_csv(&tags);
    }
    if let Some(status) = args.status {
        form.status = parse_post_status(&status)?;
    }
    if let Some(at) = args.scheduled_at {
        form.scheduled_at = Some(at);
    }
    if let Some(featured) = args.featured {
        form.featured = featured;
    }
    if let Some(duration) = args.duration {
        form.duration = duration;
    }
    if let Some(path) = args.image {
        let (file_name, mime, bytes) = read_image(&path)?;
        form.set_image(file_name, mime, bytes)?;
    }
    if let Some(path) = args.audio {
        Upload::check_audio(guess_mime(&path.to_string_lossy()))?;
        let (file_name, mime, bytes) = read_upload(&path)?;
        form.set_audio(file_name, mime, bytes)?;
    }
    // last, so local mistakes are reported before any lookup
    if let Some(author) = args.author {
        form.author = resolve_author(client, &author).await?;
    }
    Ok(())
}

async fn podcasts(client: &AdminClient, command: PodcastCommands) -> Result<()> {
    match command {
        PodcastCommands::List(args) => {
            let podcasts = client
                .list_podcasts(&list_query(&args))
                .await
                .or_toast("Failed to fetch podcasts")?;

            let stats = PodcastStats::from_podcasts(&podcasts);
            output::success(format!(
                "{} podcasts ({} published, {} scheduled)",
                stats.total, stats.published, stats.scheduled
            ));
            for (i, podcast) in podcasts.iter().enumerate() {
                println!(
                    "   {}. [{}] {} ({}{})",
                    i + 1,
                    podcast.id,
                    podcast.title,
                    podcast.status,
                    podcast
                        .duration
                        .as_deref()
                        .map(|d| format!(", {}", d))
                        .unwrap_or_default()
                );
            }
        }

        PodcastCommands::Create(args) => {
            let mut form = PodcastForm::default();
            form.featured = true;
            apply_podcast_args(client, &mut form, args).await?;

            let podcast = client
                .create_podcast(&form)
                .await
                .or_toast("Failed to create podcast")?;
            output::success("Podcast created successfully!");
            output::field("ID", &podcast.id);
            output::field("Title", &podcast.title);
        }

        PodcastCommands::Update { id, fields } => {
            let existing = client
                .list_podcasts(&ListQuery::new())
                .await
                .or_toast("Failed to fetch podcasts")?
                .into_iter()
                .find(|p| p.id == id)
                .with_context(|| format!("Podcast {} not found", id))?;
            let mut form = PodcastForm::from_podcast(&existing);
            apply_podcast_args(client, &mut form, fields).await?;

            client
                .update_podcast(&id, &form)
                .await
                .or_toast("Failed to update podcast")?;
            output::success("Podcast updated successfully!");
        }

        PodcastCommands::Delete { id, yes } => {
            if !output::confirm(&format!("Delete podcast {}?", id), yes)? {
                output::info("Cancelled");
                return Ok(());
            }
            client
                .delete_podcast(&id)
                .await
                .or_toast("Failed to delete podcast")?;
            output::success("Podcast deleted successfully!");
        }
    }
    Ok(())
}

// ==================== Пользователи ====================

fn apply_user_args(form: &mut RegistrationForm, args: UserArgs) -> Result<()> {
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(phone) = args.phone {
        form.phone = phone;
    }
    if let Some(location) = args.location {
        form.location = location;
    }
    if let Some(package) = args.package {
        form.package = Package::parse(&package).ok_or_else(|| {
            anyhow!(
                "Unknown package '{}', expected Basic, Standard, Premium or Enterprise",
                package
            )
        })?;
    }
    if let Some(status) = args.status {
        form.status = UserStatus::parse(&status.to_lowercase()).ok_or_else(|| {
            anyhow!("Unknown status '{}', expected pending, active or inactive", status)
        })?;
    }
    if let Some(total_spent) = args.total_spent {
        form.total_spent = total_spent;
    }
    Ok(())
}

fn write_export(csv: &str, target: Option<PathBuf>, default_name: &str) -> Result<()> {
    match target {
        Some(path) => {
            fs::write(&path, csv).with_context(|| format!("Failed to write {:?}", path))?;
            output::success(format!("Exported to {:?}", path));
        }
        None => {
            tracing::debug!("Writing {} to stdout", default_name);
            println!("{}", csv);
        }
    }
    Ok(())
}

async fn users(client: &AdminClient, command: UserCommands) -> Result<()> {
    match command {
        UserCommands::List(args) => {
            let users = client
                .list_users(&list_query(&args))
                .await
                .or_toast("Failed to fetch registrations")?;

            let stats = RegistrationStats::from_users(&users, Utc::now());
            output::success(format!(
                "{} registrations ({} active, {} pending, {} this month)",
                stats.total, stats.active, stats.pending, stats.this_month
            ));
            for (i, user) in users.iter().enumerate() {
                println!(
                    "   {}. [{}] {} <{}> {} / {}",
                    i + 1,
                    user.id,
                    user.name,
                    user.email,
                    user.package,
                    user.status
                );
            }
        }

        UserCommands::Create(args) => {
            let mut form = RegistrationForm::default();
            apply_user_args(&mut form, args)?;

            let user = client
                .create_user(&form)
                .await
                .or_toast("Failed to create registration")?;
            output::success("Registration created successfully!");
            output::field("ID", &user.id);
        }

        UserCommands::Update { id, fields } => {
            let existing = client
                .list_users(&ListQuery::new())
                .await
                .or_toast("Failed to fetch registrations")?
                .into_iter()
                .find(|u| u.id == id)
                .with_context(|| format!("Registration {} not found", id))?;
            let mut form = RegistrationForm::from_user(&existing);
            apply_user_args(&mut form, fields)?;

            client
                .update_user(&id, &form)
                .await
                .or_toast("Failed to update registration")?;
            output::success("Registration updated successfully!");
        }

        UserCommands::Delete { id, yes } => {
            if !output::confirm(&format!("Delete registration {}?", id), yes)? {
                output::info("Cancelled");
                return Ok(());
            }
            client
                .delete_user(&id)
                .await
                .or_toast("Failed to delete registration")?;
            output::success("Registration deleted successfully!");
        }

        UserCommands::Export { filter, output } => {
            let users = client
                .list_users(&list_query(&filter))
                .await
                .or_toast("Failed to fetch registrations")?;
            write_export(
                &registrations_csv(&users),
                output,
                admin_client::export::REGISTRATIONS_FILE,
            )?;
        }
    }
    Ok(())
}

// ==================== Обращения ====================

async fn reports(client: &AdminClient, command: ReportCommands) -> Result<()> {
    match command {
        ReportCommands::List { search, page } => {
            let reports = client
                .list_reports(search.as_deref().unwrap_or_default())
                .await
                .or_toast("Failed to fetch reports")?;

            let stats = ReportStats::from_reports(&reports);
            output::success(format!(
                "{} reports ({} anonymous, {} pending, {} unread)",
                stats.total, stats.anonymous, stats.pending, stats.unread
            ));

            let mut paginator = Paginator::new(REPORTS_PER_PAGE, reports.len());
            if page > paginator.total_pages() {
                bail!(
                    "Page {} does not exist, there are {} pages",
                    page,
                    paginator.total_pages()
                );
            }
            paginator.go_to(page);

            for report in paginator.slice(&reports) {
                let marker = if report.is_read { " " } else { "*" };
                let who = if report.is_anonymous {
                    "Anonymous".to_string()
                } else {
                    format!(
                        "{} <{}>",
                        report.contact_name().unwrap_or("Unknown"),
                        report.contact_email().unwrap_or("N/A")
                    )
                };
                println!(
                    "  {} [{}] {} ({}): {}",
                    marker,
                    report.id,
                    who,
                    report.status.as_deref().unwrap_or("Unknown"),
                    output::truncate(&report.message, 60)
                );
            }

            let pages: Vec<String> = paginator
                .window()
                .map(|p| {
                    if p == paginator.current {
                        format!("[{}]", p)
                    } else {
                        p.to_string()
                    }
                })
                .collect();
            println!();
            println!(
                "   Page {} of {}   {}",
                paginator.current,
                paginator.total_pages(),
                pages.join(" ")
            );
        }

        ReportCommands::Read { id } => {
            client
                .mark_report_read(&id)
                .await
                .or_toast("Failed to mark report as read")?;
            output::success("Report marked as read");
        }

        ReportCommands::Export { search, output } => {
            let reports = client
                .list_reports(search.as_deref().unwrap_or_default())
                .await
                .or_toast("Failed to fetch reports")?;
            write_export(
                &reports_csv(&reports),
                output,
                admin_client::export::REPORTS_FILE,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_args_become_query_pairs() {
        let args = ListArgs {
            search: Some("rust".into()),
            status: None,
            sort_by: Some("newest".into()),
        };
        assert_eq!(
            list_query(&args).to_pairs(),
            vec![
                ("search".to_string(), "rust".to_string()),
                ("sortBy".to_string(), "newest".to_string()),
            ]
        );
    }

    #[test]
    fn blog_args_override_only_given_fields() {
        let mut form = BlogForm::default();
        form.title = "Old".into();
        form.content = "Keep me".into();
        apply_blog_args(
            &mut form,
            BlogArgs {
                title: Some("New".into()),
                tags: Some("a, b, a".into()),
                status: Some("Draft".into()),
                ..BlogArgs::default()
            },
        )
        .unwrap();

        assert_eq!(form.title, "New");
        assert_eq!(form.content, "Keep me");
        assert_eq!(form.tags.as_slice(), ["a", "b"]);
        assert_eq!(form.status, PostStatus::Draft);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut form = BlogForm::default();
        let err = apply_blog_args(
            &mut form,
            BlogArgs {
                status: Some("archived".into()),
                ..BlogArgs::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn oversized_image_is_not_attached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        fs::write(&path, vec![0u8; 6 * 1024 * 1024]).unwrap();

        let mut form = BlogForm::default();
        let err = apply_blog_args(
            &mut form,
            BlogArgs {
                image: Some(path),
                ..BlogArgs::default()
            },
        )
        .unwrap_err();

        assert!(err.to_string().contains("5MB"));
        assert!(form.image().is_none());
    }

    #[test]
    fn user_package_is_case_insensitive() {
        let mut form = RegistrationForm::default();
        apply_user_args(
            &mut form,
            UserArgs {
                package: Some("premium".into()),
                status: Some("Active".into()),
                ..UserArgs::default()
            },
        )
        .unwrap();
        assert_eq!(form.package, Package::Premium);
        assert_eq!(form.status, UserStatus::Active);
    }
}

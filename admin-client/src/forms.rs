//! Create/edit forms and the checks that run before anything is sent.

use crate::models::{BlogPost, Package, Podcast, PostStatus, User, UserStatus};
use crate::transport::{MultipartForm, RequestBody};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub const MAX_TAGS: usize = 10;
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const IMAGE_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];
pub const AUDIO_MIME_TYPES: [&str; 2] = ["audio/mpeg", "audio/mp3"];

// ==================== Ошибки валидации ====================

/// Per-field validation messages, rendered inline next to each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn require(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

/// A scheduled record needs a date; any date that is given must be strictly in the future.
fn check_schedule(
    errors: &mut ValidationErrors,
    status: PostStatus,
    scheduled_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    what: &str,
) {
    match scheduled_at {
        None if status == PostStatus::Scheduled => errors.add(
            "scheduledAt",
            format!("Schedule date is required for scheduled {}", what),
        ),
        Some(at) if at <= now => errors.add("scheduledAt", "Schedule date must be in the future"),
        _ => {}
    }
}

// ==================== Загрузка файлов ====================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Only JPEG, PNG, or WebP images are allowed")]
    UnsupportedImage(String),

    #[error("Only MP3 audio files are allowed")]
    UnsupportedAudio(String),

    #[error("Image size must be less than 5MB")]
    TooLarge { size: u64 },
}

/// A file picked for upload, already checked against the type/size rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Checks an image before its contents are read.
    pub fn check_image(mime: &str, size: u64) -> Result<(), UploadError> {
        if !IMAGE_MIME_TYPES.contains(&mime) {
            return Err(UploadError::UnsupportedImage(mime.to_string()));
        }
        if size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge { size });
        }
        Ok(())
    }

    pub fn check_audio(mime: &str) -> Result<(), UploadError> {
        if AUDIO_MIME_TYPES.contains(&mime) {
            Ok(())
        } else {
            Err(UploadError::UnsupportedAudio(mime.to_string()))
        }
    }

    pub fn image(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadError> {
        let mime = mime.into();
        Self::check_image(&mime, bytes.len() as u64)?;
        Ok(Self {
            file_name: file_name.into(),
            mime,
            bytes,
        })
    }

    pub fn audio(
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadError> {
        let mime = mime.into();
        Self::check_audio(&mime)?;
        Ok(Self {
            file_name: file_name.into(),
            mime,
            bytes,
        })
    }

    fn append_to(&self, form: MultipartForm, field: &str) -> MultipartForm {
        form.file(field, &self.file_name, &self.mime, self.bytes.clone())
    }
}

/// MIME type for a file name, by extension. Used where no browser supplies one.
pub fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}

// ==================== Теги ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    Added,
    Empty,
    Duplicate,
    LimitReached,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the list from an existing record, applying the same rules as `add`.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for tag in tags {
            list.add(tag.as_ref());
        }
        list
    }

    /// Parses a comma-separated input such as `"news, audio ,"`.
    pub fn from_csv(input: &str) -> Self {
        Self::from_tags(input.split(','))
    }

    pub fn add(&mut self, raw: &str) -> TagOutcome {
        let tag = raw.trim();
        if tag.is_empty() {
            return TagOutcome::Empty;
        }
        if self.0.iter().any(|t| t == tag) {
            return TagOutcome::Duplicate;
        }
        if self.0.len() >= MAX_TAGS {
            return TagOutcome::LimitReached;
        }
        self.0.push(tag.to_string());
        TagOutcome::Added
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_TAGS
    }

    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }

    fn to_json_string(&self) -> String {
        Value::from(self.0.clone()).to_string()
    }
}

// ==================== Форма входа ====================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "email", &self.email, "Email is required");
        require(&mut errors, "password", &self.password, "Password is required");
        errors.into_result()
    }
}

// ==================== Блог ====================

#[derive(Debug, Clone, PartialEq)]
pub struct BlogForm {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: TagList,
    pub featured: bool,
    pub status: PostStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    image: Option<Upload>,
}

impl Default for BlogForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            excerpt: String::new(),
            content: String::new(),
            category: String::new(),
            tags: TagList::new(),
            featured: true,
            status: PostStatus::Published,
            scheduled_at: None,
            image: None,
        }
    }
}

impl BlogForm {
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            tags: TagList::from_tags(&post.tags),
            featured: post.featured,
            status: post.status.or_default(),
            scheduled_at: post.scheduled_at.filter(|_| post.status == PostStatus::Scheduled),
            image: None,
        }
    }

    pub fn image(&self) -> Option<&Upload> {
        self.image.as_ref()
    }

    /// Validates and attaches an image; a rejected file leaves the form unchanged.
    pub fn set_image(
        &mut self,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), UploadError> {
        self.image = Some(Upload::image(file_name, mime, bytes)?);
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "content", &self.content, "Content is required");
        check_schedule(&mut errors, self.status, self.scheduled_at, now, "posts");
        errors.into_result()
    }

    /// Multipart when an image is attached, JSON otherwise.
    pub fn to_body(&self) -> RequestBody {
        match &self.image {
            Some(image) => {
                let mut form = MultipartForm::new()
                    .text("title", &self.title)
                    .text("excerpt", &self.excerpt)
                    .text("content", &self.content)
                    .text("category", &self.category)
                    .text("tags", self.tags.to_json_string())
                    .text("status", self.status.as_str())
                    .text("featured", self.featured.to_string());
                if let Some(at) = self.scheduled_at {
                    form = form.text("scheduledAt", at.to_rfc3339());
                }
                RequestBody::Multipart(image.append_to(form, "image"))
            }
            None => {
                let mut body = json!({
                    "title": self.title,
                    "excerpt": self.excerpt,
                    "content": self.content,
                    "category": self.category,
                    "tags": self.tags.as_slice(),
                    "status": self.status,
                    "featured": self.featured,
                });
                if let Some(at) = self.scheduled_at {
                    body["scheduledAt"] = json!(at);
                }
                RequestBody::Json(body)
            }
        }
    }
}

// ==================== Подкасты ====================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodcastForm {
    pub title: String,
    pub excerpt: String,
    pub description: String,
    pub category: String,
    pub tags: TagList,
    pub status: PostStatus,
    pub featured: bool,
    /// User id picked from the fetched author list.
    pub author: String,
    pub duration: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    image: Option<Upload>,
    audio: Option<Upload>,
}

impl PodcastForm {
    pub fn from_podcast(podcast: &Podcast) -> Self {
        Self {
            title: podcast.title.clone(),
            excerpt: podcast.excerpt.clone(),
            description: podcast.description.clone(),
            category: podcast.category.clone(),
            tags: TagList::from_tags(&podcast.tags),
            status: podcast.status.or_default(),
            featured: podcast.featured,
            author: podcast
                .author
                .as_ref()
                .map(|a| a.id().to_string())
                .unwrap_or_default(),
            duration: podcast.duration.clone().unwrap_or_default(),
            scheduled_at: podcast
                .scheduled_at
                .filter(|_| podcast.status == PostStatus::Scheduled),
            image: None,
            audio: None,
        }
    }

    pub fn image(&self) -> Option<&Upload> {
        self.image.as_ref()
    }

    pub fn audio(&self) -> Option<&Upload> {
        self.audio.as_ref()
    }

    pub fn set_image(
        &mut self,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), UploadError> {
        self.image = Some(Upload::image(file_name, mime, bytes)?);
        Ok(())
    }

    pub fn set_audio(
        &mut self,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), UploadError> {
        self.audio = Some(Upload::audio(file_name, mime, bytes)?);
        Ok(())
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", &self.title, "Title is required");
        require(
            &mut errors,
            "description",
            &self.description,
            "Description is required",
        );
        require(&mut errors, "author", &self.author, "Author is required");
        // podcasts only look at the date when they are scheduled
        let scheduled_at = self
            .scheduled_at
            .filter(|_| self.status == PostStatus::Scheduled);
        check_schedule(&mut errors, self.status, scheduled_at, now, "podcasts");
        errors.into_result()
    }

    /// Text fields, skipping empty optional ones the way the API expects.
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("excerpt", self.excerpt.clone()),
            ("description", self.description.clone()),
            ("category", self.category.clone()),
            ("tags", self.tags.to_json_string()),
            ("status", self.status.as_str().to_string()),
            ("featured", self.featured.to_string()),
            ("author", self.author.clone()),
            ("duration", self.duration.clone()),
        ];
        if self.status == PostStatus::Scheduled {
            if let Some(at) = self.scheduled_at {
                fields.push(("scheduledAt", at.to_rfc3339()));
            }
        }
        fields.retain(|(_, value)| !value.is_empty());
        fields
    }

    /// Multipart when an image or audio file is attached, JSON otherwise.
    pub fn to_body(&self) -> RequestBody {
        if self.image.is_none() && self.audio.is_none() {
            let mut body = Map::new();
            for (name, value) in self.fields() {
                let value = match name {
                    "tags" => json!(self.tags.as_slice()),
                    "featured" => json!(self.featured),
                    _ => Value::String(value),
                };
                body.insert(name.to_string(), value);
            }
            return RequestBody::Json(Value::Object(body));
        }

        let mut form = MultipartForm::new();
        for (name, value) in self.fields() {
            form = form.text(name, value);
        }
        if let Some(image) = &self.image {
            form = image.append_to(form, "image");
        }
        if let Some(audio) = &self.audio {
            form = audio.append_to(form, "audio");
        }
        RequestBody::Multipart(form)
    }
}

// ==================== Регистрации ====================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub package: Package,
    pub status: UserStatus,
    pub total_spent: f64,
}

impl RegistrationForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            location: user.location.clone(),
            package: user.package.or_default(),
            status: user.status.or_default(),
            total_spent: user.total_spent,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "email", &self.email, "Email is required");
        require(&mut errors, "phone", &self.phone, "Phone is required");
        require(&mut errors, "location", &self.location, "Location is required");
        errors.into_result()
    }

    pub fn to_body(&self) -> RequestBody {
        RequestBody::Json(json!({
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "location": self.location,
            "package": self.package,
            "status": self.status,
            "totalSpent": self.total_spent,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_blog() -> BlogForm {
        BlogForm {
            title: "Title".into(),
            content: "Body".into(),
            ..BlogForm::default()
        }
    }

    #[test]
    fn blog_requires_title_and_content() {
        let errors = BlogForm::default().validate(Utc::now()).unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("content"), Some("Content is required"));
    }

    #[test]
    fn scheduled_blog_needs_a_future_date() {
        let now = Utc::now();
        let mut form = valid_blog();
        form.status = PostStatus::Scheduled;

        let errors = form.validate(now).unwrap_err();
        assert_eq!(
            errors.get("scheduledAt"),
            Some("Schedule date is required for scheduled posts")
        );

        form.scheduled_at = Some(now - Duration::minutes(5));
        let errors = form.validate(now).unwrap_err();
        assert_eq!(errors.get("scheduledAt"), Some("Schedule date must be in the future"));

        // strictly future
        form.scheduled_at = Some(now);
        assert!(form.validate(now).is_err());

        form.scheduled_at = Some(now + Duration::hours(1));
        assert!(form.validate(now).is_ok());
    }

    #[test]
    fn past_schedule_is_rejected_whatever_the_status() {
        let now = Utc::now();
        for status in [PostStatus::Draft, PostStatus::Published] {
            let mut form = valid_blog();
            form.status = status;
            form.scheduled_at = Some(now - Duration::days(2));
            let errors = form.validate(now).unwrap_err();
            assert_eq!(errors.get("scheduledAt"), Some("Schedule date must be in the future"));

            form.scheduled_at = None;
            assert!(form.validate(now).is_ok());
        }
    }

    #[test]
    fn future_schedule_is_sent_when_set() {
        let now = Utc::now();
        let mut form = valid_blog();
        form.status = PostStatus::Draft;
        form.scheduled_at = Some(now + Duration::days(1));
        assert!(form.validate(now).is_ok());

        let RequestBody::Json(body) = form.to_body() else {
            panic!("expected json body");
        };
        assert!(body.get("scheduledAt").is_some());
    }

    #[test]
    fn edit_form_drops_stale_schedule_and_unknown_status() {
        let post: BlogPost = serde_json::from_str(
            r#"{ "_id": "b1", "title": "Old", "content": "x", "status": "archived",
                 "scheduledAt": "2001-01-01T00:00:00Z" }"#,
        )
        .unwrap();
        let form = BlogForm::from_post(&post);
        assert_eq!(form.status, PostStatus::Draft);
        assert_eq!(form.scheduled_at, None);
        assert!(form.validate(Utc::now()).is_ok());
    }

    #[test]
    fn oversized_image_is_not_attached() {
        let mut form = valid_blog();
        let six_mb = vec![0u8; 6 * 1024 * 1024];
        let err = form.set_image("big.png", "image/png", six_mb).unwrap_err();
        assert_eq!(err.to_string(), "Image size must be less than 5MB");
        assert!(form.image().is_none());
    }

    #[test]
    fn image_type_is_checked() {
        assert!(Upload::check_image("image/webp", 10).is_ok());
        assert!(Upload::check_image("image/jpeg", MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            Upload::check_image("image/gif", 10),
            Err(UploadError::UnsupportedImage(_))
        ));
        assert!(Upload::check_image("image/png", MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn audio_must_be_mp3() {
        assert!(Upload::audio("ep.mp3", "audio/mpeg", vec![1]).is_ok());
        assert!(Upload::audio("ep.wav", "audio/wav", vec![1]).is_err());
    }

    #[test]
    fn eleventh_tag_is_a_no_op() {
        let mut tags = TagList::new();
        for i in 0..MAX_TAGS {
            assert_eq!(tags.add(&format!("tag{}", i)), TagOutcome::Added);
        }
        let before = tags.clone();
        assert_eq!(tags.add("one-more"), TagOutcome::LimitReached);
        assert_eq!(tags, before);
        assert!(tags.is_full());
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let mut tags = TagList::new();
        assert_eq!(tags.add("  rust "), TagOutcome::Added);
        assert_eq!(tags.add("rust"), TagOutcome::Duplicate);
        assert_eq!(tags.add("   "), TagOutcome::Empty);
        assert_eq!(tags.as_slice(), ["rust".to_string()]);
        assert!(tags.remove("rust"));
        assert!(tags.is_empty());
    }

    #[test]
    fn csv_tags_parse() {
        let tags = TagList::from_csv("news, audio ,, news");
        assert_eq!(tags.as_slice(), ["news".to_string(), "audio".to_string()]);
        assert_eq!(tags.to_csv(), "news,audio");
    }

    #[test]
    fn blog_body_switches_to_multipart_with_image() {
        let mut form = valid_blog();
        form.tags.add("a");
        assert!(matches!(form.to_body(), RequestBody::Json(_)));

        form.set_image("cover.jpg", "image/jpeg", vec![1, 2, 3]).unwrap();
        let RequestBody::Multipart(multipart) = form.to_body() else {
            panic!("expected multipart body");
        };
        assert_eq!(multipart.text_value("tags"), Some(r#"["a"]"#));
        assert_eq!(multipart.text_value("featured"), Some("true"));
        assert!(multipart.has_file("image"));
    }

    #[test]
    fn podcast_requires_author_and_description() {
        let form = PodcastForm {
            title: "Ep".into(),
            ..PodcastForm::default()
        };
        let errors = form.validate(Utc::now()).unwrap_err();
        assert!(errors.contains("description"));
        assert!(errors.contains("author"));
        assert!(!errors.contains("title"));
    }

    #[test]
    fn podcast_body_skips_empty_fields() {
        let form = PodcastForm {
            title: "Ep".into(),
            description: "About".into(),
            author: "u1".into(),
            ..PodcastForm::default()
        };
        let RequestBody::Json(body) = form.to_body() else {
            panic!("expected json body");
        };
        assert!(body.get("duration").is_none());
        assert_eq!(body["author"], "u1");
        assert_eq!(body["tags"], json!([]));
    }

    #[test]
    fn registration_requires_contact_fields() {
        let errors = RegistrationForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("phone"), Some("Phone is required"));
    }

    #[test]
    fn guess_mime_by_extension() {
        assert_eq!(guess_mime("photo.JPG"), "image/jpeg");
        assert_eq!(guess_mime("episode.mp3"), "audio/mpeg");
        assert_eq!(guess_mime("README"), "application/octet-stream");
    }
}

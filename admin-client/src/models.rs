use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// `null` decodes as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wire status values outside the known set decode to `Other` instead of failing the whole list.
macro_rules! lenient_str_enum {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = Option::<String>::deserialize(deserializer)?;
                Ok(raw
                    .as_deref()
                    .and_then(Self::parse)
                    .unwrap_or(Self::Other))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ==================== Авторизация ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

// ==================== Статусы ====================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
    Other,
}

impl PostStatus {
    pub const ALL: [PostStatus; 3] = [Self::Draft, Self::Published, Self::Scheduled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Scheduled => "scheduled",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// A status the editors can offer; unknown wire values fall back to the default.
    pub fn or_default(self) -> Self {
        if self == Self::Other {
            Self::default()
        } else {
            self
        }
    }
}

lenient_str_enum!(PostStatus);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UserStatus {
    #[default]
    Pending,
    Active,
    Inactive,
    Other,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [Self::Pending, Self::Active, Self::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn or_default(self) -> Self {
        if self == Self::Other {
            Self::default()
        } else {
            self
        }
    }
}

lenient_str_enum!(UserStatus);

/// Subscription tier of a registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Package {
    #[default]
    Basic,
    Standard,
    Premium,
    Enterprise,
    Other,
}

impl Package {
    pub const ALL: [Package; 4] = [
        Self::Basic,
        Self::Standard,
        Self::Premium,
        Self::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Enterprise => "Enterprise",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn or_default(self) -> Self {
        if self == Self::Other {
            Self::default()
        } else {
            self
        }
    }
}

lenient_str_enum!(Package);

// ==================== Авторы и комментарии ====================

/// Author as the API returns it: either a bare id or a populated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    User {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl AuthorRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::User { id, .. } => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::User { name, email, id } => name
                .as_deref()
                .or(email.as_deref())
                .unwrap_or(id.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub text: String,
}

// ==================== Блог ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ==================== Подкасты ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, alias = "content", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ==================== Пользователи / регистрации ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default)]
    pub package: Package,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_spent: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ==================== Обращения ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_anonymous: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Report {
    /// Reporter name; hidden for anonymous submissions.
    pub fn contact_name(&self) -> Option<&str> {
        if self.is_anonymous {
            None
        } else {
            self.name.as_deref().filter(|n| !n.is_empty())
        }
    }

    /// Reporter email; hidden for anonymous submissions.
    pub fn contact_email(&self) -> Option<&str> {
        if self.is_anonymous {
            None
        } else {
            self.email.as_deref().filter(|e| !e.is_empty())
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status.as_deref() == Some("pending")
    }
}

// ==================== Активность ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ==================== Общие ошибки ====================

/// Error body returned by the API. Older endpoints use `error`, newer ones `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_post_accepts_mongo_ids_and_sparse_fields() {
        let json = r#"{
            "_id": "65a1",
            "title": "Hello",
            "status": "scheduled",
            "scheduledAt": "2030-01-01T10:00:00Z",
            "author": { "_id": "u1", "name": "Ada" }
        }"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "65a1");
        assert_eq!(post.status, PostStatus::Scheduled);
        assert!(post.scheduled_at.is_some());
        assert!(post.tags.is_empty());
        assert_eq!(post.author.unwrap().display_name(), "Ada");
    }

    #[test]
    fn author_may_be_a_bare_id() {
        let json = r#"{ "id": "p1", "title": "Ep 1", "author": "u9" }"#;
        let podcast: Podcast = serde_json::from_str(json).unwrap();
        assert_eq!(podcast.author, Some(AuthorRef::Id("u9".into())));
    }

    #[test]
    fn anonymous_report_hides_contact() {
        let report = Report {
            id: "r1".into(),
            message: "help".into(),
            is_anonymous: true,
            name: Some("Jo".into()),
            email: Some("jo@example.com".into()),
            status: Some("pending".into()),
            is_read: false,
            created_at: None,
        };
        assert_eq!(report.contact_name(), None);
        assert_eq!(report.contact_email(), None);
        assert!(report.is_pending());

        let named = Report {
            is_anonymous: false,
            ..report
        };
        assert_eq!(named.contact_name(), Some("Jo"));
    }

    #[test]
    fn user_package_and_status_parse() {
        let json = r#"{ "_id": "u1", "name": "A", "package": "Premium", "status": "active", "totalSpent": 12.5 }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.package, Package::Premium);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(Package::parse("enterprise"), Some(Package::Enterprise));
    }

    #[test]
    fn unknown_values_and_nulls_do_not_fail_decoding() {
        let json = r#"[
            { "_id": "b1", "title": "Ok", "status": "published" },
            { "_id": "b2", "title": null, "status": "archived", "excerpt": null, "views": null },
            { "_id": "b3", "title": "No status", "status": null }
        ]"#;
        let posts: Vec<BlogPost> = serde_json::from_str(json).unwrap();
        assert_eq!(posts[0].status, PostStatus::Published);
        assert_eq!(posts[1].status, PostStatus::Other);
        assert_eq!(posts[1].title, "");
        assert_eq!(posts[1].views, 0);
        assert_eq!(posts[2].status, PostStatus::Other);
        assert_eq!(PostStatus::Other.or_default(), PostStatus::Draft);

        let user: User =
            serde_json::from_str(r#"{ "_id": "u1", "package": "gold", "phone": null }"#).unwrap();
        assert_eq!(user.package, Package::Other);
        assert_eq!(user.status, UserStatus::Pending);
        assert_eq!(user.phone, "");
    }

    #[test]
    fn status_serialises_as_its_wire_string() {
        assert_eq!(serde_json::to_value(PostStatus::Scheduled).unwrap(), "scheduled");
        assert_eq!(serde_json::to_value(Package::Enterprise).unwrap(), "Enterprise");
        assert_eq!(PostStatus::parse("Published"), Some(PostStatus::Published));
        assert_eq!(PostStatus::parse("other"), None);
    }

    #[test]
    fn error_response_prefers_message() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{ "message": "m", "error": "e" }"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("m"));
        let body: ErrorResponse = serde_json::from_str(r#"{ "error": "e" }"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("e"));
    }
}

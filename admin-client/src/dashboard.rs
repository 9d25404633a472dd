use crate::models::{BlogPost, PostStatus, Podcast, Report, User, UserStatus};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Headline numbers on the dashboard, derived from the fetched collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_users: usize,
    pub total_posts: usize,
    pub total_views: u64,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub scheduled_posts: usize,
}

impl DashboardStats {
    pub fn from_collections(users: &[User], blogs: &[BlogPost]) -> Self {
        let count = |status: PostStatus| blogs.iter().filter(|b| b.status == status).count();

        Self {
            total_users: users.len(),
            active_users: users
                .iter()
                .filter(|u| u.status == UserStatus::Active)
                .count(),
            total_posts: blogs.len(),
            total_views: blogs.iter().map(|b| b.views).sum(),
            published_posts: count(PostStatus::Published),
            draft_posts: count(PostStatus::Draft),
            scheduled_posts: count(PostStatus::Scheduled),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub this_month: usize,
}

impl RegistrationStats {
    pub fn from_users(users: &[User], now: DateTime<Utc>) -> Self {
        Self {
            total: users.len(),
            active: users.iter().filter(|u| u.status == UserStatus::Active).count(),
            pending: users.iter().filter(|u| u.status == UserStatus::Pending).count(),
            this_month: users
                .iter()
                .filter_map(|u| u.created_at)
                .filter(|at| at.year() == now.year() && at.month() == now.month())
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PodcastStats {
    pub total: usize,
    pub published: usize,
    pub scheduled: usize,
}

impl PodcastStats {
    pub fn from_podcasts(podcasts: &[Podcast]) -> Self {
        Self {
            total: podcasts.len(),
            published: podcasts
                .iter()
                .filter(|p| p.status == PostStatus::Published)
                .count(),
            scheduled: podcasts
                .iter()
                .filter(|p| p.status == PostStatus::Scheduled)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub anonymous: usize,
    pub pending: usize,
    pub unread: usize,
}

impl ReportStats {
    pub fn from_reports(reports: &[Report]) -> Self {
        Self {
            total: reports.len(),
            anonymous: reports.iter().filter(|r| r.is_anonymous).count(),
            pending: reports.iter().filter(|r| r.is_pending()).count(),
            unread: reports.iter().filter(|r| !r.is_read).count(),
        }
    }
}

/// "12 seconds ago", "3 hours ago", then a plain date after a day.
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds().max(0);
    if seconds < 60 {
        return format!("{} seconds ago", seconds);
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} minute{} ago", minutes, if minutes > 1 { "s" } else { "" });
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" });
    }
    at.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn user(id: &str, status: UserStatus) -> User {
        User {
            id: id.into(),
            name: id.into(),
            email: format!("{}@example.com", id),
            phone: String::new(),
            location: String::new(),
            package: Default::default(),
            status,
            total_spent: 0.0,
            created_at: None,
        }
    }

    fn blog(id: &str, status: PostStatus, views: u64) -> BlogPost {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "title": id,
            "status": status,
            "views": views,
        }))
        .unwrap()
    }

    #[test]
    fn counts_match_collections() {
        let users = vec![
            user("a", UserStatus::Active),
            user("b", UserStatus::Pending),
            user("c", UserStatus::Active),
        ];
        let blogs = vec![
            blog("1", PostStatus::Published, 10),
            blog("2", PostStatus::Draft, 0),
            blog("3", PostStatus::Scheduled, 5),
            blog("4", PostStatus::Published, 1),
        ];

        let stats = DashboardStats::from_collections(&users, &blogs);
        assert_eq!(
            stats,
            DashboardStats {
                total_users: 3,
                active_users: 2,
                total_posts: 4,
                total_views: 16,
                published_posts: 2,
                draft_posts: 1,
                scheduled_posts: 1,
            }
        );
    }

    #[test]
    fn empty_collections_give_zeroes() {
        assert_eq!(
            DashboardStats::from_collections(&[], &[]),
            DashboardStats::default()
        );
    }

    #[test]
    fn registrations_this_month() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let mut fresh = user("a", UserStatus::Pending);
        fresh.created_at = Some(now - Duration::days(3));
        let mut old = user("b", UserStatus::Active);
        old.created_at = Some(Utc.with_ymd_and_hms(2025, 10, 2, 0, 0, 0).unwrap());

        let stats = RegistrationStats::from_users(&[fresh, old], now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.this_month, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.active, 1);
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now - Duration::seconds(5), now), "5 seconds ago");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_ago(now - Duration::minutes(7), now), "7 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "October 16, 2026");
    }
}

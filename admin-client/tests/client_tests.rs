mod common;

#[cfg(test)]
pub mod client_tests {
    use std::time::Duration;

    use chrono::{Duration as ChronoDuration, Utc};
    use http::Method;
    use serde_json::json;

    use super::common::*;

    use admin_client::error::AdminClientError;
    use admin_client::forms::BlogForm;
    use admin_client::list::ListQuery;
    use admin_client::models::{Package, PostStatus, UserStatus};
    use admin_client::transport::{RequestBody, TransportError};

    // ==================== Повторные попытки ====================

    #[tokio::test]
    async fn test_network_failure_retries_twice_then_surfaces() {
        let h = Harness::signed_in();
        for _ in 0..3 {
            h.transport.fail(
                Method::GET,
                "/blogs",
                TransportError::Network("connection refused".into()),
            );
        }

        let err = h.client.list_blogs(&ListQuery::new()).await.unwrap_err();

        assert!(matches!(err, AdminClientError::Network(_)));
        assert_eq!(h.transport.calls_to(Method::GET, "/blogs"), 3);
        assert_eq!(
            h.transport.sleeps(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn test_request_timeout_status_is_retried() {
        let h = Harness::signed_in();
        h.transport.reply_empty(Method::GET, "/users", 408);
        h.transport
            .reply(Method::GET, "/users", 200, json!([user_json("u1", "active")]));

        let users = h.client.list_users(&ListQuery::new()).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(h.transport.calls_to(Method::GET, "/users"), 2);
        assert_eq!(h.transport.sleeps(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn test_persistent_408_surfaces_as_timeout() {
        let h = Harness::signed_in();
        for _ in 0..3 {
            h.transport.reply_empty(Method::DELETE, "/podcast/p1", 408);
        }

        let err = h.client.delete_podcast("p1").await.unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(h.transport.calls_to(Method::DELETE, "/podcast/p1"), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let h = Harness::signed_in();
        h.transport.reply(
            Method::GET,
            "/blogs/missing",
            404,
            json!({ "message": "Blog not found" }),
        );

        let err = h.client.get_blog("missing").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(h.transport.requests().len(), 1);
        assert!(h.transport.sleeps().is_empty());
    }

    // ==================== Авторизация ====================

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let h = Harness::signed_in();
        h.transport.reply(Method::GET, "/activities", 200, json!([]));

        h.client.list_activities().await.unwrap();

        let sent = h.transport.requests();
        assert_eq!(sent[0].bearer.as_deref(), Some("test-token"));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token_and_redirects() {
        let h = Harness::new("/admin/manage-blog", Some("stale"));
        h.transport.reply(
            Method::GET,
            "/blogs",
            401,
            json!({ "message": "Token expired" }),
        );

        let err = h.client.list_blogs(&ListQuery::new()).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!h.client.is_authenticated());
        assert_eq!(h.current_path(), "/login");
    }

    #[tokio::test]
    async fn test_failed_login_does_not_redirect() {
        let h = Harness::new("/login", None);
        h.transport.reply(
            Method::POST,
            "/auth/login",
            401,
            json!({ "message": "Invalid credentials" }),
        );

        let err = h.client.login("admin@example.com", "wrong").await.unwrap_err();

        assert_eq!(err.login_message(), "Invalid credentials");
        assert_eq!(h.navigator.history(), vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn test_unauthorized_on_login_page_keeps_location() {
        let h = Harness::new("/login", Some("stale"));
        h.transport.reply_empty(Method::GET, "/users", 401);

        let _ = h.client.list_users(&ListQuery::new()).await;

        assert_eq!(h.navigator.history(), vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn test_login_without_token_is_an_error() {
        let h = Harness::new("/login", None);
        h.transport
            .reply(Method::POST, "/auth/login", 200, json!({ "user": {} }));

        let err = h.client.login("admin@example.com", "secret").await.unwrap_err();

        assert!(matches!(err, AdminClientError::MissingToken));
        assert_eq!(err.login_message(), "No token received from server");
        assert!(!h.client.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let h = Harness::new("/login", None);

        let err = h.client.login("", "").await.unwrap_err();

        let AdminClientError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_then_dashboard_counts_match() {
        let h = Harness::new("/login", None);
        h.transport.reply(
            Method::POST,
            "/auth/login",
            200,
            json!({ "token": "fresh-token" }),
        );
        h.transport.reply(
            Method::GET,
            "/users",
            200,
            json!([
                user_json("u1", "active"),
                user_json("u2", "pending"),
                user_json("u3", "active"),
            ]),
        );
        h.transport.reply(
            Method::GET,
            "/blogs",
            200,
            json!([
                blog_json("b1", "published", 10),
                blog_json("b2", "draft", 0),
                blog_json("b3", "scheduled", 5),
                blog_json("b4", "published", 7),
            ]),
        );

        let token = h.client.login("admin@example.com", "secret").await.unwrap();
        assert_eq!(token, "fresh-token");
        assert_eq!(h.tokens_value(), Some("fresh-token".to_string()));

        let stats = h.client.dashboard_stats().await.unwrap();

        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.total_posts, 4);
        assert_eq!(stats.total_views, 22);
        assert_eq!(stats.published_posts, 2);
        assert_eq!(stats.draft_posts, 1);
        assert_eq!(stats.scheduled_posts, 1);

        let dashboard_calls: Vec<_> = h
            .transport
            .requests()
            .into_iter()
            .filter(|r| r.method == Method::GET)
            .collect();
        assert_eq!(dashboard_calls.len(), 2);
        assert!(dashboard_calls
            .iter()
            .all(|r| r.bearer.as_deref() == Some("fresh-token")));
    }

    #[tokio::test]
    async fn test_dashboard_tolerates_unknown_status_and_null_fields() {
        let h = Harness::signed_in();
        let mut odd_user = user_json("u2", "suspended");
        odd_user["location"] = json!(null);
        odd_user["package"] = json!("basic");
        h.transport.reply(
            Method::GET,
            "/users",
            200,
            json!([user_json("u1", "active"), odd_user]),
        );
        let mut odd_post = blog_json("b2", "archived", 4);
        odd_post["excerpt"] = json!(null);
        odd_post["tags"] = json!(null);
        h.transport.reply(
            Method::GET,
            "/blogs",
            200,
            json!([blog_json("b1", "published", 6), odd_post]),
        );

        let stats = h.client.dashboard_stats().await.unwrap();

        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.active_users, 1);
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.total_views, 10);
        assert_eq!(stats.published_posts, 1);
        assert_eq!(stats.draft_posts, 0);
        assert_eq!(stats.scheduled_posts, 0);
    }

    #[tokio::test]
    async fn test_user_list_keeps_records_with_unexpected_values() {
        let h = Harness::signed_in();
        let mut odd = user_json("u2", "suspended");
        odd["location"] = json!(null);
        odd["package"] = json!("PREMIUM");
        h.transport
            .reply(Method::GET, "/users", 200, json!([user_json("u1", "pending"), odd]));

        let users = h.client.list_users(&ListQuery::new()).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].status, UserStatus::Pending);
        assert_eq!(users[1].status, UserStatus::Other);
        assert_eq!(users[1].location, "");
        assert_eq!(users[1].package, Package::Premium);
    }

    // ==================== Блог ====================

    #[tokio::test]
    async fn test_delete_then_refetch_drops_post() {
        let h = Harness::signed_in();
        h.transport.reply(
            Method::GET,
            "/blogs",
            200,
            json!([blog_json("b1", "published", 1), blog_json("b2", "draft", 0)]),
        );
        h.transport.reply_empty(Method::DELETE, "/blogs/b1", 204);
        h.transport
            .reply(Method::GET, "/blogs", 200, json!([blog_json("b2", "draft", 0)]));

        let before = h.client.list_blogs(&ListQuery::new()).await.unwrap();
        assert!(before.iter().any(|p| p.id == "b1"));

        h.client.delete_blog("b1").await.unwrap();
        let after = h.client.list_blogs(&ListQuery::new()).await.unwrap();

        assert!(after.iter().all(|p| p.id != "b1"));
        assert_eq!(h.transport.calls_to(Method::DELETE, "/blogs/b1"), 1);
    }

    #[tokio::test]
    async fn test_list_query_is_forwarded() {
        let h = Harness::signed_in();
        h.transport.reply(Method::GET, "/blogs", 200, json!([]));

        let query = ListQuery::new().search("rust").status("draft").sort_by("newest");
        h.client.list_blogs(&query).await.unwrap();

        let sent = &h.transport.requests()[0];
        assert_eq!(
            sent.query,
            vec![
                ("search".to_string(), "rust".to_string()),
                ("status".to_string(), "draft".to_string()),
                ("sortBy".to_string(), "newest".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_scheduled_post_in_past_is_rejected_offline() {
        let h = Harness::signed_in();
        let mut form = BlogForm::default();
        form.title = "Launch".into();
        form.content = "Soon".into();
        form.status = PostStatus::Scheduled;
        form.scheduled_at = Some(Utc::now() - ChronoDuration::hours(1));

        let err = h.client.create_blog(&form).await.unwrap_err();

        let AdminClientError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.contains("scheduledAt"));
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_draft_with_past_date_is_rejected_offline() {
        let h = Harness::signed_in();
        let mut form = BlogForm::default();
        form.title = "Notes".into();
        form.content = "Later".into();
        form.status = PostStatus::Draft;
        form.scheduled_at = Some(Utc::now() - ChronoDuration::days(2));

        let err = h.client.create_blog(&form).await.unwrap_err();

        let AdminClientError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("scheduledAt"), Some("Schedule date must be in the future"));
        assert_eq!(h.transport.calls_to(Method::POST, "/blogs"), 0);
    }

    #[tokio::test]
    async fn test_scheduled_post_without_date_is_rejected_offline() {
        let h = Harness::signed_in();
        let mut form = BlogForm::default();
        form.title = "Launch".into();
        form.content = "Soon".into();
        form.status = PostStatus::Scheduled;
        form.scheduled_at = None;

        assert!(h.client.create_blog(&form).await.is_err());
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_blog_without_image_is_sent_as_json() {
        let h = Harness::signed_in();
        h.transport
            .reply(Method::POST, "/blogs", 201, blog_json("b9", "published", 0));

        let mut form = BlogForm::default();
        form.title = "Hello".into();
        form.content = "World".into();
        let post = h.client.create_blog(&form).await.unwrap();

        assert_eq!(post.id, "b9");
        let sent = &h.transport.requests()[0];
        let RequestBody::Json(body) = &sent.body else {
            panic!("expected JSON body");
        };
        assert_eq!(body["title"], "Hello");
        assert_eq!(body["status"], "published");
        assert!(body.get("scheduledAt").is_none());
    }

    #[tokio::test]
    async fn test_blog_with_image_is_sent_as_multipart() {
        let h = Harness::signed_in();
        h.transport
            .reply(Method::PUT, "/blogs/b1", 200, blog_json("b1", "published", 3));

        let mut form = BlogForm::default();
        form.title = "Hello".into();
        form.content = "World".into();
        form.tags.add("rust");
        form.set_image("cover.png", "image/png", vec![0u8; 1024])
            .unwrap();

        h.client.update_blog("b1", &form).await.unwrap();

        let sent = &h.transport.requests()[0];
        let RequestBody::Multipart(multipart) = &sent.body else {
            panic!("expected multipart body");
        };
        assert!(multipart.has_file("image"));
        assert_eq!(multipart.text_value("tags"), Some(r#"["rust"]"#));
        assert_eq!(multipart.text_value("featured"), Some("true"));
        assert_eq!(sent.body.content_type(), None);
    }

    #[tokio::test]
    async fn test_comments_round_trip_paths() {
        let h = Harness::signed_in();
        h.transport.reply(Method::POST, "/blogs/b1/comments", 201, json!({}));
        h.transport.reply_empty(Method::DELETE, "/blogs/b1/comments/c7", 200);

        h.client.add_comment("b1", "  Nice post  ").await.unwrap();
        h.client.delete_comment("b1", "c7").await.unwrap();

        let sent = h.transport.requests();
        assert_eq!(sent[0].body, RequestBody::Json(json!({ "text": "Nice post" })));
        assert_eq!(sent[1].method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_empty_comment_is_rejected() {
        let h = Harness::signed_in();

        assert!(h.client.add_comment("b1", "   ").await.is_err());
        assert!(h.transport.requests().is_empty());
    }

    // ==================== Обращения ====================

    #[tokio::test]
    async fn test_mark_report_read_uses_patch() {
        let h = Harness::signed_in();
        h.transport.reply(Method::PATCH, "/reports/r1/read", 200, json!({}));

        h.client.mark_report_read("r1").await.unwrap();

        assert_eq!(h.transport.calls_to(Method::PATCH, "/reports/r1/read"), 1);
    }

    #[tokio::test]
    async fn test_server_message_reaches_toast() {
        let h = Harness::signed_in();
        h.transport.reply(
            Method::DELETE,
            "/users/u1",
            500,
            json!({ "error": "Database unavailable" }),
        );

        let err = h.client.delete_user("u1").await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.toast_message("Failed to delete user"),
            "Database unavailable"
        );
    }
}

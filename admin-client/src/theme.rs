//! Design tokens applied to the document root at startup.

use crate::models::PostStatus;

pub struct Theme;

impl Theme {
    pub const GRADIENT_PRIMARY: &'static str =
        "linear-gradient(90deg, hsl(14, 100%, 67%) 0%, hsl(14, 100%, 47%) 100%)";
    pub const GRADIENT_SECONDARY: &'static str =
        "linear-gradient(90deg, hsl(280, 85%, 70%) 0%, hsl(280, 85%, 50%) 100%)";

    pub const CUSTOM_PROPERTIES: [(&'static str, &'static str); 25] = [
        ("--bg-light", "hsl(220, 25%, 97%)"),
        ("--bg-dark", "hsl(220, 35%, 8%)"),
        ("--text-primary", "hsl(220, 25%, 15%)"),
        ("--text-secondary", "hsl(220, 20%, 45%)"),
        ("--text-tertiary", "hsl(220, 15%, 65%)"),
        ("--text-white", "hsl(0, 0%, 100%)"),
        ("--primary", "hsl(14, 100%, 57%)"),
        ("--primary-dark", "hsl(14, 100%, 47%)"),
        ("--primary-light", "hsl(14, 100%, 67%)"),
        ("--accent", "hsl(280, 85%, 60%)"),
        ("--accent-dark", "hsl(280, 85%, 50%)"),
        ("--accent-light", "hsl(280, 85%, 70%)"),
        ("--success", "hsl(142, 70%, 50%)"),
        ("--warning", "hsl(38, 95%, 55%)"),
        ("--info", "hsl(210, 90%, 58%)"),
        ("--border-light", "hsl(220, 25%, 85%)"),
        ("--border-medium", "hsl(220, 25%, 75%)"),
        ("--card-bg", "hsl(0, 0%, 100%)"),
        ("--card-hover", "hsl(220, 25%, 99%)"),
        ("--glass-bg", "rgba(255, 255, 255, 0.95)"),
        ("--shadow-light", "0 2px 10px rgba(0, 0, 0, 0.05)"),
        ("--shadow-medium", "0 4px 20px rgba(0, 0, 0, 0.08)"),
        ("--shadow-heavy", "0 8px 30px rgba(0, 0, 0, 0.1)"),
        ("--gradient-primary", Self::GRADIENT_PRIMARY),
        ("--gradient-secondary", Self::GRADIENT_SECONDARY),
    ];

    pub fn declarations() -> impl Iterator<Item = (&'static str, &'static str)> {
        Self::CUSTOM_PROPERTIES.into_iter()
    }

    pub fn get(name: &str) -> Option<&'static str> {
        Self::declarations()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// CSS variable used to colour a publication status badge.
pub fn status_color(status: &str) -> &'static str {
    match PostStatus::parse(status) {
        Some(PostStatus::Published) => "var(--success)",
        Some(PostStatus::Draft) => "var(--warning)",
        Some(PostStatus::Scheduled) => "var(--info)",
        Some(PostStatus::Other) | None => "var(--text-secondary)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_is_a_custom_property() {
        assert!(Theme::declarations().all(|(k, v)| k.starts_with("--") && !v.is_empty()));
        assert_eq!(Theme::get("--primary"), Some("hsl(14, 100%, 57%)"));
        assert_eq!(Theme::get("--missing"), None);
    }

    #[test]
    fn gradients_are_root_tokens() {
        assert_eq!(Theme::get("--gradient-primary"), Some(Theme::GRADIENT_PRIMARY));
        assert_eq!(Theme::get("--gradient-secondary"), Some(Theme::GRADIENT_SECONDARY));
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color("published"), "var(--success)");
        assert_eq!(status_color("draft"), "var(--warning)");
        assert_eq!(status_color("scheduled"), "var(--info)");
        assert_eq!(status_color("archived"), "var(--text-secondary)");
    }
}

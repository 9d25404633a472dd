//! Console paths and the auth gate in front of them.

pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_ROOT: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem { label: "Dashboard", path: "/admin" },
    NavItem { label: "Registrations", path: "/admin/registrations" },
    NavItem { label: "Create Blog", path: "/admin/create-blog" },
    NavItem { label: "Manage Blog", path: "/admin/manage-blog" },
    NavItem { label: "Podcasts", path: "/admin/podcasts" },
    NavItem { label: "Show Reports", path: "/admin/show-reports" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    CreateBlog,
    ManageBlog,
    Registrations,
    ShowReports,
    Podcasts,
}

impl Page {
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match path {
            LOGIN_PATH => Some(Self::Login),
            ADMIN_ROOT => Some(Self::Dashboard),
            "/admin/create-blog" => Some(Self::CreateBlog),
            "/admin/manage-blog" => Some(Self::ManageBlog),
            "/admin/registrations" => Some(Self::Registrations),
            "/admin/show-reports" => Some(Self::ShowReports),
            "/admin/podcasts" => Some(Self::Podcasts),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Dashboard => ADMIN_ROOT,
            Self::CreateBlog => "/admin/create-blog",
            Self::ManageBlog => "/admin/manage-blog",
            Self::Registrations => "/admin/registrations",
            Self::ShowReports => "/admin/show-reports",
            Self::Podcasts => "/admin/podcasts",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Where a request for `path` ends up: the page itself, or the login page
/// for unknown paths and for admin pages without a token.
pub fn resolve(path: &str, authenticated: bool) -> Page {
    match Page::from_path(path) {
        Some(page) if page.requires_auth() && !authenticated => Page::Login,
        Some(page) => page,
        None => Page::Login,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_nav_item_is_a_known_page() {
        for item in NAV_ITEMS {
            let page = Page::from_path(item.path).unwrap();
            assert_eq!(page.path(), item.path);
        }
    }

    #[test]
    fn guard_redirects_without_token() {
        assert_eq!(resolve("/admin/manage-blog", false), Page::Login);
        assert_eq!(resolve("/admin/manage-blog", true), Page::ManageBlog);
        assert_eq!(resolve("/login", false), Page::Login);
    }

    #[test]
    fn unknown_paths_go_to_login() {
        assert_eq!(resolve("/wp-admin", true), Page::Login);
        assert_eq!(resolve("/", true), Page::Login);
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(Page::from_path("/admin/"), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/admin/podcasts?x=1"), Some(Page::Podcasts));
    }
}

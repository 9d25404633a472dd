//! Sidebar state for the layout shell.

/// Viewports narrower than this show the sidebar as an overlay.
pub const OVERLAY_BREAKPOINT: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarMode {
    Expanded,
    Collapsed,
    /// Narrow viewport, sidebar drawn over the content with a backdrop.
    Overlay,
    /// Narrow viewport, sidebar off-screen.
    Hidden,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sidebar {
    collapsed: bool,
    narrow: bool,
}

impl Sidebar {
    pub fn for_width(width: u32) -> Self {
        let mut sidebar = Self::default();
        sidebar.resize(width);
        sidebar
    }

    pub fn mode(&self) -> SidebarMode {
        match (self.narrow, self.collapsed) {
            (false, false) => SidebarMode::Expanded,
            (false, true) => SidebarMode::Collapsed,
            (true, false) => SidebarMode::Overlay,
            (true, true) => SidebarMode::Hidden,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.narrow
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Entering a narrow viewport hides the sidebar.
    pub fn resize(&mut self, width: u32) {
        let narrow = width < OVERLAY_BREAKPOINT;
        if narrow && !self.narrow {
            self.collapsed = true;
        }
        self.narrow = narrow;
    }

    /// Following a link closes the overlay.
    pub fn navigated(&mut self) {
        if self.narrow {
            self.collapsed = true;
        }
    }

    /// Click on the overlay backdrop.
    pub fn dismiss(&mut self) {
        if self.mode() == SidebarMode::Overlay {
            self.collapsed = true;
        }
    }

    pub fn shows_backdrop(&self) -> bool {
        self.mode() == SidebarMode::Overlay
    }

    /// Left margin class for the main content region.
    pub fn content_margin(&self) -> &'static str {
        match self.mode() {
            SidebarMode::Overlay | SidebarMode::Hidden => "ml-0",
            SidebarMode::Collapsed => "ml-20",
            SidebarMode::Expanded => "ml-72",
        }
    }

    pub fn panel_class(&self) -> &'static str {
        match self.mode() {
            SidebarMode::Expanded => "relative w-72 h-screen",
            SidebarMode::Collapsed => "relative w-20 h-screen",
            SidebarMode::Overlay => "fixed left-0 top-0 h-full z-50 w-72",
            SidebarMode::Hidden => "fixed left-0 top-0 h-full z-50 -translate-x-full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_toggles_between_expanded_and_collapsed() {
        let mut sidebar = Sidebar::for_width(1440);
        assert_eq!(sidebar.mode(), SidebarMode::Expanded);
        sidebar.toggle();
        assert_eq!(sidebar.mode(), SidebarMode::Collapsed);
        assert_eq!(sidebar.content_margin(), "ml-20");
        sidebar.toggle();
        assert_eq!(sidebar.content_margin(), "ml-72");
    }

    #[test]
    fn narrow_viewport_starts_hidden_and_opens_as_overlay() {
        let mut sidebar = Sidebar::for_width(800);
        assert_eq!(sidebar.mode(), SidebarMode::Hidden);
        sidebar.toggle();
        assert_eq!(sidebar.mode(), SidebarMode::Overlay);
        assert!(sidebar.shows_backdrop());
        assert_eq!(sidebar.content_margin(), "ml-0");
    }

    #[test]
    fn navigation_closes_overlay_only_on_narrow() {
        let mut sidebar = Sidebar::for_width(800);
        sidebar.toggle();
        sidebar.navigated();
        assert_eq!(sidebar.mode(), SidebarMode::Hidden);

        let mut desktop = Sidebar::for_width(1280);
        desktop.navigated();
        assert_eq!(desktop.mode(), SidebarMode::Expanded);
    }

    #[test]
    fn backdrop_dismisses_overlay() {
        let mut sidebar = Sidebar::for_width(600);
        sidebar.toggle();
        sidebar.dismiss();
        assert_eq!(sidebar.mode(), SidebarMode::Hidden);
    }

    #[test]
    fn shrinking_collapses_once() {
        let mut sidebar = Sidebar::for_width(1280);
        sidebar.resize(900);
        assert_eq!(sidebar.mode(), SidebarMode::Hidden);
        sidebar.toggle();
        // staying narrow keeps the user's choice
        sidebar.resize(850);
        assert_eq!(sidebar.mode(), SidebarMode::Overlay);
        sidebar.resize(1024);
        assert_eq!(sidebar.mode(), SidebarMode::Expanded);
    }
}

//! Navbar state

use crate::consts::NAV_SCROLL_THRESHOLD;

/// A top-level navigation link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink { name: "Home", path: "/" },
    NavLink { name: "Work", path: "/work" },
    NavLink { name: "About", path: "/about" },
    NavLink { name: "Contact", path: "/contact" },
];

impl NavLink {
    /// Active only on an exact path match (a case study does not light up "Work")
    pub fn is_active(&self, current_path: &str) -> bool {
        self.path == current_path
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    scrolled: bool,
    menu_open: bool,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from the window's vertical scroll offset.
    /// Returns `true` if the scrolled style changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > NAV_SCROLL_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_link_is_exact() {
        let work = NAV_LINKS[1];
        assert!(work.is_active("/work"));
        assert!(!work.is_active("/work/some-project"));
        assert!(NAV_LINKS[0].is_active("/"));
        assert_eq!(NAV_LINKS.iter().filter(|l| l.is_active("/bogus")).count(), 0);
    }

    #[test]
    fn test_scroll_threshold() {
        let mut nav = NavState::new();
        assert!(!nav.on_scroll(20.0));
        assert!(!nav.scrolled());
        assert!(nav.on_scroll(20.5));
        assert!(nav.scrolled());
        assert!(!nav.on_scroll(400.0));
        assert!(nav.on_scroll(0.0));
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let mut nav = NavState::new();
        nav.toggle_menu();
        assert!(nav.menu_open());
        nav.close_menu();
        assert!(!nav.menu_open());
        nav.close_menu();
        assert!(!nav.menu_open());
    }
}

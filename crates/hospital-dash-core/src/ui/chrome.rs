//! Sidebar and header dropdown toggles.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    Notifications,
    UserMenu,
}

/// Page chrome around the content panels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chrome {
    sidebar_collapsed: bool,
    open_dropdown: Option<Dropdown>,
}

impl Chrome {
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Toggle one dropdown; opening it closes the other.
    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) {
        self.open_dropdown = match self.open_dropdown {
            Some(open) if open == dropdown => None,
            _ => Some(dropdown),
        };
    }

    /// A click anywhere outside the dropdowns.
    pub fn click_outside(&mut self) {
        self.open_dropdown = None;
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn is_open(&self, dropdown: Dropdown) -> bool {
        self.open_dropdown == Some(dropdown)
    }
}

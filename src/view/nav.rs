//! Navigation bar and selection menus.

use crate::model::{AgeBracket, ServiceCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Discover,
    Chat,
    About,
    Contact,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Discover,
        Route::Chat,
        Route::About,
        Route::Contact,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Discover => "/discover",
            Self::Chat => "/chat",
            Self::About => "/about",
            Self::Contact => "/contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Discover => "Discover",
            Self::Chat => "Chat",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }

    /// Accepts a path ("/chat") or a title ("chat").
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|r| {
            r.path() == input || r.title().eq_ignore_ascii_case(input.trim_start_matches('/'))
        })
    }
}

/// One-line nav bar with the active route bracketed.
pub fn render_nav(active: Route) -> String {
    Route::ALL
        .iter()
        .map(|r| {
            if *r == active {
                format!("[{}]", r.title())
            } else {
                r.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_age_menu(selected: Option<AgeBracket>) -> String {
    let mut lines = vec!["Select Your Age Category".to_string()];
    lines.extend(AgeBracket::ALL.iter().enumerate().map(|(i, b)| {
        let mark = if Some(*b) == selected { "*" } else { " " };
        format!("{mark} {}. {:<6} {}", i + 1, b.label(), b.description())
    }));
    lines.join("\n")
}

pub fn render_category_menu(selected: Option<ServiceCategory>) -> String {
    let mut lines = vec!["What Help Do You Need?".to_string()];
    lines.extend(ServiceCategory::selectable().enumerate().map(|(i, c)| {
        let mark = if Some(c) == selected { "*" } else { " " };
        format!("{mark} {:>2}. {}", i + 1, c.label())
    }));
    lines.join("\n")
}

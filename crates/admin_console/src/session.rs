//! Who is signed in and how output is drawn.
//!
//! Both are plain values built once at startup and handed to every page, so
//! pages never reach for globals.

use serde::{Deserialize, Serialize};

use crate::data::Role;

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name of the admin.
    pub admin: String,
    pub role: Role,
}

impl Session {
    /// Create a session for an admin account.
    #[must_use]
    pub fn new(admin: impl Into<String>) -> Self {
        Self {
            admin: admin.into(),
            role: Role::Admin,
        }
    }

    /// Header line shown above pages.
    #[must_use]
    pub fn banner(&self) -> String {
        format!("Signed in as {} ({})", self.admin, self.role.name())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("admin")
    }
}

/// Glyph set used by the text renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    /// Use box-drawing and arrow glyphs; plain ASCII otherwise.
    pub unicode: bool,
}

impl Theme {
    /// Unicode theme.
    #[must_use]
    pub fn unicode() -> Self {
        Self {
            name: "unicode".to_string(),
            unicode: true,
        }
    }

    /// ASCII-only theme for dumb terminals and logs.
    #[must_use]
    pub fn ascii() -> Self {
        Self {
            name: "ascii".to_string(),
            unicode: false,
        }
    }

    /// Resolve a theme by name, falling back to unicode.
    #[must_use]
    pub fn by_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("ascii") {
            Self::ascii()
        } else {
            Self::unicode()
        }
    }

    #[must_use]
    pub const fn ellipsis(&self) -> &'static str {
        if self.unicode { "…" } else { "~" }
    }

    #[must_use]
    pub const fn rule(&self) -> char {
        if self.unicode { '─' } else { '-' }
    }

    #[must_use]
    pub const fn separator(&self) -> &'static str {
        if self.unicode { " · " } else { " | " }
    }

    /// Sort arrow for a column header.
    #[must_use]
    pub const fn sort_indicator(&self, ascending: bool) -> &'static str {
        match (self.unicode, ascending) {
            (true, true) => "▲",
            (true, false) => "▼",
            (false, true) => "^",
            (false, false) => "v",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::unicode()
    }
}

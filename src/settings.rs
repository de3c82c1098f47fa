//! Per-deck styling overrides. Read-only input to every generator and renderer.

use serde::{Deserialize, Serialize};

use crate::color::darken;
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Brand color; `None` uses the theme's `primary`.
    pub primary_color: Option<String>,
    /// Accent for the second side of comparisons; `None` derives it from the primary.
    pub secondary_color: Option<String>,
    /// Overrides the theme font family.
    pub font_family: Option<String>,
    pub show_title_underline: bool,
    pub show_bottom_bar: bool,
    pub show_page_number: bool,
    /// Overrides the theme footer text.
    pub footer_text: Option<String>,
    /// Logo placed on the title slide.
    pub logo_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            primary_color: None,
            secondary_color: None,
            font_family: None,
            show_title_underline: true,
            show_bottom_bar: true,
            show_page_number: true,
            footer_text: None,
            logo_url: None,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn primary<'a>(&'a self, theme: &'a Theme) -> &'a str {
        self.primary_color
            .as_deref()
            .unwrap_or_else(|| theme.color("primary"))
    }

    pub fn secondary(&self, theme: &Theme) -> String {
        match &self.secondary_color {
            Some(color) => color.clone(),
            None => darken(self.primary(theme), 0.35),
        }
    }

    pub fn font_family<'a>(&'a self, theme: &'a Theme) -> &'a str {
        self.font_family.as_deref().unwrap_or(&theme.fonts.family)
    }

    pub fn footer_text<'a>(&'a self, theme: &'a Theme) -> &'a str {
        self.footer_text.as_deref().unwrap_or(&theme.footer_text)
    }
}

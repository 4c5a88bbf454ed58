use super::structure::Slide;
use crate::error::{DemoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four built-in looks. Uploaded templates are not inspected and
/// render as `Corporate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Corporate,
    Modern,
    Minimal,
    Creative,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Corporate,
        TemplateKind::Modern,
        TemplateKind::Minimal,
        TemplateKind::Creative,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TemplateKind::Corporate => "corporate",
            TemplateKind::Modern => "modern",
            TemplateKind::Minimal => "minimal",
            TemplateKind::Creative => "creative",
        }
    }

    /// Name shown for the sample template of this kind
    pub fn sample_name(&self) -> &'static str {
        match self {
            TemplateKind::Corporate => "Corporate Professional Template",
            TemplateKind::Modern => "Modern Minimalist Template",
            TemplateKind::Minimal => "Clean Minimal Template",
            TemplateKind::Creative => "Creative Design Template",
        }
    }

    /// Unknown keys fall back to corporate
    pub fn from_key_or_default(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }

    pub fn style(&self) -> TemplateStyle {
        match self {
            TemplateKind::Corporate => TemplateStyle {
                background: "#1e3a8a",
                title_color: "#ffffff",
                text_color: "#f1f5f9",
                accent_color: "#3b82f6",
                font: "Arial",
            },
            TemplateKind::Modern => TemplateStyle {
                background: "#0f172a",
                title_color: "#f8fafc",
                text_color: "#cbd5e1",
                accent_color: "#06b6d4",
                font: "Helvetica",
            },
            TemplateKind::Minimal => TemplateStyle {
                background: "#ffffff",
                title_color: "#1f2937",
                text_color: "#374151",
                accent_color: "#6366f1",
                font: "Calibri",
            },
            TemplateKind::Creative => TemplateStyle {
                background: "#7c3aed",
                title_color: "#fbbf24",
                text_color: "#f3f4f6",
                accent_color: "#f59e0b",
                font: "Comic Sans MS",
            },
        }
    }
}

impl FromStr for TemplateKind {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DemoError::InvalidTemplate(format!("Unknown sample template: {}", s)))
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Colors are `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateStyle {
    pub background: &'static str,
    pub title_color: &'static str,
    pub text_color: &'static str,
    pub accent_color: &'static str,
    pub font: &'static str,
}

impl Default for TemplateStyle {
    fn default() -> Self {
        TemplateKind::Corporate.style()
    }
}

/// Give every slide the same style
pub fn apply_style(slides: &mut [Slide], kind: TemplateKind) {
    let style = kind.style();
    for slide in slides.iter_mut() {
        slide.style = Some(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(TemplateKind::from_key_or_default("Modern"), TemplateKind::Modern);
        assert_eq!(TemplateKind::from_key_or_default("neon"), TemplateKind::Corporate);
        assert_eq!(TemplateKind::Creative.style().font, "Comic Sans MS");
        assert_eq!(TemplateStyle::default().background, "#1e3a8a");
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let err = "neon".parse::<TemplateKind>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TEMPLATE");
    }
}

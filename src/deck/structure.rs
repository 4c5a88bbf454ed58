use super::analysis::{clamp_slides, ContentAnalysis};
use super::style::TemplateStyle;
use serde::Serialize;
use std::fmt;

const TITLE_SUBTITLE: &str = "Generated from your content";
const TITLE_NOTES: &str =
    "Welcome to the presentation. This was generated from your text content.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    Bullet,
    TwoColumn,
    TitleContent,
    Comparison,
}

impl Layout {
    const CYCLE: [Layout; 4] = [
        Layout::Bullet,
        Layout::TwoColumn,
        Layout::TitleContent,
        Layout::Comparison,
    ];

    /// Layout of the content slide at `index` (1-based, title slide is 0)
    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Bullet => "bullet",
            Layout::TwoColumn => "two-column",
            Layout::TitleContent => "title-content",
            Layout::Comparison => "comparison",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    Content,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlideBody {
    Title { subtitle: String },
    Content { points: Vec<String>, layout: Layout },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub title: String,
    #[serde(flatten)]
    pub body: SlideBody,
    /// Empty when notes were not requested
    pub notes: String,
    pub style: Option<TemplateStyle>,
}

impl Slide {
    pub fn kind(&self) -> SlideKind {
        match self.body {
            SlideBody::Title { .. } => SlideKind::Title,
            SlideBody::Content { .. } => SlideKind::Content,
        }
    }

    pub fn points(&self) -> &[String] {
        match &self.body {
            SlideBody::Content { points, .. } => points,
            SlideBody::Title { .. } => &[],
        }
    }

    pub fn layout(&self) -> Option<Layout> {
        match self.body {
            SlideBody::Content { layout, .. } => Some(layout),
            SlideBody::Title { .. } => None,
        }
    }

    pub fn style_or_default(&self) -> TemplateStyle {
        self.style.unwrap_or_default()
    }
}

/// How many slides to build: the override clamped to range, else the estimate
pub fn resolve_slide_count(analysis: &ContentAnalysis, requested: Option<usize>) -> usize {
    match requested {
        Some(count) if count > 0 => clamp_slides(count),
        _ => clamp_slides(analysis.estimated_slides),
    }
}

pub fn presentation_title(analysis: &ContentAnalysis, guidance: &str) -> String {
    let guidance = guidance.trim();
    if !guidance.is_empty() {
        return format!("Presentation: {}", guidance);
    }
    analysis
        .topics
        .first()
        .map(|topic| topic.replacen("...", "", 1))
        .unwrap_or_else(|| "Your Content".to_string())
}

/// A title slide followed by `Key Point` slides sharing the key points evenly
pub fn build_slides(
    analysis: &ContentAnalysis,
    guidance: &str,
    requested: Option<usize>,
    generate_notes: bool,
) -> Vec<Slide> {
    let slide_count = resolve_slide_count(analysis, requested);
    let mut slides = Vec::with_capacity(slide_count);

    slides.push(Slide {
        title: presentation_title(analysis, guidance),
        body: SlideBody::Title {
            subtitle: TITLE_SUBTITLE.to_string(),
        },
        notes: if generate_notes {
            TITLE_NOTES.to_string()
        } else {
            String::new()
        },
        style: None,
    });

    let key_points = &analysis.key_points;
    let per_slide = key_points.len().div_ceil(slide_count - 1);

    for index in 1..slide_count {
        let start = ((index - 1) * per_slide).min(key_points.len());
        let end = (index * per_slide).min(key_points.len());
        let points = key_points[start..end].to_vec();

        let notes = if generate_notes {
            format!("This slide covers: {}", points.join("; "))
        } else {
            String::new()
        };

        slides.push(Slide {
            title: format!("Key Point {}", index),
            body: SlideBody::Content {
                points,
                layout: Layout::for_index(index),
            },
            notes,
            style: None,
        });
    }

    slides
}

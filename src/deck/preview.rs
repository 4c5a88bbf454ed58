use super::structure::{Slide, SlideBody};

/// Cursor over a deck's slides for text previews
#[derive(Debug, Clone)]
pub struct SlidePreview<'a> {
    slides: &'a [Slide],
    index: usize,
}

impl<'a> SlidePreview<'a> {
    pub fn new(slides: &'a [Slide]) -> Self {
        Self { slides, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'a Slide> {
        self.slides.get(self.index)
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.slides.len()
    }

    /// Stays on the last slide
    pub fn next(&mut self) -> Option<&'a Slide> {
        if self.has_next() {
            self.index += 1;
        }
        self.current()
    }

    /// Stays on the first slide
    pub fn previous(&mut self) -> Option<&'a Slide> {
        if self.has_previous() {
            self.index -= 1;
        }
        self.current()
    }

    pub fn render(&self) -> String {
        let Some(slide) = self.current() else {
            return "No slides to preview".to_string();
        };

        let mut lines = vec![
            format!("Slide {} of {}", self.index + 1, self.slides.len()),
            format!("## {}", slide.title),
        ];

        match &slide.body {
            SlideBody::Title { subtitle } => lines.push(subtitle.clone()),
            SlideBody::Content { points, .. } => {
                lines.extend(points.iter().map(|p| format!("• {}", p)));
                if !slide.notes.is_empty() {
                    lines.push(String::new());
                    lines.push(format!("Speaker Notes: {}", slide.notes));
                }
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::analysis::analyze_content;
    use crate::deck::structure::build_slides;

    #[test]
    fn test_navigation_saturates() {
        let analysis = analyze_content("One point that is long enough here. Another.", "");
        let slides = build_slides(&analysis, "", None, true);
        let mut preview = SlidePreview::new(&slides);

        assert!(!preview.has_previous());
        preview.previous();
        assert_eq!(preview.index(), 0);

        preview.next();
        preview.next();
        preview.next();
        assert_eq!(preview.index(), 2);
        assert!(!preview.has_next());
    }

    #[test]
    fn test_render() {
        let analysis = analyze_content("One point that is long enough here. Another.", "");
        let slides = build_slides(&analysis, "", None, true);
        let mut preview = SlidePreview::new(&slides);

        let title = preview.render();
        assert!(title.starts_with("Slide 1 of 3"));
        assert!(title.contains("Generated from your content"));
        assert!(!title.contains("Speaker Notes"));

        preview.next();
        let content = preview.render();
        assert!(content.contains("• One point that is long enough here"));
        assert!(content.contains("Speaker Notes: This slide covers:"));

        assert_eq!(SlidePreview::new(&[]).render(), "No slides to preview");
    }
}

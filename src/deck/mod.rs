//! Text-to-presentation wizard: content analysis, slide structure, template
//! styles and the `.pptx` writer.

pub mod analysis;
pub mod generator;
pub mod pptx;
pub mod preview;
pub mod provider;
pub mod structure;
pub mod style;
pub mod wizard;

pub use analysis::{analyze_content, ContentAnalysis, Tone};
pub use generator::{DeckGenerator, GeneratedPresentation, Stage};
pub use pptx::{render_presentation, DocumentProperties};
pub use preview::SlidePreview;
pub use provider::{analysis_from_response, Provider};
pub use structure::{build_slides, Layout, Slide, SlideBody, SlideKind};
pub use style::{apply_style, TemplateKind, TemplateStyle};
pub use wizard::{format_file_size, DeckInputs, DeckSession, SessionSummary, TemplateChoice};

use super::analysis::ContentAnalysis;
use super::generator::GeneratedPresentation;
use super::preview::SlidePreview;
use super::provider::Provider;
use super::structure::Slide;
use super::style::TemplateKind;
use crate::error::{DemoError, Result};
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const FIRST_STEP: u8 = 1;
pub const MAX_STEPS: u8 = 4;
/// Nominal size reported for the built-in templates
pub const SAMPLE_TEMPLATE_SIZE: u64 = 1_024_000;

const TEXT_REQUIRED: &str = "Please enter some text content to convert to slides.";
const API_KEY_REQUIRED: &str = "Please enter your API key to proceed.";
const TEMPLATE_REQUIRED: &str = "Please upload a template or select a sample template.";
const NOT_A_PRESENTATION: &str = "Please upload a PowerPoint file (.pptx or .potx)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateChoice {
    Sample(TemplateKind),
    /// A user file; only its name and size are looked at
    Uploaded { name: String, size: u64 },
}

impl TemplateChoice {
    pub fn name(&self) -> &str {
        match self {
            TemplateChoice::Sample(kind) => kind.sample_name(),
            TemplateChoice::Uploaded { name, .. } => name,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            TemplateChoice::Sample(_) => SAMPLE_TEMPLATE_SIZE,
            TemplateChoice::Uploaded { size, .. } => *size,
        }
    }

    /// Style used for rendering; uploads get the corporate look
    pub fn kind(&self) -> TemplateKind {
        match self {
            TemplateChoice::Sample(kind) => *kind,
            TemplateChoice::Uploaded { .. } => TemplateKind::default(),
        }
    }

    pub fn is_sample(&self) -> bool {
        matches!(self, TemplateChoice::Sample(_))
    }

    pub fn describe(&self) -> String {
        if self.is_sample() {
            format!("{} (Sample Template)", self.name())
        } else {
            format!("{} (Size: {})", self.name(), format_file_size(self.size()))
        }
    }
}

/// Form fields collected across the wizard steps
#[derive(Debug, Clone, Default)]
pub struct DeckInputs {
    pub text: String,
    pub guidance: String,
    pub provider: Provider,
    pub api_key: String,
    /// Explicit slide count; clamped when the deck is built
    pub slide_count: Option<usize>,
    pub generate_notes: bool,
    /// A provider answer to analyze instead of the local heuristics
    pub provider_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub content: String,
    pub provider: String,
    pub template: String,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Content:  {}", self.content)?;
        writeln!(f, "AI:       {}", self.provider)?;
        write!(f, "Template: {}", self.template)
    }
}

/// State of one run through the four-step wizard: content, AI settings,
/// template, generate.
#[derive(Debug)]
pub struct DeckSession {
    step: u8,
    pub inputs: DeckInputs,
    template: Option<TemplateChoice>,
    pub(crate) analysis: Option<ContentAnalysis>,
    pub(crate) slides: Vec<Slide>,
    pub(crate) presentation: Option<GeneratedPresentation>,
}

impl Default for DeckSession {
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            inputs: DeckInputs::default(),
            template: None,
            analysis: None,
            slides: Vec::new(),
            presentation: None,
        }
    }
}

impl DeckSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> u8 {
        self.step
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.inputs.text = text.into();
    }

    pub fn set_guidance(&mut self, guidance: impl Into<String>) {
        self.inputs.guidance = guidance.into();
    }

    pub fn set_provider(&mut self, provider: Provider) {
        self.inputs.provider = provider;
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.inputs.api_key = api_key.into();
    }

    pub fn set_slide_count(&mut self, slide_count: Option<usize>) {
        self.inputs.slide_count = slide_count;
    }

    pub fn set_generate_notes(&mut self, generate_notes: bool) {
        self.inputs.generate_notes = generate_notes;
    }

    pub fn set_provider_response(&mut self, response: Option<String>) {
        self.inputs.provider_response = response;
    }

    pub fn char_count(&self) -> usize {
        self.inputs.text.chars().count()
    }

    pub fn template(&self) -> Option<&TemplateChoice> {
        self.template.as_ref()
    }

    pub fn select_sample_template(&mut self, kind: TemplateKind) {
        debug!(target: "agent_deck::deck", template = %kind, "Sample template selected");
        self.template = Some(TemplateChoice::Sample(kind));
    }

    /// Accept an uploaded template by file name. Anything but `.pptx` or
    /// `.potx` is refused and the current choice is kept.
    pub fn upload_template(&mut self, name: &str, size: u64) -> Result<()> {
        let lower = name.to_lowercase();
        if !(lower.ends_with(".pptx") || lower.ends_with(".potx")) {
            return Err(DemoError::InvalidTemplate(NOT_A_PRESENTATION.to_string()));
        }
        self.template = Some(TemplateChoice::Uploaded {
            name: name.to_string(),
            size,
        });
        Ok(())
    }

    pub fn upload_template_file(&mut self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DemoError::InvalidTemplate(NOT_A_PRESENTATION.to_string()))?
            .to_string();
        let lower = name.to_lowercase();
        if !(lower.ends_with(".pptx") || lower.ends_with(".potx")) {
            return Err(DemoError::InvalidTemplate(NOT_A_PRESENTATION.to_string()));
        }
        let size = std::fs::metadata(path)?.len();
        self.upload_template(&name, size)
    }

    /// Check the fields a step requires before leaving it
    pub fn validate_step(&self, step: u8) -> Result<()> {
        let missing = match step {
            1 if self.inputs.text.trim().is_empty() => Some(TEXT_REQUIRED),
            2 if self.inputs.api_key.trim().is_empty() => Some(API_KEY_REQUIRED),
            3 if self.template.is_none() => Some(TEMPLATE_REQUIRED),
            _ => None,
        };
        match missing {
            Some(message) => Err(DemoError::StepValidation {
                step,
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Move forward to `step`; skipping ahead or leaving an incomplete step
    /// is refused.
    pub fn next_step(&mut self, step: u8) -> Result<()> {
        if !(FIRST_STEP..=MAX_STEPS).contains(&step) || step > self.step + 1 {
            return Err(DemoError::StepValidation {
                step: self.step,
                message: format!("Cannot jump from step {} to step {}", self.step, step),
            });
        }
        self.validate_step(self.step)?;
        self.step = step;
        Ok(())
    }

    pub fn prev_step(&mut self, step: u8) {
        self.step = step.clamp(FIRST_STEP, MAX_STEPS);
    }

    /// Every step before generation is complete
    pub fn ready_to_generate(&self) -> Result<()> {
        (FIRST_STEP..MAX_STEPS).try_for_each(|step| self.validate_step(step))
    }

    pub fn analysis(&self) -> Option<&ContentAnalysis> {
        self.analysis.as_ref()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn presentation(&self) -> Option<&GeneratedPresentation> {
        self.presentation.as_ref()
    }

    pub fn preview(&self) -> SlidePreview<'_> {
        SlidePreview::new(&self.slides)
    }

    /// Back to step 1 with every input and result cleared
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn summary(&self) -> SessionSummary {
        let chars = self.char_count();
        SessionSummary {
            content: if chars > 0 {
                format!("{} characters", chars)
            } else {
                "No content yet".to_string()
            },
            provider: self.inputs.provider.display_name().to_string(),
            template: self
                .template
                .as_ref()
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| "No template selected".to_string()),
        }
    }
}

/// `1536` -> `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_validation_messages() {
        let mut session = DeckSession::new();
        let err = session.next_step(2).unwrap_err();
        assert!(err.to_string().contains(TEXT_REQUIRED));

        session.set_text("Some content");
        session.next_step(2).unwrap();

        let err = session.next_step(3).unwrap_err();
        assert!(matches!(err, DemoError::StepValidation { step: 2, .. }));

        session.set_api_key("sk-test");
        session.next_step(3).unwrap();
        assert!(session.next_step(4).is_err());

        session.select_sample_template(TemplateKind::Minimal);
        session.next_step(4).unwrap();
        assert_eq!(session.current_step(), 4);
    }

    #[test]
    fn test_cannot_skip_ahead() {
        let mut session = DeckSession::new();
        session.set_text("Some content");
        assert!(session.next_step(3).is_err());
        assert_eq!(session.current_step(), 1);

        let err = session.next_step(0).unwrap_err();
        assert!(matches!(err, DemoError::StepValidation { step: 1, .. }));
        assert_eq!(session.current_step(), 1);

        session.next_step(2).unwrap();
        session.set_api_key("sk-test");
        session.select_sample_template(TemplateKind::Corporate);
        session.next_step(3).unwrap();
        session.next_step(4).unwrap();
        assert!(session.next_step(5).is_err());
        assert_eq!(session.current_step(), 4);
    }

    #[test]
    fn test_prev_step_is_unconditional() {
        let mut session = DeckSession::new();
        session.set_text("text");
        session.next_step(2).unwrap();
        session.prev_step(1);
        assert_eq!(session.current_step(), 1);
        session.prev_step(0);
        assert_eq!(session.current_step(), 1);
    }

    #[test]
    fn test_upload_extension_check() {
        let mut session = DeckSession::new();
        assert!(session.upload_template("brand.PPTX", 2048).is_ok());
        assert!(session.upload_template("brand.potx", 2048).is_ok());

        let err = session.upload_template("brand.key", 10).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid template: {}", NOT_A_PRESENTATION));
        assert_eq!(session.template().map(|t| t.name()), Some("brand.potx"));
        assert_eq!(session.template().map(|t| t.kind()), Some(TemplateKind::Corporate));
    }

    #[test]
    fn test_summary() {
        let mut session = DeckSession::new();
        assert_eq!(session.summary().content, "No content yet");
        assert_eq!(session.summary().template, "No template selected");

        session.set_text("héllo");
        session.set_provider(Provider::Google);
        session.select_sample_template(TemplateKind::Creative);
        let summary = session.summary();
        assert_eq!(summary.content, "5 characters");
        assert_eq!(summary.provider, "Google (Gemini)");
        assert_eq!(summary.template, "Creative Design Template");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(SAMPLE_TEMPLATE_SIZE), "1000 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}

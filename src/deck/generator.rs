use super::analysis::analyze_content;
use super::pptx::{render_presentation, DocumentProperties};
use super::provider::analysis_from_response;
use super::structure::build_slides;
use super::style::apply_style;
use super::wizard::DeckSession;
use crate::error::{DemoError, Result};
use crate::services::pacing::{jittered, SharedPacer};
use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

const STAGE_BASE_MS: u64 = 1500;
const STAGE_JITTER_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Analyze,
    Structure,
    Template,
    Generate,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Analyze,
        Stage::Structure,
        Stage::Template,
        Stage::Generate,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            Stage::Analyze => "Analyzing your content...",
            Stage::Structure => "Creating slide structure...",
            Stage::Template => "Applying template style...",
            Stage::Generate => "Generating final presentation...",
        }
    }

    pub fn percent(&self) -> u8 {
        match self {
            Stage::Analyze => 25,
            Stage::Structure => 50,
            Stage::Template => 75,
            Stage::Generate => 100,
        }
    }
}

/// A rendered deck held in memory until it is saved
#[derive(Debug, Clone)]
pub struct GeneratedPresentation {
    pub file_name: String,
    pub slide_count: usize,
    pub bytes: Vec<u8>,
}

impl GeneratedPresentation {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Write the file into `dir`, creating it if needed
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(target: "agent_deck::deck", path = %path.display(), "Presentation saved");
        Ok(path)
    }
}

pub fn presentation_file_name() -> String {
    format!("presentation_{}.pptx", Utc::now().timestamp_millis())
}

/// Runs the four paced stages that turn a completed wizard session into a deck
#[derive(Debug)]
pub struct DeckGenerator {
    pacer: SharedPacer,
    rng: StdRng,
}

impl DeckGenerator {
    pub fn new(pacer: SharedPacer) -> Self {
        Self {
            pacer,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub async fn generate<'s>(
        &mut self,
        session: &'s mut DeckSession,
    ) -> Result<&'s GeneratedPresentation> {
        self.generate_with_progress(session, |_| {}).await
    }

    /// Generate, calling `on_stage` as each stage starts. A failure leaves the
    /// session without a presentation.
    pub async fn generate_with_progress<'s, F>(
        &mut self,
        session: &'s mut DeckSession,
        mut on_stage: F,
    ) -> Result<&'s GeneratedPresentation>
    where
        F: FnMut(Stage),
    {
        session.ready_to_generate()?;
        session.presentation = None;
        let start = Instant::now();

        match self.run_stages(session, &mut on_stage).await {
            Ok(presentation) => {
                info!(
                    target: "agent_deck::deck",
                    file = %presentation.file_name,
                    slides = presentation.slide_count,
                    bytes = presentation.size(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Presentation generated"
                );
                Ok(&*session.presentation.insert(presentation))
            }
            Err(e) => {
                error!(target: "agent_deck::deck", error = %e, "Failed to generate presentation");
                Err(e)
            }
        }
    }

    async fn enter(&mut self, stage: Stage, on_stage: &mut impl FnMut(Stage)) {
        info!(
            target: "agent_deck::deck",
            percent = stage.percent(),
            "{}",
            stage.message()
        );
        on_stage(stage);
        let pause = jittered(STAGE_BASE_MS, STAGE_JITTER_MS, &mut self.rng);
        self.pacer.pause(pause).await;
    }

    async fn run_stages<F>(
        &mut self,
        session: &mut DeckSession,
        on_stage: &mut F,
    ) -> Result<GeneratedPresentation>
    where
        F: FnMut(Stage),
    {
        self.enter(Stage::Analyze, on_stage).await;
        let inputs = &session.inputs;
        let analysis = match &inputs.provider_response {
            Some(response) => analysis_from_response(response, &inputs.text, &inputs.guidance),
            None => {
                inputs.provider.announce_call(&inputs.api_key);
                analyze_content(&inputs.text, &inputs.guidance)
            }
        };

        self.enter(Stage::Structure, on_stage).await;
        let mut slides = build_slides(
            &analysis,
            &inputs.guidance,
            inputs.slide_count,
            inputs.generate_notes,
        );
        session.analysis = Some(analysis);

        self.enter(Stage::Template, on_stage).await;
        let kind = session
            .template()
            .map(|t| t.kind())
            .ok_or_else(|| DemoError::Generation("No template selected".to_string()))?;
        apply_style(&mut slides, kind);

        self.enter(Stage::Generate, on_stage).await;
        let props = DocumentProperties::for_slides(&slides);
        let bytes = render_presentation(&slides, &props)?;
        let slide_count = slides.len();
        session.slides = slides;

        Ok(GeneratedPresentation {
            file_name: presentation_file_name(),
            slide_count,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::style::TemplateKind;
    use crate::services::pacing::pacer_for;

    fn ready_session() -> DeckSession {
        let mut session = DeckSession::new();
        session.set_text("Our product shortens release cycles. Teams ship twice as often with it.");
        session.set_api_key("short");
        session.select_sample_template(TemplateKind::Minimal);
        session
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let mut generator = DeckGenerator::new(pacer_for(false)).with_seed(1);
        let mut session = ready_session();
        let mut seen = Vec::new();

        let presentation = generator
            .generate_with_progress(&mut session, |stage| seen.push(stage.percent()))
            .await
            .unwrap();

        assert_eq!(presentation.slide_count, 3);
        assert!(presentation.file_name.starts_with("presentation_"));
        assert!(presentation.file_name.ends_with(".pptx"));
        assert_eq!(seen, vec![25, 50, 75, 100]);
        assert_eq!(session.slides().len(), 3);
        assert!(session.analysis().is_some());
    }

    #[tokio::test]
    async fn test_incomplete_session_is_refused() {
        let mut generator = DeckGenerator::new(pacer_for(false));
        let mut session = DeckSession::new();
        session.set_text("content");

        let err = generator.generate(&mut session).await.unwrap_err();
        assert!(matches!(err, DemoError::StepValidation { step: 2, .. }));
        assert!(session.presentation().is_none());
    }
}

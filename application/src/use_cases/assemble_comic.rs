//! Assemble Comic use case
//!
//! Orchestrates one submission: identify the expert, generate the script,
//! then illustrate every panel concurrently and merge each image into the
//! comic as it arrives.

use crate::config::GenerationParams;
use crate::generation::{GenerationClient, GenerationError};
use crate::ports::generation_gateway::GenerationGateway;
use crate::ports::progress::{ComicEventSink, NoEvents};
use comic_domain::{
    AudienceLevel, ComicDocument, ComicEvent, DomainError, Expert, ImageDataUri, ProgressCaption,
    Question,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, warn};

/// Errors that can occur while assembling a comic
#[derive(Error, Debug)]
pub enum AssembleComicError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Failed to draw a comic panel.")]
    IllustrationLost { index: usize },

    #[error("Failed to draw a comic panel.")]
    Merge {
        index: usize,
        #[source]
        source: DomainError,
    },
}

/// Input for the AssembleComic use case
#[derive(Debug, Clone)]
pub struct AssembleComicInput {
    pub question: Question,
    pub audience: AudienceLevel,
}

impl AssembleComicInput {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            audience: AudienceLevel::default(),
        }
    }

    pub fn with_audience(mut self, audience: AudienceLevel) -> Self {
        self.audience = audience;
        self
    }
}

/// A finished comic: every panel has its image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledComic {
    pub expert: Expert,
    pub comic: ComicDocument,
}

/// Message from an illustration task to the merge loop
enum PanelUpdate {
    Drawing(usize),
    Drawn(usize, Result<ImageDataUri, GenerationError>),
}

/// Use case for assembling a comic from a question
pub struct AssembleComicUseCase<G: GenerationGateway + 'static> {
    client: Arc<GenerationClient<G>>,
}

impl<G: GenerationGateway + 'static> AssembleComicUseCase<G> {
    pub fn new(gateway: Arc<G>, params: GenerationParams) -> Self {
        Self {
            client: Arc::new(GenerationClient::new(gateway, params)),
        }
    }

    pub fn params(&self) -> &GenerationParams {
        self.client.params()
    }

    /// Execute the use case without progress events
    pub async fn execute(
        &self,
        input: AssembleComicInput,
    ) -> Result<AssembledComic, AssembleComicError> {
        self.execute_with_events(input, &NoEvents).await
    }

    /// Execute the use case, reporting each step to `sink`
    pub async fn execute_with_events(
        &self,
        input: AssembleComicInput,
        sink: &dyn ComicEventSink,
    ) -> Result<AssembledComic, AssembleComicError> {
        info!("Assembling comic for: {}", input.question);

        // Stage 1: Identify
        sink.emit(ComicEvent::Progress(ProgressCaption::finding_expert()));
        let expert = self.client.identify_expert(&input.question).await?;
        info!("Expert identified: {}", expert.name);
        sink.emit(ComicEvent::ExpertIdentified(expert.clone()));

        // Stage 2: Script
        sink.emit(ComicEvent::Progress(ProgressCaption::crafting_story(
            &expert.name,
        )));
        let mut comic = self
            .client
            .generate_script(&input.question, &input.audience, &expert.name)
            .await?;
        info!(
            "Script ready: \"{}\" with {} panels",
            comic.title(),
            comic.panel_count()
        );
        sink.emit(ComicEvent::ScriptReady(comic.clone()));

        // Stage 3: Illustrate
        self.illustrate(&mut comic, &expert, &input.audience, sink)
            .await?;

        // Stage 4: Complete
        sink.emit(ComicEvent::Progress(ProgressCaption::finalizing()));
        info!("All {} panels illustrated", comic.panel_count());
        Ok(AssembledComic { expert, comic })
    }

    /// Fan out one image call per panel, then merge results by index as they
    /// arrive. The first failure ends the stage; tasks still running are
    /// left to finish and their results are dropped.
    async fn illustrate(
        &self,
        comic: &mut ComicDocument,
        expert: &Expert,
        audience: &AudienceLevel,
        sink: &dyn ComicEventSink,
    ) -> Result<(), AssembleComicError> {
        let total = comic.panel_count();
        let limiter = self
            .client
            .params()
            .max_concurrent_images
            .map(|limit| Arc::new(Semaphore::new(limit)));
        info!(
            "Illustrating {} panels (limit: {})",
            total,
            limiter
                .as_ref()
                .map_or("none".to_string(), |s| s.available_permits().to_string())
        );

        let (tx, mut rx) = mpsc::unbounded_channel();

        for (index, panel) in comic.panels().iter().enumerate() {
            let client = Arc::clone(&self.client);
            let limiter = limiter.clone();
            let tx = tx.clone();
            let description = panel.description.clone();
            let audience = audience.clone();
            let expert_description = expert.description.clone();

            // Detached: dropping the handle does not abort the call.
            tokio::spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                if tx.send(PanelUpdate::Drawing(index)).is_err() {
                    debug!("Panel {} abandoned before drawing", index + 1);
                    return;
                }
                let result = client
                    .generate_panel_image(&description, &audience, &expert_description)
                    .await;
                // Receiver is gone once the stage has been decided.
                let _ = tx.send(PanelUpdate::Drawn(index, result));
            });
        }
        drop(tx);

        let mut remaining = total;
        while remaining > 0 {
            let Some(update) = rx.recv().await else {
                let index = (0..total)
                    .find(|i| !comic.panels()[*i].has_image())
                    .unwrap_or_default();
                warn!("Illustration task for panel {} ended without a result", index + 1);
                return Err(AssembleComicError::IllustrationLost { index });
            };

            match update {
                PanelUpdate::Drawing(index) => {
                    sink.emit(ComicEvent::Progress(ProgressCaption::drawing_panel(
                        index, total,
                    )));
                }
                PanelUpdate::Drawn(index, Ok(image)) => {
                    comic
                        .attach_image(index, image.clone())
                        .map_err(|source| {
                            warn!("Panel {} could not be merged: {}", index + 1, source);
                            AssembleComicError::Merge { index, source }
                        })?;
                    remaining -= 1;
                    info!("Panel {} of {} drawn", index + 1, total);
                    sink.emit(ComicEvent::PanelIllustrated { index, image });
                }
                PanelUpdate::Drawn(index, Err(e)) => {
                    warn!("Panel {} failed at {}: {}", index + 1, e.stage(), e.cause());
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::FailureCause;
    use crate::ports::generation_gateway::{GatewayError, ResponsePart};
    use async_trait::async_trait;
    use comic_domain::Model;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    const EXPERT_JSON: &str =
        r#"{"name": "Carl Sagan", "description": "a smiling astronomer in a turtleneck"}"#;

    fn script_json(panels: usize) -> String {
        let panels: Vec<String> = (0..panels)
            .map(|i| {
                format!(
                    r#"{{"scene": {}, "description": "desc-{}", "narration": "caption {}"}}"#,
                    i + 1,
                    i,
                    i
                )
            })
            .collect();
        format!(
            r#"{{"title": "The Blue Sky", "panels": [{}], "summary": "Light scatters."}}"#,
            panels.join(",")
        )
    }

    #[derive(Clone)]
    struct ImagePlan {
        delay_ms: u64,
        fail: bool,
    }

    struct ScriptedGateway {
        expert: Result<String, GatewayError>,
        script: Result<String, GatewayError>,
        images: HashMap<usize, ImagePlan>,
        expert_calls: AtomicUsize,
        script_calls: AtomicUsize,
        image_calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        image_prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(panels: usize) -> Self {
            Self {
                expert: Ok(EXPERT_JSON.to_string()),
                script: Ok(script_json(panels)),
                images: HashMap::new(),
                expert_calls: AtomicUsize::new(0),
                script_calls: AtomicUsize::new(0),
                image_calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                image_prompts: Mutex::new(Vec::new()),
            }
        }

        fn with_expert(mut self, result: Result<String, GatewayError>) -> Self {
            self.expert = result;
            self
        }

        fn with_script(mut self, result: Result<String, GatewayError>) -> Self {
            self.script = result;
            self
        }

        fn with_image(mut self, index: usize, delay_ms: u64, fail: bool) -> Self {
            self.images.insert(index, ImagePlan { delay_ms, fail });
            self
        }

        fn panel_index(prompt: &str) -> usize {
            let start = prompt.find("desc-").expect("panel marker") + "desc-".len();
            prompt[start..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse()
                .expect("panel index")
        }
    }

    #[async_trait]
    impl GenerationGateway for ScriptedGateway {
        async fn generate_structured(
            &self,
            _model: &Model,
            _prompt: &str,
            schema: &serde_json::Value,
        ) -> Result<String, GatewayError> {
            if schema["properties"].get("panels").is_some() {
                self.script_calls.fetch_add(1, Ordering::SeqCst);
                self.script.clone()
            } else {
                self.expert_calls.fetch_add(1, Ordering::SeqCst);
                self.expert.clone()
            }
        }

        async fn generate_image(
            &self,
            _model: &Model,
            prompt: &str,
        ) -> Result<Vec<ResponsePart>, GatewayError> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            self.image_prompts.lock().unwrap().push(prompt.to_string());
            let index = Self::panel_index(prompt);
            let plan = self.images.get(&index).cloned().unwrap_or(ImagePlan {
                delay_ms: 10,
                fail: false,
            });

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(plan.delay_ms)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if plan.fail {
                return Err(GatewayError::HttpStatus {
                    status: 500,
                    message: "internal".to_string(),
                });
            }
            Ok(vec![
                ResponsePart::Text("panel".to_string()),
                ResponsePart::InlineData {
                    mime_type: "image/png".to_string(),
                    data: format!("IMG{}", index),
                },
            ])
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<ComicEvent>>,
    }

    impl ComicEventSink for RecordingSink {
        fn emit(&self, event: ComicEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl RecordingSink {
        fn events(&self) -> Vec<ComicEvent> {
            self.events.lock().unwrap().clone()
        }

        fn illustrated_order(&self) -> Vec<usize> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    ComicEvent::PanelIllustrated { index, .. } => Some(index),
                    _ => None,
                })
                .collect()
        }
    }

    fn input() -> AssembleComicInput {
        AssembleComicInput::new(Question::try_new("Why is the sky blue?").unwrap())
    }

    fn use_case(
        gateway: ScriptedGateway,
        params: GenerationParams,
    ) -> (AssembleComicUseCase<ScriptedGateway>, Arc<ScriptedGateway>) {
        let gateway = Arc::new(gateway);
        (
            AssembleComicUseCase::new(Arc::clone(&gateway), params),
            gateway,
        )
    }

    // ==================== Success Path ====================

    #[tokio::test(start_paused = true)]
    async fn test_four_panels_all_illustrated() {
        let (use_case, gateway) = use_case(ScriptedGateway::new(4), GenerationParams::default());
        let sink = RecordingSink::default();

        let result = use_case.execute_with_events(input(), &sink).await.unwrap();

        assert_eq!(result.expert.name, "Carl Sagan");
        assert_eq!(result.comic.panel_count(), 4);
        assert!(result.comic.is_complete());
        for panel in result.comic.panels() {
            assert!(panel.image_url().unwrap().to_string().starts_with("data:"));
        }
        assert_eq!(gateway.image_calls.load(Ordering::SeqCst), 4);

        let events = sink.events();
        assert_eq!(
            events[0],
            ComicEvent::Progress("Finding the perfect expert guide...".to_string())
        );
        assert!(matches!(events[1], ComicEvent::ExpertIdentified(_)));
        assert_eq!(
            events[2],
            ComicEvent::Progress("Crafting your story with Carl Sagan...".to_string())
        );
        assert!(matches!(events[3], ComicEvent::ScriptReady(ref c) if c.illustrated_count() == 0));
        assert_eq!(
            events.last(),
            Some(&ComicEvent::Progress("Finalizing your comic!".to_string()))
        );
        let drawing: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ComicEvent::Progress(c) if c.starts_with("Drawing panel")))
            .collect();
        assert_eq!(drawing.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_merge_targets_own_panel_regardless_of_arrival() {
        let gateway = ScriptedGateway::new(4)
            .with_image(0, 40, false)
            .with_image(1, 30, false)
            .with_image(2, 20, false)
            .with_image(3, 10, false);
        let (use_case, _) = use_case(gateway, GenerationParams::default());
        let sink = RecordingSink::default();

        let result = use_case.execute_with_events(input(), &sink).await.unwrap();

        assert_eq!(sink.illustrated_order(), vec![3, 2, 1, 0]);
        for (i, panel) in result.comic.panels().iter().enumerate() {
            assert_eq!(panel.image_url().unwrap().payload(), format!("IMG{}", i));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_image_prompts_carry_expert_description() {
        let (use_case, gateway) = use_case(ScriptedGateway::new(2), GenerationParams::default());

        use_case.execute(input()).await.unwrap();

        let prompts = gateway.image_prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(
            prompts
                .iter()
                .all(|p| p.contains("a smiling astronomer in a turtleneck"))
        );
    }

    // ==================== Failure Paths ====================

    #[tokio::test(start_paused = true)]
    async fn test_expert_failure_stops_pipeline() {
        let gateway = ScriptedGateway::new(4).with_expert(Err(GatewayError::Timeout));
        let (use_case, gateway) = use_case(gateway, GenerationParams::default());

        let err = use_case.execute(input()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Could not identify a suitable expert for this topic."
        );
        assert_eq!(gateway.script_calls.load(Ordering::SeqCst), 0);
        assert_eq!(gateway.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_script_failure_skips_images() {
        let gateway = ScriptedGateway::new(4)
            .with_script(Err(GatewayError::ConnectionError("reset".to_string())));
        let (use_case, gateway) = use_case(gateway, GenerationParams::default());
        let sink = RecordingSink::default();

        let err = use_case.execute_with_events(input(), &sink).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to generate the comic's story. The model might be unable to process this request."
        );
        assert_eq!(gateway.image_calls.load(Ordering::SeqCst), 0);
        assert!(
            !sink
                .events()
                .iter()
                .any(|e| matches!(e, ComicEvent::ScriptReady(_)))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_panel_script_fails_like_error() {
        let (use_case, gateway) = use_case(ScriptedGateway::new(0), GenerationParams::default());

        let err = use_case.execute(input()).await.unwrap_err();

        assert!(matches!(
            err,
            AssembleComicError::Generation(GenerationError::ScriptGeneration(
                FailureCause::NoPanels
            ))
        ));
        assert_eq!(gateway.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_failed_image_fails_whole_comic() {
        let gateway = ScriptedGateway::new(4)
            .with_image(0, 5, false)
            .with_image(1, 5, false)
            .with_image(2, 5, false)
            .with_image(3, 50, true);
        let (use_case, _) = use_case(gateway, GenerationParams::default());
        let sink = RecordingSink::default();

        let err = use_case.execute_with_events(input(), &sink).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to draw a comic panel.");
        assert_eq!(sink.illustrated_order().len(), 3);
        assert!(
            !sink
                .events()
                .iter()
                .any(|e| *e == ComicEvent::Progress("Finalizing your comic!".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_failure_does_not_wait_for_slow_panels() {
        let gateway = ScriptedGateway::new(4)
            .with_image(0, 1, true)
            .with_image(1, 10_000, false)
            .with_image(2, 10_000, false)
            .with_image(3, 10_000, false);
        let (use_case, _) = use_case(gateway, GenerationParams::default());

        let started = tokio::time::Instant::now();
        let err = use_case.execute(input()).await.unwrap_err();

        assert!(matches!(
            err,
            AssembleComicError::Generation(GenerationError::ImageGeneration(_))
        ));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    // ==================== Concurrency Limit ====================

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_fires_all_panels_at_once() {
        let (use_case, gateway) = use_case(ScriptedGateway::new(4), GenerationParams::default());

        use_case.execute(input()).await.unwrap();

        assert_eq!(gateway.max_in_flight.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_limit_bounds_in_flight_images() {
        let params = GenerationParams::default().with_max_concurrent_images(Some(2));
        let (use_case, gateway) = use_case(ScriptedGateway::new(4), params);

        let result = use_case.execute(input()).await.unwrap();

        assert!(result.comic.is_complete());
        assert_eq!(gateway.image_calls.load(Ordering::SeqCst), 4);
        assert_eq!(gateway.max_in_flight.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_every_failure_shows_a_fixed_message() {
        let merge = AssembleComicError::Merge {
            index: 5,
            source: DomainError::PanelOutOfRange { index: 5, len: 4 },
        };
        let lost = AssembleComicError::IllustrationLost { index: 1 };

        assert_eq!(merge.to_string(), "Failed to draw a comic panel.");
        assert_eq!(lost.to_string(), "Failed to draw a comic panel.");

        let source = std::error::Error::source(&merge).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Panel index 5 out of range (comic has 4 panels)")
        );
    }
}

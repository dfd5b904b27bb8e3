//! The translation pipeline: extract, segment, translate, lay out,
//! emit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::layout::{self, LayoutOptions};
use crate::segment::{self, PARAGRAPH_SEPARATOR};
use crate::translate::Translator;
use crate::{Config, PageRenderer, PipelineError, TextExtractor};

/// Title drawn at the top of the first generated page.
pub const HEADER_TEXT: &str = "Translated Document";

/// A successfully translated document plus per-request metadata.
/// The metadata is for logging; only the bytes reach the caller.
#[derive(Debug)]
pub struct TranslatedDocument {
    pub bytes: Vec<u8>,
    pub segments: usize,
    pub pages: usize,
    pub elapsed: Duration,
}

/// Sequences extraction, segmentation, translation, layout and
/// emission for one request.
///
/// Constructed once at startup and shared read-only across requests;
/// all per-request state lives in [`translate_document`]'s locals.
///
/// [`translate_document`]: Pipeline::translate_document
pub struct Pipeline {
    extractor: Arc<dyn TextExtractor>,
    translator: Arc<dyn Translator>,
    renderer: Arc<dyn PageRenderer>,
    client: reqwest::Client,
    config: Config,
    layout: LayoutOptions,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        translator: Arc<dyn Translator>,
        renderer: Arc<dyn PageRenderer>,
        config: Config,
    ) -> Self {
        Self {
            extractor,
            translator,
            renderer,
            client: reqwest::Client::new(),
            config,
            layout: LayoutOptions::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate an uploaded PDF into a freshly typeset one.
    ///
    /// Every failure is terminal for the request: no retries, no
    /// partial output, and no substitute content when extraction
    /// fails.
    pub async fn translate_document(
        &self,
        pdf_bytes: Vec<u8>,
    ) -> Result<TranslatedDocument, PipelineError> {
        let started = Instant::now();

        if pdf_bytes.is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        if self.config.api_key.is_none() {
            return Err(PipelineError::Configuration);
        }

        let text = self.extract_text(pdf_bytes).await?;
        if text.trim().chars().count() < self.config.min_text_chars {
            return Err(PipelineError::Extraction(
                "no usable text found in the document".to_string(),
            ));
        }
        debug!(chars = text.chars().count(), "extracted text");

        let segments = segment::segment(&text, self.config.max_segment_chars);
        info!(segments = segments.len(), "segmented document");

        // Sequential by design: join order must match segment order,
        // and the provider calls are the only suspension points.
        let mut translated = Vec::with_capacity(segments.len());
        for (index, piece) in segments.iter().enumerate() {
            let result = self
                .translator
                .translate(
                    piece,
                    &self.config.target_lang,
                    &self.client,
                    self.config.request_timeout,
                )
                .await
                .map_err(|e| {
                    PipelineError::Translation(format!(
                        "{} failed on segment {}/{}: {}",
                        self.translator.name(),
                        index + 1,
                        segments.len(),
                        e
                    ))
                })?;
            translated.push(result);
        }

        let joined = translated.join(PARAGRAPH_SEPARATOR);
        let lines = layout::wrap_text(&joined, self.layout.body_width(), self.layout.font_size);
        let footer = format!("Translated on {}", chrono::Local::now().format("%Y-%m-%d"));
        let pages = layout::paginate(&lines, HEADER_TEXT, &footer, &self.layout);

        let bytes = self
            .renderer
            .render(&pages)
            .map_err(PipelineError::Emission)?;

        let elapsed = started.elapsed();
        info!(
            pages = pages.len(),
            bytes = bytes.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "translation complete"
        );

        Ok(TranslatedDocument {
            bytes,
            segments: segments.len(),
            pages: pages.len(),
            elapsed,
        })
    }

    /// Extraction is CPU-bound parsing; run it off the async runtime.
    async fn extract_text(&self, pdf_bytes: Vec<u8>) -> Result<String, PipelineError> {
        let extractor = Arc::clone(&self.extractor);
        tokio::task::spawn_blocking(move || extractor.extract(&pdf_bytes))
            .await
            .map_err(|e| PipelineError::Extraction(e.to_string()))?
            .map_err(PipelineError::Extraction)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::layout::Page;
    use crate::translate::{MockResponse, MockTranslator};

    struct StaticExtractor(Result<String, String>);

    impl TextExtractor for StaticExtractor {
        fn extract(&self, _pdf_bytes: &[u8]) -> Result<String, String> {
            self.0.clone()
        }
    }

    /// Records what it was asked to render and counts invocations.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: AtomicUsize,
        body_lines: Mutex<Vec<String>>,
    }

    impl PageRenderer for RecordingRenderer {
        fn render(&self, pages: &[Page]) -> Result<Vec<u8>, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut lines = self.body_lines.lock().unwrap();
            for page in pages {
                lines.extend(page.body.iter().map(|l| l.text.clone()));
            }
            Ok(b"%PDF-1.5 fake".to_vec())
        }
    }

    fn pipeline_with(
        extractor: StaticExtractor,
        translator: Arc<MockTranslator>,
        renderer: Arc<RecordingRenderer>,
        config: Config,
    ) -> Pipeline {
        Pipeline::new(Arc::new(extractor), translator, renderer, config)
    }

    fn ok_extractor(text: &str) -> StaticExtractor {
        StaticExtractor(Ok(text.to_string()))
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_anything_runs() {
        let translator = Arc::new(MockTranslator::new(MockResponse::Tagged));
        let pipeline = pipeline_with(
            ok_extractor("some perfectly fine text"),
            Arc::clone(&translator),
            Arc::new(RecordingRenderer::default()),
            Config::with_api_key("key"),
        );

        let err = pipeline.translate_document(Vec::new()).await.unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput));
        assert_eq!(err.to_string(), "No PDF data provided in request body");
        assert_eq!(translator.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_api_key_is_a_configuration_error() {
        // The extractor would fail, proving the credential check runs
        // first.
        let pipeline = pipeline_with(
            StaticExtractor(Err("should never be called".into())),
            Arc::new(MockTranslator::new(MockResponse::Tagged)),
            Arc::new(RecordingRenderer::default()),
            Config::default(),
        );

        let err = pipeline
            .translate_document(b"%PDF-1.4".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Configuration));
        assert_eq!(err.to_string(), "Translation API key not configured");
    }

    #[tokio::test]
    async fn extraction_failure_surfaces_instead_of_placeholder_content() {
        let renderer = Arc::new(RecordingRenderer::default());
        let pipeline = pipeline_with(
            StaticExtractor(Err("damaged xref table".into())),
            Arc::new(MockTranslator::new(MockResponse::Tagged)),
            Arc::clone(&renderer),
            Config::with_api_key("key"),
        );

        let err = pipeline
            .translate_document(b"%PDF-1.4".to_vec())
            .await
            .unwrap_err();
        match err {
            PipelineError::Extraction(msg) => assert!(msg.contains("damaged xref table")),
            other => panic!("expected extraction error, got {other:?}"),
        }
        // No output of any kind on the failure path.
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn near_empty_extraction_is_an_extraction_error() {
        let pipeline = pipeline_with(
            ok_extractor("  \n a \n  "),
            Arc::new(MockTranslator::new(MockResponse::Tagged)),
            Arc::new(RecordingRenderer::default()),
            Config::with_api_key("key"),
        );

        let err = pipeline
            .translate_document(b"%PDF-1.4".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)));
    }

    #[tokio::test]
    async fn first_translation_failure_aborts_with_no_output() {
        let translator = Arc::new(MockTranslator::with_sequence(vec![
            MockResponse::Tagged,
            MockResponse::Error("quota exceeded".into()),
        ]));
        let renderer = Arc::new(RecordingRenderer::default());

        let mut config = Config::with_api_key("key");
        config.max_segment_chars = 30;
        let pipeline = pipeline_with(
            ok_extractor("first paragraph of the text\n\nsecond paragraph of the text\n\nthird paragraph of the text"),
            Arc::clone(&translator),
            Arc::clone(&renderer),
            config,
        );

        let err = pipeline
            .translate_document(b"%PDF-1.4".to_vec())
            .await
            .unwrap_err();
        match err {
            PipelineError::Translation(msg) => {
                assert!(msg.contains("quota exceeded"));
                assert!(msg.contains("segment 2/3"));
            }
            other => panic!("expected translation error, got {other:?}"),
        }
        // Aborted on the first failure, produced nothing.
        assert_eq!(translator.call_count(), 2);
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn segments_are_translated_in_source_order() {
        let translator = Arc::new(MockTranslator::new(MockResponse::Tagged));
        let renderer = Arc::new(RecordingRenderer::default());

        let mut config = Config::with_api_key("key");
        config.target_lang = "FR".to_string();
        config.max_segment_chars = 30;
        let pipeline = pipeline_with(
            ok_extractor("alpha paragraph first\n\nbravo paragraph second\n\ncharlie paragraph third"),
            Arc::clone(&translator),
            Arc::clone(&renderer),
            config,
        );

        let document = pipeline
            .translate_document(b"%PDF-1.4".to_vec())
            .await
            .unwrap();

        assert_eq!(document.segments, 3);
        assert_eq!(
            translator.submitted(),
            vec![
                "alpha paragraph first",
                "bravo paragraph second",
                "charlie paragraph third"
            ]
        );

        // Translations appear in the rendered body in the same order.
        let body = renderer.body_lines.lock().unwrap().join(" ");
        assert!(body.contains("[FR]"), "target language tag missing");
        let alpha = body.find("alpha").expect("first translation");
        let bravo = body.find("bravo").expect("second translation");
        let charlie = body.find("charlie").expect("third translation");
        assert!(alpha < bravo && bravo < charlie);
    }

    #[tokio::test]
    async fn success_returns_bytes_and_metadata() {
        let pipeline = pipeline_with(
            ok_extractor("Hello world."),
            Arc::new(MockTranslator::new(MockResponse::Fixed(
                "Bonjour le monde.".into(),
            ))),
            Arc::new(RecordingRenderer::default()),
            Config::with_api_key("key"),
        );

        let document = pipeline
            .translate_document(b"%PDF-1.4".to_vec())
            .await
            .unwrap();

        assert!(document.bytes.starts_with(b"%PDF-"));
        assert_eq!(document.segments, 1);
        assert!(document.pages >= 1);
    }

    #[tokio::test]
    async fn emission_failure_maps_to_the_emission_variant() {
        struct BrokenRenderer;
        impl PageRenderer for BrokenRenderer {
            fn render(&self, _pages: &[Page]) -> Result<Vec<u8>, String> {
                Err("stream encoding failed".into())
            }
        }

        let pipeline = Pipeline::new(
            Arc::new(ok_extractor("Hello world, this is fine.")),
            Arc::new(MockTranslator::new(MockResponse::Tagged)),
            Arc::new(BrokenRenderer),
            Config::with_api_key("key"),
        );

        let err = pipeline
            .translate_document(b"%PDF-1.4".to_vec())
            .await
            .unwrap_err();
        match err {
            PipelineError::Emission(msg) => assert!(msg.contains("stream encoding failed")),
            other => panic!("expected emission error, got {other:?}"),
        }
    }
}

//! Mock translation provider for tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::Translator;

/// A configurable mock response for [`MockTranslator`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Echo the input prefixed with the target language, e.g.
    /// `"[FR] hello"`. Keeps order assertions readable.
    Tagged,
    /// Return a fixed translation for every call.
    Fixed(String),
    /// Simulate a provider failure.
    Error(String),
}

/// A hand-rolled mock implementing [`Translator`] for tests.
///
/// Supports a fixed response or a sequence of responses (one per call,
/// repeating the last when exhausted), optional per-call latency,
/// call counting, and recording of the submitted texts.
pub struct MockTranslator {
    /// If non-empty, each call pops the next response.
    responses: Mutex<Vec<MockResponse>>,
    /// Fallback when the sequence is exhausted (or single-response mode).
    fallback: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    submitted: Mutex<Vec<String>>,
}

impl MockTranslator {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            delay: None,
            call_count: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that returns responses in order, repeating the
    /// last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        let fallback = responses.last().cloned().unwrap();
        // Reverse so we can pop() from the front cheaply.
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Set simulated network latency per call.
    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `translate()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The texts submitted so far, in call order.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        let mut seq = self.responses.lock().unwrap();
        if let Some(resp) = seq.pop() {
            resp
        } else {
            self.fallback.clone()
        }
    }
}

impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "Mock"
    }

    fn translate<'a>(
        &'a self,
        text: &'a str,
        target_lang: &'a str,
        _client: &'a reqwest::Client,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(text.to_string());
        let response = self.next_response();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match response {
                MockResponse::Tagged => Ok(format!("[{target_lang}] {text}")),
                MockResponse::Fixed(translation) => Ok(translation),
                MockResponse::Error(msg) => Err(msg),
            }
        })
    }
}

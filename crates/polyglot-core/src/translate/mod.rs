//! Translation provider trait and implementations.

pub mod deepl;
pub mod mock;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub use deepl::DeepL;
pub use mock::{MockResponse, MockTranslator};

/// A remote translation provider consumed as a black-box capability.
pub trait Translator: Send + Sync {
    /// The canonical name of this provider (e.g., "DeepL").
    fn name(&self) -> &str;

    /// Translate `text` into `target_lang`.
    ///
    /// Implementations must return the translation of exactly this
    /// input; the pipeline relies on one-to-one, order-preserving
    /// results to reassemble the document.
    fn translate<'a>(
        &'a self,
        text: &'a str,
        target_lang: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>>;
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;

use polyglot_core::translate::{DeepL, Translator};
use polyglot_core::{Config, Pipeline};
use polyglot_pdf::{PdfTextExtractor, PdfWriter};

/// Translate a PDF into a new, cleanly typeset PDF
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF to translate
    input: PathBuf,

    /// Where to write the translated PDF (default: <input>.translated.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target language code, e.g. EN, FR, DE
    #[arg(long)]
    target_lang: Option<String>,

    /// Translation provider API key
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Resolve configuration: CLI flags > env vars > defaults
    let mut config = Config::from_env();
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    if let Some(lang) = cli.target_lang {
        config.target_lang = lang.to_uppercase();
    }
    if config.api_key.is_none() {
        anyhow::bail!("no API key given; set POLYGLOT_API_KEY or pass --api-key");
    }

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("translated.pdf"));

    let pdf_bytes = std::fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let translator: Arc<dyn Translator> = Arc::new(DeepL::from_config(&config));
    let pipeline = Pipeline::new(
        Arc::new(PdfTextExtractor),
        translator,
        Arc::new(PdfWriter),
        config,
    );

    println!(
        "Translating {} ({} bytes)...",
        cli.input.display(),
        pdf_bytes.len()
    );
    let document = pipeline.translate_document(pdf_bytes).await?;

    std::fs::write(&output, &document.bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} {} ({} segments, {} pages, {:.1}s)",
        "Translated".green().bold(),
        output.display(),
        document.segments,
        document.pages,
        document.elapsed.as_secs_f64()
    );

    Ok(())
}

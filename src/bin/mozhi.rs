//! CLI binary for mozhi.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `TranslatorConfig`, runs one translation, and prints the result. The
//! input-side duties the browser original gave its form (character gate,
//! PDF-only uploads) live here.

use anyhow::{bail, Context, Result};
use clap::Parser;
use mozhi::{translate_pdf, translate_text, SourceLanguage, Translation, TranslatorConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Translate typed text (stdout)
  mozhi "Eda, enthada vishesham?" --from manglish

  # Translate English text and save the result
  mozhi "See you tomorrow at the bus stand" -o out.txt

  # Translate a PDF document (text layer preferred, vision fallback)
  mozhi --pdf story.pdf --from english

  # Export the translation as an A4 PDF next to the terminal output
  mozhi --pdf story.pdf --export-pdf ./exports

  # Structured JSON output (route taken, token usage, timing)
  mozhi "vannu ketto" --from manglish --json

ROUTING:
  Text input goes straight to the service. PDFs are tried text-first: if
  more than 50 characters of text can be extracted, the extracted text is
  translated; otherwise the PDF itself is sent inline (scanned documents),
  subject to a 10 MB ceiling.

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY    API credential (required for PDF mode)
  MOZHI_FONT_DIR    Font directory for --export-pdf (Noto Sans Malayalam)

SETUP:
  1. Set API key:   export GEMINI_API_KEY=AIza...
  2. Translate:     mozhi "hello my friend"
"#;

/// Translate English or Manglish text and PDFs to casual Malayalam.
#[derive(Parser, Debug)]
#[command(
    name = "mozhi",
    version,
    about = "Translate English or Manglish text and PDFs to casual Malayalam",
    long_about = "Translate typed text or PDF documents into natural, spoken-style Malayalam \
using the Gemini API. Text-bearing PDFs are translated from their extracted text; scanned \
PDFs fall back to an inline vision request.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Text to translate. Mutually exclusive with --pdf.
    input: Option<String>,

    /// Translate a PDF file instead of typed text.
    #[arg(long, value_name = "FILE", conflicts_with = "input")]
    pdf: Option<PathBuf>,

    /// Source language of the input: english or manglish.
    #[arg(long, value_enum, default_value = "english")]
    from: LanguageArg,

    /// Write the translation to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export the translation as an A4 PDF into this directory.
    #[cfg(feature = "export")]
    #[arg(long, value_name = "DIR")]
    export_pdf: Option<PathBuf>,

    /// Gemini model ID.
    #[arg(long, env = "MOZHI_MODEL", default_value = mozhi::config::DEFAULT_MODEL)]
    model: String,

    /// API credential. Falls back to GEMINI_API_KEY.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Sampling temperature for text-mode requests (0.0-2.0).
    #[arg(long, env = "MOZHI_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Max output tokens per request.
    #[arg(long, env = "MOZHI_MAX_TOKENS", default_value_t = 8192)]
    max_tokens: u32,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, env = "MOZHI_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Output structured JSON (Translation) instead of plain text.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MOZHI_VERBOSE")]
    verbose: bool,

    /// Suppress all output except the translation and errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LanguageArg {
    English,
    Manglish,
}

impl From<LanguageArg> for SourceLanguage {
    fn from(v: LanguageArg) -> Self {
        match v {
            LanguageArg::English => SourceLanguage::English,
            LanguageArg::Manglish => SourceLanguage::Manglish,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = TranslatorConfig::builder()
        .model(&cli.model)
        .api_key(&cli.api_key)
        .text_temperature(cli.temperature)
        .max_output_tokens(cli.max_tokens)
        .api_timeout_secs(cli.api_timeout)
        .build()
        .context("Invalid configuration")?;

    let source_lang: SourceLanguage = cli.from.into();

    // ── Run one translation ──────────────────────────────────────────────
    let result: Translation = if let Some(ref pdf_path) = cli.pdf {
        // PDF-only gate for file inputs, mirrored from the upload form.
        let ext = pdf_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if ext.as_deref() != Some("pdf") {
            bail!(
                "Only PDF files are supported, got '{}'",
                pdf_path.display()
            );
        }
        translate_pdf(pdf_path, source_lang, &config)
            .await
            .context("PDF translation failed")?
    } else {
        let text = cli
            .input
            .as_deref()
            .context("Provide text to translate, or --pdf <FILE>")?;
        if text.chars().count() > config.max_input_chars {
            bail!(
                "Input is over the {}-character limit; split it and translate in parts",
                config.max_input_chars
            );
        }
        translate_text(text, source_lang, &config)
            .await
            .context("Translation failed")?
    };

    // ── Emit result ──────────────────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialise output")?
        );
    } else if let Some(ref path) = cli.output {
        std::fs::write(path, &result.text)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        if !cli.quiet {
            eprintln!("Wrote translation to {}", path.display());
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(result.text.as_bytes())
            .context("Failed to write to stdout")?;
        if !result.text.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "route: {:?}  {} tokens in / {} tokens out  {}ms",
            result.route, result.prompt_tokens, result.completion_tokens, result.duration_ms
        );
    }

    // ── Optional PDF export ──────────────────────────────────────────────
    #[cfg(feature = "export")]
    if let Some(ref dir) = cli.export_pdf {
        let path = mozhi::export_pdf(&result.text, source_lang, dir)
            .context("PDF export failed")?;
        if !cli.quiet {
            eprintln!("Exported {}", path.display());
        }
    }

    Ok(())
}

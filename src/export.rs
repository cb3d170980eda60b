//! PDF export: render a translation as a downloadable A4 document.
//!
//! Presentation-only and deliberately simple: a title, a source/date line,
//! and the translated text laid out paragraph by paragraph at A4 width.
//! `genpdf` handles line wrapping and pagination, so long translations
//! flow onto as many pages as they need.
//!
//! The output filename embeds the current time
//! (`mozhi-translation-20260805-142311.pdf`) so repeated exports never
//! clobber each other.
//!
//! ## Fonts
//!
//! Malayalam script needs a font that actually carries the glyphs; the
//! built-in PDF base fonts do not. The renderer loads the Noto Sans
//! Malayalam family from `assets/fonts/` next to the crate root, or from
//! the directory named by the `MOZHI_FONT_DIR` environment variable. See
//! `assets/fonts/README.md` for the expected files.

use crate::config::SourceLanguage;
use crate::error::MozhiError;
use genpdf::elements::{Break, Paragraph};
use genpdf::{fonts, style, Element as _, PaperSize, SimplePageDecorator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the bundled font family.
pub const FONT_FAMILY_NAME: &str = "NotoSansMalayalam";

const FONT_FILES: &[&str] = &[
    "NotoSansMalayalam-Regular.ttf",
    "NotoSansMalayalam-Bold.ttf",
    "NotoSansMalayalam-Italic.ttf",
    "NotoSansMalayalam-BoldItalic.ttf",
];

/// Render `text` as a paginated A4 PDF in `output_dir`.
///
/// Returns the path of the written file.
pub fn export_pdf(
    text: &str,
    source_lang: SourceLanguage,
    output_dir: impl AsRef<Path>,
) -> Result<PathBuf, MozhiError> {
    let output_dir = output_dir.as_ref();
    let family = load_font_family()?;

    let mut doc = genpdf::Document::new(family);
    doc.set_title("Mozhi Translation");
    doc.set_paper_size(PaperSize::A4);
    doc.set_font_size(12);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    doc.push(
        Paragraph::new("Mozhi Translation")
            .styled(style::Style::new().bold().with_font_size(20)),
    );
    doc.push(Break::new(1.0));
    doc.push(
        Paragraph::new(format!(
            "Source: {source_lang} | Date: {}",
            chrono::Local::now().format("%d/%m/%Y")
        ))
        .styled(style::Style::new().with_font_size(9)),
    );
    doc.push(Break::new(2.0));

    // One Paragraph per input line keeps the service's own line structure;
    // blank lines become vertical breaks.
    for line in text.lines() {
        if line.trim().is_empty() {
            doc.push(Break::new(1.0));
        } else {
            doc.push(Paragraph::new(line));
        }
    }

    let filename = format!(
        "mozhi-translation-{}.pdf",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    );
    let path = output_dir.join(filename);

    std::fs::create_dir_all(output_dir).map_err(|e| MozhiError::Export {
        detail: format!("could not create '{}': {e}", output_dir.display()),
    })?;
    doc.render_to_file(&path).map_err(|e| MozhiError::Export {
        detail: e.to_string(),
    })?;

    info!(path = %path.display(), "exported translation PDF");
    Ok(path)
}

/// Locate and load the Malayalam-capable font family.
fn load_font_family() -> Result<fonts::FontFamily<fonts::FontData>, MozhiError> {
    let directory = font_directory();
    debug!(dir = %directory.display(), "loading export fonts");

    let missing: Vec<String> = FONT_FILES
        .iter()
        .map(|name| directory.join(name))
        .filter(|candidate| !candidate.is_file())
        .map(|path| path.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(MozhiError::Export {
            detail: format!(
                "missing font files: {}. See assets/fonts/README.md, or set MOZHI_FONT_DIR.",
                missing.join(", ")
            ),
        });
    }

    fonts::from_files(&directory, FONT_FAMILY_NAME, None).map_err(|e| MozhiError::Export {
        detail: format!(
            "failed to load font family '{FONT_FAMILY_NAME}' from {}: {e}",
            directory.display()
        ),
    })
}

fn font_directory() -> PathBuf {
    match std::env::var_os("MOZHI_FONT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_embeds_timestamp_shape() {
        // The filename format is part of the export contract.
        let name = format!(
            "mozhi-translation-{}.pdf",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        assert!(name.starts_with("mozhi-translation-"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.len(), "mozhi-translation-YYYYMMDD-HHMMSS.pdf".len());
    }

    #[test]
    fn missing_fonts_produce_actionable_export_error() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("MOZHI_FONT_DIR", dir.path());
        let err = export_pdf("നന്ദി", SourceLanguage::English, dir.path()).unwrap_err();
        std::env::remove_var("MOZHI_FONT_DIR");
        let msg = err.to_string();
        assert!(msg.contains("font"), "got: {msg}");
        assert!(msg.contains("MOZHI_FONT_DIR"), "got: {msg}");
    }
}

//! Text extraction: pull the embedded text layer out of a PDF.
//!
//! Extraction runs before any network call so that text-bearing documents
//! (contracts, stories, reports) skip the larger, slower, size-capped
//! multimodal request entirely. The text comes out in whatever order the
//! PDF's content streams report it, which for multi-column layouts is not
//! guaranteed to match visual reading order. Acceptable here, since the
//! consumer is a language model rather than a human reader.
//!
//! Failure at any point is an [`ExtractionError`], a *non-fatal* signal:
//! the adapter treats it as "no text layer" and falls back to the vision
//! route. There is no partial-success mode; one undecodable page discards
//! everything, because a half-extracted document would silently translate
//! half a document.

use crate::error::ExtractionError;
use lopdf::Document;
use tracing::debug;

/// Extract the full text content of a PDF, page by page.
///
/// Pages are visited in ascending page-number order. Each page's text runs
/// are joined with single spaces, a double line-break separates pages, and
/// the final result is trimmed. An empty `Ok` string means the document
/// parsed fine but carries no text layer (a scan).
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(pdf_bytes).map_err(|e| ExtractionError::Parse {
        detail: e.to_string(),
    })?;

    let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    page_numbers.sort_unstable();

    let mut full_text = String::new();
    for page in page_numbers {
        let page_text = doc
            .extract_text(&[page])
            .map_err(|e| ExtractionError::PageDecode {
                page,
                detail: e.to_string(),
            })?;

        // Collapse the page's text runs to single-space separation; the
        // run boundaries lopdf reports are stream artefacts, not layout.
        let normalised = page_text.split_whitespace().collect::<Vec<_>>().join(" ");
        full_text.push_str(&normalised);
        full_text.push_str("\n\n");
    }

    let result = full_text.trim().to_string();
    debug!(
        pages = doc.get_pages().len(),
        chars = result.len(),
        "extracted PDF text layer"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a single-font PDF with one page per entry in `pages`; an empty
    /// entry produces a page with an empty content stream.
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                vec![]
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extracts_single_page_text() {
        let pdf = build_pdf(&["Hello casual world"]);
        let text = extract_text(&pdf).unwrap();
        assert_eq!(text, "Hello casual world");
    }

    #[test]
    fn pages_separated_and_result_trimmed() {
        let pdf = build_pdf(&["First page here", "Second page here"]);
        let text = extract_text(&pdf).unwrap();
        assert!(text.contains("First page here"));
        assert!(text.contains("Second page here"));
        assert!(!text.ends_with('\n'), "result must be trimmed");
        let first = text.find("First").unwrap();
        let second = text.find("Second").unwrap();
        assert!(first < second, "pages must stay in order");
    }

    #[test]
    fn empty_pages_yield_empty_text() {
        let pdf = build_pdf(&["", ""]);
        let text = extract_text(&pdf).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn garbage_bytes_fail_with_parse_error() {
        let err = extract_text(b"%PDF-1.4 this is not really a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse { .. }));
    }

    #[test]
    fn extraction_is_deterministic() {
        let pdf = build_pdf(&["Same input", "same output"]);
        assert_eq!(extract_text(&pdf).unwrap(), extract_text(&pdf).unwrap());
    }
}

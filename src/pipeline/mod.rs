//! Pipeline stages for PDF translation input handling.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the extraction backend) without
//! touching the routing logic in [`crate::translate`].
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ (text route)
//! (path)    (lopdf)
//!    └────▶ encode ───▶ (vision route)
//!           (base64)
//! ```
//!
//! 1. [`input`]   — read a local PDF into memory and validate the magic bytes
//! 2. [`extract`] — pull the embedded text layer, page by page; failure here
//!    is non-fatal and routes the request to the vision fallback
//! 3. [`encode`]  — base64-wrap the raw bytes for the multimodal request
//!    body; only runs when the vision fallback is taken

pub mod encode;
pub mod extract;
pub mod input;

//! Deterministic cleanup of raw model responses.
//!
//! Even well-prompted models occasionally wrap their output in a fenced
//! code block despite the prompt saying not to. The caller wants the
//! payload between the fences, so every pipeline runs its raw completion
//! through [`strip_fences`] before shaping the response.
//!
//! ## Contract
//!
//! Applied in order, each step optional:
//!
//! 1. Trim surrounding whitespace.
//! 2. Strip at most one leading fence: a tagged opener (`` ```html ``,
//!    `` ```latex ``, ...) from the caller's tag list, else a bare `` ``` ``.
//!    A newline directly after a tagged opener goes with it.
//! 3. Strip at most one trailing bare `` ``` ``.
//! 4. Trim again.
//!
//! Unfenced text passes through unchanged apart from the trim, and
//! re-sanitizing already-clean text is a no-op.
//!
//! ## Boundary behaviour
//!
//! Exactly one leading and one trailing strip happen. Nested fence pairs,
//! multiple sequential blocks, and prose around a fenced block ("Here is
//! the code: ```...```") are passed through as-is; extracting an embedded
//! block out of surrounding prose would change what "the payload" means and
//! is deliberately not attempted.

/// Fence tags stripped from explanation text.
pub const EXPLANATION_FENCES: &[&str] = &["markdown"];

/// Fence tags stripped from generated visualization fragments.
pub const HTML_FENCES: &[&str] = &["html"];

/// Fence tags stripped from converted documents (either direction).
pub const CONVERT_FENCES: &[&str] = &["latex", "markdown"];

/// Fence tags stripped from OCR transcriptions.
pub const LATEX_FENCES: &[&str] = &["latex"];

/// Strip one layer of fenced-block wrapping, if present, and trim.
pub fn strip_fences(raw: &str, tags: &[&str]) -> String {
    let mut text = raw.trim();

    let mut stripped_opener = false;
    for tag in tags {
        if let Some(rest) = text
            .strip_prefix("```")
            .and_then(|rest| rest.strip_prefix(tag))
        {
            text = rest.strip_prefix('\n').unwrap_or(rest);
            stripped_opener = true;
            break;
        }
    }
    if !stripped_opener {
        if let Some(rest) = text.strip_prefix("```") {
            text = rest;
        }
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim().to_string()
}

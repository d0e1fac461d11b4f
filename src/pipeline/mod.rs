//! Pipeline orchestrators for the three annotation tasks.
//!
//! Each submodule sequences the same four collaborators — resolver, prompt
//! composer, model invoker, sanitizer — for one task:
//!
//! ```text
//! analyze  validate ─▶ resolve(reasoning) ─▶ explain ─▶ sanitize
//!                   ─▶ resolve(vision)    ─▶ visualize ─▶ sanitize
//! convert  validate ─▶ resolve(reasoning) ─▶ convert  ─▶ sanitize
//! ocr      validate ─▶ resolve(vision)    ─▶ transcribe ─▶ sanitize
//! ```
//!
//! All three are fail-fast: the first failing stage aborts the rest and its
//! error becomes the whole response — a successful explanation before a
//! failed visualization is discarded, never returned. Cheap checks run
//! first (field validation, then credential resolution) so a request that
//! cannot complete never spends a paid model call.
//!
//! Within a task there is no intra-request parallelism: analyze's second
//! prompt embeds the first stage's sanitized output, a true data
//! dependency.

pub mod analyze;
pub mod convert;
pub mod ocr;

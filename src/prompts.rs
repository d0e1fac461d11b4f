//! Prompt composition for every annotation task.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the task-specific correctness rules
//!    (language mirroring, color preservation, parameter extraction) are
//!    the actual intellectual content of the gateway, since the "engine"
//!    itself is an opaque remote call. They live in one auditable place.
//!
//! 2. **Testability** — unit tests inspect composed prompts directly
//!    without a model in the loop, so a dropped rule is caught as a string
//!    assertion, not as a silent quality regression in production.
//!
//! Every function is pure: `(task inputs) -> ordered role-tagged messages`,
//! no side effects, no model calls.

use crate::api::TargetFormat;
use crate::invoker::ChatMessage;

// ── Analyze stage 1: explanation ─────────────────────────────────────────

const EXPLAIN_PERSONA: &str = "You are a helpful physics tutor.";

/// Compose the explanation request for a target formula or concept.
///
/// The prompt pins three behaviours the caller depends on: the explanation
/// is restricted to the why/how (no restatement padding), it mirrors the
/// natural language of the surrounding document, and any math it contains
/// uses `$...$` / `$$...$$` delimiters the editor can render directly.
pub fn explain_messages(context: &str, full_context: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        r#"You are an expert physics and mathematics tutor.

Target Formula/Concept: "{context}"

Full Document Context:
"{full_context}"

Task:
1. Analyze the "Target Formula/Concept" within the context of the "Full Document Context".
2. Provide a brief, clear, and insightful explanation. Focus on the "why" and "how".
3. **LANGUAGE DETECTION**: Detect the language used in the "Full Document Context" (e.g., English, Chinese, French).
4. **OUTPUT LANGUAGE**: Your explanation MUST be in the SAME language as the "Full Document Context". If the context is mixed, prioritize the language of the descriptive text surrounding the formula.
5. **MATH RENDERING**: If your explanation includes mathematical formulas, YOU MUST wrap them in standard LaTeX math delimiters:
   - Use $...$ for inline math (e.g., $E=mc^2$).
   - Use $$...$$ for display math.
   - DO NOT use markdown code blocks for math.
6. Return ONLY the explanation text."#
    );

    vec![ChatMessage::system(EXPLAIN_PERSONA), ChatMessage::user(prompt)]
}

// ── Analyze stage 2: visualization ───────────────────────────────────────

const VIZ_PERSONA: &str = "You are a code generator. Output raw HTML/JS only.";

/// Compose the visualization request from the sanitized stage-1 output.
///
/// The prompt names two distinct sources of truth: `explanation` for the
/// governing physics, `full_context` for the scenario and its numeric
/// parameters. Keeping them separate is what makes the second stage honour
/// specific values ("velocity of 20m/s") instead of inventing defaults.
pub fn visualize_messages(context: &str, explanation: &str, full_context: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        r#"You are an expert frontend developer and physics simulation specialist.

Task: Create a **Dynamic, Interactive Physics Simulation** using HTML5 Canvas and JavaScript.

**Source Material**:
1. **Target Concept**: "{context}"
2. **Physics Logic (Source of Truth for Formulas)**:
   "{explanation}"
3. **Scenario Context (Source of Truth for Environment/Parameters)**:
   "{full_context}"

**Implementation Strategy**:
1. **Analyze the Physics**: Use the "Physics Logic" to determine the governing equations (kinematics, dynamics, wave equations, etc.).
2. **Extract Parameters**: Scan the "Scenario Context" for specific values (e.g., "velocity of 20m/s", "angle of 45 degrees", "mass of 5kg").
   - **CRITICAL**: If the context mentions specific numbers, YOU MUST set them as the initial values for your simulation variables.
3. **Design the Visuals**: Use the "Scenario Context" to decide what to draw (e.g., if it mentions a "cliff", draw a cliff; if "spring", draw a spring).

CRITICAL REQUIREMENTS:
1. **Relevance**: The simulation MUST directly visualize the specific physics concept described.
   - Use the context to understand specific scenarios.
   - If it's a projectile, show a projectile.
   - If it's a wave, show a wave.
   - If it's a field, show vector fields or particles in a field.
   - **DO NOT default to a pendulum or spring unless the concept specifically calls for it.**

2. **Physics Accuracy**: Use `requestAnimationFrame` to animate the system based on real physics equations derived from the concept.

3. **Interactivity**: Include HTML range sliders to adjust key parameters relevant to the specific model (e.g., initial velocity, charge, frequency, mass).

4. **Style**:
  - Background: Dark (`#000` or `#111`).
  - Text: Light (`#eee`).
  - Controls: Minimalist, styled for dark mode.

5. **Language Adaptation**:
  - **LANGUAGE DETECTION**: Detect the language used in the "Full Document Context" (e.g., English, Chinese, French).
  - **OUTPUT LANGUAGE**: Any text displayed in the simulation (labels, titles, slider names, instructions) MUST be in the SAME language as the "Full Document Context". If the context is mixed, prioritize the language of the descriptive text surrounding the formula.

6. **Output Format**:
  - Return **ONLY** the HTML snippet containing the container `div`, controls, and the `script` tag.
  - Do NOT include `<html>`, `<head>`, `<body>`, or markdown code fences.
  - The root container must have `width: 100%; height: 300px;`."#
    );

    vec![ChatMessage::system(VIZ_PERSONA), ChatMessage::user(prompt)]
}

// ── Convert ──────────────────────────────────────────────────────────────

const CONVERT_PERSONA: &str = "You are a document format converter.";

/// Compose the format-conversion request for the chosen direction.
///
/// Both directions share one non-negotiable rule: color annotations are
/// normalized to the canonical `\textcolor{color}{text}` form and never
/// degraded to emphasis or markup-based color encoding. Losing color would
/// silently destroy the ink-color semantics the OCR pipeline produced.
pub fn convert_messages(target: TargetFormat, content: &str) -> Vec<ChatMessage> {
    let prompt = match target {
        TargetFormat::Tex => format!(
            r#"Convert the following Markdown/LaTeX mixed content into a pure, compile-ready LaTeX document body.

Rules:
1. Convert Markdown headers (#, ##) to LaTeX sections (\section, \subsection).
2. Convert Markdown lists (- , 1.) to LaTeX lists (itemize, enumerate).
3. Convert Markdown bold/italic to LaTeX (\textbf, \textit).
4. **COLOR PRESERVATION**:
   - Keep `\textcolor{{color}}{{text}}` as is.
   - Convert `<font color="color">text</font>` to `\textcolor{{color}}{{text}}` (if present).
   - Convert `<span style="color: color">text</span>` to `\textcolor{{color}}{{text}}` (if present).
5. Keep existing LaTeX math ($...$, $$...$$) unchanged.
6. Return ONLY the converted LaTeX body code. Do NOT wrap in \documentclass.
7. Do not include markdown code fences.

Content:
"{content}""#
        ),
        TargetFormat::Md => format!(
            r#"Convert the following LaTeX content into clean Markdown.

Rules:
1. **COLOR PRESERVATION (HIGHEST PRIORITY)**:
   - **KEEP** `\textcolor{{color}}{{text}}` commands AS IS.
   - **DO NOT** convert color to bold (`**`) or italic (`*`).
   - **DO NOT** convert color to HTML.
   - Convert `{{\color{{color}} text}}` to `\textcolor{{color}}{{text}}`.
2. Convert LaTeX sections (\section, \subsection) to Markdown headers (#, ##).
3. Convert LaTeX lists to Markdown lists.
4. Convert LaTeX text formatting (\textbf, \textit) to Markdown (**...**, *...*).
   - Only convert `\textbf` and `\textit`. DO NOT touch `\textcolor`.
5. Keep LaTeX math ($...$, $$...$$) unchanged.
6. Return ONLY the converted Markdown content.
7. Do not include markdown code fences.

Content:
"{content}""#
        ),
    };

    vec![ChatMessage::system(CONVERT_PERSONA), ChatMessage::user(prompt)]
}

// ── OCR ──────────────────────────────────────────────────────────────────

/// Base transcription instruction for a handwritten-note image.
///
/// Output is restricted to document-body markup so the editor can splice
/// the transcription straight into an existing document; perceived ink
/// color maps to `\textcolor` with default/black/white left unannotated.
const OCR_RULES: &str = r#"Transcribe this handwritten note into valid XeLaTeX code.

RULES:
1. Return ONLY the body content (formulas, text, etc.).
2. Do NOT include \documentclass, \begin{document}, \maketitle, or \end{document}.
3. Assume standard packages (amsmath, amssymb, geometry, xcolor) are already loaded.
4. Use standard LaTeX math mode ($...$ for inline, $$...$$ for display).
5. Correct any obvious physical or mathematical errors based on context.
6. Return ONLY the LaTeX code, no markdown fencing.
7. **COLOR DETECTION**:
   - Detect the color of the handwritten strokes.
   - If the handwriting is **RED**, wrap the corresponding LaTeX text/formula in \textcolor{red}{...}.
   - If the handwriting is another distinct color (e.g., blue, green), use \textcolor{name}{...} accordingly.
   - Default/White/Black text should NOT have color commands."#;

/// Compose the OCR instruction, with stitching blocks for adjacent windows.
///
/// A stitching block is appended only when its window is non-empty; a blank
/// window must leave no trace in the prompt, or the model starts inventing
/// continuations of text that does not exist.
pub fn ocr_prompt(previous_context: &str, next_context: &str) -> String {
    let mut prompt = OCR_RULES.to_string();

    if !previous_context.is_empty() {
        prompt.push_str(&format!(
            "\n\nPREVIOUS CONTEXT (The text immediately preceding this image):\n...{previous_context}\n\nINSTRUCTION: Ensure your transcription flows naturally from this previous context."
        ));
    }
    if !next_context.is_empty() {
        prompt.push_str(&format!(
            "\n\nNEXT CONTEXT (The text immediately following this image):\n{next_context}...\n\nINSTRUCTION: Ensure your transcription connects smoothly to this next context."
        ));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_embeds_both_contexts() {
        let messages = explain_messages("F = ma", "Newton's second law, en français");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        let user = &messages[1].content;
        assert!(user.contains("F = ma"));
        assert!(user.contains("Newton's second law"));
        assert!(user.contains("$...$"));
        assert!(user.contains("$$...$$"));
        assert!(user.contains("SAME language"));
    }

    #[test]
    fn visualize_embeds_stage_one_output() {
        let messages = visualize_messages(
            "projectile motion",
            "The range follows $R = v^2 \\sin(2\\theta)/g$.",
            "launched at 20m/s from a cliff",
        );
        let user = &messages[1].content;
        // The chained explanation is the authoritative physics source
        assert!(user.contains("The range follows $R = v^2 \\sin(2\\theta)/g$."));
        assert!(user.contains("launched at 20m/s from a cliff"));
        assert!(user.contains("initial values"));
        assert!(user.contains("requestAnimationFrame"));
    }

    #[test]
    fn visualize_pins_style_and_sizing() {
        let messages = visualize_messages("waves", "explanation", "context");
        let user = &messages[1].content;
        assert!(user.contains("#000"));
        assert!(user.contains("#111"));
        assert!(user.contains("#eee"));
        assert!(user.contains("width: 100%; height: 300px;"));
        assert!(user.contains("Do NOT include `<html>`"));
    }

    #[test]
    fn convert_to_tex_preserves_textcolor() {
        let messages = convert_messages(TargetFormat::Tex, r"see \textcolor{red}{F=ma} here");
        let user = &messages[1].content;
        assert!(user.contains(r"\textcolor{red}{F=ma}"));
        assert!(user.contains("COLOR PRESERVATION"));
        assert!(user.contains(r"Keep `\textcolor{color}{text}` as is."));
        assert!(user.contains(r"Do NOT wrap in \documentclass"));
    }

    #[test]
    fn convert_to_md_never_degrades_color() {
        let messages = convert_messages(TargetFormat::Md, r"\textcolor{red}{F=ma}");
        let user = &messages[1].content;
        assert!(user.contains(r"\textcolor{red}{F=ma}"));
        assert!(user.contains("COLOR PRESERVATION (HIGHEST PRIORITY)"));
        assert!(user.contains("**DO NOT** convert color to bold"));
        assert!(user.contains(r"DO NOT touch `\textcolor`"));
    }

    #[test]
    fn convert_directions_are_distinct() {
        let tex = &convert_messages(TargetFormat::Tex, "x")[1].content;
        let md = &convert_messages(TargetFormat::Md, "x")[1].content;
        assert!(tex.contains("compile-ready LaTeX document body"));
        assert!(md.contains("into clean Markdown"));
        assert_ne!(tex, md);
    }

    #[test]
    fn ocr_prompt_restricts_to_body_markup() {
        let prompt = ocr_prompt("", "");
        assert!(prompt.contains(r"Do NOT include \documentclass"));
        assert!(prompt.contains("COLOR DETECTION"));
        assert!(prompt.contains(r"\textcolor{red}{...}"));
        assert!(prompt.contains("Default/White/Black text should NOT have color commands."));
    }

    #[test]
    fn ocr_stitching_present_when_windows_given() {
        let prompt = ocr_prompt("the previous line", "the next line");
        assert!(prompt.contains("PREVIOUS CONTEXT"));
        assert!(prompt.contains("the previous line"));
        assert!(prompt.contains("flows naturally"));
        assert!(prompt.contains("NEXT CONTEXT"));
        assert!(prompt.contains("the next line"));
        assert!(prompt.contains("connects smoothly"));
    }

    #[test]
    fn ocr_stitching_absent_when_windows_empty() {
        let prompt = ocr_prompt("", "");
        assert!(!prompt.contains("PREVIOUS CONTEXT"));
        assert!(!prompt.contains("NEXT CONTEXT"));
    }

    #[test]
    fn ocr_stitching_sides_are_independent() {
        let only_prev = ocr_prompt("before", "");
        assert!(only_prev.contains("PREVIOUS CONTEXT"));
        assert!(!only_prev.contains("NEXT CONTEXT"));

        let only_next = ocr_prompt("", "after");
        assert!(!only_next.contains("PREVIOUS CONTEXT"));
        assert!(only_next.contains("NEXT CONTEXT"));
    }
}

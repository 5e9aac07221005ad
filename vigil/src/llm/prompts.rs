//! Prompt templates for report generation
//!
//! Templates use basic `format!()` interpolation for type safety and are
//! pure functions of their inputs: same arguments, same composed prompt.

use crate::error::{Result, VigilError};

/// System prompt the CLI falls back to when the caller supplies none.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a senior project analyst. Turn the provided \
project activity into a concise, well-structured markdown progress report. Base every statement \
on the source material.";

/// Section labels the structured template expects to find in the source
/// content, in report order.
pub const REQUIRED_SECTIONS: [&str; 3] = ["New Features", "Improvements", "Bug Fixes"];

/// Which template version augments the system prompt.
///
/// Both versions ship; a deployment picks one through configuration
/// (`REPORT_TEMPLATE`) and sticks with it. `Iteration` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateStyle {
    /// GitHub-iteration report: mandatory iteration elements, technical
    /// annotations, community signals, exception-handling directives.
    Iteration,
    /// Generic sectioned report with formatting rules and a completeness
    /// check against the source content.
    Structured,
}

impl std::str::FromStr for TemplateStyle {
    type Err = VigilError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "iteration" => Ok(TemplateStyle::Iteration),
            "structured" => Ok(TemplateStyle::Structured),
            other => Err(VigilError::Validation(format!(
                "Unknown report template: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateStyle::Iteration => write!(f, "iteration"),
            TemplateStyle::Structured => write!(f, "structured"),
        }
    }
}

/// Compose the final system prompt for one generation call.
///
/// Appends the selected template to the caller's system prompt. The
/// structured template additionally inspects `user_content` for missing
/// sections; the iteration template ignores it.
///
/// # Example
/// ```
/// use vigil::llm::prompts::{augment, TemplateStyle};
///
/// let first = augment("Summarize.", "# Progress", TemplateStyle::Iteration);
/// let second = augment("Summarize.", "# Progress", TemplateStyle::Iteration);
/// assert_eq!(first, second);
/// ```
pub fn augment(system_prompt: &str, user_content: &str, style: TemplateStyle) -> String {
    match style {
        TemplateStyle::Iteration => iteration_report_prompt(system_prompt),
        TemplateStyle::Structured => structured_report_prompt(system_prompt, user_content),
    }
}

/// Build the iteration-report system prompt.
///
/// Extends the caller's prompt with the iteration reporting rules: which
/// elements every report must carry, how to annotate them, and how to mark
/// gaps or conflicts in the source data instead of papering over them.
///
/// # Example
/// ```
/// use vigil::llm::prompts::iteration_report_prompt;
///
/// let prompt = iteration_report_prompt("Summarize the sprint.");
/// assert!(prompt.starts_with("Summarize the sprint."));
/// assert!(prompt.contains("Release notes"));
/// ```
pub fn iteration_report_prompt(system_prompt: &str) -> String {
    format!(
        r#"{system_prompt}

Iteration report requirements:
1. Mandatory elements
- Feature development (commits tagged as features)
- Issue fixes (closed issues)
- Documentation updates (docs changes)
- Test coverage (new or changed test cases)
- Release notes

2. Technical annotations
- Reference issue numbers (#123)
- Mark version spans (v1.2.0 -> v1.3.0)
- Tag each change with its category: [Core], [API] or [UI]
- Record the CI pipeline status (passing/failing)

3. Community signals
- Number of contributors involved
- Links to the relevant discussions
- Pull request review turnaround in hours
- Issue response times

Exception handling:
- When commit data is missing, mark the affected section "iteration record incomplete"
- On version conflicts, keep the history as recorded in git
- Tag unresolved issues "needs follow-up""#
    )
}

/// Build the structured-report system prompt.
///
/// Extends the caller's prompt with the required section list, per-item
/// metadata, and formatting rules. When the source content lacks one of the
/// [`REQUIRED_SECTIONS`] labels, a warning line is appended telling the
/// model to flag the gap instead of fabricating entries for it.
///
/// # Example
/// ```
/// use vigil::llm::prompts::structured_report_prompt;
///
/// let complete = "New Features... Improvements... Bug Fixes...";
/// let prompt = structured_report_prompt("Summarize.", complete);
/// assert!(!prompt.contains("Warning:"));
///
/// let prompt = structured_report_prompt("Summarize.", "only fixes here");
/// assert!(prompt.contains("Warning:"));
/// ```
pub fn structured_report_prompt(system_prompt: &str, user_content: &str) -> String {
    let mut prompt = format!(
        r#"{system_prompt}

Report structure, in order:
1. New Features - functionality added in this cycle
2. Improvements - enhancements to existing behavior
3. Bug Fixes - defects resolved

Each item carries:
- The affected module or component
- The version transition when one applies (v1.2.0 -> v1.3.0)
- A change-type tag: [Feature], [Improvement] or [Fix]

Formatting rules:
- Dates in ISO-8601 (YYYY-MM-DD)
- Sentence-case headings; keep product and module names capitalized as written in the source
- Plain markdown only, no decorative symbols"#
    );

    let missing = missing_sections(user_content);
    if !missing.is_empty() {
        let labels = missing
            .iter()
            .map(|section| format!("\"{section}\""))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!(
            "\n\nWarning: the source content has no {labels} section. \
             Flag the gap in the report instead of inventing entries for it."
        ));
    }

    prompt
}

/// Scan source content for the required section labels.
///
/// Matching is case-insensitive; returns the labels that are absent, in
/// report order.
///
/// # Example
/// ```
/// use vigil::llm::prompts::missing_sections;
///
/// let missing = missing_sections("## New Features\n- x\n## Bug Fixes\n- y");
/// assert_eq!(missing, vec!["Improvements"]);
/// ```
pub fn missing_sections(user_content: &str) -> Vec<&'static str> {
    let haystack = user_content.to_lowercase();
    REQUIRED_SECTIONS
        .iter()
        .copied()
        .filter(|section| !haystack.contains(&section.to_lowercase()))
        .collect()
}

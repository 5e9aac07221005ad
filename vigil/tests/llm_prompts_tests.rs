use pretty_assertions::assert_eq;

use vigil::llm::prompts::{
    augment, iteration_report_prompt, missing_sections, structured_report_prompt, TemplateStyle,
    DEFAULT_SYSTEM_PROMPT, REQUIRED_SECTIONS,
};

#[test]
fn test_iteration_prompt_substitution() {
    let system_prompt = "You are a release manager for the vigil project.";
    let prompt = iteration_report_prompt(system_prompt);

    assert!(prompt.starts_with(system_prompt));
    assert!(prompt.contains("Iteration report requirements"));
    assert!(prompt.contains("Release notes"));
    assert!(prompt.contains("Exception handling"));
}

#[test]
fn test_structured_prompt_substitution() {
    let system_prompt = "You are a changelog writer.";
    let prompt = structured_report_prompt(system_prompt, "");

    assert!(prompt.starts_with(system_prompt));
    assert!(prompt.contains("Report structure, in order"));
    assert!(prompt.contains("Formatting rules"));
}

#[test]
fn test_augment_dispatches_on_style() {
    let iteration = augment("Summarize.", "# Progress", TemplateStyle::Iteration);
    let structured = augment("Summarize.", "# Progress", TemplateStyle::Structured);

    assert!(iteration.contains("Iteration report requirements"));
    assert!(!iteration.contains("Report structure, in order"));
    assert!(structured.contains("Report structure, in order"));
    assert!(!structured.contains("Iteration report requirements"));
}

#[test]
fn test_augment_is_pure() {
    for style in [TemplateStyle::Iteration, TemplateStyle::Structured] {
        let first = augment("Summarize.", "# Progress\n- fix bug #1", style);
        let second = augment("Summarize.", "# Progress\n- fix bug #1", style);
        assert_eq!(first, second);
    }
}

#[test]
fn test_iteration_style_ignores_source_content() {
    let sparse = augment("Summarize.", "", TemplateStyle::Iteration);
    let rich = augment(
        "Summarize.",
        "New Features, Improvements, Bug Fixes",
        TemplateStyle::Iteration,
    );

    assert_eq!(sparse, rich);
}

#[test]
fn test_structured_style_warns_once_for_missing_sections() {
    let prompt = augment("Summarize.", "only commit noise", TemplateStyle::Structured);

    assert_eq!(prompt.matches("Warning:").count(), 1);
    for section in REQUIRED_SECTIONS {
        assert!(prompt.contains(&format!("\"{section}\"")));
    }
}

#[test]
fn test_structured_style_stays_silent_when_complete() {
    let content = "## New Features\n- a\n## Improvements\n- b\n## Bug Fixes\n- c";
    let prompt = augment("Summarize.", content, TemplateStyle::Structured);

    assert!(!prompt.contains("Warning:"));
}

#[test]
fn test_missing_sections_matches_case_insensitively() {
    assert!(missing_sections("NEW FEATURES and bug fixes and improvements").is_empty());
    assert_eq!(
        missing_sections("improvements only"),
        vec!["New Features", "Bug Fixes"]
    );
}

#[test]
fn test_prompts_handle_special_characters() {
    let system_with_quotes = r#"Respond with "report ready" when done."#;
    let prompt = iteration_report_prompt(system_with_quotes);
    assert!(prompt.contains(system_with_quotes));

    let system_with_braces = "Wrap totals in {braces} & symbols?";
    let prompt = structured_report_prompt(system_with_braces, "content");
    assert!(prompt.contains(system_with_braces));
}

#[test]
fn test_default_system_prompt_is_usable() {
    assert!(!DEFAULT_SYSTEM_PROMPT.is_empty());

    let prompt = augment(DEFAULT_SYSTEM_PROMPT, "", TemplateStyle::Iteration);
    assert!(prompt.starts_with(DEFAULT_SYSTEM_PROMPT));
}

#[test]
fn test_template_style_parses_and_displays() {
    let iteration: TemplateStyle = "iteration".parse().unwrap();
    assert_eq!(iteration, TemplateStyle::Iteration);
    assert_eq!(iteration.to_string(), "iteration");

    let structured: TemplateStyle = "STRUCTURED".parse().unwrap();
    assert_eq!(structured, TemplateStyle::Structured);
    assert_eq!(structured.to_string(), "structured");

    assert!("weekly".parse::<TemplateStyle>().is_err());
}

use quill_engine::{decide, CompiledTemplate, GroupRegistry, ModeOverlay, RenderContext, VisibilityTable};
use quill_types::{vals, DisplayOptions, DEFAULT_KEY};

fn ctx(section: &str, log_type: &str) -> RenderContext {
    RenderContext {
        section: section.to_string(),
        log_type: log_type.to_string(),
        display: DisplayOptions::default(),
    }
}

#[test]
fn test_exact_entry_determines_outcome_for_any_wildcard_combination() {
    for &section_wildcard in &[None, Some(true), Some(false)] {
        for &type_wildcard in &[None, Some(true), Some(false)] {
            for &global in &[true, false] {
                for &exact in &[true, false] {
                    let mut table = if global {
                        VisibilityTable::show_everything()
                    } else {
                        VisibilityTable::hide_everything()
                    };
                    if let Some(flag) = section_wildcard {
                        table.set("S", DEFAULT_KEY, flag);
                    }
                    if let Some(flag) = type_wildcard {
                        table.set(DEFAULT_KEY, "t", flag);
                    }
                    table.set("S", "t", exact);
                    assert_eq!(
                        decide(&table, None, "S", "t"),
                        exact,
                        "exact={} must win over wildcards {:?}/{:?} global={}",
                        exact,
                        section_wildcard,
                        type_wildcard,
                        global
                    );
                }
            }
        }
    }
}

#[test]
fn test_section_hidden_then_exact_type_shown() {
    let mut table = VisibilityTable::show_everything();
    table.set("S", DEFAULT_KEY, false);
    table.set("S", "simple", true);
    assert!(decide(&table, None, "S", "simple"));
    assert!(!decide(&table, None, "S", "verbose"));
}

#[test]
fn test_mode_show_by_default_false_with_show_list() {
    let table = VisibilityTable::show_everything();
    let mut mode = ModeOverlay {
        show_by_default: Some(false),
        ..Default::default()
    };
    mode.show_sections.insert("S".to_string());
    assert!(decide(&table, Some(&mode), "S", "simple"));
    assert!(!decide(&table, Some(&mode), "T", "simple"));
}

#[test]
fn test_group_expansion_is_idempotent_and_deduplicated() {
    let mut registry = GroupRegistry::new();
    registry
        .register(
            "web",
            vec!["http".to_string(), "router".to_string(), "http".to_string()],
        )
        .unwrap();
    registry
        .register("all", vec!["web".to_string(), "router".to_string()])
        .unwrap();

    let once = registry.resolve("all");
    let twice = registry.resolve("all");
    assert_eq!(once, vec!["http".to_string(), "router".to_string()]);
    assert_eq!(once, twice);
}

#[test]
fn test_message_template_formats_mixed_arguments() {
    let template = CompiledTemplate::compile("{{message}}");
    let out = template.render(
        &ctx("S", "simple"),
        &vals![
            "1: %s 2: %s 3: %s 4: %d 5: %j",
            quill_types::LogValue::Null,
            quill_types::LogValue::Undefined,
            "hello",
            12,
            serde_json::json!({"x": 1, "y": ["a", 2, 3]}),
        ],
    );
    assert_eq!(out, r#"1: null 2: undefined 3: hello 4: 12 5: {"x":1,"y":["a",2,3]}"#);
}

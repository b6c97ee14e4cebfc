use owo_colors::OwoColorize;
use quill_types::ModeOptions;

/// The built-in type templates: colored, timestamped, with a call-site
/// suffix on the conversational types and a full stack block on errors.
pub fn default_formats() -> Vec<(String, String)> {
    let info = format!(
        "{} {} {} {}",
        "{{timestamp}}".bright_black(),
        "info".cyan(),
        "{{message}}",
        "({{file}}:{{line}})".bright_black()
    );
    let warn = format!(
        "{} {} [{{section}}] {} {}",
        "{{timestamp}}".bright_black(),
        "warn".yellow(),
        "{{message}}",
        "({{file}}:{{line}})".bright_black()
    );
    let error = format!(
        "{} {} [{{section}}] {{message}}\n  {{fn}} ({{file}}:{{line}})\n{{stack}}",
        "{{timestamp}}".bright_black(),
        "err!".red().bold()
    );
    let debug = format!(
        "{}",
        "------------------------   debug   ------------------------\n({{section}}) {{file}}:{{line}}: {{message}}\n"
            .yellow()
    );

    vec![
        ("log".to_string(), info.clone()),
        ("info".to_string(), info),
        ("warn".to_string(), warn),
        ("error".to_string(), error),
        ("debug".to_string(), debug),
    ]
}

/// The built-in modes. None is active until selected.
pub fn default_modes() -> Vec<(String, ModeOptions)> {
    vec![
        (
            "normal".to_string(),
            ModeOptions::new()
                .show_by_default(false)
                .show("log")
                .show("info")
                .show("warn")
                .show("error"),
        ),
        ("verbose".to_string(), ModeOptions::new().show_by_default(true)),
        (
            "critical".to_string(),
            ModeOptions::new().show_by_default(false).show("error"),
        ),
        ("silent".to_string(), ModeOptions::new().show_by_default(false)),
    ]
}

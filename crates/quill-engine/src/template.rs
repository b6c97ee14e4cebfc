use crate::callsite::extract_call_site;
use crate::message;
use chrono::Local;
use once_cell::sync::Lazy;
use quill_types::{CallSite, DisplayOptions, LogValue};
use regex::{Captures, Regex};
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

// Double-brace placeholders, matched case-insensitively. Anything else
// between braces passes through verbatim.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{\{(timestamp|type|section|message|fn|path|line|pos|file|stack)\}\}")
        .unwrap()
});

static STACK_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\{\{(fn|path|line|pos|file|stack)\}\}").unwrap());

/// Everything a renderer needs besides the arguments themselves.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub section: String,
    pub log_type: String,
    /// Display settings with any per-handle overrides already merged in.
    pub display: DisplayOptions,
}

/// A format string compiled for repeated rendering.
///
/// Compilation detects whether the template references any call-site
/// placeholder, so the stack is only captured for templates that need it.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    source: String,
    needs_stack: bool,
}

impl CompiledTemplate {
    pub fn compile(source: impl Into<String>) -> Self {
        let source = source.into();
        let needs_stack = STACK_PLACEHOLDER.is_match(&source);
        Self {
            source,
            needs_stack,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn needs_stack(&self) -> bool {
        self.needs_stack
    }

    pub fn render(&self, ctx: &RenderContext, args: &[LogValue]) -> String {
        if args.is_empty() {
            return String::new();
        }

        let stack = if self.needs_stack {
            extract_call_site(ctx.display.stack_index)
        } else {
            CallSite::default()
        };
        let message = message::assemble(args, ctx.display.max_inspect_depth);

        PLACEHOLDER
            .replace_all(&self.source, |caps: &Captures| {
                match caps[1].to_ascii_lowercase().as_str() {
                    "timestamp" => format_timestamp(&ctx.display.date_format),
                    "type" => ctx.log_type.clone(),
                    "section" => ctx.section.clone(),
                    "message" => message.clone(),
                    "fn" => stack.function.clone().unwrap_or_default(),
                    "path" => stack.path.clone().unwrap_or_default(),
                    "line" => stack.line.map(|l| l.to_string()).unwrap_or_default(),
                    "pos" => stack.column.map(|c| c.to_string()).unwrap_or_default(),
                    "file" => stack.file.clone().unwrap_or_default(),
                    "stack" => stack.full_trace.clone().unwrap_or_default(),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

// A malformed chrono format string must not take the log call down with it;
// fall back to the default format.
fn format_timestamp(date_format: &str) -> String {
    let now = Local::now();
    let mut rendered = String::new();
    if write!(rendered, "{}", now.format(date_format)).is_err() {
        rendered.clear();
        let _ = write!(rendered, "{}", now.format("%Y-%m-%d %H:%M:%S"));
    }
    rendered
}

/// A renderer bound to exactly one message type. Re-binding a type replaces
/// its renderer; no history is kept.
#[derive(Clone)]
pub enum Renderer {
    Template(CompiledTemplate),
    Custom(Arc<dyn Fn(&RenderContext, &[LogValue]) -> String + Send + Sync>),
}

impl Renderer {
    pub fn template(source: impl Into<String>) -> Self {
        Renderer::Template(CompiledTemplate::compile(source))
    }

    pub fn custom<F>(render: F) -> Self
    where
        F: Fn(&RenderContext, &[LogValue]) -> String + Send + Sync + 'static,
    {
        Renderer::Custom(Arc::new(render))
    }

    /// The template source, when this renderer was compiled from one.
    pub fn template_source(&self) -> Option<&str> {
        match self {
            Renderer::Template(template) => Some(template.source()),
            Renderer::Custom(_) => None,
        }
    }

    pub fn render(&self, ctx: &RenderContext, args: &[LogValue]) -> String {
        match self {
            Renderer::Template(template) => template.render(ctx, args),
            Renderer::Custom(render) => render(ctx, args),
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderer::Template(template) => {
                f.debug_tuple("Template").field(&template.source).finish()
            }
            Renderer::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(section: &str, log_type: &str) -> RenderContext {
        RenderContext {
            section: section.to_string(),
            log_type: log_type.to_string(),
            display: DisplayOptions::default(),
        }
    }

    #[test]
    fn test_message_only_round_trip() {
        let template = CompiledTemplate::compile("{{message}}");
        let out = template.render(&ctx("db", "simple"), &[LogValue::from("hello")]);
        assert_eq!(out, "hello");
    }

    #[test]
    fn test_section_and_type_substitution() {
        let template = CompiledTemplate::compile("[{{section}}] {{type}}: {{message}}");
        let out = template.render(&ctx("db", "info"), &[LogValue::from("ready")]);
        assert_eq!(out, "[db] info: ready");
    }

    #[test]
    fn test_placeholders_match_case_insensitively() {
        let template = CompiledTemplate::compile("{{MESSAGE}} {{Type}}");
        let out = template.render(&ctx("db", "info"), &[LogValue::from("x")]);
        assert_eq!(out, "x info");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let template = CompiledTemplate::compile("{{message}}! {} {{not_one}}");
        let out = template.render(&ctx("db", "info"), &[LogValue::from("a")]);
        assert_eq!(out, "a! {} {{not_one}}");
    }

    #[test]
    fn test_zero_arguments_render_empty() {
        let template = CompiledTemplate::compile("[{{section}}] {{message}}");
        assert_eq!(template.render(&ctx("db", "info"), &[]), "");
    }

    #[test]
    fn test_stack_dependence_detection() {
        assert!(!CompiledTemplate::compile("{{message}}").needs_stack());
        assert!(CompiledTemplate::compile("{{message}} ({{file}}:{{line}})").needs_stack());
        assert!(CompiledTemplate::compile("{{STACK}}").needs_stack());
    }

    #[test]
    fn test_bad_date_format_degrades_instead_of_panicking() {
        let template = CompiledTemplate::compile("{{timestamp}} {{message}}");
        let mut context = ctx("db", "info");
        context.display.date_format = "%Q".to_string();
        let out = template.render(&context, &[LogValue::from("still here")]);
        assert!(out.ends_with("still here"));
    }

    #[test]
    fn test_custom_renderer_receives_context() {
        let renderer = Renderer::custom(|ctx, args| {
            format!("{}/{}:{}", ctx.section, ctx.log_type, args.len())
        });
        let out = renderer.render(&ctx("db", "info"), &[LogValue::from("a")]);
        assert_eq!(out, "db/info:1");
    }
}

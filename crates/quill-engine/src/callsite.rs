use once_cell::sync::Lazy;
use quill_types::CallSite;
use regex::Regex;
use std::backtrace::Backtrace;

// `   5: some::symbol::path`
static FRAME_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+):\s*(.*?)\s*$").unwrap());
// `        at /path/to/file.rs:12:34`
static FRAME_AT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*at\s+(.*?):(\d+):(\d+)\s*$").unwrap());

// Frames belonging to the logging machinery itself, skipped before the
// caller-facing index is applied.
const INTERNAL_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "quill_types::",
    "quill_engine::",
    "quill_runtime::",
    "quill::",
];

#[derive(Debug, Clone, Default)]
struct Frame {
    function: Option<String>,
    path: Option<String>,
    line: Option<u32>,
    column: Option<u32>,
    raw: Vec<String>,
}

/// Capture the current call stack and select one frame.
///
/// `frame_index` is 1-based over the frames that remain after the logging
/// machinery's own frames are skipped; 1 selects the function containing
/// the log call. An out-of-range index, a stripped binary, or an otherwise
/// unparsable frame yields an empty `CallSite` — placeholders substitute
/// to the empty string and the message is still emitted.
pub fn extract_call_site(frame_index: usize) -> CallSite {
    let backtrace = Backtrace::force_capture();
    parse_backtrace(&backtrace.to_string(), frame_index)
}

fn parse_backtrace(text: &str, frame_index: usize) -> CallSite {
    let frames = parse_frames(text);
    let external: Vec<&Frame> = frames.iter().skip_while(|f| is_internal(f)).collect();

    let Some(frame) = external.get(frame_index.saturating_sub(1)) else {
        return CallSite::default();
    };
    if frame.function.is_none() && frame.path.is_none() {
        return CallSite::default();
    }

    let full_trace = external
        .iter()
        .flat_map(|f| f.raw.iter().cloned())
        .collect::<Vec<_>>()
        .join("\n");

    CallSite {
        function: Some(
            frame
                .function
                .clone()
                .unwrap_or_else(|| "<anonymous>".to_string()),
        ),
        path: frame.path.clone(),
        file: frame.path.as_deref().map(basename),
        line: frame.line,
        column: frame.column,
        full_trace: Some(full_trace),
    }
}

// Two frame shapes are tolerated: a numbered symbol line optionally
// followed by an `at` location line, and a bare `at` location line with no
// symbol (an anonymous frame).
fn parse_frames(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    for line in text.lines() {
        if let Some(caps) = FRAME_HEAD.captures(line) {
            let symbol = caps[2].trim().to_string();
            frames.push(Frame {
                function: if symbol.is_empty() { None } else { Some(symbol) },
                raw: vec![line.to_string()],
                ..Default::default()
            });
        } else if let Some(caps) = FRAME_AT.captures(line) {
            let needs_new_frame = frames.last().map(|f| f.path.is_some()).unwrap_or(true);
            if needs_new_frame {
                frames.push(Frame::default());
            }
            if let Some(frame) = frames.last_mut() {
                frame.path = Some(caps[1].to_string());
                frame.line = caps[2].parse().ok();
                frame.column = caps[3].parse().ok();
                frame.raw.push(line.to_string());
            }
        }
    }
    frames
}

fn is_internal(frame: &Frame) -> bool {
    frame
        .function
        .as_ref()
        .map(|name| INTERNAL_PREFIXES.iter().any(|prefix| name.starts_with(prefix)))
        .unwrap_or(false)
}

fn basename(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

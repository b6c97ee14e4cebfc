use serde::{Deserialize, Serialize};

/// Call-site metadata recovered from the execution stack.
///
/// Every field is optional: a stripped binary or an out-of-range frame
/// index leaves the whole struct empty, and template placeholders
/// substitute to the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallSite {
    /// Function (symbol) name; `<anonymous>` for unnamed frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Full source path as reported by the runtime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Basename of `path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    /// The stack text below the logging machinery's own frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_trace: Option<String>,
}

impl CallSite {
    /// True when the selected frame carried a source location.
    pub fn is_resolved(&self) -> bool {
        self.path.is_some()
    }
}

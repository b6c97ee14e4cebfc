use serde::{Deserialize, Serialize};

/// Process-wide rendering settings.
///
/// Defaults live on the controller; each log handle may override individual
/// fields for its own calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// chrono format string used for `{{timestamp}}`.
    pub date_format: String,
    /// 1-based stack frame selected by the call-site extractor; 1 is the
    /// function containing the log call.
    pub stack_index: usize,
    /// Depth bound for structural inspection of unconsumed arguments.
    pub max_inspect_depth: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            stack_index: 1,
            max_inspect_depth: 20,
        }
    }
}

impl DisplayOptions {
    pub fn apply(&mut self, update: &DisplayUpdate) {
        if let Some(date_format) = &update.date_format {
            self.date_format = date_format.clone();
        }
        if let Some(stack_index) = update.stack_index {
            self.stack_index = stack_index;
        }
        if let Some(max_inspect_depth) = update.max_inspect_depth {
            self.max_inspect_depth = max_inspect_depth;
        }
    }

    /// Merge per-handle overrides over these defaults.
    pub fn merged(&self, overrides: &DisplayUpdate) -> DisplayOptions {
        let mut merged = self.clone();
        merged.apply(overrides);
        merged
    }
}

/// Partial display settings; unset fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_inspect_depth: Option<usize>,
}

impl DisplayUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn stack_index(mut self, index: usize) -> Self {
        self.stack_index = Some(index);
        self
    }

    pub fn max_inspect_depth(mut self, depth: usize) -> Self {
        self.max_inspect_depth = Some(depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_keeps_unset_fields() {
        let defaults = DisplayOptions::default();
        let merged = defaults.merged(&DisplayUpdate::new().date_format("%H:%M"));
        assert_eq!(merged.date_format, "%H:%M");
        assert_eq!(merged.stack_index, defaults.stack_index);
        assert_eq!(merged.max_inspect_depth, defaults.max_inspect_depth);
    }
}

use serde::{Deserialize, Serialize};

/// A named visibility override profile.
///
/// `show` and `hide` may name sections, registered types, or groups; the
/// names are resolved to flat section/type sets when the mode is activated.
/// At most one mode is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_by_default: Option<bool>,
}

impl ModeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(mut self, name: impl Into<String>) -> Self {
        self.show.push(name.into());
        self
    }

    pub fn hide(mut self, name: impl Into<String>) -> Self {
        self.hide.push(name.into());
        self
    }

    pub fn show_by_default(mut self, flag: bool) -> Self {
        self.show_by_default = Some(flag);
        self
    }
}

use quill_types::{shared, DisplayUpdate, ModeOptions, SharedSink, Sink};

/// Batch configuration, applied in one call in a fixed order: groups,
/// outputs, formats, modes, active-mode selection, global default
/// visibility, hide list, show list, display settings. Entries keep their
/// insertion order within each list.
#[derive(Default)]
pub struct Options {
    pub groups: Vec<(String, Vec<String>)>,
    pub outputs: Vec<(String, SharedSink)>,
    pub formats: Vec<(String, String)>,
    pub modes: Vec<(String, ModeOptions)>,
    pub mode: Option<String>,
    pub show_by_default: Option<bool>,
    pub hide: Vec<String>,
    pub show: Vec<String>,
    pub display: Option<DisplayUpdate>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, name: impl Into<String>, members: Vec<String>) -> Self {
        self.groups.push((name.into(), members));
        self
    }

    pub fn output<S: Sink + 'static>(mut self, target: impl Into<String>, sink: S) -> Self {
        self.outputs.push((target.into(), shared(sink)));
        self
    }

    pub fn output_shared(mut self, target: impl Into<String>, sink: SharedSink) -> Self {
        self.outputs.push((target.into(), sink));
        self
    }

    pub fn format(mut self, log_type: impl Into<String>, template: impl Into<String>) -> Self {
        self.formats.push((log_type.into(), template.into()));
        self
    }

    pub fn mode_definition(mut self, name: impl Into<String>, options: ModeOptions) -> Self {
        self.modes.push((name.into(), options));
        self
    }

    pub fn mode(mut self, name: impl Into<String>) -> Self {
        self.mode = Some(name.into());
        self
    }

    pub fn show_by_default(mut self, flag: bool) -> Self {
        self.show_by_default = Some(flag);
        self
    }

    pub fn hide(mut self, target: impl Into<String>) -> Self {
        self.hide.push(target.into());
        self
    }

    pub fn show(mut self, target: impl Into<String>) -> Self {
        self.show.push(target.into());
        self
    }

    pub fn display(mut self, update: DisplayUpdate) -> Self {
        self.display = Some(update);
        self
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("groups", &self.groups)
            .field("outputs", &self.outputs.len())
            .field("formats", &self.formats)
            .field("modes", &self.modes)
            .field("mode", &self.mode)
            .field("show_by_default", &self.show_by_default)
            .field("hide", &self.hide)
            .field("show", &self.show)
            .field("display", &self.display)
            .finish()
    }
}

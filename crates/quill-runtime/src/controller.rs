use crate::options::Options;
use crate::router::OutputMap;
use crate::sink::FileSink;
use crate::tap::Tap;
use crate::Result;
use quill_engine::{decide, GroupRegistry, ModeOverlay, RenderContext, Renderer, VisibilityTable};
use quill_types::{
    shared, DisplayOptions, DisplayUpdate, LogValue, ModeOptions, SharedSink, Sink, DEFAULT_KEY,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Owner of all mutable logging state: groups, modes, visibility rules,
/// renderers, outputs, and display defaults.
///
/// A controller is an explicit, constructible instance — several can
/// coexist, each with fully independent state. Cloning is cheap and every
/// clone refers to the same state; log handles hold such a clone. All
/// mutation is synchronous and per-call: a multi-step configuration
/// sequence is observable mid-sequence by concurrent log calls.
#[derive(Clone)]
pub struct Controller {
    state: Arc<Mutex<State>>,
}

struct State {
    groups: GroupRegistry,
    table: VisibilityTable,
    modes: HashMap<String, ModeOptions>,
    active_mode: Option<ModeOverlay>,
    formats: HashMap<String, Renderer>,
    outputs: OutputMap,
    display: DisplayOptions,
    handles: HashMap<String, Arc<LogShared>>,
}

struct LogShared {
    overrides: Mutex<DisplayUpdate>,
    tap: Mutex<Tap>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// A controller with no formats or rules beyond the conventional
    /// defaults: show everything, stdout for everything, stderr for the
    /// `error` type.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                groups: GroupRegistry::new(),
                table: VisibilityTable::show_everything(),
                modes: HashMap::new(),
                active_mode: None,
                formats: HashMap::new(),
                outputs: OutputMap::with_standard_streams(),
                display: DisplayOptions::default(),
                handles: HashMap::new(),
            })),
        }
    }

    /// The per-section log handle. Handles are cached: every call for the
    /// same section observes the same tap and display overrides.
    pub fn log(&self, section: &str) -> Log {
        let shared = {
            let mut guard = self.state();
            let state = &mut *guard;
            Arc::clone(state.handles.entry(section.to_string()).or_insert_with(|| {
                Arc::new(LogShared {
                    overrides: Mutex::new(DisplayUpdate::default()),
                    tap: Mutex::new(Tap::default()),
                })
            }))
        };
        Log {
            controller: self.clone(),
            section: section.to_string(),
            shared,
        }
    }

    /// Batch-apply configuration in the fixed order: groups, outputs,
    /// formats, modes, active mode, default visibility, hide list, show
    /// list, display settings.
    pub fn configure(&self, options: Options) -> Result<()> {
        for (name, members) in options.groups {
            self.group(&name, members)?;
        }
        for (target, sink) in options.outputs {
            self.output_shared(&target, sink);
        }
        for (log_type, template) in options.formats {
            self.format(&log_type, &template);
        }
        for (name, mode_options) in options.modes {
            self.define_mode(&name, mode_options);
        }
        if let Some(name) = options.mode {
            self.mode(&name);
        }
        if let Some(flag) = options.show_by_default {
            self.show_by_default(flag);
        }
        for target in options.hide {
            self.hide(&target);
        }
        for target in options.show {
            self.show(&target);
        }
        if let Some(update) = options.display {
            self.display(update);
        }
        Ok(())
    }

    // ---- visibility ------------------------------------------------------

    /// Show a section, group, registered type, or `"section/type"` path.
    pub fn show(&self, target: &str) {
        self.apply_visibility(target, true);
    }

    /// Hide a section, group, registered type, or `"section/type"` path.
    pub fn hide(&self, target: &str) {
        self.apply_visibility(target, false);
    }

    /// Drop every rule and show everything by default.
    pub fn show_all(&self) {
        self.state().table = VisibilityTable::show_everything();
    }

    /// Drop every rule and hide everything by default.
    pub fn hide_all(&self) {
        self.state().table = VisibilityTable::hide_everything();
    }

    /// Restore the initial show-everything state.
    pub fn reset(&self) {
        self.state().table.reset();
    }

    /// Set the global default without touching more specific rules.
    pub fn show_by_default(&self, flag: bool) {
        self.state().table.set_default(flag);
    }

    fn apply_visibility(&self, target: &str, visible: bool) {
        let mut guard = self.state();
        let state = &mut *guard;
        let (section_part, type_part) = split_target(state, target);
        let sections = state.groups.resolve(&section_part);
        for section in sections {
            state.table.set(&section, &type_part, visible);
        }
    }

    // ---- formats ---------------------------------------------------------

    /// Register or replace a type's renderer from a template string.
    pub fn format(&self, log_type: &str, template: &str) {
        self.state()
            .formats
            .insert(log_type.to_string(), Renderer::template(template));
    }

    /// Register or replace a type's renderer from a custom function.
    pub fn format_fn<F>(&self, log_type: &str, render: F)
    where
        F: Fn(&RenderContext, &[LogValue]) -> String + Send + Sync + 'static,
    {
        self.state()
            .formats
            .insert(log_type.to_string(), Renderer::custom(render));
    }

    /// Read back a type's template source; `None` for unregistered types
    /// and custom-function renderers.
    pub fn template(&self, log_type: &str) -> Option<String> {
        self.state()
            .formats
            .get(log_type)
            .and_then(|renderer| renderer.template_source().map(String::from))
    }

    pub fn remove_format(&self, log_type: &str) {
        self.state().formats.remove(log_type);
    }

    pub fn formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state().formats.keys().cloned().collect();
        names.sort();
        names
    }

    // ---- outputs ---------------------------------------------------------

    /// Route a section, group, registered type, or `"section/type"` path to
    /// a sink.
    pub fn output<S: Sink + 'static>(&self, target: &str, sink: S) {
        self.output_shared(target, shared(sink));
    }

    /// Route to an already-shared sink (one destination, several routes).
    pub fn output_shared(&self, target: &str, sink: SharedSink) {
        let mut guard = self.state();
        let state = &mut *guard;
        let (section_part, type_part) = split_target(state, target);
        let sections = state.groups.resolve(&section_part);
        for section in sections {
            state.outputs.set(&section, &type_part, Arc::clone(&sink));
        }
    }

    /// Route to a file, opened in append mode. Failing to open the file is
    /// the one loud output error: silently dropping all future output for
    /// a route would be surprising.
    pub fn output_path(&self, target: &str, path: impl AsRef<Path>) -> Result<()> {
        let sink = FileSink::append(path)?;
        self.output(target, sink);
        Ok(())
    }

    // ---- modes -----------------------------------------------------------

    /// Activate a registered mode. Unknown names are a silent no-op.
    pub fn mode(&self, name: &str) {
        let mut guard = self.state();
        let state = &mut *guard;
        let Some(options) = state.modes.get(name).cloned() else {
            return;
        };
        state.active_mode = Some(build_overlay(name, &options, &state.groups, &state.formats));
    }

    /// Deactivate the active mode, if any.
    pub fn clear_mode(&self) {
        self.state().active_mode = None;
    }

    pub fn active_mode(&self) -> Option<String> {
        self.state().active_mode.as_ref().map(|m| m.name.clone())
    }

    /// Register or replace a mode definition. Changing the definition of
    /// the active mode takes effect on the next activation.
    pub fn define_mode(&self, name: &str, options: ModeOptions) {
        self.state().modes.insert(name.to_string(), options);
    }

    pub fn remove_mode(&self, name: &str) {
        self.state().modes.remove(name);
    }

    pub fn modes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state().modes.keys().cloned().collect();
        names.sort();
        names
    }

    // ---- groups ----------------------------------------------------------

    /// Register or replace a group. A definition that would make group
    /// membership cyclic is rejected and nothing changes.
    pub fn group(&self, name: &str, members: Vec<String>) -> Result<()> {
        self.state().groups.register(name, members)?;
        Ok(())
    }

    pub fn group_members(&self, name: &str) -> Option<Vec<String>> {
        self.state().groups.members(name).map(|m| m.to_vec())
    }

    pub fn remove_group(&self, name: &str) {
        self.state().groups.remove(name);
    }

    pub fn groups(&self) -> Vec<String> {
        self.state().groups.names()
    }

    // ---- display ---------------------------------------------------------

    /// Update the process-wide display defaults.
    pub fn display(&self, update: DisplayUpdate) {
        self.state().display.apply(&update);
    }

    fn state(&self) -> MutexGuard<'_, State> {
        lock_unpoisoned(&self.state)
    }
}

/// A handle bound to one section.
///
/// Emission never fails and never panics: an unregistered type, a
/// suppressed message, a missing route, or a sink write error all end the
/// call silently.
#[derive(Clone)]
pub struct Log {
    controller: Controller,
    section: String,
    shared: Arc<LogShared>,
}

impl Log {
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The owning controller, for configuration calls from call sites that
    /// only hold a handle.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// The generic emit entry point: decide, render, deliver. Every typed
    /// convenience method forwards here.
    pub fn emit(&self, log_type: &str, args: Vec<LogValue>) {
        let (renderer, context, sink) = {
            let guard = self.controller.state();
            let state = &*guard;
            let Some(renderer) = state.formats.get(log_type) else {
                return;
            };
            if !decide(
                &state.table,
                state.active_mode.as_ref(),
                &self.section,
                log_type,
            ) {
                return;
            }
            let overrides = lock_unpoisoned(&self.shared.overrides).clone();
            let context = RenderContext {
                section: self.section.clone(),
                log_type: log_type.to_string(),
                display: state.display.merged(&overrides),
            };
            (
                renderer.clone(),
                context,
                state.outputs.route(&self.section, log_type),
            )
        };

        let mut line = renderer.render(&context, &args);
        line.push('\n');

        lock_unpoisoned(&self.shared.tap).push(&line);
        if let Some(sink) = sink {
            let _ = lock_unpoisoned(&sink).write(&line);
        }
    }

    pub fn log(&self, args: Vec<LogValue>) {
        self.emit("log", args);
    }

    pub fn info(&self, args: Vec<LogValue>) {
        self.emit("info", args);
    }

    pub fn warn(&self, args: Vec<LogValue>) {
        self.emit("warn", args);
    }

    pub fn error(&self, args: Vec<LogValue>) {
        self.emit("error", args);
    }

    pub fn debug(&self, args: Vec<LogValue>) {
        self.emit("debug", args);
    }

    // ---- per-handle display overrides ------------------------------------

    pub fn set_date_format(&self, format: impl Into<String>) {
        lock_unpoisoned(&self.shared.overrides).date_format = Some(format.into());
    }

    pub fn set_stack_index(&self, index: usize) {
        lock_unpoisoned(&self.shared.overrides).stack_index = Some(index);
    }

    pub fn set_max_inspect_depth(&self, depth: usize) {
        lock_unpoisoned(&self.shared.overrides).max_inspect_depth = Some(depth);
    }

    pub fn clear_display_overrides(&self) {
        *lock_unpoisoned(&self.shared.overrides) = DisplayUpdate::default();
    }

    // ---- tap -------------------------------------------------------------

    /// Attach a consumer for this section's emitted lines. Lines queued
    /// before attachment are flushed to it in FIFO order exactly once.
    pub fn attach_consumer<F>(&self, consumer: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        lock_unpoisoned(&self.shared.tap).attach(Box::new(consumer));
    }

    pub fn detach_consumer(&self) {
        lock_unpoisoned(&self.shared.tap).detach();
    }

    /// Lines currently buffered waiting for a consumer.
    pub fn queued(&self) -> usize {
        lock_unpoisoned(&self.shared.tap).queued()
    }
}

impl std::fmt::Debug for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Log").field("section", &self.section).finish()
    }
}

// `"section/type"` paths split on the first slash; a bare name that matches
// a registered type addresses the `_default` section's type tier, anything
// else addresses the section tier.
fn split_target(state: &State, target: &str) -> (String, String) {
    let mut parts = target.split('/');
    let head = parts.next().unwrap_or(target);
    match parts.next() {
        Some(log_type) if !log_type.is_empty() => (head.to_string(), log_type.to_string()),
        Some(_) => (head.to_string(), DEFAULT_KEY.to_string()),
        None => {
            if state.formats.contains_key(head) {
                (DEFAULT_KEY.to_string(), head.to_string())
            } else {
                (head.to_string(), DEFAULT_KEY.to_string())
            }
        }
    }
}

fn build_overlay(
    name: &str,
    options: &ModeOptions,
    groups: &GroupRegistry,
    formats: &HashMap<String, Renderer>,
) -> ModeOverlay {
    let mut overlay = ModeOverlay {
        name: name.to_string(),
        show_by_default: options.show_by_default,
        ..Default::default()
    };
    for entry in groups.resolve_all(&options.show) {
        if formats.contains_key(&entry) {
            overlay.show_types.insert(entry);
        } else {
            overlay.show_sections.insert(entry);
        }
    }
    for entry in groups.resolve_all(&options.hide) {
        if formats.contains_key(&entry) {
            overlay.hide_types.insert(entry);
        } else {
            overlay.hide_sections.insert(entry);
        }
    }
    overlay
}

// A poisoned lock only means another thread panicked mid-update; logging
// must keep working, so take the inner value either way.
fn lock_unpoisoned<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

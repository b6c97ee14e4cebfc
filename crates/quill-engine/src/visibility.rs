use quill_types::DEFAULT_KEY;
use std::collections::{HashMap, HashSet};

// Signal weights, least specific first. Only the relative ordering is
// contractual: an exact rule must outweigh any combination of wildcard and
// global signals, and a wildcard must outweigh the global default.
const GLOBAL_WEIGHT: i32 = 1;
const WILDCARD_WEIGHT: i32 = 10;
const EXACT_WEIGHT: i32 = 1000;

/// Tri-state show/hide flags keyed by section, then type.
///
/// The reserved `_default` pseudo-section and pseudo-type hold wildcard
/// rules. Absence of an entry means "inherit from a less specific rule",
/// never "hide".
#[derive(Debug, Clone)]
pub struct VisibilityTable {
    flags: HashMap<String, HashMap<String, bool>>,
}

impl Default for VisibilityTable {
    fn default() -> Self {
        Self::show_everything()
    }
}

impl VisibilityTable {
    /// The initial state: a single global show rule.
    pub fn show_everything() -> Self {
        let mut table = Self {
            flags: HashMap::new(),
        };
        table.set_default(true);
        table
    }

    /// A single global hide rule.
    pub fn hide_everything() -> Self {
        let mut table = Self {
            flags: HashMap::new(),
        };
        table.set_default(false);
        table
    }

    pub fn set(&mut self, section: &str, log_type: &str, visible: bool) {
        self.flags
            .entry(section.to_string())
            .or_default()
            .insert(log_type.to_string(), visible);
    }

    pub fn get(&self, section: &str, log_type: &str) -> Option<bool> {
        self.flags.get(section)?.get(log_type).copied()
    }

    /// Set the `_default/_default` global rule without touching anything else.
    pub fn set_default(&mut self, visible: bool) {
        self.set(DEFAULT_KEY, DEFAULT_KEY, visible);
    }

    /// Drop every rule and restore the show-everything state.
    pub fn reset(&mut self) {
        *self = Self::show_everything();
    }
}

/// The active mode's directives, pre-resolved to flat name sets.
///
/// Group names in the mode definition are expanded before the overlay is
/// built; names matching a registered type land in the type sets, everything
/// else in the section sets. A name present in both show and hide hides.
#[derive(Debug, Clone, Default)]
pub struct ModeOverlay {
    pub name: String,
    pub show_sections: HashSet<String>,
    pub hide_sections: HashSet<String>,
    pub show_types: HashSet<String>,
    pub hide_types: HashSet<String>,
    pub show_by_default: Option<bool>,
}

impl ModeOverlay {
    fn section_flag(&self, section: &str) -> Option<bool> {
        if self.hide_sections.contains(section) {
            Some(false)
        } else if self.show_sections.contains(section) {
            Some(true)
        } else {
            None
        }
    }

    fn type_flag(&self, log_type: &str) -> Option<bool> {
        if self.hide_types.contains(log_type) {
            Some(false)
        } else if self.show_types.contains(log_type) {
            Some(true)
        } else {
            None
        }
    }
}

/// Decide whether a (section, type) message is emitted.
///
/// Weighted additive scoring: each configured signal contributes its weight,
/// positive for show and negative for hide, and the message is emitted iff
/// the total is non-negative. Exact rules dominate wildcards, wildcards
/// dominate the global default, and partial signals combine — a type shown
/// by default plus a section hidden by default falls back to the global
/// flag's side. The mode overlay replaces the table's signal at its own
/// tier only, so a manual exact rule still overrides a mode wildcard.
pub fn decide(
    table: &VisibilityTable,
    mode: Option<&ModeOverlay>,
    section: &str,
    log_type: &str,
) -> bool {
    let mut score = 0i32;

    let global = mode
        .and_then(|m| m.show_by_default)
        .or_else(|| table.get(DEFAULT_KEY, DEFAULT_KEY));
    if let Some(flag) = global {
        score += signed(flag, GLOBAL_WEIGHT);
    }

    let type_wildcard = mode
        .and_then(|m| m.type_flag(log_type))
        .or_else(|| table.get(DEFAULT_KEY, log_type));
    if let Some(flag) = type_wildcard {
        score += signed(flag, WILDCARD_WEIGHT);
    }

    let section_wildcard = mode
        .and_then(|m| m.section_flag(section))
        .or_else(|| table.get(section, DEFAULT_KEY));
    if let Some(flag) = section_wildcard {
        score += signed(flag, WILDCARD_WEIGHT);
    }

    // Modes never reach the exact tier.
    if let Some(flag) = table.get(section, log_type) {
        score += signed(flag, EXACT_WEIGHT);
    }

    score >= 0
}

fn signed(flag: bool, weight: i32) -> i32 {
    if flag { weight } else { -weight }
}

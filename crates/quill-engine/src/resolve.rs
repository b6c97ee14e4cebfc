use crate::{Error, Result};
use std::collections::HashMap;

/// Registry of named groups.
///
/// A group maps to an ordered list of member names; each member is either a
/// section or another group. Registration keeps the membership graph
/// acyclic, so resolution never recurses unboundedly.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: HashMap<String, Vec<String>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a group.
    ///
    /// A definition that would make group membership cyclic is rejected and
    /// the registry is left exactly as it was.
    pub fn register(&mut self, name: &str, members: Vec<String>) -> Result<()> {
        let members = dedupe(members);
        let previous = self.groups.insert(name.to_string(), members);
        if let Err(err) = self.validate() {
            match previous {
                Some(members) => {
                    self.groups.insert(name.to_string(), members);
                }
                None => {
                    self.groups.remove(name);
                }
            }
            return Err(err);
        }
        Ok(())
    }

    /// Remove a group; returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.groups.remove(name).is_some()
    }

    /// Read back a group's registered (unexpanded) members.
    pub fn members(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(|m| m.as_slice())
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Expand one name into its flat section list.
    ///
    /// A registered group expands recursively; anything else passes through
    /// as a singleton. The result is deduplicated preserving first-seen
    /// order.
    pub fn resolve(&self, name: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut visiting = Vec::new();
        self.expand(name, &mut visiting, &mut out);
        dedupe(out)
    }

    /// Expand several names, concatenating per-element resolution and
    /// deduplicating preserving first-seen order.
    pub fn resolve_all(&self, names: &[String]) -> Vec<String> {
        let mut out = Vec::new();
        let mut visiting = Vec::new();
        for name in names {
            self.expand(name, &mut visiting, &mut out);
        }
        dedupe(out)
    }

    fn expand(&self, name: &str, visiting: &mut Vec<String>, out: &mut Vec<String>) {
        match self.groups.get(name) {
            Some(members) => {
                // The visited guard cannot trip on a graph built through
                // register(), which rejects cycles; it bounds recursion for
                // any registry state regardless.
                if visiting.iter().any(|n| n == name) {
                    return;
                }
                visiting.push(name.to_string());
                for member in members {
                    self.expand(member, visiting, out);
                }
                visiting.pop();
            }
            None => out.push(name.to_string()),
        }
    }

    fn validate(&self) -> Result<()> {
        for name in self.groups.keys() {
            self.check(name, &mut Vec::new())?;
        }
        Ok(())
    }

    fn check(&self, name: &str, path: &mut Vec<String>) -> Result<()> {
        if let Some(members) = self.groups.get(name) {
            if path.iter().any(|n| n == name) {
                return Err(Error::GroupCycle(name.to_string()));
            }
            path.push(name.to_string());
            for member in members {
                self.check(member, path)?;
            }
            path.pop();
        }
        Ok(())
    }
}

fn dedupe(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_name_resolves_to_itself() {
        let registry = GroupRegistry::new();
        assert_eq!(registry.resolve("db"), vec!["db".to_string()]);
    }

    #[test]
    fn test_nested_groups_expand_in_order() {
        let mut registry = GroupRegistry::new();
        registry
            .register("storage", strings(&["db", "cache"]))
            .unwrap();
        registry
            .register("backend", strings(&["api", "storage"]))
            .unwrap();
        assert_eq!(registry.resolve("backend"), strings(&["api", "db", "cache"]));
    }

    #[test]
    fn test_overlapping_members_dedupe_first_seen() {
        let mut registry = GroupRegistry::new();
        registry
            .register("a", strings(&["db", "cache"]))
            .unwrap();
        registry
            .register("b", strings(&["cache", "api"]))
            .unwrap();
        let resolved = registry.resolve_all(&strings(&["a", "b", "db"]));
        assert_eq!(resolved, strings(&["db", "cache", "api"]));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut registry = GroupRegistry::new();
        registry
            .register("dup", strings(&["x", "x", "y"]))
            .unwrap();
        let first = registry.resolve("dup");
        let second = registry.resolve("dup");
        assert_eq!(first, strings(&["x", "y"]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_cycle_is_rejected_and_rolled_back() {
        let mut registry = GroupRegistry::new();
        registry.register("a", strings(&["b"])).unwrap();
        let err = registry.register("b", strings(&["a"])).unwrap_err();
        assert!(matches!(err, Error::GroupCycle(_)));
        // The failed definition must not survive.
        assert!(registry.members("b").is_none());
        assert_eq!(registry.resolve("a"), vec!["b".to_string()]);
    }

    #[test]
    fn test_self_cycle_is_rejected() {
        let mut registry = GroupRegistry::new();
        let err = registry.register("me", strings(&["me"])).unwrap_err();
        assert!(matches!(err, Error::GroupCycle(_)));
    }

    #[test]
    fn test_replacing_a_group_keeps_previous_on_cycle() {
        let mut registry = GroupRegistry::new();
        registry.register("a", strings(&["x"])).unwrap();
        registry.register("b", strings(&["a"])).unwrap();
        let err = registry.register("a", strings(&["b"])).unwrap_err();
        assert!(matches!(err, Error::GroupCycle(_)));
        assert_eq!(registry.members("a").unwrap(), &strings(&["x"])[..]);
    }
}

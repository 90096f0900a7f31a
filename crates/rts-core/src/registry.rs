//! Script registry
//!
//! Holds every compiled [`ScriptDef`] for every map. Each load (one file or
//! one lump) gets a serial number; a `START_MAP` block purges definitions
//! for the same map that came from an earlier load, so later files override
//! earlier ones. Definitions for [`ALL_MAPS`] are never purged.

use crate::error::{Error, Result};
use crate::identity::ALL_MAPS;
use crate::script::ScriptDef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Save-stable reference to a script definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRef {
    /// Owning map id of the definition
    pub map: String,
    pub name: Option<String>,
    /// Position among the definitions with the same map id and name
    pub index: usize,
}

impl fmt::Display for ScriptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}/{}#{}", self.map, name, self.index),
            None => write!(f, "{}#{}", self.map, self.index),
        }
    }
}

/// All compiled script definitions
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    scripts: Vec<Arc<ScriptDef>>,
    next_serial: u32,
}

impl ScriptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load and return its serial
    pub fn begin_load(&mut self) -> u32 {
        self.next_serial += 1;
        self.next_serial
    }

    /// Add a compiled definition
    pub fn add(&mut self, def: ScriptDef) -> Arc<ScriptDef> {
        let def = Arc::new(def);
        self.scripts.push(Arc::clone(&def));
        def
    }

    /// Remove definitions for `map` that came from loads other than `serial`
    ///
    /// Returns the number of definitions removed. [`ALL_MAPS`] is never purged.
    pub fn purge_map(&mut self, map: &str, serial: u32) -> usize {
        if map.eq_ignore_ascii_case(ALL_MAPS) {
            return 0;
        }
        let before = self.scripts.len();
        self.scripts
            .retain(|s| !(s.map.eq_ignore_ascii_case(map) && s.load_serial != serial));
        before - self.scripts.len()
    }

    /// Remove every definition
    pub fn clear(&mut self) {
        self.scripts.clear();
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// All definitions in load order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ScriptDef>> {
        self.scripts.iter()
    }

    /// Definitions that apply to a map (its own plus [`ALL_MAPS`]), in load order
    pub fn for_map<'a>(&'a self, map: &'a str) -> impl Iterator<Item = &'a Arc<ScriptDef>> + 'a {
        self.scripts.iter().filter(move |s| s.applies_to(map))
    }

    /// Find a definition by name, searching every map
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<ScriptDef>> {
        self.scripts.iter().find(|s| s.has_name(name))
    }

    /// Definitions sharing a map id and name (or both unnamed), in load order
    fn same_identity<'s: 'a, 'a>(
        &'s self,
        map: &'a str,
        name: Option<&'a str>,
    ) -> impl Iterator<Item = &'s Arc<ScriptDef>> + 'a {
        self.scripts.iter().filter(move |s| {
            s.map.eq_ignore_ascii_case(map)
                && match name {
                    Some(name) => s.has_name(name),
                    None => s.name.is_none(),
                }
        })
    }

    /// Build the save-stable reference for a definition
    pub fn script_ref(&self, def: &ScriptDef) -> ScriptRef {
        let index = self
            .same_identity(&def.map, def.name.as_deref())
            .position(|s| std::ptr::eq(Arc::as_ptr(s), def))
            .unwrap_or(0);
        ScriptRef {
            map: def.map.clone(),
            name: def.name.clone(),
            index,
        }
    }

    /// Resolve a save-stable reference
    ///
    /// The reference picks the n-th definition with the same map id and name,
    /// so edits to differently named scripts do not shift it.
    pub fn resolve(&self, script: &ScriptRef) -> Result<&Arc<ScriptDef>> {
        self.same_identity(&script.map, script.name.as_deref())
            .nth(script.index)
            .ok_or_else(|| Error::ScriptNotFound(script.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{SourceLocation, Spatial};

    fn def(map: &str, name: Option<&str>, serial: u32) -> ScriptDef {
        let mut def = ScriptDef::new(map, Spatial::Everywhere, SourceLocation::default());
        def.name = name.map(str::to_string);
        def.load_serial = serial;
        def
    }

    #[test]
    fn test_purge_keeps_current_load_and_all() {
        let mut registry = ScriptRegistry::new();
        let first = registry.begin_load();
        registry.add(def("MAP01", Some("old"), first));
        registry.add(def(ALL_MAPS, Some("global"), first));

        let second = registry.begin_load();
        registry.add(def("MAP01", Some("new"), second));

        assert_eq!(registry.purge_map("MAP01", second), 1);
        assert_eq!(registry.purge_map(ALL_MAPS, second), 0);
        assert_eq!(registry.len(), 2);
        assert!(registry.find_by_name("new").is_some());
        assert!(registry.find_by_name("old").is_none());
        assert!(registry.find_by_name("global").is_some());
    }

    #[test]
    fn test_for_map_includes_all() {
        let mut registry = ScriptRegistry::new();
        registry.add(def("MAP01", None, 1));
        registry.add(def("MAP02", None, 1));
        registry.add(def(ALL_MAPS, None, 1));
        assert_eq!(registry.for_map("MAP01").count(), 2);
        assert_eq!(registry.for_map("MAP03").count(), 1);
    }

    #[test]
    fn test_script_ref_duplicate_names() {
        let mut registry = ScriptRegistry::new();
        let first = registry.add(def("MAP01", Some("GUARD"), 1));
        registry.add(def("MAP01", None, 1));
        let second = registry.add(def("MAP01", Some("guard"), 1));

        let second_ref = registry.script_ref(&second);
        assert_eq!(second_ref.index, 1);
        assert!(Arc::ptr_eq(registry.resolve(&second_ref).unwrap(), &second));
        let first_ref = registry.script_ref(&first);
        assert_eq!(first_ref.index, 0);
        assert!(Arc::ptr_eq(registry.resolve(&first_ref).unwrap(), &first));

        let third = ScriptRef {
            index: 2,
            ..second_ref
        };
        assert!(registry.resolve(&third).is_err());
    }

    #[test]
    fn test_script_ref_roundtrip() {
        let mut registry = ScriptRegistry::new();
        registry.add(def("MAP01", None, 1));
        let second = registry.add(def("MAP01", None, 1));
        let named = registry.add(def("MAP01", Some("boss"), 1));

        let by_index = registry.script_ref(&second);
        assert_eq!(by_index.index, 1);
        assert!(Arc::ptr_eq(registry.resolve(&by_index).unwrap(), &second));

        let by_name = registry.script_ref(&named);
        assert_eq!(by_name.name.as_deref(), Some("boss"));
        assert!(Arc::ptr_eq(registry.resolve(&by_name).unwrap(), &named));

        let missing = ScriptRef {
            map: "MAP09".to_string(),
            name: None,
            index: 0,
        };
        assert!(matches!(
            registry.resolve(&missing),
            Err(Error::ScriptNotFound(_))
        ));
    }
}

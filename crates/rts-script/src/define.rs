//! `#DEFINE` substitution table

use indexmap::IndexMap;

/// Text substitutions applied to whole tokens
///
/// Names are case-insensitive. The table lives for one compile and is
/// cleared when it starts and ends.
#[derive(Debug, Clone, Default)]
pub struct DefineTable {
    entries: IndexMap<String, String>,
}

impl DefineTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition
    pub fn define(&mut self, name: &str, value: &str) {
        self.entries
            .insert(name.to_ascii_uppercase(), value.to_string());
    }

    /// Value of a definition
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Replace a token that names a definition
    pub fn substitute(&self, token: String) -> String {
        match self.get(&token) {
            Some(value) => value.to_string(),
            None => token,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute() {
        let mut defines = DefineTable::new();
        defines.define("boss_hp", "500");
        assert_eq!(defines.substitute("BOSS_HP".to_string()), "500");
        assert_eq!(defines.substitute("other".to_string()), "other");

        defines.define("BOSS_HP", "900");
        assert_eq!(defines.get("boss_hp"), Some("900"));
        assert_eq!(defines.len(), 1);

        defines.clear();
        assert!(defines.is_empty());
    }
}

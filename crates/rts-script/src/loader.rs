//! Script file loader

use crate::compiler::{compile, CompileOptions, CompileReport};
use crate::error::{Error, Result};
use rts_core::ScriptRegistry;
use std::fs;
use std::path::Path;
use tracing::debug;

/// File extension of radius trigger scripts
pub const SCRIPT_EXTENSION: &str = "rts";

/// Loads script files into a registry
///
/// Each file is one load: a `START_MAP` in a later file replaces that map's
/// scripts from earlier files.
pub struct Loader<'a> {
    registry: &'a mut ScriptRegistry,
    options: CompileOptions,
}

impl<'a> Loader<'a> {
    /// Create a loader writing into a registry
    pub fn new(registry: &'a mut ScriptRegistry, options: CompileOptions) -> Self {
        Self {
            registry,
            options,
        }
    }

    /// Compile source text held in memory (a map lump, say)
    pub fn load_str(&mut self, source: &str, origin: &str) -> Result<CompileReport> {
        compile(source, origin, self.registry, &self.options)
    }

    /// Load a single script file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<CompileReport> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        // Lumps are often Latin-1; keep going rather than reject them
        let source = String::from_utf8_lossy(&bytes);
        self.load_str(&source, &path.display().to_string())
    }

    /// Load every `.rts` file under a directory, recursively
    ///
    /// Files load in name order so overrides are deterministic.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<CompileReport> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        let mut total = CompileReport::default();
        for file_path in entries {
            let report = if file_path.is_dir() {
                self.load_directory(&file_path)?
            } else if is_script(&file_path) {
                self.load_file(&file_path)?
            } else {
                debug!(path = %file_path.display(), "skipping non-script file");
                continue;
            };
            total.scripts += report.scripts;
            total.purged += report.purged;
            total.warnings += report.warnings;
            total.version = report.version.or(total.version);
        }
        Ok(total)
    }
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(SCRIPT_EXTENSION))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rts_core::{Action, GameAction};
    use tempfile::TempDir;

    fn script(map: &str, amount: u32) -> String {
        format!(
            "START_MAP {map}\nRADIUS_TRIGGER 0 0 64\nDAMAGEPLAYER {amount}\nEND_RADIUS_TRIGGER\nEND_MAP\n"
        )
    }

    fn amounts(registry: &ScriptRegistry, map: &str) -> Vec<f32> {
        registry
            .for_map(map)
            .filter_map(|def| match def.states[0].action {
                Action::Game(GameAction::DamagePlayer { amount }) => Some(amount),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_load_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("level.rts");
        fs::write(&path, script("MAP01", 10)).unwrap();

        let mut registry = ScriptRegistry::new();
        let mut loader = Loader::new(&mut registry, CompileOptions::default());
        let report = loader.load_file(&path).unwrap();
        assert_eq!(report.scripts, 1);
        assert_eq!(registry.iter().next().unwrap().source.file, path.display().to_string());
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.rts");
        fs::write(&path, "START_MAP MAP01\nBOGUS_BLOCK\n").unwrap();

        let mut registry = ScriptRegistry::new();
        let strict = CompileOptions {
            strict: true,
            ..CompileOptions::default()
        };
        let err = Loader::new(&mut registry, strict).load_file(&path).unwrap_err();
        match err {
            Error::Parse { file, line, .. } => {
                assert!(file.ends_with("broken.rts"));
                assert_eq!(line, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_load_directory_in_name_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b_override.rts"), script("MAP01", 2)).unwrap();
        fs::write(temp.path().join("a_base.rts"), script("MAP01", 1)).unwrap();
        fs::write(temp.path().join("notes.txt"), "not a script").unwrap();
        fs::create_dir(temp.path().join("zz")).unwrap();
        fs::write(temp.path().join("zz").join("extra.RTS"), script("MAP02", 3)).unwrap();

        let mut registry = ScriptRegistry::new();
        let report = Loader::new(&mut registry, CompileOptions::default())
            .load_directory(temp.path())
            .unwrap();
        assert_eq!(report.scripts, 3);
        assert_eq!(report.purged, 1);
        assert_eq!(amounts(&registry, "MAP01"), vec![2.0]);
        assert_eq!(amounts(&registry, "MAP02"), vec![3.0]);
    }

    #[test]
    fn test_load_directory_missing() {
        let temp = TempDir::new().unwrap();
        let mut registry = ScriptRegistry::new();
        let err = Loader::new(&mut registry, CompileOptions::default())
            .load_directory(temp.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

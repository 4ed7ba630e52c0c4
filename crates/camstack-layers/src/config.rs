//! Hint table files
//!
//! Custom tables are stored as JSON or TOML, chosen by file extension:
//!
//! ```toml
//! [[hints]]
//! layer = "top"
//! extensions = ["gtl", "cmp"]
//! keywords = ["f.cu", "copper_top"]
//! content = ['FileFunction,Copper,L\d+,Top']
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HintTableError, Result};
use crate::hints::{Hint, HintTable};

#[derive(Debug, Serialize, Deserialize)]
struct HintFile {
    hints: Vec<Hint>,
}

enum FileKind {
    Json,
    Toml,
}

fn file_kind(path: &Path) -> Result<FileKind> {
    if path.extension().is_some_and(|ext| ext == "json") {
        Ok(FileKind::Json)
    } else if path.extension().is_some_and(|ext| ext == "toml") {
        Ok(FileKind::Toml)
    } else {
        Err(HintTableError::UnsupportedFormat(
            path.display().to_string(),
        ))
    }
}

impl HintTable {
    /// Load a table from a `.json` or `.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let kind = file_kind(path)?;
        let content = std::fs::read_to_string(path)?;

        let table = match kind {
            FileKind::Json => Self::from_json_str(&content)?,
            FileKind::Toml => Self::from_toml_str(&content)?,
        };
        info!(
            "Loaded {} layer hints from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: HintFile = serde_json::from_str(content)?;
        Self::new(file.hints)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: HintFile = toml::from_str(content)?;
        Self::new(file.hints)
    }

    /// Write the table to a `.json` or `.toml` file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = HintFile {
            hints: self.hints().to_vec(),
        };

        let content = match file_kind(path)? {
            FileKind::Json => serde_json::to_string_pretty(&file)?,
            FileKind::Toml => toml::to_string_pretty(&file)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer_class::LayerClass;
    use tempfile::TempDir;

    const TOML_TABLE: &str = r#"
[[hints]]
layer = "top"
extensions = ["art"]
keywords = ["component"]
content = ['FileFunction,Copper,L1']

[[hints]]
layer = "ipc_netlist"
extensions = ["ipc", "d356"]
"#;

    #[test]
    fn test_from_toml_str() {
        let table = HintTable::from_toml_str(TOML_TABLE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.hints()[1].layer, LayerClass::IpcNetlist);
        assert!(table.hints()[1].keywords.is_empty());
        assert_eq!(table.guess_layer_class("board.d356"), LayerClass::IpcNetlist);
        assert_eq!(table.guess_layer_class("component_side.gbr"), LayerClass::Top);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{"hints": [{"layer": "bottomsilk", "extensions": ["ss2"]}]}"#;
        let table = HintTable::from_json_str(json).unwrap();
        assert_eq!(table.guess_layer_class("x.SS2"), LayerClass::BottomSilk);
    }

    #[test]
    fn test_unknown_layer_is_rejected() {
        let json = r#"{"hints": [{"layer": "copper", "extensions": ["x"]}]}"#;
        assert!(matches!(
            HintTable::from_json_str(json),
            Err(HintTableError::Json(_))
        ));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(
            HintTable::from_json_str(r#"{"hints": []}"#),
            Err(HintTableError::EmptyTable)
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        for name in ["hints.json", "hints.toml"] {
            let path = dir.path().join(name);
            HintTable::builtin().to_file(&path).unwrap();
            let loaded = HintTable::from_file(&path).unwrap();
            assert_eq!(loaded.hints(), HintTable::builtin().hints());
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hints.yaml");
        assert!(matches!(
            HintTable::builtin().to_file(&path),
            Err(HintTableError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            HintTable::from_file(&path),
            Err(HintTableError::UnsupportedFormat(_))
        ));
    }
}

//! Content-based layer classification
//!
//! Fallback for files whose names say nothing: lines are scanned in order and
//! the first hint whose content pattern matches a line decides the class.
//! Gerber X2 `%TF.FileFunction` attributes and CAD-specific header comments
//! are what the built-in patterns look for.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::hints::HintTable;
use crate::layer_class::LayerClass;

impl HintTable {
    fn classify_content_line(&self, line: &str) -> Option<LayerClass> {
        self.entries()
            .filter(|(_, matchers)| !matchers.is_empty())
            .find(|(_, matchers)| matchers.iter().any(|re| re.is_match(line)))
            .map(|(hint, _)| hint.layer)
    }

    /// Classify in-memory text by its content.
    pub fn classify_content_text(&self, text: &str) -> Option<LayerClass> {
        text.lines().find_map(|line| self.classify_content_line(line))
    }

    /// Classify a file by its content.
    ///
    /// Returns `None` when the file cannot be read or no pattern matches.
    /// Lines that are not valid UTF-8 are decoded lossily.
    pub fn guess_layer_class_by_content(&self, path: impl AsRef<Path>) -> Option<LayerClass> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                debug!("Cannot scan {} for layer content: {}", path.display(), e);
                return None;
            }
        };

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    if let Some(layer) = self.classify_content_line(&line) {
                        debug!("Matched {} by content as {}", path.display(), layer);
                        return Some(layer);
                    }
                }
                Err(e) => {
                    debug!("Stopped scanning {}: {}", path.display(), e);
                    break;
                }
            }
        }
        None
    }
}

/// Classify a file by its content using the built-in hint table.
pub fn guess_layer_class_by_content(path: impl AsRef<Path>) -> Option<LayerClass> {
    HintTable::builtin().guess_layer_class_by_content(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::Hint;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_x2_file_function() {
        let table = HintTable::builtin();
        let text = "G04 exported*\n%TF.FileFunction,Copper,L1,Top*%\n%FSLAX46Y46*%\n";
        assert_eq!(table.classify_content_text(text), Some(LayerClass::Top));

        let text = "%TF.FileFunction,Copper,L4,Bot*%\n";
        assert_eq!(table.classify_content_text(text), Some(LayerClass::Bottom));

        let text = "%TF.FileFunction,Copper,L2,Inr*%\n";
        assert_eq!(table.classify_content_text(text), Some(LayerClass::Internal));

        let text = "%TF.FileFunction,Soldermask,Top*%\n";
        assert_eq!(table.classify_content_text(text), Some(LayerClass::TopMask));

        let text = "%TF.FileFunction,Profile,NP*%\n";
        assert_eq!(table.classify_content_text(text), Some(LayerClass::Outline));
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let text = "g04 layer: bottomsilklayer*\n";
        assert_eq!(
            HintTable::builtin().classify_content_text(text),
            Some(LayerClass::BottomSilk)
        );
    }

    #[test]
    fn test_first_matching_line_decides() {
        let table = HintTable::new(vec![
            Hint::new(LayerClass::Top, &[], &[], &["alpha"]),
            Hint::new(LayerClass::Bottom, &[], &[], &["beta"]),
        ])
        .unwrap();
        assert_eq!(
            table.classify_content_text("beta\nalpha\n"),
            Some(LayerClass::Bottom)
        );
        // Same line: table order decides.
        assert_eq!(
            table.classify_content_text("beta alpha\n"),
            Some(LayerClass::Top)
        );
        assert_eq!(table.classify_content_text("gamma\n"), None);
    }

    #[test]
    fn test_scan_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("layer.gbr");
        let mut bytes = b"G04 caf\xE9*\n".to_vec();
        bytes.extend_from_slice(b"%TF.FileFunction,Legend,Top*%\n");
        fs::write(&path, bytes).unwrap();

        assert_eq!(guess_layer_class_by_content(&path), Some(LayerClass::TopSilk));
    }

    #[test]
    fn test_unreadable_file_is_none() {
        assert_eq!(
            guess_layer_class_by_content("/nonexistent/camstack/layer.gbr"),
            None
        );
    }
}

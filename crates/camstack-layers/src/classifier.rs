//! Filename-based layer classification
//!
//! Two passes over the hint table:
//!
//! 1. **Extension**: the first hint listing the file's extension wins.
//! 2. **Keywords**: each hint scores the summed length of its keywords found
//!    in the lower-cased `name.extension`; the strictly highest score wins,
//!    ties going to the earlier hint.
//!
//! Anything else is [`LayerClass::Unknown`].

use tracing::debug;

use camstack_core::base_name;

use crate::hints::HintTable;
use crate::layer_class::LayerClass;

/// Split a lower-cased base name into stem and extension the way
/// `os.path.splitext` does: the last dot separates, leading dots do not.
pub(crate) fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if !file_name[..dot].chars().all(|c| c == '.') => {
            (&file_name[..dot], &file_name[dot + 1..])
        }
        _ => (file_name, ""),
    }
}

impl HintTable {
    /// Classify a file by its name.
    pub fn guess_layer_class(&self, filename: &str) -> LayerClass {
        let file_name = base_name(filename).to_lowercase();
        let (name, ext) = split_extension(&file_name);
        let name_ext = format!("{}.{}", name, ext);

        if let Some(hint) = self
            .hints()
            .iter()
            .find(|hint| hint.extensions.contains(ext))
        {
            debug!(
                "Matched {} by extension '{}' as {}",
                filename, ext, hint.layer
            );
            return hint.layer;
        }

        let mut best_score = 0;
        let mut selected = LayerClass::Unknown;
        for hint in self.hints() {
            let score: usize = hint
                .keywords
                .iter()
                .filter(|keyword| name_ext.contains(keyword.as_str()))
                .map(|keyword| keyword.len())
                .sum();
            if score > best_score {
                best_score = score;
                selected = hint.layer;
            }
        }

        if selected == LayerClass::Unknown {
            debug!("No layer hint matched {}", filename);
        } else {
            debug!(
                "Matched {} by keywords as {} (score {})",
                filename, selected, best_score
            );
        }
        selected
    }
}

/// Classify a file by its name using the built-in hint table.
pub fn guess_layer_class(filename: &str) -> LayerClass {
    HintTable::builtin().guess_layer_class(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::Hint;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("board.gtl"), ("board", "gtl"));
        assert_eq!(split_extension("board.top.gbr"), ("board.top", "gbr"));
        assert_eq!(split_extension("internal_layer"), ("internal_layer", ""));
        assert_eq!(split_extension(".gtl"), (".gtl", ""));
        assert_eq!(split_extension("..gtl"), ("..gtl", ""));
        assert_eq!(split_extension("board."), ("board", ""));
    }

    #[test]
    fn test_extension_pass() {
        assert_eq!(guess_layer_class("board.gtl"), LayerClass::Top);
        assert_eq!(guess_layer_class("board.GBL"), LayerClass::Bottom);
        assert_eq!(guess_layer_class("board.gko"), LayerClass::Outline);
        assert_eq!(guess_layer_class("board.drl"), LayerClass::Drill);
        assert_eq!(guess_layer_class("board.ipc"), LayerClass::IpcNetlist);
        assert_eq!(guess_layer_class("board.gts"), LayerClass::TopMask);
        assert_eq!(guess_layer_class("board.gbp"), LayerClass::BottomPaste);
    }

    #[test]
    fn test_extension_beats_keywords() {
        // "bottom" in the name does not matter once the extension matches.
        assert_eq!(guess_layer_class("bottom_side.gtl"), LayerClass::Top);
    }

    #[test]
    fn test_directories_are_ignored() {
        assert_eq!(guess_layer_class("/tmp/top/board.gbl"), LayerClass::Bottom);
        assert_eq!(guess_layer_class(r"C:\jobs\bottom\board.gtl"), LayerClass::Top);
    }

    #[test]
    fn test_keyword_pass() {
        assert_eq!(guess_layer_class("board-B.Cu.gbr"), LayerClass::Bottom);
        assert_eq!(guess_layer_class("board-Edge.Cuts.gbr"), LayerClass::Outline);
        assert_eq!(guess_layer_class("internal_layer"), LayerClass::Internal);
        assert_eq!(guess_layer_class("board.in2"), LayerClass::Internal);
    }

    #[test]
    fn test_no_match_is_unknown() {
        assert_eq!(guess_layer_class("random.xyz"), LayerClass::Unknown);
        assert_eq!(guess_layer_class(""), LayerClass::Unknown);
    }

    #[test]
    fn test_scores_are_additive_and_ties_keep_first() {
        let table = HintTable::new(vec![
            Hint::new(LayerClass::Top, &[], &["ab", "cd"], &[]),
            Hint::new(LayerClass::Bottom, &[], &["abcd"], &[]),
            Hint::new(LayerClass::Outline, &[], &["abc"], &[]),
        ])
        .unwrap();

        // "ab" + "cd" = 4 ties with "abcd" = 4; the first hint keeps it.
        assert_eq!(table.guess_layer_class("abcd.x"), LayerClass::Top);
        // Only "abc" (3) beats "ab" (2).
        assert_eq!(table.guess_layer_class("abc.x"), LayerClass::Outline);
    }

    #[test]
    fn test_first_extension_match_wins() {
        let table = HintTable::new(vec![
            Hint::new(LayerClass::Drawing, &["gbr"], &[], &[]),
            Hint::new(LayerClass::Top, &["gbr"], &["top"], &[]),
        ])
        .unwrap();
        assert_eq!(table.guess_layer_class("top.gbr"), LayerClass::Drawing);
    }
}

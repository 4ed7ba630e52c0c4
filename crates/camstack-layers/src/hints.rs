//! Layer hints
//!
//! A [`Hint`] ties a [`LayerClass`] to the file extensions, filename keywords,
//! and content patterns that identify it. A [`HintTable`] is an ordered list
//! of hints with its content patterns compiled; table order is the
//! tie-breaker for every classification pass.
//!
//! The built-in table covers the naming conventions of the common CAD tools
//! (KiCad, Eagle, Altium, EasyEDA, OrCAD and others) and is built once on
//! first use.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{HintTableError, Result};
use crate::layer_class::LayerClass;

/// Rule record associating a layer class with identifying features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub layer: LayerClass,
    /// Lower-case extensions without the leading dot.
    pub extensions: BTreeSet<String>,
    /// Lower-case filename fragments, scored by length.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Case-insensitive regular-expression fragments matched against lines
    /// of file content.
    #[serde(default)]
    pub content: Vec<String>,
}

impl Hint {
    pub fn new(layer: LayerClass, extensions: &[&str], keywords: &[&str], content: &[&str]) -> Self {
        Self {
            layer,
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            content: content.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn normalized(mut self) -> Self {
        self.extensions = self
            .extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        self.keywords = self.keywords.into_iter().map(|k| k.to_lowercase()).collect();
        self
    }
}

/// Ordered, validated set of hints.
#[derive(Debug, Clone)]
pub struct HintTable {
    hints: Vec<Hint>,
    matchers: Vec<Vec<Regex>>,
}

impl HintTable {
    /// Build a table, compiling every content pattern.
    ///
    /// Extensions and keywords are lower-cased. Fails on an empty table or a
    /// pattern that does not compile.
    pub fn new(hints: Vec<Hint>) -> Result<Self> {
        if hints.is_empty() {
            return Err(HintTableError::EmptyTable);
        }

        let hints: Vec<Hint> = hints.into_iter().map(Hint::normalized).collect();
        let matchers = hints
            .iter()
            .map(|hint| {
                hint.content
                    .iter()
                    .map(|pattern| {
                        RegexBuilder::new(pattern)
                            .case_insensitive(true)
                            .build()
                            .map_err(|source| HintTableError::InvalidPattern {
                                layer: hint.layer,
                                pattern: pattern.clone(),
                                source,
                            })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { hints, matchers })
    }

    /// The built-in table.
    pub fn builtin() -> &'static HintTable {
        static TABLE: OnceLock<HintTable> = OnceLock::new();
        TABLE.get_or_init(|| HintTable::new(builtin_hints()).expect("invalid built-in hint table"))
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Hints paired with their compiled content matchers, in table order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Hint, &[Regex])> {
        self.hints
            .iter()
            .zip(self.matchers.iter().map(Vec::as_slice))
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }
}

impl Default for HintTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn builtin_hints() -> Vec<Hint> {
    vec![
        Hint::new(
            LayerClass::BottomSilk,
            &["gbo", "ssb", "pls", "bs", "skb", "bottomsilk"],
            &[
                "bottomsilk", "bsilk", "silkscreen", "botsilk", "b.silks", "bottom_silk",
                "b_silk", "silkscreen_bottom", "bottom", "gbo", "ssb", "pls", "bs", "skb",
                "bottomsilk",
            ],
            &[r"FileFunction,Legend,Bot", r"G04 Layer: BottomSilkLayer"],
        ),
        Hint::new(
            LayerClass::TopSilk,
            &["gto", "sst", "plc", "ts", "skt", "topsilk"],
            &[
                "topsilk", "sst01", "silk", "silkscreen", "slk", "f.silks", "top_silk",
                "f_silk", "silkscreen_top", "top", "gto", "sst", "plc", "ts", "skt", "topsilk",
            ],
            &[r"FileFunction,Legend,Top", r"G04 Layer: TopSilkLayer"],
        ),
        Hint::new(
            LayerClass::TopMask,
            &["gts", "stc", "tmk", "smt", "tr", "topmask"],
            &[
                "topmask", "sm01", "cmask", "tmask", "mask1", "maskcom", "mst", "f.mask",
                "soldermask_top", "top_mask", "smdmask_top", "top", "gts", "stc", "tmk", "smt",
                "tr", "topmask",
            ],
            &[r"FileFunction,Soldermask,Top", r"G04 Layer: TopSolderMaskLayer"],
        ),
        Hint::new(
            LayerClass::BottomMask,
            &["gbs", "sts", "bmk", "smb", "br", "bottommask"],
            &[
                "bottommask", "sm", "bmask", "mask2", "masksold", "botmask", "msb", "b.mask",
                "soldermask_bottom", "bottom_mask", "smdmask_bottom", "bottom", "gbs", "sts",
                "bmk", "smb", "br", "bottommask",
            ],
            &[r"FileFunction,Soldermask,Bot", r"G04 Layer: BottomSolderMaskLayer"],
        ),
        Hint::new(
            LayerClass::Internal,
            &[
                "in", "gt1", "gt2", "gt3", "gt4", "gt5", "gt6", "g1", "g2", "g3", "g4", "g5",
                "g6",
            ],
            &[
                "internal", "in1.cu", "in2.cu", "in3.cu", "in4.cu", "inner1", "inner2",
                "inner3", "inner4", "inner5", "inner6", "copper_inner", "in", "gt1", "gt2",
                "gt3", "gt4", "gt5", "gt6", "g1", "g2", "g3", "g4", "g5", "g6",
            ],
            &[r"FileFunction,Copper,L\d+,Inr", r"G04 Layer: Inner\d+"],
        ),
        Hint::new(
            LayerClass::Bottom,
            &["gbl", "sld", "bot", "sol", "bottom"],
            &[
                "bottom", "bot", "b.cu", "layer2", "copper_bottom", "gbl", "sld", "bot", "sol",
                "bottom",
            ],
            &[r"FileFunction,Copper,L\d+,Bot", r"G04 Layer: BottomLayer"],
        ),
        Hint::new(
            LayerClass::Top,
            &["gtl", "cmp", "top"],
            &["top", "f.cu", "layer1", "copper_top", "gtl", "cmp", "top"],
            &[r"FileFunction,Copper,L\d+,Top", r"G04 Layer: TopLayer"],
        ),
        Hint::new(
            LayerClass::Outline,
            &["gko", "outline"],
            &[
                "outline", "edge.cuts", "border", "bdr", "gko", "outline", "routing", "cevre",
            ],
            &[r"FileFunction,Profile", r"G04 Layer: BoardOutline"],
        ),
        Hint::new(
            LayerClass::TopPaste,
            &["gtp", "tm", "toppaste"],
            &["toppaste", "sp01", "pst", "f.paste", "gtp", "tm", "toppaste"],
            &[r"FileFunction,Paste,Top", r"G04 Layer: TopPasteMaskLayer"],
        ),
        Hint::new(
            LayerClass::BottomPaste,
            &["gbp", "bm", "bottompaste"],
            &[
                "bottompaste", "sp02", "botpaste", "psb", "b.paste", "gbp", "bm", "bottompaste",
            ],
            &[r"FileFunction,Paste,Bot", r"G04 Layer: BottomPasteMaskLayer"],
        ),
        Hint::new(
            LayerClass::Drill,
            &["drl", "drill"],
            &["drl", "drill"],
            &[r"FileFunction,(Non)?Plated,\d+,\d+"],
        ),
        Hint::new(LayerClass::IpcNetlist, &["ipc"], &[], &[]),
        Hint::new(
            LayerClass::Drawing,
            &["fab"],
            &["assembly drawing", "assembly", "fabrication", "fab drawing", "fab"],
            &[r"FileFunction,\w*Drawing"],
        ),
    ]
}

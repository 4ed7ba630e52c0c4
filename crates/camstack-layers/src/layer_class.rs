//! Layer class tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical manufacturing layer a CAM file represents.
///
/// Variants are declared in canonical top-to-bottom stack order, followed by
/// the tags that are appended after the stack or dropped from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerClass {
    Outline,
    TopPaste,
    TopSilk,
    TopMask,
    Top,
    Internal,
    Bottom,
    BottomMask,
    BottomSilk,
    BottomPaste,
    Drill,
    Drawing,
    #[serde(rename = "ipc_netlist")]
    IpcNetlist,
    Unknown,
}

impl LayerClass {
    /// Every tag, in declaration order.
    pub const ALL: [LayerClass; 14] = [
        Self::Outline,
        Self::TopPaste,
        Self::TopSilk,
        Self::TopMask,
        Self::Top,
        Self::Internal,
        Self::Bottom,
        Self::BottomMask,
        Self::BottomSilk,
        Self::BottomPaste,
        Self::Drill,
        Self::Drawing,
        Self::IpcNetlist,
        Self::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::TopPaste => "toppaste",
            Self::TopSilk => "topsilk",
            Self::TopMask => "topmask",
            Self::Top => "top",
            Self::Internal => "internal",
            Self::Bottom => "bottom",
            Self::BottomMask => "bottommask",
            Self::BottomSilk => "bottomsilk",
            Self::BottomPaste => "bottompaste",
            Self::Drill => "drill",
            Self::Drawing => "drawing",
            Self::IpcNetlist => "ipc_netlist",
            Self::Unknown => "unknown",
        }
    }

    /// Copper layers: top, internal, and bottom.
    pub fn is_copper(self) -> bool {
        matches!(self, Self::Top | Self::Internal | Self::Bottom)
    }

    /// Layers on the top side of the board, copper included.
    pub fn is_top_side(self) -> bool {
        matches!(
            self,
            Self::TopPaste | Self::TopSilk | Self::TopMask | Self::Top
        )
    }

    /// Layers on the bottom side of the board, copper included.
    pub fn is_bottom_side(self) -> bool {
        matches!(
            self,
            Self::Bottom | Self::BottomMask | Self::BottomSilk | Self::BottomPaste
        )
    }
}

impl fmt::Display for LayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|class| class.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown layer class: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_forms_round_trip() {
        for class in LayerClass::ALL {
            assert_eq!(class.as_str().parse::<LayerClass>().unwrap(), class);
        }
        assert_eq!(LayerClass::IpcNetlist.to_string(), "ipc_netlist");
        assert!("copper".parse::<LayerClass>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        for class in LayerClass::ALL {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{}\"", class));
        }
    }

    #[test]
    fn test_sides() {
        assert!(LayerClass::TopMask.is_top_side());
        assert!(!LayerClass::TopMask.is_copper());
        assert!(LayerClass::Internal.is_copper());
        assert!(!LayerClass::Internal.is_top_side());
        assert!(!LayerClass::Internal.is_bottom_side());
        assert!(LayerClass::BottomPaste.is_bottom_side());
    }
}

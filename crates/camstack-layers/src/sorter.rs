//! Canonical stack ordering

use std::collections::BTreeMap;

use tracing::debug;

use crate::layer::PcbLayer;
use crate::layer_class::LayerClass;

/// Physical top-to-bottom order. Internal layers sit between top and bottom
/// copper, sorted by their order.
pub const STACK_ORDER: [LayerClass; 10] = [
    LayerClass::Outline,
    LayerClass::TopPaste,
    LayerClass::TopSilk,
    LayerClass::TopMask,
    LayerClass::Top,
    LayerClass::Internal,
    LayerClass::Bottom,
    LayerClass::BottomMask,
    LayerClass::BottomSilk,
    LayerClass::BottomPaste,
];

/// Appended after the stack, whichever direction it runs.
pub const APPEND_AFTER: [LayerClass; 2] = [LayerClass::Drill, LayerClass::Drawing];

/// Arrange layers in stack order.
///
/// The stack runs top to bottom when `from_top` is set and is reversed
/// otherwise; drill and drawing layers always follow it. Layers sharing a
/// class keep their input order, reversed along with the stack when it runs
/// bottom up. Layers of any other class (netlists, unknown) are left out.
pub fn sort_layers(layers: Vec<PcbLayer>, from_top: bool) -> Vec<PcbLayer> {
    let mut by_class: BTreeMap<LayerClass, Vec<PcbLayer>> = BTreeMap::new();
    for layer in layers {
        by_class.entry(layer.layer_class()).or_default().push(layer);
    }

    if let Some(internal) = by_class.get_mut(&LayerClass::Internal) {
        internal.sort_by_key(|layer| layer.order().unwrap_or(0));
    }

    let mut output = Vec::new();
    for class in STACK_ORDER {
        output.extend(by_class.remove(&class).unwrap_or_default());
    }
    if !from_top {
        output.reverse();
    }
    for class in APPEND_AFTER {
        output.extend(by_class.remove(&class).unwrap_or_default());
    }

    for (class, dropped) in by_class {
        debug!("Leaving {} {} layer(s) out of the stack", dropped.len(), class);
    }
    output
}

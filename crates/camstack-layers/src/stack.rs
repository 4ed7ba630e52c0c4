//! Board layer stacks
//!
//! A [`LayerStack`] is a whole fabrication job: every CAM file of a
//! directory (or an explicit file list) loaded, classified, and sorted top to
//! bottom. Files that are not CAM data are skipped with a warning.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use camstack_core::{Bounds, Result};

use crate::hints::HintTable;
use crate::layer::PcbLayer;
use crate::layer_class::LayerClass;
use crate::sorter::sort_layers;

/// Sorted layers of one board.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<PcbLayer>,
    netlist: Option<PcbLayer>,
    unclassified: Vec<PcbLayer>,
    skipped: Vec<PathBuf>,
}

impl LayerStack {
    /// Load every regular file in `dir`, in file-name order.
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_directory_with(HintTable::builtin(), dir)
    }

    pub fn from_directory_with(table: &HintTable, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        info!("Loading {} files from {}", paths.len(), dir.display());
        Ok(Self::from_paths_with(table, paths))
    }

    /// Load the given files.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::from_paths_with(HintTable::builtin(), paths)
    }

    pub fn from_paths_with<I, P>(table: &HintTable, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut layers = Vec::new();
        let mut skipped = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match camstack_formats::read(path) {
                Ok(cam) => layers.push(PcbLayer::from_cam_with(table, cam)),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    skipped.push(path.to_path_buf());
                }
            }
        }

        let mut stack = Self::from_layers(layers);
        stack.skipped = skipped;
        stack
    }

    /// Build a stack from already classified layers.
    pub fn from_layers(layers: Vec<PcbLayer>) -> Self {
        let mut netlist = None;
        let mut unclassified = Vec::new();
        let mut stacked = Vec::new();
        for layer in layers {
            match layer.layer_class() {
                LayerClass::IpcNetlist if netlist.is_none() => netlist = Some(layer),
                LayerClass::IpcNetlist | LayerClass::Unknown => unclassified.push(layer),
                _ => stacked.push(layer),
            }
        }

        Self {
            layers: sort_layers(stacked, true),
            netlist,
            unclassified,
            skipped: Vec::new(),
        }
    }

    /// Stacked layers, top to bottom, then drill and drawing layers.
    pub fn layers(&self) -> &[PcbLayer] {
        &self.layers
    }

    fn filtered(&self, keep: impl Fn(LayerClass) -> bool) -> Vec<&PcbLayer> {
        self.layers
            .iter()
            .filter(|layer| keep(layer.layer_class()))
            .collect()
    }

    pub fn top_layers(&self) -> Vec<&PcbLayer> {
        self.filtered(LayerClass::is_top_side)
    }

    pub fn bottom_layers(&self) -> Vec<&PcbLayer> {
        self.filtered(LayerClass::is_bottom_side)
    }

    pub fn copper_layers(&self) -> Vec<&PcbLayer> {
        self.filtered(LayerClass::is_copper)
    }

    pub fn drill_layers(&self) -> Vec<&PcbLayer> {
        self.filtered(|class| class == LayerClass::Drill)
    }

    pub fn outline_layer(&self) -> Option<&PcbLayer> {
        self.layers
            .iter()
            .find(|layer| layer.layer_class() == LayerClass::Outline)
    }

    /// The first IPC-D-356 netlist of the job.
    pub fn netlist(&self) -> Option<&PcbLayer> {
        self.netlist.as_ref()
    }

    /// Layers classified as `unknown`, plus any netlists after the first.
    pub fn unclassified(&self) -> &[PcbLayer] {
        &self.unclassified
    }

    /// Files that could not be loaded.
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    /// Number of copper layers.
    pub fn layer_count(&self) -> usize {
        self.copper_layers().len()
    }

    /// Board extent: the outline if there is one, otherwise every layer.
    pub fn bounds(&self) -> Option<Bounds> {
        self.outline_layer()
            .and_then(PcbLayer::bounds)
            .or_else(|| Bounds::union_all(self.layers.iter().filter_map(PcbLayer::bounds)))
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PcbLayer> {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camstack_core::{CamFormat, CamObject, Point, Primitive, Units};

    fn layer(class: LayerClass, at: f64) -> PcbLayer {
        let cam = CamObject::new(
            None,
            CamFormat::Rs274x,
            Units::Metric,
            vec![Primitive::Flash {
                position: Point::new(at, at),
                width: 2.0,
                height: 2.0,
            }],
        );
        PcbLayer::new(class, Some(cam))
    }

    #[test]
    fn test_views() {
        let stack = LayerStack::from_layers(vec![
            layer(LayerClass::Drill, 0.0),
            layer(LayerClass::Bottom, 0.0),
            layer(LayerClass::TopSilk, 0.0),
            layer(LayerClass::Top, 0.0),
            layer(LayerClass::IpcNetlist, 0.0),
            layer(LayerClass::Unknown, 0.0),
            layer(LayerClass::BottomMask, 0.0),
        ]);

        let classes: Vec<LayerClass> = stack.iter().map(PcbLayer::layer_class).collect();
        assert_eq!(
            classes,
            vec![
                LayerClass::TopSilk,
                LayerClass::Top,
                LayerClass::Bottom,
                LayerClass::BottomMask,
                LayerClass::Drill,
            ]
        );
        assert_eq!(stack.top_layers().len(), 2);
        assert_eq!(stack.bottom_layers().len(), 2);
        assert_eq!(stack.drill_layers().len(), 1);
        assert_eq!(stack.layer_count(), 2);
        assert!(stack.netlist().is_some());
        assert_eq!(stack.unclassified().len(), 1);
        assert!(stack.outline_layer().is_none());
    }

    #[test]
    fn test_bounds_prefers_outline() {
        let stack = LayerStack::from_layers(vec![
            layer(LayerClass::Top, 100.0),
            layer(LayerClass::Outline, 0.0),
        ]);
        assert_eq!(stack.bounds(), Some(Bounds::new(-1.0, -1.0, 1.0, 1.0)));

        let stack = LayerStack::from_layers(vec![
            layer(LayerClass::Top, 0.0),
            layer(LayerClass::Bottom, 10.0),
        ]);
        assert_eq!(stack.bounds(), Some(Bounds::new(-1.0, -1.0, 11.0, 11.0)));
    }

    #[test]
    fn test_empty_stack() {
        let stack = LayerStack::from_layers(Vec::new());
        assert!(stack.is_empty());
        assert_eq!(stack.bounds(), None);
        assert_eq!(stack.layer_count(), 0);
    }
}

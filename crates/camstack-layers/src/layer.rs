//! Layer entities
//!
//! A layer wraps one parsed [`CamObject`] together with the [`LayerClass`]
//! it was classified as. Drill and internal copper layers carry extra data
//! and are separate types; [`PcbLayer`] is the sum of all three.
//!
//! Constructors keep the tag and the variant consistent: a layer tagged
//! `internal` is always an [`InternalLayer`] and one tagged `drill` is always
//! a [`DrillLayer`].

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use camstack_core::{base_name, Bounds, CamObject, Primitive, Result};

use crate::hints::HintTable;
use crate::layer_class::LayerClass;

/// Base layer entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    filename: Option<String>,
    layer_class: LayerClass,
    cam_source: Option<CamObject>,
}

impl Layer {
    fn new(layer_class: LayerClass, cam_source: Option<CamObject>) -> Self {
        Self {
            filename: cam_source
                .as_ref()
                .and_then(|cam| cam.filename().map(str::to_string)),
            layer_class,
            cam_source,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn layer_class(&self) -> LayerClass {
        self.layer_class
    }

    pub fn cam_source(&self) -> Option<&CamObject> {
        self.cam_source.as_ref()
    }

    /// Primitives of the source, empty when there is none.
    pub fn primitives(&self) -> &[Primitive] {
        self.cam_source
            .as_ref()
            .map(CamObject::primitives)
            .unwrap_or(&[])
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.cam_source.as_ref().and_then(CamObject::bounds)
    }
}

/// Drill layer, plus the layers its holes pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillLayer {
    layer: Layer,
    associated_layers: BTreeSet<LayerClass>,
}

impl DrillLayer {
    /// Drill layer spanning top to bottom copper.
    pub fn new(cam_source: Option<CamObject>) -> Self {
        Self::with_associated_layers(
            cam_source,
            [LayerClass::Top, LayerClass::Bottom].into_iter().collect(),
        )
    }

    pub fn with_associated_layers(
        cam_source: Option<CamObject>,
        associated_layers: BTreeSet<LayerClass>,
    ) -> Self {
        Self {
            layer: Layer::new(LayerClass::Drill, cam_source),
            associated_layers,
        }
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn associated_layers(&self) -> &BTreeSet<LayerClass> {
        &self.associated_layers
    }
}

/// Internal copper layer with its position in the stack.
///
/// Equality and ordering compare `order` only.
#[derive(Debug, Clone)]
pub struct InternalLayer {
    layer: Layer,
    order: u32,
}

impl InternalLayer {
    pub fn new(cam_source: Option<CamObject>, order: u32) -> Self {
        Self {
            layer: Layer::new(LayerClass::Internal, cam_source),
            order,
        }
    }

    /// Internal layer ordered by the first number in its file name.
    pub fn from_source(cam_source: Option<CamObject>) -> Self {
        let order = cam_source
            .as_ref()
            .and_then(CamObject::filename)
            .map(order_from_filename)
            .unwrap_or(0);
        Self::new(cam_source, order)
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn order(&self) -> u32 {
        self.order
    }
}

impl PartialEq for InternalLayer {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for InternalLayer {}

impl PartialOrd for InternalLayer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternalLayer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }
}

/// First run of digits anywhere in the file name, directories included.
///
/// 0 when there are no digits; a run too large for `u32` saturates to
/// `u32::MAX`.
pub fn order_from_filename(filename: &str) -> u32 {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("invalid regex pattern"));
    match re.find(filename) {
        Some(m) => m.as_str().parse::<u32>().unwrap_or(u32::MAX),
        None => 0,
    }
}

/// A classified layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PcbLayer {
    Base(Layer),
    Drill(DrillLayer),
    Internal(InternalLayer),
}

impl PcbLayer {
    /// Wrap a source under the given tag, picking the matching variant.
    pub fn new(layer_class: LayerClass, cam_source: Option<CamObject>) -> Self {
        match layer_class {
            LayerClass::Drill => Self::Drill(DrillLayer::new(cam_source)),
            LayerClass::Internal => Self::Internal(InternalLayer::from_source(cam_source)),
            other => Self::Base(Layer::new(other, cam_source)),
        }
    }

    /// Classify a parsed CAM object with the built-in hint table.
    pub fn from_cam(cam: CamObject) -> Self {
        Self::from_cam_with(HintTable::builtin(), cam)
    }

    /// Classify a parsed CAM object with the given hint table.
    ///
    /// The filename decides first; when it yields `unknown`, the file at
    /// that name is scanned. Excellon sources are always drill layers and
    /// IPC-D-356 sources are always netlists, whatever their name says.
    pub fn from_cam_with(table: &HintTable, cam: CamObject) -> Self {
        Self::classify(table, cam, None)
    }

    /// Like [`PcbLayer::from_cam_with`], but the content fallback scans
    /// `text` (the data `cam` was parsed from) instead of reading the file
    /// named by the source.
    pub fn from_data_with(table: &HintTable, cam: CamObject, text: &str) -> Self {
        Self::classify(table, cam, Some(text))
    }

    fn classify(table: &HintTable, cam: CamObject, text: Option<&str>) -> Self {
        let mut layer_class = cam
            .filename()
            .map(|name| table.guess_layer_class(name))
            .unwrap_or(LayerClass::Unknown);

        if layer_class == LayerClass::Unknown {
            let by_content = match (text, cam.filename()) {
                (Some(text), _) => table.classify_content_text(text),
                (None, Some(name)) => table.guess_layer_class_by_content(name),
                (None, None) => None,
            };
            layer_class = by_content.unwrap_or(LayerClass::Unknown);
        }

        let layer = if cam.is_drill_format() || layer_class == LayerClass::Drill {
            Self::Drill(DrillLayer::new(Some(cam)))
        } else if layer_class == LayerClass::Internal {
            Self::Internal(InternalLayer::from_source(Some(cam)))
        } else if cam.is_netlist_format() {
            Self::Base(Layer::new(LayerClass::IpcNetlist, Some(cam)))
        } else {
            Self::Base(Layer::new(layer_class, Some(cam)))
        };

        debug!("Classified {}", layer);
        layer
    }

    pub fn layer(&self) -> &Layer {
        match self {
            Self::Base(layer) => layer,
            Self::Drill(drill) => drill.layer(),
            Self::Internal(internal) => internal.layer(),
        }
    }

    pub fn layer_class(&self) -> LayerClass {
        self.layer().layer_class()
    }

    pub fn filename(&self) -> Option<&str> {
        self.layer().filename()
    }

    pub fn cam_source(&self) -> Option<&CamObject> {
        self.layer().cam_source()
    }

    pub fn primitives(&self) -> &[Primitive] {
        self.layer().primitives()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.layer().bounds()
    }

    pub fn as_drill(&self) -> Option<&DrillLayer> {
        match self {
            Self::Drill(drill) => Some(drill),
            _ => None,
        }
    }

    pub fn as_internal(&self) -> Option<&InternalLayer> {
        match self {
            Self::Internal(internal) => Some(internal),
            _ => None,
        }
    }

    /// Stack order of an internal layer.
    pub fn order(&self) -> Option<u32> {
        self.as_internal().map(InternalLayer::order)
    }
}

impl fmt::Display for PcbLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.filename() {
            Some(name) => write!(f, "{} layer ({})", self.layer_class(), base_name(name)),
            None => write!(f, "{} layer", self.layer_class()),
        }
    }
}

/// Read a CAM file and classify it.
pub fn load_layer(path: impl AsRef<Path>) -> Result<PcbLayer> {
    Ok(PcbLayer::from_cam(camstack_formats::read(path)?))
}

/// Parse CAM text and classify it.
///
/// `filename` is only a name: the content fallback scans `data`, never the
/// file system.
pub fn load_layer_data(data: &str, filename: Option<&str>) -> Result<PcbLayer> {
    let cam = camstack_formats::loads(data, filename)?;
    Ok(PcbLayer::from_data_with(HintTable::builtin(), cam, data))
}

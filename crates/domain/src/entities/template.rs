//! Structure templates as resolved from the template catalog.

use serde::{Deserialize, Serialize};

use crate::{StructureKind, TemplatePath};

/// Row/column extent of a structure on the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub rows: u32,
    pub cols: u32,
}

impl Footprint {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// True when the footprint runs longer along rows than columns.
    pub fn is_row_elongated(&self) -> bool {
        self.rows > self.cols
    }
}

/// Everything the placement flow needs to know about a structure template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureTemplate {
    pub path: TemplatePath,
    /// Lots the structure consumes; drives the base construction delay.
    pub lot_size: u32,
    pub footprint: Option<Footprint>,
    /// Visible stand-in shown while the structure is being built.
    pub construction_marker: Option<TemplatePath>,
    /// String-id name given to structures built from this template.
    pub object_name: String,
    pub kind: StructureKind,
}

impl StructureTemplate {
    pub fn new(path: impl Into<TemplatePath>, lot_size: u32) -> Self {
        let path = path.into();
        Self {
            object_name: path.as_str().to_string(),
            path,
            lot_size,
            footprint: None,
            construction_marker: None,
            kind: StructureKind::Installation,
        }
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = Some(footprint);
        self
    }

    pub fn with_construction_marker(mut self, marker: impl Into<TemplatePath>) -> Self {
        self.construction_marker = Some(marker.into());
        self
    }

    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = name.into();
        self
    }

    pub fn with_kind(mut self, kind: StructureKind) -> Self {
        self.kind = kind;
        self
    }
}

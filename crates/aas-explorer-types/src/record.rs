//! The five resolved record shapes and the tagged [`Record`] union.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{ClassifyError, RecordKind};
use crate::transform::Transform;

/// One participant's Asset Administration Shell after submodel resolution.
///
/// `part` and `cad` are mandatory; `bom` is present only when the source
/// document carried a single-level BOM descriptor. `id` is session-local and
/// monotonically assigned by the loader: unique within one running session,
/// not stable across reloads, and must not be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aas {
    pub id: u64,
    pub id_short: String,
    /// `false` means the shell is visible but its detail and expansion are
    /// suppressed (rendered locked).
    pub access: bool,
    pub part: Part,
    pub cad: Cad,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom: Option<Bom>,
}

impl Aas {
    /// The owner key used application-wide: the manufacturer part id.
    pub fn owner(&self) -> &str {
        &self.part.part_type_information.manufacturer_part_id
    }
}

/// Part type information submodel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub catena_x_id: String,
    pub part_site_information_as_planned: Vec<PartSite>,
    pub part_type_information: PartTypeInformation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartSite {
    #[serde(rename = "catenaXsiteId")]
    pub catena_x_site_id: String,
    pub function: String,
    pub function_valid_from: DateTime<Utc>,
    pub function_valid_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartTypeInformation {
    pub classification: String,
    pub manufacturer_part_id: String,
    pub name_at_manufacturer: String,
}

/// Single-level bill of materials submodel. Each child item references
/// another shell by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bom {
    pub catena_x_id: String,
    pub child_items: Vec<BomChildItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomChildItem {
    pub business_partner: String,
    /// Absent on malformed items; resolution then aborts (see the tree
    /// expansion engine).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catena_x_id: Option<String>,
    pub created_on: DateTime<Utc>,
    pub last_modified_on: DateTime<Utc>,
    pub quantity: Quantity,
    pub validity_period: ValidityPeriod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    pub measurement_unit: String,
    pub quantity_number: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityPeriod {
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}

/// 3d data submodel. Each child item references another shell (id prefixed
/// `AAS`) or a leaf model record, with its local placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cad {
    pub catena_x_id: String,
    pub child_items: Vec<CadChildItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadChildItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catena_x_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<Transform>,
}

/// Leaf record pointing at a 3d payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelData {
    pub catena_x_id: String,
    pub file: String,
}

/// Tagged union over the five record kinds.
///
/// The variant is assigned once, at parse time, by [`Record::from_value`];
/// serialization is untagged so a serialized record matches its wire shape
/// and classifies back to the same kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Record {
    Aas(Aas),
    Part(Part),
    Bom(Bom),
    Cad(Cad),
    Model(ModelData),
}

impl Record {
    /// Classifies `value` and deserializes it into the matching variant.
    pub fn from_value(value: serde_json::Value) -> Result<Record, ClassifyError> {
        let kind = RecordKind::classify(&value).ok_or(ClassifyError::Unrecognized)?;
        let decode = |source| ClassifyError::Decode { kind, source };
        let record = match kind {
            RecordKind::Aas => Record::Aas(serde_json::from_value(value).map_err(decode)?),
            RecordKind::Part => Record::Part(serde_json::from_value(value).map_err(decode)?),
            RecordKind::Bom => Record::Bom(serde_json::from_value(value).map_err(decode)?),
            RecordKind::Cad => Record::Cad(serde_json::from_value(value).map_err(decode)?),
            RecordKind::Model => Record::Model(serde_json::from_value(value).map_err(decode)?),
        };
        Ok(record)
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Aas(_) => RecordKind::Aas,
            Record::Part(_) => RecordKind::Part,
            Record::Bom(_) => RecordKind::Bom,
            Record::Cad(_) => RecordKind::Cad,
            Record::Model(_) => RecordKind::Model,
        }
    }

    /// Segment this record contributes to a tree path id: `idShort` for a
    /// shell, `catenaXId` for everything else.
    pub fn local_segment(&self) -> &str {
        match self {
            Record::Aas(aas) => &aas.id_short,
            Record::Part(part) => &part.catena_x_id,
            Record::Bom(bom) => &bom.catena_x_id,
            Record::Cad(cad) => &cad.catena_x_id,
            Record::Model(model) => &model.catena_x_id,
        }
    }

    /// Parts and models never have children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Record::Part(_) | Record::Model(_))
    }
}

//! Structural classification of decoded JSON values.
//!
//! The record documents carry no type tag, so classification is duck-typed
//! over field presence. The predicates are evaluated in a fixed priority
//! order, BOM strictly before CAD, because a BOM is the stricter subset of
//! "has non-empty childItems". Over well-formed input the predicates are
//! mutually exclusive; a value matching none of them is a data error that
//! callers surface (classification itself never fails).

use serde_json::Value;
use thiserror::Error;

/// The five record kinds, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Aas,
    Part,
    Bom,
    Cad,
    Model,
}

impl RecordKind {
    /// Classifies a decoded JSON value, or `None` if it matches no known
    /// record shape.
    pub fn classify(value: &Value) -> Option<RecordKind> {
        if is_aas(value) {
            Some(RecordKind::Aas)
        } else if is_part(value) {
            Some(RecordKind::Part)
        } else if is_bom(value) {
            Some(RecordKind::Bom)
        } else if is_cad(value) {
            Some(RecordKind::Cad)
        } else if is_model(value) {
            Some(RecordKind::Model)
        } else {
            None
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RecordKind::Aas => "AAS",
            RecordKind::Part => "part type information",
            RecordKind::Bom => "single-level BOM",
            RecordKind::Cad => "3d data",
            RecordKind::Model => "3d model",
        };
        write!(f, "{label}")
    }
}

/// Classification or decoding failure for a fetched record document.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("value matches no known record shape")]
    Unrecognized,

    #[error("value classifies as {kind} but does not decode as one")]
    Decode {
        kind: RecordKind,
        #[source]
        source: serde_json::Error,
    },
}

fn is_aas(value: &Value) -> bool {
    value.get("id").is_some() && value.get("part").is_some() && value.get("cad").is_some()
}

fn is_part(value: &Value) -> bool {
    value.get("partTypeInformation").is_some()
}

fn child_items(value: &Value) -> Option<&Vec<Value>> {
    value.get("childItems")?.as_array()
}

fn is_bom(value: &Value) -> bool {
    match child_items(value) {
        Some(items) => items
            .first()
            .is_some_and(|item| item.get("businessPartner").is_some()),
        None => false,
    }
}

fn is_cad(value: &Value) -> bool {
    match child_items(value) {
        Some(items) => !items.is_empty() && !is_bom(value),
        None => false,
    }
}

fn is_model(value: &Value) -> bool {
    value.get("catenaXId").is_some() && value.get("file").is_some()
}

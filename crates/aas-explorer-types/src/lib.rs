//! Shared types for the AAS explorer.
//!
//! This crate is the single source of truth for all types crossing the HTTP
//! boundary: the five resolved record shapes, the pre-resolution wire shape
//! of an AAS document, and the placement transform carried by CAD child
//! items.
//!
//! Record kinds are discriminated structurally on the wire (the documents
//! carry no type tag). [`RecordKind::classify`] is the one exhaustive
//! classification over a decoded JSON value; [`Record::from_value`] combines
//! it with typed deserialization so the variant tag is assigned exactly once,
//! at parse time.

mod classify;
pub mod record;
pub mod transform;
pub mod wire;

pub use classify::{ClassifyError, RecordKind};
pub use record::{
    Aas, Bom, BomChildItem, Cad, CadChildItem, ModelData, Part, PartSite, PartTypeInformation,
    Quantity, Record, ValidityPeriod,
};
pub use transform::Transform;
pub use wire::{Endpoint, ProtocolInformation, ShellDocument, SubmodelDescriptor};

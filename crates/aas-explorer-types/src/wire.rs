//! Wire shape of an AAS document before submodel resolution.
//!
//! As fetched, a shell document only names its submodels; the loader follows
//! each descriptor's first endpoint to resolve the typed sub-records.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellDocument {
    pub id_short: String,
    pub submodel_descriptors: Vec<SubmodelDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelDescriptor {
    pub id_short: String,
    pub endpoints: Vec<Endpoint>,
}

impl SubmodelDescriptor {
    /// Href of the first endpoint, the one the loader follows.
    pub fn first_href(&self) -> Option<&str> {
        self.endpoints
            .first()
            .map(|endpoint| endpoint.protocol_information.href.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub protocol_information: ProtocolInformation,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInformation {
    pub href: String,
}

//! Resolution of AAS documents and their submodels.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use aas_explorer_types::{Aas, Bom, Cad, ModelData, Part, RecordKind, ShellDocument};

use crate::{LoadError, RecordFetcher, ShellIdAllocator};

/// Which typed sub-record a submodel descriptor resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmodelKind {
    Part,
    Cad,
    Bom,
}

impl SubmodelKind {
    /// Dispatch on the lower-cased descriptor id-short prefix. Unknown
    /// prefixes yield `None` and are skipped (forward-compatible).
    fn from_id_short(id_short: &str) -> Option<SubmodelKind> {
        let id_short = id_short.to_lowercase();
        if id_short.starts_with("part") {
            Some(SubmodelKind::Part)
        } else if id_short.starts_with("3d") {
            Some(SubmodelKind::Cad)
        } else if id_short.starts_with("single-level-bom") {
            Some(SubmodelKind::Bom)
        } else {
            None
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SubmodelKind::Part => "part type information",
            SubmodelKind::Cad => "3d data",
            SubmodelKind::Bom => "single-level BOM",
        }
    }
}

impl fmt::Display for SubmodelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolves records from a base directory of cross-referenced JSON files.
///
/// All paths handed to the loader, including the submodel hrefs found inside
/// shell documents, are relative to `base_dir`.
pub struct Loader<F> {
    fetcher: F,
    base_dir: String,
    ids: Arc<ShellIdAllocator>,
}

impl<F: RecordFetcher> Loader<F> {
    pub fn new(fetcher: F, base_dir: impl Into<String>, ids: Arc<ShellIdAllocator>) -> Self {
        Self {
            fetcher,
            base_dir: base_dir.into(),
            ids,
        }
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// Loads the shell document at `path` and resolves its submodels into a
    /// fully populated [`Aas`].
    ///
    /// Sub-fetches run sequentially in descriptor order; the first failure
    /// aborts the whole load, wrapped with the sub-record it belongs to. The
    /// resolved shell always has `access = true`; callers may override it
    /// afterwards. Fails if no `part`- or `3d`-prefixed descriptor resolved
    /// after scanning the whole list (the BOM is optional).
    pub async fn load_aas(&self, path: &str) -> Result<Aas, LoadError> {
        match self.load_aas_inner(path).await {
            Ok(aas) => {
                debug!(path, id = aas.id, id_short = %aas.id_short, "resolved AAS");
                Ok(aas)
            }
            Err(source) => Err(LoadError::Aas {
                path: path.to_string(),
                source: Box::new(source),
            }),
        }
    }

    async fn load_aas_inner(&self, path: &str) -> Result<Aas, LoadError> {
        let value = self.fetch(path).await?;
        let document: ShellDocument =
            serde_json::from_value(value).map_err(|source| LoadError::Decode {
                path: path.to_string(),
                expected: "AAS",
                source,
            })?;

        let mut part: Option<Part> = None;
        let mut cad: Option<Cad> = None;
        let mut bom: Option<Bom> = None;

        for descriptor in &document.submodel_descriptors {
            let Some(kind) = SubmodelKind::from_id_short(&descriptor.id_short) else {
                continue;
            };
            let href = descriptor
                .first_href()
                .ok_or_else(|| LoadError::MissingEndpoint {
                    path: path.to_string(),
                    id_short: descriptor.id_short.clone(),
                })?;
            // Duplicate prefixes resolve last-wins.
            match kind {
                SubmodelKind::Part => part = Some(self.load_submodel(kind, href).await?),
                SubmodelKind::Cad => cad = Some(self.load_submodel(kind, href).await?),
                SubmodelKind::Bom => bom = Some(self.load_submodel(kind, href).await?),
            }
        }

        let part = part.ok_or_else(|| LoadError::SubmodelMissing {
            submodel: SubmodelKind::Part,
            path: path.to_string(),
        })?;
        let cad = cad.ok_or_else(|| LoadError::SubmodelMissing {
            submodel: SubmodelKind::Cad,
            path: path.to_string(),
        })?;

        Ok(Aas {
            id: self.ids.next_id(),
            id_short: document.id_short,
            access: true,
            part,
            cad,
            bom,
        })
    }

    /// Loads the model record at `path`, validated through classification.
    pub async fn load_model(&self, path: &str) -> Result<ModelData, LoadError> {
        let value = self.fetch(path).await?;
        if RecordKind::classify(&value) != Some(RecordKind::Model) {
            return Err(LoadError::NotAModel {
                path: path.to_string(),
            });
        }
        serde_json::from_value(value).map_err(|source| LoadError::Decode {
            path: path.to_string(),
            expected: "3d model",
            source,
        })
    }

    async fn load_submodel<T: DeserializeOwned>(
        &self,
        kind: SubmodelKind,
        href: &str,
    ) -> Result<T, LoadError> {
        let loaded = self.fetch(href).await.and_then(|value| {
            serde_json::from_value(value).map_err(|source| LoadError::Decode {
                path: href.to_string(),
                expected: kind.label(),
                source,
            })
        });
        loaded.map_err(|source| LoadError::Submodel {
            submodel: kind,
            path: href.to_string(),
            source: Box::new(source),
        })
    }

    async fn fetch(&self, path: &str) -> Result<Value, LoadError> {
        let url = self.join_with_base(path);
        debug!(%url, "fetching record document");
        self.fetcher
            .fetch_json(&url)
            .await
            .map_err(|source| LoadError::Fetch {
                path: path.to_string(),
                source,
            })
    }

    /// Exactly one `/` between base directory and path, whether or not the
    /// base already ends with one.
    fn join_with_base(&self, path: &str) -> String {
        if self.base_dir.ends_with('/') {
            format!("{}{}", self.base_dir, path)
        } else {
            format!("{}/{}", self.base_dir, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InProcessFetcher;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    const BASE: &str = "mem:/data";

    fn part_document() -> Value {
        json!({
            "catenaXId": "PART_P1",
            "partSiteInformationAsPlanned": [
                {
                    "catenaXsiteId": "BPNS0001",
                    "function": "production",
                    "functionValidFrom": "2024-01-29T12:00:00.123+00:00",
                    "functionValidUntil": "2030-01-29T12:00:00.123+00:00",
                }
            ],
            "partTypeInformation": {
                "classification": "product",
                "manufacturerPartId": "Participant 1",
                "nameAtManufacturer": "Gearbox",
            },
        })
    }

    fn cad_document() -> Value {
        json!({
            "catenaXId": "CAD_P1",
            "childItems": [ { "catenaXId": "MODEL_P1" } ],
        })
    }

    fn bom_document() -> Value {
        json!({
            "catenaXId": "BOM_P1",
            "childItems": [
                {
                    "businessPartner": "BPNL0002",
                    "catenaXId": "AAS_P2",
                    "createdOn": "2022-02-03T14:48:54.709Z",
                    "lastModifiedOn": "2022-02-03T14:48:54.709Z",
                    "quantity": { "measurementUnit": "unit:piece", "quantityNumber": 4.0 },
                    "validityPeriod": {
                        "validFrom": "2022-01-01T00:00:00Z",
                        "validTo": "2030-01-01T00:00:00Z",
                    },
                }
            ],
        })
    }

    fn shell_document(with_bom: bool) -> Value {
        let mut descriptors = vec![
            json!({
                "idShort": "PartTypeInformation",
                "endpoints": [ { "protocolInformation": { "href": "PART_P1.json" } } ],
            }),
            json!({
                "idShort": "3dDataAs-X",
                "endpoints": [ { "protocolInformation": { "href": "CAD_P1.json" } } ],
            }),
            // Forward-compatible: unknown descriptors are skipped.
            json!({
                "idShort": "Nameplate",
                "endpoints": [ { "protocolInformation": { "href": "NOPE.json" } } ],
            }),
        ];
        if with_bom {
            descriptors.push(json!({
                "idShort": "Single-Level-BomAs-X",
                "endpoints": [ { "protocolInformation": { "href": "BOM_P1.json" } } ],
            }));
        }
        json!({ "idShort": "AAS_P1", "submodelDescriptors": descriptors })
    }

    fn fetcher(with_bom: bool) -> InProcessFetcher {
        InProcessFetcher::new()
            .with_document(format!("{BASE}/AAS_P1.json"), shell_document(with_bom))
            .with_document(format!("{BASE}/PART_P1.json"), part_document())
            .with_document(format!("{BASE}/CAD_P1.json"), cad_document())
            .with_document(format!("{BASE}/BOM_P1.json"), bom_document())
    }

    fn loader(fetcher: InProcessFetcher) -> Loader<InProcessFetcher> {
        Loader::new(fetcher, BASE, Arc::new(ShellIdAllocator::new()))
    }

    #[tokio::test]
    async fn test_load_aas_resolves_all_submodels() {
        let loader = loader(fetcher(true));
        let aas = loader.load_aas("AAS_P1.json").await.unwrap();
        assert!(aas.access);
        assert_eq!(aas.id_short, "AAS_P1");
        assert_eq!(aas.part.catena_x_id, "PART_P1");
        assert_eq!(aas.cad.catena_x_id, "CAD_P1");
        assert_eq!(aas.bom.as_ref().unwrap().catena_x_id, "BOM_P1");
        assert_eq!(aas.owner(), "Participant 1");
    }

    #[tokio::test]
    async fn test_load_aas_without_bom_descriptor() {
        let loader = loader(fetcher(false));
        let aas = loader.load_aas("AAS_P1.json").await.unwrap();
        assert!(aas.bom.is_none());
    }

    #[tokio::test]
    async fn test_missing_part_descriptor_fails() {
        let shell = json!({
            "idShort": "AAS_P1",
            "submodelDescriptors": [
                {
                    "idShort": "3dDataAs-X",
                    "endpoints": [ { "protocolInformation": { "href": "CAD_P1.json" } } ],
                }
            ],
        });
        let fetcher = InProcessFetcher::new()
            .with_document(format!("{BASE}/AAS_P1.json"), shell)
            .with_document(format!("{BASE}/CAD_P1.json"), cad_document());
        let err = loader(fetcher).load_aas("AAS_P1.json").await.unwrap_err();
        let LoadError::Aas { path, source } = err else {
            panic!("expected outer AAS context, got {err}");
        };
        assert_eq!(path, "AAS_P1.json");
        assert!(matches!(
            *source,
            LoadError::SubmodelMissing {
                submodel: SubmodelKind::Part,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_cad_descriptor_fails() {
        let shell = json!({
            "idShort": "AAS_P1",
            "submodelDescriptors": [
                {
                    "idShort": "PartTypeInformation",
                    "endpoints": [ { "protocolInformation": { "href": "PART_P1.json" } } ],
                }
            ],
        });
        let fetcher = InProcessFetcher::new()
            .with_document(format!("{BASE}/AAS_P1.json"), shell)
            .with_document(format!("{BASE}/PART_P1.json"), part_document());
        let err = loader(fetcher).load_aas("AAS_P1.json").await.unwrap_err();
        let LoadError::Aas { source, .. } = err else {
            panic!("expected outer AAS context, got {err}");
        };
        assert!(matches!(
            *source,
            LoadError::SubmodelMissing {
                submodel: SubmodelKind::Cad,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_failed_subfetch_names_the_submodel() {
        // No CAD document, so its sub-fetch fails.
        let fetcher = InProcessFetcher::new()
            .with_document(format!("{BASE}/AAS_P1.json"), shell_document(true))
            .with_document(format!("{BASE}/PART_P1.json"), part_document())
            .with_document(format!("{BASE}/BOM_P1.json"), bom_document());
        let err = loader(fetcher).load_aas("AAS_P1.json").await.unwrap_err();
        let LoadError::Aas { source, .. } = err else {
            panic!("expected outer AAS context, got {err}");
        };
        let LoadError::Submodel {
            submodel, source, ..
        } = *source
        else {
            panic!("expected submodel context");
        };
        assert_eq!(submodel, SubmodelKind::Cad);
        assert!(matches!(*source, LoadError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_descriptor_without_endpoints_fails() {
        let shell = json!({
            "idShort": "AAS_P1",
            "submodelDescriptors": [ { "idShort": "PartTypeInformation", "endpoints": [] } ],
        });
        let fetcher = InProcessFetcher::new().with_document(format!("{BASE}/AAS_P1.json"), shell);
        let err = loader(fetcher).load_aas("AAS_P1.json").await.unwrap_err();
        let LoadError::Aas { source, .. } = err else {
            panic!("expected outer AAS context, got {err}");
        };
        assert!(matches!(*source, LoadError::MissingEndpoint { .. }));
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_across_loads() {
        let fetcher = fetcher(true);
        let loader = loader(fetcher);
        let first = loader.load_aas("AAS_P1.json").await.unwrap();
        let second = loader.load_aas("AAS_P1.json").await.unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
    }

    #[tokio::test]
    async fn test_load_model() {
        let fetcher = InProcessFetcher::new().with_document(
            format!("{BASE}/MODEL_P1.json"),
            json!({ "catenaXId": "MODEL_P1", "file": "models/p1.glb" }),
        );
        let model = loader(fetcher).load_model("MODEL_P1.json").await.unwrap();
        assert_eq!(model.file, "models/p1.glb");
    }

    #[tokio::test]
    async fn test_load_model_rejects_other_record_kinds() {
        let fetcher =
            InProcessFetcher::new().with_document(format!("{BASE}/MODEL_P1.json"), cad_document());
        let err = loader(fetcher).load_model("MODEL_P1.json").await.unwrap_err();
        assert!(matches!(err, LoadError::NotAModel { .. }));
    }

    #[tokio::test]
    async fn test_loaded_records_classify_round_trip() {
        let loader = loader(fetcher(true));
        let aas = loader.load_aas("AAS_P1.json").await.unwrap();
        assert_eq!(
            RecordKind::classify(&serde_json::to_value(&aas).unwrap()),
            Some(RecordKind::Aas)
        );
        assert_eq!(
            RecordKind::classify(&serde_json::to_value(&aas.part).unwrap()),
            Some(RecordKind::Part)
        );
        assert_eq!(
            RecordKind::classify(&serde_json::to_value(&aas.cad).unwrap()),
            Some(RecordKind::Cad)
        );
        assert_eq!(
            RecordKind::classify(&serde_json::to_value(aas.bom.as_ref().unwrap()).unwrap()),
            Some(RecordKind::Bom)
        );
    }

    #[tokio::test]
    async fn test_duplicate_prefix_resolves_last_wins() {
        let shell = json!({
            "idShort": "AAS_P1",
            "submodelDescriptors": [
                {
                    "idShort": "PartTypeInformation",
                    "endpoints": [ { "protocolInformation": { "href": "PART_OLD.json" } } ],
                },
                {
                    "idShort": "partTypeInformation-v2",
                    "endpoints": [ { "protocolInformation": { "href": "PART_P1.json" } } ],
                },
                {
                    "idShort": "3dDataAs-X",
                    "endpoints": [ { "protocolInformation": { "href": "CAD_P1.json" } } ],
                },
            ],
        });
        let mut old_part = part_document();
        old_part["catenaXId"] = json!("PART_OLD");
        let fetcher = InProcessFetcher::new()
            .with_document(format!("{BASE}/AAS_P1.json"), shell)
            .with_document(format!("{BASE}/PART_OLD.json"), old_part)
            .with_document(format!("{BASE}/PART_P1.json"), part_document())
            .with_document(format!("{BASE}/CAD_P1.json"), cad_document());
        let aas = loader(fetcher).load_aas("AAS_P1.json").await.unwrap();
        assert_eq!(aas.part.catena_x_id, "PART_P1");
    }

    #[tokio::test]
    async fn test_base_dir_join_inserts_exactly_one_slash() {
        for base in ["mem:/data", "mem:/data/"] {
            let fetcher = InProcessFetcher::new().with_document(
                "mem:/data/MODEL_P1.json",
                json!({ "catenaXId": "MODEL_P1", "file": "models/p1.glb" }),
            );
            let loader = Loader::new(fetcher, base, Arc::new(ShellIdAllocator::new()));
            assert!(loader.load_model("MODEL_P1.json").await.is_ok(), "{base}");
        }
    }
}

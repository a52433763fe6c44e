//! Environment-driven configuration and the manufacturer catalog.

use std::env;

/// Environment variable naming the base directory the record files are
/// served from.
pub const DATA_URL_ENV: &str = "AAS_EXPLORER_DATA_URL";

const DEFAULT_DATA_URL: &str = "data/";

/// One selectable participant.
#[derive(Debug, Clone)]
pub struct Manufacturer {
    /// Display name; also the owner key the participant's records carry as
    /// `manufacturerPartId`.
    pub name: String,
    /// Root AAS document path, relative to the data base directory.
    pub aas_path: String,
    /// Display color, `#rrggbb`.
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Base directory URL the record files are fetched from.
    pub base_dir: String,
    /// Selectable participants, in panel order.
    pub manufacturers: Vec<Manufacturer>,
}

impl ExplorerConfig {
    /// Reads the base directory from `AAS_EXPLORER_DATA_URL`, falling back
    /// to `data/`, with the built-in participant catalog.
    pub fn from_env() -> Self {
        let base_dir = env::var(DATA_URL_ENV).unwrap_or_else(|_| DEFAULT_DATA_URL.to_string());
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            manufacturers: default_manufacturers(),
        }
    }

    pub fn manufacturer(&self, name: &str) -> Option<&Manufacturer> {
        self.manufacturers
            .iter()
            .find(|manufacturer| manufacturer.name == name)
    }

    /// Display color for an owner key. Unknown owners render colorless.
    pub fn owner_color(&self, owner: &str) -> &str {
        self.manufacturer(owner)
            .map(|manufacturer| manufacturer.color.as_str())
            .unwrap_or("none")
    }
}

fn default_manufacturers() -> Vec<Manufacturer> {
    [
        ("Participant 1", "AAS_P1.json", "#b8af4a"),
        ("Participant 2", "AAS_P2.json", "#3d746d"),
        ("Participant 3", "AAS_P3.json", "#3f3064"),
        ("Participant 4", "AAS_P4.json", "#e65e31"),
        ("Participant 5", "AAS_P5.json", "#8c2f39"),
    ]
    .into_iter()
    .map(|(name, aas_path, color)| Manufacturer {
        name: name.to_string(),
        aas_path: aas_path.to_string(),
        color: color.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_five_participants() {
        let config = ExplorerConfig::with_base_dir("mem:/data");
        assert_eq!(config.manufacturers.len(), 5);
        assert_eq!(
            config.manufacturer("Participant 1").unwrap().aas_path,
            "AAS_P1.json"
        );
    }

    #[test]
    fn test_owner_color_falls_back_to_none() {
        let config = ExplorerConfig::with_base_dir("mem:/data");
        assert_eq!(config.owner_color("Participant 1"), "#b8af4a");
        assert_eq!(config.owner_color("BPNL_UNKNOWN"), "none");
    }
}

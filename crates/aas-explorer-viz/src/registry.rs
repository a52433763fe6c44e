//! Registry mapping tree path ids to live engine instances.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::error;

use aas_explorer_types::Transform;

use crate::{InstanceId, VisualizationEngine};

/// Tracks which tree node currently has a model shown in the engine.
///
/// Entries are keyed by tree path id, never by engine instance id, so the
/// mapping survives instance-id reuse across sessions. Without an attached
/// engine every show/hide request is a no-op.
#[derive(Default)]
pub struct Visualizer {
    engine: Option<Arc<dyn VisualizationEngine>>,
    entries: HashMap<String, InstanceId>,
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the engine once its context is ready.
    pub fn attach_engine(&mut self, engine: Arc<dyn VisualizationEngine>) {
        self.engine = Some(engine);
    }

    pub fn engine(&self) -> Option<&Arc<dyn VisualizationEngine>> {
        self.engine.as_ref()
    }

    pub fn is_shown(&self, path_id: &str) -> bool {
        self.entries.contains_key(path_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shows the model behind `path_id`.
    ///
    /// Idempotent: a no-op if the node already has a live instance or no
    /// engine is attached. `owner_color` is applied as the appearance key
    /// with the leading `#` stripped. Placement and appearance rejections
    /// after a successful instantiation are logged and the entry is kept;
    /// the instance exists in the scene either way.
    pub async fn show(
        &mut self,
        path_id: &str,
        model_uri: &str,
        transform: Transform,
        owner_color: &str,
    ) {
        let Some(engine) = self.engine.clone() else {
            return;
        };
        if self.entries.contains_key(path_id) {
            return;
        }

        let instance = match engine.instantiate(model_uri).await {
            Ok(instance) => instance,
            Err(err) => {
                error!(path_id, %err, "model instantiation rejected");
                return;
            }
        };
        if let Err(err) = engine.set_local_transform(instance, transform).await {
            error!(path_id, %err, "instance placement rejected");
        }
        let appearance = owner_color.trim_start_matches('#');
        if let Err(err) = engine.set_appearance(instance, appearance).await {
            error!(path_id, %err, "instance appearance rejected");
        }

        self.entries.insert(path_id.to_string(), instance);
    }

    /// Hides the model behind `path_id`.
    ///
    /// A no-op if the node has no live instance or no engine is attached.
    /// The entry is dropped even when the engine rejects the removal.
    pub async fn hide(&mut self, path_id: &str) {
        let Some(engine) = self.engine.clone() else {
            return;
        };
        let Some(&instance) = self.entries.get(path_id) else {
            return;
        };
        if let Err(err) = engine.remove(instance).await {
            error!(path_id, %err, "instance removal rejected");
        }
        self.entries.remove(path_id);
    }

    /// Drops all entries without notifying the engine. Used when the whole
    /// view is being reset externally and the scene is cleared by the caller.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEngine {
        commands: Mutex<Vec<String>>,
        next_instance: AtomicU32,
        reject_instantiate: bool,
        reject_placement: bool,
    }

    impl RecordingEngine {
        fn commands(&self) -> Vec<String> {
            self.commands.lock().unwrap().clone()
        }

        fn push(&self, command: String) {
            self.commands.lock().unwrap().push(command);
        }
    }

    #[async_trait]
    impl VisualizationEngine for RecordingEngine {
        async fn instantiate(&self, model_uri: &str) -> Result<InstanceId, EngineError> {
            if self.reject_instantiate {
                return Err(EngineError {
                    command: "instantiate",
                    message: "context lost".to_string(),
                });
            }
            self.push(format!("instantiate {model_uri}"));
            Ok(InstanceId(self.next_instance.fetch_add(1, Ordering::Relaxed)))
        }

        async fn set_local_transform(
            &self,
            instance: InstanceId,
            _transform: Transform,
        ) -> Result<(), EngineError> {
            if self.reject_placement {
                return Err(EngineError {
                    command: "set_local_transform",
                    message: "bad matrix".to_string(),
                });
            }
            self.push(format!("transform {}", instance.0));
            Ok(())
        }

        async fn set_appearance(
            &self,
            instance: InstanceId,
            appearance: &str,
        ) -> Result<(), EngineError> {
            self.push(format!("appearance {} {appearance}", instance.0));
            Ok(())
        }

        async fn remove(&self, instance: InstanceId) -> Result<(), EngineError> {
            self.push(format!("remove {}", instance.0));
            Ok(())
        }

        async fn clear(&self) -> Result<(), EngineError> {
            self.push("clear".to_string());
            Ok(())
        }

        async fn set_ghosted(&self, enabled: bool) -> Result<(), EngineError> {
            self.push(format!("ghosted {enabled}"));
            Ok(())
        }
    }

    fn visualizer_with(engine: Arc<RecordingEngine>) -> Visualizer {
        let mut visualizer = Visualizer::new();
        visualizer.attach_engine(engine);
        visualizer
    }

    #[tokio::test]
    async fn test_show_is_idempotent_per_path_id() {
        let engine = Arc::new(RecordingEngine::default());
        let mut visualizer = visualizer_with(engine.clone());

        visualizer
            .show("p/", "models/x.glb", Transform::IDENTITY, "#ff0000")
            .await;
        visualizer
            .show("p/", "models/x.glb", Transform::IDENTITY, "#ff0000")
            .await;

        assert_eq!(visualizer.len(), 1);
        let instantiations = engine
            .commands()
            .iter()
            .filter(|command| command.starts_with("instantiate"))
            .count();
        assert_eq!(instantiations, 1);
    }

    #[tokio::test]
    async fn test_show_strips_leading_hash_from_color() {
        let engine = Arc::new(RecordingEngine::default());
        let mut visualizer = visualizer_with(engine.clone());

        visualizer
            .show("p/", "models/x.glb", Transform::IDENTITY, "#b8af4a")
            .await;

        assert!(engine
            .commands()
            .contains(&"appearance 0 b8af4a".to_string()));
    }

    #[tokio::test]
    async fn test_show_without_engine_is_noop() {
        let mut visualizer = Visualizer::new();
        visualizer
            .show("p/", "models/x.glb", Transform::IDENTITY, "#ff0000")
            .await;
        assert!(visualizer.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_instantiation_records_no_entry() {
        let engine = Arc::new(RecordingEngine {
            reject_instantiate: true,
            ..RecordingEngine::default()
        });
        let mut visualizer = visualizer_with(engine);
        visualizer
            .show("p/", "models/x.glb", Transform::IDENTITY, "#ff0000")
            .await;
        assert!(visualizer.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_placement_keeps_entry() {
        let engine = Arc::new(RecordingEngine {
            reject_placement: true,
            ..RecordingEngine::default()
        });
        let mut visualizer = visualizer_with(engine);
        visualizer
            .show("p/", "models/x.glb", Transform::IDENTITY, "#ff0000")
            .await;
        assert!(visualizer.is_shown("p/"));
    }

    #[tokio::test]
    async fn test_hide_removes_instance_and_entry() {
        let engine = Arc::new(RecordingEngine::default());
        let mut visualizer = visualizer_with(engine.clone());

        visualizer
            .show("p/", "models/x.glb", Transform::IDENTITY, "#ff0000")
            .await;
        visualizer.hide("p/").await;

        assert!(visualizer.is_empty());
        assert!(engine.commands().contains(&"remove 0".to_string()));
    }

    #[tokio::test]
    async fn test_hide_unknown_path_is_noop() {
        let engine = Arc::new(RecordingEngine::default());
        let mut visualizer = visualizer_with(engine.clone());
        visualizer.hide("missing/").await;
        assert!(engine.commands().is_empty());
    }

    #[tokio::test]
    async fn test_clear_drops_entries_without_engine_calls() {
        let engine = Arc::new(RecordingEngine::default());
        let mut visualizer = visualizer_with(engine.clone());

        visualizer
            .show("p/", "models/x.glb", Transform::IDENTITY, "#ff0000")
            .await;
        let commands_before = engine.commands().len();
        visualizer.clear();

        assert!(visualizer.is_empty());
        assert_eq!(engine.commands().len(), commands_before);
    }
}

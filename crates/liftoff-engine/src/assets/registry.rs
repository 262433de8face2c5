use std::collections::HashMap;
use std::fmt;
use crate::assets::manifest::AssetManifest;
use crate::components::mesh::MeshHandle;

/// Load state of one named model.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed(String),
}

/// Outcome reported by the page's loader, forwarded to `Game::on_asset`.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetEvent {
    Loaded { name: String, mesh: MeshHandle },
    Failed { name: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    /// The loader reported a name the manifest never declared.
    Unknown(String),
    /// The loader gave up on a declared asset.
    LoadFailed { name: String, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Unknown(name) => write!(f, "unknown asset '{}'", name),
            AssetError::LoadFailed { name, reason } => {
                write!(f, "failed to load '{}': {}", name, reason)
            }
        }
    }
}

impl std::error::Error for AssetError {}

#[derive(Debug, Clone)]
struct Entry {
    mesh: MeshHandle,
    status: AssetStatus,
}

/// Registry of named models, built from an AssetManifest.
/// Provides name-based mesh lookup that only answers once a model has loaded.
pub struct AssetRegistry {
    entries: HashMap<String, Entry>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a registry from a parsed AssetManifest. Every model starts pending.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut entries = HashMap::with_capacity(manifest.models.len());
        for (name, desc) in &manifest.models {
            entries.insert(name.clone(), Entry {
                mesh: MeshHandle(desc.mesh),
                status: AssetStatus::Pending,
            });
        }
        Self { entries }
    }

    /// Record a successful load. Returns the event to hand to the game.
    pub fn mark_loaded(&mut self, name: &str) -> Result<AssetEvent, AssetError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| AssetError::Unknown(name.to_string()))?;
        entry.status = AssetStatus::Loaded;
        Ok(AssetEvent::Loaded {
            name: name.to_string(),
            mesh: entry.mesh,
        })
    }

    /// Record a failed load. The error is returned so the caller can log it;
    /// the registry entry stays `Failed` and its mesh is never handed out.
    pub fn mark_failed(&mut self, name: &str, reason: &str) -> AssetError {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.status = AssetStatus::Failed(reason.to_string());
                AssetError::LoadFailed {
                    name: name.to_string(),
                    reason: reason.to_string(),
                }
            }
            None => AssetError::Unknown(name.to_string()),
        }
    }

    /// Mesh handle for a loaded model. None while pending, failed or unknown.
    pub fn mesh(&self, name: &str) -> Option<MeshHandle> {
        self.entries
            .get(name)
            .filter(|e| e.status == AssetStatus::Loaded)
            .map(|e| e.mesh)
    }

    pub fn status(&self, name: &str) -> Option<&AssetStatus> {
        self.entries.get(name).map(|e| &e.status)
    }

    /// True once no model is pending.
    pub fn settled(&self) -> bool {
        self.entries.values().all(|e| e.status != AssetStatus::Pending)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing the models and sounds a game loads.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Named model lookup: name → path + renderer mesh handle.
    #[serde(default)]
    pub models: HashMap<String, ModelDescriptor>,
    /// Optional audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Relative path to the model file (e.g., "models/rocket.glb").
    pub path: String,
    /// Mesh handle the renderer assigns to this model once decoded.
    pub mesh: u32,
    /// Whether the game cannot start its main action without this model.
    #[serde(default)]
    pub required: bool,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "sounds": {
                "explosion": { "path": "boom.mp3", "event_id": 1 },
                "ambient": { "path": "wind.ogg" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);
        assert_eq!(manifest.sounds["explosion"].event_id, Some(1));
        assert_eq!(manifest.sounds["ambient"].event_id, None);
        assert!(manifest.models.is_empty());
    }

    #[test]
    fn parse_models() {
        let json = r#"{
            "models": {
                "rocket": { "path": "models/rocket.glb", "mesh": 1, "required": true },
                "tower": { "path": "models/tower.glb", "mesh": 2 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.models.len(), 2);
        assert!(manifest.models["rocket"].required);
        assert!(!manifest.models["tower"].required);
        assert_eq!(manifest.models["tower"].mesh, 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AssetManifest::from_json("{ \"models\": [").is_err());
    }
}

//! Narrow interface to the content entity that owns persistence.
//!
//! The engine never talks to the backend directly; it loads one record,
//! and on save/restore hands back an update. The record keeps the encoded
//! rasters as bytes, with URL resolution left to the collaborator.

use std::io;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crop::CropBox;
use crate::transform::TransformState;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no content record loaded")]
    MissingRecord,
    #[error("update rejected by backend: {0}")]
    Rejected(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Settings required to reopen a saved edit losslessly.
///
/// Serialized as the flat `editSettings` JSON object the backend stores:
/// the transform fields inline plus `cropBox`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSettings {
    #[serde(flatten)]
    pub transform: TransformState,
    #[serde(default)]
    pub crop_box: CropBox,
}

/// Current persisted state of the content entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    /// Latest composited raster, what feeds the planning grid.
    pub image: Vec<u8>,
    /// Immutable source raster; never overwritten by an edit.
    pub original_image: Option<Vec<u8>>,
    pub edit_settings: Option<EditSettings>,
    pub last_edited: Option<SystemTime>,
}

impl ContentRecord {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            original_image: None,
            edit_settings: None,
            last_edited: None,
        }
    }

    /// The bytes an edit session works from: always the original when one
    /// exists, never a previously composited output.
    pub fn source_bytes(&self) -> &[u8] {
        self.original_image.as_deref().unwrap_or(&self.image)
    }
}

/// One `save()` or `restoreOriginal()` worth of changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentUpdate {
    pub image: Vec<u8>,
    pub edit_settings: Option<EditSettings>,
    pub last_edited: SystemTime,
}

pub trait ContentStore {
    fn load(&self) -> StoreResult<ContentRecord>;
    fn update(&mut self, update: ContentUpdate) -> StoreResult<()>;
}

/// In-process store backing tests and the smoke binary. Mirrors the
/// backend's behavior of capturing the pre-edit image as `originalImage`
/// on the first update.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    record: ContentRecord,
}

impl MemoryStore {
    pub fn new(record: ContentRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &ContentRecord {
        &self.record
    }
}

impl ContentStore for MemoryStore {
    fn load(&self) -> StoreResult<ContentRecord> {
        Ok(self.record.clone())
    }

    fn update(&mut self, update: ContentUpdate) -> StoreResult<()> {
        if self.record.original_image.is_none() {
            self.record.original_image = Some(std::mem::take(&mut self.record.image));
        }
        self.record.image = update.image;
        self.record.edit_settings = update.edit_settings;
        self.record.last_edited = Some(update.last_edited);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::AspectPreset;
    use crate::transform::Rotation;

    fn sample_settings() -> EditSettings {
        let mut transform = TransformState::default();
        transform.set_scale(150);
        transform.rotate_cw();
        transform.toggle_flip_v();
        transform.set_brightness(120);
        transform.crop_aspect = AspectPreset::Portrait4x5;
        EditSettings {
            transform,
            crop_box: CropBox::new(10.0, 0.0, 80.0, 100.0),
        }
    }

    #[test]
    fn edit_settings_serialize_flat_with_crop_box() {
        let json = serde_json::to_value(sample_settings()).expect("serialize settings");
        assert_eq!(json["scale"], 150);
        assert_eq!(json["rotation"], 90);
        assert_eq!(json["flipV"], true);
        assert_eq!(json["cropAspect"], "4:5");
        assert_eq!(json["cropBox"]["width"], 80.0);
    }

    #[test]
    fn edit_settings_round_trip_is_lossless() {
        let settings = sample_settings();
        let json = serde_json::to_string(&settings).expect("serialize settings");
        let back: EditSettings = serde_json::from_str(&json).expect("deserialize settings");
        assert_eq!(back, settings);
        assert_eq!(back.transform.rotation, Rotation::Deg90);
    }

    #[test]
    fn old_records_missing_fields_restore_with_defaults() {
        // Records written before a field existed still restore: absent
        // transform fields and cropBox fall back to their defaults.
        let json = r#"{"scale":150,"rotation":90,"flipH":true}"#;
        let settings: EditSettings =
            serde_json::from_str(json).expect("partial settings should parse");
        assert_eq!(settings.transform.scale, 150);
        assert_eq!(settings.transform.rotation, Rotation::Deg90);
        assert!(settings.transform.flip_h);
        assert!(!settings.transform.flip_v);
        assert_eq!(settings.transform.brightness, 100);
        assert_eq!(settings.transform.contrast, 100);
        assert_eq!(settings.transform.crop_aspect, AspectPreset::Free);
        assert_eq!(settings.crop_box, CropBox::full_frame());
    }

    #[test]
    fn source_bytes_prefers_the_original() {
        let mut record = ContentRecord::new(vec![1, 2, 3]);
        assert_eq!(record.source_bytes(), &[1, 2, 3]);
        record.original_image = Some(vec![9, 9]);
        assert_eq!(record.source_bytes(), &[9, 9]);
    }

    #[test]
    fn first_update_captures_pre_edit_image_as_original() {
        let mut store = MemoryStore::new(ContentRecord::new(vec![1, 2, 3]));
        store
            .update(ContentUpdate {
                image: vec![4, 5],
                edit_settings: Some(sample_settings()),
                last_edited: SystemTime::now(),
            })
            .expect("update should succeed");

        let record = store.record();
        assert_eq!(record.original_image.as_deref(), Some(&[1, 2, 3][..]));
        assert_eq!(record.image, vec![4, 5]);

        // A second save must not touch the original.
        store
            .update(ContentUpdate {
                image: vec![6],
                edit_settings: Some(sample_settings()),
                last_edited: SystemTime::now(),
            })
            .expect("update should succeed");
        assert_eq!(store.record().original_image.as_deref(), Some(&[1, 2, 3][..]));
    }
}

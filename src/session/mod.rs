//! Edit session lifecycle: start, gestures, save, cancel, reset, restore.
//!
//! A session always works from the original raster, never from a
//! previously composited output, so every save re-renders the full edit
//! from scratch and the stored `editSettings` reopen it losslessly.

pub mod error;
pub mod machine;

pub use error::{SessionError, SessionResult};
pub use machine::{SessionEvent, SessionMachine, SessionState};

use std::time::SystemTime;

use image::DynamicImage;
use image::GenericImageView;

use crate::compositor;
use crate::config::EditorConfig;
use crate::crop::{
    moved_box, resized_box, AspectLock, AspectPreset, CropBox, Handle, SnapPolicy,
};
use crate::geometry::{ContainerSize, NaturalSize, PixelDelta};
use crate::store::{ContentRecord, ContentStore, ContentUpdate, EditSettings};
use crate::transform::TransformState;
use crate::viewport::ImageBounds;

/// At most one gesture is active per session; a resize in progress
/// suppresses move handling and vice versa.
#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Dragging { start: CropBox },
    Resizing { handle: Handle, start: CropBox },
}

impl GestureState {
    const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "drag",
            Self::Resizing { .. } => "resize",
        }
    }
}

#[derive(Debug)]
pub struct EditSession {
    machine: SessionMachine,
    source: DynamicImage,
    source_bytes: Vec<u8>,
    natural: NaturalSize,
    bounds: Option<ImageBounds>,
    crop: CropBox,
    transform: TransformState,
    gesture: GestureState,
    config: EditorConfig,
}

impl EditSession {
    /// Opens an edit session over a content record.
    ///
    /// The working source is the original image when one exists, else the
    /// current image. Prior `editSettings` are restored verbatim (clamped
    /// into valid ranges); otherwise the session starts at the defaults.
    pub fn start(record: &ContentRecord, config: EditorConfig) -> SessionResult<Self> {
        let source_bytes = record.source_bytes().to_vec();
        let source = compositor::decode_source(&source_bytes)?;
        let (width, height) = source.dimensions();
        let natural = NaturalSize::new(width, height);

        let (crop, transform) = match record.edit_settings {
            Some(settings) => (
                settings.crop_box.clamped(config.min_crop_percent),
                settings.transform.normalized(),
            ),
            None => (CropBox::full_frame(), TransformState::default()),
        };

        let mut machine = SessionMachine::new();
        machine.transition(SessionEvent::Start)?;
        tracing::info!(
            width = natural.width,
            height = natural.height,
            restored = record.edit_settings.is_some(),
            "edit session started"
        );

        Ok(Self {
            machine,
            source,
            source_bytes,
            natural,
            bounds: None,
            crop,
            transform,
            gesture: GestureState::Idle,
            config,
        })
    }

    pub fn state(&self) -> SessionState {
        self.machine.state()
    }

    pub fn crop(&self) -> CropBox {
        self.crop
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn natural_size(&self) -> NaturalSize {
        self.natural
    }

    pub fn bounds(&self) -> Option<ImageBounds> {
        self.bounds
    }

    /// Recomputes the viewport mapping. Must be called on image load and on
    /// every container resize; percentage/pixel conversion is invalid until
    /// it succeeds.
    pub fn set_container(&mut self, container: ContainerSize) -> SessionResult<ImageBounds> {
        let bounds =
            ImageBounds::resolve(self.natural, container).ok_or(SessionError::ViewportNotReady)?;
        self.bounds = Some(bounds);
        Ok(bounds)
    }

    /// Applies an aspect preset, recomputing the crop box to the largest
    /// centered fit (or the full frame for `Free`).
    pub fn set_aspect_preset(&mut self, preset: AspectPreset) {
        self.transform.crop_aspect = preset;
        self.crop = CropBox::from_aspect_preset(preset, self.natural);
        tracing::debug!(preset = preset.label(), "aspect preset applied");
    }

    pub fn set_scale(&mut self, scale: u16) {
        self.transform.set_scale(scale);
    }

    pub fn set_brightness(&mut self, brightness: u16) {
        self.transform.set_brightness(brightness);
    }

    pub fn set_contrast(&mut self, contrast: u16) {
        self.transform.set_contrast(contrast);
    }

    pub fn rotate_cw(&mut self) {
        self.transform.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.transform.rotate_ccw();
    }

    pub fn toggle_flip_h(&mut self) {
        self.transform.toggle_flip_h();
    }

    pub fn toggle_flip_v(&mut self) {
        self.transform.toggle_flip_v();
    }

    fn ensure_idle_gesture(&self) -> SessionResult<()> {
        if !self.machine.is_editing() {
            return Err(SessionError::NotEditing {
                state: self.machine.state(),
            });
        }
        match self.gesture {
            GestureState::Idle => Ok(()),
            active => Err(SessionError::GestureInProgress {
                active: active.label(),
            }),
        }
    }

    /// Begins a move gesture from the current crop box.
    pub fn begin_drag(&mut self) -> SessionResult<()> {
        self.ensure_idle_gesture()?;
        if self.bounds.is_none() {
            return Err(SessionError::ViewportNotReady);
        }
        self.gesture = GestureState::Dragging { start: self.crop };
        Ok(())
    }

    /// Begins a resize gesture on one of the eight handles.
    pub fn begin_resize(&mut self, handle: Handle) -> SessionResult<()> {
        self.ensure_idle_gesture()?;
        if self.bounds.is_none() {
            return Err(SessionError::ViewportNotReady);
        }
        self.gesture = GestureState::Resizing {
            handle,
            start: self.crop,
        };
        Ok(())
    }

    /// Feeds a pointer delta (viewport pixels since gesture start) into the
    /// active gesture. `free_movement` is the held modifier that bypasses
    /// grid snapping. No persistence happens mid-gesture.
    pub fn update_gesture(
        &mut self,
        delta: PixelDelta,
        free_movement: bool,
    ) -> SessionResult<CropBox> {
        let bounds = self.bounds.ok_or(SessionError::ViewportNotReady)?;
        let percent = bounds.to_percent_delta(delta);
        let snap = SnapPolicy::new(self.config.snap_step_percent, free_movement);

        self.crop = match self.gesture {
            GestureState::Idle => return Err(SessionError::NoActiveGesture),
            GestureState::Dragging { start } => moved_box(start, percent, snap),
            GestureState::Resizing { handle, start } => resized_box(
                start,
                handle,
                percent,
                AspectLock::for_preset(self.transform.crop_aspect, self.natural),
                snap,
                self.config.min_crop_percent,
            ),
        };
        Ok(self.crop)
    }

    /// Ends the active gesture. Idempotent: pointer-up without a matching
    /// pointer-down is ignored.
    pub fn end_gesture(&mut self) {
        self.gesture = GestureState::Idle;
    }

    /// Returns the crop box and transform to their defaults, staying in
    /// `Editing`. Does not touch persisted state.
    pub fn reset(&mut self) {
        self.crop = CropBox::full_frame();
        self.transform = TransformState::default();
        self.gesture = GestureState::Idle;
        tracing::debug!("session reset to defaults");
    }

    fn edit_settings(&self) -> EditSettings {
        EditSettings {
            transform: self.transform,
            crop_box: self.crop,
        }
    }

    fn render_update(&self) -> SessionResult<ContentUpdate> {
        let output = compositor::composite(&self.source, self.crop, &self.transform)?;
        let image = compositor::encode_jpeg(&output, self.config.jpeg_quality)?;
        Ok(ContentUpdate {
            image,
            edit_settings: Some(self.edit_settings()),
            last_edited: SystemTime::now(),
        })
    }

    fn commit(&mut self, store: &mut dyn ContentStore, update: ContentUpdate) -> SessionResult<()> {
        match store.update(update) {
            Ok(()) => {
                self.machine.transition(SessionEvent::SaveCompleted)?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "persisting update failed; session stays editable");
                self.machine.transition(SessionEvent::SaveFailed)?;
                Err(err.into())
            }
        }
    }

    /// Composites the final raster and hands it to the store together with
    /// the settings needed to reopen this edit. On success the session is
    /// closed; on failure it stays in `Editing` so `save` can be retried
    /// without redoing the edit.
    pub fn save(&mut self, store: &mut dyn ContentStore) -> SessionResult<()> {
        self.machine.transition(SessionEvent::BeginSave)?;
        let update = match self.render_update() {
            Ok(update) => update,
            Err(err) => {
                tracing::warn!(error = %err, "composite failed; nothing persisted");
                self.machine.transition(SessionEvent::SaveFailed)?;
                return Err(err);
            }
        };
        self.commit(store, update)?;
        tracing::info!("edit saved");
        Ok(())
    }

    /// Permanently discards all edits: the persisted image becomes the
    /// original again and `editSettings` are cleared. Unlike `reset`, this
    /// writes through to the store. The session closes on success.
    pub fn restore_original(&mut self, store: &mut dyn ContentStore) -> SessionResult<()> {
        self.machine.transition(SessionEvent::BeginSave)?;
        let update = ContentUpdate {
            image: self.source_bytes.clone(),
            edit_settings: None,
            last_edited: SystemTime::now(),
        };
        self.commit(store, update)?;
        tracing::info!("original image restored");
        Ok(())
    }

    /// Discards the in-memory edit and closes the session. Persisted state
    /// is untouched.
    pub fn cancel(&mut self) -> SessionResult<()> {
        self.machine.transition(SessionEvent::Cancel)?;
        self.gesture = GestureState::Idle;
        tracing::debug!("edit session cancelled");
        Ok(())
    }
}

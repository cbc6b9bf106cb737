//! Editor state and the pure reducer that drives the engine from UI events.
//!
//! [`EditorState`] is an immutable snapshot. [`reduce`] takes the current
//! snapshot and an [`Event`] and returns the next one; it never mutates its
//! input. Buffers are shared between snapshots through `Arc`, so unchanged
//! images are not copied.
//!
//! Rules:
//! - loading or capturing sets both the original and the displayed image
//! - filters and modifications work on the currently displayed image
//! - tone adjustments are always recomputed from the original image
//! - toggling the display never touches either image
//! - an engine error keeps the displayed image and sets a notice
//!
//! Slow filters can run on a [`FilterWorker`](crate::worker::FilterWorker)
//! instead: read [`EditorState::revision`] when submitting, then feed the
//! result back as [`Event::FilterFinished`]. A result computed from an image
//! that has since been replaced is dropped.

use crate::buffer::PixelBuffer;
use crate::dispatch::{apply_filter, apply_modification, FilterKind, ModificationKind};
use crate::error::{EngineError, Result};
use crate::tone::adjust_tone;
use crate::{FilterSettings, ToneParams};
use std::sync::Arc;

/// Snapshot of everything the UI shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    /// Image as loaded or captured, basis for tone adjustments.
    pub original: Option<Arc<PixelBuffer>>,
    /// Image after filters, modifications or tone adjustments.
    pub displayed: Option<Arc<PixelBuffer>>,
    /// Current slider values.
    pub tone: ToneParams,
    /// Show the original instead of the displayed image.
    pub show_original: bool,
    /// Parameters for dispatched filters and modifications.
    pub settings: FilterSettings,
    /// Incremented every time `displayed` is replaced.
    pub revision: u64,
    /// Transient message for the last failed operation.
    pub notice: Option<String>,
}

/// Something that happened in the UI or on a worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An image was picked from the gallery.
    LoadImage(PixelBuffer),
    /// A photo was taken with the camera.
    CapturePhoto(PixelBuffer),
    /// Apply a color filter to the displayed image, inline.
    ApplyFilter(FilterKind),
    /// A worker finished a filter started at `revision`.
    FilterFinished {
        revision: u64,
        result: Result<PixelBuffer>,
    },
    /// Rotate or flip the displayed image.
    ApplyModification(ModificationKind),
    /// Contrast slider moved.
    AdjustContrast(f32),
    /// Brightness slider moved.
    AdjustBrightness(f32),
    /// Switch between the original and the displayed image.
    ToggleDisplay,
    /// Replace the filter settings.
    UpdateSettings(FilterSettings),
    /// Clear the current notice.
    DismissNotice,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once an image has been loaded or captured.
    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }

    /// The image the UI should render right now.
    pub fn visible(&self) -> Option<&PixelBuffer> {
        if self.show_original {
            self.original.as_deref()
        } else {
            self.displayed.as_deref()
        }
    }

    fn with_displayed(&self, buffer: PixelBuffer) -> Self {
        Self {
            displayed: Some(Arc::new(buffer)),
            revision: self.revision + 1,
            notice: None,
            ..self.clone()
        }
    }

    fn with_notice(&self, err: &EngineError) -> Self {
        Self {
            notice: Some(err.to_string()),
            ..self.clone()
        }
    }

    fn loaded(&self, buffer: PixelBuffer) -> Self {
        let buffer = Arc::new(buffer);
        Self {
            original: Some(Arc::clone(&buffer)),
            displayed: Some(buffer),
            tone: ToneParams::default(),
            show_original: false,
            settings: self.settings.clone(),
            revision: self.revision + 1,
            notice: None,
        }
    }

    fn retoned(&self, tone: ToneParams) -> Self {
        let Some(original) = self.original.as_deref() else {
            return self.clone();
        };
        match adjust_tone(original, &tone) {
            Ok(buffer) => Self {
                tone,
                ..self.with_displayed(buffer)
            },
            Err(err) => {
                log::warn!("tone adjustment failed: {}", err);
                self.with_notice(&err)
            }
        }
    }
}

/// Compute the next state for `event`.
pub fn reduce(state: &EditorState, event: Event) -> EditorState {
    match event {
        Event::LoadImage(buffer) | Event::CapturePhoto(buffer) => state.loaded(buffer),

        Event::ApplyFilter(kind) => {
            let Some(displayed) = state.displayed.as_deref() else {
                return state.clone();
            };
            match apply_filter(kind, displayed, &state.settings) {
                Ok(buffer) => state.with_displayed(buffer),
                Err(err) => {
                    log::warn!("{} filter failed: {}", kind, err);
                    state.with_notice(&err)
                }
            }
        }

        Event::FilterFinished { revision, result } => {
            if revision != state.revision || state.displayed.is_none() {
                log::debug!(
                    "dropping filter result for revision {} (current {})",
                    revision,
                    state.revision
                );
                return state.clone();
            }
            match result {
                Ok(buffer) => state.with_displayed(buffer),
                Err(err) => {
                    log::warn!("background filter failed: {}", err);
                    state.with_notice(&err)
                }
            }
        }

        Event::ApplyModification(kind) => {
            let Some(displayed) = state.displayed.as_deref() else {
                return state.clone();
            };
            match apply_modification(kind, displayed, &state.settings) {
                Ok(buffer) => state.with_displayed(buffer),
                Err(err) => {
                    log::warn!("{} failed: {}", kind, err);
                    state.with_notice(&err)
                }
            }
        }

        Event::AdjustContrast(contrast) => state.retoned(ToneParams {
            contrast,
            ..state.tone
        }),

        Event::AdjustBrightness(brightness) => state.retoned(ToneParams {
            brightness,
            ..state.tone
        }),

        Event::ToggleDisplay => EditorState {
            show_original: !state.show_original,
            ..state.clone()
        },

        Event::UpdateSettings(settings) => match settings.validate() {
            Ok(()) => EditorState {
                settings,
                notice: None,
                ..state.clone()
            },
            Err(err) => state.with_notice(&err),
        },

        Event::DismissNotice => EditorState {
            notice: None,
            ..state.clone()
        },
    }
}

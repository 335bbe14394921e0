//! Editor session: the state the shell holds between user actions.
//!
//! An [`EditorSession`] owns the four inputs of a composition (source,
//! geometry, filters, overlay) and the last [`CompositedOutput`]. Every
//! mutation recomposes eagerly once a source is loaded, so
//! [`EditorSession::output`] always reflects the current state.
//!
//! # Loads
//!
//! Reading a file is asynchronous in the browser, so two loads can overlap.
//! Each load takes a [`LoadTicket`] up front; when its decode finishes the
//! result is applied only if no newer ticket was issued in the meantime.
//!
//! ```ignore
//! let ticket = session.begin_load();
//! // ... file read completes later ...
//! let outcome = session.finish_load(ticket, decode_image(&bytes))?;
//! ```

use log::{info, warn};
use thiserror::Error;

use crate::compose::{compose_with, ComposeOptions, CompositedOutput};
use crate::decode::{decode_image, DecodeError, SourceImage};
use crate::encode::{encode_png, EncodeError};
use crate::geometry::{parse_dimension, GeometryError, GeometryState};
use crate::overlay::{ColorParseError, TextOverlayState};
use crate::FilterState;

/// Errors surfaced to the shell by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Composition or export was requested before any image was loaded.
    #[error("No image loaded")]
    NoSourceLoaded,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Color(#[from] ColorParseError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Handle for one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image became the session source.
    Applied { width: u32, height: u32 },
    /// A newer load was started; this result was dropped.
    Stale,
}

impl LoadOutcome {
    /// Short size description for the shell's notification, e.g. `1000x500`.
    pub fn summary(&self) -> Option<String> {
        match self {
            LoadOutcome::Applied { width, height } => Some(format!("{width}x{height}")),
            LoadOutcome::Stale => None,
        }
    }
}

/// The editable state plus the last composited output.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    source: Option<SourceImage>,
    geometry: GeometryState,
    filters: FilterState,
    overlay: TextOverlayState,
    options: ComposeOptions,
    output: Option<CompositedOutput>,
    generation: u64,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ComposeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    // ===== Loading =====

    /// Start a load. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// True if `ticket` belongs to the most recent load.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a finished decode.
    ///
    /// Stale tickets are discarded whatever their result. A decode failure
    /// for the current ticket leaves the previous source, geometry and
    /// output in place.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<SourceImage, DecodeError>,
    ) -> Result<LoadOutcome, SessionError> {
        if !self.is_current(ticket) {
            warn!(
                "discarding load {} (latest is {})",
                ticket.generation, self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        let source = result.map_err(|e| {
            warn!("load {} failed: {}", ticket.generation, e);
            SessionError::Decode(e)
        })?;

        let (width, height) = source.dimensions();
        self.geometry = self.geometry.for_source(width, height);
        self.source = Some(source);
        self.recompose();

        info!("load {} applied: {}x{}", ticket.generation, width, height);
        Ok(LoadOutcome::Applied { width, height })
    }

    /// Decode `bytes` and apply them as a new load in one step.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<LoadOutcome, SessionError> {
        let ticket = self.begin_load();
        self.finish_load(ticket, decode_image(bytes))
    }

    // ===== Geometry =====

    pub fn set_width(&mut self, width: u32) {
        self.geometry = self.geometry.on_width_changed(width);
        self.recompose();
    }

    pub fn set_height(&mut self, height: u32) {
        self.geometry = self.geometry.on_height_changed(height);
        self.recompose();
    }

    /// Width from a text field. Invalid input leaves the geometry unchanged.
    pub fn set_width_input(&mut self, input: &str) -> Result<(), SessionError> {
        let width = parse_dimension(input)?;
        self.set_width(width);
        Ok(())
    }

    /// Height from a text field. Invalid input leaves the geometry unchanged.
    pub fn set_height_input(&mut self, input: &str) -> Result<(), SessionError> {
        let height = parse_dimension(input)?;
        self.set_height(height);
        Ok(())
    }

    pub fn set_aspect_lock(&mut self, aspect_lock: bool) {
        // Toggling the lock changes no pixels
        self.geometry = self.geometry.with_aspect_lock(aspect_lock);
    }

    // ===== Filters =====

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters.clamped();
        self.recompose();
    }

    pub fn update_filters(&mut self, update: impl FnOnce(&mut FilterState)) {
        let mut filters = self.filters;
        update(&mut filters);
        self.set_filters(filters);
    }

    pub fn reset_filters(&mut self) {
        self.set_filters(FilterState::default());
    }

    // ===== Overlay =====

    /// Replace the overlay. The font size is clamped into range.
    pub fn set_overlay(&mut self, overlay: TextOverlayState) {
        self.overlay = overlay.clamped();
        self.recompose();
    }

    pub fn update_overlay(&mut self, update: impl FnOnce(&mut TextOverlayState)) {
        let mut overlay = self.overlay.clone();
        update(&mut overlay);
        self.set_overlay(overlay);
    }

    /// Set the overlay color from a hex string. Invalid input keeps the old color.
    pub fn set_overlay_color(&mut self, hex: &str) -> Result<(), SessionError> {
        let mut overlay = self.overlay.clone();
        overlay.set_color_hex(hex)?;
        self.set_overlay(overlay);
        Ok(())
    }

    // ===== Options =====

    pub fn set_options(&mut self, options: ComposeOptions) {
        self.options = options;
        self.recompose();
    }

    // ===== Accessors =====

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn geometry(&self) -> &GeometryState {
        &self.geometry
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn overlay(&self) -> &TextOverlayState {
        &self.overlay
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// The last composited output, if an image is loaded.
    pub fn output(&self) -> Option<&CompositedOutput> {
        self.output.as_ref()
    }

    // ===== Composition and export =====

    /// Compose from the current state and return the fresh output.
    pub fn compose(&mut self) -> Result<&CompositedOutput, SessionError> {
        let source = self.source.as_ref().ok_or(SessionError::NoSourceLoaded)?;
        let output = compose_with(
            source,
            &self.geometry,
            &self.filters,
            &self.overlay,
            &self.options,
        );
        let output = self.output.insert(output);
        Ok(&*output)
    }

    /// Encode the current output as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, SessionError> {
        let output = self.output.as_ref().ok_or(SessionError::NoSourceLoaded)?;
        Ok(encode_png(output)?)
    }

    fn recompose(&mut self) {
        if let Some(source) = &self.source {
            self.output = Some(compose_with(
                source,
                &self.geometry,
                &self.filters,
                &self.overlay,
                &self.options,
            ));
        }
    }
}

//! Drag and resize geometry for movable surfaces.
//!
//! [`GestureEngine`] owns the position and size of one surface (a modal or a
//! drawer) and turns pointer samples into geometry. Only one gesture can be
//! active at a time; the state lives in a single [`ActiveGesture`] value so a
//! surface can never be dragging and resizing at once.
//!
//! # Gesture lifecycle
//!
//! ```text
//! Idle --begin_drag--> Dragging --pointer_up--> Idle
//! Idle --begin_resize--> Resizing --pointer_up--> Idle
//! ```
//!
//! - Drag output is unclamped; a surface may be dragged off-screen.
//! - Resize output is clamped to [`SizeBounds`] on every move, not only on
//!   release, so the reported size never overshoots.
//! - A pointer-down while a gesture is active means the pointer-up that
//!   should have ended it was lost. The stale gesture is dropped whichever
//!   pointer goes down, and the new gesture (if any) starts from idle.
//! - Move and up events from any pointer other than the gesture's owner are
//!   ignored.
//! - After [`GestureEngine::detach`] every call is a no-op.

use serde::{Deserialize, Serialize};

use super::input::{Point, PointerSample, Size};
use crate::error::{EngineError, Result};
use crate::logging::targets;

/// Position and size of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    /// Top-left corner.
    pub position: Point,
    /// Outer size.
    pub size: Size,
}

/// Component-wise size limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeBounds {
    min: Size,
    max: Size,
}

impl SizeBounds {
    /// Creates bounds. Fails if a dimension is negative or not finite, or if
    /// `min` exceeds `max` in either dimension.
    pub fn new(min: Size, max: Size) -> Result<Self> {
        let ordered = min.width <= max.width && min.height <= max.height;
        if !(min.is_valid() && max.is_valid() && ordered) {
            return Err(EngineError::InvalidBounds {
                min_width: min.width,
                min_height: min.height,
                max_width: max.width,
                max_height: max.height,
            });
        }
        Ok(Self { min, max })
    }

    /// Minimum size.
    pub fn min(&self) -> Size {
        self.min
    }

    /// Maximum size.
    pub fn max(&self) -> Size {
        self.max
    }

    /// Clamps a size into the bounds.
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min.width, self.max.width),
            size.height.clamp(self.min.height, self.max.height),
        )
    }

    /// Returns true if the size is within the bounds.
    pub fn contains(&self, size: Size) -> bool {
        self.clamp(size) == size
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: SurfaceConfig::DEFAULT_MIN_SIZE,
            max: SurfaceConfig::DEFAULT_MAX_SIZE,
        }
    }
}

/// Configuration of a movable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// The header can be dragged.
    pub draggable: bool,
    /// The corner handle can be dragged to resize.
    pub resizable: bool,
    /// The surface fills the viewport; disables drag and resize.
    pub fullscreen: bool,
    /// Size limits.
    pub bounds: SizeBounds,
    /// Size on open.
    pub default_size: Size,
    /// Position on open and after [`GestureEngine::reset_position`].
    pub default_position: Point,
}

impl SurfaceConfig {
    /// Size used when none is configured.
    pub const DEFAULT_SIZE: Size = Size::new(680.0, 480.0);
    /// Minimum size used when none is configured.
    pub const DEFAULT_MIN_SIZE: Size = Size::new(360.0, 240.0);
    /// Maximum size used when none is configured.
    pub const DEFAULT_MAX_SIZE: Size = Size::new(1200.0, 900.0);
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            draggable: false,
            resizable: false,
            fullscreen: false,
            bounds: SizeBounds::default(),
            default_size: Self::DEFAULT_SIZE,
            default_position: Point::default(),
        }
    }
}

/// The gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActiveGesture {
    /// No gesture.
    #[default]
    Idle,
    /// The surface is being moved.
    Dragging {
        pointer_id: u32,
        start_pointer: Point,
        start_position: Point,
    },
    /// The surface is being resized.
    Resizing {
        pointer_id: u32,
        start_pointer: Point,
        start_size: Size,
    },
}

impl ActiveGesture {
    /// The pointer that owns the gesture.
    pub fn pointer_id(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Dragging { pointer_id, .. } | Self::Resizing { pointer_id, .. } => {
                Some(*pointer_id)
            }
        }
    }

    /// Returns true unless idle.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Drag/resize state of one surface.
#[derive(Debug, Clone)]
pub struct GestureEngine {
    config: SurfaceConfig,
    geometry: SurfaceGeometry,
    gesture: ActiveGesture,
    detached: bool,
}

impl GestureEngine {
    /// Creates an engine with the surface at its default position and size.
    pub fn new(config: SurfaceConfig) -> Self {
        let geometry = SurfaceGeometry {
            position: config.default_position,
            size: config.bounds.clamp(config.default_size),
        };
        Self {
            config,
            geometry,
            gesture: ActiveGesture::Idle,
            detached: false,
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Current geometry.
    pub fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    /// Current gesture.
    pub fn gesture(&self) -> ActiveGesture {
        self.gesture
    }

    /// Surface configuration.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Returns true once [`detach`](Self::detach) has been called.
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Whether a drag may start.
    pub fn can_drag(&self) -> bool {
        self.config.draggable && !self.config.fullscreen && !self.detached
    }

    /// Whether a resize may start.
    pub fn can_resize(&self) -> bool {
        self.config.resizable && !self.config.fullscreen && !self.detached
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Enables or disables fullscreen. Entering fullscreen cancels any gesture.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.config.fullscreen = fullscreen;
        if fullscreen {
            self.cancel();
        }
    }

    /// Enables or disables dragging.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.config.draggable = draggable;
        if !draggable && matches!(self.gesture, ActiveGesture::Dragging { .. }) {
            self.cancel();
        }
    }

    /// Enables or disables resizing.
    pub fn set_resizable(&mut self, resizable: bool) {
        self.config.resizable = resizable;
        if !resizable && matches!(self.gesture, ActiveGesture::Resizing { .. }) {
            self.cancel();
        }
    }

    /// Moves the surface back to its default position.
    pub fn reset_position(&mut self) {
        if self.detached {
            return;
        }
        self.cancel();
        self.geometry.position = self.config.default_position;
    }

    // =========================================================================
    // Pointer Input
    // =========================================================================

    /// Starts a drag from the handle.
    ///
    /// `on_interactive` is true when the pointer went down on a button or
    /// other interactive child of the handle; such presses never drag.
    /// Returns true if the gesture started.
    pub fn begin_drag(&mut self, sample: PointerSample, on_interactive: bool) -> bool {
        self.drop_stale(sample.pointer_id);
        if on_interactive || !self.can_drag() {
            return false;
        }
        self.gesture = ActiveGesture::Dragging {
            pointer_id: sample.pointer_id,
            start_pointer: sample.position,
            start_position: self.geometry.position,
        };
        tracing::debug!(target: targets::GESTURE, pointer_id = sample.pointer_id, "drag started");
        true
    }

    /// Starts a resize from the corner handle. Returns true if it started.
    pub fn begin_resize(&mut self, sample: PointerSample) -> bool {
        self.drop_stale(sample.pointer_id);
        if !self.can_resize() {
            return false;
        }
        self.gesture = ActiveGesture::Resizing {
            pointer_id: sample.pointer_id,
            start_pointer: sample.position,
            start_size: self.geometry.size,
        };
        tracing::debug!(target: targets::GESTURE, pointer_id = sample.pointer_id, "resize started");
        true
    }

    /// Applies a pointer move. Returns the new geometry if the sample belongs
    /// to the active gesture. Samples with non-finite coordinates are dropped.
    pub fn pointer_move(&mut self, sample: PointerSample) -> Option<SurfaceGeometry> {
        if self.detached || !sample.position.is_finite() {
            return None;
        }
        match self.gesture {
            ActiveGesture::Dragging {
                pointer_id,
                start_pointer,
                start_position,
            } if pointer_id == sample.pointer_id => {
                self.geometry.position = start_position + (sample.position - start_pointer);
            }
            ActiveGesture::Resizing {
                pointer_id,
                start_pointer,
                start_size,
            } if pointer_id == sample.pointer_id => {
                let raw = start_size.grown_by(sample.position - start_pointer);
                self.geometry.size = self.config.bounds.clamp(raw);
            }
            _ => return None,
        }
        tracing::trace!(target: targets::GESTURE, geometry = ?self.geometry, "gesture moved");
        Some(self.geometry)
    }

    /// Ends the gesture owned by the sample's pointer, committing the last
    /// geometry. Returns the committed geometry.
    pub fn pointer_up(&mut self, sample: PointerSample) -> Option<SurfaceGeometry> {
        if self.detached || self.gesture.pointer_id() != Some(sample.pointer_id) {
            return None;
        }
        self.pointer_move(sample);
        self.gesture = ActiveGesture::Idle;
        tracing::debug!(target: targets::GESTURE, geometry = ?self.geometry, "gesture committed");
        Some(self.geometry)
    }

    /// Abandons the active gesture, keeping the geometry reached so far.
    pub fn cancel(&mut self) {
        if self.gesture.is_active() {
            tracing::debug!(target: targets::GESTURE, "gesture cancelled");
        }
        self.gesture = ActiveGesture::Idle;
    }

    /// Tears the engine down. Every later call is a no-op.
    pub fn detach(&mut self) {
        self.cancel();
        self.detached = true;
    }

    // A gesture still running at pointer-down never saw its pointer-up.
    fn drop_stale(&mut self, pointer_id: u32) {
        if self.detached {
            return;
        }
        if let Some(owner) = self.gesture.pointer_id() {
            tracing::debug!(
                target: targets::GESTURE,
                owner,
                pointer_id,
                "pointer-up was lost, dropping stale gesture"
            );
            self.gesture = ActiveGesture::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GestureEngine {
        GestureEngine::new(SurfaceConfig {
            draggable: true,
            resizable: true,
            ..SurfaceConfig::default()
        })
    }

    fn at(x: f64, y: f64) -> PointerSample {
        PointerSample::new(1, x, y)
    }

    #[test]
    fn test_defaults() {
        let engine = GestureEngine::new(SurfaceConfig::default());
        assert_eq!(engine.geometry().size, Size::new(680.0, 480.0));
        assert!(!engine.can_drag());
        assert!(!engine.can_resize());
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = SizeBounds::new(Size::new(500.0, 100.0), Size::new(400.0, 400.0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBounds { .. }));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let nan = SizeBounds::new(Size::new(f64::NAN, 100.0), Size::new(400.0, 400.0));
        assert!(matches!(nan, Err(EngineError::InvalidBounds { .. })));

        let infinite = SizeBounds::new(Size::new(10.0, 10.0), Size::new(f64::INFINITY, 400.0));
        assert!(matches!(infinite, Err(EngineError::InvalidBounds { .. })));

        let negative = SizeBounds::new(Size::new(-1.0, 10.0), Size::new(400.0, 400.0));
        assert!(matches!(negative, Err(EngineError::InvalidBounds { .. })));
    }

    #[test]
    fn test_non_finite_pointer_sample_ignored() {
        let mut engine = engine();
        assert!(engine.begin_resize(at(0.0, 0.0)));
        assert!(engine.pointer_move(at(f64::NAN, 10.0)).is_none());
        assert_eq!(engine.geometry().size, SurfaceConfig::DEFAULT_SIZE);
    }

    #[test]
    fn test_drag_moves_by_pointer_delta_unclamped() {
        let mut engine = engine();
        assert!(engine.begin_drag(at(10.0, 10.0), false));

        let geometry = engine.pointer_move(at(-4990.0, 20.0)).unwrap();
        assert_eq!(geometry.position, Point::new(-5000.0, 10.0));

        let committed = engine.pointer_up(at(-4990.0, 20.0)).unwrap();
        assert_eq!(committed.position, Point::new(-5000.0, 10.0));
        assert_eq!(engine.gesture(), ActiveGesture::Idle);
    }

    #[test]
    fn test_drag_ignored_on_interactive_child() {
        let mut engine = engine();
        assert!(!engine.begin_drag(at(0.0, 0.0), true));
        assert!(engine.pointer_move(at(50.0, 50.0)).is_none());
    }

    #[test]
    fn test_resize_clamped_on_every_move() {
        let mut engine = engine();
        assert!(engine.begin_resize(at(0.0, 0.0)));

        let big = engine.pointer_move(at(10_000.0, 10_000.0)).unwrap();
        assert_eq!(big.size, Size::new(1200.0, 900.0));

        let small = engine.pointer_move(at(-10_000.0, -10_000.0)).unwrap();
        assert_eq!(small.size, Size::new(360.0, 240.0));
    }

    #[test]
    fn test_new_gesture_replaces_unfinished_one() {
        let mut engine = engine();
        assert!(engine.begin_resize(at(0.0, 0.0)));
        assert!(engine.begin_drag(PointerSample::new(2, 0.0, 0.0), false));
        assert!(matches!(
            engine.gesture(),
            ActiveGesture::Dragging { pointer_id: 2, .. }
        ));

        // The old owner no longer drives anything.
        assert!(engine.pointer_move(at(300.0, 300.0)).is_none());
        assert_eq!(engine.geometry().size, SurfaceConfig::DEFAULT_SIZE);
    }

    #[test]
    fn test_lost_pointer_up_recovers_on_next_down() {
        let mut engine = engine();
        assert!(engine.begin_resize(at(0.0, 0.0)));
        // The up event never arrives; the same pointer goes down on the header.
        assert!(engine.begin_drag(at(5.0, 5.0), false));
        assert!(matches!(engine.gesture(), ActiveGesture::Dragging { .. }));
    }

    #[test]
    fn test_lost_pointer_up_recovers_for_new_pointer_id() {
        let mut engine = engine();
        assert!(engine.begin_resize(PointerSample::new(5, 0.0, 0.0)));

        // A fresh touch gets a fresh pointer id.
        assert!(!engine.begin_drag(PointerSample::new(6, 0.0, 0.0), true));
        assert_eq!(engine.gesture(), ActiveGesture::Idle);

        assert!(engine.begin_drag(PointerSample::new(7, 0.0, 0.0), false));
        engine.pointer_up(PointerSample::new(7, 15.0, 5.0));
        assert_eq!(engine.gesture(), ActiveGesture::Idle);
        assert_eq!(engine.geometry().position, Point::new(15.0, 5.0));
    }

    #[test]
    fn test_pointer_down_recovers_even_when_gesture_disallowed() {
        let mut engine = GestureEngine::new(SurfaceConfig {
            resizable: true,
            ..SurfaceConfig::default()
        });
        assert!(engine.begin_resize(at(0.0, 0.0)));
        assert!(!engine.begin_drag(PointerSample::new(9, 0.0, 0.0), false));
        assert_eq!(engine.gesture(), ActiveGesture::Idle);
    }

    #[test]
    fn test_foreign_pointer_events_ignored() {
        let mut engine = engine();
        engine.begin_drag(at(0.0, 0.0), false);
        assert!(engine.pointer_move(PointerSample::new(7, 100.0, 100.0)).is_none());
        assert!(engine.pointer_up(PointerSample::new(7, 100.0, 100.0)).is_none());
        assert!(engine.gesture().is_active());
    }

    #[test]
    fn test_detach_makes_events_no_ops() {
        let mut engine = engine();
        engine.begin_drag(at(0.0, 0.0), false);
        engine.detach();

        assert!(engine.pointer_move(at(40.0, 40.0)).is_none());
        assert!(engine.pointer_up(at(40.0, 40.0)).is_none());
        assert!(!engine.begin_resize(at(0.0, 0.0)));
        assert_eq!(engine.geometry().position, Point::default());
    }

    #[test]
    fn test_fullscreen_cancels_and_blocks() {
        let mut engine = engine();
        engine.begin_drag(at(0.0, 0.0), false);
        engine.set_fullscreen(true);

        assert_eq!(engine.gesture(), ActiveGesture::Idle);
        assert!(!engine.begin_drag(at(0.0, 0.0), false));
        assert!(!engine.begin_resize(at(0.0, 0.0)));
    }

    #[test]
    fn test_reset_position() {
        let mut engine = engine();
        engine.begin_drag(at(0.0, 0.0), false);
        engine.pointer_up(at(30.0, 40.0));
        assert_eq!(engine.geometry().position, Point::new(30.0, 40.0));

        engine.reset_position();
        assert_eq!(engine.geometry().position, Point::default());
    }
}

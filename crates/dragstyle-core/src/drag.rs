//! Drag and resize gesture handling.
//!
//! The engine turns raw pointer input into [`ElementStore`] transitions. At
//! most one resize gesture is tracked at a time; it is released through
//! [`DragEngine::end_resize`] only, which every pointer-up reaches.

use crate::canvas::ElementStore;
use crate::element::{ElementId, ElementKind};
use crate::input::{DropContext, PointerEvent};
use kurbo::{Point, Vec2};

/// An in-progress resize: the pointer-tracking subscription for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    /// Element being resized.
    pub element: ElementId,
    /// Pointer position at gesture start.
    pub start: Point,
    /// Element size at gesture start.
    pub base: (f64, f64),
}

impl ResizeGesture {
    /// Cumulative pointer travel since the gesture started.
    pub fn delta(&self, pointer: Point) -> Vec2 {
        pointer - self.start
    }
}

/// Translates pointer input into element placement, moves and resizes.
#[derive(Debug, Clone, Default)]
pub struct DragEngine {
    resize: Option<ResizeGesture>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete a drag from the palette: create an element at the drop point.
    pub fn drop_new(
        &mut self,
        store: &mut ElementStore,
        kind: ElementKind,
        ctx: &DropContext,
    ) -> ElementId {
        store.add_element(kind, ctx)
    }

    /// Complete a drag of an element already on the canvas.
    pub fn drop_existing(&mut self, store: &mut ElementStore, id: ElementId, delta: Vec2) {
        store.move_element(id, delta);
    }

    /// Start resizing `id` from the pointer position `pointer`.
    ///
    /// Any gesture still active is ended first. Returns `false` (and tracks
    /// nothing) if the element does not exist.
    pub fn begin_resize(&mut self, store: &ElementStore, id: ElementId, pointer: Point) -> bool {
        self.end_resize();
        let Some(element) = store.get(id) else {
            return false;
        };
        let gesture = ResizeGesture {
            element: id,
            start: pointer,
            base: ElementStore::base_size(element),
        };
        log::debug!("resize gesture acquired for {}", id);
        self.resize = Some(gesture);
        true
    }

    /// Feed a pointer event. Pointer-up ends an active resize wherever it lands.
    pub fn handle_pointer(&mut self, store: &mut ElementStore, event: PointerEvent) {
        match event {
            PointerEvent::Move { position } => {
                if let Some(gesture) = self.resize {
                    store.resize_from(gesture.element, gesture.base, gesture.delta(position));
                }
            }
            PointerEvent::Up { .. } => {
                self.end_resize();
            }
            PointerEvent::Down { .. } => {}
        }
    }

    /// Release the resize subscription. Returns the gesture the first time only.
    pub fn end_resize(&mut self) -> Option<ResizeGesture> {
        let gesture = self.resize.take()?;
        log::debug!("resize gesture released for {}", gesture.element);
        Some(gesture)
    }

    /// The active resize gesture, if any.
    pub fn active_resize(&self) -> Option<&ResizeGesture> {
        self.resize.as_ref()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }
}

//! Canvas element collection and its state transitions.

use crate::element::{CanvasElement, Color, ElementId, ElementKind, ElementSize};
use crate::input::DropContext;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum distance from the surface edge for newly dropped elements.
pub const DROP_MARGIN: f64 = 10.0;
/// Height of an auto-sized footer band.
pub const FOOTER_HEIGHT: f64 = 80.0;
/// Gap kept between an auto-placed footer and the bottom of the surface.
pub const FOOTER_BOTTOM_GAP: f64 = 20.0;
/// Size assumed for an element that has never been resized.
pub const DEFAULT_ELEMENT_SIZE: (f64, f64) = (200.0, 50.0);

/// Partial color change; `None` leaves the existing value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorUpdate {
    pub background: Option<Color>,
    pub text: Option<Color>,
}

/// A state transition on the element collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Add { kind: ElementKind, drop: DropContext },
    Move { id: ElementId, delta: Vec2 },
    Resize { id: ElementId, delta: Vec2 },
    UpdateContent { id: ElementId, content: String },
    UpdateColor { id: ElementId, colors: ColorUpdate },
    Remove { id: ElementId },
    Clear,
}

/// Ordered collection of canvas elements.
///
/// Every operation addressed at an unknown id is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    elements: Vec<CanvasElement>,
}

impl ElementStore {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a command, returning the next state.
    pub fn apply(mut self, command: CanvasCommand) -> Self {
        match command {
            CanvasCommand::Add { kind, drop } => {
                self.add_element(kind, &drop);
            }
            CanvasCommand::Move { id, delta } => self.move_element(id, delta),
            CanvasCommand::Resize { id, delta } => self.resize_element(id, delta),
            CanvasCommand::UpdateContent { id, content } => self.update_content(id, content),
            CanvasCommand::UpdateColor { id, colors } => self.update_color(id, colors),
            CanvasCommand::Remove { id } => {
                self.remove_element(id);
            }
            CanvasCommand::Clear => self.clear(),
        }
        self
    }

    /// Drop a new element onto the surface and return its id.
    ///
    /// Footers ignore the pointer: they span the full surface width near the bottom.
    pub fn add_element(&mut self, kind: ElementKind, drop: &DropContext) -> ElementId {
        let element = match kind {
            ElementKind::Footer => {
                let y = (drop.surface_height() - FOOTER_HEIGHT - FOOTER_BOTTOM_GAP)
                    .max(DROP_MARGIN);
                let mut footer = CanvasElement::new(kind, Point::new(0.0, y));
                footer.size = ElementSize::clamped(drop.surface_width(), FOOTER_HEIGHT);
                footer
            }
            _ => {
                let local = drop.local_point();
                let position = Point::new(local.x.max(DROP_MARGIN), local.y.max(DROP_MARGIN));
                CanvasElement::new(kind, position)
            }
        };
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Translate an element, clamping at the surface origin.
    pub fn move_element(&mut self, id: ElementId, delta: Vec2) {
        if let Some(element) = self.get_mut(id) {
            element.position = Point::new(
                (element.position.x + delta.x).max(0.0),
                (element.position.y + delta.y).max(0.0),
            );
        }
    }

    /// Grow or shrink an element from its current size, anchored at the top-left.
    pub fn resize_element(&mut self, id: ElementId, delta: Vec2) {
        if let Some(base) = self.get(id).map(Self::base_size) {
            self.resize_from(id, base, delta);
        }
    }

    /// Set an element's size to `base + delta`, clamped to the minimums.
    pub fn resize_from(&mut self, id: ElementId, base: (f64, f64), delta: Vec2) {
        if let Some(element) = self.get_mut(id) {
            element.size = ElementSize::clamped(base.0 + delta.x, base.1 + delta.y);
        }
    }

    /// Current explicit size of an element, defaulting unset sides.
    pub fn base_size(element: &CanvasElement) -> (f64, f64) {
        (
            element.size.width.unwrap_or(DEFAULT_ELEMENT_SIZE.0),
            element.size.height.unwrap_or(DEFAULT_ELEMENT_SIZE.1),
        )
    }

    pub fn update_content(&mut self, id: ElementId, content: impl Into<String>) {
        if let Some(element) = self.get_mut(id) {
            element.content = content.into();
        }
    }

    pub fn update_color(&mut self, id: ElementId, colors: ColorUpdate) {
        if let Some(element) = self.get_mut(id) {
            if let Some(background) = colors.background {
                element.background_color = Some(background);
            }
            if let Some(text) = colors.text {
                element.text_color = Some(text);
            }
        }
    }

    /// Remove an element from the canvas.
    pub fn remove_element(&mut self, id: ElementId) -> Option<CanvasElement> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        Some(self.elements.remove(index))
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn get(&self, id: ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut CanvasElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// Point-in-time copy of the collection.
    pub fn snapshot(&self) -> Vec<CanvasElement> {
        self.elements.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{MIN_HEIGHT, MIN_WIDTH};
    use kurbo::Rect;

    fn drop_at(x: f64, y: f64) -> DropContext {
        DropContext::new(Rect::new(0.0, 0.0, 800.0, 600.0), Point::new(x, y), Vec2::ZERO)
    }

    #[test]
    fn test_add_element_at_pointer() {
        let mut store = ElementStore::new();
        let id = store.add_element(ElementKind::Header, &drop_at(120.0, 80.0));

        let element = store.get(id).unwrap();
        assert_eq!(element.kind, ElementKind::Header);
        assert_eq!(element.position, Point::new(120.0, 80.0));
        assert_eq!(element.size, ElementSize::default());
    }

    #[test]
    fn test_add_element_clamps_to_margin() {
        let mut store = ElementStore::new();
        let ctx = DropContext::new(
            Rect::new(200.0, 150.0, 1000.0, 750.0),
            Point::new(190.0, 155.0),
            Vec2::new(-30.0, 0.0),
        );
        let id = store.add_element(ElementKind::Paragraph, &ctx);
        assert_eq!(store.get(id).unwrap().position, Point::new(DROP_MARGIN, DROP_MARGIN));
    }

    #[test]
    fn test_add_footer_spans_bottom() {
        let mut store = ElementStore::new();
        let id = store.add_element(ElementKind::Footer, &drop_at(300.0, 20.0));

        let footer = store.get(id).unwrap();
        assert_eq!(footer.position, Point::new(0.0, 500.0));
        assert_eq!(footer.size.width, Some(800.0));
        assert_eq!(footer.size.height, Some(FOOTER_HEIGHT));
    }

    #[test]
    fn test_add_footer_on_short_surface() {
        let mut store = ElementStore::new();
        let ctx = DropContext::new(Rect::new(0.0, 0.0, 60.0, 50.0), Point::ZERO, Vec2::ZERO);
        let id = store.add_element(ElementKind::Footer, &ctx);

        let footer = store.get(id).unwrap();
        assert_eq!(footer.position, Point::new(0.0, DROP_MARGIN));
        assert_eq!(footer.size.width, Some(MIN_WIDTH));
    }

    #[test]
    fn test_move_clamps_at_origin() {
        let mut store = ElementStore::new();
        let id = store.add_element(ElementKind::Button, &drop_at(50.0, 60.0));

        store.move_element(id, Vec2::new(25.0, -10.0));
        assert_eq!(store.get(id).unwrap().position, Point::new(75.0, 50.0));

        store.move_element(id, Vec2::new(-500.0, -500.0));
        assert_eq!(store.get(id).unwrap().position, Point::ZERO);
    }

    #[test]
    fn test_resize_uses_defaults_and_minimums() {
        let mut store = ElementStore::new();
        let id = store.add_element(ElementKind::Section, &drop_at(50.0, 60.0));

        store.resize_element(id, Vec2::new(40.0, 10.0));
        let size = store.get(id).unwrap().size;
        assert_eq!(size, ElementSize::clamped(240.0, 60.0));

        store.resize_element(id, Vec2::new(-1000.0, -1000.0));
        let size = store.get(id).unwrap().size;
        assert_eq!(size.width, Some(MIN_WIDTH));
        assert_eq!(size.height, Some(MIN_HEIGHT));
    }

    #[test]
    fn test_resize_keeps_position() {
        let mut store = ElementStore::new();
        let id = store.add_element(ElementKind::Image, &drop_at(50.0, 60.0));
        store.resize_element(id, Vec2::new(100.0, 100.0));
        assert_eq!(store.get(id).unwrap().position, Point::new(50.0, 60.0));
    }

    #[test]
    fn test_update_content_and_color() {
        let mut store = ElementStore::new();
        let id = store.add_element(ElementKind::Button, &drop_at(50.0, 60.0));

        store.update_content(id, "Buy now");
        store.update_color(
            id,
            ColorUpdate {
                background: Some(Color::black()),
                text: None,
            },
        );
        store.update_color(
            id,
            ColorUpdate {
                background: None,
                text: Some(Color::white()),
            },
        );

        let element = store.get(id).unwrap();
        assert_eq!(element.content, "Buy now");
        assert_eq!(element.background_color, Some(Color::black()));
        assert_eq!(element.text_color, Some(Color::white()));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut store = ElementStore::new();
        store.add_element(ElementKind::Nav, &drop_at(50.0, 60.0));
        let before = store.clone();
        let missing = uuid::Uuid::new_v4();

        store.move_element(missing, Vec2::new(5.0, 5.0));
        store.resize_element(missing, Vec2::new(5.0, 5.0));
        store.update_content(missing, "x");
        store.update_color(missing, ColorUpdate::default());
        assert!(store.remove_element(missing).is_none());

        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut store = ElementStore::new();
        let a = store.add_element(ElementKind::H1, &drop_at(10.0, 10.0));
        let b = store.add_element(ElementKind::H2, &drop_at(10.0, 20.0));
        let c = store.add_element(ElementKind::H3, &drop_at(10.0, 30.0));

        let removed = store.remove_element(b).unwrap();
        assert_eq!(removed.kind, ElementKind::H2);
        let ids: Vec<_> = store.elements().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_apply_reducer() {
        let store = ElementStore::new().apply(CanvasCommand::Add {
            kind: ElementKind::Link,
            drop: drop_at(100.0, 100.0),
        });
        let id = store.elements()[0].id();

        let store = store
            .apply(CanvasCommand::Move {
                id,
                delta: Vec2::new(10.0, 0.0),
            })
            .apply(CanvasCommand::UpdateContent {
                id,
                content: "Docs".to_string(),
            });
        assert_eq!(store.get(id).unwrap().position, Point::new(110.0, 100.0));
        assert_eq!(store.get(id).unwrap().content, "Docs");

        let store = store.apply(CanvasCommand::Remove { id });
        assert!(store.is_empty());
    }
}

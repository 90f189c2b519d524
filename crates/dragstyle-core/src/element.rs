//! Canvas element definitions.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for canvas elements.
pub type ElementId = Uuid;

/// Minimum width of an explicitly sized element.
pub const MIN_WIDTH: f64 = 100.0;
/// Minimum height of an explicitly sized element.
pub const MIN_HEIGHT: f64 = 30.0;

/// The closed set of element kinds that can be dropped on the canvas.
///
/// Kinds persist as their markup tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "nav")]
    Nav,
    #[serde(rename = "h1")]
    H1,
    #[serde(rename = "h2")]
    H2,
    #[serde(rename = "h3")]
    H3,
    #[serde(rename = "p", alias = "paragraph")]
    Paragraph,
    #[serde(rename = "button")]
    Button,
    #[serde(rename = "a", alias = "link")]
    Link,
    #[serde(rename = "img", alias = "image")]
    Image,
    #[serde(rename = "footer")]
    Footer,
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "div", alias = "container")]
    Container,
}

impl ElementKind {
    /// The markup tag this kind renders as.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Header => "header",
            ElementKind::Nav => "nav",
            ElementKind::H1 => "h1",
            ElementKind::H2 => "h2",
            ElementKind::H3 => "h3",
            ElementKind::Paragraph => "p",
            ElementKind::Button => "button",
            ElementKind::Link => "a",
            ElementKind::Image => "img",
            ElementKind::Footer => "footer",
            ElementKind::Section => "section",
            ElementKind::Container => "div",
        }
    }

    /// Label used in generated markup when the element has no content.
    pub fn default_label(self) -> &'static str {
        match self {
            ElementKind::Header => "Header Section",
            ElementKind::Nav => "Navigation",
            ElementKind::H1 => "Main Heading",
            ElementKind::H2 => "Subheading",
            ElementKind::H3 => "Heading 3",
            ElementKind::Paragraph => "Paragraph text",
            ElementKind::Button => "Click Me",
            ElementKind::Link => "Link",
            ElementKind::Image => "",
            ElementKind::Footer => "Footer",
            ElementKind::Section => "Section",
            ElementKind::Container => "Container",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// RGBA8 color, persisted as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Some(Self::rgb(r, g, b))
            }
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

/// Explicit element dimensions. Either side may be unset (sized to content).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl ElementSize {
    /// A size with both sides set, clamped to the minimums.
    pub fn clamped(width: f64, height: f64) -> Self {
        Self {
            width: Some(width.max(MIN_WIDTH)),
            height: Some(height.max(MIN_HEIGHT)),
        }
    }
}

/// A single element placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    #[serde(deserialize_with = "lenient_id")]
    pub(crate) id: ElementId,
    /// Element kind.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// User text. Empty means "use the kind's default label".
    #[serde(default)]
    pub content: String,
    /// Top-left corner, relative to the canvas surface.
    pub position: Point,
    /// Explicit size, if the element was resized or auto-sized.
    #[serde(flatten)]
    pub size: ElementSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
}

impl CanvasElement {
    /// Create an element with a fresh id.
    pub fn new(kind: ElementKind, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: String::new(),
            position,
            size: ElementSize::default(),
            background_color: None,
            text_color: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Set the content (builder style).
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Whether the user has typed anything into this element.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Content, or the kind's default label when empty.
    pub fn display_content(&self) -> &str {
        if self.content.is_empty() {
            self.kind.default_label()
        } else {
            &self.content
        }
    }
}

/// Accept any id string. Ids that are not UUIDs (older saves used
/// `<kind>-<timestamp>`) are replaced with a fresh one.
fn lenient_id<'de, D>(deserializer: D) -> Result<ElementId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Uuid::parse_str(&raw).unwrap_or_else(|_| {
        log::debug!("Replacing non-UUID element id '{}'", raw);
        Uuid::new_v4()
    }))
}

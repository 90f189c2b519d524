//! Markup generation: element collection → HTML document text.
//!
//! Output is linear, so elements are ordered top to bottom by their `y`
//! position; elements sharing a `y` keep their collection order.

use crate::element::{CanvasElement, Color, ElementKind};
use std::fmt::Write;

/// Emitted instead of a document when the canvas is empty.
pub const EMPTY_PLACEHOLDER: &str = "<!-- Drag elements to see HTML code here -->";

/// Placeholder `src` for image elements without content.
pub const IMAGE_PLACEHOLDER: &str = "image.jpg";

const INDENT: &str = "  ";

/// Generate the full document for a canvas.
#[must_use]
pub fn serialize(elements: &[CanvasElement], background: Color) -> String {
    if elements.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    let mut sorted: Vec<&CanvasElement> = elements.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
    emit_document(&sorted, background)
}

/// Generate a document containing a single element (the "selected element" view).
#[must_use]
pub fn serialize_single(element: &CanvasElement, background: Color) -> String {
    emit_document(&[element], background)
}

/// Render one element's markup fragment, indented for the document body.
#[must_use]
pub fn emit_element(element: &CanvasElement) -> String {
    let content = element.display_content();
    let tag = element.kind.tag();
    match element.kind {
        ElementKind::Header | ElementKind::Nav | ElementKind::Footer | ElementKind::Section => {
            format!("{INDENT}<{tag}>\n{INDENT}  {content}\n{INDENT}</{tag}>")
        }
        ElementKind::H1
        | ElementKind::H2
        | ElementKind::H3
        | ElementKind::Paragraph
        | ElementKind::Button
        | ElementKind::Container => format!("{INDENT}<{tag}>{content}</{tag}>"),
        ElementKind::Link => format!("{INDENT}<a href=\"#\">{content}</a>"),
        ElementKind::Image => {
            let src = if content.is_empty() { IMAGE_PLACEHOLDER } else { content };
            format!("{INDENT}<img src=\"{src}\" alt=\"Image\">")
        }
    }
}

fn emit_document(elements: &[&CanvasElement], background: Color) -> String {
    let mut out = String::with_capacity(512 + elements.len() * 64);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"UTF-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str("  <title>My Website</title>\n");
    out.push_str("  <style>\n");
    out.push_str("    body {\n");
    let _ = writeln!(out, "      background-color: {background};");
    out.push_str("      margin: 0;\n");
    out.push_str("      padding: 20px;\n");
    out.push_str("      font-family: Arial, sans-serif;\n");
    out.push_str("    }\n");
    out.push_str("  </style>\n");
    out.push_str("</head>\n");
    out.push_str("<body>\n\n");

    for element in elements {
        out.push_str(&emit_element(element));
        out.push_str("\n\n");
    }

    out.push_str("</body>\n</html>");
    out
}

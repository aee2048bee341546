/*!
 * Text rendering of accumulated element sequences.
 *
 * `render_elements` produces the canonical form: each element's display text
 * joined by single spaces. `render_transcript` additionally breaks the line
 * at caption boundaries (global control codes and DSW) and prefixes them with
 * their timestamp.
 */

use crate::elements::{CaptionElement, ElementKind, WindowBitmapKind};

/// Transcript rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix caption boundaries with a line break and their time
    pub timestamps: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { timestamps: true }
    }
}

/// Canonical rendering: element texts separated by single spaces
pub fn render_elements<'a, I>(elements: I) -> String
where
    I: IntoIterator<Item = &'a CaptionElement>,
{
    elements
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the element starts a new displayed caption
pub fn is_caption_boundary(element: &CaptionElement) -> bool {
    match &element.kind {
        ElementKind::GlobalControl(_) => true,
        ElementKind::WindowBitmap(command) => command.kind == WindowBitmapKind::Display,
        _ => false,
    }
}

pub fn render_transcript<'a, I>(elements: I, options: RenderOptions) -> String
where
    I: IntoIterator<Item = &'a CaptionElement>,
{
    let mut output = String::new();
    for (index, element) in elements.into_iter().enumerate() {
        if index > 0 {
            output.push(' ');
        }
        if options.timestamps && is_caption_boundary(element) {
            output.push('\n');
            output.push_str(&element.time.to_string());
            output.push_str(" - ");
        }
        output.push_str(&element.to_string());
    }
    output
}

pub fn line21_header(asset: &str, channel: u8) -> String {
    format!("Decoded Line 21 / CEA-608 for Asset: {} - Channel: {}", asset, channel)
}

pub fn dtvcc_header(asset: &str, service: u8) -> String {
    format!("Decoded DTVCC / CEA-708 for Asset: {} - Service: {}", asset, service)
}

/// Extracts the mnemonic tag of a rendered command, e.g. `CLW` from
/// `{CLW:00000101}`. Returns `None` for text runs and malformed input.
pub fn parse_mnemonic(rendered: &str) -> Option<&str> {
    let body = rendered.strip_prefix('{')?;
    let end = body.find([':', '}'])?;
    let tag = &body[..end];
    (!tag.is_empty()).then_some(tag)
}

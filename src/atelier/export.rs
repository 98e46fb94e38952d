use crate::atelier::geometry::FRAME_SIZE;
use crate::atelier::model::{DrawingElement, ShapeKind};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use std::fmt::Write as _;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";
pub const SHAPE_OUTLINE_COLOR: &str = "#111827";
pub const SHAPE_OUTLINE_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("drawing surface is not mounted; the creation cannot be exported yet")]
    SurfaceUnavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportStyle {
    pub background: Option<String>,
    pub fill_opacity: f32,
}

/// Serializes the elements, back to front, as a standalone SVG document.
pub fn render_svg(elements: &[DrawingElement], style: &ExportStyle) -> String {
    let mut svg = String::with_capacity(256 + elements.len() * 128);
    let _ = write!(
        svg,
        r#"<svg xmlns="{SVG_NAMESPACE}" xmlns:xlink="{XLINK_NAMESPACE}" viewBox="0 0 {FRAME_SIZE} {FRAME_SIZE}" preserveAspectRatio="xMidYMid slice">"#
    );

    if let Some(background) = &style.background {
        let _ = write!(
            svg,
            r#"<rect x="0" y="0" width="{FRAME_SIZE}" height="{FRAME_SIZE}" fill="{}"/>"#,
            escape_attr(background)
        );
    }

    for element in elements {
        match element {
            DrawingElement::Shape(shape) => {
                let fill = escape_attr(&shape.fill);
                let common = format!(
                    r#"fill="{fill}" fill-opacity="{:.2}" stroke="{SHAPE_OUTLINE_COLOR}" stroke-width="{SHAPE_OUTLINE_WIDTH}""#,
                    style.fill_opacity
                );
                match shape.kind {
                    ShapeKind::Rectangle => {
                        let _ = write!(
                            svg,
                            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {common}/>"#,
                            shape.origin.x, shape.origin.y, shape.width, shape.height
                        );
                    }
                    ShapeKind::Ellipse => {
                        let center = shape.center();
                        let _ = write!(
                            svg,
                            r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" {common}/>"#,
                            center.x,
                            center.y,
                            shape.width / 2.0,
                            shape.height / 2.0
                        );
                    }
                }
            }
            DrawingElement::Stroke(stroke) => {
                let _ = write!(
                    svg,
                    r#"<path d="{}" stroke="{}" stroke-width="{:.2}" fill="none" stroke-linecap="{}" stroke-linejoin="{}"/>"#,
                    stroke.path_data(),
                    escape_attr(&stroke.color),
                    stroke.width,
                    stroke.cap.as_svg(),
                    stroke.join.as_svg()
                );
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

pub fn to_data_uri(svg: &str) -> String {
    format!("{SVG_DATA_URI_PREFIX}{}", B64.encode(svg.as_bytes()))
}

/// Raw document bytes of an exported creation, for thumbnails and projection.
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri.strip_prefix(SVG_DATA_URI_PREFIX)?;
    B64.decode(payload).ok()
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

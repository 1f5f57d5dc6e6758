//! Vector backend.
//!
//! Builds a small SVG document tree and serializes it deterministically:
//! numbers are rounded to two decimals with trailing zeros trimmed, and
//! attributes are always written in the same order.

use std::fmt::{self, Write as _};
use std::path::Path;

use crate::derive::Background;
use crate::error::{ArtError, Result};
use crate::types::Colour;

use super::{Ellipse, Group, Pie, Point, Rect, Surface};

/// Id of the background gradient definition.
pub const BACKGROUND_GRADIENT_ID: &str = "bg_grad";

const CRISP_EDGES: &str = "svg * { shape-rendering: crispEdges; }";

/// How a shape is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    None,
    Colour(Colour),
    /// Reference to a definition by id.
    Url(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub colour: Colour,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Clockwise rotation about `(cx, cy)`.
    Rotate { degrees: f64, cx: f64, cy: f64 },
    Translate { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        radius: f64,
        large: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect {
        rect: Rect,
        fill: Paint,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Paint,
        stroke: Option<Stroke>,
    },
    Ellipse {
        ellipse: Ellipse,
        fill: Paint,
        stroke: Option<Stroke>,
    },
    Polygon {
        points: Vec<Point>,
        fill: Paint,
    },
    Path {
        commands: Vec<PathCommand>,
        fill: Paint,
        stroke: Option<Stroke>,
    },
    /// Open line with round joins and caps.
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    /// Centred text.
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        fill: Paint,
    },
    Group(SvgGroup),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgGroup {
    pub id: Option<String>,
    pub transform: Option<Transform>,
    /// Group opacity, written as `opacity="..."`.
    pub opacity: Option<f64>,
    pub children: Vec<Element>,
}

impl SvgGroup {
    pub fn named(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(element);
    }
}

/// Entries of the `<defs>` block.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Style(String),
    /// Centred radial gradient; stops are `(offset 0..=1, colour)`.
    RadialGradient {
        id: String,
        stops: Vec<(f64, Colour)>,
    },
}

/// An SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    width: u32,
    height: u32,
    definitions: Vec<Definition>,
    children: Vec<Element>,
    trailer: Vec<String>,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            definitions: Vec::new(),
            children: Vec::new(),
            trailer: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn add_definition(&mut self, definition: Definition) {
        self.definitions.push(definition);
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(element);
    }

    /// Append raw markup just before the closing `</svg>`.
    pub fn append_raw(&mut self, markup: impl Into<String>) {
        self.trailer.push(markup.into());
    }

    /// Find a group anywhere in the tree by id.
    pub fn find_group(&self, id: &str) -> Option<&SvgGroup> {
        fn search<'a>(elements: &'a [Element], id: &str) -> Option<&'a SvgGroup> {
            elements.iter().find_map(|el| match el {
                Element::Group(g) if g.id.as_deref() == Some(id) => Some(g),
                Element::Group(g) => search(&g.children, id),
                _ => None,
            })
        }
        search(&self.children, id)
    }

    /// Serialize and write to disk.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_string()).map_err(|e| ArtError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write SVG: {}", e),
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;

        if !self.definitions.is_empty() {
            writeln!(f, "  <defs>")?;
            for def in &self.definitions {
                write_definition(f, def)?;
            }
            writeln!(f, "  </defs>")?;
        }

        for el in &self.children {
            write_element(f, el, 1)?;
        }
        for raw in &self.trailer {
            writeln!(f, "  {}", raw)?;
        }
        writeln!(f, "</svg>")
    }
}

/// Format a coordinate: two decimals, trailing zeros trimmed.
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 || !rounded.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.2}", rounded);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn points_attr(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", num(p.x), num(p.y));
    }
    out
}

fn path_data(commands: &[PathCommand]) -> String {
    let parts: Vec<String> = commands
        .iter()
        .map(|cmd| match cmd {
            PathCommand::MoveTo(p) => format!("M {} {}", num(p.x), num(p.y)),
            PathCommand::LineTo(p) => format!("L {} {}", num(p.x), num(p.y)),
            PathCommand::Arc {
                radius,
                large,
                sweep,
                to,
            } => format!(
                "A {r} {r} 0 {} {} {} {}",
                u8::from(*large),
                u8::from(*sweep),
                num(to.x),
                num(to.y),
                r = num(*radius)
            ),
            PathCommand::Close => "Z".to_string(),
        })
        .collect();
    parts.join(" ")
}

fn write_paint(f: &mut fmt::Formatter<'_>, attr: &str, paint: &Paint) -> fmt::Result {
    match paint {
        Paint::None => write!(f, r#" {}="none""#, attr),
        Paint::Url(id) => write!(f, r#" {}="url(#{})""#, attr, id),
        Paint::Colour(c) => {
            write!(f, r#" {}="{}""#, attr, c.to_rgb_hex())?;
            if !c.is_opaque() {
                write!(f, r#" {}-opacity="{}""#, attr, num(c.opacity()))?;
            }
            Ok(())
        }
    }
}

fn write_stroke(f: &mut fmt::Formatter<'_>, stroke: Option<&Stroke>) -> fmt::Result {
    if let Some(stroke) = stroke {
        write_paint(f, "stroke", &Paint::Colour(stroke.colour))?;
        write!(f, r#" stroke-width="{}""#, num(stroke.width))?;
    }
    Ok(())
}

fn write_definition(f: &mut fmt::Formatter<'_>, def: &Definition) -> fmt::Result {
    match def {
        Definition::Style(css) => writeln!(f, "    <style>{}</style>", escape(css)),
        Definition::RadialGradient { id, stops } => {
            writeln!(
                f,
                r#"    <radialGradient id="{}" cx="50%" cy="50%" r="50%">"#,
                id
            )?;
            for (offset, colour) in stops {
                writeln!(
                    f,
                    r#"      <stop offset="{}%" stop-color="{}"/>"#,
                    num(offset * 100.0),
                    colour.to_rgb_hex()
                )?;
            }
            writeln!(f, "    </radialGradient>")
        }
    }
}

fn write_element(f: &mut fmt::Formatter<'_>, el: &Element, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match el {
        Element::Rect { rect, fill, stroke } => {
            write!(
                f,
                r#"{}<rect x="{}" y="{}" width="{}" height="{}""#,
                indent,
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height)
            )?;
            write_paint(f, "fill", fill)?;
            write_stroke(f, stroke.as_ref())?;
            writeln!(f, "/>")
        }
        Element::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
        } => {
            write!(
                f,
                r#"{}<circle cx="{}" cy="{}" r="{}""#,
                indent,
                num(*cx),
                num(*cy),
                num(*r)
            )?;
            write_paint(f, "fill", fill)?;
            write_stroke(f, stroke.as_ref())?;
            writeln!(f, "/>")
        }
        Element::Ellipse {
            ellipse,
            fill,
            stroke,
        } => {
            write!(
                f,
                r#"{}<ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
                indent,
                num(ellipse.cx),
                num(ellipse.cy),
                num(ellipse.rx),
                num(ellipse.ry)
            )?;
            write_paint(f, "fill", fill)?;
            write_stroke(f, stroke.as_ref())?;
            writeln!(f, "/>")
        }
        Element::Polygon { points, fill } => {
            write!(f, r#"{}<polygon points="{}""#, indent, points_attr(points))?;
            write_paint(f, "fill", fill)?;
            writeln!(f, "/>")
        }
        Element::Path {
            commands,
            fill,
            stroke,
        } => {
            write!(f, r#"{}<path d="{}""#, indent, path_data(commands))?;
            write_paint(f, "fill", fill)?;
            write_stroke(f, stroke.as_ref())?;
            writeln!(f, "/>")
        }
        Element::Polyline { points, stroke } => {
            write!(
                f,
                r#"{}<polyline points="{}" fill="none""#,
                indent,
                points_attr(points)
            )?;
            write_stroke(f, Some(stroke))?;
            writeln!(f, r#" stroke-linecap="round" stroke-linejoin="round"/>"#)
        }
        Element::Text {
            text,
            x,
            y,
            font_size,
            fill,
        } => {
            write!(
                f,
                r#"{}<text x="{}" y="{}" font-family="monospace" font-size="{}" font-weight="bold" text-anchor="middle" dominant-baseline="central""#,
                indent,
                num(*x),
                num(*y),
                num(*font_size)
            )?;
            write_paint(f, "fill", fill)?;
            writeln!(f, ">{}</text>", escape(text))
        }
        Element::Group(group) => {
            write!(f, "{}<g", indent)?;
            if let Some(id) = &group.id {
                write!(f, r#" id="{}""#, escape(id))?;
            }
            match group.transform {
                Some(Transform::Rotate { degrees, cx, cy }) => write!(
                    f,
                    r#" transform="rotate({} {} {})""#,
                    num(degrees),
                    num(cx),
                    num(cy)
                )?,
                Some(Transform::Translate { x, y }) => {
                    write!(f, r#" transform="translate({} {})""#, num(x), num(y))?
                }
                None => {}
            }
            if let Some(opacity) = group.opacity {
                write!(f, r#" opacity="{}""#, num(opacity))?;
            }
            if group.children.is_empty() {
                return writeln!(f, "/>");
            }
            writeln!(f, ">")?;
            for child in &group.children {
                write_element(f, child, depth + 1)?;
            }
            writeln!(f, "{}</g>", indent)
        }
    }
}

/// Document builder implementing [`Surface`].
pub struct SvgSurface {
    document: Document,
    stack: Vec<SvgGroup>,
    unbalanced: bool,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let mut document = Document::new(width, height);
        document.add_definition(Definition::Style(CRISP_EDGES.to_string()));
        Self {
            document,
            stack: Vec::new(),
            unbalanced: false,
        }
    }

    fn emit(&mut self, element: Element) {
        match self.stack.last_mut() {
            Some(group) => group.push(element),
            None => self.document.push(element),
        }
    }
}

impl Surface for SvgSurface {
    type Output = Document;

    fn fill_background(&mut self, background: Background, _inset: f64) {
        self.document.add_definition(Definition::RadialGradient {
            id: BACKGROUND_GRADIENT_ID.to_string(),
            stops: vec![(0.0, background.inner), (1.0, background.outer)],
        });
        let (w, h) = (self.document.width as f64, self.document.height as f64);
        self.emit(Element::Rect {
            rect: Rect::new(0.0, 0.0, w, h),
            fill: Paint::Url(BACKGROUND_GRADIENT_ID.to_string()),
            stroke: None,
        });
    }

    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        self.emit(Element::Rect {
            rect,
            fill: Paint::Colour(colour),
            stroke: None,
        });
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, colour: Colour) {
        let element = if ellipse.rx == ellipse.ry {
            Element::Circle {
                cx: ellipse.cx,
                cy: ellipse.cy,
                r: ellipse.rx,
                fill: Paint::Colour(colour),
                stroke: None,
            }
        } else {
            Element::Ellipse {
                ellipse,
                fill: Paint::Colour(colour),
                stroke: None,
            }
        };
        self.emit(element);
    }

    fn fill_polygon(&mut self, points: &[Point], colour: Colour) {
        if points.len() < 3 {
            return;
        }
        self.emit(Element::Polygon {
            points: points.to_vec(),
            fill: Paint::Colour(colour),
        });
    }

    fn fill_pie(&mut self, pie: Pie, colour: Colour) {
        let sweep = pie.end - pie.start;
        if sweep >= 360.0 {
            self.fill_ellipse(Ellipse::circle(pie.cx, pie.cy, pie.radius), colour);
            return;
        }
        let at = |deg: f64| {
            let (sin, cos) = deg.to_radians().sin_cos();
            Point::new(pie.cx + pie.radius * cos, pie.cy + pie.radius * sin)
        };
        self.emit(Element::Path {
            commands: vec![
                PathCommand::MoveTo(Point::new(pie.cx, pie.cy)),
                PathCommand::LineTo(at(pie.start)),
                PathCommand::Arc {
                    radius: pie.radius,
                    large: sweep > 180.0,
                    sweep: true,
                    to: at(pie.end),
                },
                PathCommand::Close,
            ],
            fill: Paint::Colour(colour),
            stroke: None,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, colour: Colour) {
        if points.is_empty() {
            return;
        }
        self.emit(Element::Polyline {
            points: points.to_vec(),
            stroke: Stroke { colour, width },
        });
    }

    fn draw_glyph(&mut self, glyph: char, centre: Point, size: f64, colour: Colour) {
        self.emit(Element::Text {
            text: glyph.to_string(),
            x: centre.x,
            y: centre.y,
            font_size: size,
            fill: Paint::Colour(colour),
        });
    }

    fn push_group(&mut self, group: Group) {
        let transform = group.rotation.map(|r| Transform::Rotate {
            degrees: r.degrees,
            cx: r.pivot.x,
            cy: r.pivot.y,
        });
        self.stack.push(SvgGroup {
            id: group.id,
            transform,
            opacity: group.opacity,
            children: Vec::new(),
        });
    }

    fn pop_group(&mut self) {
        match self.stack.pop() {
            Some(group) => self.emit(Element::Group(group)),
            None => self.unbalanced = true,
        }
    }

    fn finish(self) -> Result<Document> {
        if self.unbalanced || !self.stack.is_empty() {
            return Err(ArtError::unbalanced_groups());
        }
        Ok(self.document)
    }
}

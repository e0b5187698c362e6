//! A [`LineRenderer`] that strokes polylines into a [`PathSink`].
//!
//! [`LineBuffer`] keeps the lines it was last given and, on
//! [`request_redraw`](LineRenderer::request_redraw), strokes them
//! synchronously: every polyline with at least two points becomes one
//! connected path, points joined in the order given. The sink decides what a
//! stroke means (record it, write SVG, hand it to a GPU layer).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SamplerError;
use crate::geometry::Point2;
use crate::host::LineRenderer;
use crate::sampler::LineSet;

/// An opaque sRGB color with components in [0, 1].
///
/// Serializes as a `"#rrggbb"` hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// The default indicator color.
    pub const CYAN: Srgb = Srgb {
        r: 0.0,
        g: 1.0,
        b: 1.0,
    };

    /// Parses a hex color string like `"#00ffff"` or `"00ffff"`.
    pub fn from_hex(hex: &str) -> Result<Srgb, SamplerError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SamplerError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let component = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|c| c as f64 / 255.0)
                .map_err(|e| SamplerError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: component(0..2, "red")?,
            g: component(2..4, "green")?,
            b: component(4..6, "blue")?,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// How lines are stroked. Local to the renderer; the sampler never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Srgb,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Srgb::CYAN,
            width: 1.0,
        }
    }
}

/// Drawing surface a [`LineBuffer`] strokes into.
///
/// One redraw is `begin`, then `move_to`/`line_to` calls for every path, then
/// a single `stroke`.
pub trait PathSink {
    fn begin(&mut self, style: &StrokeStyle);
    fn move_to(&mut self, point: Point2);
    fn line_to(&mut self, point: Point2);
    fn stroke(&mut self);
}

/// Everything stroked by one redraw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokedFrame {
    pub style: StrokeStyle,
    pub paths: Vec<Vec<Point2>>,
}

/// A [`PathSink`] that keeps the most recently stroked frame.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pending: StrokedFrame,
    last: Option<StrokedFrame>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last completed frame, if any redraw has happened.
    pub fn last_frame(&self) -> Option<&StrokedFrame> {
        self.last.as_ref()
    }
}

impl PathSink for RecordingSink {
    fn begin(&mut self, style: &StrokeStyle) {
        self.pending = StrokedFrame {
            style: *style,
            paths: Vec::new(),
        };
    }

    fn move_to(&mut self, point: Point2) {
        self.pending.paths.push(vec![point]);
    }

    fn line_to(&mut self, point: Point2) {
        match self.pending.paths.last_mut() {
            Some(path) => path.push(point),
            None => self.pending.paths.push(vec![point]),
        }
    }

    fn stroke(&mut self) {
        self.last = Some(std::mem::take(&mut self.pending));
    }
}

/// Line renderer holding polylines and a stroke style.
#[derive(Debug)]
pub struct LineBuffer<S: PathSink> {
    lines: Vec<Vec<Point2>>,
    style: StrokeStyle,
    sink: S,
    frames: u64,
}

impl<S: PathSink> LineBuffer<S> {
    /// Creates an empty buffer with the default cyan, 1-unit stroke.
    pub fn new(sink: S) -> Self {
        Self::with_style(sink, StrokeStyle::default())
    }

    pub fn with_style(sink: S, style: StrokeStyle) -> Self {
        Self {
            lines: Vec::new(),
            style,
            sink,
            frames: 0,
        }
    }

    /// Lines that the next redraw will stroke.
    pub fn lines(&self) -> &[Vec<Point2>] {
        &self.lines
    }

    /// Replaces the lines with arbitrary polylines.
    pub fn set_paths(&mut self, paths: Vec<Vec<Point2>>) {
        self.lines = paths;
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Number of completed redraws.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Consumes the buffer and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: PathSink> LineRenderer for LineBuffer<S> {
    fn set_lines(&mut self, lines: LineSet) {
        self.lines = lines
            .into_iter()
            .map(|indicator| vec![indicator.start, indicator.end])
            .collect();
    }

    fn request_redraw(&mut self) {
        self.sink.begin(&self.style);
        for line in self.lines.iter().filter(|line| line.len() >= 2) {
            self.sink.move_to(line[0]);
            for &point in &line[1..] {
                self.sink.line_to(point);
            }
        }
        self.sink.stroke();
        self.frames += 1;
    }
}

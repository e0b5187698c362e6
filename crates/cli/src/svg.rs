//! SVG output: a [`PathSink`] that writes each redraw as `<path>` elements.

use showfields_core::{PathSink, Point2, StrokeStyle};

/// Collects stroked paths as SVG markup.
#[derive(Debug, Default)]
pub struct SvgSink {
    style: StrokeStyle,
    data: String,
    elements: Vec<String>,
}

impl SvgSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete SVG document of `width` x `height` holding the last frame.
    pub fn document(&self, width: f64, height: f64) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        );
        out.push_str(&format!(
            "  <rect width=\"{width}\" height=\"{height}\" fill=\"#000000\"/>\n"
        ));
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl PathSink for SvgSink {
    fn begin(&mut self, style: &StrokeStyle) {
        self.style = *style;
        self.data.clear();
        self.elements.clear();
    }

    fn move_to(&mut self, point: Point2) {
        self.data
            .push_str(&format!("M{:.2} {:.2} ", point.x, point.y));
    }

    fn line_to(&mut self, point: Point2) {
        self.data
            .push_str(&format!("L{:.2} {:.2} ", point.x, point.y));
    }

    fn stroke(&mut self) {
        if self.data.is_empty() {
            return;
        }
        self.elements.push(format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            self.data.trim_end(),
            self.style.color.to_hex(),
            self.style.width
        ));
        self.data.clear();
    }
}

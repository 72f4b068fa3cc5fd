//! Annotation sink for debug drawing.
//!
//! The navigator reports what it looked at (scan lanes, hits, path targets,
//! hints) through an [`AnnotationSink`]. Annotations are observational only:
//! swapping [`NullSink`] for an [`AnnotationRecorder`] never changes a
//! steering decision.

mod snapshot;

pub use snapshot::SvgSnapshot;

use crate::core::Vec2;

/// RGB color for annotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(0xBB, 0xBB, 0xBB);
    pub const RED: Color = Color::rgb(0xD5, 0x5E, 0x00);
    pub const ORANGE: Color = Color::rgb(0xE6, 0x9F, 0x00);
    pub const YELLOW: Color = Color::rgb(0xF0, 0xE4, 0x42);
    pub const GREEN: Color = Color::rgb(0x00, 0x9E, 0x73);
    pub const BLUE: Color = Color::rgb(0x00, 0x72, 0xB2);
    pub const CYAN: Color = Color::rgb(0x56, 0xB4, 0xE9);
    pub const MAGENTA: Color = Color::rgb(0xCC, 0x79, 0xA7);

    /// Build from channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB` form
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fire-and-forget drawing calls.
pub trait AnnotationSink {
    /// Whether annotations are wanted at all. Callers may skip building
    /// annotation data when this is false.
    fn enabled(&self) -> bool {
        true
    }

    /// Line segment
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Circle outline
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Text label at a world position
    fn text(&mut self, at: Vec2, text: &str, color: Color);
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl AnnotationSink for NullSink {
    fn enabled(&self) -> bool {
        false
    }

    fn line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}

    fn circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}

    fn text(&mut self, _at: Vec2, _text: &str, _color: Color) {}
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    /// Line segment
    Line { from: Vec2, to: Vec2, color: Color },
    /// Circle outline
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Text label
    Text { at: Vec2, text: String, color: Color },
}

/// Sink that keeps every call for later inspection or SVG export.
#[derive(Clone, Debug, Default)]
pub struct AnnotationRecorder {
    annotations: Vec<Annotation>,
}

impl AnnotationRecorder {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded annotations in call order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Number of recorded annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Drop everything recorded so far (typically once per tick)
    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    /// Take the recorded annotations, leaving the recorder empty
    pub fn take(&mut self) -> Vec<Annotation> {
        std::mem::take(&mut self.annotations)
    }
}

impl AnnotationSink for AnnotationRecorder {
    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.annotations.push(Annotation::Line { from, to, color });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.annotations.push(Annotation::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, at: Vec2, text: &str, color: Color) {
        self.annotations.push(Annotation::Text {
            at,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::rgb(1, 0xAB, 255).to_hex(), "#01ABFF");
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut recorder = AnnotationRecorder::new();
        assert!(recorder.enabled());
        recorder.line(Vec2::ZERO, Vec2::UNIT_X, Color::RED);
        recorder.text(Vec2::UNIT_Y, "hint", Color::GREEN);
        assert_eq!(recorder.len(), 2);
        assert!(matches!(recorder.annotations()[1], Annotation::Text { ref text, .. } if text == "hint"));

        let taken = recorder.take();
        assert_eq!(taken.len(), 2);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_null_sink_is_disabled() {
        let mut sink = NullSink;
        assert!(!sink.enabled());
        sink.circle(Vec2::ZERO, 1.0, Color::BLUE);
    }
}

//! SVG rendering of a grid, route and recorded annotations.

use svg::Document;
use svg::node::element::{Circle, Group, Line, Polygon, Rectangle, Text};

use super::{Annotation, Color};
use crate::core::Vec2;
use crate::grid::OccupancyGrid;
use crate::route::RouteCorridor;

/// Tube fill for route corridors
const ROUTE_TUBE: &str = "#56B4E9";

/// Opacity of the route tube
const ROUTE_OPACITY: f32 = 0.25;

/// Renders a top-down snapshot of the world.
///
/// World +Y points up in the image.
#[derive(Clone, Debug)]
pub struct SvgSnapshot {
    /// Pixels per meter
    scale: f32,
    /// Border around the grid (pixels)
    margin: f32,
}

impl Default for SvgSnapshot {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl SvgSnapshot {
    /// Snapshot renderer with `scale` pixels per meter.
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            margin: 20.0,
        }
    }

    /// Build the SVG document.
    ///
    /// `vehicle_body` is the body outline in world coordinates, if any.
    pub fn render(
        &self,
        grid: &OccupancyGrid,
        route: Option<&RouteCorridor>,
        vehicle_body: Option<[Vec2; 4]>,
        annotations: &[Annotation],
    ) -> Document {
        let frame = Frame::new(grid, self.scale, self.margin);
        let width = frame.width_px;
        let height = frame.height_px;

        let mut doc = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height));

        // Layer 0: Background
        doc = doc.add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", "white"),
        );

        // Layer 1: Obstacles
        doc = doc.add(self.render_cells(grid, &frame));

        // Layer 2: Route tube and centerline
        if let Some(route) = route {
            doc = doc.add(self.render_route(route, &frame));
        }

        // Layer 3: Annotations
        doc = doc.add(self.render_annotations(annotations, &frame));

        // Layer 4: Vehicle
        if let Some(body) = vehicle_body {
            let points: Vec<String> = body
                .iter()
                .map(|&p| {
                    let (x, y) = frame.to_px(p);
                    format!("{:.1},{:.1}", x, y)
                })
                .collect();
            doc = doc.add(
                Polygon::new()
                    .set("points", points.join(" "))
                    .set("fill", Color::ORANGE.to_hex())
                    .set("stroke", "black")
                    .set("stroke-width", 1),
            );
        }

        doc
    }

    /// Render and write to `path`.
    pub fn save(
        &self,
        path: &std::path::Path,
        grid: &OccupancyGrid,
        route: Option<&RouteCorridor>,
        vehicle_body: Option<[Vec2; 4]>,
        annotations: &[Annotation],
    ) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let doc = self.render(grid, route, vehicle_body, annotations);
        svg::save(path, &doc)
    }

    fn render_cells(&self, grid: &OccupancyGrid, frame: &Frame) -> Group {
        let mut group = Group::new().set("id", "obstacles");
        let r = grid.resolution();
        let cell_w = grid.width() / r as f32 * self.scale;
        let cell_h = grid.depth() / r as f32 * self.scale;

        for j in 0..r {
            for i in 0..r {
                if !grid.get_cell(i, j) {
                    continue;
                }
                let center = grid.cell_center(i, j);
                let (x, y) = frame.to_px(center);
                group = group.add(
                    Rectangle::new()
                        .set("x", x - cell_w / 2.0)
                        .set("y", y - cell_h / 2.0)
                        .set("width", cell_w)
                        .set("height", cell_h)
                        .set("fill", "#555555"),
                );
            }
        }
        group
    }

    fn render_route(&self, route: &RouteCorridor, frame: &Frame) -> Group {
        let mut group = Group::new().set("id", "route");
        for k in 0..route.segment_count() {
            let (start, end) = route.segment_endpoints(k);
            let (x1, y1) = frame.to_px(start);
            let (x2, y2) = frame.to_px(end);
            let tube = 2.0 * route.segment_radius(k) * self.scale;
            group = group.add(
                Line::new()
                    .set("x1", x1)
                    .set("y1", y1)
                    .set("x2", x2)
                    .set("y2", y2)
                    .set("stroke", ROUTE_TUBE)
                    .set("stroke-opacity", ROUTE_OPACITY)
                    .set("stroke-width", tube)
                    .set("stroke-linecap", "round"),
            );
            group = group.add(
                Line::new()
                    .set("x1", x1)
                    .set("y1", y1)
                    .set("x2", x2)
                    .set("y2", y2)
                    .set("stroke", Color::BLUE.to_hex())
                    .set("stroke-width", 1),
            );
        }
        group
    }

    fn render_annotations(&self, annotations: &[Annotation], frame: &Frame) -> Group {
        let mut group = Group::new().set("id", "annotations");
        for annotation in annotations {
            match annotation {
                Annotation::Line { from, to, color } => {
                    let (x1, y1) = frame.to_px(*from);
                    let (x2, y2) = frame.to_px(*to);
                    group = group.add(
                        Line::new()
                            .set("x1", x1)
                            .set("y1", y1)
                            .set("x2", x2)
                            .set("y2", y2)
                            .set("stroke", color.to_hex())
                            .set("stroke-width", 1),
                    );
                }
                Annotation::Circle {
                    center,
                    radius,
                    color,
                } => {
                    let (cx, cy) = frame.to_px(*center);
                    group = group.add(
                        Circle::new()
                            .set("cx", cx)
                            .set("cy", cy)
                            .set("r", radius * self.scale)
                            .set("fill", "none")
                            .set("stroke", color.to_hex()),
                    );
                }
                Annotation::Text { at, text, color } => {
                    let (x, y) = frame.to_px(*at);
                    group = group.add(
                        Text::new(text.as_str())
                            .set("x", x)
                            .set("y", y)
                            .set("font-size", 10)
                            .set("font-family", "sans-serif")
                            .set("fill", color.to_hex()),
                    );
                }
            }
        }
        group
    }
}

/// World-to-pixel mapping for one snapshot.
struct Frame {
    min: Vec2,
    max: Vec2,
    scale: f32,
    margin: f32,
    width_px: i32,
    height_px: i32,
}

impl Frame {
    fn new(grid: &OccupancyGrid, scale: f32, margin: f32) -> Self {
        let half = Vec2::new(grid.width() / 2.0, grid.depth() / 2.0);
        let min = grid.center() - half;
        let max = grid.center() + half;
        Self {
            min,
            max,
            scale,
            margin,
            width_px: (grid.width() * scale + 2.0 * margin) as i32,
            height_px: (grid.depth() * scale + 2.0 * margin) as i32,
        }
    }

    #[inline]
    fn to_px(&self, p: Vec2) -> (f32, f32) {
        (
            self.margin + (p.x - self.min.x) * self.scale,
            self.margin + (self.max.y - p.y) * self.scale,
        )
    }
}

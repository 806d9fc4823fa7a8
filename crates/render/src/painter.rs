//! A [`Painter`] that records the draw pass as SVG elements.

use std::mem;

use chart3d_graphics::color::Color;
use chart3d_graphics::geometry::dimension::Dimension2D;
use chart3d_graphics::geometry::point::Point2D;
use chart3d_graphics::render::Painter;
use svg::Document;
use svg::node::Text as TextNode;
use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Rectangle, Text};

fn outline(points: &[Point2D]) -> Option<Data> {
    let (first, rest) = points.split_first()?;
    let data = rest
        .iter()
        .fold(Data::new().move_to((first.x, first.y)), |data, p| data.line_to((p.x, p.y)));
    Some(data.close())
}

pub struct SvgPainter {
    size: Dimension2D,
    scene: Group,
    background: Option<Rectangle>,
    elements: usize,
}

impl SvgPainter {
    pub fn new(size: Dimension2D) -> Self {
        Self {
            size,
            scene: Group::new(),
            background: None,
            elements: 0,
        }
    }

    fn push(&mut self, node: impl Into<Box<dyn svg::Node>>) {
        self.scene = mem::replace(&mut self.scene, Group::new()).add(node);
        self.elements += 1;
    }

    pub fn element_count(&self) -> usize {
        self.elements
    }

    pub fn into_document(self) -> Document {
        let mut document = Document::new()
            .set("viewBox", (0, 0, self.size.width, self.size.height))
            .set("width", self.size.width)
            .set("height", self.size.height);
        if let Some(background) = self.background {
            document = document.add(background);
        }
        document.add(self.scene)
    }
}

impl Painter for SvgPainter {
    fn fill_polygon(&mut self, points: &[Point2D], color: Color) {
        let Some(data) = outline(points) else {
            return;
        };
        self.push(
            Path::new()
                .set("stroke", "none")
                .set("fill", color.to_hex())
                .set("fill-opacity", color.opacity())
                .set("d", data),
        );
    }

    fn stroke_polygon(&mut self, points: &[Point2D], color: Color, width: f64) {
        let Some(data) = outline(points) else {
            return;
        };
        self.push(
            Path::new()
                .set("stroke", color.darker().to_hex())
                .set("fill", "none")
                .set("stroke-width", width)
                .set("stroke-linejoin", "round")
                .set("d", data),
        );
    }

    fn draw_line(&mut self, from: Point2D, to: Point2D, color: Color, width: f64) {
        let data = Data::new().move_to((from.x, from.y)).line_to((to.x, to.y));
        self.push(
            Path::new()
                .set("stroke", color.to_hex())
                .set("fill", "none")
                .set("stroke-width", width)
                .set("d", data),
        );
    }

    fn draw_label(&mut self, text: &str, at: Point2D, color: Color, font_size: f64) {
        self.push(
            Text::new()
                .set("x", at.x)
                .set("y", at.y)
                .set("font-family", "Roboto, Open sans, sans-serif")
                .set("font-size", font_size)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("fill", color.to_hex())
                .add(TextNode::new(text)),
        );
    }

    fn fill_background(&mut self, size: Dimension2D, color: Color) {
        self.background = Some(
            Rectangle::new()
                .set("width", size.width)
                .set("height", size.height)
                .set("fill", color.to_hex())
                .set("stroke", "none"),
        );
    }
}

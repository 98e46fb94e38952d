use crate::atelier::geometry::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SHAPE_POSITION_RANGE: (f32, f32) = (10.0, 90.0);
pub const SHAPE_SIZE_RANGE: (f32, f32) = (10.0, 30.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    Round,
    Square,
}

impl LineCap {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    Round,
    Bevel,
    Miter,
}

impl LineJoin {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Bevel => "bevel",
            Self::Miter => "miter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricShape {
    pub id: ElementId,
    pub kind: ShapeKind,
    /// Top-left corner of the bounding box.
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub fill: String,
}

impl GeometricShape {
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        match self.kind {
            ShapeKind::Rectangle => {
                point.x >= self.origin.x
                    && point.x <= self.origin.x + self.width
                    && point.y >= self.origin.y
                    && point.y <= self.origin.y + self.height
            }
            ShapeKind::Ellipse => {
                let center = self.center();
                let rx = self.width / 2.0;
                let ry = self.height / 2.0;
                let nx = (point.x - center.x) / rx;
                let ny = (point.y - center.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { point: Point },
    LineTo { point: Point },
}

impl PathCommand {
    pub fn point(&self) -> Point {
        match self {
            Self::MoveTo { point } | Self::LineTo { point } => *point,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: ElementId,
    pub commands: Vec<PathCommand>,
    pub color: String,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Stroke {
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().map(PathCommand::point)
    }

    /// SVG path data. A stroke that never moved gets a zero-length segment
    /// so the line cap still renders it as a dot.
    pub fn path_data(&self) -> String {
        let mut data = String::new();
        for command in &self.commands {
            if !data.is_empty() {
                data.push(' ');
            }
            match command {
                PathCommand::MoveTo { point } => {
                    data.push_str(&format!("M {:.2} {:.2}", point.x, point.y))
                }
                PathCommand::LineTo { point } => {
                    data.push_str(&format!("L {:.2} {:.2}", point.x, point.y))
                }
            }
        }
        if let [PathCommand::MoveTo { point }] = self.commands.as_slice() {
            data.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
        }
        data
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawingElement {
    Shape(GeometricShape),
    Stroke(Stroke),
}

impl DrawingElement {
    pub fn id(&self) -> ElementId {
        match self {
            Self::Shape(shape) => shape.id,
            Self::Stroke(stroke) => stroke.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    ToFront,
    ToBack,
    StepForward,
    StepBackward,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("element {0} does not exist")]
    NotFound(ElementId),
    #[error("element {0} is a stroke and cannot be moved")]
    ImmutableStroke(ElementId),
}

/// Ordered element list of one creation. Index order is z-order, back to front.
#[derive(Debug, Default)]
pub struct DrawingModel {
    elements: Vec<DrawingElement>,
    selected: Option<ElementId>,
    next_id: u64,
}

impl DrawingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id.filter(|id| self.index_of(*id).is_some());
    }

    pub fn get(&self, id: ElementId) -> Option<&DrawingElement> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn shape(&self, id: ElementId) -> Option<&GeometricShape> {
        match self.get(id)? {
            DrawingElement::Shape(shape) => Some(shape),
            DrawingElement::Stroke(_) => None,
        }
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }

    fn allocate_id(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId(self.next_id)
    }

    /// Appends a shape at a random spot inside the frame, front-most.
    pub fn add_shape<R: Rng + ?Sized>(
        &mut self,
        kind: ShapeKind,
        fill: impl Into<String>,
        rng: &mut R,
    ) -> ElementId {
        let (min_pos, max_pos) = SHAPE_POSITION_RANGE;
        let (min_size, max_size) = SHAPE_SIZE_RANGE;
        let origin = Point::new(
            rng.gen_range(min_pos..=max_pos),
            rng.gen_range(min_pos..=max_pos),
        );
        let width = rng.gen_range(min_size..=max_size);
        let height = rng.gen_range(min_size..=max_size);
        self.insert_shape(kind, origin, width, height, fill)
    }

    pub fn insert_shape(
        &mut self,
        kind: ShapeKind,
        origin: Point,
        width: f32,
        height: f32,
        fill: impl Into<String>,
    ) -> ElementId {
        let id = self.allocate_id();
        self.elements.push(DrawingElement::Shape(GeometricShape {
            id,
            kind,
            origin,
            width: width.max(f32::EPSILON),
            height: height.max(f32::EPSILON),
            fill: fill.into(),
        }));
        id
    }

    /// Starts a stroke seeded with one point. It is appended right away so it
    /// renders while it grows.
    pub fn begin_stroke(
        &mut self,
        start: Point,
        color: impl Into<String>,
        width: f32,
        cap: LineCap,
    ) -> ElementId {
        let id = self.allocate_id();
        self.elements.push(DrawingElement::Stroke(Stroke {
            id,
            commands: vec![PathCommand::MoveTo { point: start }],
            color: color.into(),
            width,
            cap,
            join: LineJoin::Round,
        }));
        id
    }

    pub fn extend_stroke(&mut self, id: ElementId, point: Point) -> Result<(), ModelError> {
        match self.elements.iter_mut().find(|element| element.id() == id) {
            Some(DrawingElement::Stroke(stroke)) => {
                stroke.commands.push(PathCommand::LineTo { point });
                Ok(())
            }
            Some(DrawingElement::Shape(_)) | None => Err(ModelError::NotFound(id)),
        }
    }

    pub fn delete_selected(&mut self) -> Option<DrawingElement> {
        let id = self.selected.take()?;
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    pub fn set_shape_origin(&mut self, id: ElementId, origin: Point) -> Result<(), ModelError> {
        self.shape_mut(id)?.origin = origin;
        Ok(())
    }

    fn shape_mut(&mut self, id: ElementId) -> Result<&mut GeometricShape, ModelError> {
        match self.elements.iter_mut().find(|element| element.id() == id) {
            Some(DrawingElement::Shape(shape)) => Ok(shape),
            Some(DrawingElement::Stroke(_)) => Err(ModelError::ImmutableStroke(id)),
            None => Err(ModelError::NotFound(id)),
        }
    }

    /// Moves an element within the z-order. Returns whether the order changed;
    /// stepping past either end is a no-op.
    pub fn reorder(&mut self, id: ElementId, direction: Reorder) -> Result<bool, ModelError> {
        let index = self.index_of(id).ok_or(ModelError::NotFound(id))?;
        let last = self.elements.len() - 1;
        let target = match direction {
            Reorder::ToFront => last,
            Reorder::ToBack => 0,
            Reorder::StepForward => (index + 1).min(last),
            Reorder::StepBackward => index.saturating_sub(1),
        };
        if target == index {
            return Ok(false);
        }
        let element = self.elements.remove(index);
        self.elements.insert(target, element);
        Ok(true)
    }

    pub fn clear_all(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    /// Front-most shape under `point`. Strokes are never hit.
    pub fn hit_test_shape(&self, point: Point) -> Option<ElementId> {
        self.elements.iter().rev().find_map(|element| match element {
            DrawingElement::Shape(shape) if shape.contains(point) => Some(shape.id),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;
    use std::collections::BTreeSet;

    fn three_shapes() -> (DrawingModel, [ElementId; 3]) {
        let mut model = DrawingModel::new();
        let a = model.insert_shape(
            ShapeKind::Rectangle,
            Point::new(0.0, 0.0),
            10.0,
            10.0,
            "#EF4444",
        );
        let b = model.insert_shape(
            ShapeKind::Ellipse,
            Point::new(20.0, 20.0),
            10.0,
            10.0,
            "#3B82F6",
        );
        let c = model.insert_shape(
            ShapeKind::Rectangle,
            Point::new(40.0, 40.0),
            10.0,
            10.0,
            "#FACC15",
        );
        (model, [a, b, c])
    }

    fn order(model: &DrawingModel) -> Vec<ElementId> {
        model.elements().iter().map(DrawingElement::id).collect()
    }

    #[test]
    fn add_shape_places_unique_shapes_inside_documented_ranges() {
        let mut model = DrawingModel::new();
        let mut rng = StdRng::seed_from_u64(7);
        for index in 0..50 {
            let kind = if index % 2 == 0 {
                ShapeKind::Rectangle
            } else {
                ShapeKind::Ellipse
            };
            model.add_shape(kind, "#22C55E", &mut rng);
        }

        assert_eq!(model.len(), 50);
        let ids: BTreeSet<_> = model.elements().iter().map(DrawingElement::id).collect();
        assert_eq!(ids.len(), 50);
        for element in model.elements() {
            let DrawingElement::Shape(shape) = element else {
                panic!("add_shape should only create shapes");
            };
            assert!((10.0..=90.0).contains(&shape.origin.x));
            assert!((10.0..=90.0).contains(&shape.origin.y));
            assert!((10.0..=30.0).contains(&shape.width));
            assert!((10.0..=30.0).contains(&shape.height));
            assert_eq!(shape.fill, "#22C55E");
        }
    }

    #[test]
    fn delete_selected_twice_is_a_noop_the_second_time() {
        let (mut model, [_, b, _]) = three_shapes();
        model.select(Some(b));

        let removed = model.delete_selected().expect("selected shape should be removed");
        assert_eq!(removed.id(), b);
        assert_eq!(model.selected(), None);
        assert_eq!(model.len(), 2);

        assert!(model.delete_selected().is_none());
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn strokes_cannot_be_moved() {
        let mut model = DrawingModel::new();
        let stroke = model.begin_stroke(Point::new(5.0, 5.0), "#000000", 1.0, LineCap::Round);

        assert_eq!(
            model.set_shape_origin(stroke, Point::new(3.0, 3.0)),
            Err(ModelError::ImmutableStroke(stroke))
        );
    }

    #[test]
    fn shapes_move_without_clamping() {
        let (mut model, [a, _, _]) = three_shapes();
        model
            .set_shape_origin(a, Point::new(-25.0, 140.0))
            .expect("shape should move");
        let shape = model.shape(a).expect("shape should exist");
        assert_eq!(shape.origin, Point::new(-25.0, 140.0));
    }

    #[rstest]
    #[case::to_front(0, Reorder::ToFront, [1, 2, 0], true)]
    #[case::to_back(2, Reorder::ToBack, [2, 0, 1], true)]
    #[case::step_forward(0, Reorder::StepForward, [1, 0, 2], true)]
    #[case::step_backward(2, Reorder::StepBackward, [0, 2, 1], true)]
    #[case::step_forward_at_front(2, Reorder::StepForward, [0, 1, 2], false)]
    #[case::step_backward_at_back(0, Reorder::StepBackward, [0, 1, 2], false)]
    fn reorder_relocates_without_gaps(
        #[case] target: usize,
        #[case] direction: Reorder,
        #[case] expected: [usize; 3],
        #[case] changed: bool,
    ) {
        let (mut model, ids) = three_shapes();
        let moved = model
            .reorder(ids[target], direction)
            .expect("element should exist");

        assert_eq!(moved, changed);
        assert_eq!(order(&model), expected.map(|index| ids[index]).to_vec());
    }

    #[test]
    fn hit_test_prefers_front_most_shape() {
        let mut model = DrawingModel::new();
        let back = model.insert_shape(
            ShapeKind::Rectangle,
            Point::new(0.0, 0.0),
            50.0,
            50.0,
            "#111827",
        );
        let front = model.insert_shape(
            ShapeKind::Rectangle,
            Point::new(10.0, 10.0),
            20.0,
            20.0,
            "#FFFFFF",
        );

        assert_eq!(model.hit_test_shape(Point::new(15.0, 15.0)), Some(front));
        assert_eq!(model.hit_test_shape(Point::new(45.0, 45.0)), Some(back));
        assert_eq!(model.hit_test_shape(Point::new(80.0, 80.0)), None);
    }

    #[test]
    fn ellipse_hit_test_excludes_bounding_box_corners() {
        let mut model = DrawingModel::new();
        let id = model.insert_shape(
            ShapeKind::Ellipse,
            Point::new(0.0, 0.0),
            20.0,
            10.0,
            "#8B5CF6",
        );

        assert_eq!(model.hit_test_shape(Point::new(10.0, 5.0)), Some(id));
        assert_eq!(model.hit_test_shape(Point::new(0.5, 0.5)), None);
    }

    #[test]
    fn single_point_stroke_renders_as_dot() {
        let mut model = DrawingModel::new();
        let id = model.begin_stroke(Point::new(12.0, 34.5), "#000000", 2.0, LineCap::Round);
        let Some(DrawingElement::Stroke(stroke)) = model.get(id) else {
            panic!("stroke should exist");
        };
        assert_eq!(stroke.path_data(), "M 12.00 34.50 L 12.00 34.50");
    }

    #[test]
    fn clear_all_drops_elements_and_selection() {
        let (mut model, [a, _, _]) = three_shapes();
        model.select(Some(a));
        model.clear_all();
        assert!(model.is_empty());
        assert_eq!(model.selected(), None);
    }
}

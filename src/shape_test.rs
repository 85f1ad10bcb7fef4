#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

fn base(kind: ShapeKind) -> Shape {
    Shape {
        id: new_id(),
        x: 0.0,
        y: 0.0,
        stroke_color: "#000000".to_owned(),
        stroke_width: 2.0,
        stroke_style: StrokeStyle::Solid,
        kind,
    }
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape {
        x,
        y,
        ..base(ShapeKind::Rect { width: w, height: h })
    }
}

// --- Serialization schema ---

#[test]
fn rect_serializes_flat_with_type_tag() {
    let mut shape = rect(10.0, 20.0, 30.0, 40.0);
    shape.stroke_color = "#ff0000".to_owned();
    let v: serde_json::Value = serde_json::to_value(&shape).unwrap();
    assert_eq!(v["type"], "rect");
    assert_eq!(v["x"], 10.0);
    assert_eq!(v["y"], 20.0);
    assert_eq!(v["width"], 30.0);
    assert_eq!(v["height"], 40.0);
    assert_eq!(v["strokeColor"], "#ff0000");
    assert_eq!(v["strokeWidth"], 2.0);
    assert_eq!(v["strokeStyle"], "solid");
}

#[test]
fn line_serializes_camel_case_endpoints() {
    let shape = base(ShapeKind::Line { end_x: 5.0, end_y: 6.0 });
    let v: serde_json::Value = serde_json::to_value(&shape).unwrap();
    assert_eq!(v["type"], "line");
    assert_eq!(v["endX"], 5.0);
    assert_eq!(v["endY"], 6.0);
}

#[test]
fn text_serializes_camel_case_font_size() {
    let shape = base(ShapeKind::Text {
        text: "hi".to_owned(),
        font_size: 24.0,
        width: 28.8,
        height: 30.0,
    });
    let v: serde_json::Value = serde_json::to_value(&shape).unwrap();
    assert_eq!(v["type"], "text");
    assert_eq!(v["fontSize"], 24.0);
}

#[test]
fn stroke_style_serializes_lowercase() {
    let mut shape = rect(0.0, 0.0, 1.0, 1.0);
    shape.stroke_style = StrokeStyle::Dashed;
    let v: serde_json::Value = serde_json::to_value(&shape).unwrap();
    assert_eq!(v["strokeStyle"], "dashed");
}

#[test]
fn legacy_shape_without_stroke_style_migrates_to_solid() {
    let json = r##"{
        "id": "00000000-0000-0000-0000-000000000001",
        "type": "rect",
        "x": 0.0, "y": 0.0,
        "width": 10.0, "height": 10.0,
        "strokeColor": "#000000",
        "strokeWidth": 2.0
    }"##;
    let shape: Shape = serde_json::from_str(json).unwrap();
    assert_eq!(shape.stroke_style, StrokeStyle::Solid);
}

#[test]
fn pencil_round_trips_points() {
    let shape = base(ShapeKind::Pencil {
        points: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
    });
    let json = serde_json::to_string(&shape).unwrap();
    let back: Shape = serde_json::from_str(&json).unwrap();
    let ShapeKind::Pencil { points } = back.kind else {
        panic!("expected pencil");
    };
    assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
}

#[test]
fn group_round_trips_children() {
    let child = rect(5.0, 5.0, 10.0, 10.0);
    let child_id = child.id;
    let group = base(ShapeKind::Group {
        width: 10.0,
        height: 10.0,
        children: vec![child],
    });
    let json = serde_json::to_string(&group).unwrap();
    let back: Shape = serde_json::from_str(&json).unwrap();
    let ShapeKind::Group { children, .. } = back.kind else {
        panic!("expected group");
    };
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, child_id);
}

// --- Bounds ---

#[test]
fn bounds_from_corners_normalizes() {
    let b = Bounds::from_corners(Point::new(10.0, -5.0), Point::new(-3.0, 7.0));
    assert_eq!(b.min_x, -3.0);
    assert_eq!(b.min_y, -5.0);
    assert_eq!(b.max_x, 10.0);
    assert_eq!(b.max_y, 7.0);
}

#[test]
fn rect_bounds_normalize_negative_size() {
    let shape = rect(100.0, 100.0, -50.0, -30.0);
    let b = shape.bounds();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (50.0, 70.0, 100.0, 100.0));
}

#[test]
fn circle_bounds_are_center_plus_minus_radius() {
    let mut shape = base(ShapeKind::Circle { radius: 25.0 });
    shape.x = 100.0;
    shape.y = 50.0;
    let b = shape.bounds();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (75.0, 25.0, 125.0, 75.0));
}

#[test]
fn line_bounds_span_endpoints() {
    let mut shape = base(ShapeKind::Line { end_x: -10.0, end_y: 30.0 });
    shape.x = 20.0;
    shape.y = 5.0;
    let b = shape.bounds();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-10.0, 5.0, 20.0, 30.0));
}

#[test]
fn pencil_bounds_cover_anchor_and_samples() {
    let mut shape = base(ShapeKind::Pencil {
        points: vec![Point::new(10.0, 10.0), Point::new(-5.0, 40.0)],
    });
    shape.x = 10.0;
    shape.y = 10.0;
    let b = shape.bounds();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-5.0, 10.0, 10.0, 40.0));
}

#[test]
fn bounds_contains_edges_inclusive() {
    let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert!(b.contains(Point::new(0.0, 0.0)));
    assert!(b.contains(Point::new(10.0, 10.0)));
    assert!(b.contains(Point::new(5.0, 5.0)));
    assert!(!b.contains(Point::new(10.1, 5.0)));
}

#[test]
fn bounds_intersects_touching_counts() {
    let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Bounds::new(10.0, 10.0, 20.0, 20.0)));
    assert!(a.intersects(&Bounds::new(5.0, 5.0, 6.0, 6.0)));
    assert!(!a.intersects(&Bounds::new(11.0, 0.0, 20.0, 10.0)));
}

#[test]
fn bounds_union_covers_both() {
    let u = Bounds::new(0.0, 0.0, 10.0, 10.0).union(&Bounds::new(20.0, -5.0, 30.0, 5.0));
    assert_eq!((u.min_x, u.min_y, u.max_x, u.max_y), (0.0, -5.0, 30.0, 10.0));
}

#[test]
fn bounds_expand_pads_all_sides() {
    let e = Bounds::new(0.0, 0.0, 10.0, 10.0).expand(8.0);
    assert_eq!((e.min_x, e.min_y, e.max_x, e.max_y), (-8.0, -8.0, 18.0, 18.0));
}

// --- Translate ---

#[test]
fn translate_moves_line_endpoints() {
    let mut shape = base(ShapeKind::Line { end_x: 10.0, end_y: 10.0 });
    shape.translate(5.0, -5.0);
    assert_eq!(shape.x, 5.0);
    assert_eq!(shape.y, -5.0);
    let ShapeKind::Line { end_x, end_y } = shape.kind else {
        panic!("expected line");
    };
    assert_eq!((end_x, end_y), (15.0, 5.0));
}

#[test]
fn translate_moves_pencil_samples() {
    let mut shape = base(ShapeKind::Pencil {
        points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
    });
    shape.translate(10.0, 20.0);
    let ShapeKind::Pencil { points } = shape.kind else {
        panic!("expected pencil");
    };
    assert_eq!(points, vec![Point::new(10.0, 20.0), Point::new(11.0, 21.0)]);
}

#[test]
fn translate_recurses_into_group_children() {
    let inner = rect(1.0, 1.0, 2.0, 2.0);
    let mut group = base(ShapeKind::Group {
        width: 2.0,
        height: 2.0,
        children: vec![inner],
    });
    group.x = 1.0;
    group.y = 1.0;
    group.translate(9.0, 9.0);
    assert_eq!(group.x, 10.0);
    let ShapeKind::Group { children, .. } = group.kind else {
        panic!("expected group");
    };
    assert_eq!(children[0].x, 10.0);
    assert_eq!(children[0].y, 10.0);
}

// --- Pencil id collection ---

#[test]
fn collect_pencil_ids_finds_nested_strokes() {
    let pencil = base(ShapeKind::Pencil { points: vec![Point::new(0.0, 0.0)] });
    let pencil_id = pencil.id;
    let inner_group = base(ShapeKind::Group {
        width: 1.0,
        height: 1.0,
        children: vec![pencil],
    });
    let outer = base(ShapeKind::Group {
        width: 1.0,
        height: 1.0,
        children: vec![inner_group, rect(0.0, 0.0, 1.0, 1.0)],
    });
    let mut ids = Vec::new();
    outer.collect_pencil_ids(&mut ids);
    assert_eq!(ids, vec![pencil_id]);
}

#[test]
fn is_group_only_for_groups() {
    assert!(base(ShapeKind::Group { width: 1.0, height: 1.0, children: vec![] }).is_group());
    assert!(!rect(0.0, 0.0, 1.0, 1.0).is_group());
}

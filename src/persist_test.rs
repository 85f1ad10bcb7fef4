#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::camera::Point;
use crate::shape::{ShapeKind, StrokeStyle, new_id};

fn base(kind: ShapeKind) -> Shape {
    Shape {
        id: new_id(),
        x: 1.0,
        y: 2.0,
        stroke_color: "#336699".to_owned(),
        stroke_width: 3.0,
        stroke_style: StrokeStyle::Dotted,
        kind,
    }
}

#[test]
fn to_json_is_a_bare_array() {
    let json = to_json(&[base(ShapeKind::Rect { width: 5.0, height: 6.0 })]).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(v.is_array());
    assert_eq!(v[0]["type"], "rect");
}

#[test]
fn from_json_accepts_bare_and_wrapped_forms() {
    let shapes = vec![base(ShapeKind::Circle { radius: 9.0 })];
    let id = shapes[0].id;
    let bare = to_json(&shapes).unwrap();
    let wrapped = format!(r#"{{"shapes":{bare}}}"#);

    let from_bare = from_json(&bare).unwrap();
    let from_wrapped = from_json(&wrapped).unwrap();
    assert_eq!(from_bare[0].id, id);
    assert_eq!(from_wrapped[0].id, id);
}

#[test]
fn from_json_rejects_malformed_input() {
    assert!(matches!(from_json("not json"), Err(EngineError::Import(_))));
    assert!(matches!(from_json(r#"{"shapes": 42}"#), Err(EngineError::Import(_))));
    assert!(matches!(
        from_json(r#"[{"type":"hexagon","x":0,"y":0}]"#),
        Err(EngineError::Import(_))
    ));
}

#[test]
fn from_json_accepts_empty_documents() {
    assert!(from_json("[]").unwrap().is_empty());
    assert!(from_json(r#"{"shapes":[]}"#).unwrap().is_empty());
}

#[test]
fn legacy_documents_migrate_stroke_style() {
    let json = r##"[{
        "id": "00000000-0000-0000-0000-000000000002",
        "type": "line",
        "x": 0.0, "y": 0.0,
        "endX": 10.0, "endY": 10.0,
        "strokeColor": "#000000",
        "strokeWidth": 2.0
    }]"##;
    let shapes = from_json(json).unwrap();
    assert_eq!(shapes[0].stroke_style, StrokeStyle::Solid);
}

#[test]
fn every_variant_round_trips() {
    let shapes = vec![
        base(ShapeKind::Rect { width: 1.0, height: 2.0 }),
        base(ShapeKind::Diamond { width: 3.0, height: 4.0 }),
        base(ShapeKind::Circle { radius: 5.0 }),
        base(ShapeKind::Line { end_x: 6.0, end_y: 7.0 }),
        base(ShapeKind::Arrow { end_x: 8.0, end_y: 9.0 }),
        base(ShapeKind::Pencil {
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
        }),
        base(ShapeKind::Text {
            text: "note".to_owned(),
            font_size: 24.0,
            width: 57.6,
            height: 30.0,
        }),
        base(ShapeKind::Image {
            src: "data:image/png;base64,AA==".to_owned(),
            width: 240.0,
            height: 180.0,
        }),
        base(ShapeKind::Group {
            width: 10.0,
            height: 10.0,
            children: vec![base(ShapeKind::Rect { width: 10.0, height: 10.0 })],
        }),
    ];
    let ids: Vec<_> = shapes.iter().map(|s| s.id).collect();

    let back = from_json(&to_json(&shapes).unwrap()).unwrap();
    assert_eq!(back.len(), shapes.len());
    for (shape, id) in back.iter().zip(&ids) {
        assert_eq!(shape.id, *id);
        assert_eq!(shape.stroke_style, StrokeStyle::Dotted);
    }
    assert!(matches!(back[2].kind, ShapeKind::Circle { radius } if radius == 5.0));
    let ShapeKind::Group { children, .. } = &back[8].kind else {
        panic!("expected group");
    };
    assert_eq!(children.len(), 1);
}

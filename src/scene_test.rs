#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape {
        id: Uuid::new_v4(),
        x,
        y,
        stroke_color: "#000000".to_owned(),
        stroke_width: 2.0,
        stroke_style: crate::shape::StrokeStyle::Solid,
        kind: ShapeKind::Rect { width: w, height: h },
    }
}

fn order(scene: &Scene) -> Vec<ShapeId> {
    scene.shapes().iter().map(|s| s.id).collect()
}

// --- Basics ---

#[test]
fn push_and_lookup() {
    let mut scene = Scene::new();
    assert!(scene.is_empty());
    let shape = rect(0.0, 0.0, 10.0, 10.0);
    let id = shape.id;
    scene.push(shape);
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.get(&id).map(|s| s.id), Some(id));
    assert_eq!(scene.index_of(&id), Some(0));
}

#[test]
fn remove_returns_the_shape() {
    let mut scene = Scene::new();
    let shape = rect(0.0, 0.0, 10.0, 10.0);
    let id = shape.id;
    scene.push(shape);
    let removed = scene.remove(&id);
    assert_eq!(removed.map(|s| s.id), Some(id));
    assert!(scene.is_empty());
    assert!(scene.remove(&id).is_none());
}

#[test]
fn snapshot_is_independent_of_later_edits() {
    let mut scene = Scene::new();
    scene.push(rect(0.0, 0.0, 10.0, 10.0));
    let snap = scene.snapshot();
    scene.push(rect(1.0, 1.0, 2.0, 2.0));
    assert_eq!(snap.len(), 1);
    scene.restore(snap);
    assert_eq!(scene.len(), 1);
}

#[test]
fn scene_bounds_union_all_shapes() {
    let mut scene = Scene::new();
    assert!(scene.bounds().is_none());
    scene.push(rect(0.0, 0.0, 10.0, 10.0));
    scene.push(rect(20.0, -5.0, 10.0, 10.0));
    let b = scene.bounds().unwrap();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (0.0, -5.0, 30.0, 10.0));
}

// --- Z-order ---

#[test]
fn bring_forward_swaps_one_slot() {
    let mut scene = Scene::new();
    let (a, b, c) = (rect(0.0, 0.0, 1.0, 1.0), rect(0.0, 0.0, 1.0, 1.0), rect(0.0, 0.0, 1.0, 1.0));
    let (ida, idb, idc) = (a.id, b.id, c.id);
    scene.push(a);
    scene.push(b);
    scene.push(c);
    scene.bring_forward(&[ida]);
    assert_eq!(order(&scene), vec![idb, ida, idc]);
}

#[test]
fn bring_forward_at_top_is_noop() {
    let mut scene = Scene::new();
    let (a, b) = (rect(0.0, 0.0, 1.0, 1.0), rect(0.0, 0.0, 1.0, 1.0));
    let (ida, idb) = (a.id, b.id);
    scene.push(a);
    scene.push(b);
    scene.bring_forward(&[idb]);
    assert_eq!(order(&scene), vec![ida, idb]);
}

#[test]
fn send_backward_swaps_one_slot() {
    let mut scene = Scene::new();
    let (a, b, c) = (rect(0.0, 0.0, 1.0, 1.0), rect(0.0, 0.0, 1.0, 1.0), rect(0.0, 0.0, 1.0, 1.0));
    let (ida, idb, idc) = (a.id, b.id, c.id);
    scene.push(a);
    scene.push(b);
    scene.push(c);
    scene.send_backward(&[idc]);
    assert_eq!(order(&scene), vec![ida, idc, idb]);
}

#[test]
fn bring_to_front_preserves_relative_order() {
    let mut scene = Scene::new();
    let shapes: Vec<Shape> = (0..4).map(|_| rect(0.0, 0.0, 1.0, 1.0)).collect();
    let ids: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
    for s in shapes {
        scene.push(s);
    }
    scene.bring_to_front(&[ids[0], ids[2]]);
    assert_eq!(order(&scene), vec![ids[1], ids[3], ids[0], ids[2]]);
}

#[test]
fn send_to_back_preserves_relative_order() {
    let mut scene = Scene::new();
    let shapes: Vec<Shape> = (0..4).map(|_| rect(0.0, 0.0, 1.0, 1.0)).collect();
    let ids: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
    for s in shapes {
        scene.push(s);
    }
    scene.send_to_back(&[ids[1], ids[3]]);
    assert_eq!(order(&scene), vec![ids[1], ids[3], ids[0], ids[2]]);
}

#[test]
fn adjacent_selection_brings_forward_without_collision() {
    let mut scene = Scene::new();
    let shapes: Vec<Shape> = (0..3).map(|_| rect(0.0, 0.0, 1.0, 1.0)).collect();
    let ids: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
    for s in shapes {
        scene.push(s);
    }
    scene.bring_forward(&[ids[0], ids[1]]);
    assert_eq!(order(&scene), vec![ids[2], ids[0], ids[1]]);
}

#[test]
fn fully_selected_stack_keeps_order_on_bring_forward() {
    let mut scene = Scene::new();
    let (a, b) = (rect(0.0, 0.0, 1.0, 1.0), rect(0.0, 0.0, 1.0, 1.0));
    let (ida, idb) = (a.id, b.id);
    scene.push(a);
    scene.push(b);
    scene.bring_forward(&[ida, idb]);
    assert_eq!(order(&scene), vec![ida, idb]);
}

#[test]
fn selection_blocked_at_top_keeps_order_on_bring_forward() {
    let mut scene = Scene::new();
    let shapes: Vec<Shape> = (0..3).map(|_| rect(0.0, 0.0, 1.0, 1.0)).collect();
    let ids: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
    for s in shapes {
        scene.push(s);
    }
    scene.bring_forward(&[ids[1], ids[2]]);
    assert_eq!(order(&scene), vec![ids[0], ids[1], ids[2]]);
}

#[test]
fn selection_blocked_at_bottom_keeps_order_on_send_backward() {
    let mut scene = Scene::new();
    let shapes: Vec<Shape> = (0..3).map(|_| rect(0.0, 0.0, 1.0, 1.0)).collect();
    let ids: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
    for s in shapes {
        scene.push(s);
    }
    scene.send_backward(&[ids[0], ids[1]]);
    assert_eq!(order(&scene), vec![ids[0], ids[1], ids[2]]);
}

#[test]
fn adjacent_selection_sends_backward_without_collision() {
    let mut scene = Scene::new();
    let shapes: Vec<Shape> = (0..3).map(|_| rect(0.0, 0.0, 1.0, 1.0)).collect();
    let ids: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
    for s in shapes {
        scene.push(s);
    }
    scene.send_backward(&[ids[1], ids[2]]);
    assert_eq!(order(&scene), vec![ids[1], ids[2], ids[0]]);
}

// --- Grouping ---

#[test]
fn group_unions_bounds_and_appends_on_top() {
    let mut scene = Scene::new();
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 20.0, 10.0, 10.0);
    let (ida, idb) = (a.id, b.id);
    scene.push(a);
    scene.push(b);
    let gid = scene.group(&[ida, idb]).unwrap();
    assert_eq!(scene.len(), 1);
    let group = scene.get(&gid).unwrap();
    assert_eq!((group.x, group.y), (0.0, 0.0));
    let ShapeKind::Group { width, height, children } = &group.kind else {
        panic!("expected group");
    };
    assert_eq!((*width, *height), (30.0, 30.0));
    assert_eq!(children.len(), 2);
}

#[test]
fn group_requires_two_present_shapes() {
    let mut scene = Scene::new();
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let ida = a.id;
    scene.push(a);
    assert!(scene.group(&[ida]).is_none());
    assert!(scene.group(&[ida, Uuid::new_v4()]).is_none());
    // Failed grouping must not disturb the scene.
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.index_of(&ida), Some(0));
}

#[test]
fn ungroup_splices_children_at_group_position() {
    let mut scene = Scene::new();
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(10.0, 0.0, 1.0, 1.0);
    let c = rect(20.0, 0.0, 1.0, 1.0);
    let d = rect(30.0, 0.0, 1.0, 1.0);
    let (ida, idb, idc, idd) = (a.id, b.id, c.id, d.id);
    scene.push(a);
    scene.push(b);
    scene.push(c);
    let gid = scene.group(&[idb, idc]).unwrap();
    scene.push(d);
    // Scene is now [a, group, d].
    assert_eq!(scene.index_of(&gid), Some(1));
    let children = scene.ungroup(&gid).unwrap();
    assert_eq!(children, vec![idb, idc]);
    assert_eq!(order(&scene), vec![ida, idb, idc, idd]);
}

#[test]
fn group_then_ungroup_restores_positions_exactly() {
    let mut scene = Scene::new();
    let a = rect(3.0, 7.0, 10.0, 10.0);
    let b = rect(25.0, -4.0, 6.0, 9.0);
    let (ida, idb) = (a.id, b.id);
    scene.push(a);
    scene.push(b);
    let gid = scene.group(&[ida, idb]).unwrap();
    scene.ungroup(&gid).unwrap();
    let a = scene.get(&ida).unwrap();
    let b = scene.get(&idb).unwrap();
    assert_eq!((a.x, a.y), (3.0, 7.0));
    assert_eq!((b.x, b.y), (25.0, -4.0));
}

#[test]
fn ungroup_corrects_box_drift() {
    let mut scene = Scene::new();
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 0.0, 10.0, 10.0);
    let (ida, idb) = (a.id, b.id);
    scene.push(a);
    scene.push(b);
    let gid = scene.group(&[ida, idb]).unwrap();
    // Drift the stored box away from the children's true union.
    if let Some(group) = scene.get_mut(&gid) {
        group.x += 5.0;
        group.y += 3.0;
    }
    scene.ungroup(&gid).unwrap();
    let a = scene.get(&ida).unwrap();
    assert_eq!((a.x, a.y), (5.0, 3.0));
    let b = scene.get(&idb).unwrap();
    assert_eq!((b.x, b.y), (25.0, 3.0));
}

#[test]
fn ungroup_rejects_non_groups() {
    let mut scene = Scene::new();
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let ida = a.id;
    scene.push(a);
    assert!(scene.ungroup(&ida).is_none());
    assert!(scene.ungroup(&Uuid::new_v4()).is_none());
    assert_eq!(scene.len(), 1);
}

#[test]
fn group_takes_style_from_first_child() {
    let mut scene = Scene::new();
    let mut a = rect(0.0, 0.0, 10.0, 10.0);
    a.stroke_color = "#123456".to_owned();
    let b = rect(20.0, 0.0, 10.0, 10.0);
    let (ida, idb) = (a.id, b.id);
    scene.push(a);
    scene.push(b);
    let gid = scene.group(&[ida, idb]).unwrap();
    assert_eq!(scene.get(&gid).unwrap().stroke_color, "#123456");
}

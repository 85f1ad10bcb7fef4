//! Scene: the ordered top-level shape list, z-order operations, and
//! group/ungroup.
//!
//! Array position is paint order; index 0 is the bottom of the stack. All
//! multi-shape reorderings are written to preserve the relative order of the
//! shapes being moved, so repeated layer commands on a multi-selection never
//! invert the selection against itself.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use uuid::Uuid;

use crate::shape::{Bounds, Shape, ShapeId, ShapeKind};

/// The ordered top-level shape list.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level shapes in paint order (bottom first).
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of top-level shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the scene contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Look up a top-level shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == *id)
    }

    /// Mutable lookup of a top-level shape by id.
    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == *id)
    }

    /// Paint-order index of a top-level shape.
    #[must_use]
    pub fn index_of(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == *id)
    }

    /// Append a shape on top of the stack.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove a top-level shape by id, returning it if present.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let idx = self.index_of(id)?;
        Some(self.shapes.remove(idx))
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// A full value copy of the shape list, for history snapshots.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    /// Replace the whole shape list (undo/redo/import/load).
    pub fn restore(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Union bounding box of every top-level shape, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut iter = self.shapes.iter().map(Shape::bounds);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(&b)))
    }

    // ── Z-order ─────────────────────────────────────────────────

    /// Swap each selected shape with its neighbor above. Processed top-down
    /// so adjacent selected shapes all move one slot without colliding. A
    /// selected shape at the top, or pressed against one that stayed put,
    /// stays in place so the selection's relative order never inverts.
    pub fn bring_forward(&mut self, ids: &[ShapeId]) {
        let mut indices = self.selected_indices(ids);
        indices.sort_unstable();
        // Index of the lowest blocked selected shape so far.
        let mut ceiling = self.shapes.len();
        for &idx in indices.iter().rev() {
            if idx + 1 < ceiling {
                self.shapes.swap(idx, idx + 1);
            } else {
                ceiling = idx;
            }
        }
    }

    /// Swap each selected shape with its neighbor below. Processed bottom-up,
    /// with the same blocking rule as [`Scene::bring_forward`] at the bottom
    /// of the stack.
    pub fn send_backward(&mut self, ids: &[ShapeId]) {
        let mut indices = self.selected_indices(ids);
        indices.sort_unstable();
        // One past the highest blocked selected shape so far.
        let mut floor = 0;
        for &idx in &indices {
            if idx > floor {
                self.shapes.swap(idx, idx - 1);
            } else {
                floor = idx + 1;
            }
        }
    }

    /// Move the selection to the top of the stack, preserving its relative
    /// order.
    pub fn bring_to_front(&mut self, ids: &[ShapeId]) {
        let picked = self.extract(ids);
        self.shapes.extend(picked);
    }

    /// Move the selection to the bottom of the stack, preserving its
    /// relative order.
    pub fn send_to_back(&mut self, ids: &[ShapeId]) {
        let mut picked = self.extract(ids);
        picked.append(&mut self.shapes);
        self.shapes = picked;
    }

    fn selected_indices(&self, ids: &[ShapeId]) -> Vec<usize> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| ids.contains(&s.id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Remove the identified shapes in paint order and return them.
    fn extract(&mut self, ids: &[ShapeId]) -> Vec<Shape> {
        let (picked, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.shapes)
            .into_iter()
            .partition(|s| ids.contains(&s.id));
        self.shapes = rest;
        picked
    }

    // ── Grouping ────────────────────────────────────────────────

    /// Fold the identified top-level shapes (two or more) into a new group
    /// appended on top of the stack. Children keep their paint order; the
    /// group's box is their union bounding box. Returns the group id, or
    /// `None` when fewer than two of the ids are present.
    pub fn group(&mut self, ids: &[ShapeId]) -> Option<ShapeId> {
        let present = self.shapes.iter().filter(|s| ids.contains(&s.id)).count();
        if present < 2 {
            return None;
        }
        let children = self.extract(ids);

        let mut bounds = children[0].bounds();
        for child in &children[1..] {
            bounds = bounds.union(&child.bounds());
        }

        let group = Shape {
            id: Uuid::new_v4(),
            x: bounds.min_x,
            y: bounds.min_y,
            stroke_color: children[0].stroke_color.clone(),
            stroke_width: children[0].stroke_width,
            stroke_style: children[0].stroke_style,
            kind: ShapeKind::Group {
                width: bounds.width(),
                height: bounds.height(),
                children,
            },
        };
        let gid = group.id;
        self.shapes.push(group);
        Some(gid)
    }

    /// Dissolve a group back into independent top-level shapes, spliced at
    /// the group's paint position. Returns the child ids, or `None` when the
    /// id is absent or not a group.
    ///
    /// The group's stored `x,y` may have drifted from its children's true
    /// union box (the box is rescaled, not recomputed, across edits), so the
    /// children are shifted by the drift before re-insertion. The correction
    /// is single-level: nested child groups are spliced out as-is.
    pub fn ungroup(&mut self, id: &ShapeId) -> Option<Vec<ShapeId>> {
        let idx = self.index_of(id)?;
        if !self.shapes[idx].is_group() {
            return None;
        }
        let group = self.shapes.remove(idx);
        let ShapeKind::Group { mut children, .. } = group.kind else {
            return None;
        };

        if let Some(first) = children.first() {
            let mut union = first.bounds();
            for child in &children[1..] {
                union = union.union(&child.bounds());
            }
            let dx = group.x - union.min_x;
            let dy = group.y - union.min_y;
            if dx != 0.0 || dy != 0.0 {
                for child in children.iter_mut() {
                    child.translate(dx, dy);
                }
            }
        }

        let ids = children.iter().map(|c| c.id).collect();
        self.shapes.splice(idx..idx, children);
        Some(ids)
    }
}

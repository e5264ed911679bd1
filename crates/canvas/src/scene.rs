use std::collections::HashMap;

use euclid::default::Point2D;
use serde::{Deserialize, Serialize};

use graphics::Surface;

use crate::shape::Shape;

/// The committed shapes of an annotation, with their layer ordering.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct Scene {
    nodes: HashMap<u32, Shape>,
    ordering: Vec<u32>,
    next_node_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new shape on top of the scene; returns its unique ID.
    pub fn add_node(&mut self, node: Shape) -> u32 {
        let id = self.next_node_id;
        self.nodes.insert(id, node);
        if !self.ordering.contains(&id) {
            self.ordering.push(id);
        } else {
            unreachable!("next_node_id was not incremented properly!");
        }
        self.next_node_id += 1;
        id
    }

    /// Remove a shape by its ID.
    pub fn remove_node(&mut self, id: u32) -> Option<Shape> {
        if let Some(position) = self.ordering.iter().position(|x| *x == id) {
            _ = self.ordering.remove(position);
        };
        self.nodes.remove(&id)
    }

    pub fn get_node(&self, id: u32) -> Option<&Shape> {
        self.nodes.get(&id)
    }
    pub fn get_node_mut(&mut self, id: u32) -> Option<&mut Shape> {
        self.nodes.get_mut(&id)
    }

    /// The top-most shape whose body contains `point`.
    pub fn get_node_id_at_position(&self, point: Point2D<f32>) -> Option<u32> {
        self.ordering
            .iter()
            .rev()
            .find(|id| {
                self.nodes
                    .get(id)
                    .is_some_and(|node| node.within_shape_bounds(point))
            })
            .copied()
    }

    /// Reorder a shape to a new z-index.
    pub fn node_to_layer(&mut self, id: u32, target_layer: usize) {
        if let Some(pos) = self.ordering.iter().position(|&x| x == id) {
            self.ordering.remove(pos);
            let new_layer = if target_layer >= self.ordering.len() {
                self.ordering.len()
            } else if target_layer > pos {
                target_layer - 1
            } else {
                target_layer
            };
            self.ordering.insert(new_layer, id);
        }
    }

    /// IDs in render (layer) order, bottom first.
    pub fn ordering(&self) -> &[u32] {
        &self.ordering
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes the most recently added shape that is still in the scene.
    pub fn undo(&mut self) -> Option<(u32, Shape)> {
        let id = self.nodes.keys().max().copied()?;
        self.remove_node(id).map(|node| (id, node))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ordering.clear();
    }

    /// Draws every shape, bottom layer first.
    pub fn draw(&self, surface: &mut impl Surface) {
        for id in &self.ordering {
            if let Some(node) = self.nodes.get(id) {
                node.draw_shape(surface);
            }
        }
    }
}

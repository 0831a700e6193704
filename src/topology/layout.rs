use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Topology, TopologyNode};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Caller-owned node positions layered over a generated topology.
///
/// Dragging a node only touches the overlay; the topology itself stays as
/// generated and is merged with the overlay when rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    positions: BTreeMap<String, Point>,
}

/// A node with its effective on-screen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedNode<'a> {
    pub node: &'a TopologyNode,
    pub position: Point,
}

impl Layout {
    /// Seed the overlay with the generated coordinates
    pub fn from_topology(topology: &Topology) -> Self {
        let positions = topology
            .nodes
            .iter()
            .map(|n| (n.id.clone(), Point { x: n.x, y: n.y }))
            .collect();
        Self { positions }
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Move a node to an absolute position
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> anyhow::Result<()> {
        match self.positions.get_mut(id) {
            Some(point) => {
                *point = Point { x, y };
                Ok(())
            }
            None => anyhow::bail!("node {} is not part of the layout", id),
        }
    }

    /// Shift a node by a drag offset
    pub fn translate(&mut self, id: &str, dx: f64, dy: f64) -> anyhow::Result<()> {
        let current = self
            .position(id)
            .ok_or_else(|| anyhow::anyhow!("node {} is not part of the layout", id))?;
        self.move_node(id, current.x + dx, current.y + dy)
    }

    /// Merge the overlay with a topology for rendering. Nodes missing from
    /// the overlay keep their generated coordinates.
    pub fn place<'a>(&self, topology: &'a Topology) -> Vec<PlacedNode<'a>> {
        topology
            .nodes
            .iter()
            .map(|node| PlacedNode {
                node,
                position: self.position(&node.id).unwrap_or(Point { x: node.x, y: node.y }),
            })
            .collect()
    }

    /// Endpoints of every link at their effective positions
    pub fn link_segments(&self, topology: &Topology) -> Vec<(Point, Point)> {
        let placed = self.place(topology);
        let lookup = |id: &str| placed.iter().find(|p| p.node.id == id).map(|p| p.position);
        topology
            .links
            .iter()
            .filter_map(|l| Some((lookup(&l.source_id)?, lookup(&l.target_id)?)))
            .collect()
    }
}

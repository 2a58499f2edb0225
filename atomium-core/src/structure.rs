/// Structure generator: node positions and strut connectivity for one unit.
///
/// A unit is a center node plus the eight corners of a cube with half side
/// `corner_offset`. Corner `c` has a negative x coordinate when bit 2 of `c`
/// is set, a negative y when bit 1 is set and a negative z when bit 0 is set,
/// so corner 0 is `(+,+,+)` and corner 7 is `(-,-,-)`. Node 0 is the center
/// and node `c + 1` is corner `c`.

use nalgebra::Point3;

use crate::error::{require_positive, Result};

/// Number of corner nodes in a unit.
pub const CORNER_COUNT: usize = 8;

/// Index of the center node.
pub const CENTER: usize = 0;

/// Cube edges as pairs of corner indices. Each pair differs in exactly one
/// sign bit.
pub const CUBE_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [0, 2],
    [0, 4],
    [1, 3],
    [1, 5],
    [2, 3],
    [2, 6],
    [3, 7],
    [4, 5],
    [4, 6],
    [5, 7],
    [6, 7],
];

/// A point where struts meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub position: Point3<f32>,
}

/// A straight member between two nodes, by node index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strut {
    pub a: usize,
    pub b: usize,
}

impl Strut {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Strut between two corners, translated to node indices.
    pub fn between_corners(corner_a: usize, corner_b: usize) -> Self {
        Self::new(corner_a + 1, corner_b + 1)
    }

    pub fn touches(&self, node: usize) -> bool {
        self.a == node || self.b == node
    }
}

/// Which struts to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrutPattern {
    /// The twelve cube edges; the center stays unconnected.
    #[default]
    CubeEdges,
    /// Cube edges plus a spoke from the center to every corner. The real
    /// landmark has no spokes, so this is off unless asked for.
    CubeEdgesWithSpokes,
}

/// Nodes and struts of one rigid unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub nodes: Vec<Node>,
    pub struts: Vec<Strut>,
    pub corner_offset: f32,
}

impl Structure {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn strut_count(&self) -> usize {
        self.struts.len()
    }

    /// Endpoint positions of a strut, or `None` if it names a missing node.
    pub fn endpoints(&self, strut: &Strut) -> Option<(Point3<f32>, Point3<f32>)> {
        Some((self.nodes.get(strut.a)?.position, self.nodes.get(strut.b)?.position))
    }

    /// Number of struts touching a node.
    pub fn degree(&self, node: usize) -> usize {
        self.struts.iter().filter(|s| s.touches(node)).count()
    }
}

/// Position of corner `index` for a cube of half side `offset`.
pub fn corner_position(index: usize, offset: f32) -> Point3<f32> {
    let sign = |bit: usize| if index & (1 << bit) == 0 { offset } else { -offset };
    Point3::new(sign(2), sign(1), sign(0))
}

/// Generate the canonical unit: 9 nodes, 12 cube-edge struts.
pub fn generate(corner_offset: f32) -> Result<Structure> {
    generate_with(corner_offset, StrutPattern::CubeEdges)
}

/// Generate a unit with an explicit strut pattern.
pub fn generate_with(corner_offset: f32, pattern: StrutPattern) -> Result<Structure> {
    let corner_offset = require_positive("corner_offset", corner_offset)?;

    let mut nodes = Vec::with_capacity(CORNER_COUNT + 1);
    nodes.push(Node {
        position: Point3::origin(),
    });
    nodes.extend((0..CORNER_COUNT).map(|c| Node {
        position: corner_position(c, corner_offset),
    }));

    let mut struts: Vec<Strut> = CUBE_EDGES
        .iter()
        .map(|&[a, b]| Strut::between_corners(a, b))
        .collect();

    if pattern == StrutPattern::CubeEdgesWithSpokes {
        struts.extend((0..CORNER_COUNT).map(|c| Strut::new(CENTER, c + 1)));
    }

    tracing::debug!(
        corner_offset,
        nodes = nodes.len(),
        struts = struts.len(),
        "generated unit structure"
    );

    Ok(Structure {
        nodes,
        struts,
        corner_offset,
    })
}

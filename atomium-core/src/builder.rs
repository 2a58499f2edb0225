/// Mesh builder: turns a [`Structure`] into renderable primitives.
///
/// Every node becomes a sphere and every strut an open-ended tube. All
/// primitives reference the same [`SharedAppearance`].

use nalgebra::Point3;

use crate::appearance::SharedAppearance;
use crate::error::{require_positive, AtomiumError, Result};
use crate::geometry::{segment_axis, Mesh, Tessellation};
use crate::structure::Structure;

/// A sphere centered on a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePrimitive {
    pub center: Point3<f32>,
    pub radius: f32,
}

/// A straight cylindrical segment along a strut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubePrimitive {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
    pub radius: f32,
}

impl TubePrimitive {
    pub fn length(&self) -> f32 {
        (self.end - self.start).norm()
    }
}

/// Geometry handed to the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(SpherePrimitive),
    Tube(TubePrimitive),
}

impl Primitive {
    /// Triangulate this primitive in unit-local space.
    pub fn tessellate(&self, detail: &Tessellation) -> Option<Mesh> {
        match self {
            Primitive::Sphere(s) => Some(Mesh::uv_sphere(
                s.center,
                s.radius,
                detail.sphere_width_segments,
                detail.sphere_height_segments,
            )),
            Primitive::Tube(t) => Mesh::tube(t.start, t.end, t.radius, detail.tube_radial_segments),
        }
    }
}

/// The primitives of one unit, bound to a single appearance.
#[derive(Debug, Clone)]
pub struct RenderableSet {
    pub primitives: Vec<Primitive>,
    pub appearance: SharedAppearance,
    /// Struts that were skipped: coincident endpoints or a missing node.
    pub skipped: Vec<AtomiumError>,
}

impl RenderableSet {
    pub fn spheres(&self) -> impl Iterator<Item = &SpherePrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Sphere(s) => Some(s),
            Primitive::Tube(_) => None,
        })
    }

    pub fn tubes(&self) -> impl Iterator<Item = &TubePrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Tube(t) => Some(t),
            Primitive::Sphere(_) => None,
        })
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres().count()
    }

    pub fn tube_count(&self) -> usize {
        self.tubes().count()
    }

    /// One combined triangle mesh for the whole unit.
    pub fn tessellate(&self, detail: &Tessellation) -> Mesh {
        let mut mesh = Mesh::new();
        for primitive in &self.primitives {
            if let Some(part) = primitive.tessellate(detail) {
                mesh.append(part);
            }
        }
        mesh
    }
}

/// Build spheres and tubes for a structure.
///
/// Degenerate struts and struts naming a node outside the structure are skipped and recorded in [`RenderableSet::skipped`];
/// invalid radii reject the whole call.
pub fn build(
    structure: &Structure,
    sphere_radius: f32,
    tube_radius: f32,
    appearance: SharedAppearance,
) -> Result<RenderableSet> {
    let sphere_radius = require_positive("sphere_radius", sphere_radius)?;
    let tube_radius = require_positive("tube_radius", tube_radius)?;

    let mut primitives = Vec::with_capacity(structure.node_count() + structure.strut_count());
    primitives.extend(structure.nodes.iter().map(|node| {
        Primitive::Sphere(SpherePrimitive {
            center: node.position,
            radius: sphere_radius,
        })
    }));

    let mut skipped = Vec::new();
    for (index, strut) in structure.struts.iter().enumerate() {
        let usable = structure
            .endpoints(strut)
            .filter(|&(start, end)| segment_axis(start, end).is_some());
        let Some((start, end)) = usable else {
            let err = AtomiumError::InvalidGeometry {
                strut: index,
                node_a: strut.a,
                node_b: strut.b,
            };
            tracing::warn!(%err, "skipping strut");
            skipped.push(err);
            continue;
        };
        primitives.push(Primitive::Tube(TubePrimitive {
            start,
            end,
            radius: tube_radius,
        }));
    }

    tracing::debug!(
        primitives = primitives.len(),
        skipped = skipped.len(),
        "built unit renderables"
    );

    Ok(RenderableSet {
        primitives,
        appearance,
        skipped,
    })
}

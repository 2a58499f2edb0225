/// Lattice tiler: replicates one unit across a cubic integer grid.
///
/// Each axis holds `grid_size + 1` consecutive integer indices starting at
/// `-(grid_size / 2)`. Even sizes are symmetric around the origin; odd sizes
/// reach one step further on the positive side. A placement's offset is its
/// index times the spacing.

use std::rc::Rc;

use nalgebra::{Matrix4, Vector3};

use crate::builder::RenderableSet;
use crate::error::{require_positive, AtomiumError, Result};
use crate::transform::{Pose, Transform};

/// Largest accepted grid size (65³ placements).
pub const MAX_GRID_SIZE: u32 = 64;

/// One placed copy of the unit. Holds only a transform and a reference.
#[derive(Debug, Clone)]
pub struct Placement {
    pub index: [i32; 3],
    pub offset: Vector3<f32>,
    pub unit: Rc<RenderableSet>,
}

impl Placement {
    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::translation_matrix(self.offset.x, self.offset.y, self.offset.z)
    }
}

/// A composite of placements that moves as one group.
#[derive(Debug, Clone)]
pub struct Lattice {
    unit: Rc<RenderableSet>,
    placements: Vec<Placement>,
    grid_size: u32,
    spacing: f32,
    /// Transform of the whole group, driven by the animation.
    pub pose: Pose,
}

/// Inclusive index range along one axis.
pub fn axis_range(grid_size: u32) -> std::ops::RangeInclusive<i32> {
    let low = -((grid_size / 2) as i32);
    low..=low + grid_size as i32
}

/// Replicate `unit` on a `(grid_size + 1)³` grid.
pub fn tile(unit: Rc<RenderableSet>, grid_size: u32, spacing: f32) -> Result<Lattice> {
    let spacing = require_positive("spacing", spacing)?;
    if grid_size > MAX_GRID_SIZE {
        return Err(AtomiumError::invalid("grid_size", grid_size));
    }

    let per_axis = grid_size as usize + 1;
    let mut placements = Vec::with_capacity(per_axis.pow(3));
    for i in axis_range(grid_size) {
        for j in axis_range(grid_size) {
            for k in axis_range(grid_size) {
                placements.push(Placement {
                    index: [i, j, k],
                    offset: Vector3::new(i as f32, j as f32, k as f32) * spacing,
                    unit: Rc::clone(&unit),
                });
            }
        }
    }

    tracing::debug!(grid_size, spacing, placements = placements.len(), "tiled lattice");

    Ok(Lattice {
        unit,
        placements,
        grid_size,
        spacing,
        pose: Pose::identity(),
    })
}

impl Lattice {
    /// A lattice with a single placement at the origin.
    pub fn single(unit: Rc<RenderableSet>) -> Self {
        Self {
            placements: vec![Placement {
                index: [0, 0, 0],
                offset: Vector3::zeros(),
                unit: Rc::clone(&unit),
            }],
            unit,
            grid_size: 0,
            spacing: 0.0,
            pose: Pose::identity(),
        }
    }

    pub fn unit(&self) -> &Rc<RenderableSet> {
        &self.unit
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Sphere primitives across every placement.
    pub fn node_count(&self) -> usize {
        self.placements.len() * self.unit.sphere_count()
    }

    pub fn placement(&self, index: [i32; 3]) -> Option<&Placement> {
        self.placements.iter().find(|p| p.index == index)
    }

    /// World matrix of a placement under the current group pose.
    pub fn world_matrix(&self, placement: &Placement) -> Matrix4<f32> {
        self.pose.matrix() * placement.matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::SharedAppearance;
    use crate::builder::build;
    use crate::structure::generate;
    use std::collections::HashSet;

    fn unit() -> Rc<RenderableSet> {
        let structure = generate(7.0).unwrap();
        Rc::new(build(&structure, 1.2, 0.2, SharedAppearance::default()).unwrap())
    }

    #[test]
    fn test_placement_counts() {
        for grid_size in 0..=6u32 {
            let lattice = tile(unit(), grid_size, 50.0).unwrap();
            let per_axis = grid_size as usize + 1;
            assert_eq!(lattice.len(), per_axis.pow(3));
            assert_eq!(lattice.node_count(), 9 * per_axis.pow(3));

            let unique: HashSet<[i32; 3]> = lattice.placements().iter().map(|p| p.index).collect();
            assert_eq!(unique.len(), lattice.len());
        }
    }

    #[test]
    fn test_default_grid_offsets() {
        let lattice = tile(unit(), 4, 50.0).unwrap();
        assert_eq!(lattice.len(), 125);
        assert_eq!(lattice.placement([0, 0, 0]).unwrap().offset, Vector3::zeros());
        assert_eq!(
            lattice.placement([2, 2, 2]).unwrap().offset,
            Vector3::new(100.0, 100.0, 100.0)
        );
        assert_eq!(
            lattice.placement([-2, -2, -2]).unwrap().offset,
            Vector3::new(-100.0, -100.0, -100.0)
        );
        assert!(lattice.placement([3, 0, 0]).is_none());
    }

    #[test]
    fn test_odd_grid_convention() {
        assert_eq!(axis_range(3), -1..=2);
        assert_eq!(axis_range(1), 0..=1);
        assert_eq!(axis_range(0), 0..=0);
        assert_eq!(axis_range(4), -2..=2);
    }

    #[test]
    fn test_placements_share_geometry() {
        let unit = unit();
        let lattice = tile(Rc::clone(&unit), 2, 10.0).unwrap();
        for placement in lattice.placements() {
            assert!(Rc::ptr_eq(&placement.unit, &unit));
            assert!(placement.unit.appearance.ptr_eq(&unit.appearance));
        }
        // the caller, the lattice and 27 placements
        assert_eq!(Rc::strong_count(&unit), 29);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(tile(unit(), 4, 0.0).is_err());
        assert!(tile(unit(), 4, f32::NAN).is_err());
        assert!(tile(unit(), MAX_GRID_SIZE + 1, 50.0).is_err());
    }

    #[test]
    fn test_world_matrix_follows_pose() {
        let mut lattice = tile(unit(), 2, 50.0).unwrap();
        lattice.pose.position.z = 5.0;
        let placement = lattice.placement([1, 0, 0]).unwrap();
        let origin = lattice
            .world_matrix(placement)
            .transform_point(&nalgebra::Point3::origin());
        assert!((origin - nalgebra::Point3::new(50.0, 0.0, 5.0)).norm() < 1e-5);
    }
}

use std::cmp::Ordering;

use crate::orientation::{self, Fit};
use crate::types::{CargoUnit, Dimensions, EPSILON, FreeCuboid};

/// Free cuboids of the container currently being loaded.
#[derive(Debug, Clone)]
pub struct FreeSpace {
    cuboids: Vec<FreeCuboid>,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredPlacement {
    pub free_idx: usize,
    pub fit: Fit,
}

impl FreeSpace {
    pub fn new(container: Dimensions) -> Self {
        let mut space = Self {
            cuboids: Vec::new(),
        };
        space.initialize(container);
        space
    }

    /// Resets to a single cuboid spanning the container, or to nothing when
    /// the container has a non-positive dimension.
    pub fn initialize(&mut self, container: Dimensions) {
        self.cuboids.clear();
        if container.is_valid() {
            self.cuboids.push(FreeCuboid::new([0.0; 3], container));
        }
    }

    pub fn cuboids(&self) -> &[FreeCuboid] {
        &self.cuboids
    }

    pub fn into_cuboids(self) -> Vec<FreeCuboid> {
        self.cuboids
    }

    pub fn free_volume(&self) -> f64 {
        self.cuboids.iter().map(FreeCuboid::volume).sum()
    }

    /// Best-fit search over every cuboid and allowed orientation.
    ///
    /// Candidates are ranked by leftover volume, then by the cuboid origin
    /// (lowest z, then y, then x), then by the tightest side. Remaining ties
    /// keep the first candidate found.
    pub fn find_best(&self, unit: &CargoUnit) -> Option<ScoredPlacement> {
        let mut best: Option<ScoredPlacement> = None;

        for (idx, free) in self.cuboids.iter().enumerate() {
            for fit in orientation::fits(unit, free) {
                let candidate = ScoredPlacement { free_idx: idx, fit };
                let better = match &best {
                    None => true,
                    Some(current) => self.rank(&candidate, current) == Ordering::Less,
                };
                if better {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    fn rank(&self, a: &ScoredPlacement, b: &ScoredPlacement) -> Ordering {
        let fa = &self.cuboids[a.free_idx];
        let fb = &self.cuboids[b.free_idx];
        a.fit
            .leftover
            .total_cmp(&b.fit.leftover)
            .then_with(|| fa.z.total_cmp(&fb.z))
            .then_with(|| fa.y.total_cmp(&fb.y))
            .then_with(|| fa.x.total_cmp(&fb.x))
            .then_with(|| a.fit.short_margin.total_cmp(&b.fit.short_margin))
    }

    /// Occupies the corner of cuboid `free_idx` with a box of `placed` extents
    /// and returns the consumed cuboid; its origin is where the box sits.
    pub fn consume(&mut self, free_idx: usize, placed: Dimensions) -> FreeCuboid {
        let free = self.cuboids.swap_remove(free_idx);
        self.split(free, placed);
        self.merge_cuboids();
        free
    }

    /// Guillotine split of `free` minus the box at its origin.
    ///
    /// Axes are ordered by remaining margin, smallest first (ties x, y, z).
    /// The slab past the box on the widest-margin axis keeps the full cross
    /// section, the middle-axis slab is cut to the box on the widest axis,
    /// and the narrowest-margin slab is cut to the box on both other axes.
    fn split(&mut self, free: FreeCuboid, placed: Dimensions) {
        let origin = free.origin();
        let extent = free.size.to_array();
        let used = placed.to_array();
        let margin = [
            extent[0] - used[0],
            extent[1] - used[1],
            extent[2] - used[2],
        ];

        let mut axes = [0, 1, 2];
        axes.sort_by(|&a, &b| margin[a].total_cmp(&margin[b]));
        let [narrow, middle, wide] = axes;

        let cuts: [(usize, &[usize]); 3] =
            [(wide, &[]), (middle, &[wide]), (narrow, &[middle, wide])];
        for (axis, bounded) in cuts {
            let mut at = origin;
            let mut size = extent;
            at[axis] = origin[axis] + used[axis];
            // Measured back from the far wall so the slab never reaches past it
            size[axis] = (origin[axis] + extent[axis]) - at[axis];
            if size[axis] <= EPSILON {
                continue;
            }
            for &b in bounded {
                size[b] = used[b];
            }
            self.cuboids.push(FreeCuboid::new(at, Dimensions::from_array(size)));
        }
    }

    fn merge_cuboids(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'outer: for i in 0..self.cuboids.len() {
                for j in (i + 1)..self.cuboids.len() {
                    if let Some(m) = Self::try_merge(self.cuboids[i], self.cuboids[j]) {
                        self.cuboids[i] = m;
                        self.cuboids.swap_remove(j);
                        merged = true;
                        break 'outer;
                    }
                }
            }
        }
    }

    /// Joins two cuboids that touch face to face along one axis and share
    /// origin and extent on the other two.
    fn try_merge(a: FreeCuboid, b: FreeCuboid) -> Option<FreeCuboid> {
        let (ao, ae) = (a.origin(), a.size.to_array());
        let (bo, be) = (b.origin(), b.size.to_array());

        for axis in 0..3 {
            let aligned = (0..3)
                .filter(|&other| other != axis)
                .all(|other| close(ao[other], bo[other]) && close(ae[other], be[other]));
            if !aligned {
                continue;
            }
            let (first, second) = if close(ao[axis] + ae[axis], bo[axis]) {
                (a, b)
            } else if close(bo[axis] + be[axis], ao[axis]) {
                (b, a)
            } else {
                continue;
            };
            let (fo, so, se) = (first.origin(), second.origin(), second.size.to_array());
            let mut at = [0.0; 3];
            let mut size = [0.0; 3];
            for other in 0..3 {
                // Only the overlap of the two faces is known to be free
                at[other] = ao[other].max(bo[other]);
                size[other] = (ao[other] + ae[other]).min(bo[other] + be[other]) - at[other];
            }
            at[axis] = fo[axis];
            size[axis] = (so[axis] + se[axis]) - fo[axis];
            return Some(FreeCuboid::new(at, Dimensions::from_array(size)));
        }
        None
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(dims: Dimensions, allow_rotation: bool) -> CargoUnit {
        CargoUnit {
            cargo_id: "1".to_string(),
            name: "box".to_string(),
            color: String::new(),
            dims,
            weight: 1.0,
            allow_rotation,
            spec_index: 0,
        }
    }

    fn overlap(a: &FreeCuboid, b: &FreeCuboid) -> bool {
        let (ao, ae) = (a.origin(), a.size.to_array());
        let (bo, be) = (b.origin(), b.size.to_array());
        (0..3).all(|i| ao[i] < bo[i] + be[i] - EPSILON && bo[i] < ao[i] + ae[i] - EPSILON)
    }

    #[test]
    fn test_place_single_unit() {
        let mut space = FreeSpace::new(Dimensions::new(100.0, 100.0, 100.0));
        let crate_unit = unit(Dimensions::new(50.0, 30.0, 20.0), false);
        let scored = space.find_best(&crate_unit).unwrap();
        let at = space.consume(scored.free_idx, scored.fit.dims);
        assert_eq!(at.origin(), [0.0, 0.0, 0.0]);
        assert_eq!(scored.fit.dims, Dimensions::new(50.0, 30.0, 20.0));
        assert_eq!(space.cuboids().len(), 3);
    }

    #[test]
    fn test_split_preserves_volume() {
        let mut space = FreeSpace::new(Dimensions::new(120.0, 100.0, 160.0));
        let placed = Dimensions::new(45.0, 35.0, 35.0);
        space.consume(0, placed);
        let expected = 120.0 * 100.0 * 160.0 - placed.volume();
        assert!((space.free_volume() - expected).abs() < 1e-6);
        for (i, a) in space.cuboids().iter().enumerate() {
            for b in &space.cuboids()[i + 1..] {
                assert!(!overlap(a, b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_widest_margin_keeps_full_slab() {
        // Margins: x = 10, y = 40, z = 90, so the z slab spans the whole floor
        let mut space = FreeSpace::new(Dimensions::new(100.0, 100.0, 100.0));
        space.consume(0, Dimensions::new(90.0, 60.0, 10.0));
        let top = space
            .cuboids()
            .iter()
            .find(|c| c.z > 0.0)
            .unwrap();
        assert_eq!(top.size, Dimensions::new(100.0, 100.0, 90.0));
        let side = space.cuboids().iter().find(|c| c.y > 0.0).unwrap();
        assert_eq!(side.size, Dimensions::new(100.0, 40.0, 10.0));
        let end = space.cuboids().iter().find(|c| c.x > 0.0).unwrap();
        assert_eq!(end.size, Dimensions::new(10.0, 60.0, 10.0));
    }

    #[test]
    fn test_unit_too_large() {
        let space = FreeSpace::new(Dimensions::new(100.0, 100.0, 100.0));
        let long = unit(Dimensions::new(200.0, 50.0, 50.0), true);
        assert!(space.find_best(&long).is_none());
    }

    #[test]
    fn test_degenerate_container_has_no_space() {
        let space = FreeSpace::new(Dimensions::new(100.0, 0.0, 100.0));
        assert!(space.cuboids().is_empty());
        assert!(space.find_best(&unit(Dimensions::new(1.0, 1.0, 1.0), true)).is_none());
    }

    #[test]
    fn test_fill_exact() {
        let mut space = FreeSpace::new(Dimensions::new(100.0, 100.0, 100.0));
        let cube = unit(Dimensions::new(100.0, 100.0, 100.0), false);
        let scored = space.find_best(&cube).unwrap();
        space.consume(scored.free_idx, scored.fit.dims);
        assert!(space.cuboids().is_empty());
    }

    #[test]
    fn test_prefers_tightest_cuboid() {
        let mut space = FreeSpace::new(Dimensions::new(100.0, 100.0, 100.0));
        space.consume(0, Dimensions::new(50.0, 50.0, 50.0));
        let cube = unit(Dimensions::new(50.0, 50.0, 50.0), false);
        let scored = space.find_best(&cube).unwrap();
        let chosen = space.cuboids()[scored.free_idx];
        assert_eq!(scored.fit.leftover, 0.0);
        assert_eq!(chosen.origin(), [50.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ties_go_to_lowest_origin() {
        // Two identical free slots: one on the floor, one stacked above
        let mut space = FreeSpace::new(Dimensions::new(10.0, 10.0, 10.0));
        space.cuboids = vec![
            FreeCuboid::new([0.0, 0.0, 5.0], Dimensions::new(5.0, 5.0, 5.0)),
            FreeCuboid::new([5.0, 5.0, 0.0], Dimensions::new(5.0, 5.0, 5.0)),
        ];
        let scored = space
            .find_best(&unit(Dimensions::new(5.0, 5.0, 5.0), false))
            .unwrap();
        assert_eq!(space.cuboids()[scored.free_idx].z, 0.0);
    }

    #[test]
    fn test_merge_adjacent_cuboids() {
        let a = FreeCuboid::new([0.0, 0.0, 0.0], Dimensions::new(10.0, 20.0, 30.0));
        let b = FreeCuboid::new([0.0, 20.0, 0.0], Dimensions::new(10.0, 5.0, 30.0));
        let merged = FreeSpace::try_merge(b, a).unwrap();
        assert_eq!(merged.origin(), [0.0, 0.0, 0.0]);
        assert_eq!(merged.size, Dimensions::new(10.0, 25.0, 30.0));

        let offset = FreeCuboid::new([1.0, 20.0, 0.0], Dimensions::new(10.0, 5.0, 30.0));
        assert!(FreeSpace::try_merge(a, offset).is_none());
    }
}

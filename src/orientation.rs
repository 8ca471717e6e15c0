use crate::types::{CargoUnit, Dimensions, FreeCuboid};

/// Axis assignments tried for a rotatable unit; the identity comes first.
const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// A fitting orientation of a unit inside one free cuboid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub dims: Dimensions,
    pub rotated: bool,
    /// Free volume left in the cuboid after placing the unit.
    pub leftover: f64,
    /// Smallest per-axis gap between the unit and the cuboid walls.
    pub short_margin: f64,
}

pub fn orientations(dims: Dimensions, allow_rotation: bool) -> impl Iterator<Item = Dimensions> {
    let count = if allow_rotation { PERMUTATIONS.len() } else { 1 };
    PERMUTATIONS
        .into_iter()
        .take(count)
        .map(move |axes| dims.permuted(axes))
}

/// Every orientation of `unit` that fits inside `free`, scored best-fit.
pub fn fits<'a>(unit: &'a CargoUnit, free: &'a FreeCuboid) -> impl Iterator<Item = Fit> + 'a {
    // Scored against the declared volume so every orientation ties exactly
    let leftover = free.volume() - unit.dims.volume();
    orientations(unit.dims, unit.allow_rotation)
        .filter(move |dims| dims.fits_in(&free.size))
        .map(move |dims| Fit {
            dims,
            rotated: dims != unit.dims,
            leftover,
            short_margin: (free.size.length - dims.length)
                .min(free.size.width - dims.width)
                .min(free.size.height - dims.height),
        })
}

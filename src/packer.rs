use crate::free_space::FreeSpace;
use crate::types::{CargoUnit, ContainerSpec, FreeCuboid, PlacedUnit};

/// One container being filled: its free space, what sits in it and the load so far.
#[derive(Debug, Clone)]
pub struct ContainerLoad {
    number: usize,
    max_weight: f64,
    space: FreeSpace,
    pub placed: Vec<PlacedUnit>,
    pub total_weight: f64,
}

/// Outcome of a single pass over the remaining units.
#[derive(Debug, Clone)]
pub struct ContainerPass {
    pub placed: Vec<PlacedUnit>,
    pub free_spaces: Vec<FreeCuboid>,
    /// Units left for the next container, in their original relative order.
    pub remaining: Vec<CargoUnit>,
}

impl ContainerLoad {
    pub fn new(spec: &ContainerSpec, number: usize) -> Self {
        Self {
            number,
            max_weight: spec.max_weight,
            space: FreeSpace::new(spec.dims),
            placed: Vec::new(),
            total_weight: 0.0,
        }
    }

    /// Places `unit` at its best-fit position, or returns `false` when it
    /// would exceed the weight limit or fits no free cuboid.
    pub fn try_place(&mut self, unit: &CargoUnit) -> bool {
        if self.total_weight + unit.weight > self.max_weight {
            return false;
        }
        let Some(scored) = self.space.find_best(unit) else {
            return false;
        };

        let at = self.space.consume(scored.free_idx, scored.fit.dims);
        self.total_weight += unit.weight;
        self.placed.push(PlacedUnit {
            id: format!("{}-{}", self.number, self.placed.len() + 1),
            cargo_id: unit.cargo_id.clone(),
            name: unit.name.clone(),
            x: at.x,
            y: at.y,
            z: at.z,
            dims: scored.fit.dims,
            weight: unit.weight,
            color: unit.color.clone(),
            rotated: scored.fit.rotated,
        });
        true
    }

    pub fn into_parts(self) -> (Vec<PlacedUnit>, Vec<FreeCuboid>) {
        (self.placed, self.space.into_cuboids())
    }
}

/// Loads as many of `units` as possible into container `number`, in order.
pub fn pack_container(spec: &ContainerSpec, number: usize, units: Vec<CargoUnit>) -> ContainerPass {
    let mut load = ContainerLoad::new(spec, number);
    let mut remaining = Vec::new();

    for unit in units {
        if !load.try_place(&unit) {
            remaining.push(unit);
        }
    }

    let (placed, free_spaces) = load.into_parts();
    ContainerPass {
        placed,
        free_spaces,
        remaining,
    }
}

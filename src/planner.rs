use std::collections::HashMap;

use crate::expand::{self, Expansion};
use crate::metrics;
use crate::packer;
use crate::types::{BatchPlan, CargoSpec, CargoUnit, ContainerSpec, UnpackedCargo};

/// Opens identical containers one after another until the cargo is loaded
/// or no further container can take anything.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    container: &'a ContainerSpec,
    cargo: &'a [CargoSpec],
}

impl<'a> Planner<'a> {
    pub fn new(container: &'a ContainerSpec, cargo: &'a [CargoSpec]) -> Self {
        Self { container, cargo }
    }

    pub fn plan(&self) -> BatchPlan {
        let Expansion { units, rejected } = expand::expand(self.cargo);

        // One pass per unit is the most that can ever make progress
        let ceiling = units.len() + 1;
        let mut remaining = units;
        let mut containers = Vec::new();
        let mut passes = 0;

        while !remaining.is_empty() {
            if passes == ceiling {
                tracing::warn!(passes, remaining = remaining.len(), "pass ceiling reached");
                break;
            }
            passes += 1;

            let number = containers.len() + 1;
            let pass = packer::pack_container(self.container, number, remaining);
            remaining = pass.remaining;

            if pass.placed.is_empty() {
                tracing::debug!(
                    remaining = remaining.len(),
                    "no unit fits an empty container, stopping"
                );
                break;
            }

            tracing::debug!(
                container = number,
                placed = pass.placed.len(),
                remaining = remaining.len(),
                "container loaded"
            );
            containers.push(metrics::container_plan(
                self.container,
                number,
                pass.placed,
                pass.free_spaces,
            ));
        }

        let unpacked = self.collect_unpacked(&rejected, &remaining);
        let average_volume_utilization = metrics::average_volume_utilization(&containers);

        tracing::info!(
            containers = containers.len(),
            unpacked = unpacked.iter().map(|u| u.quantity).sum::<u64>(),
            average_volume_utilization,
            "load plan computed"
        );

        BatchPlan {
            total_containers: containers.len(),
            containers,
            unpacked,
            average_volume_utilization,
        }
    }

    /// Groups everything that was not loaded by cargo id, in input order.
    fn collect_unpacked(&self, rejected: &[usize], remaining: &[CargoUnit]) -> Vec<UnpackedCargo> {
        let mut per_spec = vec![0u64; self.cargo.len()];
        for &idx in rejected {
            per_spec[idx] = u64::try_from(self.cargo[idx].quantity).unwrap_or(0);
        }
        for unit in remaining {
            per_spec[unit.spec_index] += 1;
        }

        let mut unpacked: Vec<UnpackedCargo> = Vec::new();
        let mut by_id: HashMap<&str, usize> = HashMap::new();
        for (spec, count) in self.cargo.iter().zip(per_spec) {
            if count == 0 {
                continue;
            }
            match by_id.get(spec.id.as_str()) {
                Some(&i) => unpacked[i].quantity += count,
                None => {
                    by_id.insert(&spec.id, unpacked.len());
                    unpacked.push(UnpackedCargo {
                        cargo_id: spec.id.clone(),
                        name: spec.name.clone(),
                        quantity: count,
                    });
                }
            }
        }
        unpacked
    }
}

/// Computes a complete load plan for `cargo` in containers of type `container`.
pub fn plan(container: &ContainerSpec, cargo: &[CargoSpec]) -> BatchPlan {
    Planner::new(container, cargo).plan()
}

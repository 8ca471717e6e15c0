use crate::types::{ContainerPlan, ContainerSpec, FreeCuboid, PlacedUnit};

/// `100 * part / whole`, or 0 when `whole` is not positive.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    100.0 * part / whole
}

pub fn placed_volume(placed: &[PlacedUnit]) -> f64 {
    placed.iter().map(PlacedUnit::volume).sum()
}

pub fn placed_weight(placed: &[PlacedUnit]) -> f64 {
    placed.iter().map(|p| p.weight).sum()
}

pub fn volume_utilization(container: &ContainerSpec, placed: &[PlacedUnit]) -> f64 {
    let capacity = if container.dims.is_valid() {
        container.dims.volume()
    } else {
        0.0
    };
    percent(placed_volume(placed), capacity)
}

pub fn weight_utilization(container: &ContainerSpec, placed: &[PlacedUnit]) -> f64 {
    percent(placed_weight(placed), container.max_weight)
}

/// Mean volume utilization over opened containers; 0 when none were opened.
pub fn average_volume_utilization(containers: &[ContainerPlan]) -> f64 {
    if containers.is_empty() {
        return 0.0;
    }
    let total: f64 = containers.iter().map(|c| c.volume_utilization).sum();
    total / containers.len() as f64
}

pub fn container_plan(
    container: &ContainerSpec,
    container_id: usize,
    placed: Vec<PlacedUnit>,
    free_spaces: Vec<FreeCuboid>,
) -> ContainerPlan {
    ContainerPlan {
        container_id,
        container: container.clone(),
        volume_utilization: volume_utilization(container, &placed),
        weight_utilization: weight_utilization(container, &placed),
        total_weight: placed_weight(&placed),
        total_volume: placed_volume(&placed),
        placed,
        free_spaces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContainerKind, Dimensions};

    fn container(dims: Dimensions, max_weight: f64) -> ContainerSpec {
        ContainerSpec {
            name: "test".to_string(),
            dims,
            max_weight,
            kind: ContainerKind::Pallet,
        }
    }

    fn placed(dims: Dimensions, weight: f64) -> PlacedUnit {
        PlacedUnit {
            id: "1-1".to_string(),
            cargo_id: "1".to_string(),
            name: "box".to_string(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            dims,
            weight,
            color: String::new(),
            rotated: false,
        }
    }

    #[test]
    fn test_utilization() {
        let spec = container(Dimensions::new(100.0, 100.0, 100.0), 1000.0);
        let units = vec![placed(Dimensions::new(50.0, 100.0, 100.0), 250.0)];
        assert_eq!(volume_utilization(&spec, &units), 50.0);
        assert_eq!(weight_utilization(&spec, &units), 25.0);
    }

    #[test]
    fn test_zero_capacity_reports_zero() {
        let spec = container(Dimensions::new(100.0, 0.0, 100.0), 0.0);
        let units = vec![placed(Dimensions::new(10.0, 10.0, 10.0), 5.0)];
        assert_eq!(volume_utilization(&spec, &units), 0.0);
        assert_eq!(weight_utilization(&spec, &units), 0.0);
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average_volume_utilization(&[]), 0.0);
    }

    #[test]
    fn test_average_over_containers() {
        let spec = container(Dimensions::new(10.0, 10.0, 10.0), 100.0);
        let cube = placed(Dimensions::new(10.0, 10.0, 10.0), 1.0);
        let slab = placed(Dimensions::new(5.0, 10.0, 10.0), 1.0);
        let full = container_plan(&spec, 1, vec![cube], vec![]);
        let half = container_plan(&spec, 2, vec![slab], vec![]);
        assert_eq!(full.total_volume, 1000.0);
        assert_eq!(average_volume_utilization(&[full, half]), 75.0);
    }
}

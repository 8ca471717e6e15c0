use crate::types::{CargoSpec, CargoUnit};

/// Units ready for packing plus the specs that could never yield a unit.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub units: Vec<CargoUnit>,
    /// Indices of specs with a positive quantity but a non-positive weight or dimension.
    pub rejected: Vec<usize>,
}

/// Expands every spec into one unit per piece, largest volume first.
pub fn expand(cargo: &[CargoSpec]) -> Expansion {
    let mut expansion = Expansion::default();
    for (spec_index, spec) in cargo.iter().enumerate() {
        if spec.quantity <= 0 {
            continue;
        }
        if !spec.is_packable() {
            expansion.rejected.push(spec_index);
            continue;
        }
        for _ in 0..spec.quantity {
            expansion.units.push(CargoUnit {
                cargo_id: spec.id.clone(),
                name: spec.name.clone(),
                color: spec.color.clone(),
                dims: spec.dims,
                weight: spec.weight,
                allow_rotation: spec.allow_rotation,
                spec_index,
            });
        }
    }

    // Stable sort: equal volume and weight keep input order
    expansion.units.sort_by(|a, b| {
        b.dims
            .volume()
            .total_cmp(&a.dims.volume())
            .then_with(|| b.weight.total_cmp(&a.weight))
    });
    expansion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    fn spec(id: &str, dims: Dimensions, weight: f64, quantity: i64) -> CargoSpec {
        CargoSpec {
            id: id.to_string(),
            name: format!("cargo {id}"),
            dims,
            weight,
            quantity,
            allow_rotation: true,
            color: String::new(),
        }
    }

    #[test]
    fn test_unit_count_matches_positive_quantities() {
        let cargo = vec![
            spec("a", Dimensions::new(10.0, 10.0, 10.0), 1.0, 3),
            spec("b", Dimensions::new(20.0, 10.0, 10.0), 1.0, 0),
            spec("c", Dimensions::new(5.0, 5.0, 5.0), 1.0, -4),
            spec("d", Dimensions::new(5.0, 5.0, 5.0), 1.0, 2),
        ];
        let expansion = expand(&cargo);
        assert_eq!(expansion.units.len(), 5);
        assert!(expansion.rejected.is_empty());
    }

    #[test]
    fn test_sorted_by_volume_then_weight_then_input_order() {
        let cargo = vec![
            spec("small", Dimensions::new(10.0, 10.0, 10.0), 5.0, 1),
            spec("light", Dimensions::new(20.0, 20.0, 20.0), 1.0, 1),
            spec("heavy", Dimensions::new(20.0, 20.0, 20.0), 9.0, 1),
            spec("light-too", Dimensions::new(20.0, 20.0, 20.0), 1.0, 1),
        ];
        let ids: Vec<_> = expand(&cargo)
            .units
            .into_iter()
            .map(|u| u.cargo_id)
            .collect();
        assert_eq!(ids, ["heavy", "light", "light-too", "small"]);
    }

    #[test]
    fn test_invalid_specs_are_rejected() {
        let cargo = vec![
            spec("flat", Dimensions::new(10.0, 0.0, 10.0), 1.0, 4),
            spec("weightless", Dimensions::new(10.0, 10.0, 10.0), 0.0, 2),
            spec("empty", Dimensions::new(10.0, -1.0, 10.0), 1.0, 0),
        ];
        let expansion = expand(&cargo);
        assert!(expansion.units.is_empty());
        assert_eq!(expansion.rejected, vec![0, 1]);
    }
}

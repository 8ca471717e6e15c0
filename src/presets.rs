use serde::Serialize;

use crate::types::{ContainerKind, ContainerSpec, Dimensions};

/// A stock container or pallet type offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub dims: Dimensions,
    pub max_weight: f64,
    #[serde(rename = "type")]
    pub kind: ContainerKind,
}

static PRESETS: [Preset; 6] = [
    Preset {
        key: "pallet-h160",
        name: "Standard pallet (1.2x1.0 H1.6)",
        dims: Dimensions::new(120.0, 100.0, 160.0),
        max_weight: 1500.0,
        kind: ContainerKind::Pallet,
    },
    Preset {
        key: "pallet-h200",
        name: "Standard pallet (1.2x1.0 H2.0)",
        dims: Dimensions::new(120.0, 100.0, 200.0),
        max_weight: 1500.0,
        kind: ContainerKind::Pallet,
    },
    Preset {
        key: "euro-pallet",
        name: "Euro pallet (1.2x0.8)",
        dims: Dimensions::new(120.0, 80.0, 160.0),
        max_weight: 1200.0,
        kind: ContainerKind::Pallet,
    },
    Preset {
        key: "20gp",
        name: "20' GP",
        dims: Dimensions::new(589.0, 235.0, 239.0),
        max_weight: 28000.0,
        kind: ContainerKind::Container,
    },
    Preset {
        key: "40gp",
        name: "40' GP",
        dims: Dimensions::new(1203.0, 235.0, 239.0),
        max_weight: 28800.0,
        kind: ContainerKind::Container,
    },
    Preset {
        key: "40hc",
        name: "40' HC",
        dims: Dimensions::new(1203.0, 235.0, 269.0),
        max_weight: 28600.0,
        kind: ContainerKind::Container,
    },
];

impl Preset {
    pub fn spec(&self) -> ContainerSpec {
        ContainerSpec {
            name: self.name.to_string(),
            dims: self.dims,
            max_weight: self.max_weight,
            kind: self.kind,
        }
    }
}

pub fn all() -> &'static [Preset] {
    &PRESETS
}

/// Looks a preset up by key, ignoring ASCII case.
pub fn find(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset() {
        let hc = find("40HC").unwrap();
        assert_eq!(hc.dims, Dimensions::new(1203.0, 235.0, 269.0));
        assert_eq!(hc.spec().kind, ContainerKind::Container);
        assert!(find("53ft").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        for (i, a) in all().iter().enumerate() {
            assert!(all()[i + 1..].iter().all(|b| b.key != a.key));
        }
    }
}

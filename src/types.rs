use serde::{Deserialize, Deserializer, Serialize};

/// Residual free space thinner than this (in centimeters) is discarded.
pub const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// True when every extent is strictly positive.
    pub fn is_valid(&self) -> bool {
        self.length > 0.0 && self.width > 0.0 && self.height > 0.0
    }

    pub fn fits_in(&self, other: &Dimensions) -> bool {
        self.length <= other.length && self.width <= other.width && self.height <= other.height
    }

    /// Reassigns the extents so that axis `i` of the result takes extent `axes[i]`.
    pub fn permuted(&self, axes: [usize; 3]) -> Self {
        let extents = self.to_array();
        Self::from_array([extents[axes[0]], extents[axes[1]], extents[axes[2]]])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.length, self.width, self.height]
    }

    pub fn from_array(extents: [f64; 3]) -> Self {
        Self::new(extents[0], extents[1], extents[2])
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.length, self.width, self.height)
    }
}

/// Accepts any JSON number as a quantity; fractional values are truncated.
pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("quantity must be a finite number"));
    }
    Ok(value.trunc() as i64)
}

fn default_true() -> bool {
    true
}

/// One line of the cargo list: a cargo type and how many of it to ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub dims: Dimensions,
    /// Weight of a single unit in kilograms.
    pub weight: f64,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: i64,
    #[serde(default = "default_true")]
    pub allow_rotation: bool,
    #[serde(default)]
    pub color: String,
}

impl CargoSpec {
    /// A spec only yields units when its dimensions and weight are positive.
    pub fn is_packable(&self) -> bool {
        self.dims.is_valid() && self.weight > 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerKind {
    #[default]
    Container,
    Pallet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    #[serde(default)]
    pub name: String,
    pub dims: Dimensions,
    /// Maximum total load in kilograms.
    pub max_weight: f64,
    #[serde(rename = "type", default)]
    pub kind: ContainerKind,
}

/// A single physical unit expanded from a [`CargoSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct CargoUnit {
    pub cargo_id: String,
    pub name: String,
    pub color: String,
    pub dims: Dimensions,
    pub weight: f64,
    pub allow_rotation: bool,
    /// Position of the originating spec in the input list.
    pub spec_index: usize,
}

/// Empty axis-aligned region of a container. `size` extends along x (length),
/// y (width) and z (height) from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeCuboid {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub size: Dimensions,
}

impl FreeCuboid {
    pub fn new(origin: [f64; 3], size: Dimensions) -> Self {
        Self {
            x: origin[0],
            y: origin[1],
            z: origin[2],
            size,
        }
    }

    pub fn origin(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn volume(&self) -> f64 {
        self.size.volume()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedUnit {
    /// Unique within a plan: `<container>-<sequence>`.
    pub id: String,
    pub cargo_id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Resolved dimensions, possibly permuted from the declared ones.
    pub dims: Dimensions,
    pub weight: f64,
    pub color: String,
    pub rotated: bool,
}

impl PlacedUnit {
    pub fn volume(&self) -> f64 {
        self.dims.volume()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerPlan {
    /// 1-based position of this container in the batch.
    pub container_id: usize,
    pub container: ContainerSpec,
    pub placed: Vec<PlacedUnit>,
    pub free_spaces: Vec<FreeCuboid>,
    pub volume_utilization: f64,
    pub weight_utilization: f64,
    pub total_weight: f64,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpackedCargo {
    pub cargo_id: String,
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub containers: Vec<ContainerPlan>,
    pub unpacked: Vec<UnpackedCargo>,
    pub total_containers: usize,
    pub average_volume_utilization: f64,
}

impl BatchPlan {
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn placed_count(&self) -> usize {
        self.containers.iter().map(|c| c.placed.len()).sum()
    }

    pub fn unpacked_count(&self) -> u64 {
        self.unpacked.iter().map(|u| u.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permuted_dimensions() {
        let dims = Dimensions::new(1.0, 2.0, 3.0);
        assert_eq!(dims.permuted([0, 1, 2]), dims);
        assert_eq!(dims.permuted([2, 0, 1]), Dimensions::new(3.0, 1.0, 2.0));
    }

    #[test]
    fn test_fits_in_has_no_slack() {
        let free = Dimensions::new(100.0, 100.0, 100.0);
        assert!(Dimensions::new(100.0, 50.0, 50.0).fits_in(&free));
        assert!(!Dimensions::new(100.000_000_5, 50.0, 50.0).fits_in(&free));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(!Dimensions::new(10.0, 0.0, 10.0).is_valid());
        assert!(!Dimensions::new(-1.0, 10.0, 10.0).is_valid());
        assert!(Dimensions::new(0.5, 10.0, 10.0).is_valid());
    }

    #[test]
    fn test_cargo_spec_defaults_and_fractional_quantity() {
        let spec: CargoSpec = serde_json::from_str(
            r#"{"id":"1","dims":{"length":40,"width":40,"height":40},"weight":20,"quantity":3.7}"#,
        )
        .unwrap();
        assert_eq!(spec.quantity, 3);
        assert!(spec.allow_rotation);
        assert!(spec.name.is_empty());
    }

    #[test]
    fn test_container_kind_serializes_as_type() {
        let spec = ContainerSpec {
            name: "pallet".to_string(),
            dims: Dimensions::new(120.0, 100.0, 160.0),
            max_weight: 1500.0,
            kind: ContainerKind::Pallet,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "PALLET");
    }
}

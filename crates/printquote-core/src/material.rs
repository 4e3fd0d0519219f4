use crate::error::UnknownMaterialError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    #[serde(rename = "PLA")]
    Pla,
    #[serde(rename = "ABS")]
    Abs,
    #[serde(rename = "PETG")]
    Petg,
    #[serde(rename = "TPU")]
    Tpu,
    Nylon,
    Resin,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialProfile {
    pub material: Material,
    /// g/cm^3
    pub density: f64,
    /// Currency per gram.
    pub unit_cost: f64,
}

static PROFILES: [MaterialProfile; 6] = [
    MaterialProfile {
        material: Material::Pla,
        density: 1.24,
        unit_cost: 0.025,
    },
    MaterialProfile {
        material: Material::Abs,
        density: 1.04,
        unit_cost: 0.028,
    },
    MaterialProfile {
        material: Material::Petg,
        density: 1.27,
        unit_cost: 0.030,
    },
    MaterialProfile {
        material: Material::Tpu,
        density: 1.21,
        unit_cost: 0.035,
    },
    MaterialProfile {
        material: Material::Nylon,
        density: 1.14,
        unit_cost: 0.040,
    },
    MaterialProfile {
        material: Material::Resin,
        density: 1.10,
        unit_cost: 0.045,
    },
];

impl Material {
    pub const ALL: [Material; 6] = [
        Material::Pla,
        Material::Abs,
        Material::Petg,
        Material::Tpu,
        Material::Nylon,
        Material::Resin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Material::Pla => "PLA",
            Material::Abs => "ABS",
            Material::Petg => "PETG",
            Material::Tpu => "TPU",
            Material::Nylon => "Nylon",
            Material::Resin => "Resin",
        }
    }

    pub fn profile(self) -> &'static MaterialProfile {
        let idx = match self {
            Material::Pla => 0,
            Material::Abs => 1,
            Material::Petg => 2,
            Material::Tpu => 3,
            Material::Nylon => 4,
            Material::Resin => 5,
        };
        &PROFILES[idx]
    }

    pub fn density(self) -> f64 {
        self.profile().density
    }

    pub fn unit_cost(self) -> f64 {
        self.profile().unit_cost
    }
}

impl MaterialProfile {
    pub fn all() -> &'static [MaterialProfile] {
        &PROFILES
    }

    pub fn lookup(name: &str) -> Result<&'static MaterialProfile, UnknownMaterialError> {
        name.parse::<Material>().map(Material::profile)
    }
}

impl FromStr for Material {
    type Err = UnknownMaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Material::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownMaterialError {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

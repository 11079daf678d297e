use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// 車種
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleClass {
    TwoWheeler,
    ThreeWheeler,
    FourWheeler,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::TwoWheeler,
        VehicleClass::ThreeWheeler,
        VehicleClass::FourWheeler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::TwoWheeler => "two-wheeler",
            VehicleClass::ThreeWheeler => "three-wheeler",
            VehicleClass::FourWheeler => "four-wheeler",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::TwoWheeler => "2 Wheeler",
            VehicleClass::ThreeWheeler => "3 Wheeler",
            VehicleClass::FourWheeler => "4 Wheeler",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleClass {
    type Err = UnknownVehicleClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace(['_', ' '], "-");
        match normalized.as_str() {
            "two-wheeler" | "2-wheeler" => Ok(VehicleClass::TwoWheeler),
            "three-wheeler" | "3-wheeler" => Ok(VehicleClass::ThreeWheeler),
            "four-wheeler" | "4-wheeler" => Ok(VehicleClass::FourWheeler),
            _ => Err(UnknownVehicleClass),
        }
    }
}

#[derive(Error, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[display(fmt = "Unknown vehicle class")]
pub struct UnknownVehicleClass;

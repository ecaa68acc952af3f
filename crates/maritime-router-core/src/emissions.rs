//! Per-fuel-type emissions breakdown.
//!
//! This is an auxiliary report attached to a solution for callers that want
//! more detail than the single `emissions_t` objective dimension (which is
//! always `fuel_t × 3.114` CO₂, per [`crate::objectives`]) provides.

use serde::{Deserialize, Serialize};

/// Maritime fuel types with distinct emission factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Hfo,
    Vlsfo,
    Lsfo,
    Mgo,
    Lng,
    Methanol,
    Ammonia,
}

/// Emission factors in grams per kilogram of fuel burned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactors {
    pub co2: f64,
    pub sox: f64,
    pub nox: f64,
    pub pm: f64,
    pub ch4: f64,
}

impl FuelType {
    pub fn factors(self) -> EmissionFactors {
        match self {
            FuelType::Hfo => EmissionFactors { co2: 3114.0, sox: 54.0, nox: 87.0, pm: 7.6, ch4: 0.0 },
            FuelType::Vlsfo => EmissionFactors { co2: 3114.0, sox: 10.5, nox: 87.0, pm: 6.5, ch4: 0.0 },
            FuelType::Lsfo => EmissionFactors { co2: 3114.0, sox: 20.0, nox: 87.0, pm: 6.8, ch4: 0.0 },
            FuelType::Mgo => EmissionFactors { co2: 3206.0, sox: 2.0, nox: 78.0, pm: 1.5, ch4: 0.0 },
            FuelType::Lng => EmissionFactors { co2: 2750.0, sox: 0.0, nox: 15.0, pm: 0.1, ch4: 50.0 },
            FuelType::Methanol => EmissionFactors { co2: 1375.0, sox: 0.0, nox: 30.0, pm: 0.5, ch4: 0.0 },
            FuelType::Ammonia => EmissionFactors { co2: 0.0, sox: 0.0, nox: 20.0, pm: 0.0, ch4: 0.0 },
        }
    }
}

/// Emissions for a fuel burn, in tonnes of CO2 and kilograms of the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionBreakdown {
    pub co2_tonnes: f64,
    pub sox_kg: f64,
    pub nox_kg: f64,
    pub pm_kg: f64,
    pub ch4_kg: f64,
}

/// Break a total fuel burn down by pollutant for the given fuel type.
pub fn breakdown(fuel_tonnes: f64, fuel_type: FuelType) -> EmissionBreakdown {
    let factors = fuel_type.factors();
    let fuel_kg = fuel_tonnes * 1000.0;
    EmissionBreakdown {
        co2_tonnes: factors.co2 * fuel_kg / 1_000_000.0,
        sox_kg: factors.sox * fuel_kg / 1000.0,
        nox_kg: factors.nox * fuel_kg / 1000.0,
        pm_kg: factors.pm * fuel_kg / 1000.0,
        ch4_kg: factors.ch4 * fuel_kg / 1000.0,
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::config::constants::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EquivalentKind {
    Cars,         // Cars not driven for a year
    Homes,        // Homes powered by solar for a month
    Trees,        // Trees that don't need to be planted
    Smartphones,  // Smartphones charged for a year
    Led,          // Homes switching all bulbs to LED
    Energy,       // Homes' annual electricity use
}

impl EquivalentKind {
    pub const ALL: [EquivalentKind; 6] = [
        EquivalentKind::Cars,
        EquivalentKind::Homes,
        EquivalentKind::Trees,
        EquivalentKind::Smartphones,
        EquivalentKind::Led,
        EquivalentKind::Energy,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EquivalentKind::Cars => "cars",
            EquivalentKind::Homes => "homes",
            EquivalentKind::Trees => "trees",
            EquivalentKind::Smartphones => "smartphones",
            EquivalentKind::Led => "led",
            EquivalentKind::Energy => "energy",
        }
    }

    pub fn definition(&self) -> EquivalentDefinition {
        let (conversion_factor, unit_label, icon, color) = match self {
            EquivalentKind::Cars => (CARS_PER_TON, "cars not driven for a year", "🚗", "#ef4444"),
            EquivalentKind::Homes => (SOLAR_HOMES_PER_TON, "homes powered by solar for one month", "🏠", "#3b82f6"),
            EquivalentKind::Trees => (TREES_PER_TON, "trees that don't need to be planted", "🌳", "#10b981"),
            EquivalentKind::Smartphones => (SMARTPHONES_PER_TON, "smartphones charged for one year", "📱", "#8b5cf6"),
            EquivalentKind::Led => (LED_HOMES_PER_TON, "homes switching all bulbs to LED", "💡", "#fbbf24"),
            EquivalentKind::Energy => (ENERGY_HOMES_PER_TON, "homes' annual electricity use", "🔋", "#06b6d4"),
        };

        EquivalentDefinition {
            kind: *self,
            conversion_factor,
            unit_label,
            icon,
            color,
        }
    }
}

impl FromStr for EquivalentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cars" => Ok(EquivalentKind::Cars),
            "homes" => Ok(EquivalentKind::Homes),
            "trees" => Ok(EquivalentKind::Trees),
            "smartphones" => Ok(EquivalentKind::Smartphones),
            "led" => Ok(EquivalentKind::Led),
            "energy" => Ok(EquivalentKind::Energy),
            _ => Err(format!("Unknown equivalent: {}", s)),
        }
    }
}

impl fmt::Display for EquivalentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquivalentDefinition {
    pub kind: EquivalentKind,
    pub conversion_factor: f64,   // Units per ton CO2
    pub unit_label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquivalentValue {
    pub value: i64,
    pub formatted: String,
    pub unit: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

use serde::{Deserialize, Serialize};

/// The three physical quantities published by the station, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quantity {
    AirTemperature,
    BarometricPressure,
    WindSpeed,
}

impl Quantity {
    /// Column order of the merged rows: value1, value2, value3.
    pub const ALL: [Quantity; 3] = [
        Quantity::AirTemperature,
        Quantity::BarometricPressure,
        Quantity::WindSpeed,
    ];

    pub fn index(&self) -> usize {
        match self {
            Quantity::AirTemperature => 0,
            Quantity::BarometricPressure => 1,
            Quantity::WindSpeed => 2,
        }
    }

    pub fn from_feed_name(name: &str) -> Option<Self> {
        match name {
            "Air_Temp" => Some(Quantity::AirTemperature),
            "Barometric_Press" => Some(Quantity::BarometricPressure),
            "Wind_Speed" => Some(Quantity::WindSpeed),
            _ => None,
        }
    }

    /// Last path segment of the upstream page for this quantity.
    pub fn feed_name(&self) -> &'static str {
        match self {
            Quantity::AirTemperature => "Air_Temp",
            Quantity::BarometricPressure => "Barometric_Press",
            Quantity::WindSpeed => "Wind_Speed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Quantity::AirTemperature => "Air Temperature",
            Quantity::BarometricPressure => "Barometric Pressure",
            Quantity::WindSpeed => "Wind Speed",
        }
    }

    pub fn json_key(&self) -> &'static str {
        match self {
            Quantity::AirTemperature => "airTemperature",
            Quantity::BarometricPressure => "barometricPressure",
            Quantity::WindSpeed => "windSpeed",
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

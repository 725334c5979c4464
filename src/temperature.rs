//! Celsius / Fahrenheit conversion.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Celsius => "Celsius",
            Self::Fahrenheit => "Fahrenheit",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown unit {0:?}, expected C or F")]
pub struct UnknownUnit(pub String);

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "C" => Ok(Self::Celsius),
            "F" => Ok(Self::Fahrenheit),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

/// Convert `value` into `target`, reading the input as the other unit.
pub fn convert(value: f64, target: Unit) -> f64 {
    match target {
        Unit::Celsius => (value - 32.0) * 5.0 / 9.0,
        Unit::Fahrenheit => value * 9.0 / 5.0 + 32.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fahrenheit() {
        assert!((convert(32.0, Unit::Fahrenheit) - 89.6).abs() < 1e-9);
        assert_eq!(convert(100.0, Unit::Fahrenheit), 212.0);
    }

    #[test]
    fn test_to_celsius() {
        let c = convert(100.0, Unit::Celsius);
        assert_eq!(format!("{c:.2}"), "37.78");
        assert_eq!(convert(32.0, Unit::Celsius), 0.0);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("c".parse::<Unit>(), Ok(Unit::Celsius));
        assert_eq!(" F ".parse::<Unit>(), Ok(Unit::Fahrenheit));
        assert!("K".parse::<Unit>().is_err());
        assert!("".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unknown_unit_message() {
        let err = "Kelvin".parse::<Unit>().unwrap_err();
        assert_eq!(err, UnknownUnit("Kelvin".into()));
        assert_eq!(err.to_string(), "unknown unit \"Kelvin\", expected C or F");
    }
}

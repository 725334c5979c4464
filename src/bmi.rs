//! Body mass index: weight in kilograms over height in metres squared.

use std::fmt;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn for_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi(f64);

impl Bmi {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Rounded to two decimal places, as printed.
    pub fn rounded(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }

    pub fn category(&self) -> BmiCategory {
        BmiCategory::for_value(self.0)
    }
}

pub fn compute(weight_kg: f64, height_m: f64) -> AppResult<Bmi> {
    if height_m.is_nan() || height_m <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "height must be greater than zero, got {height_m}"
        )));
    }
    Ok(Bmi(weight_kg / (height_m * height_m)))
}

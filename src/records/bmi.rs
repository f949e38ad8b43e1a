use std::fmt;

/// Values strictly below this are underweight.
pub const UNDERWEIGHT_BELOW: f64 = 18.5;
/// Values at or above this are overweight.
pub const OVERWEIGHT_FROM: f64 = 24.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
}

impl BmiCategory {
    pub fn classify(value: f64) -> Self {
        if value < UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if value < OVERWEIGHT_FROM {
            BmiCategory::Normal
        } else {
            BmiCategory::Overweight
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body-mass index at full precision; rounding happens only in `Display`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

/// `height_cm` must be positive; the input paths reject zero before this is reached.
pub fn derive_bmi(height_cm: f64, weight_kg: f64) -> Bmi {
    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    Bmi {
        value,
        category: BmiCategory::classify(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_weight_over_height_squared() {
        let bmi = derive_bmi(180.0, 75.0);
        assert!((bmi.value - 23.148_148).abs() < 1e-5);
        assert_eq!(bmi.to_string(), "23.15");
        assert_eq!(bmi.category, BmiCategory::Normal);
    }

    #[test]
    fn lower_boundary_is_normal() {
        // 74 / 2.0^2 is exactly 18.5
        let bmi = derive_bmi(200.0, 74.0);
        assert_eq!(bmi.value, 18.5);
        assert_eq!(bmi.category, BmiCategory::Normal);

        let below = derive_bmi(200.0, 73.9);
        assert_eq!(below.category, BmiCategory::Underweight);
    }

    #[test]
    fn upper_boundary_is_overweight() {
        let bmi = derive_bmi(200.0, 99.6);
        assert_eq!(bmi.value, 24.9);
        assert_eq!(bmi.category, BmiCategory::Overweight);

        let below = derive_bmi(200.0, 99.5);
        assert_eq!(below.category, BmiCategory::Normal);
    }

    #[test]
    fn display_rounds_to_two_places() {
        let low = derive_bmi(170.0, 53.465);
        assert_eq!(low.to_string(), "18.50");
        assert_eq!(low.category, BmiCategory::Normal);

        let high = derive_bmi(170.0, 71.961);
        assert_eq!(high.to_string(), "24.90");
        assert_eq!(high.category, BmiCategory::Overweight);
    }

    #[test]
    fn every_value_has_exactly_one_category() {
        for tenths in 100..400 {
            let value = f64::from(tenths) / 10.0;
            let expected = if value < 18.5 {
                BmiCategory::Underweight
            } else if value < 24.9 {
                BmiCategory::Normal
            } else {
                BmiCategory::Overweight
            };
            assert_eq!(BmiCategory::classify(value), expected, "value {value}");
        }
    }

    #[test]
    fn category_labels() {
        assert_eq!(BmiCategory::Underweight.to_string(), "underweight");
        assert_eq!(BmiCategory::Normal.to_string(), "normal");
        assert_eq!(BmiCategory::Overweight.to_string(), "overweight");
    }
}

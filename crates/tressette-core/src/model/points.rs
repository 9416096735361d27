use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tressette points kept in thirds so that three figures add up to exactly
/// one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Points {
    thirds: u32,
}

impl Points {
    pub const ZERO: Points = Points { thirds: 0 };
    pub const THIRD: Points = Points { thirds: 1 };
    pub const ONE: Points = Points { thirds: 3 };

    pub const fn from_thirds(thirds: u32) -> Self {
        Self { thirds }
    }

    pub const fn thirds(self) -> u32 {
        self.thirds
    }

    /// Whole points, dropping any leftover thirds.
    pub const fn whole(self) -> u32 {
        self.thirds / 3
    }

    pub const fn is_zero(self) -> bool {
        self.thirds == 0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.thirds) / 3.0
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points::from_thirds(self.thirds + rhs.thirds)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.thirds += rhs.thirds;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Points {
        iter.fold(Points::ZERO, Add::add)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_f64())
    }
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() || value < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "points must be a non-negative number, got {value}"
            )));
        }
        Ok(Points::from_thirds((value * 3.0).round() as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::Points;

    #[test]
    fn three_thirds_make_exactly_one_point() {
        let total: Points = [Points::THIRD, Points::THIRD, Points::THIRD]
            .into_iter()
            .sum();
        assert_eq!(total, Points::ONE);
        assert_eq!(total.whole(), 1);
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Points::from_thirds(4).to_string(), "1.33");
        assert_eq!(Points::ZERO.to_string(), "0.00");
    }

    #[test]
    fn json_roundtrip_keeps_thirds() {
        let points = Points::from_thirds(7);
        let json = serde_json::to_string(&points).unwrap();
        let back: Points = serde_json::from_str(&json).unwrap();
        assert_eq!(back, points);
    }

    #[test]
    fn negative_points_are_refused() {
        assert!(serde_json::from_str::<Points>("-1.0").is_err());
    }
}

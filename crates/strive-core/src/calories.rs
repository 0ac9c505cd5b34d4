//! Calorie estimation from logged activity time

/// Flat estimate of calories burned per minute of any activity
pub const CALORIES_PER_MINUTE: f64 = 10.0;

/// Estimate total calories for a set of activity durations (in minutes),
/// rounded to the nearest whole calorie.
pub fn estimate_calories(minutes: impl IntoIterator<Item = f64>) -> i64 {
    let total: f64 = minutes.into_iter().sum();
    (total * CALORIES_PER_MINUTE).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_calories() {
        assert_eq!(estimate_calories([30.0, 45.0]), 750);
        assert_eq!(estimate_calories([]), 0);
        assert_eq!(estimate_calories([0.25]), 3);
    }
}

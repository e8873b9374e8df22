use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Greedy: from the first `(` to the last `)`
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*\)").expect("valid regex"));

const BAND_WIDTH: u32 = 5;
/// Lower bound of the open-ended last band
const TERMINAL_LOWER: u32 = 90;
pub const BUCKET_COUNT: usize = (TERMINAL_LOWER / BAND_WIDTH) as usize + 1;

/// Parse an age such as `45`, `45 (aprox)` or `"  80  "`.
///
/// Returns `None` when nothing numeric is left after dropping the
/// parenthetical annotation.
pub fn parse_age(text: &str) -> Option<f64> {
    let stripped = PARENTHETICAL.replace(text, "");
    let value: f64 = stripped.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// One of the fixed age bands: `[lower, lower + 5)` or `[90, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AgeBucket {
    lower: u32,
}

impl AgeBucket {
    /// Band containing `age`; negative ages have none.
    pub fn for_age(age: f64) -> Option<Self> {
        if !(age >= 0.0) {
            return None;
        }
        let lower = if age >= TERMINAL_LOWER as f64 {
            TERMINAL_LOWER
        } else {
            (age / BAND_WIDTH as f64).floor() as u32 * BAND_WIDTH
        };
        Some(Self { lower })
    }

    /// All bands in ascending order.
    pub fn all() -> impl Iterator<Item = AgeBucket> {
        (0..BUCKET_COUNT as u32).map(|i| AgeBucket { lower: i * BAND_WIDTH })
    }

    pub fn lower(&self) -> u32 {
        self.lower
    }

    /// Exclusive upper bound; `None` for the terminal band.
    pub fn upper(&self) -> Option<u32> {
        (self.lower < TERMINAL_LOWER).then_some(self.lower + BAND_WIDTH)
    }

    pub fn contains(&self, age: f64) -> bool {
        age >= self.lower as f64 && self.upper().map_or(true, |upper| age < upper as f64)
    }

    pub fn label(&self) -> String {
        match self.upper() {
            Some(upper) => format!("{}-{}", self.lower, upper - 1),
            None => format!("{} o más", self.lower),
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_age_with_annotation() {
        assert_eq!(parse_age("45 (aprox)"), Some(45.0));
        assert_eq!(parse_age(" 80 "), Some(80.0));
        assert_eq!(parse_age("3 (meses) (x)"), Some(3.0));
        assert_eq!(parse_age("62.5"), Some(62.5));
    }

    #[test]
    fn test_parse_age_failures() {
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("(sin dato)"), None);
        assert_eq!(parse_age("cuarenta"), None);
        assert_eq!(parse_age("NaN"), None);
    }

    #[test]
    fn test_bucket_examples() {
        assert_eq!(AgeBucket::for_age(45.0).unwrap().label(), "45-49");
        assert_eq!(AgeBucket::for_age(0.0).unwrap().label(), "0-4");
        assert_eq!(AgeBucket::for_age(4.99).unwrap().label(), "0-4");
        assert_eq!(AgeBucket::for_age(5.0).unwrap().label(), "5-9");
        assert_eq!(AgeBucket::for_age(89.9).unwrap().label(), "85-89");
        assert_eq!(AgeBucket::for_age(90.0).unwrap().label(), "90 o más");
        assert_eq!(AgeBucket::for_age(117.0).unwrap().label(), "90 o más");
        assert_eq!(AgeBucket::for_age(-1.0), None);
        assert_eq!(AgeBucket::for_age(f64::NAN), None);
    }

    #[test]
    fn test_bands_are_total_and_disjoint() {
        let buckets: Vec<AgeBucket> = AgeBucket::all().collect();
        assert_eq!(buckets.len(), BUCKET_COUNT);
        assert_eq!(buckets.len(), 19);

        let mut age = 0.0;
        while age < 130.0 {
            let owners: Vec<_> = buckets.iter().filter(|b| b.contains(age)).collect();
            assert_eq!(owners.len(), 1, "age {age}");
            assert_eq!(*owners[0], AgeBucket::for_age(age).unwrap());
            age += 0.25;
        }
    }

    #[test]
    fn test_all_is_ordered() {
        let labels: Vec<String> = AgeBucket::all().map(|b| b.label()).collect();
        assert_eq!(labels.first().map(String::as_str), Some("0-4"));
        assert_eq!(labels[17], "85-89");
        assert_eq!(labels.last().map(String::as_str), Some("90 o más"));
    }
}

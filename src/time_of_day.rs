use std::fmt;
use std::str::FromStr;

use chrono::Timelike;

/// Coarse time-of-day bucket that picks the scene palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TimeCategory {
    Night,
    Sunrise,
    Morning,
    Midday,
    Afternoon,
    Sunset,
}

impl TimeCategory {
    pub const ALL: [TimeCategory; 6] = [
        TimeCategory::Night,
        TimeCategory::Sunrise,
        TimeCategory::Morning,
        TimeCategory::Midday,
        TimeCategory::Afternoon,
        TimeCategory::Sunset,
    ];

    /// Category for the local wall clock right now
    pub fn now() -> Self {
        classify_hour(chrono::Local::now().hour())
    }

    pub const fn name(self) -> &'static str {
        match self {
            TimeCategory::Night => "night",
            TimeCategory::Sunrise => "sunrise",
            TimeCategory::Morning => "morning",
            TimeCategory::Midday => "midday",
            TimeCategory::Afternoon => "afternoon",
            TimeCategory::Sunset => "sunset",
        }
    }
}

impl fmt::Display for TimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TimeCategory::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| format!("unknown time of day: {s}"))
    }
}

/// Bucket a 24h clock hour.
///
/// Ranges are open at the bottom and closed at the top, except night which
/// wraps midnight: `(19, 24) ∪ [0, 5)`. Hours past 23 count as night.
pub fn classify_hour(hour: u32) -> TimeCategory {
    match hour {
        h if h > 19 || h < 5 => TimeCategory::Night,
        5..=7 => TimeCategory::Sunrise,
        8..=10 => TimeCategory::Morning,
        11..=13 => TimeCategory::Midday,
        14..=16 => TimeCategory::Afternoon,
        _ => TimeCategory::Sunset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify_hour(6), TimeCategory::Sunrise);
        assert_eq!(classify_hour(20), TimeCategory::Night);
        assert_eq!(classify_hour(12), TimeCategory::Midday);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_hour(4), TimeCategory::Night);
        assert_eq!(classify_hour(5), TimeCategory::Sunrise);
        assert_eq!(classify_hour(7), TimeCategory::Sunrise);
        assert_eq!(classify_hour(8), TimeCategory::Morning);
        assert_eq!(classify_hour(10), TimeCategory::Morning);
        assert_eq!(classify_hour(11), TimeCategory::Midday);
        assert_eq!(classify_hour(13), TimeCategory::Midday);
        assert_eq!(classify_hour(14), TimeCategory::Afternoon);
        assert_eq!(classify_hour(16), TimeCategory::Afternoon);
        assert_eq!(classify_hour(17), TimeCategory::Sunset);
        assert_eq!(classify_hour(19), TimeCategory::Sunset);
        assert_eq!(classify_hour(0), TimeCategory::Night);
        assert_eq!(classify_hour(23), TimeCategory::Night);
    }

    #[test]
    fn test_classify_partitions_day_into_six_runs() {
        // Walking the clock from 05:00 should visit each category as one
        // contiguous run, wrapping through midnight back to the start.
        let sequence: Vec<_> = (0..24).map(|h| classify_hour((h + 5) % 24)).collect();
        let mut runs = vec![sequence[0]];
        for c in &sequence[1..] {
            if *runs.last().unwrap() != *c {
                runs.push(*c);
            }
        }
        assert_eq!(runs.len(), 6);
        for category in TimeCategory::ALL {
            assert_eq!(runs.iter().filter(|c| **c == category).count(), 1);
        }
    }

    #[test]
    fn test_out_of_range_hour_is_night() {
        assert_eq!(classify_hour(24), TimeCategory::Night);
        assert_eq!(classify_hour(u32::MAX), TimeCategory::Night);
    }

    #[test]
    fn test_from_str_round_trip_names() {
        for category in TimeCategory::ALL {
            assert_eq!(category.name().parse::<TimeCategory>(), Ok(category));
        }
        assert_eq!(" Sunset ".parse::<TimeCategory>(), Ok(TimeCategory::Sunset));
        assert!("dusk".parse::<TimeCategory>().is_err());
    }
}

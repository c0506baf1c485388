use chrono::{DateTime, Utc};

/// Full-scale grid load in megawatts used for the demand percentage.
/// Inherited from the source system; no authoritative capacity figure
/// exists for it.
pub const MAX_GRID_LOAD_MW: f64 = 160_000.0;

/// Rendered in place of a period that does not parse.
pub const INVALID_PERIOD: &str = "Invalid";

pub fn grid_load_percent(megawatts: f64) -> f64 {
    megawatts / MAX_GRID_LOAD_MW * 100.0
}

/// Three-tier charging advice derived from the grid load percentage.
/// Boundaries are strict: exactly 40% and 70% select the higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeAdvice {
    Favorable,
    Moderate,
    Heavy,
}

impl ChargeAdvice {
    pub fn for_load_percent(percent: f64) -> Self {
        if percent < 40.0 {
            Self::Favorable
        } else if percent < 70.0 {
            Self::Moderate
        } else {
            Self::Heavy
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Favorable => "Great time to charge - grid is low and green!",
            Self::Moderate => "Charging is okay, but grid is moderately loaded.",
            Self::Heavy => "High grid demand - consider delaying charging",
        }
    }

    pub fn banner_class(&self) -> &'static str {
        match self {
            Self::Favorable => "bg-emerald-500/10 border border-emerald-500/30 text-emerald-300",
            Self::Moderate => "bg-amber-500/10 border border-amber-500/30 text-amber-300",
            Self::Heavy => "bg-red-500/10 border border-red-500/30 text-red-300",
        }
    }
}

/// Per-reading demand label. Thresholds are on the raw megawatt value,
/// strict at both boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

impl DemandLevel {
    pub fn from_megawatts(megawatts: f64) -> Self {
        if megawatts < 80_000.0 {
            Self::Low
        } else if megawatts < 120_000.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Low => "bg-emerald-500/10 text-emerald-300",
            Self::Medium => "bg-amber-500/10 text-amber-300",
            Self::High => "bg-red-500/10 text-red-300",
        }
    }

    pub fn dot_class(&self) -> &'static str {
        match self {
            Self::Low => "text-emerald-400",
            Self::Medium => "text-amber-400",
            Self::High => "text-red-400",
        }
    }
}

pub fn battery_percent(level: Option<f64>) -> Option<i32> {
    level.map(|l| (l * 100.0).round() as i32)
}

/// Number to put in front of the `%` sign; `--` until the first reading.
pub fn battery_percent_label(level: Option<f64>) -> String {
    match battery_percent(level) {
        Some(p) => p.to_string(),
        None => "--".to_string(),
    }
}

/// Hour-truncated periods come through as exactly 13 chars
/// ("2025-06-01T17"); pad them to a full RFC 3339 instant.
pub fn normalize_period(raw: &str) -> String {
    if raw.len() == 13 {
        format!("{raw}:00:00Z")
    } else {
        raw.to_string()
    }
}

pub fn parse_period(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&normalize_period(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn display_period(raw: &str) -> String {
    match parse_period(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => INVALID_PERIOD.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_percent_rounds_to_whole_percent() {
        assert_eq!(battery_percent(Some(0.734)), Some(73));
        assert_eq!(battery_percent(Some(0.0)), Some(0));
        assert_eq!(battery_percent(Some(1.0)), Some(100));
        assert_eq!(battery_percent(Some(0.005)), Some(1));
    }

    #[test]
    fn battery_label_shows_dashes_until_first_reading() {
        assert_eq!(battery_percent_label(None), "--");
        assert_eq!(battery_percent_label(Some(0.734)), "73");
    }

    #[test]
    fn grid_load_percent_is_linear_over_full_scale() {
        assert_eq!(grid_load_percent(60_000.0), 37.5);
        assert_eq!(grid_load_percent(130_000.0), 81.25);
        assert_eq!(grid_load_percent(0.0), 0.0);
        assert_eq!(grid_load_percent(160_000.0), 100.0);
    }

    #[test]
    fn advice_boundaries_are_strict() {
        assert_eq!(ChargeAdvice::for_load_percent(39.999), ChargeAdvice::Favorable);
        assert_eq!(ChargeAdvice::for_load_percent(40.0), ChargeAdvice::Moderate);
        assert_eq!(ChargeAdvice::for_load_percent(69.999), ChargeAdvice::Moderate);
        assert_eq!(ChargeAdvice::for_load_percent(70.0), ChargeAdvice::Heavy);
    }

    #[test]
    fn advice_for_sample_readings() {
        // 60000 MW -> 37.5%, 130000 MW -> 81.25%
        let green = ChargeAdvice::for_load_percent(grid_load_percent(60_000.0));
        assert_eq!(green, ChargeAdvice::Favorable);
        assert_eq!(green.message(), "Great time to charge - grid is low and green!");

        let red = ChargeAdvice::for_load_percent(grid_load_percent(130_000.0));
        assert_eq!(red, ChargeAdvice::Heavy);
        assert_eq!(red.message(), "High grid demand - consider delaying charging");
    }

    #[test]
    fn demand_level_partition_at_boundaries() {
        assert_eq!(DemandLevel::from_megawatts(79_999.0), DemandLevel::Low);
        assert_eq!(DemandLevel::from_megawatts(80_000.0), DemandLevel::Medium);
        assert_eq!(DemandLevel::from_megawatts(119_999.0), DemandLevel::Medium);
        assert_eq!(DemandLevel::from_megawatts(120_000.0), DemandLevel::High);
        assert_eq!(DemandLevel::from_megawatts(130_000.0), DemandLevel::High);
    }

    #[test]
    fn hour_truncated_periods_are_padded() {
        assert_eq!(normalize_period("2025-06-01T17"), "2025-06-01T17:00:00Z");
        assert_eq!(
            normalize_period("2025-06-01T17:00:00Z"),
            "2025-06-01T17:00:00Z"
        );
        assert_eq!(display_period("2025-06-01T17"), "2025-06-01 17:00");
    }

    #[test]
    fn malformed_periods_render_invalid() {
        assert_eq!(display_period("not-a-date"), "Invalid");
        assert_eq!(display_period(""), "Invalid");
        // 13 chars but still not a timestamp after padding
        assert_eq!(display_period("abcdefghijklm"), "Invalid");
    }

    #[test]
    fn full_precision_periods_parse_unchanged() {
        assert_eq!(display_period("2025-06-01T17:30:00Z"), "2025-06-01 17:30");
        let dt = parse_period("2025-06-01T17:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-06-01T15:30:00+00:00");
    }
}

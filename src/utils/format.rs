pub fn format_megawatts(mw: f64) -> String {
    if mw.abs() >= 10_000.0 {
        let gw = mw / 1_000.0;
        if (gw * 10.0).round() % 10.0 == 0.0 {
            format!("{} GW", gw.round() as i64)
        } else {
            format!("{:.1} GW", gw)
        }
    } else {
        format!("{} MW", mw.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_stay_in_megawatts() {
        assert_eq!(format_megawatts(0.0), "0 MW");
        assert_eq!(format_megawatts(950.4), "950 MW");
        assert_eq!(format_megawatts(9_999.0), "9999 MW");
    }

    #[test]
    fn large_values_compact_to_gigawatts() {
        assert_eq!(format_megawatts(60_000.0), "60 GW");
        assert_eq!(format_megawatts(128_903.0), "128.9 GW");
        assert_eq!(format_megawatts(130_000.0), "130 GW");
    }
}

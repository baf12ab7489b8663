pub type AppInstant = std::time::Instant;

pub const SECS_IN_MIN: f64 = 60.0;
pub const SECS_IN_H: f64 = SECS_IN_MIN * 60.0;

/// Human-readable session time, e.g. `42.50s`, `3m 05.0s`, `1h 02m`.
pub fn format_seconds(secs: f64) -> String {
    if !secs.is_finite() {
        return "-".to_string();
    }
    if secs < SECS_IN_MIN {
        return format!("{:.2}s", secs);
    }
    if secs < SECS_IN_H {
        let mins = (secs / SECS_IN_MIN).floor();
        return format!("{}m {:04.1}s", mins, secs - mins * SECS_IN_MIN);
    }
    let hours = (secs / SECS_IN_H).floor();
    let mins = ((secs - hours * SECS_IN_H) / SECS_IN_MIN).floor();
    format!("{}h {:02}m", hours, mins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.08), "0.08s");
        assert_eq!(format_seconds(185.0), "3m 05.0s");
        assert_eq!(format_seconds(3720.0), "1h 02m");
        assert_eq!(format_seconds(f64::NAN), "-");
    }
}

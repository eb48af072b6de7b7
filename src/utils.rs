use chrono::{DateTime, Utc};

pub fn epoch_to_datetime(epoch: f64) -> Option<DateTime<Utc>> {
    if !epoch.is_finite() || epoch < 0.0 {
        return None;
    }
    let secs = epoch.trunc() as i64;
    let nanos = ((epoch.fract() * 1_000_000_000.0).round() as u32).min(999_999_999);
    DateTime::from_timestamp(secs, nanos)
}

/// True when the string opens with a dotted-quad, e.g. "93.184.216.34".
pub fn is_ipv4_literal(host: &str) -> bool {
    let mut rest = host;
    for _ in 0..3 {
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if !(1..=3).contains(&digits) {
            return false;
        }
        rest = match rest[digits..].strip_prefix('.') {
            Some(r) => r,
            None => return false,
        };
    }
    rest.chars().next().map_or(false, |c| c.is_ascii_digit())
}

pub fn is_local_hostname(host: &str) -> bool {
    host.ends_with(".local")
}

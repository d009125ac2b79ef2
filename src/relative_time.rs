//! Human-readable distance between a note's date and now, in Brazilian Portuguese.
//!
//! Bucketing matches date-fns `formatDistanceToNow(date, { addSuffix: true })`, so
//! labels read like "há 5 minutos" or "em cerca de 2 horas".

use chrono::{DateTime, Datelike, Utc};

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// A coarse distance between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    LessThanXMinutes(i64),
    XMinutes(i64),
    AboutXHours(i64),
    XDays(i64),
    AboutXMonths(i64),
    XMonths(i64),
    AboutXYears(i64),
    OverXYears(i64),
    AlmostXYears(i64),
}

impl Distance {
    /// Buckets the distance between two instants, ignoring their order.
    pub fn between(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
        let seconds = (later - earlier).num_seconds();
        let minutes = (seconds as f64 / 60.0).round() as i64;

        if minutes < 2 {
            return if minutes == 0 {
                Distance::LessThanXMinutes(1)
            } else {
                Distance::XMinutes(minutes)
            };
        }
        if minutes < 45 {
            return Distance::XMinutes(minutes);
        }
        if minutes < 90 {
            return Distance::AboutXHours(1);
        }
        if minutes < MINUTES_IN_DAY {
            return Distance::AboutXHours((minutes as f64 / 60.0).round() as i64);
        }
        if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
            return Distance::XDays(1);
        }
        if minutes < MINUTES_IN_MONTH {
            return Distance::XDays((minutes as f64 / MINUTES_IN_DAY as f64).round() as i64);
        }
        if minutes < MINUTES_IN_TWO_MONTHS {
            return Distance::AboutXMonths(
                (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64,
            );
        }

        let months = calendar_months(earlier, later);
        if months < 12 {
            return Distance::XMonths((minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64);
        }
        let years = months / 12;
        match months % 12 {
            0..=2 => Distance::AboutXYears(years),
            3..=8 => Distance::OverXYears(years),
            _ => Distance::AlmostXYears(years + 1),
        }
    }

    /// The pt-BR phrase for this distance, without a suffix.
    pub fn to_pt_br(&self) -> String {
        let (count, one, other) = match *self {
            Distance::LessThanXMinutes(n) => (n, "menos de um minuto", "menos de {} minutos"),
            Distance::XMinutes(n) => (n, "1 minuto", "{} minutos"),
            Distance::AboutXHours(n) => (n, "cerca de 1 hora", "cerca de {} horas"),
            Distance::XDays(n) => (n, "1 dia", "{} dias"),
            Distance::AboutXMonths(n) => (n, "cerca de 1 mês", "cerca de {} meses"),
            Distance::XMonths(n) => (n, "1 mês", "{} meses"),
            Distance::AboutXYears(n) => (n, "cerca de 1 ano", "cerca de {} anos"),
            Distance::OverXYears(n) => (n, "mais de 1 ano", "mais de {} anos"),
            Distance::AlmostXYears(n) => (n, "quase 1 ano", "quase {} anos"),
        };
        if count == 1 {
            one.to_string()
        } else {
            other.replace("{}", &count.to_string())
        }
    }
}

// Whole calendar months from `earlier` to `later`.
fn calendar_months(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month())
        - i64::from(earlier.month());
    if months > 0 && (later.day(), later.time()) < (earlier.day(), earlier.time()) {
        months -= 1;
    }
    months
}

/// Describes `date` relative to `now`, e.g. "há 3 dias" or "em 1 minuto".
pub fn format_distance(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let phrase = Distance::between(date, now).to_pt_br();
    if date > now {
        format!("em {phrase}")
    } else {
        format!("há {phrase}")
    }
}

/// Describes `date` relative to the current time.
pub fn format_distance_to_now(date: DateTime<Utc>) -> String {
    format_distance(date, Utc::now())
}

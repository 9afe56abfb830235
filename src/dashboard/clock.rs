//! Wall-clock source for render cycles

use chrono::{Local, NaiveDateTime};

/// Caption time format (hours:minutes:seconds)
pub const CAPTION_FORMAT: &str = "%H:%M:%S";

/// Supplies the local wall-clock time of a render
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The host's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Format a time the way captions show it
pub fn caption_time(time: NaiveDateTime) -> String {
    time.format(CAPTION_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_caption_time() {
        let t = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        assert_eq!(caption_time(t), "09:05:07");
        assert_eq!(FixedClock(t).now(), t);
    }
}

/// Source of wall-clock time for the text being displayed.
pub trait WallClock: Send {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Reads the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_millis(&self) -> i64 {
        let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        millis.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

/// Always reports the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl WallClock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

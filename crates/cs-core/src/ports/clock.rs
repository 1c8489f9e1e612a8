use crate::clipboard::TimestampMs;

pub trait ClockPort: Send + Sync {
    fn now(&self) -> TimestampMs;
}

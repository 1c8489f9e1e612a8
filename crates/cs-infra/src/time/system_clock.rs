use cs_core::ports::ClockPort;
use cs_core::TimestampMs;

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> TimestampMs {
        TimestampMs::from_epoch_millis(chrono::Utc::now().timestamp_millis())
    }
}

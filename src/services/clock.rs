use chrono::{NaiveTime, Timelike};
use std::sync::Arc;

use crate::models::{OrderAction, ServiceError, ServiceResult};

/// Source of the current time of day
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// Local wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// Always reports the same time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Time window in which orders may be placed or changed
#[derive(Clone)]
pub struct OrderingWindow {
    closing: NaiveTime,
    clock: Arc<dyn Clock>,
}

impl OrderingWindow {
    pub fn new(closing: NaiveTime, clock: Arc<dyn Clock>) -> Self {
        Self { closing, clock }
    }

    pub fn closing(&self) -> NaiveTime {
        self.closing
    }

    pub fn is_open(&self) -> bool {
        self.clock.now() < self.closing
    }

    /// Refuse `action` once the closing time has been reached
    pub fn ensure_open(&self, action: OrderAction) -> ServiceResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ServiceError::PastClosing {
                action,
                closing: display_time(self.closing),
            })
        }
    }
}

impl std::fmt::Debug for OrderingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderingWindow")
            .field("closing", &self.closing)
            .finish_non_exhaustive()
    }
}

/// 12-hour rendering used in refusal messages: `10PM`, `9:30AM`
pub fn display_time(time: NaiveTime) -> String {
    if time.minute() == 0 {
        time.format("%-I%p").to_string()
    } else {
        time.format("%-I:%M%p").to_string()
    }
}

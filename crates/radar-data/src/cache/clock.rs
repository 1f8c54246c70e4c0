//! 현재 시각 공급자.

use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;

/// 현재 시각 trait.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 설정하는 시계 (테스트용).
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// 시각을 지정합니다.
    pub fn set(&self, now: DateTime<Utc>) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard = now;
    }

    /// 시각을 앞으로 이동합니다.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

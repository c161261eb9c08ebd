//! Wall-clock collaborator.
//!
//! The check-in day is derived from the configured fixed UTC offset so that
//! "one check-in per day" follows the user's calendar rather than UTC.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

/// Source of the current instant and the offset that turns it into a day.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn offset(&self) -> FixedOffset;

    /// One reading of the clock together with its calendar day.
    fn now_and_today(&self) -> (DateTime<Utc>, NaiveDate) {
        let now = self.now();
        (now, local_day(now, self.offset()))
    }

    /// Calendar day of [`Clock::now`] in the clock's offset.
    fn today(&self) -> NaiveDate {
        self.now_and_today().1
    }
}

/// System clock with a fixed display offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(utc_offset())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock pinned to one instant. Used by tests and for back-dated check-ins.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Pin the calendar day in `offset`, stamping reports at local noon.
    pub fn on_local_day(day: NaiveDate, offset: FixedOffset) -> Self {
        let local_noon = day.and_time(NaiveTime::MIN) + Duration::hours(12);
        let now = (local_noon - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc();
        Self::new(now, offset)
    }

    /// [`FixedClock::on_local_day`] in UTC.
    pub fn on_day(day: NaiveDate) -> Self {
        Self::on_local_day(day, utc_offset())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn offset(&self) -> FixedOffset {
        (**self).offset()
    }
}

/// Calendar day of `instant` in `offset`.
pub fn local_day(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Zero offset.
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Offset for `minutes` east of UTC, or `None` outside ±24h.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

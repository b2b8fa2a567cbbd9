//! Wall-clock time model.
//!
//! # Design
//!
//! The canonical time unit is `TimestampMs` — Unix epoch milliseconds, the
//! same unit the timeline UI scrubs in.  Everything the engine derives from
//! it (hour of day, weekday, day phase, cache bucket) is computed with plain
//! integer arithmetic; no datetime library is pulled in for what amounts to
//! a handful of divisions.
//!
//! City-local time is obtained by adding a per-city UTC offset in minutes
//! before breaking the timestamp into components.  Daylight-saving rules are
//! deliberately ignored: the engine's mobility numbers are synthetic, and a
//! one-hour phase error twice a year is invisible in them.

use std::fmt;

// ── TimestampMs ───────────────────────────────────────────────────────────────

/// An absolute wall-clock instant in Unix epoch milliseconds.
///
/// Stored as `i64`: pre-1970 instants are representable (negative), and the
/// range outlives the Sun.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimestampMs(pub i64);

impl TimestampMs {
    pub const ZERO: TimestampMs = TimestampMs(0);

    /// Construct from whole Unix seconds.
    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        TimestampMs(secs * 1_000)
    }

    /// Whole Unix seconds (floor).
    #[inline]
    pub fn as_secs(self) -> i64 {
        self.0.div_euclid(1_000)
    }

    /// The timestamp `ms` milliseconds after `self`.
    #[inline]
    pub fn offset_ms(self, ms: i64) -> TimestampMs {
        TimestampMs(self.0 + ms)
    }

    /// Break into city-local components using a UTC offset in minutes
    /// (e.g. -300 for New York in winter).
    pub fn local(self, utc_offset_minutes: i32) -> LocalTime {
        let local_secs = self.as_secs() + utc_offset_minutes as i64 * 60;
        let secs_of_day = local_secs.rem_euclid(86_400);
        let days = local_secs.div_euclid(86_400);

        LocalTime {
            hour:    (secs_of_day / 3_600) as u8,
            minute:  ((secs_of_day % 3_600) / 60) as u8,
            weekday: Weekday::from_days_since_epoch(days),
        }
    }
}

impl std::ops::Sub for TimestampMs {
    type Output = i64;
    /// Milliseconds elapsed from `rhs` to `self`.
    #[inline]
    fn sub(self, rhs: TimestampMs) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── LocalTime ─────────────────────────────────────────────────────────────────

/// A timestamp broken into the city-local components the models care about.
///
/// Cheap to copy; derived on demand from `TimestampMs::local`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalTime {
    /// Hour of day, 0–23.
    pub hour: u8,
    /// Minute of hour, 0–59.
    pub minute: u8,
    pub weekday: Weekday,
}

impl LocalTime {
    /// Construct directly — mainly for tests and fixtures.
    pub fn new(hour: u8, minute: u8, weekday: Weekday) -> Self {
        Self { hour, minute, weekday }
    }

    #[inline]
    pub fn is_weekend(self) -> bool {
        self.weekday.is_weekend()
    }

    /// Daylight window used by the bicycle model: 07:00–18:59.
    #[inline]
    pub fn is_daylight(self) -> bool {
        (7..19).contains(&self.hour)
    }

    #[inline]
    pub fn day_phase(self) -> DayPhase {
        DayPhase::from_hour(self.hour)
    }

    #[inline]
    pub fn commute_bias(self) -> CommuteBias {
        CommuteBias::from_hour(self.hour)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}", self.weekday, self.hour, self.minute)
    }
}

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Day of week.  Discriminants run Monday = 0 … Sunday = 6.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Weekday of a local day index counted from the Unix epoch.
    /// 1970-01-01 (day 0) was a Thursday.
    pub fn from_days_since_epoch(days: i64) -> Weekday {
        match (days + 3).rem_euclid(7) {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday    => "Mon",
            Weekday::Tuesday   => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday  => "Thu",
            Weekday::Friday    => "Fri",
            Weekday::Saturday  => "Sat",
            Weekday::Sunday    => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DayPhase ──────────────────────────────────────────────────────────────────

/// Coarse time-of-day classification driving the intensity tables.
///
/// | Phase   | Local hours          |
/// |---------|----------------------|
/// | Rush    | 07–09 and 16–18      |
/// | Midday  | 10–15                |
/// | Evening | 19–22                |
/// | Night   | everything else      |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayPhase {
    Rush,
    Midday,
    Evening,
    Night,
}

impl DayPhase {
    pub fn from_hour(hour: u8) -> DayPhase {
        match hour {
            7..=9 | 16..=18 => DayPhase::Rush,
            10..=15         => DayPhase::Midday,
            19..=22         => DayPhase::Evening,
            _               => DayPhase::Night,
        }
    }
}

// ── CommuteBias ───────────────────────────────────────────────────────────────

/// Direction bias for synthesized origin/destination pairs.
///
/// Morning commutes flow from the outskirts towards the center, evening
/// commutes the other way; off-peak trips chain points of interest into a
/// tour.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommuteBias {
    /// Outskirts → center (morning).
    Inbound,
    /// Center → outskirts (evening).
    Outbound,
    /// POI-to-POI chained tour (off-peak).
    Tour,
}

impl CommuteBias {
    pub fn from_hour(hour: u8) -> CommuteBias {
        match hour {
            6..=9   => CommuteBias::Inbound,
            15..=19 => CommuteBias::Outbound,
            _       => CommuteBias::Tour,
        }
    }
}

// ── TimeBucket ────────────────────────────────────────────────────────────────

/// A fixed-width wall-clock window used as a cache key.
///
/// Two timestamps in the same bucket produce near-identical generated data,
/// so the cache serves them from one entry instead of regenerating.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeBucket(pub i64);

impl TimeBucket {
    /// Default bucket width in minutes.
    pub const DEFAULT_WINDOW_MINUTES: u32 = 5;

    /// The bucket containing `ts`, with `window_minutes`-wide windows.
    pub fn containing(ts: TimestampMs, window_minutes: u32) -> TimeBucket {
        let window_ms = window_minutes as i64 * 60_000;
        TimeBucket(ts.0.div_euclid(window_ms))
    }

    /// The timestamp at which this bucket starts.
    pub fn start(self, window_minutes: u32) -> TimestampMs {
        TimestampMs(self.0 * window_minutes as i64 * 60_000)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use herald_common::util::rate_tracker::RateTracker;
use herald_common::util::regex::RATE_LIMIT;
use herald_common::util::unit_to_millis;
use moka::sync::Cache;
use tokio::time::Instant;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;

use super::errors::ParseRateLimitError;

/// Longest window for which idle per-invoker state is allowed to expire from memory.
const MAX_IDLE_EXPIRY: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// A parsed `<limit>/<duration><unit>` rate limit: at most `limit` calls in any `duration`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u32,
    pub duration: Duration,
}

impl RateLimit {
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

impl FromStr for RateLimit {
    type Err = ParseRateLimitError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let captures = RATE_LIMIT
            .captures(spec.trim())
            .ok_or_else(|| ParseRateLimitError::Malformed(spec.to_owned()))?;

        let out_of_range = || ParseRateLimitError::OutOfRange(spec.to_owned());

        let limit = captures[1].parse::<u32>().map_err(|_| out_of_range())?;
        let amount = captures[2].parse::<u64>().map_err(|_| out_of_range())?;
        let unit = unit_to_millis(&captures[3]).ok_or_else(|| ParseRateLimitError::Malformed(spec.to_owned()))?;
        let millis = amount.checked_mul(unit).ok_or_else(out_of_range)?;

        if limit == 0 || millis == 0 {
            return Err(out_of_range());
        }

        Ok(RateLimit {
            limit,
            duration: Duration::from_millis(millis),
        })
    }
}

/// Parses a rate limit string into `(limit, duration in milliseconds)`.
pub fn parse(spec: &str) -> Result<(u32, u64), ParseRateLimitError> {
    let rate_limit = spec.parse::<RateLimit>()?;
    Ok((rate_limit.limit, rate_limit.duration_ms()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Admit,
    /// Rejected; the invoker's oldest call leaves the window after this long.
    Reject(Duration),
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit)
    }

    pub fn retry_after_ms(&self) -> u64 {
        match self {
            Self::Admit => 0,
            Self::Reject(wait) => wait.as_millis() as u64,
        }
    }
}

/// Sliding window call counter for a single command, keyed by invoker.
///
/// Each invoker gets their own [`RateTracker`] behind its own lock, created on first use, so checks
/// for different invokers never contend and two concurrent checks for the same invoker cannot both
/// take the last free slot. A tracker that has been idle for a full window holds no live samples,
/// so the cache is allowed to drop it.
pub struct RateLimiter {
    rate_limit: Option<RateLimit>,
    trackers: Cache<Id<UserMarker>, Arc<Mutex<RateTracker>>>,
}

impl RateLimiter {
    pub fn new(spec: &str) -> Result<Self, ParseRateLimitError> {
        Ok(Self::from_rate_limit(spec.parse()?))
    }

    pub fn from_rate_limit(rate_limit: RateLimit) -> Self {
        let mut builder = Cache::builder();
        if rate_limit.duration <= MAX_IDLE_EXPIRY {
            builder = builder.time_to_idle(rate_limit.duration);
        }

        Self {
            rate_limit: Some(rate_limit),
            trackers: builder.build(),
        }
    }

    /// A limiter that admits every call.
    pub fn not_rate_limited() -> Self {
        Self {
            rate_limit: None,
            trackers: Cache::builder().max_capacity(0).build(),
        }
    }

    pub fn rate_limit(&self) -> Option<RateLimit> {
        self.rate_limit
    }

    pub fn check(&self, invoker: Id<UserMarker>) -> Decision {
        self.check_at(invoker, Instant::now())
    }

    /// Admits the call if the invoker made fewer than `limit` calls in the window ending at `now`,
    /// recording it; otherwise rejects without recording.
    pub fn check_at(&self, invoker: Id<UserMarker>, now: Instant) -> Decision {
        let Some(rate_limit) = self.rate_limit else {
            return Decision::Admit;
        };

        let tracker = self
            .trackers
            .get_with(invoker, || Arc::new(Mutex::new(RateTracker::new(rate_limit.duration))));
        let mut tracker = tracker.lock().unwrap_or_else(PoisonError::into_inner);

        tracker.evict(now);

        if tracker.len() < rate_limit.limit as usize {
            tracker.add_sample(now);
            return Decision::Admit;
        }

        match tracker.oldest() {
            Some(oldest) => Decision::Reject(rate_limit.duration.saturating_sub(now.saturating_duration_since(oldest))),
            // unreachable with limit >= 1, but admitting is the safe answer
            None => Decision::Admit,
        }
    }

    /// Forgets every recorded call of `invoker`.
    pub fn reset(&self, invoker: Id<UserMarker>) {
        self.trackers.invalidate(&invoker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> Id<UserMarker> {
        Id::new(id)
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn parse_units() {
        assert_eq!(parse("2/5s"), Ok((2, 5_000)));
        assert_eq!(parse("1/1m"), Ok((1, 60_000)));
        assert_eq!(parse("10/3h"), Ok((10, 3 * 3_600_000)));
        assert_eq!(parse("3/2d"), Ok((3, 2 * 86_400_000)));
    }

    #[test]
    fn parse_malformed() {
        for spec in ["", "5", "5/", "/5s", "5/5", "5/5x", "a/5s", "5/5ss", "-1/5s", "5 / 5s", "1.5/5s"] {
            assert!(
                matches!(parse(spec), Err(ParseRateLimitError::Malformed(_))),
                "{spec:?} should be malformed"
            );
        }
    }

    #[test]
    fn parse_out_of_range() {
        assert!(matches!(parse("0/5s"), Err(ParseRateLimitError::OutOfRange(_))));
        assert!(matches!(parse("5/0s"), Err(ParseRateLimitError::OutOfRange(_))));
        assert!(matches!(
            parse("1/99999999999999999d"),
            Err(ParseRateLimitError::OutOfRange(_))
        ));
    }

    #[test]
    fn rejects_call_over_limit_inside_window() {
        let limiter = RateLimiter::new("2/5s").unwrap();
        let start = Instant::now();

        assert_eq!(limiter.check_at(user(1), start), Decision::Admit);
        assert_eq!(limiter.check_at(user(1), start + ms(300)), Decision::Admit);

        let third = limiter.check_at(user(1), start + ms(600));
        assert_eq!(third, Decision::Reject(ms(4_400)));
        assert_eq!(third.retry_after_ms(), 4_400);
    }

    #[test]
    fn admits_once_oldest_leaves_window() {
        let limiter = RateLimiter::new("2/5s").unwrap();
        let start = Instant::now();

        limiter.check_at(user(1), start);
        limiter.check_at(user(1), start + ms(1_000));
        assert!(!limiter.check_at(user(1), start + ms(4_999)).is_admitted());
        assert!(limiter.check_at(user(1), start + ms(5_000)).is_admitted());
        // the window is now [1000, 5000]
        assert_eq!(limiter.check_at(user(1), start + ms(5_500)), Decision::Reject(ms(500)));
    }

    #[test]
    fn rejected_calls_are_not_recorded() {
        let limiter = RateLimiter::new("1/1s").unwrap();
        let start = Instant::now();

        assert!(limiter.check_at(user(1), start).is_admitted());
        for step in 1..10 {
            assert!(!limiter.check_at(user(1), start + ms(step * 90)).is_admitted());
        }
        assert!(limiter.check_at(user(1), start + ms(1_000)).is_admitted());
    }

    #[test]
    fn spaced_calls_are_always_admitted() {
        let limiter = RateLimiter::new("1/2s").unwrap();
        let start = Instant::now();

        for i in 0..50 {
            assert!(limiter.check_at(user(1), start + ms(i * 2_000)).is_admitted());
        }
    }

    #[test]
    fn invokers_are_independent() {
        let limiter = RateLimiter::new("1/1m").unwrap();
        let now = Instant::now();

        assert!(limiter.check_at(user(1), now).is_admitted());
        assert!(!limiter.check_at(user(1), now).is_admitted());
        assert!(limiter.check_at(user(2), now).is_admitted());
    }

    #[test]
    fn reset_clears_invoker() {
        let limiter = RateLimiter::new("1/1m").unwrap();
        let now = Instant::now();

        limiter.check_at(user(1), now);
        limiter.reset(user(1));
        assert!(limiter.check_at(user(1), now).is_admitted());
    }

    #[test]
    fn not_rate_limited_always_admits() {
        let limiter = RateLimiter::not_rate_limited();
        let now = Instant::now();

        for _ in 0..100 {
            assert_eq!(limiter.check_at(user(1), now), Decision::Admit);
        }
        assert_eq!(limiter.rate_limit(), None);
    }

    #[test]
    fn concurrent_checks_never_over_admit() {
        let limiter = Arc::new(RateLimiter::new("5/1m").unwrap());
        let now = Instant::now();

        let handles = (0..16)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || limiter.check_at(user(7), now).is_admitted())
            })
            .collect::<Vec<_>>();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|admitted| *admitted)
            .count();
        assert_eq!(admitted, 5);
    }
}

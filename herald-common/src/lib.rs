pub mod config;
pub mod macros;
pub mod util;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::util::rate_tracker::RateTracker;
    use super::util::{format_duration, unit_to_millis};

    use super::*;

    #[test]
    fn rate_tracker_evicts_old_samples() {
        let start = Instant::now();
        let mut tracker = RateTracker::new(Duration::from_millis(300));
        tracker.add_sample(start);
        tracker.add_sample(start + Duration::from_millis(200));
        tracker.evict(start + Duration::from_millis(350));
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.oldest(), Some(start + Duration::from_millis(200)));
    }

    #[test]
    fn rate_tracker_evicts_at_window_edge() {
        let start = Instant::now();
        let mut tracker = RateTracker::new(Duration::from_millis(300));
        tracker.add_sample(start);
        tracker.evict(start + Duration::from_millis(300));
        assert!(tracker.is_empty());
    }

    #[test]
    fn rate_tracker_keeps_recent() {
        let start = Instant::now();
        let mut tracker = RateTracker::new(Duration::from_millis(300));
        tracker.add_sample(start);
        tracker.evict(start + Duration::from_millis(299));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn rate_tracker_none() {
        let tracker = RateTracker::new(Duration::from_millis(300));
        assert_eq!(tracker.oldest(), None);
    }

    #[test]
    fn units() {
        assert_eq!(unit_to_millis("s"), Some(1000));
        assert_eq!(unit_to_millis("d"), Some(86_400_000));
        assert_eq!(unit_to_millis("w"), None);
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(4150)), "4.2s");
        assert_eq!(format_duration(Duration::from_secs(190)), "3m 10s");
        assert_eq!(format_duration(Duration::from_secs(86400 + 3600)), "1d 1h");
    }

    #[test]
    fn partial_config() {
        let config = config::parse("owners = [1, 2]\n[prefix]\ndefault = \"?\"").unwrap();
        assert!(config.is_owner(2));
        assert_eq!(config.prefix.default, "?");
        assert_eq!(config.localization.default_lang, "en_us");
        assert!(config.dev.prefix_override.is_none());
    }
}

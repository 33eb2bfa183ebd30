use std::time::{Duration, Instant};

use crate::error::ItdashError;

/// Call `check` until it returns `true` or `timeout` elapses.
///
/// `check` always runs at least once, so a zero timeout is a single probe.
/// Returns `Ok(false)` on timeout; errors from `check` end the wait.
pub fn poll_until<F>(timeout: Duration, interval: Duration, mut check: F) -> Result<bool, ItdashError>
where
    F: FnMut() -> Result<bool, ItdashError>,
{
    let start = Instant::now();
    loop {
        if check()? {
            return Ok(true);
        }
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Ok(false);
        }
        std::thread::sleep(interval.min(timeout - elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_once_condition_holds() {
        let mut calls = 0;
        let met = poll_until(Duration::from_secs(5), Duration::from_millis(1), || {
            calls += 1;
            Ok(calls == 3)
        })
        .unwrap();
        assert!(met);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_zero_timeout_probes_once() {
        let mut calls = 0;
        let met = poll_until(Duration::ZERO, Duration::from_millis(50), || {
            calls += 1;
            Ok(false)
        })
        .unwrap();
        assert!(!met);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_times_out() {
        let start = Instant::now();
        let met = poll_until(Duration::from_millis(30), Duration::from_millis(5), || Ok(false))
            .unwrap();
        assert!(!met);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_check_error_propagates() {
        let result = poll_until(Duration::from_secs(1), Duration::from_millis(1), || {
            Err(ItdashError::Browser("tab crashed".into()))
        });
        assert!(matches!(result, Err(ItdashError::Browser(_))));
    }
}

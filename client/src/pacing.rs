use std::time::Duration;

use crate::config::AiSpeed;

/// How long to hold back a computed reply, and when to announce that the
/// computer is thinking. Both are measured from when the move was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPlan {
    pub thinking_notice_after: Option<Duration>,
    pub remaining_delay: Duration,
}

/// The notice timer starts together with the computation, so time already
/// spent computing counts against both the delay and the threshold.
pub fn plan_reply(speed: AiSpeed, compute_time: Duration) -> PacingPlan {
    let remaining_delay = speed.move_delay().saturating_sub(compute_time);
    let total_wait = compute_time + remaining_delay;
    let threshold = speed.thinking_threshold();

    let thinking_notice_after = (total_wait > threshold)
        .then(|| threshold.saturating_sub(compute_time));

    PacingPlan {
        thinking_notice_after,
        remaining_delay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_reply_shows_no_notice() {
        let plan = plan_reply(AiSpeed::Fast, Duration::from_millis(2));
        assert_eq!(plan.remaining_delay, Duration::from_millis(48));
        assert_eq!(plan.thinking_notice_after, None);
    }

    #[test]
    fn test_slow_computation_skips_delay_and_shows_notice_immediately() {
        let plan = plan_reply(AiSpeed::Fast, Duration::from_millis(150));
        assert_eq!(plan.remaining_delay, Duration::ZERO);
        assert_eq!(plan.thinking_notice_after, Some(Duration::ZERO));
    }

    #[test]
    fn test_smooth_reply_announces_thinking() {
        let plan = plan_reply(AiSpeed::Smooth, Duration::from_millis(10));
        assert_eq!(plan.remaining_delay, Duration::from_millis(590));
        assert_eq!(plan.thinking_notice_after, Some(Duration::from_millis(40)));
    }

    #[test]
    fn test_notice_never_after_reply() {
        for speed in AiSpeed::ALL {
            for compute_ms in [0u64, 1, 49, 50, 99, 100, 299, 650] {
                let plan = plan_reply(speed, Duration::from_millis(compute_ms));
                if let Some(after) = plan.thinking_notice_after {
                    assert!(after <= plan.remaining_delay, "{} {}", speed, compute_ms);
                }
            }
        }
    }
}

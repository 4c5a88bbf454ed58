use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Awaits the artificial delays that pace tool runs and generation stages.
#[async_trait]
pub trait Pacer: Send + Sync + Debug {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer for the full duration
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately; used by tests and `AGENT_DECK_PACING=off`
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self, _duration: Duration) {}
}

pub type SharedPacer = Arc<dyn Pacer>;

pub fn pacer_for(enabled: bool) -> SharedPacer {
    if enabled {
        Arc::new(TokioPacer)
    } else {
        Arc::new(NoPacing)
    }
}

/// Fixed base plus a random jitter in `[0, jitter_ms)`.
pub(crate) fn jittered(base_ms: u64, jitter_ms: u64, rng: &mut impl rand::Rng) -> Duration {
    let extra = if jitter_ms == 0 {
        0
    } else {
        rng.gen_range(0..jitter_ms)
    };
    Duration::from_millis(base_ms + extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Instant;

    #[tokio::test]
    async fn test_no_pacing_returns_immediately() {
        let start = Instant::now();
        NoPacing.pause(Duration::from_secs(5)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let d = jittered(1000, 2000, &mut rng);
            assert!(d >= Duration::from_millis(1000));
            assert!(d < Duration::from_millis(3000));
        }
        assert_eq!(jittered(500, 0, &mut rng), Duration::from_millis(500));
    }
}

use crate::domain::ports::PopularityOracle;

pub const DEFAULT_THRESHOLD: u64 = 10_000;

/// Allows an install only when the module is popular enough on the registry.
pub struct TrustGate<O: PopularityOracle> {
    oracle: O,
    threshold: u64,
}

impl<O: PopularityOracle> TrustGate<O> {
    pub fn with_threshold(oracle: O, threshold: u64) -> Self {
        Self { oracle, threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Any oracle failure counts as untrusted.
    pub async fn is_trusted(&self, name: &str) -> bool {
        match self.oracle.downloads(name).await {
            Ok(downloads) => {
                tracing::debug!(
                    "{} has {} downloads in the last 30 days (threshold {})",
                    name,
                    downloads,
                    self.threshold
                );
                downloads > self.threshold
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not verify popularity of {}: {}", name, e);
                false
            }
        }
    }
}

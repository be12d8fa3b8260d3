use std::time::Duration;

/// Configuration for a single download.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use deckpatch_fetch::FetchOptions;
///
/// let options = FetchOptions::default()
///     .timeout(Duration::from_secs(10))
///     .expected_sha256("ab".repeat(32));
/// assert_eq!(options.timeout, Some(Duration::from_secs(10)));
/// ```
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Whole-request timeout. `None` disables it, so a stalled server blocks forever.
    pub timeout: Option<Duration>,
    /// Digest the body must match, hex encoded.
    pub expected_sha256: Option<String>,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            expected_sha256: None,
            user_agent: concat!("deckpatch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn expected_sha256(mut self, hex: impl Into<String>) -> Self {
        self.expected_sha256 = Some(hex.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_builders() {
        assert_eq!(FetchOptions::default().timeout, Some(Duration::from_secs(60)));
        assert_eq!(FetchOptions::default().no_timeout().timeout, None);
        assert_eq!(
            FetchOptions::default().no_timeout().timeout(Duration::from_secs(5)).timeout,
            Some(Duration::from_secs(5))
        );
    }
}

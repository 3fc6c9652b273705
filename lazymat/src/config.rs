//! Assignment configuration
//!
//! Controls when the parallel tier splits an assignment across rayon's
//! worker threads and how finely the destination is striped.

use lazymat_core::constants::{SMP_ASSIGN_THRESHOLD, STRIPES_PER_THREAD};
use lazymat_core::{Error, Result};

/// Configuration for parallel-capable assignment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssignConfig {
    /// Minimum number of destination elements before work is split
    pub smp_threshold: usize,
    /// Whether the parallel tier may be used at all
    pub parallel: bool,
    /// Number of stripes handed to each worker thread
    pub stripes_per_thread: usize,
}

impl AssignConfig {
    /// Config that never leaves the calling thread
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Set the parallel threshold in destination elements
    pub fn with_smp_threshold(mut self, smp_threshold: usize) -> Self {
        self.smp_threshold = smp_threshold;
        self
    }

    /// Enable or disable the parallel tier
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set how many stripes each worker thread receives
    pub fn with_stripes_per_thread(mut self, stripes_per_thread: usize) -> Self {
        self.stripes_per_thread = stripes_per_thread;
        self
    }

    /// Reject settings the parallel tier cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.stripes_per_thread == 0 {
            return Err(Error::InvalidConfig("stripes_per_thread must be at least 1"));
        }
        Ok(())
    }

    /// Whether an assignment of `elements` destination elements goes parallel
    pub fn goes_parallel(&self, elements: usize) -> bool {
        self.parallel && elements >= self.smp_threshold
    }

    /// Number of major lanes per stripe for a destination with `majors` lanes
    pub fn stripe_len(&self, majors: usize) -> usize {
        let workers = rayon::current_num_threads() * self.stripes_per_thread.max(1);
        majors.div_ceil(workers).max(1)
    }
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            smp_threshold: SMP_ASSIGN_THRESHOLD,
            parallel: true,
            stripes_per_thread: STRIPES_PER_THREAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AssignConfig::default()
            .with_smp_threshold(16)
            .with_stripes_per_thread(4);
        assert_eq!(config.smp_threshold, 16);
        assert_eq!(config.stripes_per_thread, 4);
        assert!(config.parallel);
        assert!(config.goes_parallel(16));
        assert!(!config.goes_parallel(15));
        assert!(!AssignConfig::serial().goes_parallel(usize::MAX));
    }

    #[test]
    fn test_validate() {
        assert!(AssignConfig::default().validate().is_ok());
        let broken = AssignConfig::default().with_stripes_per_thread(0);
        assert!(matches!(broken.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_stripe_len_covers_all_lanes() {
        let config = AssignConfig::default();
        let workers = rayon::current_num_threads() * config.stripes_per_thread;
        let len = config.stripe_len(1000);
        assert!(len * workers >= 1000);
        assert_eq!(config.stripe_len(0), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = AssignConfig::default().with_smp_threshold(1024);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AssignConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: AssignConfig = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
        assert!(!partial.parallel);
        assert_eq!(partial.smp_threshold, SMP_ASSIGN_THRESHOLD);
    }
}

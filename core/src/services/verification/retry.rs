//! Failed attempt guard.

/// Counts failed verification attempts against a hard maximum.
///
/// The count never exceeds the maximum and only two things reset it: a
/// newly issued code or a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryGuard {
    failures: u32,
    max_attempts: u32,
}

impl RetryGuard {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            failures: 0,
            max_attempts,
        }
    }

    /// Record one failed attempt.
    ///
    /// Returns `true` when this failure used up the last attempt.
    pub fn record_failure(&mut self) -> bool {
        if self.failures < self.max_attempts {
            self.failures += 1;
        }
        self.is_exhausted()
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }

    /// Whether no attempts remain
    pub fn is_exhausted(&self) -> bool {
        self.failures >= self.max_attempts
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Attempts left before the guard blocks
    pub fn remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.failures)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

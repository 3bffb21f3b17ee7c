use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SantaError};

/// Number of participants in one exchange, validated to be at least two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct GroupSize(usize);

impl GroupSize {
    /// Smallest group for which a self-free assignment exists.
    pub const MIN: usize = 2;

    /// Validates a participant count.
    pub fn new(n: usize) -> Result<Self, SantaError> {
        if n < Self::MIN {
            return Err(group_size_error(n as i64));
        }
        Ok(Self(n))
    }

    /// Returns the participant count.
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for GroupSize {
    type Error = SantaError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw < Self::MIN as i64 {
            return Err(group_size_error(raw));
        }
        let n = usize::try_from(raw).map_err(|_| group_size_error(raw))?;
        Self::new(n)
    }
}

impl From<GroupSize> for i64 {
    fn from(size: GroupSize) -> Self {
        size.0 as i64
    }
}

fn group_size_error(raw: i64) -> SantaError {
    SantaError::InvalidArgument(
        ErrorInfo::new("group_size", "group size must be at least 2")
            .with_context("n", raw)
            .with_hint("nobody may draw themselves, so at least two participants are needed"),
    )
}

/// Number of Monte Carlo trials, validated to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TrialCount(u64);

impl TrialCount {
    /// Default trial budget used by the Monte Carlo path.
    pub const DEFAULT: u64 = 100_000;

    /// Validates a trial count.
    pub fn new(trials: u64) -> Result<Self, SantaError> {
        if trials == 0 {
            return Err(trial_count_error(0));
        }
        Ok(Self(trials))
    }

    /// Returns the trial count.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for TrialCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for TrialCount {
    type Error = SantaError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw <= 0 {
            return Err(trial_count_error(raw));
        }
        Self::new(raw as u64)
    }
}

impl From<TrialCount> for i64 {
    fn from(trials: TrialCount) -> Self {
        i64::try_from(trials.0).unwrap_or(i64::MAX)
    }
}

fn trial_count_error(raw: i64) -> SantaError {
    SantaError::InvalidArgument(
        ErrorInfo::new("trial_count", "trial count must be positive").with_context("trials", raw),
    )
}

/// Complete mapping from giver index to recipient index.
///
/// Position `i` holds the recipient of participant `i`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    /// Wraps a recipient vector without validation.
    pub fn from_recipients(recipients: Vec<usize>) -> Self {
        Self(recipients)
    }

    /// Recipients in giver order.
    pub fn recipients(&self) -> &[usize] {
        &self.0
    }

    /// Number of participants covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the assignment covers nobody.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when nobody gives to themselves and every recipient is used exactly once.
    pub fn is_derangement(&self) -> bool {
        let n = self.0.len();
        let mut seen = vec![false; n];
        for (giver, &recipient) in self.0.iter().enumerate() {
            if recipient == giver || recipient >= n || seen[recipient] {
                return false;
            }
            seen[recipient] = true;
        }
        true
    }
}

use std::fmt;
use std::str::FromStr;

use santa_core::{ErrorInfo, SantaError};
use serde::{Deserialize, Serialize};

/// How the last participant is handled when only their own name is left.
///
/// Participants always draw in index order, each uniformly among the
/// remaining recipients other than themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Procedure {
    /// A draw that leaves the last participant with themselves is discarded.
    /// Probabilities are conditional on the draw completing.
    #[default]
    Ordered,
    /// The stuck last participant swaps with one of the earlier participants,
    /// chosen uniformly.
    SwapRepair,
}

impl Procedure {
    /// Stable identifier used in configs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Procedure::Ordered => "ordered",
            Procedure::SwapRepair => "swap-repair",
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Procedure {
    type Err = SantaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(Procedure::Ordered),
            "swap-repair" => Ok(Procedure::SwapRepair),
            other => Err(SantaError::InvalidArgument(
                ErrorInfo::new("procedure", "unknown draw procedure")
                    .with_context("value", other)
                    .with_hint("expected `ordered` or `swap-repair`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("ordered".parse::<Procedure>().unwrap(), Procedure::Ordered);
        assert_eq!(
            "swap-repair".parse::<Procedure>().unwrap(),
            Procedure::SwapRepair
        );
        assert!("random".parse::<Procedure>().is_err());
        assert_eq!(Procedure::default(), Procedure::Ordered);
    }
}

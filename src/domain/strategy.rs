//! Strategy registry.

use std::fmt;
use std::str::FromStr;

use super::error::DcaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKey {
    /// Single asset, contribution scaled by the MA250 + drawdown ratio rule.
    Ma250Drawdown,
    /// Two assets, fixed monthly split plus tiered dip buying from a yearly reserve.
    EtfDcaDipBuy,
}

impl StrategyKey {
    pub const ALL: [StrategyKey; 2] = [StrategyKey::Ma250Drawdown, StrategyKey::EtfDcaDipBuy];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKey::Ma250Drawdown => "ma250_drawdown",
            StrategyKey::EtfDcaDipBuy => "etf_dca_dip_buy",
        }
    }

    /// Comma-separated, sorted list of every key.
    pub fn available() -> String {
        let mut keys: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys.join(", ")
    }
}

impl fmt::Display for StrategyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKey {
    type Err = DcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| DcaError::UnknownStrategy {
                key: key.to_string(),
                available: Self::available(),
            })
    }
}

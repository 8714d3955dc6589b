//! Two-asset dip-buying tiers.
//!
//! Tiers are evaluated in order and the first match wins. The drawdown is the
//! worse of the two assets' 126-session drawdowns; the index reading is the
//! market volatility index for that day, when one exists.
//!
//! | tier       | condition                              | extra                    |
//! |------------|----------------------------------------|--------------------------|
//! | extreme    | dd <= -35%                             | 50% of remaining pool    |
//! | large+fear | dd <= -25% and index > 25              | 100% of monthly total    |
//! | moderate   | dd <= -15%                             | 50% of monthly total     |
//! | mild+fear  | -14% <= dd <= -8% and index > 20       | 25% of monthly total     |
//! | normal     | otherwise                              | none                     |

use std::fmt;

/// Sessions in the trailing-high window used for tier drawdowns.
pub const TIER_DRAWDOWN_WINDOW: usize = 126;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    Extreme,
    LargeFear,
    Moderate,
    MildFear,
    Normal,
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TierKind::Extreme => "extreme",
            TierKind::LargeFear => "large+fear",
            TierKind::Moderate => "moderate",
            TierKind::MildFear => "mild+fear",
            TierKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierCondition {
    DrawdownAtMost(f64),
    DrawdownAtMostWithIndexAbove { drawdown: f64, index: f64 },
    DrawdownWithinWithIndexAbove { lower: f64, upper: f64, index: f64 },
    Always,
}

impl TierCondition {
    /// A missing index reading fails index-gated conditions only.
    pub fn matches(&self, drawdown: f64, index: Option<f64>) -> bool {
        let index_above = |threshold: f64| index.is_some_and(|v| v > threshold);
        match *self {
            TierCondition::DrawdownAtMost(limit) => drawdown <= limit,
            TierCondition::DrawdownAtMostWithIndexAbove {
                drawdown: limit,
                index: threshold,
            } => drawdown <= limit && index_above(threshold),
            TierCondition::DrawdownWithinWithIndexAbove {
                lower,
                upper,
                index: threshold,
            } => lower <= drawdown && drawdown <= upper && index_above(threshold),
            TierCondition::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtraContribution {
    /// Fraction of the reserve pool's remaining balance.
    PoolShare(f64),
    /// Fraction of the configured monthly base total.
    BaseShare(f64),
    Nothing,
}

impl ExtraContribution {
    /// Requested extra amount before the pool cap is applied.
    pub fn requested(&self, monthly_total: f64, pool_remaining: f64) -> f64 {
        match *self {
            ExtraContribution::PoolShare(share) => pool_remaining * share,
            ExtraContribution::BaseShare(share) => monthly_total * share,
            ExtraContribution::Nothing => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRule {
    pub kind: TierKind,
    pub condition: TierCondition,
    pub extra: ExtraContribution,
    pub note: &'static str,
}

pub const TIERS: [TierRule; 5] = [
    TierRule {
        kind: TierKind::Extreme,
        condition: TierCondition::DrawdownAtMost(-0.35),
        extra: ExtraContribution::PoolShare(0.5),
        note: "extreme market: deploy 50% of the remaining reserve",
    },
    TierRule {
        kind: TierKind::LargeFear,
        condition: TierCondition::DrawdownAtMostWithIndexAbove {
            drawdown: -0.25,
            index: 25.0,
        },
        extra: ExtraContribution::BaseShare(1.0),
        note: "large drawdown with fear: add 100% (index > 25)",
    },
    TierRule {
        kind: TierKind::Moderate,
        condition: TierCondition::DrawdownAtMost(-0.15),
        extra: ExtraContribution::BaseShare(0.5),
        note: "common correction: add 50%",
    },
    TierRule {
        kind: TierKind::MildFear,
        condition: TierCondition::DrawdownWithinWithIndexAbove {
            lower: -0.14,
            upper: -0.08,
            index: 20.0,
        },
        extra: ExtraContribution::BaseShare(0.25),
        note: "moderate pullback with fear: add 25% (index > 20)",
    },
    TierRule {
        kind: TierKind::Normal,
        condition: TierCondition::Always,
        extra: ExtraContribution::Nothing,
        note: "normal volatility: base contribution only",
    },
];

/// First tier whose condition holds.
pub fn select_tier(worst_drawdown: f64, index: Option<f64>) -> &'static TierRule {
    TIERS
        .iter()
        .find(|tier| tier.condition.matches(worst_drawdown, index))
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

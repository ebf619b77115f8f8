//! Derived supply records handed to the presentation layer.

use crate::domain::Decimal;
use serde::Serialize;

/// Partition of the initial supply into display segments.
///
/// The five `*_circulating` fields sum to `circulating_supply`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyBreakdown {
    pub total_supply: Decimal,
    pub circulating_supply: Decimal,
    pub other_circulating: Decimal,
    pub staked_circulating: Decimal,
    pub perp_dex_circulating: Decimal,
    pub assistance_circulating: Decimal,
    pub evm_circulating: Decimal,
    pub burned_trading_fees: Decimal,
    pub burned_evm: Decimal,
    pub non_circulating_future_emissions: Decimal,
    pub non_circulating_other: Decimal,
    pub ready_for_sale_supply: Decimal,
}

impl SupplyBreakdown {
    pub fn circulating_segments_total(&self) -> Decimal {
        self.other_circulating
            + self.staked_circulating
            + self.perp_dex_circulating
            + self.assistance_circulating
            + self.evm_circulating
    }
}

/// Which slice of the supply donut a segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    CirculatingOther,
    CirculatingEvm,
    CirculatingStaked,
    CirculatingPerpDexs,
    CirculatingAssistance,
    BurnTradingFees,
    NonCirculatingEmissions,
    NonCirculatingOther,
}

impl SegmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            SegmentKind::CirculatingOther => "Circulating Supply: Other",
            SegmentKind::CirculatingEvm => "Circulating Supply: HyperEVM",
            SegmentKind::CirculatingStaked => "Circulating Supply: Staked",
            SegmentKind::CirculatingPerpDexs => "Circulating Supply: HIP-3 Builder Stakes",
            SegmentKind::CirculatingAssistance => "Circulating Supply: Assistance Fund",
            SegmentKind::BurnTradingFees => "Burn From Trading Fees",
            SegmentKind::NonCirculatingEmissions => "Non Circulating Supply: Future Emissions",
            SegmentKind::NonCirculatingOther => "Non Circulating Supply: Other",
        }
    }

    pub fn is_circulating(&self) -> bool {
        matches!(
            self,
            SegmentKind::CirculatingOther
                | SegmentKind::CirculatingEvm
                | SegmentKind::CirculatingStaked
                | SegmentKind::CirculatingPerpDexs
                | SegmentKind::CirculatingAssistance
        )
    }
}

/// One donut segment.
///
/// `amount` drives the rendered arc and may be floored to stay visible;
/// `display_amount` is the true figure for tooltips and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub kind: SegmentKind,
    pub label: &'static str,
    pub amount: Decimal,
    pub display_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circulating_supply: Option<Decimal>,
}

impl Segment {
    pub fn new(kind: SegmentKind, display_amount: Decimal) -> Self {
        Self {
            kind,
            label: kind.label(),
            amount: display_amount,
            display_amount,
            circulating_supply: None,
        }
    }

    /// Raise the visual amount to `floor` without touching the true amount.
    pub fn with_visual_floor(mut self, floor: Decimal) -> Self {
        self.amount = self.display_amount.max(floor);
        self
    }

    pub fn with_circulating_supply(mut self, circulating_supply: Decimal) -> Self {
        self.circulating_supply = Some(circulating_supply);
        self
    }

    /// `display_amount / denominator`; `None` for a zero denominator.
    pub fn share_of(&self, denominator: Decimal) -> Option<Decimal> {
        self.display_amount.checked_div(denominator)
    }
}

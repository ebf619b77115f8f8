//! Donut segments for the supply chart.

use crate::domain::{Decimal, Segment, SegmentKind, SupplyBreakdown};
use crate::engine::SupplyAccountant;

/// Build the eight supply segments in display order.
///
/// The perp-dex and trading-burn slices are tiny relative to the supply, so
/// their visual amount is raised to the minimum visible size; the true value
/// stays in `display_amount`.
pub fn donut_segments(
    accountant: &SupplyAccountant,
    breakdown: &SupplyBreakdown,
    min_visible_percent: Decimal,
) -> Vec<Segment> {
    let floor = accountant.minimum_visible_segment(breakdown.total_supply, min_visible_percent);
    let circ = breakdown.circulating_supply;

    vec![
        Segment::new(SegmentKind::CirculatingOther, breakdown.other_circulating)
            .with_circulating_supply(circ),
        Segment::new(SegmentKind::CirculatingEvm, breakdown.evm_circulating)
            .with_circulating_supply(circ),
        Segment::new(SegmentKind::CirculatingStaked, breakdown.staked_circulating)
            .with_circulating_supply(circ),
        Segment::new(SegmentKind::CirculatingPerpDexs, breakdown.perp_dex_circulating)
            .with_visual_floor(floor)
            .with_circulating_supply(circ),
        Segment::new(SegmentKind::CirculatingAssistance, breakdown.assistance_circulating)
            .with_circulating_supply(circ),
        Segment::new(SegmentKind::BurnTradingFees, breakdown.burned_trading_fees)
            .with_visual_floor(floor),
        Segment::new(
            SegmentKind::NonCirculatingEmissions,
            breakdown.non_circulating_future_emissions,
        ),
        Segment::new(SegmentKind::NonCirculatingOther, breakdown.non_circulating_other),
    ]
}

//! Pure computation for supply accounting and dashboard figures. No I/O.

pub mod accountant;
pub mod fees;
pub mod heatmap;
pub mod moving_average;
pub mod rank;
pub mod segments;
pub mod ticker;

pub use accountant::{
    AccountingPolicy, ReadyForSaleExclusions, ReadyForSaleInputs, SupplyAccountant,
};
pub use fees::fee_windows;
pub use heatmap::{years_to_buy_grid, HeatmapCell, HeatmapRow, PRICE_ROWS};
pub use moving_average::{combine_price_revenue, moving_average};
pub use rank::{first_rank_above_balance, to_ordinal};
pub use segments::donut_segments;
pub use ticker::{MarketFigures, PriceChange, TickerStats};

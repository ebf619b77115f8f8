pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use datasource::{DataSource, DataSourceError, HyperliquidDataSource, MockDataSource};
pub use domain::{
    Address, Coin, Decimal, ExternalBalances, SupplyBreakdown, TokenSupplyInfo,
};
pub use engine::{ReadyForSaleExclusions, SupplyAccountant};
pub use error::AppError;
pub use orchestration::{Poller, SnapshotStore};

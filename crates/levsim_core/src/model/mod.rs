mod estimate;
mod params;
mod paths;
mod series;
mod summary;

pub use estimate::MarketEstimate;
pub use params::{DailyParameters, RETURN_FLOOR, SimulationParameters, TRADING_DAYS_PER_YEAR};
pub use paths::PathMatrix;
pub use series::{PriceBar, PriceSeries};
pub use summary::{PercentileSet, SummaryStatistics};

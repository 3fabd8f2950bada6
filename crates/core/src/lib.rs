pub mod chain;
pub mod config;
pub mod config_loader;
pub mod pricing;
pub mod report;
pub mod risk;
pub mod scanner;
pub mod strategies;
pub mod traits;
pub mod types;
pub mod volatility;

pub use chain::{ChainFilter, OptionsChain};
pub use config::{AlpacaConfig, AppConfig, ConfigError, LessonConfig};
pub use config_loader::ConfigLoader;
pub use pricing::{Moneyness, PayoffScenario, ValueBreakdown};
pub use report::Report;
pub use risk::{ExitAction, RiskRules};
pub use scanner::{ScanCandidate, ScanDirection, Scanner, ScannerConfig};
pub use strategies::{CoveredCall, PremiumSource, ProtectivePut};
pub use traits::{Broker, MarketData};
pub use types::{
    AccountSummary, DailyBar, OptionContract, OptionGreeks, OptionRight, OptionSnapshot, Order,
    OrderSide, Position, StockQuote,
};
pub use volatility::IvRegime;

pub mod config;
pub mod engine;
pub mod estimate;
pub mod format;
pub mod insights;
pub mod output;
pub mod ranking;
pub mod rate_limit;
pub mod reference;
pub mod resolver;
pub mod server;
pub mod sweet_spot;
pub mod transfer;
pub mod types;
pub mod valuation;
pub mod wallet;

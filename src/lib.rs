pub mod aggregator;
pub mod clients;
pub mod config;
pub mod logger;
pub mod market_time;
pub mod models;
pub mod normalize;
pub mod scoring;

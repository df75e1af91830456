pub mod algorithm;
pub mod app_cache;
pub mod cluster;
pub mod config;

pub use algorithm::cluster_access_logs;
pub use config::ClusteringConfig;

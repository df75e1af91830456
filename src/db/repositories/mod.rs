pub mod access_logs;
pub mod apps;

pub use access_logs::AccessLogRepository;
pub use apps::AppRepository;

pub mod access_log;
pub mod app;
pub mod data_type;
pub mod visit;

pub use access_log::{AccessLogEntry, OperationType};
pub use app::AppMetadata;
pub use data_type::{DataType, HealthDataCategory};
pub use visit::Visit;

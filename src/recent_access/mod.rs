pub mod controller;
pub mod error;
pub mod loader;
pub mod state;

pub use controller::RecentAccessController;
pub use error::RecentAccessError;
pub use loader::RecentAccessLoader;
pub use state::RecentAccessState;

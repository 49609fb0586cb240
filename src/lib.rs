pub mod cli;
pub mod config;
pub mod executor;
pub mod host;
pub mod ui;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use executor::ParallelExecutor;
pub use host::HostTarget;

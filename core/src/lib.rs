pub mod cli;
pub mod config;
pub mod errors;
pub mod report;
pub mod scenario;
pub mod scheduler;
pub mod simulator;
pub mod types;

// Re-export main types
pub use errors::CaptureError;
pub use types::*;

// Re-export the simulator API for convenience
pub use scheduler::{Scheduler, TaskHandle, VirtualScheduler};
pub use simulator::{simulate, CaptureSimulator, ExecutionLog};

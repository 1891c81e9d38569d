pub mod config;
pub mod log_entry;
pub mod task;
pub mod user;

pub use config::*;
pub use log_entry::*;
pub use task::*;
pub use user::*;

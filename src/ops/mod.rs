pub mod task_ops;
pub mod task_service;

pub use task_service::{ServiceError, TaskService};

//! Plain-text persistence and query core for a single-user task tracker:
//! credential, task, and audit-log stores plus the task service the
//! `tb` command line drives.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod parse;

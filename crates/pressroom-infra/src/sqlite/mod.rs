//! SQLite storage for local session state.

pub mod pool;
pub mod session;

// Library module for renash
// Re-exports modules for use in integration tests and the binary

pub mod logging;
pub mod rename;

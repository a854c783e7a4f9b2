// Export I/O operations

pub mod payload;
pub mod xlsx;

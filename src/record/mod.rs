mod entry;
mod set;


pub use entry::Record;
pub use set::RecordSet;

/// Index of a record within its input sequence
pub type RecordIndex = usize;

/// Document model subsystem - the text threaded through a run
///
/// A run reads its whole input into one `Document`, folds every command over
/// it, and serializes the result once at the end.

pub mod document;

// Re-export main types for convenience
pub use document::Document;

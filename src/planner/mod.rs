/// Lessons and partial updates
mod lesson;
/// The lesson catalog: lookup, updates, grouping
mod catalog;
/// Study sessions, the only deferred computation
mod session;

pub use lesson::*;
pub use catalog::*;
pub use session::*;

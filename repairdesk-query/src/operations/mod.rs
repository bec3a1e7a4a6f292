//! Query operations handed to a [`Repository`](crate::Repository).

mod find_many;

pub use find_many::FindMany;

//! Store abstraction: traits and query types.

mod query;
mod traits;

pub use query::{MapFilter, MapQuery, MapSort};
pub use traits::{RecordStore, UserStore};

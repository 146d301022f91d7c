pub mod key;
pub mod lister;

pub use key::{embedded_end_time, KeyError};
pub use lister::list_candidates;

pub mod filter;
pub mod record;
pub mod stream;

pub use filter::{drain_object, InvalidWindow, ObjectVerdict, TimeWindow};
pub use record::{DecodeError, EventRecord};
pub use stream::gzip_lines;

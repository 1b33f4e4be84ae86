/*!
# IO utilities

Content types of the produced outputs, and the diagnostic dump of a corpus.
!*/
mod mime;
pub mod persist;

pub use mime::mimetype;
pub use persist::persist_json;

//! Request types

mod body;
mod composed;
mod draft;
mod key_value;
mod method;

pub use body::{BodyType, RequestBody};
pub use composed::{ComposedRequest, StringMap};
pub use draft::{DEFAULT_BODY, DraftBaseline, DraftRequest, StoredDraft};
pub use key_value::{KeyValue, filled_rows, with_trailing_blank};
pub use method::HttpMethod;

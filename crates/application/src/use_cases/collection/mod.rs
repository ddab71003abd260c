//! Collection use cases.

mod delete_collection;
mod list_collections;
mod run_collection;
mod save_collection;

pub use delete_collection::DeleteCollection;
pub use list_collections::ListCollections;
pub use run_collection::RunCollection;
pub use save_collection::SaveCollection;

use crate::error::ApplicationError;
use crate::ports::GatewayError;

fn collection_error(error: GatewayError, id: u64) -> ApplicationError {
    if error.is_not_found() {
        ApplicationError::NotFound(format!("collection {id}"))
    } else {
        error.into()
    }
}

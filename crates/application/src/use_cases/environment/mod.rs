//! Environment management use cases.

mod delete_environment;
mod get_environment;
mod list_environments;
mod save_environment;
mod set_default_environment;

pub use delete_environment::DeleteEnvironment;
pub use get_environment::GetEnvironment;
pub use list_environments::{ListEnvironments, ListEnvironmentsOutput};
pub use save_environment::SaveEnvironment;
pub use set_default_environment::SetDefaultEnvironment;

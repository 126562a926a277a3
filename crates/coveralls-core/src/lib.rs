pub mod error;
pub mod id;
pub mod resource;

pub use error::ErrorCategory;
pub use id::{ID_SEPARATOR, IdError, RepositoryId, decode, encode};
pub use resource::ManagedResourceRecord;

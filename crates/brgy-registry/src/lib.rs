//! Resident registration core: form assembly and validation, typed access to
//! the resident store, demographic statistics and screen navigation.

pub mod choices;
pub mod form;
pub mod navigation;
pub mod record;
pub mod registry;
pub mod statistics;
pub mod validation;

pub use form::ResidentForm;
pub use record::{RegisteredResident, Resident};
pub use registry::Registry;
pub use statistics::{AgeBucket, Demographics};
pub use validation::ValidationError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("resident {0} does not exist")]
    NotFound(i32),
    #[error("resident database error: {0}")]
    Store(#[from] brgy_db::Error),
    #[error("resident {id} has an unreadable {field}: {value:?}")]
    InvalidStoredValue {
        id: i32,
        field: &'static str,
        value: String,
    },
}

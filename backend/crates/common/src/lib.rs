pub mod error;

pub use error::{SprintcovError, SprintcovResult};

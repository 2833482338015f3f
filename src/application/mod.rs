//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod display;
pub mod error;
pub mod error_ext;
pub mod report;
pub mod services;

pub use display::TreeDisplay;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use report::{balance_factor_line, dot_source};

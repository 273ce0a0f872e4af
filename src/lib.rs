pub mod ci;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod outputs;
pub mod resolver;
pub mod ui;

pub use error::{ReleaseVarsError, Result};
pub use resolver::{run, ReleaseInput, ReleaseOutput, Resolver};

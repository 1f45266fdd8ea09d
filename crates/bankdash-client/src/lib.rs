pub mod aggregate;
pub mod analytics;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod input;
pub mod model;
pub mod refresh;
pub mod source;

pub use contracts::envelope::{CommandName, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = "v1";

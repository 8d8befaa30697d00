pub mod cli;
pub mod converter;
pub mod error;
pub mod logger;

pub use cli::Cli;
pub use converter::{convert, dispatch, run, ConversionProgram, Invocation};
pub use error::{DispatchError, DispatchResult};

//! cliclack-based interactive generation flow

pub mod prompts;

pub use prompts::{run, CreateArgs};

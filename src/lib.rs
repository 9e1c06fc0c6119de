//! # appforge
//!
//! A thin HTTP service that chains an LLM completion API with a remote
//! code-execution backend.
//!
//! ## Request flow
//!
//! 1. Receive a task description (and optionally a technology stack) via the API
//! 2. If no stack was given, ask the model to suggest one
//! 3. Ask the model to generate application code for the task and stack
//! 4. Submit the code to the execution backend
//! 5. If execution reports an error, ask the model once to refine the code
//!    using the error text
//!
//! Each request is independent and stateless; nothing persists past the
//! response.
//!
//! ## Example
//!
//! ```rust,ignore
//! use appforge::{api, config::Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod api;
pub mod config;
pub mod executor;
pub mod llm;
pub mod pipeline;

pub use config::Config;

#[cfg(test)]
pub(crate) mod testutil;

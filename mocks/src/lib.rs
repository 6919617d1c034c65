//! Test doubles and fixtures for the JIRA bridge
//!
//! - [`MockAuthResolver`] - configurable credential collaborator with call tracking
//! - [`fixtures`] - canned JIRA task records and DevOps Center response bodies

pub mod fixtures;
pub mod resolver;

pub use fixtures::*;
pub use resolver::MockAuthResolver;

//! Foundation types for the protograph toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`EntityId`] - Stable handle of an entity in the graph arena
//! - [`Position`], [`Span`] - Source positions carried by source-code-info records
//!
//! This module has NO dependencies on other protograph modules.

mod id;
mod span;

pub use id::EntityId;
pub(crate) use id::MAX_ENTITIES;
pub use span::{Position, Span};

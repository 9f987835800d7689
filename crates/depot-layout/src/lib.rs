//! Depot Layout
//!
//! The bridge between a generic filesystem-shaped consumer and a
//! coordinate-shaped [`Repository`](depot_artifact::Repository).
//!
//! # Core Concepts
//!
//! - [`LayoutCodec`]: pluggable path ⇄ identifier codec, so alternate
//!   layouts never touch the resolver or the cache
//! - [`MavenLayout`]: the fixed
//!   `group/…/name/version/name-version[-classifier].extension` convention
//! - [`CandidateSource`] / [`DeclaredDependencies`]: the pending dependency
//!   descriptors used to disambiguate attribute-carrying lookups
//! - [`PathTranslator`]: decodes a virtual path, resolves it through the
//!   repository, and materializes the winner into the cache

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod candidates;
mod codec;
mod translator;

pub use candidates::{CandidateSource, DeclaredDependencies};
pub use codec::{Coordinates, LayoutCodec, MavenLayout, PathQuery};
pub use translator::{PathTranslator, TranslateError, Translation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

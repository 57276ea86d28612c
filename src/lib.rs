//! # wirecheck
//!
//! Consistency checks for the configuration of a dependency-injection container.
//!
//! Given a registry of definitions (each naming the type it builds and the
//! types its constructor requires), wirecheck can:
//!
//! - **check** that every required type has at least one registered provider,
//!   without building anything;
//! - **dry run** the container, building every definition through its real
//!   resolution path so constructor failures surface as well.
//!
//! Both are meant to be called from tests against a fully configured container.
//!
//! ## Quick Start
//!
//! ```rust
//! use wirecheck::prelude::*;
//! use std::sync::Arc;
//!
//! struct Database;
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let container = Container::builder()
//!     .definition(Definition::new("db", |_| Ok(Database)))?
//!     .definition(
//!         Definition::new("users", |ctx| Ok(UserService { db: ctx.get()? }))
//!             .requires::<Database>(),
//!     )?
//!     .build();
//!
//! // Type-level: is every dependency registered?
//! check_all(&container, &NoopDiagnostics)?;
//!
//! // Runtime: can every definition actually be built?
//! dry_run(&container, &container, &Parameters::empty, &NoopDiagnostics)?;
//! # Ok::<(), wirecheck::Error>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`validation`]: the static check and the dry run
//! - [`prelude`]: commonly used types and traits (import with `use wirecheck::prelude::*`)
//!
//! The [`Registry`] and [`Resolver`] traits are the seams to other containers;
//! [`Container`] is a minimal implementation of both.

// ============================================================================
// Core Module
// ============================================================================

mod core;

pub use crate::core::validation;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

// Registry model
pub use crate::core::definition::{Definition, Instance};
pub use crate::core::path::Path;
pub use crate::core::registry::{BeanRegistry, Registry};
pub use crate::core::type_key::TypeKey;

// Resolution
pub use crate::core::container::{Container, ContainerBuilder, Module, ResolutionContext};
pub use crate::core::parameters::{ParameterSource, ParameterValue, Parameters};
pub use crate::core::resolver::{Candidates, Resolver};

// Checks
pub use crate::core::validation::{check_all, check_definition, dry_run, Verify};

// Diagnostics
pub use crate::core::diagnostics::{
    DiagnosticEvent, Diagnostics, LogDiagnostics, MemoryDiagnostics, NoopDiagnostics, Severity,
    Stage,
};

// Errors
pub use crate::core::error::{BoxError, BrokenDefinition, Error, RegistryError, ResolutionError};

// ============================================================================
// Prelude
// ============================================================================

/// Everything needed to declare definitions and check them.
///
/// # Example
/// ```rust
/// use wirecheck::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        check_all,
        check_definition,
        dry_run,
        BrokenDefinition,
        Candidates,
        Container,
        Definition,
        Diagnostics,
        LogDiagnostics,
        MemoryDiagnostics,
        Module,
        NoopDiagnostics,
        Parameters,
        Registry,
        ResolutionError,
        Resolver,
        TypeKey,
        Verify,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use serde_json::Value as JsonValue;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");

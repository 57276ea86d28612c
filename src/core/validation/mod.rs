//! Consistency checks for a container's definitions.
//!
//! - [`check_all`]: every declared dependency type has at least one provider.
//!   Type-level only, nothing is built.
//! - [`dry_run`]: every definition is actually built through the container's
//!   resolver, so constructor failures surface too.
//!
//! Both fail fast on the first problem and keep no state between runs.
//! Neither detects dependency cycles by itself.

pub mod check;
pub mod dry_run;

pub use check::{check_all, check_definition};
pub use dry_run::dry_run;

use crate::core::diagnostics::LogDiagnostics;
use crate::core::error::{BrokenDefinition, ResolutionError};
use crate::core::parameters::ParameterSource;
use crate::core::registry::Registry;
use crate::core::resolver::Resolver;

/// Runs the checks on anything that is both a registry and a resolver,
/// tracing through the `log` facade.
///
/// ```rust
/// use wirecheck::prelude::*;
///
/// struct Clock;
///
/// let container = Container::builder()
///     .definition(Definition::new("clock", |_| Ok(Clock)))?
///     .build();
///
/// container.check_definitions()?;
/// container.dry_run(&Parameters::empty)?;
/// # Ok::<(), wirecheck::Error>(())
/// ```
pub trait Verify: Registry + Resolver {
    /// Static check of every definition, traced through the `log` facade.
    fn check_definitions(&self) -> Result<(), BrokenDefinition> {
        check_all(self, &LogDiagnostics)
    }

    /// Builds every definition once and discards it, traced through the `log` facade.
    fn dry_run(&self, parameters: ParameterSource<'_>) -> Result<(), ResolutionError> {
        dry_run(self, self, parameters, &LogDiagnostics)
    }
}

impl<T: Registry + Resolver + ?Sized> Verify for T {}

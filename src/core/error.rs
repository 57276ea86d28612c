use crate::core::path::Path;
use crate::core::type_key::TypeKey;
use thiserror::Error;

/// Error type factories may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A definition declares a dependency that nothing in the registry provides.
#[derive(Debug, Clone, Error)]
#[error("Could not retrieve dependency of type '{missing}' for definition {definition}")]
pub struct BrokenDefinition {
    /// Display form of the offending definition.
    pub definition: String,
    pub path: Path,
    pub missing: TypeKey,
}

/// Failure raised while the container builds an instance.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("No definition found for type '{requested}' (requested from {path})")]
    NoDefinitionFound { requested: TypeKey, path: Path },

    #[error("Definition {definition} cannot provide type '{requested}'")]
    TypeMismatch {
        definition: String,
        requested: TypeKey,
    },

    #[error("Cyclic dependency while resolving {definition}: {}", .chain.join(" -> "))]
    Cycle {
        definition: String,
        chain: Vec<String>,
    },

    #[error("Definition {definition} expects a parameter at index {index}, but only {supplied} were supplied")]
    MissingParameter {
        definition: String,
        index: usize,
        supplied: usize,
    },

    #[error("Parameter {index} of definition {definition} has the wrong shape: {source}")]
    InvalidParameter {
        definition: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not create instance for {definition}: {source}")]
    InstanceCreation {
        definition: String,
        #[source]
        source: BoxError,
    },
}

/// Rejected registry declarations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Definition path '{path}' is already declared by {existing}")]
    DuplicatePath { path: Path, existing: String },
}

/// Any failure surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Broken(#[from] BrokenDefinition),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

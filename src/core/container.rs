use crate::core::definition::{Definition, Instance};
use crate::core::error::{BoxError, RegistryError, ResolutionError};
use crate::core::parameters::{ParameterSource, Parameters};
use crate::core::path::Path;
use crate::core::registry::{BeanRegistry, Registry};
use crate::core::resolver::{Candidates, Resolver};
use crate::core::type_key::TypeKey;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A group of definitions declared under a common path.
#[derive(Debug, Clone)]
pub struct Module {
    path: Path,
    definitions: Vec<Definition>,
}

impl Module {
    pub fn new(path: impl Into<Path>) -> Self {
        Self {
            path: path.into(),
            definitions: Vec::new(),
        }
    }

    /// Adds a definition. Its path becomes relative to the module's.
    pub fn definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Collects definitions and modules into a [`Container`].
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    registry: BeanRegistry,
}

impl ContainerBuilder {
    /// Declares a definition at its own path.
    pub fn definition(mut self, definition: Definition) -> Result<Self, RegistryError> {
        self.registry.declare(definition)?;
        Ok(self)
    }

    /// Declares every definition of `module` under the module's path.
    pub fn module(mut self, module: Module) -> Result<Self, RegistryError> {
        let Module { path, definitions } = module;
        for definition in definitions {
            self.registry.declare(definition.relocate(&path))?;
        }
        Ok(self)
    }

    /// Freezes the declared definitions into a container.
    pub fn build(self) -> Container {
        log::info!("Container ready with {} definitions", self.registry.len());
        Container {
            registry: self.registry,
        }
    }
}

/// Minimal container: an ordered registry plus a resolver that runs the
/// registered factories. Nothing is cached, every resolution builds anew.
#[derive(Debug, Default)]
pub struct Container {
    registry: BeanRegistry,
}

impl Container {
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::default()
    }

    pub fn registry(&self) -> &BeanRegistry {
        &self.registry
    }

    /// Resolves `T` from the root path without parameters.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolutionError> {
        self.get_with::<T>(&Parameters::empty)
    }

    pub fn get_with<T: ?Sized + Send + Sync + 'static>(
        &self,
        parameters: ParameterSource<'_>,
    ) -> Result<Arc<T>, ResolutionError> {
        let root = Path::root();
        let instance = self.resolve(&root, TypeKey::of::<T>(), parameters, Candidates::Search)?;
        downcast::<T>(instance, &root)
    }

    fn resolve_in(
        &self,
        path: &Path,
        key: TypeKey,
        parameters: Parameters,
        candidates: Candidates<'_>,
        chain: &[Path],
    ) -> Result<Instance, ResolutionError> {
        let definition = match candidates {
            Candidates::Exactly(definition) => definition,
            Candidates::Search => {
                let found = self.registry.find_by_type(key);
                if found.len() > 1 {
                    log::debug!(
                        "{} definitions provide '{}', using {}",
                        found.len(),
                        key.short_name(),
                        found[0]
                    );
                }
                *found.first().ok_or_else(|| ResolutionError::NoDefinitionFound {
                    requested: key,
                    path: path.clone(),
                })?
            }
        };

        if !definition.matches(key) {
            return Err(ResolutionError::TypeMismatch {
                definition: definition.to_string(),
                requested: key,
            });
        }

        if chain.contains(definition.path()) {
            return Err(ResolutionError::Cycle {
                definition: definition.to_string(),
                chain: chain
                    .iter()
                    .chain(std::iter::once(definition.path()))
                    .map(|p| p.to_string())
                    .collect(),
            });
        }

        // The declared signature binds the factory too, whether or not it pulls every type.
        if let Some(&missing) = definition
            .constructor_parameter_types()
            .iter()
            .find(|&&t| self.registry.find_by_type(t).is_empty())
        {
            log::warn!(
                "{} declares '{}' but nothing provides it",
                definition,
                missing.short_name()
            );
            return Err(ResolutionError::NoDefinitionFound {
                requested: missing,
                path: definition.path().clone(),
            });
        }

        let mut chain = chain.to_vec();
        chain.push(definition.path().clone());
        let ctx = ResolutionContext {
            container: self,
            definition,
            parameters,
            chain,
        };

        log::debug!("Resolving {} as '{}'", definition, key.short_name());
        let produced = panic::catch_unwind(AssertUnwindSafe(|| definition.instantiate(&ctx)))
            .map_err(|payload| creation_failed(definition, panic_message(payload)))?
            .map_err(|err| match err.downcast::<ResolutionError>() {
                // Failures of nested resolutions surface as they were raised.
                Ok(nested) => *nested,
                Err(other) => creation_failed(definition, other),
            })?;

        definition
            .cast(produced, key)
            .ok_or_else(|| ResolutionError::TypeMismatch {
                definition: definition.to_string(),
                requested: key,
            })
    }
}

impl Registry for Container {
    fn definitions(&self) -> &[Definition] {
        self.registry.definitions()
    }
}

impl Resolver for Container {
    fn resolve(
        &self,
        path: &Path,
        key: TypeKey,
        parameters: ParameterSource<'_>,
        candidates: Candidates<'_>,
    ) -> Result<Instance, ResolutionError> {
        self.resolve_in(path, key, parameters(), candidates, &[])
    }
}

/// What a factory sees while its definition is being built.
pub struct ResolutionContext<'a> {
    container: &'a Container,
    definition: &'a Definition,
    parameters: Parameters,
    chain: Vec<Path>,
}

impl ResolutionContext<'_> {
    /// Resolves a dependency through the container, without parameters.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolutionError> {
        let path = self.definition.path();
        let instance = self.container.resolve_in(
            path,
            TypeKey::of::<T>(),
            Parameters::empty(),
            Candidates::Search,
            &self.chain,
        )?;
        downcast::<T>(instance, path)
    }

    /// Reads the supplied parameter at `index`.
    pub fn param<P: DeserializeOwned>(&self, index: usize) -> Result<P, ResolutionError> {
        match self.parameters.get::<P>(index) {
            Some(Ok(value)) => Ok(value),
            Some(Err(source)) => Err(ResolutionError::InvalidParameter {
                definition: self.definition.to_string(),
                index,
                source,
            }),
            None => Err(ResolutionError::MissingParameter {
                definition: self.definition.to_string(),
                index,
                supplied: self.parameters.len(),
            }),
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn definition(&self) -> &Definition {
        self.definition
    }
}

fn downcast<T: ?Sized + 'static>(instance: Instance, path: &Path) -> Result<Arc<T>, ResolutionError> {
    instance
        .downcast::<Arc<T>>()
        .map(|boxed| *boxed)
        .map_err(|_| ResolutionError::TypeMismatch {
            definition: format!("instance resolved from {}", path),
            requested: TypeKey::of::<T>(),
        })
}

fn creation_failed(definition: &Definition, source: BoxError) -> ResolutionError {
    log::warn!("Factory of {} failed: {}", definition, source);
    ResolutionError::InstanceCreation {
        definition: definition.to_string(),
        source,
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> BoxError {
    let msg = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "factory panicked".to_string());
    format!("panicked: {msg}").into()
}

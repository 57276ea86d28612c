use crate::core::definition::Definition;
use crate::core::error::RegistryError;
use crate::core::path::Path;
use crate::core::type_key::TypeKey;

/// Read access to the definitions known to a container.
pub trait Registry {
    /// Every definition, in declaration order.
    fn definitions(&self) -> &[Definition];

    /// Every definition that can serve a request for `key`, in declaration order.
    ///
    /// Matches on the target type and on bound types, the same rule the
    /// container uses when it resolves.
    fn find_by_type(&self, key: TypeKey) -> Vec<&Definition> {
        self.definitions().iter().filter(|d| d.matches(key)).collect()
    }

    /// The first definition whose target type is exactly `key`.
    fn definition_for(&self, key: TypeKey) -> Option<&Definition> {
        self.definitions().iter().find(|d| d.target() == key)
    }

    /// Distinct module paths of the declared definitions, in first-seen order.
    fn paths(&self) -> Vec<Path> {
        let mut paths: Vec<Path> = Vec::new();
        for def in self.definitions() {
            let module = def.path().parent().unwrap_or_else(Path::root);
            if !paths.contains(&module) {
                paths.push(module);
            }
        }
        paths
    }

    /// The module path named `name`, if any definition lives under it.
    fn path(&self, name: &str) -> Option<Path> {
        let wanted = Path::new(name);
        self.paths().into_iter().find(|p| *p == wanted)
    }
}

/// Ordered store of definitions with unique paths.
#[derive(Debug, Clone, Default)]
pub struct BeanRegistry {
    definitions: Vec<Definition>,
}

impl BeanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition.
    ///
    /// A definition declared at a path that is already taken replaces the
    /// earlier one in place when it allows override, and is rejected otherwise.
    pub fn declare(&mut self, definition: Definition) -> Result<(), RegistryError> {
        match self
            .definitions
            .iter()
            .position(|d| d.path() == definition.path())
        {
            Some(idx) if definition.allow_override() => {
                log::warn!(
                    "Overriding {} with {}",
                    self.definitions[idx],
                    definition
                );
                self.definitions[idx] = definition;
                Ok(())
            }
            Some(idx) => Err(RegistryError::DuplicatePath {
                path: definition.path().clone(),
                existing: self.definitions[idx].to_string(),
            }),
            None => {
                log::debug!("Declared {}", definition);
                self.definitions.push(definition);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Registry for BeanRegistry {
    fn definitions(&self) -> &[Definition] {
        &self.definitions
    }
}

use crate::core::definition::{Definition, Instance};
use crate::core::error::ResolutionError;
use crate::core::parameters::ParameterSource;
use crate::core::path::Path;
use crate::core::type_key::TypeKey;

/// Which definitions a resolution may pick from.
#[derive(Debug, Clone, Copy)]
pub enum Candidates<'a> {
    /// Every registered definition matching the requested type.
    Search,
    /// Only this definition, even if others provide the same type.
    Exactly(&'a Definition),
}

/// The container's runtime resolution path.
pub trait Resolver {
    /// Builds an instance of `key`, requested from `path`.
    ///
    /// The returned [`Instance`] downcasts to `Arc<T>` where `key` is `TypeKey::of::<T>()`.
    fn resolve(
        &self,
        path: &Path,
        key: TypeKey,
        parameters: ParameterSource<'_>,
        candidates: Candidates<'_>,
    ) -> Result<Instance, ResolutionError>;
}

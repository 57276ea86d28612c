use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a registered or requested type.
///
/// Two keys are equal when their `TypeId`s are; the name is only carried
/// along for messages. Unsized types are allowed so trait objects such as
/// `dyn Repository` can be used as keys.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The last path segment of the type name (`RepoX` for `my_app::data::RepoX`).
    pub fn short_name(&self) -> &'static str {
        // Generic arguments may contain `::` themselves, so only look before the first `<`.
        let head = self.name.split('<').next().unwrap_or(self.name);
        // Tuples, arrays, slices, references and pointers are not plain paths; keep them whole.
        if head.contains(['(', '[', '&', '*']) {
            return self.name;
        }
        match head.rfind("::") {
            Some(idx) => &self.name[idx + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

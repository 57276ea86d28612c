use crate::core::container::ResolutionContext;
use crate::core::error::BoxError;
use crate::core::path::Path;
use crate::core::type_key::TypeKey;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A resolved object, erased. Downcasts to `Arc<T>` for the requested `T`.
pub type Instance = Box<dyn Any + Send + Sync>;

/// What a factory produces before it is converted to the requested type.
pub(crate) type Erased = Arc<dyn Any + Send + Sync>;

type Factory = Arc<dyn Fn(&ResolutionContext<'_>) -> Result<Erased, BoxError> + Send + Sync>;
type Cast = Arc<dyn Fn(Erased) -> Option<Instance> + Send + Sync>;

#[derive(Clone)]
struct Binding {
    key: TypeKey,
    cast: Cast,
}

/// How to build one component: its path, the type it produces, the types it
/// can also be requested as, and the types its constructor requires.
///
/// The constructor signature is declared when the definition is registered.
/// `None` means there is no constructor to inspect (the definition hands out
/// an existing value); `Some(vec![])` means a constructor without parameters.
#[derive(Clone)]
pub struct Definition {
    path: Path,
    target: Binding,
    secondary: Vec<Binding>,
    constructor: Option<Vec<TypeKey>>,
    factory: Factory,
    allow_override: bool,
}

impl Definition {
    /// A definition built by `factory` each time it is resolved.
    ///
    /// Declare what the factory pulls out of the context with [`Definition::requires`].
    pub fn new<T, F>(path: impl Into<Path>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolutionContext<'_>) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            target: Binding::target::<T>(),
            secondary: Vec::new(),
            constructor: Some(Vec::new()),
            factory: Arc::new(move |ctx: &ResolutionContext<'_>| {
                factory(ctx).map(|v| Arc::new(v) as Erased)
            }),
            allow_override: false,
        }
    }

    /// A definition handing out an already built value. It has no constructor.
    pub fn value<T>(path: impl Into<Path>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let shared = Arc::new(value);
        Self {
            path: path.into(),
            target: Binding::target::<T>(),
            secondary: Vec::new(),
            constructor: None,
            factory: Arc::new(move |_: &ResolutionContext<'_>| Ok(shared.clone() as Erased)),
            allow_override: false,
        }
    }

    /// Appends `D` to the constructor signature.
    pub fn requires<D: ?Sized + 'static>(mut self) -> Self {
        self.constructor
            .get_or_insert_with(Vec::new)
            .push(TypeKey::of::<D>());
        self
    }

    /// Makes the definition resolvable as `U` as well, typically a trait object.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use wirecheck::Definition;
    ///
    /// trait Repository: Send + Sync {}
    /// struct SqlRepository;
    /// impl Repository for SqlRepository {}
    ///
    /// let def = Definition::new("repo", |_| Ok(SqlRepository))
    ///     .bind(|r: Arc<SqlRepository>| r as Arc<dyn Repository>);
    /// assert!(def.matches(wirecheck::TypeKey::of::<dyn Repository>()));
    /// ```
    pub fn bind<T, U, C>(mut self, cast: C) -> Self
    where
        T: Send + Sync + 'static,
        U: ?Sized + Send + Sync + 'static,
        C: Fn(Arc<T>) -> Arc<U> + Send + Sync + 'static,
    {
        self.secondary.push(Binding {
            key: TypeKey::of::<U>(),
            cast: Arc::new(move |erased: Erased| {
                erased
                    .downcast::<T>()
                    .ok()
                    .map(|v| Box::new(cast(v)) as Instance)
            }),
        });
        self
    }

    /// Allows this definition to replace an earlier one declared at the same path.
    pub fn with_override(mut self) -> Self {
        self.allow_override = true;
        self
    }

    /// Where the definition is declared, module prefix included.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The type the factory produces.
    pub fn target(&self) -> TypeKey {
        self.target.key
    }

    /// Types added with `bind`, in the order they were bound.
    pub fn secondary_types(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.secondary.iter().map(|b| b.key)
    }

    /// False for definitions made with `value`.
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Ordered required types. Empty when there is no constructor or it takes nothing.
    pub fn constructor_parameter_types(&self) -> &[TypeKey] {
        self.constructor.as_deref().unwrap_or(&[])
    }

    /// Whether declaring this definition may replace one at the same path.
    pub fn allow_override(&self) -> bool {
        self.allow_override
    }

    /// Whether a request for `key` can be served by this definition,
    /// either by its target type or by one of its bound types.
    pub fn matches(&self, key: TypeKey) -> bool {
        self.target.key == key || self.secondary.iter().any(|b| b.key == key)
    }

    pub(crate) fn relocate(mut self, module: &Path) -> Self {
        self.path = module.join(&self.path);
        self
    }

    pub(crate) fn instantiate(&self, ctx: &ResolutionContext<'_>) -> Result<Erased, BoxError> {
        (self.factory)(ctx)
    }

    /// Converts a produced value into the representation requested as `key`.
    pub(crate) fn cast(&self, erased: Erased, key: TypeKey) -> Option<Instance> {
        std::iter::once(&self.target)
            .chain(self.secondary.iter())
            .find(|b| b.key == key)
            .and_then(|b| (b.cast)(erased))
    }
}

impl Binding {
    fn target<T: Send + Sync + 'static>() -> Self {
        Binding {
            key: TypeKey::of::<T>(),
            cast: Arc::new(|erased: Erased| {
                erased.downcast::<T>().ok().map(|v| Box::new(v) as Instance)
            }),
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Definition[path='{}', type={}",
            self.path,
            self.target.key.short_name()
        )?;
        if !self.secondary.is_empty() {
            let binds: Vec<_> = self.secondary.iter().map(|b| b.key.short_name()).collect();
            write!(f, ", binds=[{}]", binds.join(", "))?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("path", &self.path)
            .field("target", &self.target.key)
            .field("secondary", &self.secondary_types().collect::<Vec<_>>())
            .field("constructor", &self.constructor)
            .field("allow_override", &self.allow_override)
            .finish()
    }
}

//! The closed set of types construction expressions can reach.

use std::fmt;
use std::sync::Arc;

use omni_ir::{Kind, Value};
use rustc_hash::FxHashMap;

use crate::constructible::{Args, Constructible, Target};
use crate::engine::Instance;
use crate::error::ConstructError;
use crate::shortcuts::Shortcuts;

/// Object-safe view of a [`Constructible`] under construction.
pub(crate) trait Constructed {
    fn type_name(&self) -> &'static str;
    fn setter_kind(&self, key: &str) -> Option<Kind>;
    fn field_kind(&self, key: &str) -> Option<Kind>;
    fn put_kind(&self) -> Option<Kind>;
    fn inject(&mut self, target: Target<'_>, value: Value) -> Result<(), ConstructError>;
    fn init(&mut self) -> Result<(), ConstructError>;
    fn finish(self: Box<Self>) -> Result<Value, ConstructError>;
}

impl<T: Constructible> Constructed for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn setter_kind(&self, key: &str) -> Option<Kind> {
        T::setters().into_iter().find(|slot| slot.name == key).map(|slot| slot.kind)
    }

    fn field_kind(&self, key: &str) -> Option<Kind> {
        T::fields().into_iter().find(|slot| slot.name == key).map(|slot| slot.kind)
    }

    fn put_kind(&self) -> Option<Kind> {
        T::put_kind()
    }

    fn inject(&mut self, target: Target<'_>, value: Value) -> Result<(), ConstructError> {
        Constructible::inject(self, target, value)
    }

    fn init(&mut self) -> Result<(), ConstructError> {
        Constructible::init(self)
    }

    fn finish(self: Box<Self>) -> Result<Value, ConstructError> {
        Constructible::finish(*self)
    }
}

type CreateFn = fn(usize, &mut Args) -> Result<Instance, ConstructError>;

/// A registered type: its factory signatures and how to call them.
pub struct ClassEntry {
    type_name: &'static str,
    signatures: Vec<Vec<Kind>>,
    create: CreateFn,
}

impl ClassEntry {
    fn of<T: Constructible>() -> Self {
        ClassEntry {
            type_name: T::TYPE_NAME,
            signatures: T::factories()
                .iter()
                .map(|factory| factory.params().to_vec())
                .collect(),
            create: create_instance::<T>,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Parameter kinds of each factory, in declaration order.
    pub fn signatures(&self) -> &[Vec<Kind>] {
        &self.signatures
    }

    pub(crate) fn create(&self, factory: usize, args: &mut Args) -> Result<Instance, ConstructError> {
        (self.create)(factory, args)
    }
}

impl fmt::Debug for ClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassEntry")
            .field("type_name", &self.type_name)
            .field("signatures", &self.signatures)
            .finish_non_exhaustive()
    }
}

fn create_instance<T: Constructible>(
    factory: usize,
    args: &mut Args,
) -> Result<Instance, ConstructError> {
    let factory = T::factories().into_iter().nth(factory).ok_or_else(|| {
        ConstructError::instantiation(T::TYPE_NAME, format!("no factory #{factory}"))
    })?;
    let value = (factory.create)(args)?;
    Ok(Instance::new(value))
}

/// Registered types by canonical id, plus the shortcut table used to resolve
/// short names.
#[derive(Debug)]
pub struct ClassRegistry {
    classes: FxHashMap<&'static str, ClassEntry>,
    shortcuts: Arc<Shortcuts>,
}

impl ClassRegistry {
    /// An empty registry resolving names through `shortcuts`.
    pub fn new(shortcuts: Arc<Shortcuts>) -> Self {
        ClassRegistry {
            classes: FxHashMap::default(),
            shortcuts,
        }
    }

    /// A registry holding every builtin type, using the global shortcut table.
    pub fn with_builtins() -> Self {
        let mut registry = ClassRegistry::new(Shortcuts::global());
        crate::builtins::register(&mut registry);
        registry
    }

    /// Register `T` under its [`TYPE_NAME`](Constructible::TYPE_NAME).
    /// A later registration of the same id replaces the earlier one.
    pub fn register<T: Constructible>(&mut self) -> &mut Self {
        let entry = ClassEntry::of::<T>();
        tracing::trace!(type_name = T::TYPE_NAME, factories = entry.signatures.len(), "registered type");
        self.classes.insert(T::TYPE_NAME, entry);
        self
    }

    /// Canonical id for a possibly short `name`.
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.shortcuts.resolve(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&ClassEntry, ConstructError> {
        let canonical = self.canonical_name(name);
        self.classes
            .get(canonical)
            .ok_or_else(|| ConstructError::TypeNotFound(canonical.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(self.canonical_name(name))
    }

    pub fn shortcuts(&self) -> &Shortcuts {
        &self.shortcuts
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

//! Resolve, construct, inject, finalize.

use std::fmt;

use omni_ir::{Kind, Value};

use crate::constructible::{Args, Constructible, Target};
use crate::error::{describe_args, ConstructError};
use crate::registry::{ClassRegistry, Constructed};
use crate::validate::Validator;

/// An object between construction and finalization.
pub struct Instance(Box<dyn Constructed>);

impl Instance {
    pub(crate) fn new<T: Constructible>(value: T) -> Self {
        Instance(Box::new(value))
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instance").field(&self.type_name()).finish()
    }
}

/// Executes construction expressions against a registry.
#[derive(Clone, Copy)]
pub struct Engine<'a> {
    registry: &'a ClassRegistry,
    validator: &'a dyn Validator,
}

impl<'a> Engine<'a> {
    pub fn new(registry: &'a ClassRegistry, validator: &'a dyn Validator) -> Self {
        Engine {
            registry,
            validator,
        }
    }

    pub fn registry(&self) -> &'a ClassRegistry {
        self.registry
    }

    /// `Type(args)[named...]`, all four steps.
    pub fn build(
        &self,
        type_name: &str,
        args: Vec<Value>,
        named: Vec<(String, Value)>,
    ) -> Result<Value, ConstructError> {
        let instance = self.construct(type_name, args)?;
        let instance = self.inject(instance, named)?;
        self.finalize(instance)
    }

    /// Call the single factory of `type_name` accepting `args`.
    pub fn construct(&self, type_name: &str, args: Vec<Value>) -> Result<Instance, ConstructError> {
        let entry = self.registry.lookup(type_name)?;
        let matching: Vec<usize> = entry
            .signatures()
            .iter()
            .enumerate()
            .filter(|(_, params)| signature_accepts(params, &args))
            .map(|(index, _)| index)
            .collect();

        let index = match matching.as_slice() {
            [index] => *index,
            [] => {
                return Err(ConstructError::NoMatchingFactory {
                    type_name: entry.type_name(),
                    args: describe_args(&args),
                })
            }
            _ => {
                return Err(ConstructError::AmbiguousFactory {
                    type_name: entry.type_name(),
                    args: describe_args(&args),
                    count: matching.len(),
                })
            }
        };

        let coerced = entry.signatures()[index]
            .iter()
            .zip(args)
            .map(|(kind, arg)| kind.coerce(arg))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                ConstructError::instantiation(entry.type_name(), "argument coercion failed")
            })?;

        tracing::trace!(type_name = entry.type_name(), factory = index, "constructing");
        entry.create(index, &mut Args::new(entry.type_name(), coerced))
    }

    /// Apply named arguments in order: setter, then field, then `put`.
    ///
    /// A setter whose kind does not accept the value is skipped; a field
    /// whose kind does not accept it is an error.
    pub fn inject(
        &self,
        mut instance: Instance,
        named: Vec<(String, Value)>,
    ) -> Result<Instance, ConstructError> {
        for (key, value) in named {
            inject_one(&mut *instance.0, &key, value)?;
        }
        Ok(instance)
    }

    /// Run `init`, produce the final value, and validate it.
    pub fn finalize(&self, instance: Instance) -> Result<Value, ConstructError> {
        let Instance(mut object) = instance;
        object.init()?;
        let value = object.finish()?;
        self.validator.validate(&value)?;
        Ok(value)
    }
}

fn signature_accepts(params: &[Kind], args: &[Value]) -> bool {
    params.len() == args.len() && params.iter().zip(args).all(|(kind, arg)| kind.accepts(arg))
}

fn inject_one(object: &mut dyn Constructed, key: &str, value: Value) -> Result<(), ConstructError> {
    if let Some(kind) = object.setter_kind(key) {
        if let Some(value) = kind.coerce(value.clone()) {
            return object.inject(Target::Setter(key), value);
        }
    }
    if let Some(kind) = object.field_kind(key) {
        let found = value.kind();
        return match kind.coerce(value) {
            Some(value) => object.inject(Target::Field(key), value),
            None => Err(ConstructError::injection(
                object.type_name(),
                key,
                format!("field expects {kind}, got {found}"),
            )),
        };
    }
    if let Some(kind) = object.put_kind() {
        if let Some(value) = kind.coerce(value) {
            return object.inject(Target::Put(key), value);
        }
    }
    Err(ConstructError::injection(
        object.type_name(),
        key,
        "no matching setter, field, or put method",
    ))
}

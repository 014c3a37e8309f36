//! Maps, lists, and array builders.

use std::fmt;

use omni_ir::{eq_as, ArrayValue, Kind, Object, PropertyMap, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constructible::{Constructible, Factory, Slot, Target};
use crate::error::ConstructError;
use crate::value_conv::slot_value;

fn any_array() -> Kind {
    Kind::array(Kind::Any)
}

/// `HashMap()` or `HashMap(map)`; named arguments are `put` into it.
impl Constructible for PropertyMap {
    const TYPE_NAME: &'static str = PropertyMap::TYPE_NAME;

    fn factories() -> Vec<Factory<Self>> {
        vec![
            Factory::new(vec![], |_| Ok(PropertyMap::new())),
            Factory::new(vec![Kind::object("Map")], |args| args.arg()),
        ]
    }

    fn put_kind() -> Option<Kind> {
        Some(Kind::Any)
    }

    fn inject(&mut self, target: Target<'_>, value: Value) -> Result<(), ConstructError> {
        self.insert(target.key(), value);
        Ok(())
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(self))
    }
}

/// An ordered list of values, `omni.collections.List`.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueList {
    items: Vec<Value>,
}

impl ValueList {
    pub const TYPE_NAME: &'static str = "omni.collections.List";

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

impl fmt::Display for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

impl Object for ValueList {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &["List"]
    }

    fn dyn_eq(&self, other: &dyn Object) -> bool {
        eq_as(self, other)
    }
}

/// Builder: array to list.
#[derive(Debug)]
pub struct ArrayToList(ArrayValue);

impl Constructible for ArrayToList {
    const TYPE_NAME: &'static str = "omni.collections.ArrayToList";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![any_array()], |args| Ok(ArrayToList(args.arg()?)))]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(ValueList {
            items: self.0.items().to_vec(),
        }))
    }
}

/// Builder: the array without duplicates, first occurrences kept.
#[derive(Debug)]
pub struct Set(ArrayValue);

impl Constructible for Set {
    const TYPE_NAME: &'static str = "omni.collections.Set";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![any_array()], |args| Ok(Set(args.arg()?)))]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        let mut items: Vec<Value> = Vec::with_capacity(self.0.len());
        push_unique(&mut items, self.0.iter());
        Ok(Value::array(self.0.elem().clone(), items))
    }
}

fn push_unique<'a>(into: &mut Vec<Value>, items: impl Iterator<Item = &'a Value>) {
    for item in items {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}

/// The arrays inside an array of arrays; fails on an empty outer array.
fn nested_arrays(type_name: &'static str, arrays: &ArrayValue) -> Result<Vec<ArrayValue>, ConstructError> {
    if arrays.is_empty() {
        return Err(ConstructError::instantiation(type_name, "no arrays given"));
    }
    arrays
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_array()
                .cloned()
                .ok_or_else(|| ConstructError::instantiation(type_name, format!("item {i} is not an array")))
        })
        .collect()
}

/// Builder: items of the first array present in all others, in the first
/// array's order. Duplicates in the first array are kept.
#[derive(Debug)]
pub struct Intersection(ArrayValue);

impl Constructible for Intersection {
    const TYPE_NAME: &'static str = "omni.collections.Intersection";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![Kind::array(any_array())], |args| {
            Ok(Intersection(args.arg()?))
        })]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        let arrays = nested_arrays(Self::TYPE_NAME, &self.0)?;
        let (first, rest) = arrays.split_first().ok_or_else(|| {
            ConstructError::instantiation(Self::TYPE_NAME, "no arrays given")
        })?;
        let items = first
            .iter()
            .filter(|item| rest.iter().all(|other| other.items().contains(item)))
            .cloned()
            .collect();
        Ok(Value::array(first.elem().clone(), items))
    }
}

/// Builder: all distinct items of all arrays, in order of first occurrence.
#[derive(Debug)]
pub struct Union(ArrayValue);

impl Constructible for Union {
    const TYPE_NAME: &'static str = "omni.collections.Union";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![Kind::array(any_array())], |args| Ok(Union(args.arg()?)))]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        let arrays = nested_arrays(Self::TYPE_NAME, &self.0)?;
        let mut items = Vec::new();
        for array in &arrays {
            push_unique(&mut items, array.iter());
        }
        Ok(Value::array(arrays[0].elem().clone(), items))
    }
}

/// Builder: `array[index]`.
#[derive(Debug)]
pub struct SelectArrayItemByIndex {
    array: ArrayValue,
    index: i32,
}

impl Constructible for SelectArrayItemByIndex {
    const TYPE_NAME: &'static str = "omni.collections.SelectArrayItemByIndex";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![any_array(), Kind::Int], |args| {
            Ok(SelectArrayItemByIndex {
                array: args.arg()?,
                index: args.arg()?,
            })
        })]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        usize::try_from(self.index)
            .ok()
            .and_then(|index| self.array.items().get(index))
            .cloned()
            .ok_or_else(|| {
                ConstructError::instantiation(
                    Self::TYPE_NAME,
                    format!(
                        "index {} out of bounds for array of length {}",
                        self.index,
                        self.array.len()
                    ),
                )
            })
    }
}

/// Builder: a uniform random sample of `size` items (reservoir sampling).
/// The optional `seed` makes the draw reproducible.
#[derive(Debug)]
pub struct DrawSample {
    array: ArrayValue,
    size: i32,
    seed: Option<i64>,
}

impl Constructible for DrawSample {
    const TYPE_NAME: &'static str = "omni.collections.DrawSample";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![any_array(), Kind::Int], |args| {
            Ok(DrawSample {
                array: args.arg()?,
                size: args.arg()?,
                seed: None,
            })
        })]
    }

    fn setters() -> Vec<Slot> {
        vec![Slot::new("seed", Kind::Long)]
    }

    fn inject(&mut self, target: Target<'_>, value: Value) -> Result<(), ConstructError> {
        self.seed = Some(slot_value(Self::TYPE_NAME, target.key(), value)?);
        Ok(())
    }

    fn finish(self) -> Result<Value, ConstructError> {
        let size = usize::try_from(self.size)
            .ok()
            .filter(|size| *size <= self.array.len())
            .ok_or_else(|| {
                ConstructError::instantiation(
                    Self::TYPE_NAME,
                    format!(
                        "cannot draw {} items from an array of length {}",
                        self.size,
                        self.array.len()
                    ),
                )
            })?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(u64::from_ne_bytes(seed.to_ne_bytes())),
            None => StdRng::from_entropy(),
        };
        let items = self.array.items();
        let mut sample = items[..size].to_vec();
        for (i, item) in items.iter().enumerate().skip(size) {
            let slot = rng.gen_range(0..=i);
            if slot < size {
                sample[slot] = item.clone();
            }
        }
        Ok(Value::array(self.array.elem().clone(), sample))
    }
}

#[cfg(test)]
mod tests;

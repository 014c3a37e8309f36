//! Construction engine for OmniProps.
//!
//! A construction expression `Type(args)[name = value, ...]` is executed in
//! four steps:
//!
//! 1. **Resolve** `Type` through the [`Shortcuts`] table to a canonical id and
//!    find it in the [`ClassRegistry`].
//! 2. **Construct**: pick the single [`Factory`] whose parameter kinds accept
//!    the positional arguments.
//! 3. **Inject** each named argument through a setter slot, a field slot, or
//!    the type's generic `put`.
//! 4. **Finalize**: run the `init` hook, `finish` the instance (builders
//!    produce their real value here), and hand the result to a [`Validator`].
//!
//! Only types registered through [`Constructible`] are reachable; there is no
//! runtime reflection.

pub mod builtins;
mod constructible;
mod engine;
mod error;
mod registry;
mod resource;
mod shortcuts;
mod validate;
mod value_conv;

pub use constructible::{Args, Constructible, Factory, Slot, Target};
pub use engine::{Engine, Instance};
pub use error::{BoxError, CollectedErrors, ConstructError};
pub use registry::{ClassEntry, ClassRegistry};
pub use resource::{ResourcePath, RESOURCE_PATH_ENV};
pub use shortcuts::{Shortcuts, SHORTCUTS_FILE};
pub use validate::{ConstraintValidator, Constraints, ValidationError, Validator};
pub use value_conv::{slot_value, FromValue};

//! Types every registry starts with.

pub mod collections;
pub mod io;
pub mod net;
pub mod run;
pub mod sys;
pub mod text;
pub mod time;

use omni_ir::PropertyMap;

use crate::registry::ClassRegistry;

pub use self::collections::ValueList;
pub use self::io::File;

/// Register every builtin type.
pub fn register(registry: &mut ClassRegistry) {
    registry
        .register::<io::File>()
        .register::<io::ExistingFile>()
        .register::<io::NonExistingFile>()
        .register::<io::ForcedDirectory>()
        .register::<io::FilesInDir>()
        .register::<io::Path>()
        .register::<io::StringArrayFromFile>()
        .register::<io::Resource>()
        .register::<net::Url>()
        .register::<net::SocketAddress>()
        .register::<time::TimeZone>()
        .register::<PropertyMap>()
        .register::<collections::Set>()
        .register::<collections::ArrayToList>()
        .register::<collections::Intersection>()
        .register::<collections::Union>()
        .register::<collections::SelectArrayItemByIndex>()
        .register::<collections::DrawSample>()
        .register::<text::StringSplitter>()
        .register::<text::JoinStrings>()
        .register::<text::ModifyStringArray>()
        .register::<sys::Environment>()
        .register::<sys::Os>()
        .register::<run::ShellExecutor>();
}

/// Build through a registry holding only the builtins and the embedded
/// shortcut table.
#[cfg(test)]
pub(crate) fn test_build(
    type_name: &str,
    args: Vec<omni_ir::Value>,
    named: Vec<(String, omni_ir::Value)>,
) -> Result<omni_ir::Value, crate::error::ConstructError> {
    use std::sync::Arc;

    let mut registry = ClassRegistry::new(Arc::new(crate::shortcuts::Shortcuts::builtin()));
    register(&mut registry);
    crate::engine::Engine::new(&registry, &crate::validate::ConstraintValidator).build(type_name, args, named)
}

//! Filesystem types: `File`, its checking builders, and `Resource`.

use std::fmt;
use std::path::{Path as FsPath, PathBuf};

use omni_ir::{eq_as, ArrayValue, Kind, Object, Source, Value};

use crate::constructible::{Args, Constructible, Factory, Slot, Target};
use crate::error::ConstructError;
use crate::value_conv::{slot_value, FromValue};

/// A filesystem path, `omni.io.File`. Usable as an `include` source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub const TYPE_NAME: &'static str = "omni.io.File";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        File { path: path.into() }
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    pub fn kind() -> Kind {
        Kind::object(Self::TYPE_NAME)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Object for File {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &["Source"]
    }

    fn dyn_eq(&self, other: &dyn Object) -> bool {
        eq_as(self, other)
    }

    fn as_source(&self) -> Option<Source> {
        Some(Source::File(self.path.clone()))
    }
}

impl FromValue for File {
    fn from_value(value: Value) -> Option<Self> {
        value.as_object()?.downcast_ref::<File>().cloned()
    }
}

impl From<PathBuf> for File {
    fn from(path: PathBuf) -> Self {
        File::new(path)
    }
}

/// `(path)`, `(File parent, child)`, `(parent, child)`.
fn path_factories<T: From<PathBuf> + 'static>() -> Vec<Factory<T>> {
    vec![
        Factory::new(vec![Kind::Str], |args| Ok(T::from(args.arg::<PathBuf>()?))),
        Factory::new(vec![File::kind(), Kind::Str], |args| {
            let parent: File = args.arg()?;
            Ok(T::from(parent.path.join(args.arg::<String>()?)))
        }),
        Factory::new(vec![Kind::Str, Kind::Str], |args| {
            let parent: PathBuf = args.arg()?;
            Ok(T::from(parent.join(args.arg::<String>()?)))
        }),
    ]
}

/// A `File` argument alone.
fn file_factory<T: From<PathBuf> + 'static>() -> Factory<T> {
    Factory::new(vec![File::kind()], |args| Ok(T::from(args.arg::<File>()?.path)))
}

impl Constructible for File {
    const TYPE_NAME: &'static str = File::TYPE_NAME;

    fn factories() -> Vec<Factory<Self>> {
        path_factories()
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(self))
    }
}

fn canonical(type_name: &'static str, path: &FsPath) -> Result<Value, ConstructError> {
    let canonical = std::fs::canonicalize(path).map_err(|e| {
        ConstructError::instantiation_with(
            type_name,
            format!("cannot resolve '{}'", path.display()),
            e,
        )
    })?;
    Ok(Value::object(File::new(canonical)))
}

/// Builder: the canonical path of a file that must exist.
#[derive(Debug)]
pub struct ExistingFile(PathBuf);

impl From<PathBuf> for ExistingFile {
    fn from(path: PathBuf) -> Self {
        ExistingFile(path)
    }
}

impl Constructible for ExistingFile {
    const TYPE_NAME: &'static str = "omni.io.ExistingFile";

    fn factories() -> Vec<Factory<Self>> {
        let mut factories = path_factories();
        factories.push(file_factory());
        factories
    }

    fn finish(self) -> Result<Value, ConstructError> {
        if !self.0.exists() {
            return Err(ConstructError::instantiation(
                Self::TYPE_NAME,
                format!("file '{}' does not exist", self.0.display()),
            ));
        }
        canonical(Self::TYPE_NAME, &self.0)
    }
}

/// Builder: the absolute path of a file that must not exist yet.
#[derive(Debug)]
pub struct NonExistingFile(PathBuf);

impl From<PathBuf> for NonExistingFile {
    fn from(path: PathBuf) -> Self {
        NonExistingFile(path)
    }
}

impl Constructible for NonExistingFile {
    const TYPE_NAME: &'static str = "omni.io.NonExistingFile";

    fn factories() -> Vec<Factory<Self>> {
        let mut factories = path_factories();
        factories.push(file_factory());
        factories
    }

    fn finish(self) -> Result<Value, ConstructError> {
        if self.0.exists() {
            return Err(ConstructError::instantiation(
                Self::TYPE_NAME,
                format!("file '{}' already exists", self.0.display()),
            ));
        }
        let absolute = std::path::absolute(&self.0).map_err(|e| {
            ConstructError::instantiation_with(Self::TYPE_NAME, "cannot make path absolute", e)
        })?;
        Ok(Value::object(File::new(absolute)))
    }
}

/// Builder: creates the directory (and parents) when missing.
#[derive(Debug)]
pub struct ForcedDirectory(PathBuf);

impl From<PathBuf> for ForcedDirectory {
    fn from(path: PathBuf) -> Self {
        ForcedDirectory(path)
    }
}

impl Constructible for ForcedDirectory {
    const TYPE_NAME: &'static str = "omni.io.ForcedDirectory";

    fn factories() -> Vec<Factory<Self>> {
        path_factories()
    }

    fn finish(self) -> Result<Value, ConstructError> {
        if !self.0.exists() {
            std::fs::create_dir_all(&self.0).map_err(|e| {
                ConstructError::instantiation_with(
                    Self::TYPE_NAME,
                    format!("unable to create '{}'", self.0.display()),
                    e,
                )
            })?;
        }
        if !self.0.is_dir() {
            return Err(ConstructError::instantiation(
                Self::TYPE_NAME,
                format!("'{}' is not a directory", self.0.display()),
            ));
        }
        canonical(Self::TYPE_NAME, &self.0)
    }
}

/// Builder: directory entries whose names end with `suffix`, sorted by name.
#[derive(Debug)]
pub struct FilesInDir {
    dir: PathBuf,
    suffix: String,
}

impl From<PathBuf> for FilesInDir {
    fn from(dir: PathBuf) -> Self {
        FilesInDir {
            dir,
            suffix: String::new(),
        }
    }
}

impl Constructible for FilesInDir {
    const TYPE_NAME: &'static str = "omni.io.FilesInDir";

    fn factories() -> Vec<Factory<Self>> {
        let mut factories = path_factories();
        factories.push(file_factory());
        factories
    }

    fn setters() -> Vec<Slot> {
        vec![Slot::new("suffix", Kind::Str)]
    }

    fn inject(&mut self, target: Target<'_>, value: Value) -> Result<(), ConstructError> {
        self.suffix = slot_value(Self::TYPE_NAME, target.key(), value)?;
        Ok(())
    }

    fn finish(self) -> Result<Value, ConstructError> {
        if !self.dir.exists() {
            return Err(ConstructError::instantiation(
                Self::TYPE_NAME,
                format!("directory '{}' does not exist", self.dir.display()),
            ));
        }
        if !self.dir.is_dir() {
            return Err(ConstructError::instantiation(
                Self::TYPE_NAME,
                format!("'{}' is not a directory", self.dir.display()),
            ));
        }
        let read_error = |e: std::io::Error| {
            ConstructError::instantiation_with(
                Self::TYPE_NAME,
                format!("cannot list '{}'", self.dir.display()),
                e,
            )
        };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            if entry.file_name().to_string_lossy().ends_with(&self.suffix) {
                paths.push(entry.path());
            }
        }
        paths.sort();
        let items = paths.into_iter().map(|p| Value::object(File::new(p))).collect();
        Ok(Value::array(File::kind(), items))
    }
}

/// Builder: a path from one string or from joined parts.
#[derive(Debug)]
pub struct Path(PathBuf);

impl Constructible for Path {
    const TYPE_NAME: &'static str = "omni.io.Path";

    fn factories() -> Vec<Factory<Self>> {
        vec![
            Factory::new(vec![Kind::Str], |args| Ok(Path(args.arg()?))),
            Factory::new(vec![Kind::array(Kind::Str)], |args| {
                let parts: Vec<String> = args.arg()?;
                Ok(Path(parts.iter().collect()))
            }),
        ]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(File::new(self.0)))
    }
}

/// Builder: every line of one or more files, in order.
#[derive(Debug)]
pub struct StringArrayFromFile(Vec<PathBuf>);

impl Constructible for StringArrayFromFile {
    const TYPE_NAME: &'static str = "omni.io.StringArrayFromFile";

    fn factories() -> Vec<Factory<Self>> {
        vec![
            Factory::new(vec![File::kind()], |args| {
                Ok(StringArrayFromFile(vec![args.arg::<File>()?.path]))
            }),
            Factory::new(vec![Kind::Str], |args| Ok(StringArrayFromFile(vec![args.arg()?]))),
            Factory::new(vec![Kind::array(File::kind())], |args| {
                let files: ArrayValue = args.arg()?;
                let paths = files
                    .iter()
                    .cloned()
                    .filter_map(File::from_value)
                    .map(|file| file.path)
                    .collect();
                Ok(StringArrayFromFile(paths))
            }),
        ]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        let mut lines = Vec::new();
        for path in &self.0 {
            let text = std::fs::read_to_string(path).map_err(|e| {
                ConstructError::instantiation_with(
                    Self::TYPE_NAME,
                    format!("cannot read '{}'", path.display()),
                    e,
                )
            })?;
            lines.extend(text.lines().map(str::to_owned));
        }
        Ok(Value::string_array(lines))
    }
}

/// A named resource on the resource path, `omni.io.Resource`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    name: String,
}

impl Resource {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource:{}", self.name)
    }
}

impl Object for Resource {
    fn type_name(&self) -> &'static str {
        <Self as Constructible>::TYPE_NAME
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &["Source"]
    }

    fn dyn_eq(&self, other: &dyn Object) -> bool {
        eq_as(self, other)
    }

    fn as_source(&self) -> Option<Source> {
        Some(Source::Resource(self.name.clone()))
    }
}

impl Constructible for Resource {
    const TYPE_NAME: &'static str = "omni.io.Resource";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![Kind::Str], |args: &mut Args| {
            Ok(Resource { name: args.arg()? })
        })]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(self))
    }
}

//! Entry points that load a configuration and run the object stored under `run`.

use std::fmt;
use std::path::{Path, PathBuf};

use omni_construct::builtins::File;
use omni_construct::{
    slot_value, BoxError, CollectedErrors, ConstructError, Constraints, Constructible, Factory,
    Slot, Target,
};
use omni_ir::{ArrayValue, Kind, Object, ObjectRef, RunError, Runnable, Value};
use rayon::prelude::*;

use crate::error::LoadError;
use crate::map::MapProperties;
use crate::properties::Properties;

/// Key the runners look up.
pub const RUN_KEY: &str = "run";

/// Key [`generic_main`] sets to the directory holding the configuration.
pub const BASE_DIR_KEY: &str = "BASE_DIR";

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no runnable object under '{key}'")]
    MissingRunnable { key: String },

    #[error("'{key}' holds a {kind}, which is not runnable")]
    NotRunnable { key: String, kind: Kind },

    #[error("run failed")]
    Run(#[from] RunError),

    #[error("{0}")]
    InvalidArgument(String),
}

/// The runnable object stored under `key`.
pub fn runnable<P: Properties + ?Sized>(store: &P, key: &str) -> Result<ObjectRef, LaunchError> {
    match store.get(key) {
        None => Err(LaunchError::MissingRunnable {
            key: key.to_owned(),
        }),
        Some(Value::Object(obj)) if obj.get().as_runnable().is_some() => Ok(obj),
        Some(other) => Err(LaunchError::NotRunnable {
            key: key.to_owned(),
            kind: other.kind(),
        }),
    }
}

fn run_object(obj: &ObjectRef) -> Result<(), RunError> {
    match obj.get().as_runnable() {
        Some(runnable) => runnable.run(),
        None => Err(RunError::new(format!("{} is not runnable", obj.type_name()))),
    }
}

/// Load `path` into a fresh store and run the object under `key`.
pub fn run_file(path: &Path, key: &str) -> Result<(), LaunchError> {
    let mut store = MapProperties::new();
    store.read_from_path(path)?;
    let target = runnable(&store, key)?;
    tracing::debug!(path = %path.display(), key, "running");
    run_object(&target)?;
    Ok(())
}

/// Load `config` with `BASE_DIR` and `KEY=VALUE` arguments preset, then run `run`.
///
/// Argument values are stored as strings. `BASE_DIR` is the absolute
/// directory containing `config`, as a File object.
pub fn generic_main(config: &Path, args: &[String]) -> Result<(), LaunchError> {
    let mut store = MapProperties::new();
    let absolute = std::path::absolute(config).map_err(|source| LoadError::Io {
        origin: format!("file '{}'", config.display()),
        source,
    })?;
    let base_dir = absolute.parent().map_or_else(PathBuf::new, Path::to_path_buf);
    store.put(BASE_DIR_KEY, Value::object(File::new(base_dir)));

    for arg in args {
        let (key, value) = split_argument(arg)?;
        store.put(key, Value::str(value));
    }

    store.read_from_path(config)?;
    run_object(&runnable(&store, RUN_KEY)?)?;
    Ok(())
}

fn split_argument(arg: &str) -> Result<(&str, &str), LaunchError> {
    let mut parts = arg.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !value.is_empty() => Ok((key, value)),
        _ => Err(LaunchError::InvalidArgument(format!(
            "arguments must be given as KEY=VALUE, got '{arg}'"
        ))),
    }
}

/// Runs one configuration file per item on a worker pool.
///
/// For each entry of `items` a fresh store gets `itemName = item` plus every
/// extra named argument, then `runOprops` is loaded into it. All loads happen
/// up front on the calling thread; the resulting `run` objects then execute on
/// `parallelity` workers. Failures of individual runs are collected.
///
/// ```text
/// run = ParallelRunnable()[
///     runOprops = File('job.omniprop'),
///     items = {'a', 'b', 'c'},
///     itemName = 'input',
///     outDir = 'out'
/// ];
/// ```
#[derive(Debug)]
pub struct ParallelRunnable {
    run_oprops: Option<File>,
    items: Option<ArrayValue>,
    item_name: Option<String>,
    parallelity: i32,
    extras: Vec<(String, Value)>,
}

impl Default for ParallelRunnable {
    fn default() -> Self {
        let cores = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        ParallelRunnable {
            run_oprops: None,
            items: None,
            item_name: None,
            parallelity: i32::try_from(cores).unwrap_or(i32::MAX),
            extras: Vec::new(),
        }
    }
}

impl fmt::Display for ParallelRunnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParallelRunnable(")?;
        if let Some(file) = &self.run_oprops {
            write!(f, "{file}")?;
        }
        write!(f, ", parallelity={})", self.parallelity)
    }
}

impl Object for ParallelRunnable {
    fn type_name(&self) -> &'static str {
        <Self as Constructible>::TYPE_NAME
    }

    fn capabilities(&self) -> &'static [&'static str] {
        &["Runnable"]
    }

    fn as_runnable(&self) -> Option<&dyn Runnable> {
        Some(self)
    }

    fn violations(&self) -> Vec<String> {
        Constraints::new()
            .not_null("runOprops", &self.run_oprops)
            .not_null("items", &self.items)
            .not_null("itemName", &self.item_name)
            .not_empty("itemName", self.item_name.as_deref() == Some(""))
            .min("parallelity", i64::from(self.parallelity), 1)
            .finish()
    }
}

impl ParallelRunnable {
    fn load_jobs(
        &self,
        path: &Path,
        items: &ArrayValue,
        item_name: &str,
    ) -> Result<Vec<ObjectRef>, RunError> {
        let mut jobs = Vec::with_capacity(items.len());
        for item in items {
            tracing::info!(item_name, %item, parallelity = self.parallelity, "scheduling run");
            let mut store = MapProperties::new();
            store.put(item_name, item.clone());
            store.put_all(self.extras.clone());
            store.read_from_path(path).map_err(|e| {
                let message = format!("cannot load '{}' for {item_name}={item}", path.display());
                RunError::with_source(message, e)
            })?;
            let job = runnable(&store, RUN_KEY).map_err(|e| {
                RunError::with_source(format!("nothing to run for {item_name}={item}"), e)
            })?;
            jobs.push(job);
        }
        Ok(jobs)
    }
}

impl Runnable for ParallelRunnable {
    fn run(&self) -> Result<(), RunError> {
        let (Some(file), Some(items), Some(item_name)) =
            (&self.run_oprops, &self.items, &self.item_name)
        else {
            return Err(RunError::new("runOprops, items, and itemName must be set"));
        };
        let jobs = self.load_jobs(file.path(), items, item_name)?;

        let workers = usize::try_from(self.parallelity.max(1)).unwrap_or(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| RunError::with_source("cannot start worker pool", e))?;

        let total = jobs.len();
        let failures: Vec<BoxError> = pool.install(|| {
            jobs.par_iter()
                .enumerate()
                .filter_map(|(index, job)| {
                    let result = run_object(job);
                    tracing::info!(index, total, ok = result.is_ok(), "run finished");
                    result.err().map(BoxError::from)
                })
                .collect()
        });
        failures
            .into_iter()
            .collect::<CollectedErrors>()
            .into_result()
            .map_err(|errors| {
                RunError::with_source(format!("{} of {total} runs failed", errors.len()), errors)
            })
    }
}

impl Constructible for ParallelRunnable {
    const TYPE_NAME: &'static str = "omni.run.ParallelRunnable";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![], |_| Ok(ParallelRunnable::default()))]
    }

    fn setters() -> Vec<Slot> {
        vec![
            Slot::new("runOprops", File::kind()),
            Slot::new("items", Kind::array(Kind::Any)),
            Slot::new("itemName", Kind::Str),
            Slot::new("parallelity", Kind::Int),
        ]
    }

    /// Everything else is handed to each run's store.
    fn put_kind() -> Option<Kind> {
        Some(Kind::Any)
    }

    fn inject(&mut self, target: Target<'_>, value: Value) -> Result<(), ConstructError> {
        let key = target.key();
        match target {
            Target::Setter("runOprops") => {
                self.run_oprops = Some(slot_value(Self::TYPE_NAME, key, value)?);
            }
            Target::Setter("items") => self.items = Some(slot_value(Self::TYPE_NAME, key, value)?),
            Target::Setter("itemName") => {
                self.item_name = Some(slot_value(Self::TYPE_NAME, key, value)?);
            }
            Target::Setter("parallelity") => {
                self.parallelity = slot_value(Self::TYPE_NAME, key, value)?;
            }
            _ => self.extras.push((key.to_owned(), value)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(self))
    }
}

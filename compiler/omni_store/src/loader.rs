//! Evaluation of configuration sources into a store.
//!
//! A source is parsed completely, then its statements run in order against
//! the target store:
//!
//! - `key = expr;` evaluates `expr` and stores it.
//! - `key ~ expr;` evaluates and stores only when `key` is absent.
//! - `include expr;` evaluates `expr` to a file, URL, or resource and loads
//!   it into the same store before continuing.
//!
//! Variables resolve against the store as it is at that point, so later
//! statements see earlier assignments and included entries. The first failure
//! aborts the load; statements already run stay applied.

use std::io::Read;
use std::path::{Path, PathBuf};

use omni_construct::{ClassRegistry, ConstraintValidator, Engine, ResourcePath, Validator};
use omni_ir::ast::{Expr, ExprKind, Key, Program, Stmt, StmtKind};
use omni_ir::{ArrayValue, Kind, LineOffsetTable, Source, Span, Value};
use omni_parse::{ParseError, SELF_KEY};
use omni_stack::ensure_sufficient_stack;

use omni_construct::builtins::File;

use crate::error::LoadError;
use crate::properties::Properties;
use crate::registry::standard_registry;

/// Key set by `read_from_path` to the file just read.
pub const OPROPS_LOCATION: &str = "OPROPS_LOCATION";

/// Includes nested deeper than this fail with [`LoadError::IncludeDepth`].
pub const MAX_INCLUDE_DEPTH: usize = 64;

/// Reads sources into stores using a registry, validator, and resource path.
#[derive(Clone, Copy)]
pub struct Loader<'a> {
    engine: Engine<'a>,
    resources: &'a ResourcePath,
}

impl Loader<'static> {
    /// Builtin types, constraint validation, and the global resource path.
    pub fn standard() -> Self {
        Loader::new(standard_registry(), &ConstraintValidator, ResourcePath::global())
    }
}

impl<'a> Loader<'a> {
    pub fn new(
        registry: &'a ClassRegistry,
        validator: &'a dyn Validator,
        resources: &'a ResourcePath,
    ) -> Self {
        Loader {
            engine: Engine::new(registry, validator),
            resources,
        }
    }

    pub fn read_str<P: Properties + ?Sized>(
        &self,
        store: &mut P,
        source: &str,
    ) -> Result<(), LoadError> {
        self.eval_text(store, source, "string", 0)
    }

    pub fn read_reader<P: Properties + ?Sized>(
        &self,
        store: &mut P,
        reader: &mut dyn Read,
    ) -> Result<(), LoadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Io {
                origin: "stream".to_owned(),
                source,
            })?;
        self.eval_text(store, &text, "stream", 0)
    }

    pub fn read_resource<P: Properties + ?Sized>(
        &self,
        store: &mut P,
        name: &str,
    ) -> Result<(), LoadError> {
        self.load_source(store, &Source::Resource(name.to_owned()), 0)
    }

    pub fn read_path<P: Properties + ?Sized>(
        &self,
        store: &mut P,
        path: &Path,
    ) -> Result<(), LoadError> {
        self.load_source(store, &Source::File(path.to_owned()), 0)?;
        store.put(OPROPS_LOCATION, Value::object(File::new(path)));
        Ok(())
    }

    pub fn read_url<P: Properties + ?Sized>(
        &self,
        store: &mut P,
        url: &str,
    ) -> Result<(), LoadError> {
        self.load_source(store, &Source::Url(url.to_owned()), 0)
    }

    fn load_source<P: Properties + ?Sized>(
        &self,
        store: &mut P,
        source: &Source,
        depth: usize,
    ) -> Result<(), LoadError> {
        if depth > MAX_INCLUDE_DEPTH {
            return Err(LoadError::IncludeDepth(MAX_INCLUDE_DEPTH));
        }
        let text = self.fetch(source)?;
        self.eval_text(store, &text, &source.to_string(), depth)
    }

    fn fetch(&self, source: &Source) -> Result<String, LoadError> {
        match source {
            Source::File(path) => read_file(path, source),
            Source::Resource(name) => {
                let path = self
                    .resources
                    .find(name)
                    .ok_or_else(|| LoadError::ResourceNotFound(name.clone()))?;
                read_file(&path, source)
            }
            Source::Url(url) => fetch_url(url),
        }
    }

    fn eval_text<P: Properties + ?Sized>(
        &self,
        store: &mut P,
        text: &str,
        origin: &str,
        depth: usize,
    ) -> Result<(), LoadError> {
        let wrap = |source| LoadError::Parse {
            origin: origin.to_owned(),
            source,
        };
        let program = omni_parse::parse(text).map_err(wrap)?;
        tracing::debug!(origin, statements = program.stmts.len(), "loading");
        Evaluator {
            loader: self,
            store,
            text,
            lines: LineOffsetTable::build(text),
            depth,
        }
        .run(&program)
        .map_err(wrap)
    }
}

fn read_file(path: &Path, source: &Source) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        origin: source.to_string(),
        source: e,
    })
}

fn fetch_url(text: &str) -> Result<String, LoadError> {
    let fetch_error = |source: omni_construct::BoxError| LoadError::Fetch {
        url: text.to_owned(),
        source,
    };
    let url = url::Url::parse(text).map_err(|e| fetch_error(e.into()))?;
    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| fetch_error(format!("'{url}' is not a local path").into()))?;
            read_file(&path, &Source::File(path.clone()))
        }
        "http" | "https" => {
            tracing::debug!(%url, "fetching");
            reqwest::blocking::get(url.clone())
                .and_then(reqwest::blocking::Response::error_for_status)
                .and_then(reqwest::blocking::Response::text)
                .map_err(|e| fetch_error(e.into()))
        }
        scheme => Err(fetch_error(format!("unsupported url scheme '{scheme}'").into())),
    }
}

/// Walks one parsed source against a store.
struct Evaluator<'l, 's, P: Properties + ?Sized> {
    loader: &'l Loader<'l>,
    store: &'s mut P,
    text: &'s str,
    lines: LineOffsetTable,
    depth: usize,
}

impl<P: Properties + ?Sized> Evaluator<'_, '_, P> {
    fn error(&self, span: Span, message: impl Into<String>) -> ParseError {
        ParseError::with_table(&self.lines, self.text, span, message)
    }

    fn run(&mut self, program: &Program) -> Result<(), ParseError> {
        for stmt in &program.stmts {
            self.stmt(stmt)?;
        }
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), ParseError> {
        match &stmt.kind {
            StmtKind::Set { key, value } => {
                let value = self.eval(value)?;
                tracing::trace!(key = %key, kind = %value.kind(), "set");
                self.store.put(&key.name, value);
            }
            StmtKind::Default { key, value } => {
                if self.store.contains_key(&key.name) {
                    tracing::trace!(key = %key, "default skipped");
                } else {
                    let value = self.eval(value)?;
                    tracing::trace!(key = %key, kind = %value.kind(), "default");
                    self.store.put(&key.name, value);
                }
            }
            StmtKind::Include(expr) => self.include(expr, stmt.span)?,
        }
        Ok(())
    }

    fn include(&mut self, expr: &Expr, span: Span) -> Result<(), ParseError> {
        let value = self.eval(expr)?;
        let source = match &value {
            Value::Str(path) => Source::File(PathBuf::from(&**path)),
            Value::Object(obj) => obj.get().as_source().ok_or_else(|| {
                self.error(expr.span, format!("cannot include a value of type {}", obj.type_name()))
            })?,
            other => {
                return Err(self.error(
                    expr.span,
                    format!("cannot include a value of kind {}", other.kind()),
                ))
            }
        };
        tracing::debug!(%source, depth = self.depth + 1, "include");
        self.loader
            .load_source(self.store, &source, self.depth + 1)
            .map_err(|e| self.error(span, format!("cannot include {source}")).caused_by(e))
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, ParseError> {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> Result<Value, ParseError> {
        match &expr.kind {
            ExprKind::Literal(value) => Ok(value.clone()),
            ExprKind::Var(name) if name == SELF_KEY => {
                Ok(Value::object(self.store.to_property_map()))
            }
            ExprKind::Var(name) => self
                .store
                .get(name)
                .ok_or_else(|| self.error(expr.span, format!("variable '{name}' is not defined"))),
            ExprKind::Concat(lhs, rhs) => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                self.concat(lhs, rhs, expr.span)
            }
            ExprKind::Array { tag, elems } => {
                let declared = match tag {
                    Some(tag) => Some(self.tag_kind(tag)?),
                    None => None,
                };
                let items = elems
                    .iter()
                    .map(|elem| self.eval(elem))
                    .collect::<Result<Vec<_>, _>>()?;
                self.array(declared, items, elems, expr.span)
            }
            ExprKind::Construct {
                type_name,
                args,
                named,
            } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let named = named
                    .iter()
                    .map(|arg| Ok((arg.key.name.clone(), self.eval(&arg.value)?)))
                    .collect::<Result<Vec<_>, ParseError>>()?;
                tracing::trace!(%type_name, args = args.len(), named = named.len(), "construct");
                self.loader
                    .engine
                    .build(&type_name.name, args, named)
                    .map_err(|e| self.error(expr.span, e.to_string()).caused_by(e))
            }
        }
    }

    fn concat(&self, lhs: Value, rhs: Value, span: Span) -> Result<Value, ParseError> {
        match (lhs, rhs) {
            (Value::Str(s), rhs) => Ok(Value::str(format!("{s}{rhs}"))),
            (Value::Array(a), Value::Array(b)) => a.concat(&b).map(Value::Array).ok_or_else(|| {
                self.error(
                    span,
                    format!("cannot concatenate {}[] and {}[] arrays", a.elem(), b.elem()),
                )
            }),
            (lhs, rhs) => Err(self.error(
                span,
                format!("cannot concatenate {} and {}", lhs.kind(), rhs.kind()),
            )),
        }
    }

    /// Element kind named by an array tag: a primitive or a registered type.
    fn tag_kind(&self, tag: &Key) -> Result<Kind, ParseError> {
        if let Some(kind) = Kind::from_primitive_tag(&tag.name) {
            return Ok(kind);
        }
        let registry = self.loader.engine.registry();
        registry
            .lookup(&tag.name)
            .map(|_| Kind::object(registry.canonical_name(&tag.name)))
            .map_err(|e| self.error(tag.span, e.to_string()).caused_by(e))
    }

    fn array(
        &self,
        declared: Option<Kind>,
        items: Vec<Value>,
        elems: &[Expr],
        span: Span,
    ) -> Result<Value, ParseError> {
        let elem = match (&declared, items.first()) {
            (Some(kind), _) => kind.clone(),
            (None, Some(first)) => first.kind(),
            (None, None) => Kind::Any,
        };
        let mut coerced = Vec::with_capacity(items.len());
        for (item, expr) in items.into_iter().zip(elems) {
            let found = item.kind();
            match elem.coerce(item) {
                Some(item) => coerced.push(item),
                None if declared.is_some() => {
                    return Err(self.error(
                        expr.span,
                        format!("element of kind {found} does not fit a {elem} array"),
                    ))
                }
                None => {
                    return Err(self.error(
                        span,
                        format!("mixed array: element of kind {found} in a {elem} array"),
                    ))
                }
            }
        }
        Ok(Value::Array(ArrayValue::new(elem, coerced)))
    }
}

//! `ShellExecutor`: a runnable that executes an external command.

use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use omni_ir::{Kind, Object, RunError, Runnable, Value};

use super::io::File;
use crate::constructible::{Constructible, Factory, Slot, Target};
use crate::error::ConstructError;
use crate::value_conv::slot_value;

/// Runs `command` and echoes its standard output.
///
/// With a single string the command line is split on whitespace; with an
/// explicit argument array the program name is taken verbatim. A non-zero
/// exit status is logged, not reported as a failure. `dir` takes a File or
/// a path string.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellExecutor {
    program: String,
    args: Vec<String>,
    dir: Option<PathBuf>,
}

impl ShellExecutor {
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ShellExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShellExecutor({})", self.command_line())
    }
}

impl Object for ShellExecutor {
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
        crate::validate::Constraints::new()
            .not_empty("command", self.program.is_empty())
            .finish()
    }
}

impl Runnable for ShellExecutor {
    fn run(&self) -> Result<(), RunError> {
        let line = self.command_line();
        println!(" => executing command '{line}'");
        let mut command = Command::new(&self.program);
        command.args(&self.args).stdout(Stdio::piped());
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }
        let mut child = command
            .spawn()
            .map_err(|e| RunError::with_source(format!("cannot execute '{line}'"), e))?;
        if let Some(stdout) = child.stdout.take() {
            for output in BufReader::new(stdout).lines() {
                let output = output
                    .map_err(|e| RunError::with_source(format!("cannot read output of '{line}'"), e))?;
                println!("{output}");
            }
        }
        let status = child
            .wait()
            .map_err(|e| RunError::with_source(format!("cannot wait for '{line}'"), e))?;
        if status.success() {
            tracing::debug!(command = %line, "command finished");
        } else {
            tracing::warn!(command = %line, %status, "command exited unsuccessfully");
        }
        Ok(())
    }
}

impl Constructible for ShellExecutor {
    const TYPE_NAME: &'static str = "omni.run.ShellExecutor";

    fn factories() -> Vec<Factory<Self>> {
        vec![
            Factory::new(vec![Kind::Str], |args| {
                let line: String = args.arg()?;
                let mut words = line.split_whitespace().map(str::to_owned);
                Ok(ShellExecutor {
                    program: words.next().unwrap_or_default(),
                    args: words.collect(),
                    dir: None,
                })
            }),
            Factory::new(vec![Kind::Str, Kind::array(Kind::Str)], |args| {
                Ok(ShellExecutor {
                    program: args.arg()?,
                    args: args.arg()?,
                    dir: None,
                })
            }),
        ]
    }

    fn setters() -> Vec<Slot> {
        vec![Slot::new("dir", Kind::Any)]
    }

    fn inject(&mut self, target: Target<'_>, value: Value) -> Result<(), ConstructError> {
        let dir = match value.as_object().and_then(|obj| obj.downcast_ref::<File>()) {
            Some(file) => file.path().to_owned(),
            None => slot_value(Self::TYPE_NAME, target.key(), value)?,
        };
        self.dir = Some(dir);
        Ok(())
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(self))
    }
}

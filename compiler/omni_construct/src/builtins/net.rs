//! Network addresses.

use std::fmt;

use omni_ir::{eq_as, Kind, Object, Source, Value};

use crate::constructible::{Constructible, Factory};
use crate::error::ConstructError;

/// A parsed URL, `omni.net.Url`. Usable as an `include` source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url(url::Url);

impl Url {
    pub fn url(&self) -> &url::Url {
        &self.0
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Object for Url {
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
        Some(Source::Url(self.0.to_string()))
    }
}

impl Constructible for Url {
    const TYPE_NAME: &'static str = "omni.net.Url";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![Kind::Str], |args| {
            let text: String = args.arg()?;
            url::Url::parse(&text).map(Url).map_err(|e| {
                ConstructError::instantiation_with(
                    Self::TYPE_NAME,
                    format!("'{text}' is not a valid url"),
                    e,
                )
            })
        })]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(self))
    }
}

/// An unresolved `host:port` pair, `omni.net.SocketAddress`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocketAddress {
    host: String,
    port: u16,
}

impl SocketAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        SocketAddress {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for SocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl Object for SocketAddress {
    fn type_name(&self) -> &'static str {
        <Self as Constructible>::TYPE_NAME
    }

    fn dyn_eq(&self, other: &dyn Object) -> bool {
        eq_as(self, other)
    }
}

impl Constructible for SocketAddress {
    const TYPE_NAME: &'static str = "omni.net.SocketAddress";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![Kind::Str, Kind::Int], |args| {
            let host: String = args.arg()?;
            let port: i32 = args.arg()?;
            let port = u16::try_from(port).map_err(|_| {
                ConstructError::instantiation(
                    Self::TYPE_NAME,
                    format!("port out of range: {port}"),
                )
            })?;
            Ok(SocketAddress::new(host, port))
        })]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(self))
    }
}

#[cfg(test)]
mod tests;

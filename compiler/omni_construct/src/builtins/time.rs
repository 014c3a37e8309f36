//! `TimeZone(id)`: an IANA zone checked against the tz database.

use std::fmt;

use chrono_tz::Tz;
use omni_ir::{eq_as, Kind, Object, Value};

use crate::constructible::{Constructible, Factory};
use crate::error::ConstructError;

/// A validated time zone, `omni.time.TimeZone`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeZone(Tz);

impl TimeZone {
    pub fn tz(&self) -> Tz {
        self.0
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl Object for TimeZone {
    fn type_name(&self) -> &'static str {
        <Self as Constructible>::TYPE_NAME
    }

    fn dyn_eq(&self, other: &dyn Object) -> bool {
        eq_as(self, other)
    }
}

impl Constructible for TimeZone {
    const TYPE_NAME: &'static str = "omni.time.TimeZone";

    fn factories() -> Vec<Factory<Self>> {
        vec![Factory::new(vec![Kind::Str], |args| {
            let id: String = args.arg()?;
            id.parse::<Tz>().map(TimeZone).map_err(|_| {
                ConstructError::instantiation(
                    Self::TYPE_NAME,
                    format!("'{id}' is not a valid timezone id"),
                )
            })
        })]
    }

    fn finish(self) -> Result<Value, ConstructError> {
        Ok(Value::object(self))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::builtins::test_build as build;

    #[test]
    fn test_valid_zone() {
        let value = build("TimeZone", vec![Value::str("Europe/Berlin")], vec![]).unwrap();
        let zone = value.as_object().unwrap().downcast_ref::<TimeZone>().copied();
        assert_eq!(zone.map(|z| z.tz()), Some(chrono_tz::Europe::Berlin));
        assert_eq!(value.to_string(), "Europe/Berlin");
    }

    #[test]
    fn test_invalid_zone() {
        let err = build("TimeZone", vec![Value::str("Mars/Base")], vec![]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot create 'omni.time.TimeZone': 'Mars/Base' is not a valid timezone id"
        );
    }
}

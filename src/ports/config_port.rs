//! Configuration access port trait.
//!
//! Typed getters return the default only when the key is absent. A value
//! that is present but does not parse is a `ConfigInvalid` error.

use crate::domain::error::IntrinsicError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, IntrinsicError>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, IntrinsicError>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> Result<bool, IntrinsicError>;
}

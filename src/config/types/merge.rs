//! Deep merge of TOML tables.

use toml::{Table, Value};

/// Merge `other` into `base`, recursing into nested tables.
///
/// Tables merge key by key. Every other value in `other`, arrays included,
/// replaces the value in `base` wholesale.
pub fn deep_merge(base: &mut Table, other: &Table) {
    for (key, value) in other {
        match (base.get_mut(key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

//! Serde adapter storing a [`Mode`] by its lower-case name.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use theknob_core::Mode;

pub(crate) fn serialize<S: Serializer>(mode: &Mode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(mode.name())
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mode, D::Error> {
    let name = String::deserialize(deserializer)?;
    Mode::from_name(&name).ok_or_else(|| {
        D::Error::custom(format!(
            "unknown mode '{name}' (expected violet, teal or crimson)"
        ))
    })
}

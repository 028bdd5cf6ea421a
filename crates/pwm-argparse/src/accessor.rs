//! Typed read access to parsed options.

use crate::entry::OptionEntry;
use crate::error::AccessError;
use crate::value::OptionValue;

/// Borrowed view of one entry of a registry.
#[derive(Debug, Clone, Copy)]
pub struct OptionRef<'a> {
    entry: &'a OptionEntry,
}

impl<'a> OptionRef<'a> {
    pub(crate) fn new(entry: &'a OptionEntry) -> Self {
        Self { entry }
    }

    pub fn entry(&self) -> &'a OptionEntry {
        self.entry
    }

    /// Set on the command line, or holding defaults.
    pub fn is_present(&self) -> bool {
        self.entry.is_present()
    }

    /// Read the current values as `T`.
    ///
    /// A scalar `T` yields the first value; `Vec<T>` yields all of them.
    /// Bound values take precedence over defaults.
    pub fn value_as<T: FromOptionValues>(&self) -> Result<T, AccessError> {
        T::from_entry(self.entry)
    }
}

/// Types [`OptionRef::value_as`] can produce.
pub trait FromOptionValues: Sized {
    fn from_entry(entry: &OptionEntry) -> Result<Self, AccessError>;
}

fn effective<T: OptionValue>(entry: &OptionEntry) -> Result<&[T], AccessError> {
    let mismatch = |declared| AccessError::TypeMismatch {
        option: entry.display_name(),
        requested: T::KIND.name(),
        declared,
    };
    let slot = entry.values().ok_or_else(|| mismatch("flag"))?;
    let values = slot
        .downcast::<T>()
        .ok_or_else(|| mismatch(slot.kind().name()))?;
    let effective = values.effective();
    if effective.is_empty() {
        return Err(AccessError::NoValue {
            option: entry.display_name(),
        });
    }
    Ok(effective)
}

macro_rules! from_option_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromOptionValues for $ty {
                fn from_entry(entry: &OptionEntry) -> Result<Self, AccessError> {
                    Ok(effective::<$ty>(entry)?[0].clone())
                }
            }

            impl FromOptionValues for Vec<$ty> {
                fn from_entry(entry: &OptionEntry) -> Result<Self, AccessError> {
                    Ok(effective::<$ty>(entry)?.to_vec())
                }
            }
        )*
    };
}

from_option_values!(String, i32, i64, u32, u64, f32, f64);

#[cfg(test)]
mod tests {
    use crate::error::AccessError;
    use crate::registry::OptionRegistry;
    use crate::value::ValueSpec;

    fn registry() -> OptionRegistry {
        OptionRegistry::builder()
            .short("v", "verbose")
            .short_value("n", ValueSpec::<i64>::new().with_limit(3).unwrap(), "count")
            .long_value(
                "col ",
                ValueSpec::<String>::new().unlimited().with_default(["srv", "user"]),
                "columns",
            )
            .long_value("memo", ValueSpec::<String>::new(), "memo")
            .build()
            .unwrap()
    }

    #[test]
    fn scalar_reads_first_and_vec_reads_all() {
        let mut registry = registry();
        registry.parse(&["-n", "4", "5"]).unwrap();
        let n = registry.get("n").unwrap();
        assert_eq!(n.value_as::<i64>().unwrap(), 4);
        assert_eq!(n.value_as::<Vec<i64>>().unwrap(), [4, 5]);
    }

    #[test]
    fn defaults_are_read_until_values_are_bound() {
        let mut registry = registry();
        assert_eq!(
            registry.get("col").unwrap().value_as::<Vec<String>>().unwrap(),
            ["srv", "user"]
        );
        registry.parse(&["--col", "pw"]).unwrap();
        assert_eq!(
            registry.get("col").unwrap().value_as::<Vec<String>>().unwrap(),
            ["pw"]
        );
    }

    #[test]
    fn wrong_type_is_reported() {
        let registry = registry();
        let err = registry.get("col").unwrap().value_as::<i32>().unwrap_err();
        assert_eq!(
            err,
            AccessError::TypeMismatch {
                option: "--col".to_string(),
                requested: "i32",
                declared: "string",
            }
        );
        let err = registry.get("v").unwrap().value_as::<String>().unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { declared: "flag", .. }));
    }

    #[test]
    fn unset_option_has_no_value() {
        let registry = registry();
        let memo = registry.get("memo").unwrap();
        assert!(!memo.is_present());
        assert_eq!(
            memo.value_as::<String>().unwrap_err(),
            AccessError::NoValue {
                option: "--memo".to_string()
            }
        );
    }

    #[test]
    fn unknown_name_is_reported() {
        let registry = registry();
        assert_eq!(
            registry.get("nope").unwrap_err(),
            AccessError::NoSuchOption {
                name: "nope".to_string()
            }
        );
    }
}

//! Declarative, typed command-line option parsing.
//!
//! Options are declared up front on a [`Builder`]: short (`-o`), long
//! (`--name`, `--name=value`, `--name value...`) and at most one positional.
//! [`OptionRegistry::parse`] scans an argument vector against those
//! declarations, binds converted values, and validates counts and
//! constraints. Values are read back through [`OptionRef::value_as`].
//!
//! ```
//! use pwm_argparse::{OptionRegistry, PositionalOptions, ValueSpec};
//!
//! let mut top = OptionRegistry::builder()
//!     .long("help", "Show options")
//!     .positional_with(
//!         ValueSpec::<String>::new().with_label("command"),
//!         "Subcommand",
//!         PositionalOptions::default().pause(),
//!     )
//!     .build()?;
//!
//! let args = ["get", "--col", "srv", "user"];
//! let rest = top.parse(&args)?;
//! assert_eq!(top.positional()?.value_as::<String>()?, "get");
//!
//! let mut get = OptionRegistry::builder()
//!     .long_value("col ", ValueSpec::<String>::new().unlimited(), "Columns")
//!     .build()?;
//! get.parse(&args[rest..])?;
//! assert_eq!(get.get("col")?.value_as::<Vec<String>>()?, ["srv", "user"]);
//! # Ok::<(), pwm_argparse::Error>(())
//! ```

mod accessor;
mod builder;
mod entry;
pub mod error;
mod help;
mod name;
mod registry;
pub mod token;
mod value;

pub use accessor::{FromOptionValues, OptionRef};
pub use builder::{Builder, PositionalOptions};
pub use entry::{ArgPattern, Bucket, OptionEntry};
pub use error::{
    AccessError, ConfigError, ConversionError, Error, ParseError, Result, ValidationError,
};
pub use help::HelpLayout;
pub use name::OptionName;
pub use registry::OptionRegistry;
pub use value::{OptionValue, UNLIMITED, ValueKind, ValueSlot, ValueSpec, Values};

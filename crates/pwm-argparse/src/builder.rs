//! Fluent declaration of an [`OptionRegistry`].

use crate::entry::{ArgPattern, Bucket, OptionEntry};
use crate::error::ConfigError;
use crate::name::OptionName;
use crate::registry::OptionRegistry;
use crate::value::{OptionValue, ValueSpec};

/// Settings specific to the positional option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionalOptions {
    pause: bool,
}

impl PositionalOptions {
    /// Stop the whole parse once the positional option reaches its limit.
    pub fn pause(mut self) -> Self {
        self.pause = true;
        self
    }

    pub fn pauses(&self) -> bool {
        self.pause
    }
}

/// Collects declarations and reports the first configuration error on
/// [`Builder::build`].
///
/// ```
/// use pwm_argparse::{OptionRegistry, ValueSpec};
///
/// let mut registry = OptionRegistry::builder()
///     .long("help", "Show options")
///     .long_value("srv ", ValueSpec::<String>::new().with_label("service"), "Service name")
///     .build()?;
/// registry.parse(&["--srv", "mail"])?;
/// assert_eq!(registry.get("srv")?.value_as::<String>()?, "mail");
/// # Ok::<(), pwm_argparse::Error>(())
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct Builder {
    registry: OptionRegistry,
    error: Option<ConfigError>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue declaring on top of an existing registry's entries.
    ///
    /// Combined with [`Clone`] this lets one template of shared options feed
    /// several parsers.
    pub fn extend(registry: OptionRegistry) -> Self {
        Self {
            registry,
            error: None,
        }
    }

    /// `-name` flag.
    pub fn short(self, name: &str, description: &str) -> Self {
        self.declare(|| Ok(OptionEntry::flag(Bucket::Short, OptionName::new(name)?, description)))
    }

    /// `-name value...` option.
    pub fn short_value<T: OptionValue>(
        self,
        name: &str,
        spec: ValueSpec<T>,
        description: &str,
    ) -> Self {
        self.declare(|| {
            spec.verify()?;
            Ok(OptionEntry::short(OptionName::new(name)?, spec, description))
        })
    }

    /// `--name` flag.
    pub fn long(self, name: &str, description: &str) -> Self {
        self.declare(|| Ok(OptionEntry::flag(Bucket::Long, OptionName::new(name)?, description)))
    }

    /// `--name` valued option.
    ///
    /// A trailing `=` in `name` restricts it to `--name=value`, a trailing
    /// space to `--name value...`; without a marker both forms are accepted.
    pub fn long_value<T: OptionValue>(
        self,
        name: &str,
        spec: ValueSpec<T>,
        description: &str,
    ) -> Self {
        self.declare(|| {
            let (bare, pattern) = split_pattern(name);
            spec.verify()?;
            Ok(OptionEntry::long(OptionName::new(bare)?, pattern, spec, description))
        })
    }

    /// The positional option. Only one may be declared.
    pub fn positional<T: OptionValue>(self, spec: ValueSpec<T>, description: &str) -> Self {
        self.positional_with(spec, description, PositionalOptions::default())
    }

    pub fn positional_with<T: OptionValue>(
        self,
        spec: ValueSpec<T>,
        description: &str,
        options: PositionalOptions,
    ) -> Self {
        self.declare(|| {
            spec.verify()?;
            Ok(OptionEntry::positional(spec, description, options.pause))
        })
    }

    fn declare<F>(mut self, make: F) -> Self
    where
        F: FnOnce() -> Result<OptionEntry, ConfigError>,
    {
        if self.error.is_some() {
            return self;
        }
        let result = make().and_then(|entry| {
            tracing::trace!(option = %entry.full_name(), "declared option");
            self.registry.push(entry)
        });
        if let Err(err) = result {
            self.error = Some(err);
        }
        self
    }

    pub fn build(self) -> Result<OptionRegistry, ConfigError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.registry),
        }
    }
}

fn split_pattern(name: &str) -> (&str, ArgPattern) {
    if let Some(bare) = name.strip_suffix('=') {
        (bare, ArgPattern::Assign)
    } else if let Some(bare) = name.strip_suffix(' ') {
        (bare, ArgPattern::Space)
    } else {
        (name, ArgPattern::Both)
    }
}

//! Error taxonomy for declaring, parsing, validating and reading options.
//!
//! Every error is returned to the immediate caller. Nothing here is logged,
//! retried or swallowed; presentation is left to the front-end.

use thiserror::Error;

/// Raised while declaring options. Never recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid option name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("value limit must be at least 1")]
    ZeroLimit,

    #[error("value limit {limit} is smaller than the {defaults} configured default value(s)")]
    LimitBelowDefaults { limit: usize, defaults: usize },

    #[error("default value '{value}' does not satisfy the constraint")]
    DefaultViolatesConstraint { value: String },

    #[error("only one positional option can be declared")]
    DuplicatePositional,
}

/// A token could not be converted into the option's value type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{token}' cannot be converted to {target}")]
pub struct ConversionError {
    pub token: String,
    pub target: &'static str,
}

impl ConversionError {
    pub fn new(token: impl Into<String>, target: &'static str) -> Self {
        Self {
            token: token.into(),
            target,
        }
    }
}

/// Raised while scanning the argument vector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown option: {token}")]
    UnknownOption { token: String },

    #[error("option {option} cannot take any more values")]
    TooManyValues { option: String },

    #[error("option {option} requires a value")]
    MissingValue { option: String },

    #[error("invalid value for option {option}: {source}")]
    Conversion {
        option: String,
        #[source]
        source: ConversionError,
    },

    #[error("no positional option accepts '{token}'")]
    NoPositional { token: String },

    #[error("positional option cannot take another value: '{token}'")]
    PositionalFull { token: String },
}

/// Raised by `validate()` on the values an entry currently holds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("too few values: {found} given, at least {required} required")]
    TooFew { required: usize, found: usize },

    #[error("too many values: {found} given, at most {limit} allowed")]
    TooMany { limit: usize, found: usize },

    #[error("value '{value}' does not satisfy the constraint")]
    ConstraintViolated { value: String },
}

/// Raised when reading parsed values back out of a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("no such option: {name}")]
    NoSuchOption { name: String },

    #[error("option {option} holds {declared} values, not {requested}")]
    TypeMismatch {
        option: String,
        requested: &'static str,
        declared: &'static str,
    },

    #[error("option {option} has no value set")]
    NoValue { option: String },
}

/// Any failure surfaced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid arguments for {option}: {source}")]
    Validation {
        option: String,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Access(#[from] AccessError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

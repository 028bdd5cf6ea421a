//! Value configuration and typed value storage.
//!
//! An option that takes values owns a [`Values<T>`]: the shared, immutable
//! [`ValueSpec<T>`] it was declared with plus the values bound by the current
//! parse cycle. Entries hold it through [`ValueSlot`], a closed union over the
//! supported value types, so retrieval is a pattern match instead of a
//! runtime type check.

use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, ConversionError, ValidationError};

/// `limit` value meaning "no upper bound".
pub const UNLIMITED: usize = usize::MAX;

const DEFAULT_LABEL: &str = "arg";

/// The closed set of value types an option can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Str,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type an option value can be converted into.
///
/// Implemented for `String`, `i32`, `i64`, `u32`, `u64`, `f32` and `f64`.
pub trait OptionValue:
    sealed::Sealed + Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const KIND: ValueKind;

    /// Convert a raw token. The whole token must be consumed.
    fn from_token(token: &str) -> Result<Self, ConversionError>;

    #[doc(hidden)]
    fn into_slot(values: Values<Self>) -> ValueSlot;

    #[doc(hidden)]
    fn from_slot(slot: &ValueSlot) -> Option<&Values<Self>>;
}

impl sealed::Sealed for String {}

impl OptionValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_token(token: &str) -> Result<Self, ConversionError> {
        Ok(token.to_string())
    }

    fn into_slot(values: Values<Self>) -> ValueSlot {
        ValueSlot::Str(values)
    }

    fn from_slot(slot: &ValueSlot) -> Option<&Values<Self>> {
        match slot {
            ValueSlot::Str(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! integer_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl OptionValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_token(token: &str) -> Result<Self, ConversionError> {
                token
                    .parse::<$ty>()
                    .map_err(|_| ConversionError::new(token, Self::KIND.name()))
            }

            fn into_slot(values: Values<Self>) -> ValueSlot {
                ValueSlot::$variant(values)
            }

            fn from_slot(slot: &ValueSlot) -> Option<&Values<Self>> {
                match slot {
                    ValueSlot::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    )*};
}

integer_value!(i32 => I32, i64 => I64, u32 => U32, u64 => U64);

macro_rules! float_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl OptionValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_token(token: &str) -> Result<Self, ConversionError> {
                let err = || ConversionError::new(token, Self::KIND.name());
                if !is_decimal_literal(token) {
                    return Err(err());
                }
                let value = token.parse::<$ty>().map_err(|_| err())?;
                if value.is_finite() { Ok(value) } else { Err(err()) }
            }

            fn into_slot(values: Values<Self>) -> ValueSlot {
                ValueSlot::$variant(values)
            }

            fn from_slot(slot: &ValueSlot) -> Option<&Values<Self>> {
                match slot {
                    ValueSlot::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    )*};
}

float_value!(f32 => F32, f64 => F64);

/// `[+-]digits[.digits][(e|E)[+-]digits]`, at least one mantissa digit.
fn is_decimal_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return false;
        }
    }
    i == bytes.len()
}

/// Minimum number of values an option must end up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Required {
    Unset,
    Count(usize),
    All,
}

type Constraint<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Declaration-time configuration of an option's values.
///
/// Built once, then shared read-only by every parse cycle (and every clone of
/// the registry that declared it).
#[derive(Clone)]
pub struct ValueSpec<T> {
    defaults: Vec<T>,
    constraint: Option<Constraint<T>>,
    limit: usize,
    required: Required,
    label: String,
}

impl<T: OptionValue> Default for ValueSpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OptionValue> fmt::Debug for ValueSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSpec")
            .field("kind", &T::KIND)
            .field("defaults", &self.defaults)
            .field("constrained", &self.constraint.is_some())
            .field("limit", &self.limit)
            .field("required", &self.required)
            .field("label", &self.label)
            .finish()
    }
}

impl<T: OptionValue> ValueSpec<T> {
    /// One value, no defaults, no constraint, labelled `arg`.
    pub fn new() -> Self {
        Self {
            defaults: Vec::new(),
            constraint: None,
            limit: 1,
            required: Required::Unset,
            label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Append default values, used when nothing is bound by parsing.
    ///
    /// Consistency with the limit and constraint is re-checked when the option
    /// is declared on a builder.
    pub fn with_default<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        self.defaults.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_constraint<F>(mut self, predicate: F) -> Result<Self, ConfigError>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        if let Some(bad) = self.defaults.iter().find(|v| !predicate(v)) {
            return Err(ConfigError::DefaultViolatesConstraint {
                value: bad.to_string(),
            });
        }
        self.constraint = Some(Arc::new(predicate));
        Ok(self)
    }

    pub fn with_limit(mut self, limit: usize) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        if limit < self.defaults.len() {
            return Err(ConfigError::LimitBelowDefaults {
                limit,
                defaults: self.defaults.len(),
            });
        }
        self.limit = limit;
        Ok(self)
    }

    pub fn unlimited(mut self) -> Self {
        self.limit = UNLIMITED;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Require at least `n` values (capped at the limit).
    pub fn required(mut self, n: usize) -> Self {
        self.required = Required::Count(n);
        self
    }

    /// Require as many values as the limit allows; for an unlimited option,
    /// at least one.
    pub fn required_all(mut self) -> Self {
        self.required = Required::All;
        self
    }

    pub fn transform(&self, token: &str) -> Result<T, ConversionError> {
        T::from_token(token)
    }

    pub fn defaults(&self) -> &[T] {
        &self.defaults
    }

    pub fn has_default(&self) -> bool {
        !self.defaults.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_unlimited(&self) -> bool {
        self.limit == UNLIMITED
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Effective minimum number of values.
    pub fn min_values(&self) -> usize {
        match self.required {
            Required::Unset | Required::All if self.is_unlimited() => 1,
            Required::Unset => 0,
            Required::All => self.limit,
            Required::Count(n) => n.min(self.limit),
        }
    }

    /// Re-check defaults against the limit and the constraint.
    pub fn verify(&self) -> Result<(), ConfigError> {
        if self.defaults.len() > self.limit {
            return Err(ConfigError::LimitBelowDefaults {
                limit: self.limit,
                defaults: self.defaults.len(),
            });
        }
        if let Some(constraint) = &self.constraint {
            if let Some(bad) = self.defaults.iter().find(|v| !constraint(v)) {
                return Err(ConfigError::DefaultViolatesConstraint {
                    value: bad.to_string(),
                });
            }
        }
        Ok(())
    }

    fn accepts(&self, value: &T) -> bool {
        self.constraint.as_ref().is_none_or(|c| c(value))
    }

    /// `<label>`, `<label...[1-N]>` or `<label...>`, followed by `(=d1,d2)`
    /// when defaults exist.
    pub fn describe(&self) -> String {
        let mut out = format!("<{}", self.label);
        if self.is_unlimited() {
            out.push_str("...");
        } else if self.limit > 1 {
            out.push_str(&format!("...[1-{}]", self.limit));
        }
        out.push('>');
        if self.has_default() {
            let defaults: Vec<String> = self.defaults.iter().map(|d| d.to_string()).collect();
            out.push_str(&format!("(={})", defaults.join(",")));
        }
        out
    }
}

/// A spec together with the values bound during the current parse cycle.
#[derive(Debug)]
pub struct Values<T: OptionValue> {
    spec: Arc<ValueSpec<T>>,
    bound: Vec<T>,
}

impl<T: OptionValue> Values<T> {
    pub(crate) fn new(spec: ValueSpec<T>) -> Self {
        Self {
            spec: Arc::new(spec),
            bound: Vec::new(),
        }
    }

    /// Same configuration, nothing bound.
    pub(crate) fn fresh(&self) -> Self {
        Self {
            spec: Arc::clone(&self.spec),
            bound: Vec::new(),
        }
    }

    fn into_slot(self) -> ValueSlot {
        T::into_slot(self)
    }

    pub fn spec(&self) -> &ValueSpec<T> {
        &self.spec
    }

    pub fn bound(&self) -> &[T] {
        &self.bound
    }

    /// Bound values if any were parsed, otherwise the defaults.
    pub fn effective(&self) -> &[T] {
        if self.bound.is_empty() {
            self.spec.defaults()
        } else {
            &self.bound
        }
    }

    pub(crate) fn push_token(&mut self, token: &str) -> Result<(), ConversionError> {
        let value = self.spec.transform(token)?;
        self.bound.push(value);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.bound.clear();
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        let targets = self.effective();
        let limit = self.spec.limit();
        if targets.len() > limit {
            return Err(ValidationError::TooMany {
                limit,
                found: targets.len(),
            });
        }
        let required = self.spec.min_values();
        if targets.len() < required {
            return Err(ValidationError::TooFew {
                required,
                found: targets.len(),
            });
        }
        if let Some(bad) = targets.iter().find(|v| !self.spec.accepts(v)) {
            return Err(ValidationError::ConstraintViolated {
                value: bad.to_string(),
            });
        }
        Ok(())
    }
}

/// Type-tagged value storage of one option.
#[derive(Debug)]
pub enum ValueSlot {
    Str(Values<String>),
    I32(Values<i32>),
    I64(Values<i64>),
    U32(Values<u32>),
    U64(Values<u64>),
    F32(Values<f32>),
    F64(Values<f64>),
}

macro_rules! with_values {
    ($slot:expr, $v:ident => $body:expr) => {
        match $slot {
            ValueSlot::Str($v) => $body,
            ValueSlot::I32($v) => $body,
            ValueSlot::I64($v) => $body,
            ValueSlot::U32($v) => $body,
            ValueSlot::U64($v) => $body,
            ValueSlot::F32($v) => $body,
            ValueSlot::F64($v) => $body,
        }
    };
}

impl ValueSlot {
    pub fn new<T: OptionValue>(spec: ValueSpec<T>) -> Self {
        Values::new(spec).into_slot()
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Str(_) => ValueKind::Str,
            Self::I32(_) => ValueKind::I32,
            Self::I64(_) => ValueKind::I64,
            Self::U32(_) => ValueKind::U32,
            Self::U64(_) => ValueKind::U64,
            Self::F32(_) => ValueKind::F32,
            Self::F64(_) => ValueKind::F64,
        }
    }

    pub fn downcast<T: OptionValue>(&self) -> Option<&Values<T>> {
        T::from_slot(self)
    }

    pub(crate) fn fresh(&self) -> Self {
        with_values!(self, v => v.fresh().into_slot())
    }

    pub fn bound_len(&self) -> usize {
        with_values!(self, v => v.bound().len())
    }

    pub fn limit(&self) -> usize {
        with_values!(self, v => v.spec().limit())
    }

    pub fn label(&self) -> &str {
        with_values!(self, v => v.spec().label())
    }

    pub fn has_default(&self) -> bool {
        with_values!(self, v => v.spec().has_default())
    }

    pub(crate) fn push_token(&mut self, token: &str) -> Result<(), ConversionError> {
        with_values!(self, v => v.push_token(token))
    }

    pub(crate) fn clear(&mut self) {
        with_values!(self, v => v.clear())
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        with_values!(self, v => v.validate())
    }

    pub fn describe(&self) -> String {
        with_values!(self, v => v.spec().describe())
    }
}

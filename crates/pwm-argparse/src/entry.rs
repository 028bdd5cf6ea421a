//! Declared options and the per-kind matching/consumption rules.

use crate::error::{ParseError, ValidationError};
use crate::name::OptionName;
use crate::token::{Cursor, is_dash, is_long_option, is_short_option};
use crate::value::{OptionValue, ValueSlot, ValueSpec};

/// How a long valued option receives its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPattern {
    /// Takes no value.
    None,
    /// `--name=value`
    Assign,
    /// `--name value...`
    Space,
    /// Either form.
    Both,
}

impl ArgPattern {
    pub fn accepts_assign(self) -> bool {
        matches!(self, Self::Assign | Self::Both)
    }

    pub fn accepts_space(self) -> bool {
        matches!(self, Self::Space | Self::Both)
    }

    fn describe(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Assign => "=",
            Self::Space => " ",
            Self::Both => "[ |=]",
        }
    }
}

/// Which lookup bucket an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Short,
    Long,
    Positional,
}

impl Bucket {
    fn prefix(self) -> &'static str {
        match self {
            Self::Short => "-",
            Self::Long => "--",
            Self::Positional => "",
        }
    }
}

#[derive(Debug)]
pub struct FlagOption {
    name: OptionName,
    description: String,
    bucket: Bucket,
    used: bool,
}

#[derive(Debug)]
pub struct ShortOption {
    name: OptionName,
    description: String,
    values: ValueSlot,
    used: bool,
}

#[derive(Debug)]
pub struct LongOption {
    name: OptionName,
    description: String,
    pattern: ArgPattern,
    values: ValueSlot,
    used: bool,
}

#[derive(Debug)]
pub struct PositionalOption {
    description: String,
    values: ValueSlot,
    pause: bool,
    used: bool,
}

/// One declared option.
#[derive(Debug)]
pub enum OptionEntry {
    /// `-name` or `--name`, no value.
    Flag(FlagOption),
    /// `-name value...`
    Short(ShortOption),
    /// `--name=value` and/or `--name value...`
    Long(LongOption),
    /// Unnamed, bound by position.
    Positional(PositionalOption),
}

impl OptionEntry {
    pub(crate) fn flag(bucket: Bucket, name: OptionName, description: impl Into<String>) -> Self {
        debug_assert!(bucket != Bucket::Positional);
        Self::Flag(FlagOption {
            name,
            description: description.into(),
            bucket,
            used: false,
        })
    }

    pub(crate) fn short<T: OptionValue>(
        name: OptionName,
        spec: ValueSpec<T>,
        description: impl Into<String>,
    ) -> Self {
        let used = spec.has_default();
        Self::Short(ShortOption {
            name,
            description: description.into(),
            values: ValueSlot::new(spec),
            used,
        })
    }

    pub(crate) fn long<T: OptionValue>(
        name: OptionName,
        pattern: ArgPattern,
        spec: ValueSpec<T>,
        description: impl Into<String>,
    ) -> Self {
        let used = spec.has_default();
        Self::Long(LongOption {
            name,
            description: description.into(),
            pattern,
            values: ValueSlot::new(spec),
            used,
        })
    }

    pub(crate) fn positional<T: OptionValue>(
        spec: ValueSpec<T>,
        description: impl Into<String>,
        pause: bool,
    ) -> Self {
        let used = spec.has_default();
        Self::Positional(PositionalOption {
            description: description.into(),
            values: ValueSlot::new(spec),
            pause,
            used,
        })
    }

    /// Bare declared name; empty for the positional option.
    pub fn name(&self) -> &str {
        match self {
            Self::Flag(o) => o.name.as_str(),
            Self::Short(o) => o.name.as_str(),
            Self::Long(o) => o.name.as_str(),
            Self::Positional(_) => "",
        }
    }

    /// `-name`, `--name`, or empty for the positional option.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.bucket().prefix(), self.name())
    }

    /// Name used in error messages: the full name, or `<label>` for the
    /// positional option.
    pub fn display_name(&self) -> String {
        match self {
            Self::Positional(o) => format!("<{}>", o.values.label()),
            _ => self.full_name(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Flag(o) => &o.description,
            Self::Short(o) => &o.description,
            Self::Long(o) => &o.description,
            Self::Positional(o) => &o.description,
        }
    }

    pub fn bucket(&self) -> Bucket {
        match self {
            Self::Flag(o) => o.bucket,
            Self::Short(_) => Bucket::Short,
            Self::Long(_) => Bucket::Long,
            Self::Positional(_) => Bucket::Positional,
        }
    }

    pub fn arg_pattern(&self) -> ArgPattern {
        match self {
            Self::Flag(_) | Self::Positional(_) => ArgPattern::None,
            Self::Short(_) => ArgPattern::Space,
            Self::Long(o) => o.pattern,
        }
    }

    /// Whether the positional option stops the parse once it is full.
    pub fn pauses(&self) -> bool {
        matches!(self, Self::Positional(o) if o.pause)
    }

    /// True once matched during parsing, or from construction when defaults
    /// exist.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Flag(o) => o.used,
            Self::Short(o) => o.used,
            Self::Long(o) => o.used,
            Self::Positional(o) => o.used,
        }
    }

    pub fn values(&self) -> Option<&ValueSlot> {
        match self {
            Self::Flag(_) => None,
            Self::Short(o) => Some(&o.values),
            Self::Long(o) => Some(&o.values),
            Self::Positional(o) => Some(&o.values),
        }
    }

    /// Exact name match. Valued long options also match `--name=...`.
    pub fn matches_token(&self, token: &str) -> bool {
        match self {
            Self::Flag(o) => token.strip_prefix(o.bucket.prefix()) == Some(o.name.as_str()),
            Self::Short(o) => token.strip_prefix('-') == Some(o.name.as_str()),
            Self::Long(o) => token
                .strip_prefix("--")
                .map(|rest| rest.split_once('=').map_or(rest, |(head, _)| head))
                == Some(o.name.as_str()),
            Self::Positional(_) => false,
        }
    }

    /// Try to consume the token at the cursor.
    ///
    /// On a match the cursor ends up past every consumed value and `true` is
    /// returned. A non-match returns `false` and leaves the cursor alone.
    pub fn parse(&mut self, cursor: &mut Cursor<'_>) -> Result<bool, ParseError> {
        let Some(token) = cursor.current() else {
            return Ok(false);
        };
        let full_name = self.full_name();
        match self {
            Self::Flag(o) => {
                if token.strip_prefix(o.bucket.prefix()) != Some(o.name.as_str()) {
                    return Ok(false);
                }
                cursor.advance(1);
                o.used = true;
            }
            Self::Short(o) => {
                if token.strip_prefix('-') != Some(o.name.as_str()) {
                    return Ok(false);
                }
                consume_spaced(&mut o.values, cursor, &full_name)?;
                o.used = true;
            }
            Self::Long(o) => {
                let Some(rest) = token.strip_prefix("--") else {
                    return Ok(false);
                };
                let (head, inline) = match rest.split_once('=') {
                    Some((head, value)) => (head, Some(value)),
                    None => (rest, None),
                };
                if head != o.name.as_str() {
                    return Ok(false);
                }
                match inline {
                    Some(value) => {
                        if !o.pattern.accepts_assign() {
                            return Ok(false);
                        }
                        if o.values.bound_len() >= o.values.limit() {
                            return Err(ParseError::TooManyValues { option: full_name });
                        }
                        o.values
                            .push_token(value)
                            .map_err(|source| ParseError::Conversion {
                                option: full_name.clone(),
                                source,
                            })?;
                        cursor.advance(1);
                    }
                    None => {
                        if !o.pattern.accepts_space() {
                            return Ok(false);
                        }
                        consume_spaced(&mut o.values, cursor, &full_name)?;
                    }
                }
                o.used = true;
            }
            Self::Positional(o) => {
                if o.values.bound_len() >= o.values.limit() {
                    return Ok(false);
                }
                o.values
                    .push_token(token)
                    .map_err(|source| ParseError::Conversion {
                        option: format!("<{}>", o.values.label()),
                        source,
                    })?;
                cursor.advance(1);
                o.used = true;
                if o.pause && o.values.bound_len() == o.values.limit() {
                    tracing::debug!(at = cursor.pos(), "positional option full, pausing parse");
                    cursor.truncate();
                }
            }
        }
        tracing::trace!(option = %self.display_name(), token, "matched");
        Ok(true)
    }

    /// Return to the pre-parse state.
    pub fn init(&mut self) {
        match self {
            Self::Flag(o) => o.used = false,
            Self::Short(o) => reset(&mut o.values, &mut o.used),
            Self::Long(o) => reset(&mut o.values, &mut o.used),
            Self::Positional(o) => reset(&mut o.values, &mut o.used),
        }
    }

    /// Check arity and constraints of the bound values (or the defaults).
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.values() {
            Some(values) => values.validate(),
            None => Ok(()),
        }
    }

    /// Name plus value shape, e.g. `--col <col...>(=srv,user,pw)`.
    pub fn describe(&self) -> String {
        match self {
            Self::Flag(_) => self.full_name(),
            Self::Short(o) => format!(
                "{}{}{}",
                self.full_name(),
                ArgPattern::Space.describe(),
                o.values.describe()
            ),
            Self::Long(o) => format!(
                "{}{}{}",
                self.full_name(),
                o.pattern.describe(),
                o.values.describe()
            ),
            Self::Positional(o) => o.values.describe(),
        }
    }

    /// Same declaration, fresh parse state.
    pub(crate) fn fresh(&self) -> Self {
        match self {
            Self::Flag(o) => Self::Flag(FlagOption {
                name: o.name.clone(),
                description: o.description.clone(),
                bucket: o.bucket,
                used: false,
            }),
            Self::Short(o) => Self::Short(ShortOption {
                name: o.name.clone(),
                description: o.description.clone(),
                values: o.values.fresh(),
                used: o.values.has_default(),
            }),
            Self::Long(o) => Self::Long(LongOption {
                name: o.name.clone(),
                description: o.description.clone(),
                pattern: o.pattern,
                values: o.values.fresh(),
                used: o.values.has_default(),
            }),
            Self::Positional(o) => Self::Positional(PositionalOption {
                description: o.description.clone(),
                values: o.values.fresh(),
                pause: o.pause,
                used: o.values.has_default(),
            }),
        }
    }
}

fn reset(values: &mut ValueSlot, used: &mut bool) {
    values.clear();
    *used = values.has_default();
}

/// Take values from the tokens following the option name.
///
/// Stops at the limit, at the end of the visible tokens, or before anything
/// shaped like an option. A dash-only token lets the token after it through
/// as a literal value when that one starts with `-`; otherwise it stops the
/// loop and is left for the registry.
fn consume_spaced(
    values: &mut ValueSlot,
    cursor: &mut Cursor<'_>,
    option: &str,
) -> Result<(), ParseError> {
    let before = values.bound_len();
    let limit = values.limit();
    if before >= limit {
        return Err(ParseError::TooManyValues {
            option: option.to_string(),
        });
    }
    cursor.advance(1);

    while values.bound_len() < limit {
        let Some(token) = cursor.current() else {
            break;
        };
        if is_short_option(token) || is_long_option(token) {
            break;
        }
        let token = if is_dash(token) {
            match cursor.peek(1) {
                Some(next) if next.starts_with('-') => {
                    cursor.advance(1);
                    next
                }
                _ => break,
            }
        } else {
            token
        };
        values
            .push_token(token)
            .map_err(|source| ParseError::Conversion {
                option: option.to_string(),
                source,
            })?;
        cursor.advance(1);
    }

    if values.bound_len() == before {
        return Err(ParseError::MissingValue {
            option: option.to_string(),
        });
    }
    Ok(())
}

//! The declared option set and the argument-vector scan.

use crate::accessor::OptionRef;
use crate::builder::Builder;
use crate::entry::{Bucket, OptionEntry};
use crate::error::{AccessError, ConfigError, Error, ParseError, Result};
use crate::help::{self, HelpLayout};
use crate::token::{Cursor, is_dash, is_long_option, is_short_option};

/// All options declared for one parser, in declaration order.
///
/// Short, long and positional buckets are views over the single ordered
/// list. At most one positional option exists.
#[derive(Debug, Default)]
pub struct OptionRegistry {
    entries: Vec<OptionEntry>,
}

impl Clone for OptionRegistry {
    /// Copies every declaration; the copy starts with nothing bound and
    /// shares no parse state with `self`.
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.iter().map(OptionEntry::fresh).collect(),
        }
    }
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn push(&mut self, entry: OptionEntry) -> Result<(), ConfigError> {
        if entry.bucket() == Bucket::Positional && self.positional_entry().is_some() {
            return Err(ConfigError::DuplicatePositional);
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionEntry> {
        self.entries.iter()
    }

    /// Entries of one bucket, in declaration order.
    pub fn bucket(&self, bucket: Bucket) -> impl Iterator<Item = &OptionEntry> {
        self.entries.iter().filter(move |e| e.bucket() == bucket)
    }

    fn positional_entry(&self) -> Option<&OptionEntry> {
        self.bucket(Bucket::Positional).next()
    }

    /// Parse and validate. See [`OptionRegistry::parse_with`].
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> Result<usize> {
        self.parse_with(args, true)
    }

    /// Scan `args` left to right, binding values into the declared entries.
    ///
    /// Returns the index where scanning stopped: `args.len()` normally, or
    /// the index right after a paused positional option filled up, so the
    /// caller can hand `&args[index..]` to another parser.
    ///
    /// With `validate == false` only token-level errors are reported, which
    /// lets a caller look for `--help` before enforcing required values.
    pub fn parse_with<S: AsRef<str>>(&mut self, args: &[S], validate: bool) -> Result<usize> {
        let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let mut cursor = Cursor::new(&tokens);

        while let Some(token) = cursor.current() {
            if is_short_option(token) {
                self.dispatch(Bucket::Short, &mut cursor, token)?;
            } else if is_long_option(token) {
                self.dispatch(Bucket::Long, &mut cursor, token)?;
            } else {
                if is_dash(token) {
                    cursor.advance(1);
                }
                let Some(token) = cursor.current() else {
                    continue;
                };
                let Some(positional) = self
                    .entries
                    .iter_mut()
                    .find(|e| e.bucket() == Bucket::Positional)
                else {
                    return Err(ParseError::NoPositional {
                        token: token.to_string(),
                    }
                    .into());
                };
                if !positional.parse(&mut cursor)? {
                    return Err(ParseError::PositionalFull {
                        token: token.to_string(),
                    }
                    .into());
                }
            }
        }

        tracing::debug!(consumed = cursor.pos(), total = tokens.len(), "parsed arguments");
        if validate {
            self.validate()?;
        }
        Ok(cursor.pos())
    }

    fn dispatch(
        &mut self,
        bucket: Bucket,
        cursor: &mut Cursor<'_>,
        token: &str,
    ) -> Result<(), ParseError> {
        for entry in self.entries.iter_mut().filter(|e| e.bucket() == bucket) {
            if entry.parse(cursor)? {
                return Ok(());
            }
        }
        Err(ParseError::UnknownOption {
            token: token.to_string(),
        })
    }

    /// Check every entry in declaration order.
    pub fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            entry.validate().map_err(|source| Error::Validation {
                option: entry.display_name(),
                source,
            })?;
        }
        Ok(())
    }

    /// Forget everything bound by previous parses.
    pub fn init(&mut self) {
        for entry in &mut self.entries {
            entry.init();
        }
    }

    /// Look up an entry by bare name.
    ///
    /// A trailing `=` or space in `name` restricts the match to valued
    /// entries accepting `--name=value` or `--name value` respectively.
    /// Without a marker the first entry with that name wins, whatever its
    /// pattern. The positional bucket ignores `name`.
    pub fn find(&self, name: &str, bucket: Bucket) -> Option<&OptionEntry> {
        if bucket == Bucket::Positional {
            return self.positional_entry();
        }
        let mut candidates = self.bucket(bucket);
        if let Some(base) = name.strip_suffix('=') {
            candidates.find(|e| e.name() == base && e.arg_pattern().accepts_assign())
        } else if let Some(base) = name.strip_suffix(' ') {
            candidates.find(|e| e.name() == base && e.arg_pattern().accepts_space())
        } else {
            candidates.find(|e| e.name() == name)
        }
    }

    /// Short option named `name`, else long option named `name`.
    pub fn get(&self, name: &str) -> Result<OptionRef<'_>, AccessError> {
        self.find(name, Bucket::Short)
            .or_else(|| self.find(name, Bucket::Long))
            .map(OptionRef::new)
            .ok_or_else(|| AccessError::NoSuchOption {
                name: name.to_string(),
            })
    }

    pub fn get_short(&self, name: &str) -> Result<OptionRef<'_>, AccessError> {
        self.find(name, Bucket::Short)
            .map(OptionRef::new)
            .ok_or_else(|| AccessError::NoSuchOption {
                name: format!("-{name}"),
            })
    }

    pub fn get_long(&self, name: &str) -> Result<OptionRef<'_>, AccessError> {
        self.find(name, Bucket::Long)
            .map(OptionRef::new)
            .ok_or_else(|| AccessError::NoSuchOption {
                name: format!("--{name}"),
            })
    }

    pub fn positional(&self) -> Result<OptionRef<'_>, AccessError> {
        self.positional_entry()
            .map(OptionRef::new)
            .ok_or_else(|| AccessError::NoSuchOption {
                name: "<positional>".to_string(),
            })
    }

    /// Option listing with an explicit layout.
    pub fn describe(&self, name_columns: usize, gap: usize) -> String {
        self.describe_with(HelpLayout::new(name_columns, gap))
    }

    pub fn describe_with(&self, layout: HelpLayout) -> String {
        help::render(&self.entries, layout)
    }

    /// Option listing with the default layout.
    pub fn help(&self) -> String {
        help::render(&self.entries, HelpLayout::default())
    }
}

impl<'a> IntoIterator for &'a OptionRegistry {
    type Item = &'a OptionEntry;
    type IntoIter = std::slice::Iter<'a, OptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

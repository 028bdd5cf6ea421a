//! Token classification and the parse cursor.

/// `-x...`: a single dash followed by a non-dash character.
pub fn is_short_option(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| c != '-')
}

/// `--x...`: two dashes followed by a non-dash character.
pub fn is_long_option(token: &str) -> bool {
    token
        .strip_prefix("--")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c != '-')
}

/// A non-empty run of dashes only (`-`, `--`, `---`, ...).
pub fn is_dash(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b == b'-')
}

/// Read position over an argument vector.
///
/// `end` starts at the vector length and only shrinks, when a paused
/// positional option hands the rest of the vector to another parser.
#[derive(Debug)]
pub struct Cursor<'a> {
    args: &'a [&'a str],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(args: &'a [&'a str]) -> Self {
        Self {
            args,
            pos: 0,
            end: args.len(),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.end
    }

    /// The token at the cursor, if still visible.
    pub fn current(&self) -> Option<&'a str> {
        self.peek(0)
    }

    /// The token `ahead` positions after the cursor, if still visible.
    pub fn peek(&self, ahead: usize) -> Option<&'a str> {
        let idx = self.pos.checked_add(ahead)?;
        if idx < self.end {
            Some(self.args[idx])
        } else {
            None
        }
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.end);
    }

    /// Hide everything from the cursor onwards.
    pub fn truncate(&mut self) {
        self.end = self.pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-x", true, false, false)]
    #[case("-xy", true, false, false)]
    #[case("--x", false, true, false)]
    #[case("--x=1", false, true, false)]
    #[case("-", false, false, true)]
    #[case("--", false, false, true)]
    #[case("---", false, false, true)]
    #[case("---x", false, false, false)]
    #[case("x", false, false, false)]
    #[case("", false, false, false)]
    fn classifies_tokens(
        #[case] token: &str,
        #[case] short: bool,
        #[case] long: bool,
        #[case] dash: bool,
    ) {
        assert_eq!(is_short_option(token), short);
        assert_eq!(is_long_option(token), long);
        assert_eq!(is_dash(token), dash);
    }

    #[test]
    fn truncate_hides_the_tail() {
        let args = ["get", "--col", "srv"];
        let mut cursor = Cursor::new(&args);
        assert_eq!(cursor.current(), Some("get"));
        assert_eq!(cursor.peek(2), Some("srv"));
        cursor.advance(1);
        cursor.truncate();
        assert!(cursor.is_done());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.pos(), 1);
        assert_eq!(cursor.end(), 1);
    }
}

use crate::entry::OptionEntry;

/// Column layout of the option listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// Width reserved for the name column.
    pub name_columns: usize,
    /// Minimum spaces between a name and its description.
    pub gap: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            name_columns: 25,
            gap: 2,
        }
    }
}

impl HelpLayout {
    pub fn new(name_columns: usize, gap: usize) -> Self {
        Self { name_columns, gap }
    }

    fn padding(&self, name_width: usize) -> usize {
        if self.name_columns < name_width + self.gap {
            self.gap
        } else {
            self.name_columns - name_width
        }
    }
}

/// One line per entry, in declaration order; `  None` when empty.
pub(crate) fn render<'a, I>(entries: I, layout: HelpLayout) -> String
where
    I: IntoIterator<Item = &'a OptionEntry>,
{
    let mut out = String::new();
    for entry in entries {
        let left = entry.describe();
        let pad = layout.padding(left.chars().count());
        out.push_str(&format!(
            "  {left}{:pad$}{}\n",
            "",
            entry.description(),
            pad = pad
        ));
    }
    if out.is_empty() {
        out.push_str("  None\n");
    }
    out
}

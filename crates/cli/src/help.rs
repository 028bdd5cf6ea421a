use anyhow::{Result, bail};
use indexmap::IndexMap;
use pwm_argparse::{Builder, HelpLayout, OptionRegistry, ValueSpec};

/// Long help text keyed by bare option name, in listing order.
pub type HelpDetails = IndexMap<&'static str, &'static str>;

/// Declare `--help` and `--help=<option>` on a parser.
pub fn with_help(builder: Builder) -> Builder {
    builder
        .long("help", "Show this option listing")
        .long_value(
            "help=",
            ValueSpec::<String>::new().with_label("option"),
            "Show detailed help for one option",
        )
}

pub fn listing(registry: &OptionRegistry, layout: HelpLayout) -> String {
    format!("Options:\n{}", registry.describe_with(layout))
}

/// Print the requested help, if any. Returns whether help was shown.
pub fn show(registry: &OptionRegistry, layout: HelpLayout, details: &HelpDetails) -> Result<bool> {
    let detail = registry.get_long("help=")?;
    if detail.is_present() {
        let option: String = detail.value_as()?;
        let key = option.trim().trim_start_matches('-');
        match details.get(key) {
            Some(text) => println!("{text}"),
            None => bail!("no help entry for {option}"),
        }
        return Ok(true);
    }
    if registry.get_long("help")?.is_present() {
        print!("{}", listing(registry, layout));
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_options_are_told_apart() {
        let mut registry = with_help(OptionRegistry::builder()).build().unwrap();
        registry.parse(&["--help=srv"]).unwrap();
        assert!(!registry.get_long("help").unwrap().is_present());
        assert!(registry.get_long("help=").unwrap().is_present());
    }

    #[test]
    fn unknown_detail_is_an_error() {
        let mut registry = with_help(OptionRegistry::builder()).build().unwrap();
        registry.parse(&["--help=nope"]).unwrap();
        let err = show(&registry, HelpLayout::default(), &HelpDetails::new()).unwrap_err();
        assert_eq!(err.to_string(), "no help entry for nope");
    }

    #[test]
    fn listing_has_header() {
        let registry = with_help(OptionRegistry::builder()).build().unwrap();
        let text = listing(&registry, HelpLayout::default());
        assert!(text.starts_with("Options:\n  --help "), "{text}");
        assert!(text.contains("--help=<option>"), "{text}");
    }
}

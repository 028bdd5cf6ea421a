//! Record search conditions shared by `get`, `upd` and `del`.

use anyhow::Result;
use pwm_argparse::{OptionRegistry, ValueSpec};
use serde::Serialize;

use crate::help::HelpDetails;

/// `[from, to]` as given on the command line; dates are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Condition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateRange>,
}

pub fn string(label: &str) -> ValueSpec<String> {
    ValueSpec::new().with_label(label)
}

/// Template registry; subcommands clone it and extend the copy.
pub fn template() -> Result<OptionRegistry> {
    Ok(OptionRegistry::builder()
        .long_value("srv ", string("service"), "Match service name")
        .long_value("user ", string("user"), "Match user name")
        .long_value("name ", string("name"), "Match account name")
        .long_value("pw ", string("password"), "Match password")
        .long_value("reg ", string("date").with_limit(2)?, "Registered within date range")
        .long_value("upd ", string("date").with_limit(2)?, "Updated within date range")
        .build()?)
}

pub fn details(details: &mut HelpDetails) {
    details.insert("srv", "--srv <service>\n  Select records whose service name equals <service>.");
    details.insert("user", "--user <user>\n  Select records whose user name equals <user>.");
    details.insert("name", "--name <name>\n  Select records whose account name equals <name>.");
    details.insert("pw", "--pw <password>\n  Select records whose password equals <password>.");
    details.insert(
        "reg",
        "--reg <from> [<to>]\n  Select records registered on or after <from>, and on or before <to> when given.",
    );
    details.insert(
        "upd",
        "--upd <from> [<to>]\n  Select records last updated on or after <from>, and on or before <to> when given.",
    );
}

/// Optional single string value of a long option.
pub fn optional(registry: &OptionRegistry, name: &str) -> Result<Option<String>> {
    let option = registry.get_long(name)?;
    if !option.is_present() {
        return Ok(None);
    }
    Ok(Some(option.value_as()?))
}

fn range(registry: &OptionRegistry, name: &str) -> Result<Option<DateRange>> {
    let option = registry.get_long(name)?;
    if !option.is_present() {
        return Ok(None);
    }
    let mut bounds = option.value_as::<Vec<String>>()?.into_iter();
    Ok(bounds.next().map(|from| DateRange {
        from,
        to: bounds.next(),
    }))
}

impl Condition {
    pub fn from_registry(registry: &OptionRegistry) -> Result<Self> {
        Ok(Self {
            srv: optional(registry, "srv")?,
            user: optional(registry, "user")?,
            name: optional(registry, "name")?,
            pw: optional(registry, "pw")?,
            registered: range(registry, "reg")?,
            updated: range(registry, "upd")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_given_fields_only() {
        let mut registry = template().unwrap();
        registry
            .parse(&["--srv", "mail", "--reg", "2024-01-01", "2024-06-30"])
            .unwrap();
        let condition = Condition::from_registry(&registry).unwrap();
        assert_eq!(condition.srv.as_deref(), Some("mail"));
        assert_eq!(condition.user, None);
        assert_eq!(
            condition.registered,
            Some(DateRange {
                from: "2024-01-01".to_string(),
                to: Some("2024-06-30".to_string()),
            })
        );
        assert_eq!(condition.updated, None);
    }

    #[test]
    fn date_range_takes_at_most_two_values() {
        let mut registry = template().unwrap();
        registry.parse(&["--upd", "2024-01-01"]).unwrap();
        let condition = Condition::from_registry(&registry).unwrap();
        assert_eq!(condition.updated.unwrap().to, None);

        let mut registry = template().unwrap();
        assert!(registry.parse(&["--upd", "a", "b", "c"]).is_err());
    }
}

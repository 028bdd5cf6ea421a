//! `get`, `ins`, `upd` and `del`: parse subcommand options into a request.

use anyhow::{Context, Result, bail};
use pwm_argparse::{Builder, HelpLayout, OptionRegistry, ValueSpec};
use serde::Serialize;

use crate::condition::{self, Condition, optional, string};
use crate::help::{self, HelpDetails};

/// Columns a `get` request may ask for.
pub const COLUMNS: &[&str] = &["srv", "user", "name", "pw", "memo", "reg", "upd"];

const DEFAULT_COLUMNS: [&str; 3] = ["srv", "user", "pw"];

/// What a subcommand asks the record store to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Request {
    Get {
        condition: Condition,
        columns: Vec<String>,
    },
    Ins {
        record: Record,
    },
    Upd {
        condition: Condition,
        changes: Changes,
    },
    Del {
        condition: Condition,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub srv: String,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Changes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Run one subcommand over its own argument tail.
///
/// Returns `None` when only help was requested.
pub fn run(command: &str, args: &[String], layout: HelpLayout) -> Result<Option<Request>> {
    tracing::debug!(command, args = args.len(), "dispatching subcommand");
    let template = condition::template()?;
    let request = match command {
        "get" => get(&template, args, layout),
        "ins" => ins(args, layout),
        "upd" => upd(&template, args, layout),
        "del" => del(&template, args, layout),
        other => bail!("unknown command: {other} (expected get, ins, upd or del)"),
    };
    request.with_context(|| format!("invalid arguments for `{command}`"))
}

/// Parse without validation, answer help, then validate.
fn parse(
    builder: Builder,
    args: &[String],
    layout: HelpLayout,
    details: &HelpDetails,
) -> Result<Option<OptionRegistry>> {
    let mut registry = help::with_help(builder).build()?;
    registry.parse_with(args, false)?;
    if help::show(&registry, layout, details)? {
        return Ok(None);
    }
    registry.validate()?;
    Ok(Some(registry))
}

fn condition_details() -> HelpDetails {
    let mut details = HelpDetails::new();
    condition::details(&mut details);
    details
}

fn get(template: &OptionRegistry, args: &[String], layout: HelpLayout) -> Result<Option<Request>> {
    let columns = ValueSpec::<String>::new()
        .with_label("column")
        .unlimited()
        .with_default(DEFAULT_COLUMNS)
        .with_constraint(|c: &String| COLUMNS.contains(&c.as_str()))?;
    let builder =
        Builder::extend(template.clone()).long_value("col ", columns, "Columns to show");

    let mut details = condition_details();
    details.insert(
        "col",
        "--col <column...>\n  Columns to show, from: srv user name pw memo reg upd.\n  Defaults to: srv user pw.",
    );

    let Some(registry) = parse(builder, args, layout, &details)? else {
        return Ok(None);
    };
    Ok(Some(Request::Get {
        condition: Condition::from_registry(&registry)?,
        columns: registry.get_long("col")?.value_as()?,
    }))
}

fn ins(args: &[String], layout: HelpLayout) -> Result<Option<Request>> {
    let builder = OptionRegistry::builder()
        .long_value("srv ", string("service").required_all(), "Service name")
        .long_value("user ", string("user").required_all(), "User name")
        .long_value("name ", string("name"), "Account name")
        .long_value("pw ", string("password"), "Password")
        .long_value("memo ", string("memo"), "Free-form note");

    let mut details = HelpDetails::new();
    details.insert("srv", "--srv <service>\n  Service the account belongs to. Required.");
    details.insert("user", "--user <user>\n  User the account belongs to. Required.");
    details.insert("name", "--name <name>\n  Account name.");
    details.insert("pw", "--pw <password>\n  Password to store.");
    details.insert("memo", "--memo <memo>\n  Free-form note stored with the record.");

    let Some(registry) = parse(builder, args, layout, &details)? else {
        return Ok(None);
    };
    Ok(Some(Request::Ins {
        record: Record {
            srv: registry.get_long("srv")?.value_as()?,
            user: registry.get_long("user")?.value_as()?,
            name: optional(&registry, "name")?,
            pw: optional(&registry, "pw")?,
            memo: optional(&registry, "memo")?,
        },
    }))
}

fn upd(template: &OptionRegistry, args: &[String], layout: HelpLayout) -> Result<Option<Request>> {
    let builder = Builder::extend(template.clone())
        .long_value("srv-to ", string("service"), "New service name")
        .long_value("user-to ", string("user"), "New user name")
        .long_value("name-to ", string("name"), "New account name")
        .long_value("pw-to ", string("password"), "New password")
        .long_value("memo-to ", string("memo"), "New note");

    let mut details = condition_details();
    details.insert("srv-to", "--srv-to <service>\n  Replace the service name of matching records.");
    details.insert("user-to", "--user-to <user>\n  Replace the user name of matching records.");
    details.insert("name-to", "--name-to <name>\n  Replace the account name of matching records.");
    details.insert("pw-to", "--pw-to <password>\n  Replace the password of matching records.");
    details.insert("memo-to", "--memo-to <memo>\n  Replace the note of matching records.");

    let Some(registry) = parse(builder, args, layout, &details)? else {
        return Ok(None);
    };
    let changes = Changes {
        srv: optional(&registry, "srv-to")?,
        user: optional(&registry, "user-to")?,
        name: optional(&registry, "name-to")?,
        pw: optional(&registry, "pw-to")?,
        memo: optional(&registry, "memo-to")?,
    };
    if changes == Changes::default() {
        bail!("nothing to update; give at least one of --srv-to, --user-to, --name-to, --pw-to, --memo-to");
    }
    Ok(Some(Request::Upd {
        condition: Condition::from_registry(&registry)?,
        changes,
    }))
}

fn del(template: &OptionRegistry, args: &[String], layout: HelpLayout) -> Result<Option<Request>> {
    let builder = Builder::extend(template.clone());
    let Some(registry) = parse(builder, args, layout, &condition_details())? else {
        return Ok(None);
    };
    Ok(Some(Request::Del {
        condition: Condition::from_registry(&registry)?,
    }))
}

use anyhow::{Context, Result};
use pwm_argparse::HelpLayout;

const HELP_COLUMNS_VAR: &str = "PWM_HELP_COLUMNS";
const HELP_GAP_VAR: &str = "PWM_HELP_GAP";

/// Front-end settings taken from the environment (after `.env` loading).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub help: HelpLayout,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = HelpLayout::default();
        Ok(Self {
            help: HelpLayout::new(
                read_usize(HELP_COLUMNS_VAR, defaults.name_columns)?,
                read_usize(HELP_GAP_VAR, defaults.gap)?,
            ),
        })
    }
}

fn read_usize(var: &str, default: usize) -> Result<usize> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{var} must be a non-negative integer, got `{raw}`")),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e).with_context(|| format!("failed to read {var}")),
    }
}

//! Actions command implementation.

use crate::error::Result;
use crate::output::Formatter;
use switchlore_extractor::{ActionRegistry, TEMPLATE_ACTION};

/// Execute the actions command.
pub fn execute_actions(formatter: &Formatter) -> Result<()> {
    let registry = ActionRegistry::with_builtins();
    println!(
        "{}",
        formatter.format_actions(&registry.names(), TEMPLATE_ACTION)?
    );
    Ok(())
}

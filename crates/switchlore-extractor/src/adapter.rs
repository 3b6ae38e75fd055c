//! Template extraction adapter

use crate::types::FailureKind;
use switchlore_domain::{FieldMap, TemplateError, TemplateParser};

/// Run the template for `command` over `text`
///
/// Records pass through untouched. A missing template is reported as
/// [`FailureKind::UnsupportedSection`]; anything else the parser raises is an
/// [`FailureKind::Extraction`] failure.
pub(crate) fn parse_with_template(
    templates: &dyn TemplateParser,
    platform: &str,
    command: &str,
    text: &str,
) -> Result<Vec<FieldMap>, (FailureKind, String)> {
    templates
        .parse(platform, command, text)
        .map_err(|e| match e {
            TemplateError::Unsupported { .. } => (FailureKind::UnsupportedSection, e.to_string()),
            other => (FailureKind::Extraction, other.to_string()),
        })
}

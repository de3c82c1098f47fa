use std::collections::BTreeMap;
use std::fmt::Write;

use similar::{ChangeTag, TextDiff};

use super::error::Result;
use super::structured::{Change, ChangeType};

/// Unified diff of two pretty-printed batches with three lines of context.
pub(crate) fn unified_diff(old: &str, new: &str) -> Result<String> {
    let mut output = String::new();
    writeln!(output, "--- a/requests.json")?;
    writeln!(output, "+++ b/requests.json")?;
    if old == new {
        output.push_str("\nNo changes detected.\n");
        return Ok(output);
    }

    let diff = TextDiff::from_lines(old, new);
    for group in diff.grouped_ops(3) {
        let (old_start, new_start) = group
            .first()
            .map_or((0, 0), |op| (op.old_range().start + 1, op.new_range().start + 1));
        let old_len: usize = group.iter().map(|op| op.old_range().len()).sum();
        let new_len: usize = group.iter().map(|op| op.new_range().len()).sum();
        writeln!(output, "@@ -{old_start},{old_len} +{new_start},{new_len} @@")?;
        for op in &group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                write!(output, "{sign}{}", change.value())?;
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }
    Ok(output)
}

/// One block per request key listing its field changes.
pub(crate) fn summary(changes: &[Change]) -> Result<String> {
    let mut output = String::new();
    if changes.is_empty() {
        writeln!(output, "No changes detected.")?;
        return Ok(output);
    }
    let mut by_request: BTreeMap<&str, Vec<&Change>> = BTreeMap::new();
    for change in changes {
        by_request.entry(change.request_key()).or_default().push(change);
    }
    for (key, changes) in by_request {
        writeln!(output, "{key}")?;
        for change in changes {
            let field = match change.field_path() {
                "" => "(request)",
                field => field,
            };
            let show = |value: &Option<super::structured::ValueRepr>| {
                value.as_ref().map_or_else(String::new, |v| v.format_for_display())
            };
            match change.change_type {
                ChangeType::Added => writeln!(output, "  + {field} = {}", show(&change.new_value))?,
                ChangeType::Removed => writeln!(output, "  - {field} (was {})", show(&change.old_value))?,
                ChangeType::Modified => writeln!(
                    output,
                    "  ~ {field}: {} -> {}",
                    show(&change.old_value),
                    show(&change.new_value)
                )?,
            }
        }
    }
    Ok(output)
}

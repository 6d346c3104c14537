//! Flattening a tree into CSV rows.

use std::io::Write;

use csv::{Terminator, WriterBuilder};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::error::Result;
use crate::tree::{NodeId, Tree};

/// Write one `[path, created, modified]` row per file below `start`, in
/// pre-order.
///
/// Folders contribute `<name>/` to the path of everything beneath them and
/// never get a row of their own. When `start` is itself a file it is written
/// as `prefix + name`.
pub fn print_tree<W: Write>(
    writer: &mut csv::Writer<W>,
    tree: &Tree,
    start: NodeId,
    prefix: &str,
) -> Result<()> {
    let mut stack = vec![(start, prefix.to_string())];

    while let Some((id, prefix)) = stack.pop() {
        let node = tree.node(id);
        if !node.is_dir {
            writer.write_record([
                format!("{}{}", prefix, node.name),
                minute_stamp(node.created_at)?,
                minute_stamp(node.modified_at)?,
            ])?;
            continue;
        }

        let child_prefix = format!("{}{}/", prefix, node.name);
        stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|&child| (child, child_prefix.clone())),
        );
    }

    Ok(())
}

/// Minute precision in the timestamp's own offset, e.g. `2024-01-30T11:00`.
fn minute_stamp(t: OffsetDateTime) -> Result<String> {
    Ok(t.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]"
    ))?)
}

/// Write the whole tree as CSV to `out`, starting at the root with prefix `/`,
/// and flush.
pub fn write_csv<W: Write>(out: W, tree: &Tree) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    print_tree(&mut writer, tree, tree.root(), "/")?;
    writer.flush()?;
    Ok(())
}

//! Recovers a cause graph from Gradle's console failure output.
//!
//! An out-of-process invocation only hands back captured text, so the
//! cause graph has to be rebuilt from the `* What went wrong:` section:
//! the section opens with the root failure message, followed by `> `
//! nested cause lines, one extra indentation step per link.

use crate::cause::BuildCause;

const WHAT_WENT_WRONG_HEADER: &str = "* What went wrong:";
const CAUSE_MARKER: &str = "> ";

/// Indentation step Gradle uses for each nesting level of a cause line.
const INDENT_WIDTH: usize = 3;

struct RawNode {
    message: String,
    children: Vec<RawNode>,
}

/// Parses the failure section of captured console output into a cause graph.
///
/// Returns `None` when the output carries no `* What went wrong:` section,
/// for example when the process died before Gradle reported a failure.
/// A level with a single nested cause becomes the chained continuation of
/// its parent; a level with several becomes aggregated sibling causes.
pub fn parse_failure_output(output: &str) -> Option<BuildCause> {
    let section = failure_section(output);
    if section.is_empty() {
        return None;
    }

    let mut root_message = String::new();
    // (nesting level, message) per cause line, in reported order
    let mut entries: Vec<(usize, String)> = Vec::new();
    for line in &section {
        let trimmed = line.trim_start();
        if let Some(message) = trimmed.strip_prefix(CAUSE_MARKER) {
            let indent = line.len() - trimmed.len();
            entries.push((indent / INDENT_WIDTH, message.trim_end().to_string()));
        } else if let Some((_, last)) = entries.last_mut() {
            // continuation of the previous cause line
            last.push('\n');
            last.push_str(trimmed.trim_end());
        } else {
            if !root_message.is_empty() {
                root_message.push('\n');
            }
            root_message.push_str(line.trim_end());
        }
    }

    if root_message.is_empty() {
        return None;
    }

    let root = RawNode {
        message: root_message,
        children: build_nodes(&entries),
    };
    Some(into_build_cause(root))
}

fn failure_section(output: &str) -> Vec<&str> {
    let mut section = Vec::new();
    let mut in_section = false;
    for line in output.lines() {
        if line.trim() == WHAT_WENT_WRONG_HEADER {
            in_section = true;
            continue;
        }
        if in_section {
            if line.trim().is_empty() || line.starts_with("* ") {
                break;
            }
            section.push(line);
        }
    }
    section
}

fn build_nodes(entries: &[(usize, String)]) -> Vec<RawNode> {
    let mut nodes = Vec::new();
    let mut index = 0;
    while index < entries.len() {
        let (level, message) = &entries[index];
        // everything deeper than this entry nests beneath it
        let mut end = index + 1;
        while end < entries.len() && entries[end].0 > *level {
            end += 1;
        }
        nodes.push(RawNode {
            message: message.clone(),
            children: build_nodes(&entries[index + 1..end]),
        });
        index = end;
    }
    nodes
}

fn into_build_cause(node: RawNode) -> BuildCause {
    let mut cause = BuildCause::new(node.message);
    let mut children: Vec<BuildCause> = node.children.into_iter().map(into_build_cause).collect();
    if children.len() == 1 {
        cause.cause = Some(Box::new(children.remove(0)));
    } else {
        cause.causes = children;
    }
    cause
}

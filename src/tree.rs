/*!
 * Text rendering of the included-file tree
 */

use std::collections::BTreeMap;
use std::path::Component;

use crate::types::Digest;
use crate::utils::format_file_size;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Directory in the rendered tree
#[derive(Debug, Default)]
struct TreeDir {
    /// Subdirectories keyed by (lower-cased name, name)
    dirs: BTreeMap<(String, String), TreeDir>,
    /// Files as (name, size), already in display order
    files: Vec<(String, u64)>,
}

impl TreeDir {
    fn child(&mut self, name: &str) -> &mut TreeDir {
        self.dirs
            .entry((name.to_lowercase(), name.to_string()))
            .or_default()
    }
}

/// Render the tree of included files, one line per entry
///
/// Only directories that (transitively) hold an included file appear.
/// Directories come before files, both in case-insensitive name order.
pub fn render_tree(digest: &Digest) -> Vec<String> {
    let mut root = TreeDir::default();

    for file in digest.files() {
        let mut dir = &mut root;
        if let Some(parent) = file.path.parent() {
            for component in parent.components() {
                if let Component::Normal(segment) = component {
                    dir = dir.child(&segment.to_string_lossy());
                }
            }
        }
        dir.files.push((file.name.clone(), file.size));
    }

    let mut lines = vec![format!("{}/", digest.root_name())];
    render_dir(&root, "", &mut lines);
    lines
}

fn render_dir(dir: &TreeDir, prefix: &str, lines: &mut Vec<String>) {
    let total = dir.dirs.len() + dir.files.len();

    for (index, ((_, name), child)) in dir.dirs.iter().enumerate() {
        let last = index + 1 == total;
        lines.push(format!("{}{}{}/", prefix, connector(last), name));
        let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
        render_dir(child, &child_prefix, lines);
    }

    for (index, (name, size)) in dir.files.iter().enumerate() {
        let last = dir.dirs.len() + index + 1 == total;
        lines.push(format!(
            "{}{}{} ({})",
            prefix,
            connector(last),
            name,
            format_file_size(*size)
        ));
    }
}

fn connector(last: bool) -> &'static str {
    if last {
        LAST_BRANCH
    } else {
        BRANCH
    }
}

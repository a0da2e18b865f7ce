use crate::tree::FileTree;

const OPEN_GLYPH: &str = "▾ ";
const CLOSED_GLYPH: &str = "▸ ";
const PIPE: &str = " │ ";
const BLANK: &str = "   ";
const MID_BRANCH: &str = " ├─ ";
const LAST_BRANCH: &str = " └─ ";

/// One row of the tree as it should appear on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub text: String,
    /// The cursor sits on this row.
    pub selected: bool,
}

/// Render every visible entry with its connector prefix.
///
/// Connectors are decided in a single pass from the last row to the first:
/// `below[d]` says whether some later row at depth `d` still belongs to the
/// sibling run being drawn, i.e. whether depth `d` continues downward.
pub fn build_lines(tree: &FileTree, position: usize) -> Vec<ViewLine> {
    let rows: Vec<(usize, String)> = tree
        .flatten()
        .into_iter()
        .map(|id| {
            let entry = tree.entry(id);
            let glyph = match (entry.is_dir(), entry.is_open()) {
                (true, true) => OPEN_GLYPH,
                (true, false) => CLOSED_GLYPH,
                (false, _) => "",
            };
            (entry.depth(), format!("{glyph}{}", entry.name()))
        })
        .collect();

    let max_depth = rows.iter().map(|(depth, _)| *depth).max().unwrap_or(0);
    let mut below = vec![false; max_depth + 1];
    let mut lines = Vec::with_capacity(rows.len());

    for (index, (depth, label)) in rows.iter().enumerate().rev() {
        let depth = *depth;
        let mut text = String::new();
        for level in 1..depth {
            text.push_str(if below[level] { PIPE } else { BLANK });
        }
        if depth > 0 {
            text.push_str(if below[depth] { MID_BRANCH } else { LAST_BRANCH });
        }
        text.push_str(label);

        lines.push(ViewLine {
            text,
            selected: index == position,
        });

        below[depth] = true;
        if let Some((next_depth, _)) = rows.get(index + 1) {
            for level in depth + 1..=*next_depth {
                below[level] = false;
            }
        }
    }

    lines.reverse();
    lines
}

/// Rows from `offset` on; the display clips height and width itself.
pub fn visible_lines(lines: &[ViewLine], offset: usize) -> &[ViewLine] {
    lines.get(offset..).unwrap_or(&[])
}

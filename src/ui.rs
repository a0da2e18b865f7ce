use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Paragraph, Widget};
use ratatui::Frame;

use crate::render::ViewLine;
use crate::state::NavState;

/// Draws already-built tree lines into a grid, one row per line.
pub struct TreeView<'a> {
    lines: &'a [ViewLine],
}

impl<'a> TreeView<'a> {
    pub fn new(lines: &'a [ViewLine]) -> Self {
        Self { lines }
    }
}

impl Widget for TreeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for (row, line) in self.lines.iter().take(usize::from(area.height)).enumerate() {
            let y = area.y + row as u16;
            let style = if line.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            buf.set_stringn(area.x, y, &line.text, usize::from(area.width), style);
        }
    }
}

/// Bottom row: the root path, plus the last error if there is one.
fn status_text(state: &NavState, error: Option<&str>) -> String {
    let root = state.tree().entry(state.tree().root()).path().display().to_string();
    match error {
        Some(error) => format!("{root}  {error}"),
        None => root,
    }
}

pub fn draw(frame: &mut Frame, state: &NavState, error: Option<&str>) {
    let [tree_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let lines = state.view();
    frame.render_widget(TreeView::new(&lines), tree_area);
    frame.render_widget(Paragraph::new(status_text(state, error)), status_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::sample_tree;
    use crate::tree::FileTree;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_tree_view_truncates_and_highlights() {
        let lines = vec![
            ViewLine {
                text: "▾ root".to_string(),
                selected: false,
            },
            ViewLine {
                text: " ├─ a-very-long-name.txt".to_string(),
                selected: true,
            },
        ];
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        TreeView::new(&lines).render(buf.area, &mut buf);

        assert_eq!(row(&buf, 0), "▾ root");
        assert_eq!(row(&buf, 1), " ├─ a-very");
        assert_eq!(row(&buf, 2), "");
        assert!(buf[(9, 1)].modifier.contains(Modifier::REVERSED));
        assert!(!buf[(0, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_tree_view_clips_height() {
        let lines: Vec<ViewLine> = (0..5)
            .map(|i| ViewLine {
                text: format!("line{i}"),
                selected: false,
            })
            .collect();
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 2));
        TreeView::new(&lines).render(buf.area, &mut buf);

        assert_eq!(row(&buf, 0), "line0");
        assert_eq!(row(&buf, 1), "line1");
    }

    #[test]
    fn test_draw_frame_with_status_line() {
        let dir = sample_tree();
        let tree = FileTree::open_root(dir.path(), false).unwrap();
        let root_path = tree.entry(tree.root()).path().display().to_string();
        let mut state = NavState::new(tree, 200, 2);
        state.move_down();
        state.move_down();

        let mut terminal = Terminal::new(TestBackend::new(200, 3)).unwrap();
        terminal.draw(|frame| draw(frame, &state, None)).unwrap();
        let buf = terminal.backend().buffer();

        assert_eq!(row(buf, 0), " ├─ ▸ a");
        assert_eq!(row(buf, 1), " ├─ sample1.txt");
        assert!(buf[(0, 1)].modifier.contains(Modifier::REVERSED));
        assert_eq!(row(buf, 2), root_path);
    }

    #[test]
    fn test_status_shows_error() {
        let dir = sample_tree();
        let tree = FileTree::open_root(dir.path(), false).unwrap();
        let state = NavState::new(tree, 80, 10);

        let text = status_text(&state, Some("cannot read a"));
        assert!(text.ends_with("  cannot read a"));
    }
}

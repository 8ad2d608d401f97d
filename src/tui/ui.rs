//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, Mode};
use crate::hierarchy::{Geometry, Hierarchy, VisibleRow};

/// Gap between the widest label and the detail column.
const DETAIL_GAP: usize = 2;

fn sections(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Tree view
            Constraint::Length(2), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn tree_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
}

/// Area inside the tree border where rows are drawn.
pub fn tree_viewport(area: Rect) -> Rect {
    tree_block().inner(sections(area)[1])
}

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let [header, tree, footer] = sections(frame.area());

    render_header(app, frame, header);
    render_tree_area(app, frame, tree);
    render_footer(app, frame, footer);

    if app.mode == Mode::Help {
        render_help_overlay(frame);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mode = if app.navigator.supports_multi_select() {
        "multi"
    } else {
        "single"
    };
    let header_text = format!(
        " {}  │  {} entries  │  {} selected ({})",
        app.root.display(),
        app.tree.len().saturating_sub(1),
        app.navigator.selection().len(),
        mode,
    );

    let block = Block::default()
        .title(" Grove ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_tree_area(app: &App, frame: &mut Frame, area: Rect) {
    let block = tree_block();
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.tree.children_count(app.tree.root_id()) == 0 {
        let paragraph = Paragraph::new("Empty directory")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, inner_area);
        return;
    }

    // Details are dropped once labels alone overflow the view
    let clipped = app.navigator.size().x > f32::from(inner_area.width);
    let detail_column = (!clipped).then(|| {
        app.tree.minimum_width(app.tree.root_id()) as usize + 2 + DETAIL_GAP
    });

    for (i, row) in app
        .tree
        .visible_rows()
        .skip(app.scroll_offset())
        .take(inner_area.height as usize)
        .enumerate()
    {
        let line_area = Rect::new(inner_area.x, inner_area.y + i as u16, inner_area.width, 1);
        render_row(app, frame, &row, line_area, detail_column);
    }
}

fn render_row(
    app: &App,
    frame: &mut Frame,
    row: &VisibleRow<'_>,
    area: Rect,
    detail_column: Option<usize>,
) {
    let indent = " ".repeat(row.depth * app.indent as usize);

    // Expand/collapse icon
    let icon = match (row.has_children, row.is_expanded) {
        (true, true) => "▼ ",
        (true, false) => "► ",
        (false, _) => "  ",
    };

    // Use chars().count() for display width, not byte length
    let prefix_len = indent.chars().count() + icon.chars().count();
    let name_width = (area.width as usize).saturating_sub(prefix_len);
    let name_char_count = row.label.chars().count();
    let display_name = if name_char_count > name_width && name_width > 1 {
        let truncated: String = row.label.chars().take(name_width - 1).collect();
        format!("{}…", truncated)
    } else {
        row.label.to_string()
    };

    let name_style = if row.has_children {
        Style::default().fg(Color::Blue).bold()
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(format!("{}{}", indent, icon), name_style),
        Span::styled(display_name.clone(), name_style),
    ];

    if let (Some(column), Some(detail)) = (detail_column, row.detail) {
        let used = prefix_len + display_name.chars().count();
        let end = column + detail.chars().count();
        if used <= column && end <= area.width as usize {
            spans.push(Span::raw(" ".repeat(column - used)));
            spans.push(Span::styled(
                detail.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let mut line = Line::from(spans);

    if app.navigator.is_selected(row.id) {
        let is_primary = app.navigator.selected_node() == Some(row.id);
        let background = if is_primary && app.navigator.has_focus() {
            Color::Blue
        } else {
            Color::DarkGray
        };
        line = line.style(Style::default().bg(background));
    }

    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => {
            "[↑↓] Navigate  [←→] Collapse/Expand  [Space] Toggle  [^A] Select all  [?] Help  [q] Quit"
        }
        Mode::Help => "[Esc] Close",
    };

    // Show status message if present, otherwise hints
    let text = app.status_message.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 22u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k        Previous entry
 ↓/j        Next entry
 →/l        Expand directory
 ←/h        Collapse directory
 Enter/Spc  Toggle expand/collapse

 SELECTION
 ─────────────────────────────────
 Click        Select entry
 Ctrl+Click   Add/remove entry
 Shift+Click  Select range
 Ctrl+A       Select all expanded
 Right click  Show entry path

 OTHER
 ─────────────────────────────────
 r          Reload from disk
 ?          Toggle this help
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavigatorConfig;
    use crate::hierarchy::NodeTree;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn sample_app() -> App {
        let mut tree = NodeTree::new("project");
        let root = tree.root_id();
        let src = tree.add_child(root, "src");
        let lib = tree.add_child(src, "lib.rs");
        tree.set_detail(lib, "1.2 KiB");
        let readme = tree.add_child(root, "README.md");
        tree.set_detail(readme, "512 B");
        tree.expand(root);
        App::new(PathBuf::from("/project"), tree, NavigatorConfig::default())
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                app.set_viewport(tree_viewport(frame.area()));
                render(app, frame);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_tree_viewport_is_inside_border() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(tree_viewport(area), Rect::new(1, 4, 78, 17));
    }

    #[test]
    fn test_render_rows_and_details() {
        let mut app = sample_app();
        let lines = draw(&mut app, 80, 24);

        assert!(lines[0].contains("Grove"));
        assert!(lines[1].contains("/project"));
        assert!(lines[1].contains("1 selected (multi)"));
        assert!(lines[4].contains("▼ project"));
        assert!(lines[5].contains("► src"));
        assert!(lines[6].contains("README.md"));
        assert!(lines[6].contains("512 B"));
    }

    #[test]
    fn test_render_highlights_selection() {
        let mut app = sample_app();
        draw(&mut app, 80, 24);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let buffer = terminal.backend().buffer();

        // "src" is the primary selection on the second tree row
        assert_eq!(buffer[(5, 5)].bg, Color::Blue);
        assert_ne!(buffer[(5, 6)].bg, Color::Blue);
    }

    #[test]
    fn test_render_narrow_terminal_truncates() {
        let mut tree = NodeTree::new("r");
        let root = tree.root_id();
        let file = tree.add_child(root, "a-very-long-file-name-that-overflows.txt");
        tree.set_detail(file, "9 KiB");
        tree.expand(root);
        let mut app = App::new(PathBuf::from("/r"), tree, NavigatorConfig::default());

        let lines = draw(&mut app, 20, 12);
        assert!(lines[5].contains('…'));
        assert!(!lines[5].contains("KiB"));
    }

    #[test]
    fn test_render_empty_directory() {
        let mut app = App::new(
            PathBuf::from("/empty"),
            NodeTree::new("empty"),
            NavigatorConfig::default(),
        );
        let lines = draw(&mut app, 80, 24);
        assert!(lines.iter().any(|line| line.contains("Empty directory")));
    }

    #[test]
    fn test_render_status_message_replaces_hints() {
        let mut app = sample_app();
        let lines = draw(&mut app, 100, 24);
        assert!(lines[22].contains("[q] Quit"));

        app.status_message = Some("Context: src".to_string());
        let lines = draw(&mut app, 100, 24);
        assert!(lines[22].contains("Context: src"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut app = sample_app();
        app.mode = Mode::Help;
        let lines = draw(&mut app, 80, 30);
        assert!(lines.iter().any(|line| line.contains("Select all expanded")));
    }
}

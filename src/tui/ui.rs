//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};

use super::app::{App, ConfirmAction, Mode, ScanTarget};
use crate::scanner::Item;
use crate::view::SortColumn;

const CATEGORY_WIDTH: usize = 20;
const NAME_WIDTH: usize = 24;
const SIZE_WIDTH: usize = 8;

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let gauge_height = if app.progress.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(gauge_height), // Progress
            Constraint::Min(1),               // Item table
            Constraint::Length(2),            // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    if app.progress.is_some() {
        render_progress(app, frame, chunks[1]);
    }
    render_table(app, frame, chunks[2]);
    render_footer(app, frame, chunks[3]);

    // Render overlays based on mode
    match app.mode {
        Mode::Search => render_input_overlay(frame, " Search ", &format!("/{}", app.params.search)),
        Mode::MinSize => render_input_overlay(frame, " Minimum size (MB) ", &app.input),
        Mode::Confirm(action) => render_confirm_dialog(app, frame, action),
        Mode::Help => render_help_overlay(frame),
        Mode::Normal => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let target = match &app.target {
        ScanTarget::System => "System scan".to_string(),
        ScanTarget::Folder(root) => format!("{}  (depth {})", root.display(), app.max_depth),
    };
    let shown: u64 = app.visible.iter().map(Item::bytes).sum();

    let filter = match &app.params.custom_mb {
        Some(mb) => format!("≥ {} MB", mb),
        None => app.params.bucket.label().to_string(),
    };
    let search = if app.params.search.is_empty() {
        String::new()
    } else {
        format!("  │  Search: {}", app.params.search)
    };

    let header_text = format!(
        " {}  │  {} items, {}  │  Filter: {}{}",
        target,
        app.visible.len(),
        humansize::format_size(shown, humansize::BINARY),
        filter,
        search
    );

    let block = Block::default()
        .title(" Rusty Reclaim ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_progress(app: &App, frame: &mut Frame, area: Rect) {
    let Some(progress) = &app.progress else {
        return;
    };
    let ratio = (progress.percent / 100.0).clamp(0.0, 1.0);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Scanning "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("{:.0}%  {}", progress.percent, progress.label));

    frame.render_widget(gauge, area);
}

fn render_table(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    if app.visible.is_empty() {
        let message = if app.is_scanning() {
            "Scanning..."
        } else if !app.params.search.is_empty() {
            "No matches found"
        } else if !app.items.is_empty() {
            "All items hidden by the size filter"
        } else {
            "No items"
        };

        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));

        frame.render_widget(paragraph, area);
        return;
    }

    let inner_area = block.inner(area);
    frame.render_widget(block, area);
    if inner_area.height == 0 {
        return;
    }

    let title_area = Rect::new(inner_area.x, inner_area.y, inner_area.width, 1);
    frame.render_widget(Paragraph::new(column_titles(app)), title_area);

    let max_size = app.visible.iter().map(Item::bytes).max().unwrap_or(1);
    let visible_height = inner_area.height.saturating_sub(1) as usize;

    // Calculate scroll offset to keep selection visible
    let scroll_offset = calculate_scroll_offset(app.selected, visible_height, app.visible.len());

    for (i, item) in app
        .visible
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .enumerate()
    {
        let y = inner_area.y + 1 + i as u16;
        let is_selected = scroll_offset + i == app.selected;
        let row = Rect::new(inner_area.x, y, inner_area.width, 1);

        frame.render_widget(Paragraph::new(item_line(item, max_size, is_selected)), row);
    }
}

fn column_titles(app: &App) -> Line<'static> {
    let title = |column: SortColumn, label: &str| {
        if app.params.sort.column == column {
            let arrow = if app.params.sort.descending { "▼" } else { "▲" };
            format!("{}{}", label, arrow)
        } else {
            label.to_string()
        }
    };

    Line::from(format!(
        "{:<cw$} {:<nw$} {:>sw$}  {}",
        title(SortColumn::Category, "1 Category"),
        title(SortColumn::Name, "2 Name"),
        title(SortColumn::Size, "4 Size"),
        title(SortColumn::Path, "3 Path"),
        cw = CATEGORY_WIDTH,
        nw = NAME_WIDTH,
        sw = SIZE_WIDTH,
    ))
    .style(Style::default().fg(Color::Yellow).bold())
}

fn item_line(item: &Item, max_size: u64, is_selected: bool) -> Line<'static> {
    let size_style = Style::default().fg(size_color(item.bytes(), max_size));

    let spans = vec![
        Span::styled(
            format!("{:<w$} ", fit(&item.category, CATEGORY_WIDTH), w = CATEGORY_WIDTH),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:<w$} ", fit(&item.short_name, NAME_WIDTH), w = NAME_WIDTH),
            Style::default().fg(Color::Blue).bold(),
        ),
        Span::styled(format!("{:>w$}", item.size.label, w = SIZE_WIDTH), size_style),
        Span::raw("  "),
        Span::styled(item.path.display().to_string(), Style::default().fg(Color::White)),
    ];

    let line = Line::from(spans);
    if is_selected {
        line.style(Style::default().bg(Color::DarkGray))
    } else {
        line
    }
}

/// Truncate on char boundaries, marking the cut with an ellipsis.
fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let truncated: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", truncated)
}

fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected.saturating_sub(padding)
    }
}

/// Get color for size display based on relative size.
/// Green for small entries, red for large entries.
fn size_color(size: u64, max_size: u64) -> Color {
    if max_size == 0 {
        return Color::Gray;
    }

    let ratio = size as f64 / max_size as f64;

    if ratio < 0.25 {
        Color::Green
    } else if ratio < 0.50 {
        Color::Yellow
    } else if ratio < 0.75 {
        Color::Rgb(255, 165, 0) // Orange
    } else {
        Color::Red
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => {
            "[↑↓] Move  [Enter] Open  [Bksp] Up  [d] Trash  [c] Clean  [u] Undo  [f] Filter  [/] Search  [?] Help  [q] Quit"
        }
        Mode::Search | Mode::MinSize => "[Enter] Confirm  [Esc] Cancel",
        Mode::Confirm(_) => "[y] Yes  [n] No",
        Mode::Help => "[Esc] Close",
    };

    // Show status message if present, otherwise hints
    let text = app.status_message.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_input_overlay(frame: &mut Frame, title: &str, input: &str) {
    let area = frame.area();

    // Position at bottom, above footer
    let input_area = Rect {
        x: 2,
        y: area.height.saturating_sub(6),
        width: area.width.saturating_sub(4).min(60),
        height: 3,
    };

    // Clear background
    frame.render_widget(Clear, input_area);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(input.to_string())
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, input_area);

    frame.set_cursor_position(Position::new(
        input_area.x + input.chars().count() as u16 + 1, // +1 for border
        input_area.y + 1,
    ));
}

fn render_confirm_dialog(app: &App, frame: &mut Frame, action: ConfirmAction) {
    let area = frame.area();

    // Center the dialog
    let dialog_width = 54u16.min(area.width.saturating_sub(4));
    let dialog_height = 8u16;
    let dialog_area = Rect {
        x: (area.width.saturating_sub(dialog_width)) / 2,
        y: (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    // Clear background
    frame.render_widget(Clear, dialog_area);

    let (path, size) = app
        .selected_item()
        .map(|item| {
            let p = item.path.display().to_string();
            let count = p.chars().count();
            let p = if count > 40 {
                let tail: String = p.chars().skip(count - 37).collect();
                format!("...{}", tail)
            } else {
                p
            };
            (p, item.size.label.clone())
        })
        .unwrap_or_default();

    let (title, message) = match action {
        ConfirmAction::Trash => (
            " Move to Trash ",
            format!("Move '{}' to the trash?\n\nSize: {}\n\n[y]es  [n]o", path, size),
        ),
        ConfirmAction::CleanFolder => (
            " Clean Folder ",
            format!(
                "Move everything inside\n'{}'\nto the trash?\n\nSize: {}\n\n[y]es  [n]o",
                path, size
            ),
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(message)
        .block(block)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, dialog_area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 30u16.min(area.height.saturating_sub(2));
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
 ↑/k ↓/j    Move selection
 g / G      Go to top / bottom
 Enter      Scan into selected folder
 Bksp       Scan parent folder
 + / -      Increase / decrease depth
 r          Rescan
 S          System scan

 ACTIONS
 ─────────────────────────────────
 o          Show in file manager
 d          Move to trash
 c          Trash folder contents
 u          Undo (open trash)

 VIEW
 ─────────────────────────────────
 /          Search
 f          Cycle size filter
 m          Custom minimum size (MB)
 1-4        Sort by column (again: reverse)
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

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, Wrap,
};

use crate::search::Segment;
use crate::tui::app::{App, SectionPane};
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    render_title_bar(frame, app, chunks[0]);
    render_search_bar(frame, app, chunks[1]);
    render_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_text = format!(
        "jagung - {} - {} sections",
        app.filename,
        app.section_count()
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title_bar_fg)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let mut line_spans = vec![
        Span::raw("Cari: "),
        Span::styled(
            format!("{}_", app.query),
            Style::default()
                .fg(theme.heading_fg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if app.clear_control_visible() {
        line_spans.push(Span::styled("  ✕ clear (Esc)", theme.hint_style()));
    } else if !app.has_search() {
        line_spans.push(Span::styled(
            "  (no searchable sections)",
            theme.hint_style(),
        ));
    }

    let paragraph = Paragraph::new(Line::from(line_spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(true))
                .title(" Search "),
        )
        .style(theme.content_style());

    frame.render_widget(paragraph, area);
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let paragraph = Paragraph::new(content_text(app)).wrap(Wrap { trim: false });
    // Scroll bound counts wrapped rows inside the borders
    app.update_content_metrics(paragraph.line_count(area.width.saturating_sub(2)));

    let theme = &app.theme;
    let title = if app.query.is_empty() {
        " Content ".to_string()
    } else {
        format!(" Content [{} of {}] ", app.summary.visible, app.section_count())
    };

    let paragraph = paragraph
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false))
                .title(title),
        )
        .style(theme.content_style())
        .scroll((app.content_scroll, 0));

    frame.render_widget(paragraph, area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(theme.scrollbar_fg));

    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.content_scroll_state.clone(),
    );
}

/// Header first, then every visible section separated by a blank line.
fn content_text(app: &App) -> Text<'static> {
    let theme = &app.theme;
    let mut lines: Vec<Line<'static>> = Vec::new();

    if let Some(header) = app.header_view() {
        lines.extend(
            header
                .lines
                .iter()
                .map(|line| Line::from(line_spans(line, theme.header_style(), theme))),
        );
        lines.push(Line::default());
    }

    let panes = app.section_panes();
    if panes.is_empty() && !app.query.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("No sections match \"{}\"", app.query),
            theme.hint_style(),
        )));
    }

    for (i, pane) in panes.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(section_lines(pane, theme));
    }

    Text::from(lines)
}

/// Heading with a fold marker, then the body unless the section is folded.
fn section_lines(pane: &SectionPane, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = pane.view.lines.iter();
    let mut out = Vec::new();

    if let Some(heading) = lines.next() {
        let style = if pane.focused {
            theme.focused_heading_style()
        } else {
            theme.heading_style()
        };
        let marker = if pane.collapsed { " ▶" } else { " ▼" };
        let mut spans = line_spans(heading, style, theme);
        spans.push(Span::styled(marker, theme.hint_style()));
        out.push(Line::from(spans));
    }

    if !pane.collapsed {
        out.extend(lines.map(|line| Line::from(line_spans(line, Style::default(), theme))));
    }
    out
}

fn line_spans(segments: &[Segment], base: Style, theme: &Theme) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => Span::styled(text.clone(), base),
            Segment::Highlighted(text) => {
                Span::styled(text.clone(), base.patch(theme.highlight_style()))
            }
        })
        .collect()
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref msg) = app.status_message {
        let status = Paragraph::new(msg.clone()).style(
            app.theme
                .status_bar_style()
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
        return;
    }

    let match_info = if app.query.is_empty() {
        format!("{} sections", app.section_count())
    } else {
        format!(
            "{} shown • {} hidden • {} matches",
            app.summary.visible, app.summary.hidden, app.summary.markers
        )
    };

    let status_text = format!(
        " {} • ↑↓/PgUp/PgDn:Scroll • Tab/Enter:Fold • Ctrl+U:Clear • Ctrl+D:Theme • Ctrl+Q:Quit  Theme:{} ",
        match_info, app.theme.name
    );

    let status = Paragraph::new(status_text).style(app.theme.status_bar_style());
    frame.render_widget(status, area);
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use wormtype::achievements::WormColor;
use wormtype::session::SessionPhase;

use crate::{App, Screen};

const HORIZONTAL_MARGIN: u16 = 5;

pub fn draw(app: &App, f: &mut Frame) {
    match app.screen {
        Screen::NameSelect => draw_name_select(app, f),
        Screen::NameEntry => draw_name_entry(app, f),
        Screen::Typing => draw_typing(app, f),
        Screen::Results => draw_results(app, f),
        Screen::Leaderboard => draw_leaderboard(app, f),
    }
}

fn worm_style(app: &App) -> Style {
    let color = match app.achievements.equipped {
        WormColor::Pink => Color::Rgb(255, 20, 147),
        WormColor::Default => Color::Rgb(245, 73, 39),
    };
    Style::default().fg(color)
}

fn title_line() -> Line<'static> {
    Line::from(Span::styled(
        "W4RMUP W0RM'S T3RMINAL TYP3R",
        Style::default()
            .fg(Color::Rgb(245, 73, 39))
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
}

fn help_line(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center)
}

fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_name_select(app: &App, f: &mut Frame) {
    let mut lines = vec![title_line(), Line::default()];

    for (idx, name) in app.name_choices.iter().enumerate() {
        let selected = idx == app.name_cursor;
        lines.push(menu_line(name, selected));
    }
    lines.push(menu_line(
        "Create New Player",
        app.name_cursor == app.name_choices.len(),
    ));

    lines.push(Line::default());
    lines.push(help_line("Up/Down + Enter | Q: quit"));

    let height = lines.len() as u16 + 2;
    let area = centered_box(f.area(), 44, height);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("SELECT YOUR NAME"));
    f.render_widget(widget, area);
}

fn menu_line(label: &str, selected: bool) -> Line<'_> {
    if selected {
        Line::from(Span::styled(
            format!("[{label}]"),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::raw(label.to_string()))
    }
}

fn draw_name_entry(app: &App, f: &mut Frame) {
    let prompt = if app.name_input.is_empty() {
        help_line("Type your name...")
    } else {
        help_line("Enter: confirm | ESC: quit")
    };

    let lines = vec![
        title_line(),
        Line::default(),
        Line::from(vec![
            Span::raw("Name: ["),
            Span::styled(
                app.name_input.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::raw("]"),
        ]),
        Line::default(),
        prompt,
    ];

    let area = centered_box(f.area(), 44, lines.len() as u16 + 2);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("CREATE PLAYER"));
    f.render_widget(widget, area);
}

fn draw_typing(app: &App, f: &mut Frame) {
    let area = f.area();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let target: String = app.session.target().iter().collect();
    let mut prompt_occupied_lines =
        ((target.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if target.width() <= max_chars_per_line as usize {
        prompt_occupied_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(
                (area.height.saturating_sub(prompt_occupied_lines + 6) / 2).max(1),
            ),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    f.render_widget(Paragraph::new(title_line()), chunks[0]);

    // the worm inches across as the round progresses
    let worm_line = app.worm.render_line(chunks[2].width);
    f.render_widget(
        Paragraph::new(Span::styled(worm_line, worm_style(app))),
        chunks[2],
    );

    let widget = Paragraph::new(Line::from(prompt_spans(app)))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: false });
    f.render_widget(widget, chunks[4]);

    let typed_len = app.session.typed().len();
    let target_len = app.session.target().len();
    let mut footer = vec![Line::from(Span::styled(
        format!("Progress: {typed_len}/{target_len}"),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)];

    // stats appear once something has been typed
    if app.session.phase() != SessionPhase::Idle {
        if let Some(stats) = app.session.live_stats() {
            let elapsed = app.session.elapsed_secs_at(std::time::SystemTime::now());
            footer.push(
                Line::from(Span::raw(format!(
                    "WPM: {:.1} | Accuracy: {:.1}% | Time: {:.0}s",
                    stats.wpm, stats.accuracy, elapsed
                )))
                .alignment(Alignment::Center),
            );
        }
    }
    f.render_widget(Paragraph::new(footer), chunks[6]);

    f.render_widget(
        Paragraph::new(help_line("ENTER: restart | ESC: quit")),
        chunks[7],
    );
}

fn prompt_spans(app: &App) -> Vec<Span<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let green_bold = bold.fg(Color::Green);
    let red_bold = bold.fg(Color::Red);
    let dim_bold = bold.add_modifier(Modifier::DIM);
    let caret = dim_bold.add_modifier(Modifier::UNDERLINED);

    let typed = app.session.typed();
    let cursor = app.session.cursor_pos();

    app.session
        .target()
        .iter()
        .enumerate()
        .map(|(idx, &expected)| {
            if idx < typed.len() {
                if typed[idx] == expected {
                    Span::styled(expected.to_string(), green_bold)
                } else {
                    // show what was actually typed; make wrong spaces visible
                    let shown = match typed[idx] {
                        ' ' => "·".to_string(),
                        c => c.to_string(),
                    };
                    Span::styled(shown, red_bold)
                }
            } else if idx == cursor {
                Span::styled(expected.to_string(), caret)
            } else {
                Span::styled(expected.to_string(), dim_bold)
            }
        })
        .collect()
}

fn draw_results(app: &App, f: &mut Frame) {
    let mut lines = vec![title_line(), Line::default()];

    if let Some(outcome) = &app.outcome {
        lines.push(
            Line::from(Span::styled(
                "COMPLETE!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(Line::default());
        lines.push(
            Line::from(Span::raw(format!(
                "WPM: {:.1} | Accuracy: {:.1}% | Time: {:.0}s",
                outcome.wpm, outcome.accuracy, outcome.elapsed_secs
            )))
            .alignment(Alignment::Center),
        );
    }

    if app.unlocked_this_round {
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                "ACHIEVEMENT UNLOCKED! red!worm?pink!worm?",
                Style::default()
                    .fg(Color::Rgb(255, 20, 147))
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(help_line("Press W to try your new worm color"));
    }

    lines.push(Line::default());
    lines.push(help_line(
        "ENTER/N: new round | L: leaderboard | W: worm color | ESC: quit",
    ));

    let area = centered_box(f.area(), 72, lines.len() as u16 + 2);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_leaderboard(app: &App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(2),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                "=== TOP 10 LEADERBOARD ===",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        ),
        chunks[0],
    );

    if app.records.is_empty() {
        f.render_widget(
            Paragraph::new(help_line("No scores recorded yet!")),
            chunks[1],
        );
    } else {
        let header = Row::new(vec![
            "Rank", "Name", "WPM", "Accuracy", "Time", "Words", "Mode", "Date",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

        let rows = app.records.iter().enumerate().map(|(idx, rec)| {
            Row::new(vec![
                Cell::from(format!("{}", idx + 1)),
                Cell::from(rec.name.clone()),
                Cell::from(format!("{:.1}", rec.wpm)),
                Cell::from(format!("{:.1}%", rec.accuracy)),
                Cell::from(format!("{:.0}s", rec.elapsed_secs)),
                Cell::from(format!("{}w", rec.word_count)),
                Cell::from(rec.mode_tag()),
                Cell::from(rec.date.clone()),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(16),
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(4),
                Constraint::Length(16),
            ],
        )
        .header(header)
        .column_spacing(2);
        f.render_widget(table, chunks[1]);
    }

    let help = if app.confirm_clear {
        "Clear all leaderboard data? Y to confirm, any other key to cancel"
    } else {
        "C: clear | any other key: back | ESC: quit"
    };
    f.render_widget(Paragraph::new(help_line(help)), chunks[2]);
}

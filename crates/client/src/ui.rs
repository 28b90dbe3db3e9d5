//! UI rendering for the ranked roster view.
//!
//! Layout, top to bottom: header, add-character input bar, ranked
//! table, selected-row details, status + key hints.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use warboard_core::format::{solo_ratings_line, spec_display_name, stats_line};
use warboard_core::snapshot::CharacterSnapshot;

use crate::app::{App, Field, Mode, StatusLevel};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_input(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_details(frame, chunks[3], app);
    render_status(frame, chunks[4], app);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let text = vec![Line::from(Span::styled(
        "Warboard - ranked PvP roster",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];
    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.mode == Mode::Insert;

    let field_style = |field: Field| {
        if editing && app.focus == field {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let text = vec![Line::from(vec![
        Span::raw("Name: "),
        Span::styled(placeholder(&app.name_input), field_style(Field::Name)),
        Span::raw("   Server: "),
        Span::styled(placeholder(&app.server_input), field_style(Field::Server)),
    ])];

    let title = if editing {
        "Add character (editing)"
    } else {
        "Add character [a]"
    };
    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn placeholder(input: &str) -> String {
    if input.is_empty() {
        "_".to_string()
    } else {
        input.to_string()
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Character"),
        Cell::from("Class"),
        Cell::from("Solo Ratings"),
        Cell::from("2v2"),
        Cell::from("3v3"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .service()
        .ranked_view()
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            Row::new(vec![
                Cell::from(format!("#{}", index + 1)),
                Cell::from(snapshot.display_name.clone()),
                Cell::from(snapshot.class_name.clone()),
                Cell::from(solo_ratings_line(&snapshot.solo_brackets())),
                Cell::from(team_rating(snapshot, "2v2")),
                Cell::from(team_rating(snapshot, "3v3")),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(14),
            Constraint::Length(12),
            Constraint::Min(24),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Roster"))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn team_rating(snapshot: &CharacterSnapshot, token: &str) -> String {
    snapshot
        .bracket(token)
        .map(|b| b.rating.to_string())
        .unwrap_or_else(|| "0".to_string())
}

fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let ranked = app.service().ranked_view();
    let selected = app
        .table_state
        .selected()
        .and_then(|index| ranked.get(index).copied());

    let lines = match selected {
        Some(snapshot) => detail_lines(snapshot),
        None => vec![Line::from(Span::styled(
            "No character selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Details"));
    frame.render_widget(paragraph, area);
}

fn detail_lines(snapshot: &CharacterSnapshot) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            snapshot.display_name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " - {} ({}) on {}",
            snapshot.class_name, snapshot.faction_name, snapshot.realm_slug
        )),
    ])];

    for bracket in snapshot.solo_brackets() {
        lines.push(Line::from(format!(
            "{}: {} - {}",
            spec_display_name(&bracket.bracket),
            bracket.rating,
            stats_line(&bracket.statistics)
        )));
    }
    for token in ["2v2", "3v3"] {
        if let Some(bracket) = snapshot.bracket(token) {
            lines.push(Line::from(format!(
                "{}: {} - {}",
                token,
                bracket.rating,
                stats_line(&bracket.statistics)
            )));
        }
    }
    if let Some(avatar) = &snapshot.avatar_url {
        lines.push(Line::from(Span::styled(
            format!("Avatar: {}", avatar),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let message = if let Some(busy) = &app.busy {
        Line::from(Span::styled(
            busy.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else if let Some(status) = &app.status {
        let color = match status.level {
            StatusLevel::Info => Color::LightGreen,
            StatusLevel::Warning => Color::Yellow,
            StatusLevel::Error => Color::LightRed,
        };
        Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(color),
        ))
    } else {
        hints(app.mode)
    };

    let paragraph = Paragraph::new(vec![message]).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn hints(mode: Mode) -> Line<'static> {
    match mode {
        Mode::Browse => Line::from(vec![
            Span::raw("[a] Add | "),
            Span::raw("[d] Remove | "),
            Span::raw("[r] Refresh | "),
            Span::raw("[j/k/Arrows] Select | "),
            Span::raw("[q] Quit"),
        ]),
        Mode::Insert => Line::from(vec![
            Span::raw("[Tab] Switch field | "),
            Span::raw("[Enter] Add | "),
            Span::raw("[Esc] Cancel"),
        ]),
    }
}

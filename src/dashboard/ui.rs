//! Rendering for the dashboard.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{App, MetricsState, Notice, View};
use super::chart::{reference_line, roc_chart};
use crate::models::MetricsReport;

/// Draw the whole screen: sidebar, current page, footer.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(40)])
        .split(rows[0]);

    draw_sidebar(frame, columns[0], app);
    match app.session.view {
        View::Prediction => draw_prediction_page(frame, columns[1], app),
        View::Metrics => draw_metrics_page(frame, columns[1], app),
    }
    draw_footer(frame, rows[1], app);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = View::all()
        .iter()
        .zip(["p", "m"])
        .map(|(view, key)| {
            let style = if *view == app.session.view {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(format!(" [{key}] {} ", view.name())).style(style)
        })
        .collect();

    let session = app.session.id.to_string();
    let muted = Style::default().fg(Color::DarkGray);
    lines.push(Line::default());
    lines.push(Line::from(format!(" session {}", &session[..8])).style(muted));
    lines.push(Line::from(format!(" {}", app.api_url)).style(muted));

    let sidebar = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Navigation "));
    frame.render_widget(sidebar, area);
}

fn draw_prediction_page(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(app.inputs.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let title = Paragraph::new(vec![
        Line::from("Iris Flower Predictor").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("Enter the flower measurements to predict its species."),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    for (i, input) in app.inputs.iter().enumerate() {
        let focused = i == app.focus;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let text = if input.text().is_empty() { "0" } else { input.text() };
        let field = Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(format!(" {} ", input.label)),
        );
        frame.render_widget(field, chunks[i + 1]);
    }

    if let Some(notice) = &app.notice {
        let (text, color) = match notice {
            Notice::Success(msg) => (msg.as_str(), Color::Green),
            Notice::Invalid(msg) => (msg.as_str(), Color::Yellow),
            Notice::Error(msg) => (msg.as_str(), Color::Red),
        };
        let widget = Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(widget, chunks[app.inputs.len() + 1]);
    }
}

fn draw_metrics_page(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Model training metrics ");

    match &app.metrics {
        MetricsState::Loaded(report) => draw_report(frame, area, report),
        MetricsState::NotLoaded => {
            let hint = Paragraph::new("Press [r] to fetch the metrics report")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(hint, area);
        }
        MetricsState::Loading => {
            let loading = Paragraph::new("Fetching metrics...")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(loading, area);
        }
        MetricsState::Failed(msg) => {
            let error = Paragraph::new(msg.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(error, area);
        }
    }
}

/// Height of a bordered block holding `lines` rows of text.
fn bordered_height(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

fn draw_report(frame: &mut Frame, area: Rect, report: &MetricsReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(bordered_height(report.classification_report.lines().count())),
            Constraint::Length(bordered_height(report.roc_auc.len())),
            Constraint::Min(8),
        ])
        .split(area);

    let accuracy = Paragraph::new(format!("Accuracy: {:.2}", report.accuracy))
        .block(Block::default().borders(Borders::ALL).title(" Accuracy "));
    frame.render_widget(accuracy, chunks[0]);

    let text = Paragraph::new(report.classification_report.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Classification Report "),
    );
    frame.render_widget(text, chunks[1]);

    let auc_lines: Vec<Line> = report
        .roc_auc
        .iter()
        .enumerate()
        .map(|(i, auc)| Line::from(format!("AUC ROC for class {i}: {auc:.2}")))
        .collect();
    let auc = Paragraph::new(auc_lines)
        .block(Block::default().borders(Borders::ALL).title(" AUC ROC "));
    frame.render_widget(auc, chunks[2]);

    let classes = report.roc_auc.len().min(report.fpr.len()).min(report.tpr.len());
    if classes == 0 {
        return;
    }
    let curves: Vec<Vec<(f64, f64)>> = (0..classes).map(|i| report.roc_points(i)).collect();
    let reference = reference_line();

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, classes as u32); classes])
        .split(chunks[3]);

    for (i, curve) in curves.iter().enumerate() {
        frame.render_widget(roc_chart(i, report.roc_auc[i], curve, &reference), cells[i]);
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let page_help = match app.session.view {
        View::Prediction => "[Tab/↑↓] Field  [←→] Step 0.1  [0-9 .] Type  [Enter] Predict",
        View::Metrics => "[r] Refresh",
    };
    let footer = Paragraph::new(format!("{page_help}  |  [p/m] Page  [q] Quit"))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

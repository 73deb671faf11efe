//! ROC curve charts.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
};

/// Points of the chance line, spaced out so it renders dashed.
pub fn reference_line() -> Vec<(f64, f64)> {
    (0..=20)
        .filter(|i| i % 2 == 0)
        .map(|i| {
            let x = i as f64 / 20.0;
            (x, x)
        })
        .collect()
}

/// FPR vs TPR for one class, over the diagonal reference.
pub fn roc_chart<'a>(
    class: usize,
    auc: f64,
    curve: &'a [(f64, f64)],
    reference: &'a [(f64, f64)],
) -> Chart<'a> {
    let datasets = vec![
        Dataset::default()
            .name(format!("Class {class} (AUC = {auc:.2})"))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(curve),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::DarkGray))
            .data(reference),
    ];

    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" ROC class {class} ")),
        )
        .legend_position(Some(LegendPosition::BottomRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)))
        .x_axis(
            Axis::default()
                .title("FPR")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 1.0])
                .labels(vec![Span::raw("0.0"), Span::raw("0.5"), Span::raw("1.0")]),
        )
        .y_axis(
            Axis::default()
                .title("TPR")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 1.0])
                .labels(vec![Span::raw("0.0"), Span::raw("0.5"), Span::raw("1.0")]),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_line_spans_the_unit_square() {
        let line = reference_line();
        assert_eq!(line.first(), Some(&(0.0, 0.0)));
        assert_eq!(line.last(), Some(&(1.0, 1.0)));
        assert!(line.iter().all(|(x, y)| x == y));
    }
}

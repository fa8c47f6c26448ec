//! Note intensity chart
//!
//! One point per payload byte: note (or bin) index against brightness.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

const CHANNEL_COLORS: [Color; 2] = [Color::LightGreen, Color::LightCyan];

pub fn render_notes(frame: &mut Frame, area: Rect, channel: usize, payload: &[u8]) {
    let block = Block::default()
        .title(format!(" FFT{channel} "))
        .borders(Borders::ALL);

    let data: Vec<(f64, f64)> = payload
        .iter()
        .enumerate()
        .map(|(i, &b)| (i as f64, b as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(CHANNEL_COLORS[channel % CHANNEL_COLORS.len()]))
        .data(&data);

    let max_x = payload.len().max(1) as f64;
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_x])
                .labels(vec!["0".to_string(), format!("{}", payload.len())])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 255.0])
                .labels(vec!["0", "128", "255"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

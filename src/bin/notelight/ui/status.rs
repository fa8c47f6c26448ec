//! Delay settings and delivery counters

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use notelight::{params::DelayParamsSnapshot, telemetry::TelemetryStats};

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    params: &DelayParamsSnapshot,
    bypass: bool,
    stats: &TelemetryStats,
) {
    let state = if bypass {
        Span::styled(" BYPASS ", Style::default().fg(Color::Black).bg(Color::Yellow))
    } else {
        Span::styled(
            " ACTIVE ",
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        )
    };

    let line = Line::from(vec![
        state,
        Span::raw(format!(
            "  delay {:.0} ms  feedback {:.2}  mix {:.2}",
            params.delay_ms, params.feedback, params.mix
        )),
        Span::styled(
            format!(
                "  frames {}  dropped {}",
                stats.delivered(),
                stats.dropped()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default().title(" notelight ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

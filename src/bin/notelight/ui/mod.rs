//! TUI module for notelight
//!
//! Drains delivered frames and draws one note chart per channel.

mod notes;
mod status;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

use notelight::{
    telemetry::{Courier, TelemetrySink},
    DelayParams, SinkError,
};

use notes::render_notes;
use status::render_status;

const DELAY_STEP_MS: f32 = 10.0;
const FEEDBACK_STEP: f32 = 0.05;
const MIX_STEP: f32 = 0.05;

/// Sink keeping the most recent payload for each `FFT{n}` key.
pub struct LatestFrames {
    frames: Vec<Vec<u8>>,
}

impl LatestFrames {
    fn new(channels: usize) -> Self {
        Self {
            frames: vec![Vec::new(); channels],
        }
    }

    fn channel(&self, channel: usize) -> &[u8] {
        self.frames.get(channel).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl TelemetrySink for LatestFrames {
    fn send(&mut self, key: &str, payload: &[u8]) -> Result<(), SinkError> {
        let channel = key
            .strip_prefix("FFT")
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| SinkError::Rejected(format!("unexpected key {key}")))?;
        if channel >= self.frames.len() {
            self.frames.resize(channel + 1, Vec::new());
        }
        let slot = &mut self.frames[channel];
        slot.clear();
        slot.extend_from_slice(payload);
        Ok(())
    }
}

/// UI application state
pub struct UiApp {
    courier: Courier,
    frames: LatestFrames,
    params: Arc<DelayParams>,
    bypass: Arc<AtomicBool>,
    channels: usize,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        courier: Courier,
        params: Arc<DelayParams>,
        bypass: Arc<AtomicBool>,
        channels: usize,
    ) -> Self {
        Self {
            courier,
            frames: LatestFrames::new(channels),
            params,
            bypass,
            channels,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.courier.deliver_pending(&mut self.frames);

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        let params = &self.params;
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('b') => {
                self.bypass.fetch_xor(true, Ordering::Relaxed);
            }
            KeyCode::Up => params.set_delay_ms(params.delay_ms() + DELAY_STEP_MS),
            KeyCode::Down => params.set_delay_ms(params.delay_ms() - DELAY_STEP_MS),
            KeyCode::Char(']') => params.set_feedback(params.feedback() + FEEDBACK_STEP),
            KeyCode::Char('[') => params.set_feedback(params.feedback() - FEEDBACK_STEP),
            KeyCode::Right => params.set_mix(params.mix() + MIX_STEP),
            KeyCode::Left => params.set_mix(params.mix() - MIX_STEP),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend((0..self.channels).map(|_| Constraint::Min(6)));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());

        render_status(
            frame,
            chunks[0],
            &self.params.snapshot(),
            self.bypass.load(Ordering::Relaxed),
            self.courier.stats(),
        );

        for channel in 0..self.channels {
            render_notes(frame, chunks[channel + 1], channel, self.frames.channel(channel));
        }

        let help = Paragraph::new(
            " [Q] Quit  [B] Bypass  [Up/Down] Delay  [ [ / ] ] Feedback  [Left/Right] Mix",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[self.channels + 1]);
    }
}

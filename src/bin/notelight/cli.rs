use clap::Parser;
use notelight::{params::DelayParamsSnapshot, EffectConfig, PayloadShape};

#[derive(Parser, Debug)]
#[command(name = "notelight", about = "Live note-binned spectrum analyzer with feedback delay")]
pub struct Cli {
    /// Delay time in milliseconds
    #[arg(long, default_value_t = 250.0)]
    pub delay_ms: f32,

    /// Feedback amount (0.0-0.98)
    #[arg(long, default_value_t = 0.35)]
    pub feedback: f32,

    /// Dry/wet mix (0.0 = dry, 1.0 = wet)
    #[arg(long, default_value_t = 0.3)]
    pub mix: f32,

    /// Emit one byte per FFT bin instead of per note
    #[arg(long)]
    pub bins: bool,

    /// Magnitude that maps to full brightness
    #[arg(long, default_value_t = 1.0)]
    pub full_scale: f32,

    /// Start with the effect bypassed
    #[arg(long)]
    pub bypass: bool,

    /// Don't monitor the delayed signal on the output device
    #[arg(long)]
    pub no_monitor: bool,

    /// Log frames instead of drawing the terminal UI
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    pub fn delay_params(&self) -> DelayParamsSnapshot {
        DelayParamsSnapshot {
            delay_ms: self.delay_ms,
            feedback: self.feedback,
            mix: self.mix,
        }
    }

    pub fn effect_config(&self, sample_rate: f32) -> EffectConfig {
        let payload = if self.bins {
            PayloadShape::Bins
        } else {
            PayloadShape::Notes
        };
        EffectConfig::default()
            .with_sample_rate(sample_rate)
            .with_payload(payload)
            .with_full_scale(self.full_scale)
    }
}

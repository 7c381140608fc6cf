use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use rppal::hal::Delay;

use pcd8544::pcd8544::{COLUMNS, ROWS};
use pcd8544::{Config, Pins, RppalBackend, DEFAULT_CONTRAST, FONT_5X7};

/// Show a few lines of text on a PCD8544 (Nokia 5110) display
#[derive(Parser)]
#[command(name = "pcd8544-text")]
#[command(version)]
struct Cli {
    /// Lines to show, one per text row. Read from stdin when none are given
    lines: Vec<String>,

    /// Serial clock pin (BCM)
    #[arg(long, default_value_t = Pins::CLK)]
    clk: u8,

    /// Serial data pin (BCM)
    #[arg(long, default_value_t = Pins::DIN)]
    din: u8,

    /// Data/command select pin (BCM)
    #[arg(long, default_value_t = Pins::DC)]
    dc: u8,

    /// Reset pin (BCM)
    #[arg(long, default_value_t = Pins::RST)]
    rst: u8,

    /// Backlight pin (BCM)
    #[arg(long, default_value_t = Pins::LIGHT)]
    light: u8,

    /// Chip enable pin (BCM)
    #[arg(long, default_value_t = Pins::CE)]
    ce: u8,

    /// Contrast register value, decimal or hex with 0x prefix
    #[arg(short, long, value_parser = parse_byte, default_value_t = DEFAULT_CONTRAST)]
    contrast: u8,

    /// Leave the backlight off
    #[arg(long)]
    dark: bool,

    /// Only clear the screen
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            clock: self.clk,
            data: self.din,
            data_command: self.dc,
            reset: self.rst,
            backlight: self.light,
            chip_enable: self.ce,
            contrast: self.contrast,
        }
    }
}

fn parse_byte(s: &str) -> Result<u8, std::num::ParseIntError> {
    if s.starts_with("0x") || s.starts_with("0X") {
        u8::from_str_radix(&s[2..], 16)
    } else {
        s.parse()
    }
}

/// Cut a line down to what fits on one text row
fn fit_line(line: &str) -> &str {
    match line.char_indices().nth(usize::from(COLUMNS)) {
        Some((end, _)) => {
            log::warn!("Line {:?} is longer than {} characters, truncating", line, COLUMNS);
            &line[..end]
        }
        None => line,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();

    let lines = if cli.lines.is_empty() && !cli.clear {
        io::stdin()
            .lock()
            .lines()
            .take(usize::from(ROWS))
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read lines from stdin")?
    } else {
        cli.lines.clone()
    };
    if lines.len() > usize::from(ROWS) {
        log::warn!("Only the first {} lines fit on the display", ROWS);
    }

    let mut backend = RppalBackend::new();
    let mut delay = Delay::new();
    let mut display = pcd8544::open(&mut backend, &config, Delay::new(), &mut delay)
        .context("Could not initialize display")?;

    display
        .set_backlight(!cli.dark)
        .context("Failed to switch backlight")?;

    if cli.clear {
        log::info!("Display cleared");
        return Ok(());
    }

    for (row, line) in (0..ROWS).zip(lines.iter()) {
        display
            .draw_text(fit_line(line), &FONT_5X7, row, 0)
            .with_context(|| format!("Failed to draw line {}", row))?;
    }

    log::info!("Wrote {} lines", lines.len().min(usize::from(ROWS)));
    Ok(())
}

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Month;
use clap::Args;
use dayoff_core::{
    Phase, ShareError, SharePayload, SharePlatform, Shell, TextCanvas, Variant,
};

use super::{current_year, load_config, parse_month};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Args)]
pub struct PlayArgs {
    /// Month number or name (e.g. 2, feb, February)
    #[arg(long, value_parser = parse_month)]
    month: Month,
    /// Year (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
    /// Force the landing slot (0-based index into the month's days)
    #[arg(long)]
    target: Option<usize>,
    /// wheel or board
    #[arg(long)]
    variant: Option<Variant>,
    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the animation and print the result only
    #[arg(long)]
    no_animate: bool,
    /// Copy the calendar link to the clipboard
    #[arg(long)]
    share: bool,
    /// Open the calendar link in the default browser
    #[arg(long)]
    open: bool,
    /// Output the final view as JSON
    #[arg(long)]
    json: bool,
}

/// Terminal share backend: no share sheet, clipboard through OSC 52.
struct TerminalPlatform;

impl SharePlatform for TerminalPlatform {
    fn native_share(&mut self, _payload: &SharePayload) -> Result<(), ShareError> {
        Err(ShareError::Unsupported("terminal has no share sheet"))
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
        let mut stdout = io::stdout();
        if !stdout.is_terminal() {
            return Err(ShareError::Failed("stdout is not a terminal".into()));
        }
        write!(stdout, "\x1b]52;c;{}\x07", STANDARD.encode(text))
            .and_then(|_| stdout.flush())
            .map_err(|e| ShareError::Failed(e.to_string()))
    }
}

fn canvas_for(variant: Variant) -> TextCanvas {
    match variant {
        Variant::Wheel => TextCanvas::for_wheel(),
        Variant::Board => TextCanvas::for_board(),
    }
}

fn draw(shell: &Shell, canvas: &mut TextCanvas, out: &mut impl Write) -> io::Result<()> {
    shell.render(canvas);
    write!(
        out,
        "{CLEAR_SCREEN}{canvas}\n[ {} ]\n{}\n",
        shell.control().label(),
        shell.message()
    )?;
    out.flush()
}

pub fn run(args: PlayArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if let Some(variant) = args.variant {
        config.animation.variant = variant;
    }
    if args.seed.is_some() {
        config.animation.seed = args.seed;
    }
    config.validate()?;
    let duration_ms = config.animation.duration_ms as f64;

    let year = args.year.unwrap_or_else(current_year);
    let mut shell = Shell::new(config, year);
    shell.select_month(args.month);
    if shell.candidates().is_some_and(|c| c.is_empty()) {
        return Err(format!("{} {year} has no candidate days", args.month.name()).into());
    }
    shell.trigger_drop(args.target)?;

    let animate = !args.no_animate && !args.json;
    let mut canvas = canvas_for(shell.variant());
    let started = Instant::now();
    while shell.phase() == Phase::Dropping {
        if animate {
            shell.frame(started.elapsed().as_secs_f64() * 1000.0);
            draw(&shell, &mut canvas, &mut io::stdout().lock())?;
            thread::sleep(FRAME_INTERVAL);
        } else {
            shell.frame(0.0);
            shell.frame(duration_ms);
        }
    }
    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "drop finished");

    let view = shell.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        if !animate {
            println!("{}", view.message);
        }
        if let Some(result) = &view.result {
            if let Some(name) = result.holiday_name {
                println!("Holiday: {name}");
            }
            if let Some(link) = &result.calendar_link {
                println!("Add to calendar: {link}");
            }
        }
    }

    if args.share {
        let mut platform = TerminalPlatform;
        if let Some(outcome) = shell.share(&mut platform) {
            if let Some(ack) = outcome.acknowledgment() {
                eprintln!("{ack}");
            }
        }
    }
    if args.open {
        let link = shell.calendar_link()?;
        open::that(link.as_str())?;
    }
    Ok(())
}

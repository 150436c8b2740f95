// duoscreen - Main Entry Point
//
// Shows the error screen for a diagnostic given on the command line, either
// in a window or rendered once to a PNG file.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use duoscreen::display::{run_error_display, FrameCapture, ScreenLayout, WindowConfig};
use duoscreen::error_screen::{
    save_png, save_screenshot, DiagnosticMessage, ErrorScreen, ErrorScreenConfig,
};
use std::path::PathBuf;

const SAMPLE_SUMMARY: &str = "BIOS not found";
const SAMPLE_REMEDIATION: &str = "Place the DS BIOS and firmware files (bios7.bin, bios9.bin and \
firmware.bin) in your system directory, or enable the built-in replacements in the \
emulator settings. Then restart the game.";

#[derive(Parser, Debug, Clone)]
#[command(name = "duoscreen")]
#[command(about = "Dual-screen error screen renderer", long_about = None)]
struct Cli {
    /// Short technical description shown on the top screen
    #[arg(long, default_value = SAMPLE_SUMMARY)]
    summary: String,

    /// Instructions for the user shown on the bottom screen
    #[arg(long, default_value = SAMPLE_REMEDIATION)]
    remediation: String,

    /// TOML configuration file; created with defaults if missing
    #[arg(long)]
    config: Option<PathBuf>,

    /// Screen arrangement (top-bottom, bottom-top, left-right, right-left, top-only, bottom-only)
    #[arg(long)]
    layout: Option<ScreenLayout>,

    /// Pixels between the two screens
    #[arg(long)]
    gap: Option<usize>,

    /// Window scale factor (1-8)
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Render once to this PNG file instead of opening a window; a directory
    /// gets a timestamped file name
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("duoscreen v{}", env!("CARGO_PKG_VERSION"));
    println!("==================");
    println!();

    let mut config = match &cli.config {
        Some(path) => {
            let config = ErrorScreenConfig::load_or_default(path);
            println!("Configuration loaded from '{}'", path.display());
            config
        }
        None => ErrorScreenConfig::default(),
    };
    if let Some(layout) = cli.layout {
        config.layout.layout = layout;
    }
    if let Some(gap) = cli.gap {
        config.layout.screen_gap = gap;
    }

    let message = DiagnosticMessage::new(cli.summary, cli.remediation);
    let screen = ErrorScreen::with_config(message, &config);
    let mut layout = config.layout.layout_data();

    match cli.screenshot {
        Some(path) => {
            let mut capture = FrameCapture::new();
            screen.render(&mut layout, &mut capture);
            let frame = capture
                .take_frame()
                .ok_or_else(|| anyhow!("No frame was presented"))?;

            let path = if path.is_dir() {
                save_screenshot(&frame, &path)
                    .with_context(|| format!("Failed to save screenshot in {}", path.display()))?
            } else {
                save_png(&path, &frame)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            };
            println!(
                "Saved {}x{} error screen to '{}'",
                frame.width(),
                frame.height(),
                path.display()
            );
        }
        None => {
            println!("Press Escape or close the window to exit.");
            println!();

            let window_config = WindowConfig::new().with_scale(cli.scale);
            run_error_display(screen, layout, window_config)
                .map_err(|e| anyhow!("Display error: {}", e))?;

            println!("Error screen closed.");
        }
    }

    Ok(())
}

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for duoscreen")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, test, render)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only doc tests
        #[arg(long)]
        doc: bool,
        /// Run only the unit tests of one module
        #[arg(long, value_enum)]
        module: Option<TestModule>,
    },
    /// Run benchmarks
    Bench {
        /// Only run benchmarks whose name contains this
        filter: Option<String>,
    },
    /// Render the error screen to a PNG file
    Render {
        /// Output PNG file, or a directory for a timestamped file name
        #[arg(default_value = "error_screen.png")]
        output: String,
        /// Screen layout passed to the renderer
        #[arg(long)]
        layout: Option<String>,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
}

/// Library modules whose unit tests can be run on their own
#[derive(Clone, Copy, ValueEnum)]
enum TestModule {
    Text,
    Display,
    ErrorScreen,
}

impl TestModule {
    /// Test name filter selecting the module's tests
    fn filter(self) -> &'static str {
        match self {
            TestModule::Text => "text::",
            TestModule::Display => "display::",
            TestModule::ErrorScreen => "error_screen::",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test { doc, module } => run_test(doc, module),
        Commands::Bench { filter } => run_bench(filter.as_deref()),
        Commands::Render {
            output,
            layout,
            release,
        } => run_render(&output, layout.as_deref(), release),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();
    let render_dir = std::env::temp_dir().join("duoscreen-ci");
    std::fs::create_dir_all(&render_dir)?;
    let render_output = render_dir.to_string_lossy().into_owned();

    let steps: [(&str, Box<dyn Fn() -> Result<()>>); 4] = [
        ("Format Check", Box::new(|| run_fmt(true))),
        ("Clippy", Box::new(|| run_clippy(false))),
        ("Test", Box::new(|| run_test(false, None))),
        ("Render", Box::new(move || render(&render_output, None, false))),
    ];

    for (name, step) in &steps {
        print!("{} {} ... ", "→".blue(), name);
        let step_start = Instant::now();

        if let Err(e) = step() {
            println!("{}", "✗".red().bold());
            return Err(e);
        }

        if verbose {
            println!(
                "{} ({:.2}s)",
                "✓".green().bold(),
                step_start.elapsed().as_secs_f64()
            );
        } else {
            println!("{}", "✓".green().bold());
        }
    }

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = cargo("fmt");
    cmd.arg("--all");

    if check {
        cmd.arg("--").arg("--check");
    }

    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = cargo("clippy");
    cmd.arg("--workspace").arg("--all-targets");

    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }

    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = cargo("build");

    if release {
        cmd.arg("--release");
    }

    execute_command(&mut cmd)
}

fn run_test(doc: bool, module: Option<TestModule>) -> Result<()> {
    let mut cmd = cargo("test");

    match (doc, module) {
        (true, _) => {
            cmd.arg("--doc");
        }
        (false, Some(module)) => {
            println!("{} Running {} tests...", "→".blue(), module.filter().bold());
            cmd.arg("--lib").arg(module.filter());
        }
        (false, None) => {
            cmd.arg("--workspace");
        }
    }

    execute_command(&mut cmd)
}

fn run_bench(filter: Option<&str>) -> Result<()> {
    let mut cmd = cargo("bench");

    if let Some(filter) = filter {
        cmd.arg("--").arg(filter);
    }

    execute_command(&mut cmd)
}

fn run_render(output: &str, layout: Option<&str>, release: bool) -> Result<()> {
    println!("{}", "=== Render Error Screen ===".bold().blue());
    println!("{} Output: {}", "→".blue(), output.cyan());
    println!(
        "{} Layout: {}",
        "→".blue(),
        layout.unwrap_or("top-bottom").bold()
    );
    println!(
        "{} Build mode: {}",
        "→".blue(),
        if release {
            "release".green().bold()
        } else {
            "debug".yellow().bold()
        }
    );
    println!();

    let start = Instant::now();
    render(output, layout, release)?;

    println!(
        "\n{} Rendered to {} in {}",
        "✓".green().bold(),
        output.cyan(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

/// Run the duoscreen binary headless, writing a PNG to `output`
fn render(output: &str, layout: Option<&str>, release: bool) -> Result<()> {
    let is_dir = Path::new(output).is_dir();
    if !is_dir && !output.to_lowercase().ends_with(".png") {
        println!("{} File does not have .png extension", "⚠".yellow().bold());
    }

    let mut cmd = cargo("run");
    cmd.arg("--package").arg("duoscreen");

    if release {
        cmd.arg("--release");
    }

    cmd.arg("--").arg("--screenshot").arg(output);

    if let Some(layout) = layout {
        cmd.arg("--layout").arg(layout);
    }

    execute_command(&mut cmd)?;

    if !is_dir && !Path::new(output).exists() {
        bail!("Renderer exited successfully but {} was not written", output);
    }

    Ok(())
}

fn cargo(subcommand: &str) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg(subcommand);
    cmd
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}

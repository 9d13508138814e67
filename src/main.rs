use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use minus::Pager;
use seqdiff::areas::comparison::Comparison;
use seqdiff::artifacts::core::PagerWriter;
use seqdiff::commands::DiffMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seqdiff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Compare two files line by line",
    long_about = "This command compares two files and prints their differences \
    as a context diff (default), a unified diff, an ndiff with intraline hints \
    or a side by side HTML document.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(short = 'c', long, help = "Produce a context format diff (default)")]
    context: bool,
    #[arg(short = 'u', long, help = "Produce a unified format diff")]
    unified: bool,
    #[arg(
        short = 'm',
        long,
        help = "Produce an HTML side by side diff (can use -c and -l in conjunction)"
    )]
    html: bool,
    #[arg(short = 'n', long, help = "Produce an ndiff format diff")]
    ndiff: bool,
    #[arg(
        short = 'l',
        long,
        default_value_t = 3,
        help = "Set number of context lines (default 3)"
    )]
    lines: usize,
    #[arg(long, help = "Never color the output")]
    no_color: bool,
    #[arg(long, help = "Write to stdout even when it is a terminal")]
    no_pager: bool,
    #[arg(index = 1, help = "The original file")]
    fromfile: PathBuf,
    #[arg(index = 2, help = "The changed file")]
    tofile: PathBuf,
}

impl Cli {
    fn mode(&self) -> Result<DiffMode> {
        let selected = [self.unified, self.ndiff, self.html]
            .iter()
            .filter(|&&flag| flag)
            .count();
        if selected > 1 {
            anyhow::bail!("Only one of --unified, --ndiff and --html may be given");
        }
        if self.context && (self.unified || self.ndiff) {
            anyhow::bail!("--context can only be combined with --html");
        }

        Ok(if self.unified {
            DiffMode::Unified
        } else if self.ndiff {
            DiffMode::Ndiff
        } else if self.html {
            DiffMode::Html {
                context: self.context,
            }
        } else {
            DiffMode::Context
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode()?;

    let stdout_is_terminal = std::io::stdout().is_terminal();
    let use_pager = stdout_is_terminal && !cli.no_pager && std::env::var_os("NO_PAGER").is_none();
    colored::control::set_override(stdout_is_terminal && !cli.no_color);

    if use_pager {
        let pager = Pager::new();
        let writer = PagerWriter::new(pager.clone());
        let comparison = Comparison::new(&cli.fromfile, &cli.tofile, Box::new(writer))?;

        comparison.diff(mode, cli.lines)?;
        minus::page_all(pager)?;
    } else {
        let comparison = Comparison::new(&cli.fromfile, &cli.tofile, Box::new(std::io::stdout()))?;

        comparison.diff(mode, cli.lines)?;
    }

    Ok(())
}

//! rtfcraft CLI - build RTF documents from JSON templates

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use rtfcraft::{DocumentTemplate, PaperSize, RenderStats, RtfCraft};

#[derive(Parser)]
#[command(name = "rtfcraft")]
#[command(version)]
#[command(about = "Build RTF documents from JSON templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an RTF document from a template
    Build {
        /// Input template (JSON)
        #[arg(value_name = "TEMPLATE")]
        input: PathBuf,

        /// Output file (template name with .rtf if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Paper size (a4, a5, letter, legal or WxH in cm)
        #[arg(long, env = "RTFCRAFT_PAPER")]
        paper: Option<String>,

        /// Landscape orientation
        #[arg(long)]
        landscape: bool,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document author
        #[arg(long, env = "RTFCRAFT_AUTHOR")]
        author: Option<String>,
    },

    /// Validate a template and show render statistics
    Check {
        /// Input template (JSON)
        #[arg(value_name = "TEMPLATE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            input,
            output,
            paper,
            landscape,
            title,
            author,
        }) => cmd_build(
            &input,
            output.as_deref(),
            paper.as_deref(),
            landscape,
            title,
            author,
        ),
        Some(Commands::Check { input, json }) => cmd_check(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: rtfcraft build <TEMPLATE> [-o FILE]".yellow());
            println!("       rtfcraft --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("rtf")
}

fn cmd_build(
    input: &Path,
    output: Option<&Path>,
    paper: Option<&str>,
    landscape: bool,
    title: Option<String>,
    author: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = RtfCraft::new().with_creation_time();
    if let Some(p) = paper {
        let paper = PaperSize::parse(p).map_err(|e| format!("Invalid paper size: {}", e))?;
        builder = builder.with_paper(paper);
    }
    if landscape {
        builder = builder.with_landscape(true);
    }
    if let Some(title) = title {
        builder = builder.with_title(title);
    }
    if let Some(author) = author {
        builder = builder.with_author(author);
    }

    log::debug!("Building {}", input.display());
    let doc = builder.load(input)?;
    let output = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output(input));
    let stats = doc.save(&output)?;

    println!("{} {}", "Saved to".green(), output.display());
    print_stats(&stats);
    Ok(())
}

fn cmd_check(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = DocumentTemplate::from_path(input)?.build()?;
    let mut out = String::new();
    let stats = doc.render_with_stats(&mut out)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{} {}", "Template OK:".green().bold(), input.display());
        print_stats(&stats);
    }
    Ok(())
}

fn print_stats(stats: &RenderStats) {
    println!();
    println!("{}", "Render Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Elements".bold(), stats.element_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Cells".bold(), stats.cell_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Notes".bold(), stats.note_count);
    println!("{}: {}", "Paragraph breaks".bold(), stats.separator_count);
    println!("{}: {}", "Bytes".bold(), stats.bytes);
}

fn cmd_version() {
    println!("{} {}", "rtfcraft".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("RTF document builder");
    println!();
    println!("Library: rtfcraft {}", env!("CARGO_PKG_VERSION"));
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("docs/report.json")),
            PathBuf::from("docs/report.rtf")
        );
    }

    #[test]
    fn test_build_and_check() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.json");
        std::fs::write(
            &input,
            r#"{"sections": [{"blocks": [{"type": "text", "text": "CLI"}]}]}"#,
        )
        .unwrap();

        cmd_build(&input, None, Some("letter"), true, Some("T".into()), None).unwrap();
        let rtf = std::fs::read_to_string(dir.path().join("doc.rtf")).unwrap();
        assert!(rtf.contains("{\\title T}"));
        assert!(rtf.contains("\\landscape"));

        cmd_check(&input, true).unwrap();
        assert!(cmd_build(&input, None, Some("b7"), false, None, None).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["rtfcraft", "check", "t.json", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check { json: true, .. })));
    }
}

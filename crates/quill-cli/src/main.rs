use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use quill_markdown::{
    extract_frontmatter, generate_toc, generate_toc_markdown, markdown_stats,
    markdown_to_plain_text, validate_markdown, validation_summary, Severity, ValidationOptions,
};

#[derive(Parser)]
#[command(version, about = "Quill - Markdown analysis tools for blog posts", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Word counts, structural tallies, and reading time
    Stats {
        /// Markdown file, or `-` for stdin
        file: PathBuf,

        /// Emit JSON instead of a text summary
        #[arg(long)]
        json: bool,
    },
    /// Lint a post for structural and policy problems
    Lint {
        /// Markdown file, or `-` for stdin
        file: PathBuf,

        /// Emit JSON instead of per-line findings
        #[arg(long)]
        json: bool,

        /// Allow raw HTML tags
        #[arg(long)]
        allow_html: bool,

        /// Require a leading frontmatter block
        #[arg(long)]
        require_frontmatter: bool,

        /// Words to flag (repeatable)
        #[arg(long = "blocked-word")]
        blocked_words: Vec<String>,

        /// Maximum content length in characters
        #[arg(long, default_value_t = 50_000)]
        max_length: usize,

        /// Maximum number of lines
        #[arg(long, default_value_t = 1000)]
        max_lines: usize,
    },
    /// Print the table of contents for a post
    Toc {
        /// Markdown file, or `-` for stdin
        file: PathBuf,

        /// Emit the TOC tree as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Strip markdown to plain text
    Plain {
        /// Markdown file, or `-` for stdin
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    init_miette();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { file, json } => {
            let content = read_input(&file)?;
            let stats = markdown_stats(&content);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
            } else {
                println!("words:         {}", stats.words);
                println!("characters:    {}", stats.characters);
                println!("paragraphs:    {}", stats.paragraphs);
                println!("headings:      {}", stats.headings);
                println!("links:         {}", stats.links);
                println!("images:        {}", stats.images);
                println!("code blocks:   {}", stats.code_blocks);
                println!("list items:    {}", stats.lists);
                println!("reading time:  {} min", stats.reading_time);
            }
        }
        Commands::Lint {
            file,
            json,
            allow_html,
            require_frontmatter,
            blocked_words,
            max_length,
            max_lines,
        } => {
            let content = read_input(&file)?;
            let options = ValidationOptions {
                allow_html,
                require_frontmatter,
                blocked_words,
                max_length,
                max_lines,
                ..Default::default()
            };
            let findings = validate_markdown(&content, &options);
            let summary = validation_summary(&findings);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&findings).into_diagnostic()?
                );
            } else {
                for finding in &findings {
                    let label = match finding.severity {
                        Severity::Error => "error",
                        Severity::Warning => "warning",
                        Severity::Info => "info",
                    };
                    println!(
                        "{}:{}: {label}[{}]: {}",
                        finding.line, finding.column, finding.code, finding.message
                    );
                }
                println!(
                    "{} error(s), {} warning(s), {} info",
                    summary.error_count, summary.warning_count, summary.info_count
                );
            }

            if summary.has_errors {
                std::process::exit(1);
            }
        }
        Commands::Toc { file, json } => {
            let content = extract_frontmatter(&read_input(&file)?).content;
            if json {
                let toc = generate_toc(&content);
                println!("{}", serde_json::to_string_pretty(&toc).into_diagnostic()?);
            } else {
                print!("{}", generate_toc_markdown(&content));
            }
        }
        Commands::Plain { file } => {
            let content = read_input(&file)?;
            println!("{}", markdown_to_plain_text(&content));
        }
    }

    Ok(())
}

fn read_input(file: &PathBuf) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .into_diagnostic()?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(file)
            .into_diagnostic()
            .wrap_err_with(|| format!("reading {}", file.display()))
    }
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}

//! sb2md CLI - Scrapbox export to Markdown converter

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use sb2md::{
    parse_file_with_options, ConvertedExport, HeaderStyle, LinkResolver,
    MarkdownRenderer, PageSelection, ParseOptions, PassthroughResolver, RenderOptions,
    ResolverOptions, TitleLine,
};

#[derive(Parser)]
#[command(name = "sb2md")]
#[command(version)]
#[command(about = "Convert a Scrapbox project export to Markdown files", long_about = None)]
struct Cli {
    /// Input export file (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output directory
    #[arg(value_name = "OUTPUT", default_value = "markdown")]
    output: PathBuf,

    /// Metadata header placed before each page
    #[arg(long, value_enum, default_value = "plain")]
    header: HeaderMode,

    /// What to do with the first line of each page (the title)
    #[arg(long, value_enum, default_value = "blank")]
    title_line: TitleMode,

    /// UTC offset of rendered timestamps, in hours
    #[arg(long, default_value = "9", allow_hyphen_values = true, env = "SB2MD_UTC_OFFSET")]
    utc_offset: i32,

    /// Do not probe image links over the network
    #[arg(long)]
    offline: bool,

    /// Timeout for each link probe in seconds (0 = no timeout)
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Skip malformed pages instead of failing
    #[arg(long)]
    lenient: bool,

    /// Render pages one at a time
    #[arg(long)]
    sequential: bool,

    /// Only convert the page with this title (repeatable)
    #[arg(long = "page", value_name = "TITLE")]
    pages: Vec<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum HeaderMode {
    /// Creation and update timestamps as labelled lines
    Plain,
    /// YAML frontmatter
    Frontmatter,
    /// No header
    None,
}

impl From<HeaderMode> for HeaderStyle {
    fn from(mode: HeaderMode) -> Self {
        match mode {
            HeaderMode::Plain => HeaderStyle::Plain,
            HeaderMode::Frontmatter => HeaderStyle::Frontmatter,
            HeaderMode::None => HeaderStyle::None,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TitleMode {
    /// Replace with an empty line
    Blank,
    /// Emit as a level 1 heading
    Heading,
    /// Drop it
    Skip,
}

impl From<TitleMode> for TitleLine {
    fn from(mode: TitleMode) -> Self {
        match mode {
            TitleMode::Blank => TitleLine::Blank,
            TitleMode::Heading => TitleLine::Heading,
            TitleMode::Skip => TitleLine::Skip,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = cmd_convert(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut parse_options =
        ParseOptions::new().with_pages(PageSelection::from_titles(cli.pages.clone()));
    if cli.lenient {
        parse_options = parse_options.lenient();
    }
    let export = parse_file_with_options(&cli.input, parse_options)?;
    log::debug!(
        "Loaded {} pages from {}",
        export.page_count(),
        cli.input.display()
    );

    let render_options = RenderOptions::new()
        .with_header(cli.header.into())
        .with_title_line(cli.title_line.into())
        .with_utc_offset_hours(cli.utc_offset)
        .with_parallel(!cli.sequential);

    let resolver = build_resolver(cli)?;
    let renderer = MarkdownRenderer::new(render_options, resolver);

    let pb = ProgressBar::new(export.page_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let converted = renderer.render_with_progress(&export, |page| {
        pb.set_message(page.title.clone());
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    let written = converted.write_to_dir(&cli.output)?;

    print_summary(&cli.output, written.len(), &converted);
    Ok(())
}

fn build_resolver(cli: &Cli) -> sb2md::Result<Arc<dyn LinkResolver>> {
    if cli.offline {
        log::debug!("Offline mode, short links are left unresolved");
        return Ok(Arc::new(PassthroughResolver));
    }
    let timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));
    let options = ResolverOptions::new().with_timeout(timeout);
    sb2md::resolve::http_resolver(&options)
}

fn print_summary(output: &Path, written: usize, converted: &ConvertedExport) {
    let stats = &converted.stats;
    let bytes: usize = converted.pages.iter().map(|p| p.content_len()).sum();
    println!(
        "\n{} {} pages written to {}",
        "Done!".green().bold(),
        written,
        output.display()
    );
    println!("  {} lines: {}", "├─".dimmed(), stats.line_count);
    println!("  {} headings: {}", "├─".dimmed(), stats.heading_count);
    println!("  {} list items: {}", "├─".dimmed(), stats.list_item_count);
    println!("  {} code blocks: {}", "├─".dimmed(), stats.code_block_count);
    println!("  {} tables: {}", "├─".dimmed(), stats.table_count);
    println!("  {} bytes: {}", "└─".dimmed(), bytes);
}

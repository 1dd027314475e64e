//! relayout CLI - replay recorded page text through the reconstruction engine

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use relayout::model::input::{load_ocr_pages, load_vector_pages};
use relayout::policy::POINTS_PER_INCH;
use relayout::render::{self, ExtractionStats};
use relayout::{
    Document, JsonFormat, OcrLine, PageSelection, QualityPreset, ReconstructOptions,
    Reconstructor, RecordedPage, RenderOptions, TextFragment,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "relayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Reconstruct document structure from recorded PDF text or OCR output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write Markdown, text and JSON renderings to a directory
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Render as Markdown
    #[command(alias = "md")]
    Markdown {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Omit scan-warning notes
        #[arg(long)]
        no_warnings: bool,
    },

    /// Render as plain text
    Text {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render the node sequence as JSON
    Json {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show conversion summary and node statistics
    Info {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show version information
    Version,
}

/// Input file and reconstruction options shared by all commands.
#[derive(Args)]
struct InputArgs {
    /// Recorded page input (JSON array of pages)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Input holds OCR line boxes instead of vector text fragments
    #[arg(long)]
    ocr: bool,

    /// Disable table detection
    #[arg(long)]
    no_tables: bool,

    /// Maximum number of pages to process
    #[arg(long, default_value = "200", env = "RELAYOUT_MAX_PAGES")]
    max_pages: u32,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// OCR render quality the input was produced at (draft, standard, high or DPI)
    #[arg(long, default_value = "standard")]
    quality: String,

    /// Abort on the first malformed page
    #[arg(long)]
    strict: bool,
}

impl InputArgs {
    fn options(&self) -> CliResult<ReconstructOptions> {
        let pages = match &self.pages {
            Some(p) => PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?,
            None => PageSelection::All,
        };

        let mut options = ReconstructOptions::new()
            .with_tables(!self.no_tables)
            .with_max_pages(self.max_pages)
            .with_pages(pages)
            .with_quality(QualityPreset::parse(&self.quality)?);
        if self.strict {
            options = options.strict();
        }
        Ok(options)
    }

    fn load(&self) -> CliResult<Pages> {
        if self.ocr {
            Ok(Pages::Ocr(load_ocr_pages(&self.file)?))
        } else {
            Ok(Pages::Vector(load_vector_pages(&self.file)?))
        }
    }
}

enum Pages {
    Vector(Vec<RecordedPage<TextFragment>>),
    Ocr(Vec<RecordedPage<OcrLine>>),
}

impl Pages {
    fn len(&self) -> usize {
        match self {
            Pages::Vector(pages) => pages.len(),
            Pages::Ocr(pages) => pages.len(),
        }
    }

    fn run(&self, reconstructor: &Reconstructor) -> relayout::Result<Document> {
        match self {
            Pages::Vector(pages) => reconstructor.vector_records(pages),
            Pages::Ocr(pages) => reconstructor.ocr_records(pages),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { input, output } => cmd_convert(&input, output.as_deref()),
        Commands::Markdown {
            input,
            output,
            max_heading,
            no_warnings,
        } => cmd_markdown(&input, output.as_deref(), max_heading, no_warnings),
        Commands::Text { input, output } => cmd_text(&input, output.as_deref()),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Run reconstruction on a worker thread while the main thread drives the progress bar.
fn reconstruct(input: &InputArgs) -> CliResult<Document> {
    let options = input.options()?;
    let pages = input.load()?;
    log::debug!("Loaded {} page(s) from {}", pages.len(), input.file.display());

    let (tx, rx) = crossbeam_channel::unbounded();
    let reconstructor = Reconstructor::new(options)?.with_progress(tx);

    let pb = ProgressBar::new(reconstructor.planned_pages(pages.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let pages = &pages;
    let result = std::thread::scope(|s| {
        // The reconstructor owns the sender; moving it in closes the channel when the run ends
        let handle = s.spawn(move || pages.run(&reconstructor));
        for progress in rx.iter() {
            pb.set_position(progress.completed as u64);
            pb.set_message(format!("page {}", progress.page_number));
        }
        handle.join()
    });
    pb.finish_and_clear();

    let doc = result.map_err(|_| "reconstruction thread panicked")??;
    if !doc.summary.malformed_pages.is_empty() {
        eprintln!(
            "{} skipped malformed page(s): {:?}",
            "Warning:".yellow().bold(),
            doc.summary.malformed_pages
        );
    }
    if doc.needs_ocr() {
        eprintln!(
            "{} little extractable text, consider running the pages through OCR",
            "Note:".yellow().bold()
        );
    }
    Ok(doc)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(input: &InputArgs, output: Option<&Path>) -> CliResult<()> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    let doc = reconstruct(input)?;
    let render_options = RenderOptions::new();
    fs::create_dir_all(&output_dir)?;

    fs::write(
        output_dir.join("extract.md"),
        render::to_markdown(&doc, &render_options)?,
    )?;
    fs::write(
        output_dir.join("extract.txt"),
        render::to_text(&doc, &render_options)?,
    )?;
    fs::write(
        output_dir.join("content.json"),
        render::to_json(&doc, JsonFormat::Pretty)?,
    )?;

    println!("{}", "Output files:".green().bold());
    println!("  {} extract.md", "├─".dimmed());
    println!("  {} extract.txt", "├─".dimmed());
    println!("  {} content.json", "└─".dimmed());

    Ok(())
}

fn cmd_markdown(
    input: &InputArgs,
    output: Option<&Path>,
    max_heading: u8,
    no_warnings: bool,
) -> CliResult<()> {
    let doc = reconstruct(input)?;
    let render_options = RenderOptions::new()
        .with_max_heading(max_heading)
        .with_scan_warnings(!no_warnings);

    let markdown = render::to_markdown(&doc, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(input: &InputArgs, output: Option<&Path>) -> CliResult<()> {
    let doc = reconstruct(input)?;
    let text = render::to_text(&doc, &RenderOptions::new())?;
    write_or_print(output, &text)
}

fn cmd_json(input: &InputArgs, output: Option<&Path>, compact: bool) -> CliResult<()> {
    let doc = reconstruct(input)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &InputArgs) -> CliResult<()> {
    let doc = reconstruct(input)?;
    let summary = &doc.summary;

    println!("{}", "Conversion Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.file.display());
    println!(
        "{}: {}",
        "Source".bold(),
        if input.ocr { "OCR line boxes" } else { "vector text" }
    );
    if let Some(dpi) = summary.ocr_dpi {
        println!(
            "{}: {} DPI (scale {:.2})",
            "Render quality".bold(),
            dpi,
            dpi as f32 / POINTS_PER_INCH
        );
    }
    println!("{}: {}", "Pages in input".bold(), summary.pages_total);
    println!("{}: {}", "Pages processed".bold(), summary.pages_processed);
    println!(
        "{}: {}",
        "Low-density pages".bold(),
        format_pages(&summary.low_density_pages)
    );
    println!(
        "{}: {}",
        "Malformed pages".bold(),
        format_pages(&summary.malformed_pages)
    );
    println!(
        "{}: {}",
        "OCR recommended".bold(),
        if summary.needs_ocr { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = ExtractionStats::from_nodes(&doc.nodes);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Scan warnings".bold(), stats.scan_warning_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn format_pages(pages: &[u32]) -> String {
    if pages.is_empty() {
        return "none".to_string();
    }
    pages
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_version() {
    println!("{} {}", "relayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document structure reconstruction tool");
    println!();
    println!("License: MIT");
}

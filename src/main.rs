//! # jagung
//!
//! Live section search for corn information pages.
//!
//! ## Usage
//!
//! Launch the interactive search view:
//! ```sh
//! jagung jagung.md
//! ```
//!
//! Search from a script:
//! ```sh
//! jagung jagung.md --search hibrida -o json
//! ```
//!
//! Estimate a harvest:
//! ```sh
//! jagung predict --soil baik --variety hibrida --month 6 --area 2
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Command, DarkModeAction, OutputFormat, PredictArgs};
use color_eyre::Result;
use crossterm::style::{Color, Stylize, style};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{IsTerminal, stdout};
use std::process;
use unicode_width::UnicodeWidthStr;

use jagung::parser::{self, HEADER_CLASS};
use jagung::prediction::format::{format_decimal, format_percent};
use jagung::prediction::{
    self, ARIMA_METRICS, ModelMetrics, Prediction, PredictionInput, ProjectionPoint,
    REGRESSION_METRICS,
};
use jagung::search::{MatchMode, SearchFilter, Segment, SectionView, section_view, section_views};
use jagung::{Config, Document};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let interactive = args.command.is_none()
        && !args.list
        && args.search.is_none()
        && stdout().is_terminal();
    init_logging(interactive);

    match args.command {
        Some(Command::Predict(ref predict_args)) => return handle_predict(predict_args),
        Some(Command::DarkMode { action }) => return handle_dark_mode(action),
        None => {}
    }

    let Some(ref file) = args.file else {
        eprintln!("Error: markdown file argument is required");
        eprintln!("\nUsage: jagung [OPTIONS] <FILE>");
        eprintln!("       jagung [OPTIONS] -");
        eprintln!("       jagung predict [OPTIONS]");
        process::exit(1);
    };

    let mut config = Config::load();
    if let Some(level) = args.level {
        config.search.section_level = usize::from(level);
    }
    if let Some(mode) = args.match_mode {
        config.search.match_mode = mode;
    }

    let mut doc = match parser::parse_file(file, &config.page_options()) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let filter = SearchFilter::attach(&doc, config.filter_options());

    if args.list {
        print_section_list(&doc, filter.as_ref(), args.output);
        return Ok(());
    }

    if let Some(ref query) = args.search {
        let Some(mut filter) = filter else {
            eprintln!("No content sections in {}", file.display());
            return Ok(());
        };
        filter.set_query(&mut doc, query);
        print_search(&doc, &filter, args.output);
        return Ok(());
    }

    if !interactive {
        // Not a terminal: print the whole page instead of opening the TUI
        print_page(&doc, filter.as_ref(), &config, args.output);
        return Ok(());
    }

    let filename = if file.as_os_str() == "-" {
        "stdin".to_string()
    } else {
        file.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("page")
            .to_string()
    };

    let app = jagung::App::new(doc, filename, config);
    let mut terminal = ratatui::init();
    let result = jagung::tui::run(&mut terminal, app);
    ratatui::restore();

    result
}

/// Logs go to stderr, or to a file in the temp dir while the TUI owns the
/// terminal. `JAGUNG_LOG` sets the filter (default: warn).
fn init_logging(to_file: bool) {
    let env = env_logger::Env::default().filter_or("JAGUNG_LOG", "warn");
    let mut builder = env_logger::Builder::from_env(env);

    if to_file {
        let path = std::env::temp_dir().join("jagung.log");
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(log_file) => {
                builder.target(env_logger::Target::Pipe(Box::new(log_file)));
            }
            Err(_) => {
                builder.target(env_logger::Target::Pipe(Box::new(std::io::sink())));
            }
        }
    }

    builder.init();
}

#[derive(Serialize)]
struct SectionEntry {
    id: Option<String>,
    title: String,
}

fn print_section_list(doc: &Document, filter: Option<&SearchFilter>, format: OutputFormat) {
    let entries: Vec<SectionEntry> = filter
        .map(|filter| section_views(doc, filter))
        .unwrap_or_default()
        .into_iter()
        .map(|view| SectionEntry {
            id: view.id,
            title: view.title,
        })
        .collect();

    match format {
        OutputFormat::Plain => {
            let width = entries
                .iter()
                .map(|e| e.id.as_deref().unwrap_or("").width())
                .max()
                .unwrap_or(0);
            for entry in &entries {
                let id = entry.id.as_deref().unwrap_or("");
                let padding = " ".repeat(width - id.width());
                println!("#{}{}  {}", id, padding, entry.title);
            }
        }
        OutputFormat::Json => print_json(&entries),
    }
}

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    match_mode: MatchMode,
    visible: usize,
    hidden: usize,
    markers: usize,
    sections: Vec<SectionView>,
}

fn print_search(doc: &Document, filter: &SearchFilter, format: OutputFormat) {
    let views = section_views(doc, filter);

    match format {
        OutputFormat::Plain => {
            let visible: Vec<_> = views.iter().filter(|v| v.visible).collect();
            if visible.is_empty() {
                eprintln!("No sections match \"{}\"", filter.query());
                return;
            }
            for (i, view) in visible.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_section(view);
            }
        }
        OutputFormat::Json => {
            let visible = views.iter().filter(|v| v.visible).count();
            let report = SearchReport {
                query: filter.query(),
                match_mode: filter.options().match_mode,
                visible,
                hidden: views.len() - visible,
                markers: views.iter().map(SectionView::marker_count).sum(),
                sections: views,
            };
            print_json(&report);
        }
    }
}

fn print_page(doc: &Document, filter: Option<&SearchFilter>, config: &Config, format: OutputFormat) {
    let marker_class = config.search.marker_class.as_str();
    let header = doc
        .first_with_class(HEADER_CLASS)
        .map(|header| section_view(doc, header, marker_class))
        .filter(|view| !view.lines.is_empty());
    let sections = filter
        .map(|filter| section_views(doc, filter))
        .unwrap_or_default();

    match format {
        OutputFormat::Plain => {
            let mut first = true;
            for view in header.iter().chain(sections.iter()) {
                if !first {
                    println!();
                }
                first = false;
                print_section(view);
            }
        }
        OutputFormat::Json => {
            let views: Vec<&SectionView> = header.iter().chain(sections.iter()).collect();
            print_json(&views);
        }
    }
}

/// First line as an underlined title, the rest as body text.
fn print_section(view: &SectionView) {
    let mut lines = view.lines.iter();

    if let Some(title) = lines.next() {
        let plain: String = title.iter().map(Segment::text).collect();
        println!("{}", render_line(title, true));
        println!("{}", "─".repeat(plain.width()));
    }

    for line in lines {
        println!("{}", render_line(line, false));
    }
}

/// Matches are styled on a terminal and wrapped in `**` otherwise.
fn render_line(segments: &[Segment], title: bool) -> String {
    let styled = stdout().is_terminal();

    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) if styled && title => style(text).bold().to_string(),
            Segment::Plain(text) => text.clone(),
            Segment::Highlighted(text) if styled => style(text)
                .with(Color::Black)
                .on(Color::Yellow)
                .bold()
                .to_string(),
            Segment::Highlighted(text) => format!("**{}**", text),
        })
        .collect()
}

#[derive(Serialize)]
struct PredictionReport<'a> {
    #[serde(flatten)]
    prediction: &'a Prediction,
    month_label: &'static str,
    projection: Vec<ProjectionPoint>,
    metrics: ReportMetrics,
}

#[derive(Serialize)]
struct ReportMetrics {
    arima: ModelMetrics,
    regression: ModelMetrics,
}

fn handle_predict(args: &PredictArgs) -> Result<()> {
    let input = match PredictionInput::new(args.soil, args.variety, args.month, args.area) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = prediction::predict(input);
    let projection = prediction::monthly_projection(&result);

    match args.output {
        OutputFormat::Plain => print_prediction(&result, &projection),
        OutputFormat::Json => print_json(&PredictionReport {
            prediction: &result,
            month_label: result.input.month.label(),
            projection,
            metrics: ReportMetrics {
                arima: ARIMA_METRICS,
                regression: REGRESSION_METRICS,
            },
        }),
    }

    Ok(())
}

fn print_prediction(result: &Prediction, projection: &[ProjectionPoint]) {
    let input = &result.input;
    println!(
        "Prediksi hasil panen: tanah {}, varietas {}, panen {}, {} ha",
        input.soil,
        input.variety,
        input.month.label(),
        format_decimal(input.area, 2)
    );
    println!();
    println!(
        "  ARIMA    {} ton/ha  (kepercayaan {}-{}%)",
        format_decimal(result.arima, 2),
        result.arima_confidence.low,
        result.arima_confidence.high
    );
    println!(
        "  Regresi  {} ton/ha  (kepercayaan {}-{}%)",
        format_decimal(result.regression, 2),
        result.regression_confidence.low,
        result.regression_confidence.high
    );
    println!(
        "  Selisih  {} ton/ha  ({})",
        format_decimal(result.difference, 2),
        format_percent(result.relative_gain)
    );
    println!("  Model terbaik: {}", result.best_model);
    println!(
        "  Total panen: {} ton",
        format_decimal(result.total_harvest, 2)
    );
    println!();
    println!("Proyeksi bulanan (ton/ha)");
    println!("  Bulan  ARIMA  Regresi");
    for point in projection {
        println!(
            "  {:<5}  {:>5}  {:>7}",
            point.month,
            format_decimal(point.arima, 2),
            format_decimal(point.regression, 2)
        );
    }
    println!();
    println!(
        "MAPE: ARIMA {}, Regresi {}  R²: ARIMA {}, Regresi {}",
        format_percent(ARIMA_METRICS.mape),
        format_percent(REGRESSION_METRICS.mape),
        format_percent(ARIMA_METRICS.r_squared),
        format_percent(REGRESSION_METRICS.r_squared)
    );
}

fn handle_dark_mode(action: Option<DarkModeAction>) -> Result<()> {
    let mut config = Config::load();

    let enabled = match action {
        None => {
            println!("dark mode: {}", on_off(config.ui.dark_mode));
            return Ok(());
        }
        Some(DarkModeAction::On) => true,
        Some(DarkModeAction::Off) => false,
        Some(DarkModeAction::Toggle) => !config.ui.dark_mode,
    };

    if let Err(e) = config.set_dark_mode(enabled) {
        eprintln!("Error saving config: {}", e);
        process::exit(1);
    }
    println!("dark mode: {}", on_off(enabled));
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

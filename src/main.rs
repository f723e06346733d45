// Calendar Row Layout
// Command-line entry point: lays out events from a JSON file and prints the grid

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Duration, Local, NaiveDate};
use std::path::{Path, PathBuf};

use calendar_row_layout::models::event::Event;
use calendar_row_layout::services::layout::{
    header_cells, Accessors, DateContentRow, ProbeMeasurement, RowCell, RowLayout,
};
use calendar_row_layout::services::settings::SettingsService;

const CELL_WIDTH: usize = 12;
const MAX_DAYS: i64 = 366;

const USAGE: &str = "usage: calendar-row-layout <events.json> --from YYYY-MM-DD [--days N] \
[--config rows.toml] [--height PX --row-height PX [--header-height PX]]";

struct Options {
    events: PathBuf,
    from: NaiveDate,
    days: i64,
    config: Option<PathBuf>,
    height: Option<f32>,
    row_height: Option<f32>,
    header_height: Option<f32>,
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut events = None;
    let mut from = None;
    let mut days = 7;
    let mut config = None;
    let mut height = None;
    let mut row_height = None;
    let mut header_height = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--from" => {
                let raw = value("--from")?;
                from = Some(
                    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                        .with_context(|| format!("Invalid date: {}", raw))?,
                );
            }
            "--days" => days = value("--days")?.parse::<i64>().context("Invalid --days")?,
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--height" => height = Some(value("--height")?.parse::<f32>().context("Invalid --height")?),
            "--row-height" => {
                row_height = Some(value("--row-height")?.parse::<f32>().context("Invalid --row-height")?)
            }
            "--header-height" => {
                header_height = Some(
                    value("--header-height")?
                        .parse::<f32>()
                        .context("Invalid --header-height")?,
                )
            }
            flag if flag.starts_with("--") => bail!("Unknown option {}\n{}", flag, USAGE),
            path => events = Some(PathBuf::from(path)),
        }
    }

    if !(1..=MAX_DAYS).contains(&days) {
        bail!("--days must be between 1 and {}", MAX_DAYS);
    }

    Ok(Options {
        events: events.ok_or_else(|| anyhow!(USAGE))?,
        from: from.ok_or_else(|| anyhow!(USAGE))?,
        days,
        config,
        height,
        row_height,
        header_height,
    })
}

fn build_range(from: NaiveDate, days: i64) -> Result<Vec<NaiveDate>> {
    (0..days)
        .map(|offset| {
            from.checked_add_signed(Duration::days(offset))
                .with_context(|| format!("Date range from {} overflows after {} days", from, offset))
        })
        .collect()
}

fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {:?}", path))?;
    let events: Vec<Event> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse events file: {:?}", path))?;

    for event in &events {
        event
            .validate()
            .map_err(|e| anyhow!("Invalid event '{}': {}", event.title, e))?;
    }

    Ok(events)
}

fn fit(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{:<width$}", clipped, width = width)
}

fn print_layout(layout: &RowLayout<'_, Event>, today: NaiveDate) {
    let header: String = header_cells(&layout.range, today)
        .iter()
        .map(|cell| {
            let marker = if cell.is_today { "*" } else { "" };
            fit(&format!("{}{}", cell.date.format("%a %d"), marker), CELL_WIDTH)
        })
        .collect();
    println!("{}", header.trim_end());

    for level in 0..layout.levels.len() {
        let line: String = layout
            .level_cells(level)
            .iter()
            .map(|cell| match cell {
                RowCell::Gap(style) => " ".repeat(style.span * CELL_WIDTH),
                RowCell::Segment(segment, style) => {
                    let width = style.span * CELL_WIDTH;
                    format!("[{}]", fit(&segment.event.title, width - 2))
                }
            })
            .collect();
        println!("{}", line.trim_end());
    }

    if !layout.overflow.is_empty() {
        let line: String = (1..=layout.columns())
            .map(|column| match layout.overflow.count(column) {
                0 => " ".repeat(CELL_WIDTH),
                count => fit(&format!("+{} more", count), CELL_WIDTH),
            })
            .collect();
        println!("{}", line.trim_end());
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args)?;

    log::info!("Starting calendar row layout for {:?}", options.events);

    let settings_service = match options.config {
        Some(ref path) => SettingsService::new(path.clone()),
        None => SettingsService::with_default_path()?,
    };
    let settings = settings_service.get()?;

    let events = load_events(&options.events)?;
    let range = build_range(options.from, options.days)?;

    let mut row = DateContentRow::new(settings, Accessors::for_events())?;

    let layout = match (options.height, options.row_height) {
        (Some(height), Some(row_height)) => {
            let request = row.probe(&range)?;
            let measurement = ProbeMeasurement {
                event_row_height: row_height,
                header_height: request.with_header.then_some(options.header_height.unwrap_or(0.0)),
                root_height: height,
                container_height: None,
            };
            row.layout_measured(request.ticket, &measurement, None, &events, &range)?
        }
        _ => row.layout(&events, &range)?,
    };

    print_layout(&layout, Local::now().date_naive());
    Ok(())
}

use folio::{
    cli::Cli,
    config::Config,
    extract::find_in_page,
    logging::{self, LogLevel},
    models::{Document, TextPage},
    settings::Settings,
    source::VecPageSource,
    surface::{ReadingSurface, SelectionHost},
};

use clap::Parser;
use eyre::{Result, WrapErr, bail};
use regex::Regex;
use std::fs;

/// Host for a one-shot run: nothing is on screen, so callbacks are logged.
struct CliHost {
    header_height: f32,
    continuous_scroll: bool,
    selecting_search_result: bool,
}

impl CliHost {
    fn new(settings: &Settings) -> Self {
        Self {
            header_height: settings.header_height,
            continuous_scroll: settings.continuous_scroll,
            selecting_search_result: settings.selecting_search_result,
        }
    }
}

impl SelectionHost for CliHost {
    fn update_selected_start(&mut self, x: f32, y: f32, top: f32) {
        log::debug!("start handle at ({x}, {y}), line top {top}");
    }

    fn update_selected_end(&mut self, x: f32, y: f32) {
        log::debug!("end handle at ({x}, {y})");
    }

    fn on_cancel_select(&mut self) {
        log::info!("selection cancelled");
    }

    fn show_image(&mut self, chapter_index: usize, src: &str) {
        log::info!("image {src} in chapter {chapter_index}");
    }

    fn header_height(&self) -> f32 {
        self.header_height
    }

    fn is_continuous_scroll(&self) -> bool {
        self.continuous_scroll
    }

    fn is_selecting_search_result(&self) -> bool {
        self.selecting_search_result
    }

    fn set_selecting_search_result(&mut self, selecting: bool) {
        self.selecting_search_result = selecting;
    }

    fn on_page_changed(&mut self, page: &TextPage) {
        log::info!("now on chapter {} page {}", page.chapter_index, page.index);
    }

    fn notify_error(&mut self, message: &str) {
        log::warn!("{message}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(LogLevel::from_verbosity(cli.verbose, cli.debug));

    let mut settings = match &cli.config {
        Some(path) => Config::load_from(path.clone())?.settings,
        None => match Config::new() {
            Ok(config) => config.settings,
            Err(err) => {
                log::warn!("Could not load configuration: {err}; using default settings");
                Settings::default()
            }
        },
    };
    if cli.scroll {
        settings.continuous_scroll = true;
    }

    let document = load_document(&cli)?;
    let output = run(&cli, document, &settings)?;
    println!("{output}");
    Ok(())
}

fn load_document(cli: &Cli) -> Result<Document> {
    let path = &cli.document;
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Could not read {}", path.display()))?;
    let document: Document = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Could not parse {}", path.display()))?;
    if document.pages.is_empty() {
        bail!("{} holds no pages", path.display());
    }
    log::info!("loaded {} pages from {}", document.pages.len(), path.display());
    Ok(document)
}

fn run(cli: &Cli, document: Document, settings: &Settings) -> Result<String> {
    let host = CliHost::new(settings);
    let mut surface = ReadingSurface::new(VecPageSource::new(document.pages), host, settings);
    if let Some(book) = document.book {
        surface = surface.with_book(book);
    }

    for delta in &cli.scroll_by {
        let outcome = surface.scroll(*delta);
        log::debug!("scroll by {delta}: {outcome:?}, offset {}", surface.window().page_offset());
    }

    if let Some((x, y)) = cli.tap {
        if surface.select_text(x, y).is_none() {
            log::warn!("nothing selectable at ({x}, {y})");
        }
    }
    if let Some((x, y)) = cli.start {
        if !surface.select_start_move(x, y) {
            log::warn!("start handle not moved to ({x}, {y})");
        }
    }
    if let Some((x, y)) = cli.end {
        if !surface.select_end_move(x, y) {
            log::warn!("end handle not moved to ({x}, {y})");
        }
    }
    if let Some(pattern) = &cli.find {
        let regex = Regex::new(pattern).wrap_err("Invalid --find pattern")?;
        match find_in_page(surface.window().current_page(), &regex) {
            Some((start, end)) => {
                log::debug!("match spans {start}..{end}");
                surface.select_search_result(start, end);
            }
            None => log::warn!("no match for `{pattern}` on the current page"),
        }
    }

    if cli.bookmark {
        let Some(bookmark) = surface.create_bookmark() else {
            bail!("Cannot bookmark: the document has no book or the page has no chapter");
        };
        return Ok(serde_json::to_string_pretty(&bookmark)?);
    }
    Ok(surface.selected_text())
}

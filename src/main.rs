//! ddexplorer - Diving Degree-of-Difficulty Explorer
//!
//! Interactive filter over a dive difficulty table, or a one-shot `--print` of a filter.

use anyhow::{Context, Result};
use ddexplorer::cli::{self, CliOptions};
use ddexplorer::config::ExplorerConfig;
use ddexplorer::filter::visible_records;
use ddexplorer::render::{ColorTheme, TerminalUI, UIRenderer, ViewState};
use ddexplorer::{Application, DatasetFactory, Session};
use std::sync::Arc;

/// Column defaults for `--print` ignore the terminal width.
const PRINT_WIDTH: u16 = u16::MAX;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; redirect it while the TUI owns the terminal.
    env_logger::init();

    let matches = cli::command().get_matches();
    let options = CliOptions::from_matches(&matches)?;

    let mut config = ExplorerConfig::load(options.config.as_deref())
        .context("Failed to load configuration")?;
    options.apply_to_config(&mut config);

    let (store, source_name) = DatasetFactory::create(options.file.as_deref())
        .await
        .context("Failed to load dive data")?;
    let filters = options.filter_state(config.debounce());

    if options.print {
        let columns = options.column_visibility(PRINT_WIDTH, config.narrow_width);
        let rows = visible_records(&store, &filters);
        let stdout = std::io::stdout();
        ddexplorer::print::write_table(&mut stdout.lock(), &rows, &columns)?;
        return Ok(());
    }

    let ui_renderer = TerminalUI::with_theme(ColorTheme::from_name(config.theme))?;
    let (width, height) = ui_renderer.get_terminal_size()?;
    let columns = options.column_visibility(width, config.narrow_width);
    let view = ViewState::new(source_name, width, height);
    let session = Session::new(Arc::new(store), filters, columns, view);

    let mut app = Application::new(session, Box::new(ui_renderer), config.tick());
    app.run().await?;

    Ok(())
}

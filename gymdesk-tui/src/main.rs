use gymdesk_tui::dirs::AppDirs;
use gymdesk_tui::settings::{SettingsProvider, SqliteBackend};
use gymdesk_tui::store::GymStore;
use gymdesk_tui::{App, AppError, config::DashboardConfig, logging};
use gymtable::Terminal;

fn run(dirs: &AppDirs) -> Result<(), AppError> {
    let db = dirs.settings_db();
    let settings = SettingsProvider::new(SqliteBackend::open(&db)?);
    log::info!("settings at {}", db.display());

    let config = DashboardConfig::load(&settings)?;
    let store = GymStore::seeded(config.store_latency());
    let app = App::new(&store, settings)?;

    let mut terminal = Terminal::new()?;
    app.run(&mut terminal)
}

fn main() {
    let Some(dirs) = AppDirs::discover() else {
        eprintln!("Error: {}", AppError::NoDataDir);
        return;
    };

    if let Err(e) = logging::init(&dirs.log_dir()) {
        eprintln!("logging disabled: {e}");
    }

    if let Err(e) = run(&dirs) {
        log::error!("{e}");
        eprintln!("Error: {}", e);
    }
}

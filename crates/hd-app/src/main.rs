//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use eframe::egui::{self, CentralPanel, Context};
use egui_dock::{DockArea, DockState, Style};
use anyhow::Result;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use hd_core::events::events::{DataSourceError, ImageTransformed, TableLoaded};
use hd_core::{handler_from_fn, DashboardConfig, DataSource, EventBus};
use hd_data::sample_db::create_sample_database;
use hd_data::{CsvSource, NullConfig, SqliteSource};
use hd_imaging::FileImageSource;
use hd_ui::{Notice, NoticeLevel, ShellAction, Theme};
use hd_views::DashboardViews;

mod dashboard;
mod error;
mod fetch;
mod tabs;

use dashboard::Dashboard;
use fetch::{spawn_fetch, FetchGenerations, FetchOutcome};
use tabs::{DashboardTab, DashboardTabViewer};

/// Patients and samples written by "Generate Sample Database"
const SAMPLE_PATIENTS: usize = 50;
const SAMPLE_SAMPLES_PER_PATIENT: usize = 100;

/// Main application state
struct HealthDashboardApp {
    /// Table, selection and image state
    dashboard: Dashboard,

    /// Render targets fed by the dashboard
    views: DashboardViews,

    /// The three notebook tabs
    dock_state: DockState<DashboardTab>,

    /// Where the next refresh fetches from
    source: Arc<dyn DataSource>,

    /// When the one-shot startup fetch fires
    startup_fetch_at: Option<Instant>,

    /// Tokio runtime
    runtime: tokio::runtime::Runtime,

    fetch_tx: UnboundedSender<FetchOutcome>,
    fetch_rx: UnboundedReceiver<FetchOutcome>,

    /// Only the latest fetch is applied
    fetches: FetchGenerations,

    /// Egui context
    egui_ctx: egui::Context,
}

impl HealthDashboardApp {
    fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig, runtime: tokio::runtime::Runtime) -> Self {
        hd_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let event_bus = Arc::new(EventBus::new());
        subscribe_logging(&event_bus);

        let source: Arc<dyn DataSource> = Arc::new(SqliteSource::new(
            &config.database.path,
            config.database.table.clone(),
        ));
        let startup_fetch_at = Some(Instant::now() + Duration::from_millis(config.startup_delay_ms));
        let (fetch_tx, fetch_rx) = unbounded_channel();

        Self {
            dashboard: Dashboard::new(config, event_bus),
            views: DashboardViews::default(),
            dock_state: DockState::new(DashboardTab::ALL.to_vec()),
            source,
            startup_fetch_at,
            runtime,
            fetch_tx,
            fetch_rx,
            fetches: FetchGenerations::default(),
            egui_ctx: cc.egui_ctx.clone(),
        }
    }

    /// Fetch the table from the current source in the background,
    /// superseding any fetch still running
    fn start_fetch(&mut self) {
        self.dashboard.begin_fetch(self.source.source_name());
        let ctx = self.egui_ctx.clone();
        spawn_fetch(
            self.runtime.handle(),
            self.fetches.next(),
            self.source.clone(),
            self.fetch_tx.clone(),
            move || ctx.request_repaint(),
        );
    }

    /// Apply the latest finished fetch; superseded ones are dropped
    fn drain_fetches(&mut self) {
        while let Ok(outcome) = self.fetch_rx.try_recv() {
            if !self.fetches.is_current(&outcome) {
                debug!("Dropping superseded fetch from {}", outcome.source_name);
                continue;
            }
            self.dashboard
                .apply_table(&outcome.source_name, outcome.result, &mut self.views)
                .ok();
        }
    }

    fn poll_startup_fetch(&mut self, ctx: &Context) {
        let Some(at) = self.startup_fetch_at else {
            return;
        };
        let now = Instant::now();
        if now >= at {
            self.startup_fetch_at = None;
            self.start_fetch();
        } else {
            ctx.request_repaint_after(at - now);
        }
    }

    fn handle_action(&mut self, ctx: &Context, action: ShellAction) {
        match action {
            ShellAction::RefreshDatabase => self.start_fetch(),
            ShellAction::OpenImage => self.open_image(),
            ShellAction::OpenDatabase => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("SQLite Database", &["db", "sqlite", "sqlite3"])
                    .pick_file()
                {
                    let table = self.dashboard.config().database.table.clone();
                    self.source = Arc::new(SqliteSource::new(path, table));
                    self.start_fetch();
                }
            }
            ShellAction::OpenCsv => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV Files", &["csv"])
                    .pick_file()
                {
                    let nulls = NullConfig::with_markers(&self.dashboard.config().null_markers);
                    self.source = Arc::new(CsvSource::new(path).with_null_config(nulls));
                    self.start_fetch();
                }
            }
            ShellAction::GenerateSampleDatabase => self.generate_sample_database(),
            ShellAction::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn open_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
            .pick_file()
        else {
            return;
        };

        if self.dashboard.open_image(&FileImageSource, &path, &mut self.views).is_ok() {
            if let Some(location) = self.dock_state.find_tab(&DashboardTab::ImageProcessing) {
                self.dock_state.set_active_tab(location);
            }
        }
    }

    fn generate_sample_database(&mut self) {
        let path: PathBuf = self.dashboard.config().database.path.clone();
        match create_sample_database(&path, SAMPLE_PATIENTS, SAMPLE_SAMPLES_PER_PATIENT) {
            Ok(rows) => {
                self.dashboard.notices_mut().push(Notice::new(
                    NoticeLevel::Info,
                    "Sample Database",
                    format!("Wrote {} rows to {}", rows, path.display()),
                ));
                let table = self.dashboard.config().database.table.clone();
                self.source = Arc::new(SqliteSource::new(&path, table));
                self.start_fetch();
            }
            Err(e) => {
                error!("Failed to create sample database: {}", e);
                self.dashboard
                    .notices_mut()
                    .push(Notice::new(NoticeLevel::Error, "Sample Database", e.to_string()));
            }
        }
    }
}

/// Log the dashboard's notable events
fn subscribe_logging(event_bus: &EventBus) {
    event_bus.subscribe::<TableLoaded>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<TableLoaded>() {
            info!(
                "{}: {} rows, {} patients, {} variables",
                e.source_name, e.row_count, e.patient_count, e.variable_count
            );
        }
    }));
    event_bus.subscribe::<DataSourceError>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<DataSourceError>() {
            error!("{}: {}", e.source_name, e.error);
        }
    }));
    event_bus.subscribe::<ImageTransformed>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<ImageTransformed>() {
            info!("Image is now {}", e.kind);
        }
    }));
}

impl eframe::App for HealthDashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_fetches();
        self.poll_startup_fetch(ctx);

        let menu_action = hd_ui::menu_bar(ctx);
        hd_ui::status_bar(ctx, self.dashboard.status());
        let sidebar_action = hd_ui::command_sidebar(ctx);

        for action in [menu_action, sidebar_action].into_iter().flatten() {
            self.handle_action(ctx, action);
        }

        CentralPanel::default().show(ctx, |ui| {
            hd_ui::show_notices(ui, self.dashboard.notices_mut());

            DockArea::new(&mut self.dock_state)
                .style(Style::from_egui(ui.style().as_ref()))
                .show_close_buttons(false)
                .draggable_tabs(false)
                .show_inside(ui, &mut DashboardTabViewer {
                    dashboard: &mut self.dashboard,
                    views: &mut self.views,
                });
        });

        // keep notices expiring while nothing else repaints
        if !self.dashboard.notices_mut().is_empty() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = DashboardConfig::from_env()?;
    info!("Starting health dashboard with database {:?}", config.database.path);

    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 850.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Integrated Health Analytics Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Integrated Health Analytics Dashboard",
        options,
        Box::new(move |cc| Box::new(HealthDashboardApp::new(cc, config, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

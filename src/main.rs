use shipment_atlas::adapters::outbound::console::StderrProgressReporter;
use shipment_atlas::adapters::outbound::filesystem::{JsonPositionsFile, JsonSnapshotReader};
use shipment_atlas::adapters::outbound::network::{BackendClient, CachingPositionRepository};
use shipment_atlas::application::dto::{DashboardRequest, LoadSummary, OutputFormat};
use shipment_atlas::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use shipment_atlas::application::read_models::{DashboardReportBuilder, TableState};
use shipment_atlas::application::session::DashboardSession;
use shipment_atlas::application::use_cases::{stop_signal, BuildDashboardUseCase, VesselTracker};
use shipment_atlas::cli::Args;
use shipment_atlas::config::{self, Settings};
use shipment_atlas::ports::outbound::{
    ProgressReporter, ShipmentRepository, VesselPositionRepository,
};
use shipment_atlas::shared::error::{AtlasError, ExitCode};
use shipment_atlas::shared::Result;
use shipment_atlas::shipment_tracking::domain::FilterSelection;
use chrono::Utc;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Invalid arguments exit with code 2 from inside clap
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        let code = match e.downcast_ref::<AtlasError>() {
            Some(AtlasError::Validation { .. }) => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        };
        process::exit(code.as_i32());
    }
}

type Reporter = Arc<StderrProgressReporter>;

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => {
            let discovered = config::discover_config(&std::env::current_dir()?)?;
            if discovered.is_some() {
                eprintln!("📄 Auto-discovered config file: {}", config::CONFIG_FILENAME);
            }
            discovered
        }
    };
    let settings = Settings::merge(&args, config.as_ref());

    let reporter: Reporter = Arc::new(StderrProgressReporter::new());
    let (shipments, positions) = create_repositories(&args, &settings)?;

    if args.watching() && positions.is_none() {
        return Err(AtlasError::Validation {
            message: "--watch and --vessel need vessel positions: pass --positions or --backend-url"
                .to_string(),
        }
        .into());
    }

    let selection = build_selection(&args, &settings);
    let include_vessels = positions.is_some();
    let use_case = BuildDashboardUseCase::new(shipments, positions.clone(), reporter.clone());
    let response = use_case
        .execute(DashboardRequest::new(selection, include_vessels, Utc::now()))
        .await?;

    let mut session = response.session;
    session.set_table_state(build_table_state(&args, reporter.as_ref()));

    render(
        &session,
        &response.load_summary,
        settings.format,
        args.output.clone(),
    )?;

    let Some(positions) = positions.filter(|_| args.watching()) else {
        return Ok(());
    };

    let (tracker, interval) = match &args.vessel {
        Some(name) => (
            VesselTracker::new(
                positions,
                reporter.clone(),
                response.vessel_groups,
                settings.vessel_detail_poll_interval,
            )
            .focus(name),
            settings.vessel_detail_poll_interval,
        ),
        None => (
            VesselTracker::new(
                positions,
                reporter.clone(),
                response.vessel_groups,
                settings.dashboard_poll_interval,
            ),
            settings.dashboard_poll_interval,
        ),
    };

    if tracker.tracked_vessels() == 0 {
        reporter.report_error("⚠️  Warning: No vessels with open bookings to watch");
        return Ok(());
    }

    reporter.report(&format!(
        "🛰️  Watching {} vessel(s) every {}s, press Ctrl-C to stop",
        tracker.tracked_vessels(),
        interval.as_secs()
    ));

    let mut updates = tracker.subscribe();
    let poller = tracker.run(stop_signal(tokio::signal::ctrl_c(), reporter.as_ref()));
    tokio::pin!(poller);

    loop {
        tokio::select! {
            _ = &mut poller => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if let Some(refreshed_at) = snapshot.refreshed_at {
                    session.set_now(refreshed_at);
                }
                session.set_vessels(snapshot.vessels);
                render(&session, &response.load_summary, settings.format, args.output.clone())?;
            }
        }
    }

    reporter.report_completion("✅ Stopped watching vessels");
    Ok(())
}

type Repositories = (
    Arc<dyn ShipmentRepository>,
    Option<Arc<dyn VesselPositionRepository>>,
);

/// Picks the shipment and position sources from the arguments. A snapshot
/// file wins over a backend URL coming from the config file.
fn create_repositories(args: &Args, settings: &Settings) -> Result<Repositories> {
    let (shipments, backend): (Arc<dyn ShipmentRepository>, Option<Arc<BackendClient>>) =
        match (&args.input, &settings.backend_url) {
            (Some(path), _) => (
                Arc::new(JsonSnapshotReader::new(path.clone())) as Arc<dyn ShipmentRepository>,
                None,
            ),
            (None, Some(url)) => {
                let client = Arc::new(BackendClient::new(url, settings.api_key())?);
                (client.clone() as Arc<dyn ShipmentRepository>, Some(client))
            }
            (None, None) => {
                return Err(AtlasError::Validation {
                    message: "no shipment source: pass --input <FILE> or --backend-url <URL>"
                        .to_string(),
                }
                .into())
            }
        };

    let positions: Option<Arc<dyn VesselPositionRepository>> = match (&args.positions, backend) {
        (Some(path), _) => {
            let file: Arc<dyn VesselPositionRepository> =
                Arc::new(JsonPositionsFile::new(path.clone()));
            Some(file)
        }
        (None, Some(client)) => {
            let cached: Arc<dyn VesselPositionRepository> = Arc::new(
                CachingPositionRepository::new(client, settings.vessel_detail_poll_interval / 2),
            );
            Some(cached)
        }
        (None, None) => None,
    };

    Ok((shipments, positions))
}

fn build_selection(args: &Args, settings: &Settings) -> FilterSelection {
    FilterSelection {
        season: settings.season.clone(),
        clients: settings.clients.clone(),
        executive: settings.executive.clone(),
        status: args.status,
        carrier: args.carrier.clone(),
        species: args.species.clone(),
        etd_from: args.etd_from,
        etd_to: args.etd_to,
        month_ingress: args.month_ingress,
        month_etd: args.month_etd,
        month_eta: args.month_eta,
        week_ingress: args.week_ingress,
        week_etd: args.week_etd,
        week_eta: args.week_eta,
        year: args.year,
    }
}

fn build_table_state(args: &Args, reporter: &StderrProgressReporter) -> TableState {
    let mut state = TableState::default();
    if let Some(sort) = args.sort {
        state.sort = Some(sort);
    }
    for column in &args.hidden_columns {
        if !state.set_visible(*column, false) {
            reporter.report_error(&format!(
                "⚠️  Warning: Column '{}' is always shown and cannot be hidden",
                column.id()
            ));
        }
    }
    state
}

fn render(
    session: &DashboardSession,
    load_summary: &LoadSummary,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    eprintln!("{}", FormatterFactory::progress_message(format));

    let report = DashboardReportBuilder::build(session, load_summary);
    let formatted_output = FormatterFactory::create(format).format(&report)?;

    PresenterFactory::create(PresenterType::from_output(output)).present(&formatted_output)
}

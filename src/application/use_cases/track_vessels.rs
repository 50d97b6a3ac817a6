use crate::ports::outbound::{ProgressReporter, VesselPositionRepository};
use crate::shared::Result;
use crate::shipment_tracking::domain::ActiveVessel;
use crate::shipment_tracking::services::{VesselAssembler, VesselGroup};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Refresh interval of the dashboard map.
pub const DASHBOARD_POLL_INTERVAL: Duration = Duration::from_secs(60);
/// Refresh interval of an open vessel-detail view.
pub const VESSEL_DETAIL_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Joins vessel groups with their last known positions and track history
///
/// Positions and history are fetched concurrently. A failed history read is
/// reported as a warning and leaves the tracks empty; a failed position read
/// fails the whole refresh.
///
/// # Errors
/// Returns an error if the position lookup fails
pub async fn load_active_vessels<VR, PR>(
    repository: &VR,
    progress_reporter: &PR,
    groups: Vec<VesselGroup>,
    now: DateTime<Utc>,
) -> Result<Vec<ActiveVessel>>
where
    VR: VesselPositionRepository + ?Sized,
    PR: ProgressReporter + ?Sized,
{
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<String> = groups.iter().map(|g| g.vessel_name.clone()).collect();
    let (positions, history) = futures::join!(
        repository.fetch_positions(&names),
        repository.fetch_track_history(&names)
    );

    let positions = positions?;
    let history = history.unwrap_or_else(|e| {
        progress_reporter.report_error(&format!(
            "⚠️  Warning: Failed to load vessel track history: {}",
            e
        ));
        Vec::new()
    });

    Ok(VesselAssembler::join(groups, &positions, &history, now))
}

/// Latest applied vessel refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VesselSnapshot {
    /// Generation of the refresh that produced this snapshot; 0 before the
    /// first one lands
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub vessels: Vec<ActiveVessel>,
}

/// Applies `vessels` unless a refresh at least as new has already landed.
///
/// # Returns
/// Whether the snapshot was replaced
pub fn apply_refresh(
    latest: &watch::Sender<VesselSnapshot>,
    generation: u64,
    vessels: Vec<ActiveVessel>,
    refreshed_at: DateTime<Utc>,
) -> bool {
    latest.send_if_modified(|current| {
        if generation <= current.generation {
            return false;
        }
        *current = VesselSnapshot {
            generation,
            refreshed_at: Some(refreshed_at),
            vessels,
        };
        true
    })
}

/// VesselTracker - polls vessel positions on a fixed interval
///
/// Each refresh is stamped with a generation from a monotonically increasing
/// counter. Starting a refresh aborts the one still in flight, and a result
/// is only published when its generation is newer than the last published
/// one, so a slow response can never overwrite a newer snapshot.
///
/// # Type Parameters
/// * `VR` - VesselPositionRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct VesselTracker<VR: ?Sized, PR: ?Sized> {
    repository: Arc<VR>,
    progress_reporter: Arc<PR>,
    groups: Vec<VesselGroup>,
    interval: Duration,
    issued: AtomicU64,
    latest: Arc<watch::Sender<VesselSnapshot>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl<VR, PR> VesselTracker<VR, PR>
where
    VR: VesselPositionRepository + ?Sized + 'static,
    PR: ProgressReporter + ?Sized + 'static,
{
    pub fn new(
        repository: Arc<VR>,
        progress_reporter: Arc<PR>,
        groups: Vec<VesselGroup>,
        interval: Duration,
    ) -> Self {
        let (latest, _) = watch::channel(VesselSnapshot::default());
        Self {
            repository,
            progress_reporter,
            groups,
            interval,
            issued: AtomicU64::new(0),
            latest: Arc::new(latest),
            in_flight: Mutex::new(None),
        }
    }

    /// Restricts tracking to one vessel (case-insensitive name match), as the
    /// vessel-detail view does.
    pub fn focus(mut self, vessel_name: &str) -> Self {
        let wanted = vessel_name.trim().to_uppercase();
        self.groups
            .retain(|g| g.vessel_name.trim().to_uppercase() == wanted);
        self
    }

    pub fn tracked_vessels(&self) -> usize {
        self.groups.len()
    }

    pub fn subscribe(&self) -> watch::Receiver<VesselSnapshot> {
        self.latest.subscribe()
    }

    pub fn snapshot(&self) -> VesselSnapshot {
        self.latest.borrow().clone()
    }

    /// Starts a refresh and returns its generation.
    ///
    /// Must be called from within a tokio runtime.
    pub fn refresh(&self) -> u64 {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let repository = Arc::clone(&self.repository);
        let reporter = Arc::clone(&self.progress_reporter);
        let latest = Arc::clone(&self.latest);
        let groups = self.groups.clone();

        let handle = tokio::spawn(async move {
            let now = Utc::now();
            match load_active_vessels(repository.as_ref(), reporter.as_ref(), groups, now).await {
                Ok(vessels) => {
                    apply_refresh(&latest, generation, vessels, now);
                }
                Err(e) => reporter.report_error(&format!(
                    "⚠️  Warning: Vessel refresh #{} failed: {}",
                    generation, e
                )),
            }
        });

        let previous = self.lock_in_flight().replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        generation
    }

    /// Refreshes immediately and then on every interval tick until
    /// `shutdown` resolves. The in-flight refresh is aborted on shutdown.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.refresh();
                }
            }
        }

        if let Some(handle) = self.lock_in_flight().take() {
            handle.abort();
        }
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Resolves when `signal` fires. If the listener cannot be installed the
/// error is reported and this never resolves, so watching goes on until the
/// process is stopped some other way.
pub async fn stop_signal<F, PR>(signal: F, reporter: &PR)
where
    F: Future<Output = std::io::Result<()>>,
    PR: ProgressReporter + ?Sized,
{
    if let Err(e) = signal.await {
        reporter.report_error(&format!(
            "⚠️  Warning: Could not listen for Ctrl-C: {}",
            e
        ));
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipment_tracking::domain::{VesselPosition, VesselTrackPoint};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Answers call N after `delays[N]` milliseconds, reporting latitude N.
    struct ScriptedPositions {
        delays: Vec<u64>,
        calls: AtomicUsize,
        fail_history: bool,
    }

    impl ScriptedPositions {
        fn new(delays: Vec<u64>) -> Self {
            Self {
                delays,
                calls: AtomicUsize::new(0),
                fail_history: false,
            }
        }
    }

    #[async_trait]
    impl VesselPositionRepository for ScriptedPositions {
        async fn fetch_positions(&self, vessel_names: &[String]) -> Result<Vec<VesselPosition>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self.delays.get(call).copied().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(vessel_names
                .iter()
                .map(|name| VesselPosition {
                    vessel_name: name.clone(),
                    last_lat: Some(call as f64),
                    last_lon: Some(-72.0),
                    ..VesselPosition::default()
                })
                .collect())
        }

        async fn fetch_track_history(
            &self,
            _vessel_names: &[String],
        ) -> Result<Vec<VesselTrackPoint>> {
            if self.fail_history {
                anyhow::bail!("history table unavailable");
            }
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct CollectingReporter {
        errors: Mutex<Vec<String>>,
    }

    impl ProgressReporter for CollectingReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
        fn report_completion(&self, _message: &str) {}
    }

    fn group(name: &str) -> VesselGroup {
        VesselGroup {
            vessel_name: name.to_string(),
            earliest_etd: None,
            earliest_eta: None,
            destinations: vec!["ROTTERDAM".to_string()],
            bookings: vec!["BK1".to_string()],
            containers: Vec::new(),
        }
    }

    fn vessel(name: &str) -> ActiveVessel {
        ActiveVessel {
            vessel_name: name.to_string(),
            last_lat: None,
            last_lon: None,
            last_position_at: None,
            last_api_call_at: None,
            etd: None,
            eta: None,
            destination: None,
            bookings: Vec::new(),
            containers: Vec::new(),
            track: Vec::new(),
        }
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let (latest, _rx) = watch::channel(VesselSnapshot::default());
        let now = Utc::now();

        assert!(apply_refresh(&latest, 2, vec![vessel("NEW")], now));
        assert!(!apply_refresh(&latest, 1, vec![vessel("OLD")], now));
        assert!(!apply_refresh(&latest, 2, vec![vessel("DUPLICATE")], now));

        let snapshot = latest.borrow().clone();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.vessels[0].vessel_name, "NEW");
    }

    #[tokio::test]
    async fn test_newer_refresh_supersedes_slow_one() {
        let repository = Arc::new(ScriptedPositions::new(vec![300, 10]));
        let reporter = Arc::new(CollectingReporter::default());
        let tracker = VesselTracker::new(
            repository,
            reporter,
            vec![group("MSC ANNA")],
            DASHBOARD_POLL_INTERVAL,
        );
        let mut updates = tracker.subscribe();

        assert_eq!(tracker.refresh(), 1);
        // Let the first refresh start its slow lookup before superseding it
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(tracker.refresh(), 2);

        updates.changed().await.unwrap();
        let snapshot = updates.borrow().clone();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.vessels[0].last_lat, Some(1.0));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(tracker.snapshot().generation, 2);
    }

    #[tokio::test]
    async fn test_focus_keeps_single_vessel() {
        let tracker = VesselTracker::new(
            Arc::new(ScriptedPositions::new(Vec::new())),
            Arc::new(CollectingReporter::default()),
            vec![group("MSC ANNA"), group("MAERSK KOLKATA")],
            VESSEL_DETAIL_POLL_INTERVAL,
        )
        .focus("msc anna");
        assert_eq!(tracker.tracked_vessels(), 1);

        let mut updates = tracker.subscribe();
        tracker.refresh();
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow().vessels[0].vessel_name, "MSC ANNA");
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let tracker = VesselTracker::new(
            Arc::new(ScriptedPositions::new(Vec::new())),
            Arc::new(CollectingReporter::default()),
            vec![group("MSC ANNA")],
            Duration::from_millis(20),
        );
        let mut updates = tracker.subscribe();

        tracker
            .run(async {
                updates.changed().await.unwrap();
            })
            .await;

        assert!(tracker.snapshot().generation >= 1);
    }

    #[tokio::test]
    async fn test_history_failure_is_a_warning() {
        let mut repository = ScriptedPositions::new(Vec::new());
        repository.fail_history = true;
        let reporter = CollectingReporter::default();

        let groups = vec![group("MSC ANNA")];
        let vessels = load_active_vessels(&repository, &reporter, groups, Utc::now())
            .await
            .unwrap();

        assert_eq!(vessels.len(), 1);
        assert_eq!(vessels[0].track.len(), 1);
        let errors = reporter.errors.lock().unwrap();
        assert!(errors[0].contains("history table unavailable"));
    }

    #[tokio::test]
    async fn test_no_groups_skips_lookup() {
        let repository = ScriptedPositions::new(Vec::new());
        let reporter = CollectingReporter::default();
        let vessels = load_active_vessels(&repository, &reporter, Vec::new(), Utc::now())
            .await
            .unwrap();
        assert!(vessels.is_empty());
        assert_eq!(repository.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stop_signal_resolves_when_signal_fires() {
        let reporter = CollectingReporter::default();
        stop_signal(async { Ok(()) }, &reporter).await;
        assert!(reporter.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stop_signal_reports_listener_failure_and_keeps_waiting() {
        let reporter = CollectingReporter::default();
        let failing = async { Err(std::io::Error::other("no signal driver")) };

        let waited =
            tokio::time::timeout(Duration::from_millis(50), stop_signal(failing, &reporter)).await;

        assert!(waited.is_err());
        let errors = reporter.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Could not listen for Ctrl-C: no signal driver"));
    }
}

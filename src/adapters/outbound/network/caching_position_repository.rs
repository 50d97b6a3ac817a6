use crate::ports::outbound::VesselPositionRepository;
use crate::shared::Result;
use crate::shipment_tracking::domain::{VesselPosition, VesselTrackPoint};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Entry kept per vessel name. `None` positions are cached too so a vessel
/// the backend does not know is not asked for again within the TTL.
#[derive(Clone)]
struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

/// Per-vessel TTL cache shared by clones of the decorator.
struct TtlCache<V> {
    entries: Arc<DashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    fn get(&self, name: &str) -> Option<V> {
        self.entries
            .get(name)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    fn insert(&self, name: String, value: V) {
        self.entries.insert(
            name,
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    /// Splits `names` into cached values and the names still to fetch.
    fn partition(&self, names: &[String]) -> (Vec<V>, Vec<String>) {
        let mut hits = Vec::new();
        let mut misses = Vec::new();
        for name in names {
            match self.get(name) {
                Some(value) => hits.push(value),
                None => misses.push(name.clone()),
            }
        }
        (hits, misses)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Caching decorator for VesselPositionRepository
///
/// Wraps any position source and remembers results per vessel name for
/// `ttl`. Only names without a fresh entry are forwarded to the inner
/// repository, so the dashboard poll and the vessel-detail poll can share one
/// decorator without doubling backend traffic. The TTL should stay below the
/// shortest polling interval or polls will keep seeing stale positions.
pub struct CachingPositionRepository<R> {
    inner: R,
    positions: TtlCache<Option<VesselPosition>>,
    history: TtlCache<Vec<VesselTrackPoint>>,
}

impl<R> CachingPositionRepository<R> {
    /// Creates a caching decorator around `inner`
    ///
    /// # Arguments
    /// * `inner` - Position source to delegate cache misses to
    /// * `ttl` - How long a fetched entry stays fresh
    pub fn new(inner: R, ttl: Duration) -> Self {
        Self {
            inner,
            positions: TtlCache::new(ttl),
            history: TtlCache::new(ttl),
        }
    }

    #[cfg(test)]
    fn cache_size(&self) -> (usize, usize) {
        (self.positions.len(), self.history.len())
    }
}

#[async_trait]
impl<R: VesselPositionRepository> VesselPositionRepository for CachingPositionRepository<R> {
    async fn fetch_positions(&self, vessel_names: &[String]) -> Result<Vec<VesselPosition>> {
        let (hits, misses) = self.positions.partition(vessel_names);
        let mut result: Vec<VesselPosition> = hits.into_iter().flatten().collect();
        if misses.is_empty() {
            return Ok(result);
        }

        let fetched = self.inner.fetch_positions(&misses).await?;
        for name in &misses {
            let found = fetched.iter().find(|p| p.vessel_name.trim() == name.trim());
            self.positions.insert(name.clone(), found.cloned());
        }
        result.extend(fetched);
        Ok(result)
    }

    async fn fetch_track_history(
        &self,
        vessel_names: &[String],
    ) -> Result<Vec<VesselTrackPoint>> {
        let (hits, misses) = self.history.partition(vessel_names);
        let mut result: Vec<VesselTrackPoint> = hits.into_iter().flatten().collect();
        if !misses.is_empty() {
            let fetched = self.inner.fetch_track_history(&misses).await?;
            for name in &misses {
                let track: Vec<VesselTrackPoint> = fetched
                    .iter()
                    .filter(|p| p.vessel_name.trim() == name.trim())
                    .cloned()
                    .collect();
                self.history.insert(name.clone(), track);
            }
            result.extend(fetched);
        }
        result.sort_by(|a, b| a.position_at.cmp(&b.position_at));
        Ok(result)
    }
}

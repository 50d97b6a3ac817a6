pub mod aggregation_engine;
pub mod dashboard_stats;
pub mod filter_pipeline;
pub mod kpi_calculator;
pub mod record_normalizer;
pub mod vessel_assembler;

pub use aggregation_engine::{
    AggregationEngine, CountryAggregation, DestinationAggregation, OriginAggregation,
    SeasonSummary, UnlocatedPort,
};
pub use dashboard_stats::{DashboardCounts, DashboardStats};
pub use filter_pipeline::{FilterOptions, FilterPipeline};
pub use kpi_calculator::{KpiCalculator, KpiMetrics};
pub use record_normalizer::{NormalizedBatch, RecordNormalizer};
pub use vessel_assembler::{VesselAssembler, VesselGroup};

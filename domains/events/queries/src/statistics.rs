/// Aggregates over every stored event, evaluated against the current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsQuery;

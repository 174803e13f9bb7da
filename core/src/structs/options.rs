/// Caller configuration for a parse run
#[derive(Debug, Clone)]
pub struct ActivitiesOptions {
    /// Only return activity records with a change tag above this value
    pub sequence: i64,
    /// Dump every known table instead of the curated activity stream
    pub dump_db: bool,
    /// Optional output template. Records are JSON lines when unset
    pub template: Option<String>,
    /// Staging directory override for volume extractions
    pub temp_dir: Option<String>,
    /// Remove staged extractions when the run completes
    pub cleanup: bool,
}

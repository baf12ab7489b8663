//! Debugging feature flags.

pub struct LogFlags {
    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Log the resolved zone order and each zone's final shape
    pub log_resolution: bool,

    /// Per-call record counts from the classifier and reducers
    pub log_classification: bool,

    pub log_transitions: bool,
}

pub const DF: LogFlags = LogFlags {
    log_performance: false,
    log_resolution: true,
    log_classification: true,
    log_transitions: false,
};

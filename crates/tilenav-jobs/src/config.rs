/// Configuration for a [`PathJobs`](crate::PathJobs) runner.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JobsConfig {
    /// Worker threads. Searches on one finder still run one at a time;
    /// extra workers only queue up behind the finder lock.
    pub workers: usize,
    /// Thread name prefix; workers are named `{thread_name}-{n}`.
    pub thread_name: String,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            thread_name: "tilenav-path".to_string(),
        }
    }
}

use derive_builder::Builder;
use std::path::PathBuf;

/// Default number of scan ranges: two per logical CPU.
pub fn default_workers() -> usize {
    num_cpus::get().saturating_mul(2).max(1)
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct EngineConfig {
    /// Input file to aggregate.
    pub input: PathBuf,
    /// Number of byte ranges the input is split into.
    #[builder(default = "default_workers()")]
    pub workers: usize,
    /// Scan thread pool size; `None` uses one thread per logical CPU.
    #[builder(default)]
    pub threads: Option<usize>,
}

impl EngineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.workers == Some(0) {
            return Err("workers must be at least 1".to_string());
        }
        if let Some(Some(0)) = self.threads {
            return Err("threads must be at least 1".to_string());
        }
        Ok(())
    }
}

impl EngineConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            workers: default_workers(),
            threads: None,
        }
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Effective pool size.
    pub fn pool_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

pub mod play;
pub mod saves;
pub mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use cabin_engine::{EngineConfig, IntentCache, Interpreter};
use cabin_llm::OpenAiBackend;
use tracing_subscriber::EnvFilter;

/// Command-line overrides shared by the subcommands.
#[derive(Debug, Default)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub offline: bool,
    pub save_dir: Option<PathBuf>,
}

impl Options {
    /// Defaults, config file, environment, then these flags. Starts logging.
    pub fn load(self) -> Result<EngineConfig, String> {
        let mut config = EngineConfig::load(self.config.as_deref())
            .map_err(|e| format!("cannot load config: {e}"))?;
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(dir) = self.save_dir {
            config = config.with_save_directory(dir);
        }
        if self.offline {
            config = config.offline();
        }
        init_logging(config.debug_mode);
        Ok(config)
    }
}

/// Log to stderr. `RUST_LOG` wins over `debug`.
fn init_logging(debug: bool) {
    let fallback = if debug {
        "warn,cabin=debug,cabin_engine=debug,cabin_llm=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// The interpreter for this configuration, remote-backed when a key is set.
pub fn build_interpreter(config: &EngineConfig) -> Interpreter {
    let interpreter = Interpreter::new(IntentCache::new(config.response_cache_size))
        .with_timeout(config.request_timeout());
    match OpenAiBackend::from_config(config) {
        Some(backend) => {
            tracing::info!(model = backend.model(), "remote interpreter enabled");
            interpreter.with_backend(Arc::new(backend))
        }
        None => interpreter,
    }
}

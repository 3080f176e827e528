use clap::Args;
use std::path::PathBuf;
use lib_dataz::loggers::WorkerGuard;

/// Logging flags shared by every dataz binary.
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    #[clap(long, env = "LOG_DIR", default_value = "logs", help = "Directory for log files.")]
    pub log_dir: PathBuf,

    #[clap(long, env = "LOG_LEVEL", default_value = "info", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: String,
}

impl LogArgs {
    /// Installs the global subscriber for `app_name`. Exits the process when
    /// logging cannot be set up, since nothing would be observable anyway.
    pub fn init(&self, app_name: &str) -> WorkerGuard {
        match lib_dataz::loggers::setup_logging(app_name, &self.log_dir, &self.log_level) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Failed to initialize logging: {}", e);
                std::process::exit(1);
            }
        }
    }
}

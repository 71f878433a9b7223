use std::path::PathBuf;
#[cfg(not(debug_assertions))]
use tracing::error;

/// File name of the organization record inside the data directory.
pub const RECORD_FILE_NAME: &str = "furia_esports.json";

pub struct PortablePathManager;

impl PortablePathManager {
    /// Application root directory.
    ///
    /// Debug builds point at the crate sources so `cargo run` finds `data/`.
    /// Release builds use the directory holding the executable.
    pub fn root_dir() -> PathBuf {
        #[cfg(debug_assertions)]
        {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        }

        #[cfg(not(debug_assertions))]
        match std::env::current_exe() {
            Ok(mut path) => {
                path.pop();
                path
            }
            Err(e) => {
                error!("Failed to get current exe path: {}. Falling back to current_dir.", e);
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
    }

    /// Data directory (`<root>/data`).
    pub fn data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Default location of the organization record.
    pub fn default_record_path() -> PathBuf {
        Self::data_dir().join(RECORD_FILE_NAME)
    }
}

//! Configuration constants for doxdepends
//!
//! Defaults for the command line surface, the names doxdepends expects in
//! Doxygen's XML output, and progress display settings.

use std::time::Duration;

/// Progress spinner configuration
pub mod progress {
    use super::*;

    /// Duration between spinner updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames shown while XML files are read
    pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
}

/// Output configuration
pub mod output {
    /// Graph file written when `--output-file` is not given
    pub const DEFAULT_OUTPUT_FILE: &str = "doxdepends.dot";

    /// Cycle report format when not specified
    pub const DEFAULT_FORMAT: &str = "human";
}

/// Doxygen XML layout
pub mod input {
    /// Entry point of every Doxygen XML tree
    pub const INDEX_FILE: &str = "index.xml";

    /// Extension of per-compound detail documents
    pub const DETAIL_EXTENSION: &str = "xml";
}

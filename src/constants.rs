pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Looked up inside the image directory unless `--colors` says otherwise.
pub const DEFAULT_COLORS_FILE: &str = "colors.txt";

pub const DEFAULT_PROGRAM: &str = "python3";
pub const DEFAULT_PROGRAM_ARGS: &[&str] = &["tricolor.py"];

pub const COLOR_FLAG: &str = "--color";
pub const PLOT_FLAG: &str = "--plot";

/// Relative to the home directory.
pub const USER_CONFIG_PATH: &str = ".config/tricolor-driver/config.toml";

//! Media Catalog Navigation Library
//!
//! This library holds the navigation core of a personal media catalog
//! (movies, actresses and actors, photobooks, soft-content entries, groups)
//! together with a client for the catalog's REST API and the command-line
//! front-end built on both.
//!
//! # Modules
//!
//! - `catalog` - REST client for the catalog API and client-side list filtering
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `navigation` - View state, URL codec, back trail and controller
//! - `types` - Entity payloads exchanged with the API
//! - `utils` - Name and alias text helpers
//!
//! # Example
//!
//! ```
//! use mediadex::navigation::{ContentState, MemoryHistory, NavItem, NavigationController};
//!
//! let mut nav = NavigationController::new(MemoryHistory::new("/movies"), NavItem::builtin());
//! nav.drill_down(ContentState::movie(mediadex::navigation::EntityRef::from_key("ABC-123")));
//! assert_eq!(nav.browser().current_url(), "/movie/ABC-123");
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod navigation;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it can
/// cross await points inside the tokio runtime.
///
/// # Example
///
/// ```
/// use mediadex::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading {} movies", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Deleted movie {}", id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command-line layer uses this macro. Library code returns errors
/// instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Ignoring unrecognized URL {}", href);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed debug message when `MEDIADEX_DEBUG` is enabled.
///
/// # Example
///
/// ```
/// debug!("navigate {:?} -> {:?}", from, to);
/// ```
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if $crate::config::debug_enabled() {
      use colored::Colorize;
      eprintln!("[{}] {}", "·".dimmed(), std::format_args!($($arg)*));
    }
  })
}

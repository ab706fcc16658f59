use tabled::Table;

use crate::{
    config, error, info,
    navigation::{Location, decode_location, encode},
    success,
    types::FieldTableRow,
    warning,
};

use super::common::mode_name;

/// Decodes a catalog URL and prints the state it stands for.
///
/// Accepts path-relative URLs (`/movie/ABC-123`) as well as absolute ones
/// pointing at the web UI.
pub fn route(url: String) {
    let location = location_of(&url);
    let Some(state) = decode_location(&location) else {
        error!("{} is not a catalog URL.", location.href());
    };

    let rows = vec![
        FieldTableRow {
            field: "mode".to_string(),
            value: mode_name(state.mode()),
        },
        FieldTableRow {
            field: "identifier".to_string(),
            value: state.view().identifier().unwrap_or_default(),
        },
        FieldTableRow {
            field: "filter".to_string(),
            value: state
                .view()
                .filter()
                .map(|f| format!("{}={}", f.filter_type, f.filter_value))
                .unwrap_or_default(),
        },
        FieldTableRow {
            field: "canonical".to_string(),
            value: encode(&state),
        },
    ];
    println!("{}", Table::new(rows));
}

/// Opens the web UI page for a catalog URL in the default browser.
pub fn open(url: String) {
    let location = location_of(&url);
    let path = match decode_location(&location) {
        Some(state) => encode(&state),
        None => {
            warning!("{} is not a catalog URL, opening movies.", location.href());
            "/movies".to_string()
        }
    };

    let target = format!("{}{}", config::web_url(), path);
    info!("Opening {}", target);
    if webbrowser::open(&target).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            target
        );
        return;
    }
    success!("Opened {}", path);
}

/// Strips scheme and host so only the path and query are decoded.
pub fn location_of(url: &str) -> Location {
    let url = url.trim();
    let relative = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            match rest.find(['/', '?']) {
                Some(path_start) => &rest[path_start..],
                None => "/",
            }
        }
        None => url,
    };
    let location = Location::parse(relative);
    if location.pathname.is_empty() {
        return Location::new("/", location.search);
    }
    location
}

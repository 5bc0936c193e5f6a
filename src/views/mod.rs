//! Server-rendered HTML views.
//!
//! Each page is a plain function from typed context to an HTML string; the
//! handlers pick the function, the function owns the markup. All dynamic text
//! passes through [`esc`] at the point it is interpolated, so callers hand in
//! raw model data and never pre-escape.

pub mod console;
pub mod game;
pub mod game_instance;
pub mod genre;

/// Record counts for the dashboard. A `None` count means that query failed
/// and the page shows an inline error indicator in its place.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexCounts {
    pub games: Option<u64>,
    pub game_instances: Option<u64>,
    pub game_instances_available: Option<u64>,
    pub consoles: Option<u64>,
    pub genres: Option<u64>,
}

/// Escape text for safe interpolation into HTML body or attribute position.
#[must_use]
pub fn esc(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared document shell with the sidebar nav.
#[must_use]
pub fn layout(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{}</title><style>{STYLE}</style></head>\
         <body><div class=\"container\"><nav class=\"sidebar\">{NAV}</nav>\
         <main>{content}</main></div></body></html>",
        esc(title),
    )
}

const NAV: &str = "<ul>\
    <li><a href=\"/catalog\">Home</a></li>\
    <li><a href=\"/catalog/games\">All games</a></li>\
    <li><a href=\"/catalog/consoles\">All consoles</a></li>\
    <li><a href=\"/catalog/genres\">All genres</a></li>\
    <li><a href=\"/catalog/gameinstances\">All game instances</a></li>\
    <li><a href=\"/catalog/game/create\">Create new game</a></li>\
    <li><a href=\"/catalog/console/create\">Create new console</a></li>\
    <li><a href=\"/catalog/genre/create\">Create new genre</a></li>\
    <li><a href=\"/catalog/gameinstance/create\">Create new game instance</a></li>\
    </ul>";

const STYLE: &str = "body{font-family:sans-serif;margin:0}\
    .container{display:flex;gap:2rem}\
    .sidebar{min-width:12rem;padding:1rem;background:#f4f4f4}\
    .sidebar ul{list-style:none;padding:0}\
    main{padding:1rem;flex:1}\
    .form-errors{color:#b00;padding-left:1.2rem}\
    .count-error{color:#b00;font-style:italic}\
    .status-available{color:#070}\
    .status-soldout{color:#b00}\
    label{display:inline-block;min-width:9rem}";

/// Dashboard page with the five record counts.
#[must_use]
pub fn index(counts: &IndexCounts) -> String {
    let body = format!(
        "<h1>Game Catalog Home</h1>\
         <p>Welcome to the game catalog, an inventory of consoles, games, and \
         the copies we have in stock.</p>\
         <p>The catalog has the following record counts:</p>\
         <ul>{}{}{}{}{}</ul>",
        count_item("Games", counts.games),
        count_item("Game instances", counts.game_instances),
        count_item("Available instances", counts.game_instances_available),
        count_item("Consoles", counts.consoles),
        count_item("Genres", counts.genres),
    );
    layout("Game Catalog Home", &body)
}

fn count_item(label: &str, count: Option<u64>) -> String {
    match count {
        Some(n) => format!("<li><strong>{label}:</strong> {n}</li>"),
        None => format!(
            "<li><strong>{label}:</strong> <span class=\"count-error\">unavailable</span></li>"
        ),
    }
}

/// 404 page; `message` names what could not be found.
#[must_use]
pub fn not_found(message: &str) -> String {
    let body = format!("<h1>Not Found</h1><p>{}</p>", esc(message));
    layout("Not Found", &body)
}

/// Generic 500 page. Deliberately says nothing about the underlying failure.
#[must_use]
pub fn internal_error() -> String {
    let body = "<h1>Something went wrong</h1>\
                <p>An unexpected error occurred while handling the request.</p>";
    layout("Error", body)
}

// Shared fragments used by the entity views.

pub(crate) fn errors_block(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|msg| format!("<li>{}</li>", esc(msg)))
        .collect();
    format!("<ul class=\"form-errors\">{items}</ul>")
}

pub(crate) fn text_input(label: &str, name: &str, value: &str) -> String {
    input(label, name, "text", value)
}

pub(crate) fn date_input(label: &str, name: &str, value: &str) -> String {
    input(label, name, "date", value)
}

fn input(label: &str, name: &str, kind: &str, value: &str) -> String {
    format!(
        "<p><label for=\"{name}\">{label}</label>\
         <input id=\"{name}\" type=\"{kind}\" name=\"{name}\" value=\"{}\"></p>",
        esc(value),
    )
}

pub(crate) fn detail_row(label: &str, value: &str) -> String {
    format!("<dt>{label}</dt><dd>{}</dd>", esc(value))
}

pub(crate) fn actions(detail_url: &str) -> String {
    format!(
        "<p class=\"actions\"><a href=\"{detail_url}/update\">Update</a> \
         <a href=\"{detail_url}/delete\">Delete</a></p>"
    )
}

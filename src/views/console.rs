//! Console pages.

use crate::entities::{console, game};
use crate::forms::ConsoleForm;

use super::{actions, detail_row, errors_block, esc, layout, text_input};

#[must_use]
pub fn list(consoles: &[console::Model]) -> String {
    let content = if consoles.is_empty() {
        "<p>There are no consoles.</p>".to_string()
    } else {
        let rows: String = consoles
            .iter()
            .map(|c| {
                let manufacturer = c
                    .manufacturer
                    .as_deref()
                    .map(|m| format!(" ({})", esc(m)))
                    .unwrap_or_default();
                format!(
                    "<li><a href=\"{}\">{}</a>{manufacturer}</li>",
                    c.detail_url(),
                    esc(&c.name),
                )
            })
            .collect();
        format!("<ul class=\"item-list\">{rows}</ul>")
    };
    layout("Console List", &format!("<h1>Console List</h1>{content}"))
}

#[must_use]
pub fn detail(console: &console::Model, games: &[game::Model]) -> String {
    let mut rows = String::new();
    if let Some(manufacturer) = &console.manufacturer {
        rows.push_str(&detail_row("Manufacturer", manufacturer));
    }
    if let Some(year) = console.release_year {
        rows.push_str(&detail_row("Release year", &year.to_string()));
    }
    if let Some(year) = console.discontinued {
        rows.push_str(&detail_row("Discontinued", &year.to_string()));
    }
    if let Some(units) = &console.units_sold {
        rows.push_str(&detail_row("Units sold", units));
    }

    let games_section = if games.is_empty() {
        "<p>This console has no games.</p>".to_string()
    } else {
        let items: String = games
            .iter()
            .map(|g| {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    g.detail_url(),
                    esc(&g.title),
                )
            })
            .collect();
        format!("<ul class=\"item-list\">{items}</ul>")
    };

    let body = format!(
        "<h1>Console: {}</h1><dl>{rows}</dl><h2>Games</h2>{games_section}{}",
        esc(&console.name),
        actions(&console.detail_url()),
    );
    layout(&console.name, &body)
}

/// Create and update share one form; `page_title` tells them apart.
#[must_use]
pub fn form(page_title: &str, form: &ConsoleForm, errors: &[String]) -> String {
    let body = format!(
        "<h1>{}</h1>{}<form method=\"post\" action=\"\">{}{}{}{}{}\
         <button type=\"submit\">Submit</button></form>",
        esc(page_title),
        errors_block(errors),
        text_input("Name", "name", &form.name),
        text_input("Manufacturer", "manufacturer", &form.manufacturer),
        text_input("Release year", "release_year", &form.release_year),
        text_input("Discontinued year", "discontinued", &form.discontinued),
        text_input("Units sold", "units_sold", &form.units_sold),
    );
    layout(page_title, &body)
}

#[must_use]
pub fn confirm_delete(console: &console::Model, games: &[game::Model]) -> String {
    let body = if games.is_empty() {
        format!(
            "<h1>Delete Console: {}</h1>\
             <p>Do you really want to delete this console?</p>\
             <form method=\"post\" action=\"\"><button type=\"submit\">Delete</button></form>",
            esc(&console.name),
        )
    } else {
        let items: String = games
            .iter()
            .map(|g| {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    g.detail_url(),
                    esc(&g.title),
                )
            })
            .collect();
        format!(
            "<h1>Delete Console: {}</h1>\
             <p>This console has the following games. Delete these games before \
             attempting to delete the console.</p>\
             <ul class=\"item-list\">{items}</ul>",
            esc(&console.name),
        )
    };
    layout("Delete Console", &body)
}

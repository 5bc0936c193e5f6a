//! Game pages.

use crate::entities::{InstanceStatus, console, game, game_instance, genre};
use crate::forms::GameForm;

use super::{actions, date_input, detail_row, errors_block, esc, layout, text_input};

#[must_use]
pub fn list(games: &[(game::Model, Option<console::Model>)]) -> String {
    let content = if games.is_empty() {
        "<p>There are no games.</p>".to_string()
    } else {
        let rows: String = games
            .iter()
            .map(|(g, c)| {
                let console = c
                    .as_ref()
                    .map(|c| format!(" ({})", esc(&c.name)))
                    .unwrap_or_default();
                format!(
                    "<li><a href=\"{}\">{}</a>{console}</li>",
                    g.detail_url(),
                    esc(&g.title),
                )
            })
            .collect();
        format!("<ul class=\"item-list\">{rows}</ul>")
    };
    layout("Game List", &format!("<h1>Game List</h1>{content}"))
}

#[must_use]
pub fn detail(
    game: &game::Model,
    console: Option<&console::Model>,
    genres: &[genre::Model],
    instances: &[game_instance::Model],
) -> String {
    let mut rows = String::new();
    if let Some(console) = console {
        rows.push_str(&format!(
            "<dt>Console</dt><dd><a href=\"{}\">{}</a></dd>",
            console.detail_url(),
            esc(&console.name),
        ));
    }
    if !genres.is_empty() {
        let links: Vec<String> = genres
            .iter()
            .map(|g| format!("<a href=\"{}\">{}</a>", g.detail_url(), esc(&g.name)))
            .collect();
        rows.push_str(&format!("<dt>Genre</dt><dd>{}</dd>", links.join(", ")));
    }
    if let Some(developer) = &game.developer {
        rows.push_str(&detail_row("Developer", developer));
    }
    if let Some(publisher) = &game.publisher {
        rows.push_str(&detail_row("Publisher", publisher));
    }
    if let Some(date) = game.release_date_formatted() {
        rows.push_str(&detail_row("Release date", &date));
    }
    if let Some(cost) = &game.cost {
        rows.push_str(&detail_row("Cost", cost));
    }

    let copies = if instances.is_empty() {
        "<p>There are no copies of this game in the catalog.</p>".to_string()
    } else {
        let items: String = instances
            .iter()
            .map(|i| {
                format!(
                    "<li><a href=\"{}\" class=\"{}\">{}</a></li>",
                    i.detail_url(),
                    status_class(&i.status),
                    esc(&i.status),
                )
            })
            .collect();
        format!("<ul class=\"item-list\">{items}</ul>")
    };

    let body = format!(
        "<h1>Title: {}</h1><dl>{rows}</dl><h2>Copies</h2>{copies}{}",
        esc(&game.title),
        actions(&game.detail_url()),
    );
    layout(&game.title, &body)
}

/// Create and update share one form. Reference pickers render from `consoles`
/// and `genres`; the submitted (or pre-filled) form decides which console is
/// selected and which genre boxes are checked.
#[must_use]
pub fn form(
    page_title: &str,
    form: &GameForm,
    consoles: &[console::Model],
    genres: &[genre::Model],
    errors: &[String],
) -> String {
    let console_options: String = consoles
        .iter()
        .map(|c| {
            let selected = if form.console == c.id.to_string() {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{}\"{selected}>{}</option>",
                c.id,
                esc(&c.name),
            )
        })
        .collect();

    let genre_boxes: String = genres
        .iter()
        .map(|g| {
            let checked = if form.has_genre(g.id) { " checked" } else { "" };
            format!(
                "<label class=\"checkbox\">\
                 <input type=\"checkbox\" name=\"genre\" value=\"{}\"{checked}> {}\
                 </label>",
                g.id,
                esc(&g.name),
            )
        })
        .collect();

    let body = format!(
        "<h1>{}</h1>{}<form method=\"post\" action=\"\">\
         {}\
         <p><label for=\"console\">Console</label>\
         <select id=\"console\" name=\"console\">\
         <option value=\"\">--Please select a console--</option>{console_options}\
         </select></p>\
         {}{}{}{}\
         <fieldset><legend>Genre</legend>{genre_boxes}</fieldset>\
         <button type=\"submit\">Submit</button></form>",
        esc(page_title),
        errors_block(errors),
        text_input("Title", "title", &form.title),
        text_input("Developer", "developer", &form.developer),
        text_input("Publisher", "publisher", &form.publisher),
        date_input("Release date", "release_date", &form.release_date),
        text_input("Cost", "cost", &form.cost),
    );
    layout(page_title, &body)
}

#[must_use]
pub fn confirm_delete(game: &game::Model, instances: &[game_instance::Model]) -> String {
    let body = if instances.is_empty() {
        format!(
            "<h1>Delete Game: {}</h1>\
             <p>Do you really want to delete this game?</p>\
             <form method=\"post\" action=\"\"><button type=\"submit\">Delete</button></form>",
            esc(&game.title),
        )
    } else {
        let items: String = instances
            .iter()
            .map(|i| {
                format!(
                    "<li><a href=\"{}\">{}</a> ({})</li>",
                    i.detail_url(),
                    i.id,
                    esc(&i.status),
                )
            })
            .collect();
        format!(
            "<h1>Delete Game: {}</h1>\
             <p>This game has the following copies. Delete these copies before \
             attempting to delete the game.</p>\
             <ul class=\"item-list\">{items}</ul>",
            esc(&game.title),
        )
    };
    layout("Delete Game", &body)
}

fn status_class(status: &str) -> &'static str {
    if status == InstanceStatus::Available.as_str() {
        "status-available"
    } else {
        "status-soldout"
    }
}

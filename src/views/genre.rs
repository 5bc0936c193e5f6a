//! Genre pages.

use crate::entities::{game, genre};
use crate::forms::GenreForm;

use super::{actions, errors_block, esc, layout, text_input};

#[must_use]
pub fn list(genres: &[genre::Model]) -> String {
    let content = if genres.is_empty() {
        "<p>There are no genres.</p>".to_string()
    } else {
        let rows: String = genres
            .iter()
            .map(|g| {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    g.detail_url(),
                    esc(&g.name),
                )
            })
            .collect();
        format!("<ul class=\"item-list\">{rows}</ul>")
    };
    layout("Genre List", &format!("<h1>Genre List</h1>{content}"))
}

#[must_use]
pub fn detail(genre: &genre::Model, games: &[game::Model]) -> String {
    let games_section = if games.is_empty() {
        "<p>This genre has no games.</p>".to_string()
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
        "<h1>Genre: {}</h1><h2>Games</h2>{games_section}{}",
        esc(&genre.name),
        actions(&genre.detail_url()),
    );
    layout(&genre.name, &body)
}

#[must_use]
pub fn form(page_title: &str, form: &GenreForm, errors: &[String]) -> String {
    let body = format!(
        "<h1>{}</h1>{}<form method=\"post\" action=\"\">{}\
         <button type=\"submit\">Submit</button></form>",
        esc(page_title),
        errors_block(errors),
        text_input("Name", "name", &form.name),
    );
    layout(page_title, &body)
}

#[must_use]
pub fn confirm_delete(genre: &genre::Model, games: &[game::Model]) -> String {
    let body = if games.is_empty() {
        format!(
            "<h1>Delete Genre: {}</h1>\
             <p>Do you really want to delete this genre?</p>\
             <form method=\"post\" action=\"\"><button type=\"submit\">Delete</button></form>",
            esc(&genre.name),
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
            "<h1>Delete Genre: {}</h1>\
             <p>This genre has the following games. Delete these games before \
             attempting to delete the genre.</p>\
             <ul class=\"item-list\">{items}</ul>",
            esc(&genre.name),
        )
    };
    layout("Delete Genre", &body)
}

//! Game instance pages.

use crate::entities::{InstanceStatus, game, game_instance};
use crate::forms::GameInstanceForm;

use super::{actions, errors_block, esc, layout};

#[must_use]
pub fn list(instances: &[(game_instance::Model, Option<game::Model>)]) -> String {
    let content = if instances.is_empty() {
        "<p>There are no game instances.</p>".to_string()
    } else {
        let rows: String = instances
            .iter()
            .map(|(i, g)| {
                let title = g.as_ref().map_or("Unknown game", |g| g.title.as_str());
                format!(
                    "<li><a href=\"{}\">{}</a> \
                     <span class=\"{}\">({})</span></li>",
                    i.detail_url(),
                    esc(title),
                    status_class(&i.status),
                    esc(&i.status),
                )
            })
            .collect();
        format!("<ul class=\"item-list\">{rows}</ul>")
    };
    layout(
        "Game Instance List",
        &format!("<h1>Game Instance List</h1>{content}"),
    )
}

#[must_use]
pub fn detail(instance: &game_instance::Model, game: Option<&game::Model>) -> String {
    let mut rows = format!("<dt>Id</dt><dd>{}</dd>", instance.id);
    if let Some(game) = game {
        rows.push_str(&format!(
            "<dt>Game</dt><dd><a href=\"{}\">{}</a></dd>",
            game.detail_url(),
            esc(&game.title),
        ));
    }
    rows.push_str(&format!(
        "<dt>Status</dt><dd class=\"{}\">{}</dd>",
        status_class(&instance.status),
        esc(&instance.status),
    ));

    let body = format!(
        "<h1>Game Instance</h1><dl>{rows}</dl>{}",
        actions(&instance.detail_url()),
    );
    layout("Game Instance", &body)
}

/// Create and update share one form. The game picker renders from `games`;
/// the status picker always offers the known statuses, defaulting to the
/// form's current value.
#[must_use]
pub fn form(
    page_title: &str,
    form: &GameInstanceForm,
    games: &[game::Model],
    errors: &[String],
) -> String {
    let game_options: String = games
        .iter()
        .map(|g| {
            let selected = if form.game == g.id.to_string() {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{}\"{selected}>{}</option>",
                g.id,
                esc(&g.title),
            )
        })
        .collect();

    let current = form.status_value();
    let status_options: String = InstanceStatus::all()
        .iter()
        .map(|status| {
            let selected = if *status == current { " selected" } else { "" };
            format!(
                "<option value=\"{0}\"{selected}>{0}</option>",
                status.as_str(),
            )
        })
        .collect();

    let body = format!(
        "<h1>{}</h1>{}<form method=\"post\" action=\"\">\
         <p><label for=\"game\">Game</label>\
         <select id=\"game\" name=\"game\">\
         <option value=\"\">--Please select a game--</option>{game_options}\
         </select></p>\
         <p><label for=\"status\">Status</label>\
         <select id=\"status\" name=\"status\">{status_options}</select></p>\
         <button type=\"submit\">Submit</button></form>",
        esc(page_title),
        errors_block(errors),
    );
    layout(page_title, &body)
}

#[must_use]
pub fn confirm_delete(instance: &game_instance::Model) -> String {
    let body = format!(
        "<h1>Delete Game Instance</h1>\
         <p>Do you really want to delete copy {}?</p>\
         <form method=\"post\" action=\"\"><button type=\"submit\">Delete</button></form>",
        instance.id,
    );
    layout("Delete Game Instance", &body)
}

fn status_class(status: &str) -> &'static str {
    if status == InstanceStatus::Available.as_str() {
        "status-available"
    } else {
        "status-soldout"
    }
}

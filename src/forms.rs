use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use chrono::NaiveDate;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::{InstanceStatus, console, game, game_instance, genre};
use crate::error::AppError;

/// Date format produced by `<input type="date">` and stored in edit forms.
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Form body
// ============================================================================

/// Parsed `application/x-www-form-urlencoded` request body.
///
/// Browsers submit form fields as an ordered pair list in which a key may
/// appear zero, one, or many times (checkbox groups repeat their key). This
/// extractor keeps that shape and offers the two normalizations every handler
/// pipeline starts with: [`FormData::trimmed`] for scalar fields and
/// [`FormData::all`] to coerce a multi-valued field into a uniform sequence,
/// possibly empty.
#[derive(Debug, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    /// First value submitted under `name`, untrimmed.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value submitted under `name`, trimmed; empty string when absent.
    #[must_use]
    pub fn trimmed(&self, name: &str) -> String {
        self.first(name).map(str::trim).unwrap_or_default().to_string()
    }

    /// Every value submitted under `name`, trimmed, in submission order.
    /// Blank entries are dropped; an absent field yields an empty sequence.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::Internal(anyhow::anyhow!("failed to read form body: {err}")))?;

        let pairs = serde_urlencoded::from_bytes(&bytes)
            .map_err(|err| AppError::Internal(anyhow::anyhow!("malformed form body: {err}")))?;

        Ok(Self { pairs })
    }
}

/// Convert a trimmed form value into an optional column value.
#[must_use]
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ============================================================================
// Field rules
// ============================================================================

/// Empty, or exactly four ASCII digits.
fn four_digit_year(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || (value.len() == 4 && value.chars().all(|c| c.is_ascii_digit())) {
        Ok(())
    } else {
        Err(ValidationError::new("four_digit_year"))
    }
}

/// Empty, or an ISO `YYYY-MM-DD` calendar date.
fn iso_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || NaiveDate::parse_from_str(value, DATE_INPUT_FORMAT).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("iso_date"))
    }
}

/// A UUID selected from a reference picker. Absent and mangled are the same
/// failure from the user's point of view: nothing valid was chosen.
fn required_id(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("required_id"))
    }
}

/// Empty (defaults later), or one of the known instance statuses.
fn known_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || InstanceStatus::from_str(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("known_status"))
    }
}

/// Flatten aggregated violations into display messages, in declared field order.
fn collect_messages(result: Result<(), ValidationErrors>, order: &[&str]) -> Vec<String> {
    let Err(errors) = result else {
        return Vec::new();
    };

    let field_errors = errors.field_errors();
    let mut messages = Vec::new();
    for field in order {
        if let Some(list) = field_errors.get(*field) {
            for err in list.iter() {
                match &err.message {
                    Some(msg) => messages.push(msg.to_string()),
                    None => messages.push(format!("{field} is invalid")),
                }
            }
        }
    }
    messages
}

// ============================================================================
// Console
// ============================================================================

/// Submitted console form, held as raw strings so a failed submission can be
/// echoed back exactly as the user typed it.
#[derive(Debug, Default, Clone, Validate)]
pub struct ConsoleForm {
    #[validate(length(min = 1, max = 100, message = "Console name must be specified"))]
    pub name: String,
    pub manufacturer: String,
    #[validate(custom(function = four_digit_year, message = "Release year must be a 4-digit number"))]
    pub release_year: String,
    #[validate(custom(function = four_digit_year, message = "Discontinued year must be a 4-digit number"))]
    pub discontinued: String,
    pub units_sold: String,
}

impl ConsoleForm {
    #[must_use]
    pub fn from_form(data: &FormData) -> Self {
        Self {
            name: data.trimmed("name"),
            manufacturer: data.trimmed("manufacturer"),
            release_year: data.trimmed("release_year"),
            discontinued: data.trimmed("discontinued"),
            units_sold: data.trimmed("units_sold"),
        }
    }

    /// Pre-fill for the edit form.
    #[must_use]
    pub fn from_model(model: &console::Model) -> Self {
        Self {
            name: model.name.clone(),
            manufacturer: model.manufacturer.clone().unwrap_or_default(),
            release_year: model.release_year.map(|y| y.to_string()).unwrap_or_default(),
            discontinued: model.discontinued.map(|y| y.to_string()).unwrap_or_default(),
            units_sold: model.units_sold.clone().unwrap_or_default(),
        }
    }

    /// Aggregated violations; empty means the form may be persisted.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        collect_messages(self.validate(), &["name", "release_year", "discontinued"])
    }

    #[must_use]
    pub fn release_year_value(&self) -> Option<i32> {
        self.release_year.parse().ok()
    }

    #[must_use]
    pub fn discontinued_value(&self) -> Option<i32> {
        self.discontinued.parse().ok()
    }
}

// ============================================================================
// Genre
// ============================================================================

#[derive(Debug, Default, Clone, Validate)]
pub struct GenreForm {
    #[validate(length(min = 1, max = 100, message = "Genre name must be specified"))]
    pub name: String,
}

impl GenreForm {
    #[must_use]
    pub fn from_form(data: &FormData) -> Self {
        Self {
            name: data.trimmed("name"),
        }
    }

    #[must_use]
    pub fn from_model(model: &genre::Model) -> Self {
        Self {
            name: model.name.clone(),
        }
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        collect_messages(self.validate(), &["name"])
    }
}

// ============================================================================
// Game
// ============================================================================

#[derive(Debug, Default, Clone, Validate)]
pub struct GameForm {
    #[validate(length(min = 1, message = "Title must be specified"))]
    pub title: String,
    #[validate(custom(function = required_id, message = "Console must be specified"))]
    pub console: String,
    #[validate(length(min = 1, message = "At least one genre must be selected"))]
    pub genres: Vec<String>,
    pub developer: String,
    pub publisher: String,
    #[validate(custom(function = iso_date, message = "Invalid release date"))]
    pub release_date: String,
    pub cost: String,
}

impl GameForm {
    #[must_use]
    pub fn from_form(data: &FormData) -> Self {
        Self {
            title: data.trimmed("title"),
            console: data.trimmed("console"),
            genres: data.all("genre"),
            developer: data.trimmed("developer"),
            publisher: data.trimmed("publisher"),
            release_date: data.trimmed("release_date"),
            cost: data.trimmed("cost"),
        }
    }

    /// Pre-fill for the edit form; `genre_ids` are the game's current genres.
    #[must_use]
    pub fn from_model(model: &game::Model, genre_ids: &[Uuid]) -> Self {
        Self {
            title: model.title.clone(),
            console: model.console_id.to_string(),
            genres: genre_ids.iter().map(Uuid::to_string).collect(),
            developer: model.developer.clone().unwrap_or_default(),
            publisher: model.publisher.clone().unwrap_or_default(),
            release_date: model
                .release_date
                .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            cost: model.cost.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        let mut messages = collect_messages(
            self.validate(),
            &["title", "console", "genres", "release_date"],
        );
        if self.genres.iter().any(|id| Uuid::parse_str(id).is_err()) {
            messages.push("Invalid genre selection".to_string());
        }
        messages
    }

    #[must_use]
    pub fn console_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.console).ok()
    }

    #[must_use]
    pub fn genre_ids(&self) -> Vec<Uuid> {
        self.genres
            .iter()
            .filter_map(|id| Uuid::parse_str(id).ok())
            .collect()
    }

    /// True when `id` is among the submitted genre selections; drives the
    /// checked state of the genre checkboxes on re-render.
    #[must_use]
    pub fn has_genre(&self, id: Uuid) -> bool {
        let id = id.to_string();
        self.genres.iter().any(|g| g == &id)
    }

    #[must_use]
    pub fn release_date_value(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.release_date, DATE_INPUT_FORMAT).ok()
    }
}

// ============================================================================
// Game instance
// ============================================================================

#[derive(Debug, Default, Clone, Validate)]
pub struct GameInstanceForm {
    #[validate(custom(function = required_id, message = "Game must be specified"))]
    pub game: String,
    #[validate(custom(function = known_status, message = "Invalid status"))]
    pub status: String,
}

impl GameInstanceForm {
    #[must_use]
    pub fn from_form(data: &FormData) -> Self {
        Self {
            game: data.trimmed("game"),
            status: data.trimmed("status"),
        }
    }

    #[must_use]
    pub fn from_model(model: &game_instance::Model) -> Self {
        Self {
            game: model.game_id.to_string(),
            status: model.status.clone(),
        }
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        collect_messages(self.validate(), &["game", "status"])
    }

    #[must_use]
    pub fn game_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.game).ok()
    }

    /// Submitted status, defaulting to `Available` when the field was omitted.
    #[must_use]
    pub fn status_value(&self) -> InstanceStatus {
        InstanceStatus::from_str(&self.status).unwrap_or_default()
    }
}

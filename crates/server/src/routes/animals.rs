use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use models::{AnimalFields, ValidationErrors};
use service::CreateOutcome;

use crate::errors::PageError;
use crate::observability::{
    ANIMALS_CREATED_TOTAL, ANIMALS_DELETED_TOTAL, ANIMALS_UPDATED_TOTAL, CREATE_REJECTED_TOTAL,
};
use crate::routes::AppState;
use crate::views;

/// Where every successful submission lands.
pub const LIST_PATH: &str = "/animals";

/// Animal fields from a url-encoded body.
///
/// Repeated keys keep their first value. A body that is not a readable form
/// becomes an HTML error page instead of a plain-text rejection.
pub struct AnimalForm(pub AnimalFields);

#[async_trait]
impl<S> FromRequest<S> for AnimalForm
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
        Ok(Self(AnimalFields::from_pairs(pairs)))
    }
}

pub async fn list_animals(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let animals = state.animals.list().await?;
    Ok(views::animal_list(&animals))
}

pub async fn show_create_form() -> Html<String> {
    views::create_form(&ValidationErrors::new(), None)
}

/// Valid submissions are stored and redirected; invalid ones get the form back
/// with every violation and the submitted values.
pub async fn create_animal(
    State(state): State<AppState>,
    AnimalForm(fields): AnimalForm,
) -> Result<Response, PageError> {
    match state.animals.create(fields).await? {
        CreateOutcome::Created(_) => {
            ANIMALS_CREATED_TOTAL.inc();
            Ok(Redirect::to(LIST_PATH).into_response())
        }
        CreateOutcome::Rejected { errors, submitted } => {
            CREATE_REJECTED_TOTAL.inc();
            Ok(views::create_form(&errors, Some(&submitted)).into_response())
        }
    }
}

pub async fn show_update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let animal = state.animals.get(&id).await?;
    Ok(views::update_form(&animal))
}

/// No validation here; the fields replace the stored ones as submitted.
pub async fn update_animal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AnimalForm(fields): AnimalForm,
) -> Result<Redirect, PageError> {
    if state.animals.update(&id, fields).await? {
        ANIMALS_UPDATED_TOTAL.inc();
    }
    Ok(Redirect::to(LIST_PATH))
}

pub async fn show_delete_confirmation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let animal = state.animals.get(&id).await?;
    Ok(views::delete_confirmation(&animal))
}

pub async fn delete_animal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    if state.animals.delete(&id).await? {
        ANIMALS_DELETED_TOTAL.inc();
    }
    Ok(Redirect::to(LIST_PATH))
}

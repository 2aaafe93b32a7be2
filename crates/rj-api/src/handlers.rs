//! # rj-api Handlers
//!
//! This module coordinates the flow between HTTP requests and core operations.

use actix_web::{web, HttpResponse};
use askama::Template;
use chrono::Utc;
use rj_core::jokes;
use rj_core::interaction::record_interaction;
use rj_core::traits::JokeRepo;
use rj_core::validation::{RawInteraction, RawJoke};
use rj_ui::{EditTemplate, FeedRow, FeedTemplate, JokeTemplate, JokeView, PostingTemplate};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::identity::CurrentUser;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Box<dyn JokeRepo>,
}

impl AppState {
    pub(crate) fn repo(&self) -> &dyn JokeRepo {
        self.repo.as_ref()
    }
}

type HandlerResult = Result<HttpResponse, ApiError>;

/// `/` just points at the feed.
pub async fn index() -> HttpResponse {
    see_other("/jokes")
}

/// Renders the feed, most recently updated jokes first.
pub async fn feed(data: web::Data<AppState>) -> HandlerResult {
    let now = Utc::now();
    let rows: Vec<FeedRow> = jokes::feed(data.repo())
        .await?
        .iter()
        .map(|entry| FeedRow::new(entry, now))
        .collect();

    html(FeedTemplate { title: "Jokes", jokes: &rows })
}

pub async fn posting_form() -> HandlerResult {
    html(PostingTemplate { title: "Post a joke" })
}

pub async fn store(
    data: web::Data<AppState>,
    user: CurrentUser,
    form: web::Form<RawJoke>,
) -> HandlerResult {
    let draft = form.into_inner().validate()?;
    let joke = jokes::post_joke(data.repo(), user.id(), draft).await?;
    log::info!("joke {} posted by {}", joke.id, user.id());

    Ok(see_other("/jokes"))
}

/// Returns a single joke as JSON.
pub async fn show(data: web::Data<AppState>, path: web::Path<Uuid>) -> HandlerResult {
    let joke = jokes::find_joke(data.repo(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(joke))
}

pub async fn edit_form(data: web::Data<AppState>, path: web::Path<Uuid>) -> HandlerResult {
    let joke = jokes::find_joke(data.repo(), path.into_inner()).await?;
    html(EditTemplate { title: "Edit joke", joke: &joke })
}

pub async fn update(
    data: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    form: web::Form<RawJoke>,
) -> HandlerResult {
    let id = path.into_inner();
    let draft = form.into_inner().validate()?;
    jokes::update_joke(data.repo(), user.id(), id, draft).await?;
    log::info!("joke {} edited by {}", id, user.id());

    Ok(see_other(&format!("/jokes/{id}/edit")))
}

pub async fn destroy(
    data: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> HandlerResult {
    let id = path.into_inner();
    jokes::delete_joke(data.repo(), user.id(), id).await?;
    log::info!("joke {} deleted by {}", id, user.id());

    Ok(see_other("/jokes"))
}

/// Renders a joke with its comments and rating breakdown.
pub async fn show_joke(data: web::Data<AppState>, path: web::Path<Uuid>) -> HandlerResult {
    let detail = jokes::joke_detail(data.repo(), path.into_inner()).await?;
    let view = JokeView::new(&detail, Utc::now());

    html(JokeTemplate { title: "Joke", view: &view })
}

/// Records a rating and/or comment for the current user.
///
/// Validation runs first, so a malformed payload never reaches storage.
pub async fn interactions(
    data: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    form: web::Form<RawInteraction>,
) -> HandlerResult {
    let joke_id = path.into_inner();
    let interaction = form.into_inner().validate()?;
    let outcome = record_interaction(data.repo(), user.id(), joke_id, &interaction).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Interactions recorded successfully",
        "rating": outcome.rating,
        "comment": outcome.comment,
    })))
}

fn html<T: Template>(template: T) -> HandlerResult {
    let body = template.render()?;
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(body))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

use log::error;
use maud::Markup;
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::Route;

use super::drain_flash;
use crate::forms::{SearchForm, VenueForm};
use crate::pages;
use crate::store::models::SearchResults;
use crate::store::Store;

pub fn routes() -> Vec<Route> {
    routes![
        list,
        search,
        details,
        create_form,
        create,
        edit_form,
        edit,
        delete
    ]
}

#[get("/")]
async fn list(store: Store, flash: Option<FlashMessage<'_>>) -> Markup {
    let mut notices = drain_flash(flash);
    let areas = match store.venues_by_location().await {
        Ok(areas) => areas,
        Err(e) => {
            error!("listing venues failed: {}", e);
            notices.push("An error occurred. Venues could not be listed.".to_string());
            Vec::new()
        }
    };
    pages::venues(&areas, &notices)
}

#[post("/search", data = "<form>")]
async fn search(store: Store, form: Form<SearchForm>) -> Markup {
    let term = form.search_term.trim().to_string();
    match store.search_venues(term.clone()).await {
        Ok(results) => pages::search_venues(&results, &term, &[]),
        Err(e) => {
            error!("searching venues for {:?} failed: {}", term, e);
            let empty = SearchResults {
                count: 0,
                data: Vec::new(),
            };
            let notices = vec!["An error occurred. Venues could not be listed.".to_string()];
            pages::search_venues(&empty, &term, &notices)
        }
    }
}

#[get("/<id>")]
async fn details(store: Store, id: i32, flash: Option<FlashMessage<'_>>) -> Markup {
    let mut notices = drain_flash(flash);
    match store.venue_details(id).await {
        Ok(details) => pages::venue(Some(&details), &notices),
        Err(e) => {
            error!("loading venue {} failed: {}", id, e);
            notices.push(format!("An error occurred. Venue {} could not be listed.", id));
            pages::venue(None, &notices)
        }
    }
}

#[get("/create")]
fn create_form() -> Markup {
    pages::venue_form(
        "List a new venue",
        "/venues/create",
        &VenueForm::default(),
        &[],
    )
}

#[post("/create", data = "<form>")]
async fn create(store: Store, form: Form<VenueForm>) -> Markup {
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        let notices: Vec<String> = errors
            .into_iter()
            .map(|(field, message)| format!("{} - {}", field, message))
            .collect();
        return pages::venue_form("List a new venue", "/venues/create", &form, &notices);
    }

    let notices = match store
        .create_venue(form.to_new_venue(), form.genres.clone())
        .await
    {
        Ok(_) => vec![format!("Venue {} was successfully listed!", form.name)],
        Err(e) => {
            error!("creating venue failed: {}", e);
            vec![format!(
                "An error occurred. Venue {} could not be listed.",
                form.name
            )]
        }
    };
    pages::home(&notices)
}

#[get("/<id>/edit")]
async fn edit_form(store: Store, id: i32) -> crate::error::Result<Markup> {
    let venue = store.venue(id).await?;
    let genres = store.venue_genre_list(id).await?;
    let form = VenueForm::from_venue(&venue, genres);
    Ok(pages::venue_form(
        "Edit venue",
        &format!("/venues/{}/edit", id),
        &form,
        &[],
    ))
}

// Redirects to the detail page in every outcome.
#[post("/<id>/edit", data = "<form>")]
async fn edit(store: Store, id: i32, form: Form<VenueForm>) -> Result<Redirect, Flash<Redirect>> {
    let form = form.into_inner();
    let target = format!("/venues/{}", id);
    match store
        .update_venue(id, form.to_new_venue(), form.genres.clone())
        .await
    {
        Ok(()) => Ok(Redirect::to(target)),
        Err(e) => {
            error!("updating venue {} failed: {}", id, e);
            Err(Flash::error(
                Redirect::to(target),
                format!("An error occurred. Venue {} could not be updated.", form.name),
            ))
        }
    }
}

#[delete("/<id>")]
async fn delete(store: Store, id: i32) -> crate::error::Result<Flash<Redirect>> {
    // The name is resolved before the guarded delete; an unknown id is a 500
    // rather than a notice.
    let name = store.venue_name(id).await?;

    Ok(match store.delete_venue(id).await {
        Ok(()) => Flash::success(
            Redirect::to("/venues"),
            format!("Venue {} was successfully deleted!", name),
        ),
        Err(e) => {
            error!("deleting venue {} failed: {}", id, e);
            Flash::error(
                Redirect::to("/venues"),
                format!("An error occurred. Venue {} could not be deleted.", name),
            )
        }
    })
}

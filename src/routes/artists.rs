use log::error;
use maud::Markup;
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::Route;

use super::drain_flash;
use crate::forms::{ArtistForm, SearchForm};
use crate::pages;
use crate::store::models::SearchResults;
use crate::store::Store;

pub fn routes() -> Vec<Route> {
    routes![list, search, details, create_form, create, edit_form, edit]
}

#[get("/")]
async fn list(store: Store, flash: Option<FlashMessage<'_>>) -> Markup {
    let mut notices = drain_flash(flash);
    let artists = match store.all_artists().await {
        Ok(artists) => artists,
        Err(e) => {
            error!("listing artists failed: {}", e);
            notices.push("An error occurred. Artists could not be listed.".to_string());
            Vec::new()
        }
    };
    pages::artists(&artists, &notices)
}

#[post("/search", data = "<form>")]
async fn search(store: Store, form: Form<SearchForm>) -> Markup {
    let term = form.search_term.trim().to_string();
    match store.search_artists(term.clone()).await {
        Ok(results) => pages::search_artists(&results, &term, &[]),
        Err(e) => {
            error!("searching artists for {:?} failed: {}", term, e);
            let empty = SearchResults {
                count: 0,
                data: Vec::new(),
            };
            let notices = vec!["An error occurred. Not able to search for artist.".to_string()];
            pages::search_artists(&empty, &term, &notices)
        }
    }
}

#[get("/<id>")]
async fn details(store: Store, id: i32, flash: Option<FlashMessage<'_>>) -> Markup {
    let mut notices = drain_flash(flash);
    match store.artist_details(id).await {
        Ok(details) => pages::artist(Some(&details), &notices),
        Err(e) => {
            error!("loading artist {} failed: {}", id, e);
            notices.push("An error occurred. Artist could not be listed.".to_string());
            pages::artist(None, &notices)
        }
    }
}

#[get("/create")]
fn create_form() -> Markup {
    pages::artist_form(
        "List a new artist",
        "/artists/create",
        &ArtistForm::default(),
        &[],
    )
}

#[post("/create", data = "<form>")]
async fn create(store: Store, form: Form<ArtistForm>) -> Markup {
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        let notices: Vec<String> = errors
            .into_iter()
            .map(|(field, message)| format!("{} - {}", field, message))
            .collect();
        return pages::artist_form("List a new artist", "/artists/create", &form, &notices);
    }

    let notices = match store
        .create_artist(form.to_new_artist(), form.genres.clone())
        .await
    {
        Ok(_) => vec![format!("Artist {} was successfully listed!", form.name)],
        Err(e) => {
            error!("creating artist failed: {}", e);
            vec![format!(
                "An error occurred. Artist {} could not be listed.",
                form.name
            )]
        }
    };
    pages::home(&notices)
}

#[get("/<id>/edit")]
async fn edit_form(store: Store, id: i32) -> crate::error::Result<Markup> {
    let artist = store.artist(id).await?;
    let genres = store.artist_genre_list(id).await?;
    let form = ArtistForm::from_artist(&artist, genres);
    Ok(pages::artist_form(
        "Edit artist",
        &format!("/artists/{}/edit", id),
        &form,
        &[],
    ))
}

// Redirects to the detail page in every outcome.
#[post("/<id>/edit", data = "<form>")]
async fn edit(store: Store, id: i32, form: Form<ArtistForm>) -> Result<Redirect, Flash<Redirect>> {
    let form = form.into_inner();
    let target = format!("/artists/{}", id);
    match store
        .update_artist(id, form.to_new_artist(), form.genres.clone())
        .await
    {
        Ok(()) => Ok(Redirect::to(target)),
        Err(e) => {
            error!("updating artist {} failed: {}", id, e);
            Err(Flash::error(
                Redirect::to(target),
                "An error occurred. Artist could not be updated.".to_string(),
            ))
        }
    }
}

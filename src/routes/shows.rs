use chrono::{Local, NaiveDateTime};
use log::error;
use maud::Markup;
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::Route;

use super::drain_flash;
use crate::forms::ShowForm;
use crate::pages;
use crate::store::models::NewShow;
use crate::store::Store;

const FAILURE: &str = "An error occurred. Show could not be listed.";

pub fn routes() -> Vec<Route> {
    routes![list, create_form, create]
}

#[get("/")]
async fn list(store: Store, flash: Option<FlashMessage<'_>>) -> Markup {
    let mut notices = drain_flash(flash);
    let listing = match store.all_shows().await {
        Ok(listing) => listing,
        Err(e) => {
            error!("listing shows failed: {}", e);
            notices.push("An error occurred. Shows could not be listed.".to_string());
            Vec::new()
        }
    };
    pages::shows(&listing, &notices)
}

#[get("/create")]
fn create_form() -> Markup {
    pages::show_form(&ShowForm::default(), &[])
}

/// Renders the home page in every outcome; only the notices differ.
#[post("/create", data = "<form>")]
async fn create(store: Store, form: Form<ShowForm>) -> Markup {
    pages::home(&create_notices(&store, &form).await)
}

async fn create_notices(store: &Store, form: &ShowForm) -> Vec<String> {
    let mut notices = Vec::new();

    let ids = (
        form.artist_id.trim().parse::<i32>(),
        form.venue_id.trim().parse::<i32>(),
    );
    let (artist_id, venue_id) = match ids {
        (Ok(artist_id), Ok(venue_id)) => (artist_id, venue_id),
        _ => {
            notices.push(FAILURE.to_string());
            return notices;
        }
    };

    // Both referenced entities must exist before anything is inserted.
    let artist = match store.artist_ref(artist_id).await {
        Ok(artist) => artist,
        Err(e) => {
            error!("looking up artist {} failed: {}", artist_id, e);
            notices.push(FAILURE.to_string());
            return notices;
        }
    };
    if artist.is_none() {
        notices.push("The provided artist id is invalid".to_string());
    }

    let venue = match store.venue_ref(venue_id).await {
        Ok(venue) => venue,
        Err(e) => {
            error!("looking up venue {} failed: {}", venue_id, e);
            notices.push(FAILURE.to_string());
            return notices;
        }
    };
    if venue.is_none() {
        // The venue branch has always reused the artist wording.
        notices.push("The provided artist id is invalid".to_string());
    }

    if let (Some(artist), Some(venue)) = (artist, venue) {
        let start_time = match parse_start_time(form.start_time.trim()) {
            Some(start_time) => start_time,
            None => {
                notices.push(FAILURE.to_string());
                return notices;
            }
        };

        let new_show = NewShow {
            start_time,
            venue_id: venue.id,
            artist_id: artist.id,
        };
        if let Err(e) = store.create_show(new_show).await {
            error!("creating show failed: {}", e);
            notices.push(FAILURE.to_string());
        }
    }

    notices
}

/// An unset start time falls back to the current instant.
fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return Some(Local::now().naive_local());
    }

    const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::parse_start_time;

    #[test]
    fn accepts_space_and_t_separated_timestamps() {
        assert!(parse_start_time("2022-07-01 20:00:00").is_some());
        assert!(parse_start_time("2022-07-01T20:00:00").is_some());
        assert!(parse_start_time("2022-07-01T20:00").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_start_time("next friday").is_none());
    }

    #[test]
    fn empty_input_defaults_to_now() {
        assert!(parse_start_time("").is_some());
    }
}

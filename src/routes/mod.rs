pub mod artists;
pub mod shows;
pub mod venues;

use maud::Markup;
use rocket::request::FlashMessage;
use rocket::{Build, Rocket};

use crate::pages;

pub fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", routes![home])
        .mount("/venues", venues::routes())
        .mount("/artists", artists::routes())
        .mount("/shows", shows::routes())
}

#[get("/")]
fn home(flash: Option<FlashMessage<'_>>) -> Markup {
    pages::home(&drain_flash(flash))
}

/// One-shot cookie notices left by a redirecting handler.
pub(crate) fn drain_flash(flash: Option<FlashMessage<'_>>) -> Vec<String> {
    flash
        .map(|flash| vec![flash.message().to_string()])
        .unwrap_or_default()
}

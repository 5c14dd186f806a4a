#[rocket::launch]
fn rocket() -> _ {
    gigbook::app(gigbook::figment())
}

//! End-to-end tests against the full Rocket application, backed by a
//! temporary SQLite file with the embedded migrations applied at launch.

use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};

fn client() -> (Client, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("test.sqlite");

    let figment = rocket::Config::figment()
        .merge((
            "databases.gigbook.url",
            db_path.to_str().expect("utf-8 path").to_string(),
        ))
        .merge(("databases.gigbook.pool_size", 1));

    let client = Client::tracked(gigbook::app(figment)).expect("valid rocket instance");
    (client, dir)
}

fn post_form<'c>(client: &'c Client, path: &'c str, body: &str) -> LocalResponse<'c> {
    client
        .post(path)
        .header(ContentType::Form)
        .body(body.to_string())
        .dispatch()
}

fn venue_body(name: &str, city: &str, state: &str) -> String {
    format!(
        "name={}&city={}&state={}&address=1015+Folsom+Street&phone=123-123-1234\
         &image_link=https%3A%2F%2Fexample.com%2Fvenue.jpg&genres=Jazz&genres=Reggae\
         &facebook_link=&website_link=https%3A%2F%2Fexample.com&seeking_talent=y\
         &seeking_description=Looking+for+local+artists.",
        name.replace(' ', "+"),
        city.replace(' ', "+"),
        state
    )
}

fn artist_body(name: &str) -> String {
    format!(
        "name={}&city=San+Francisco&state=CA&phone=326-123-5000\
         &image_link=https%3A%2F%2Fexample.com%2Fartist.jpg&genres=Rock+n+Roll\
         &facebook_link=&website_link=&seeking_description=",
        name.replace(' ', "+")
    )
}

#[test]
fn home_page_renders() {
    let (client, _dir) = client();
    let response = client.get("/").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().unwrap().contains("GigBook"));
}

#[test]
fn unknown_routes_render_the_404_page() {
    let (client, _dir) = client();
    let response = client.get("/nonsense").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    assert!(response.into_string().unwrap().contains("404 Not Found"));
}

#[test]
fn created_venue_appears_grouped_by_city_and_state() {
    let (client, _dir) = client();

    let response = post_form(
        &client,
        "/venues/create",
        &venue_body("The Musical Hop", "San Francisco", "CA"),
    );
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains("Venue The Musical Hop was successfully listed!"));

    let listing = client.get("/venues").dispatch().into_string().unwrap();
    assert!(listing.contains("San Francisco, CA"));
    assert!(listing.contains("The Musical Hop"));
}

#[test]
fn venue_created_with_seeking_talent_y_shows_as_seeking() {
    let (client, _dir) = client();
    post_form(
        &client,
        "/venues/create",
        &venue_body("The Musical Hop", "San Francisco", "CA"),
    );

    let detail = client.get("/venues/1").dispatch().into_string().unwrap();
    assert!(detail.contains("Seeking talent"));
    assert!(detail.contains("Looking for local artists."));
}

#[test]
fn invalid_submission_rerenders_the_form_with_field_notices() {
    let (client, _dir) = client();

    let body = "name=&city=Aachen&state=Bavaria&address=&phone=&image_link=\
                &facebook_link=&website_link=&seeking_description=";
    let response = post_form(&client, "/venues/create", body);
    assert_eq!(response.status(), Status::Ok);

    let page = response.into_string().unwrap();
    assert!(page.contains("name - This field is required."));
    assert!(page.contains("state - Not a valid choice."));
    assert!(page.contains("genres - This field is required."));
    // Submitted input is preserved in the re-rendered form.
    assert!(page.contains("value=\"Aachen\""));

    // Nothing was persisted.
    let listing = client.get("/venues").dispatch().into_string().unwrap();
    assert!(!listing.contains("Aachen"));
}

#[test]
fn venue_search_matches_substrings_case_insensitively() {
    let (client, _dir) = client();
    post_form(
        &client,
        "/venues/create",
        &venue_body("The Musical Hop", "San Francisco", "CA"),
    );

    let hit = post_form(&client, "/venues/search", "search_term=musical")
        .into_string()
        .unwrap();
    assert!(hit.contains("Found 1 venue(s)"));
    assert!(hit.contains("The Musical Hop"));

    let miss = post_form(&client, "/venues/search", "search_term=llet")
        .into_string()
        .unwrap();
    assert!(miss.contains("Found 0 venue(s)"));
}

#[test]
fn artist_search_reports_total_show_count_as_upcoming() {
    let (client, _dir) = client();
    post_form(
        &client,
        "/venues/create",
        &venue_body("The Musical Hop", "San Francisco", "CA"),
    );
    post_form(&client, "/artists/create", &artist_body("Guns N Petals"));

    // One clearly past, one clearly future booking.
    post_form(
        &client,
        "/shows/create",
        "artist_id=1&venue_id=1&start_time=2019-06-15+20%3A00%3A00",
    );
    post_form(
        &client,
        "/shows/create",
        "artist_id=1&venue_id=1&start_time=2099-06-15+20%3A00%3A00",
    );

    let results = post_form(&client, "/artists/search", "search_term=guns")
        .into_string()
        .unwrap();
    // Both shows count, despite only one being upcoming.
    assert!(results.contains("2 upcoming shows"));
}

#[test]
fn venue_detail_splits_past_and_upcoming_shows() {
    let (client, _dir) = client();
    post_form(
        &client,
        "/venues/create",
        &venue_body("The Musical Hop", "San Francisco", "CA"),
    );
    post_form(&client, "/artists/create", &artist_body("Guns N Petals"));
    post_form(
        &client,
        "/shows/create",
        "artist_id=1&venue_id=1&start_time=2019-06-15+20%3A00%3A00",
    );
    post_form(
        &client,
        "/shows/create",
        "artist_id=1&venue_id=1&start_time=2099-06-15+20%3A00%3A00",
    );

    let detail = client.get("/venues/1").dispatch().into_string().unwrap();
    assert!(detail.contains("Upcoming Shows (1)"));
    assert!(detail.contains("Past Shows (1)"));
}

#[test]
fn missing_venue_detail_renders_notice_not_404() {
    let (client, _dir) = client();
    let response = client.get("/venues/42").dispatch();
    assert_eq!(response.status(), Status::Ok);

    let page = response.into_string().unwrap();
    assert!(page.contains("An error occurred. Venue 42 could not be listed."));
    assert!(page.contains("This venue is not listed."));
}

#[test]
fn editing_replaces_scalar_fields_and_genre_tags() {
    let (client, _dir) = client();
    post_form(
        &client,
        "/venues/create",
        &venue_body("The Musical Hop", "San Francisco", "CA"),
    );

    let prefill = client.get("/venues/1/edit").dispatch().into_string().unwrap();
    assert!(prefill.contains("value=\"The Musical Hop\""));

    let response = post_form(
        &client,
        "/venues/1/edit",
        "name=The+Dueling+Pianos&city=New+York&state=NY&address=335+Delancey+Street\
         &phone=914-003-1132&image_link=&genres=Rock+n+Roll&facebook_link=\
         &website_link=&seeking_description=",
    );
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/venues/1"));

    let detail = client.get("/venues/1").dispatch().into_string().unwrap();
    assert!(detail.contains("The Dueling Pianos"));
    assert!(detail.contains("Rock n Roll"));
    assert!(!detail.contains("Jazz"));
    // The unchecked checkbox switches the flag off again.
    assert!(!detail.contains("Seeking talent"));
}

#[test]
fn editing_a_missing_venue_flashes_and_still_redirects() {
    let (client, _dir) = client();
    let response = post_form(
        &client,
        "/venues/7/edit",
        "name=Ghost&city=Nowhere&state=CA&address=&phone=&image_link=&genres=Jazz\
         &facebook_link=&website_link=&seeking_description=",
    );
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/venues/7"));

    let followed = client.get("/venues/7").dispatch().into_string().unwrap();
    assert!(followed.contains("An error occurred. Venue Ghost could not be updated."));
}

#[test]
fn deleting_a_venue_cascades_to_its_shows() {
    let (client, _dir) = client();
    post_form(
        &client,
        "/venues/create",
        &venue_body("The Musical Hop", "San Francisco", "CA"),
    );
    post_form(&client, "/artists/create", &artist_body("Guns N Petals"));
    post_form(
        &client,
        "/shows/create",
        "artist_id=1&venue_id=1&start_time=2099-06-15+20%3A00%3A00",
    );

    let response = client.delete("/venues/1").dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(response.headers().get_one("Location"), Some("/venues"));

    let listing = client.get("/venues").dispatch().into_string().unwrap();
    assert!(listing.contains("Venue The Musical Hop was successfully deleted!"));
    assert!(!listing.contains("San Francisco, CA"));

    let shows = client.get("/shows").dispatch().into_string().unwrap();
    assert!(!shows.contains("playing at"));
}

#[test]
fn deleting_an_unknown_venue_is_a_server_error() {
    let (client, _dir) = client();
    let response = client.delete("/venues/999").dispatch();
    assert_eq!(response.status(), Status::InternalServerError);
    assert!(response
        .into_string()
        .unwrap()
        .contains("500 Internal Server Error"));
}

#[test]
fn show_with_unknown_artist_is_rejected_with_the_artist_notice() {
    let (client, _dir) = client();
    post_form(
        &client,
        "/venues/create",
        &venue_body("The Musical Hop", "San Francisco", "CA"),
    );

    let response = post_form(
        &client,
        "/shows/create",
        "artist_id=999&venue_id=1&start_time=2099-06-15+20%3A00%3A00",
    );
    assert_eq!(response.status(), Status::Ok);
    assert!(response
        .into_string()
        .unwrap()
        .contains("The provided artist id is invalid"));

    let shows = client.get("/shows").dispatch().into_string().unwrap();
    assert!(!shows.contains("playing at"));
}

#[test]
fn show_with_unknown_venue_reuses_the_artist_wording() {
    let (client, _dir) = client();
    post_form(&client, "/artists/create", &artist_body("Guns N Petals"));

    let page = post_form(
        &client,
        "/shows/create",
        "artist_id=1&venue_id=999&start_time=2099-06-15+20%3A00%3A00",
    )
    .into_string()
    .unwrap();
    assert!(page.contains("The provided artist id is invalid"));
}

#[test]
fn valid_show_lands_in_the_listing() {
    let (client, _dir) = client();
    post_form(
        &client,
        "/venues/create",
        &venue_body("Park Square Live", "New York", "NY"),
    );
    post_form(&client, "/artists/create", &artist_body("The Wild Sax Band"));

    let response = post_form(
        &client,
        "/shows/create",
        "artist_id=1&venue_id=1&start_time=2099-06-15+20%3A00%3A00",
    );
    assert_eq!(response.status(), Status::Ok);

    let shows = client.get("/shows").dispatch().into_string().unwrap();
    assert!(shows.contains("The Wild Sax Band"));
    assert!(shows.contains("playing at"));
    assert!(shows.contains("Park Square Live"));
    assert!(shows.contains("2099-06-15 20:00:00"));
}

#[test]
fn static_assets_are_served() {
    let (client, _dir) = client();
    let response = client.get("/static/js/venue.js").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert!(response.into_string().unwrap().contains("delete-button"));
}

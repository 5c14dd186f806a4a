#[macro_use]
extern crate rocket;
#[macro_use]
extern crate diesel;

pub mod error;
pub mod forms;
pub mod pages;
pub mod routes;
pub mod schema;
pub mod store;

use std::path::PathBuf;

use log::error;
use maud::Markup;
use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::fs::NamedFile;
use rocket::{Build, Rocket, State};

use store::Store;

/// Builds the application from a figment: database pool, migrations, asset
/// route, all entity routes, and the error catchers.
pub fn app(figment: Figment) -> Rocket<Build> {
    let rocket = rocket::custom(figment)
        .attach(Store::fairing())
        .attach(assets_fairing())
        .mount("/", routes![static_file])
        .register("/", catchers![not_found, server_error]);
    routes::mount(rocket)
}

/// Launch configuration from the environment: PORT (default 3000, bound on
/// all interfaces) and DATABASE_URL (default a file next to the binary).
pub fn figment() -> Figment {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(3000);
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "gigbook.sqlite".to_string());

    rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"))
        .merge(("databases.gigbook.url", database_url))
}

#[catch(404)]
fn not_found() -> Markup {
    pages::not_found()
}

#[catch(500)]
fn server_error() -> Markup {
    pages::server_error()
}

#[derive(Debug)]
struct AssetsDir(PathBuf);

fn assets_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Assets Config", |rocket| async {
        let assets_dir = PathBuf::from(
            rocket
                .figment()
                .extract_inner::<String>("assets_dir")
                .unwrap_or_else(|_| "static".to_string()),
        );
        if assets_dir.exists() {
            Ok(rocket.manage(AssetsDir(assets_dir)))
        } else {
            error!("the assets directory '{}' does not exist", assets_dir.display());
            Err(rocket)
        }
    })
}

#[get("/static/<file..>")]
async fn static_file(file: PathBuf, assets_dir: &State<AssetsDir>) -> Option<NamedFile> {
    NamedFile::open(assets_dir.0.join(file)).await.ok()
}

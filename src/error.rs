use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::Request;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures a handler cannot turn into a notice on a rendered page. They
/// surface as the 500 error page.
#[derive(Error, Debug)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        log::error!("{}", self);
        Err(Status::InternalServerError)
    }
}

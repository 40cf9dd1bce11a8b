use chrono::DateTime;
use chrono_tz::Tz;
use ntex::{
    http::Payload,
    web::{Error, FromRequest, HttpRequest},
};

use crate::front::utils;

/// Current instant in the time zone sent by the page in the `timezone` header
pub struct UserNow(pub DateTime<Tz>);

impl<Err> FromRequest<Err> for UserNow {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        futures::future::ready(Ok(Self(utils::user_now(req.headers()))))
    }
}

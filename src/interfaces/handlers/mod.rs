pub mod admin;
pub mod artists;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod chatbot;
pub mod home;
pub mod json_error;
pub mod orders;
pub mod submissions;
pub mod system;

use actix_web::{
    dev::Payload,
    http::header::{CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING},
    web, Either, FromRequest, HttpRequest,
};
use futures_util::future::{ready, FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;

/// Checkout and chat bodies may arrive as JSON or as a urlencoded form.
pub(crate) fn json_or_form<T>(body: Either<web::Json<T>, web::Form<T>>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// JSON or form body whose fields are all optional. A request that carries
/// no body and no content type yields `T::default()`.
#[derive(Debug)]
pub struct OptionalBody<T>(pub T);

impl<T> OptionalBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn is_bodyless(req: &HttpRequest) -> bool {
    let headers = req.headers();
    headers.get(CONTENT_TYPE).is_none()
        && headers.get(TRANSFER_ENCODING).is_none()
        && headers.get(CONTENT_LENGTH).is_none_or(|len| len.as_bytes() == b"0")
}

impl<T> FromRequest for OptionalBody<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_bodyless(req) {
            return ready(Ok(OptionalBody(T::default()))).boxed_local();
        }

        let body = Either::<web::Json<T>, web::Form<T>>::from_request(req, payload);
        async move {
            let body = body.await.map_err(actix_web::Error::from)?;
            Ok(OptionalBody(json_or_form(body)))
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    use crate::entities::{cart::UpdateQuantity, order::PlaceOrderForm};

    #[actix_rt::test]
    async fn missing_body_falls_back_to_defaults() {
        let (req, mut payload) = test::TestRequest::post().to_http_parts();
        let body = OptionalBody::<UpdateQuantity>::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(body.into_inner().quantity, 1);

        let (req, mut payload) = test::TestRequest::post().to_http_parts();
        let form = OptionalBody::<PlaceOrderForm>::from_request(&req, &mut payload).await.unwrap();
        assert!(form.into_inner().first_name.is_none());
    }

    #[actix_rt::test]
    async fn form_and_json_bodies_are_both_read() {
        let (req, mut payload) = test::TestRequest::post()
            .set_form([("quantity", "3")])
            .to_http_parts();
        let body = OptionalBody::<UpdateQuantity>::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(body.into_inner().quantity, 3);

        let (req, mut payload) = test::TestRequest::post()
            .set_json(serde_json::json!({"quantity": 2}))
            .to_http_parts();
        let body = OptionalBody::<UpdateQuantity>::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(body.into_inner().quantity, 2);
    }

    #[actix_rt::test]
    async fn malformed_body_is_still_rejected() {
        let (req, mut payload) = test::TestRequest::post()
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_http_parts();
        let result = OptionalBody::<UpdateQuantity>::from_request(&req, &mut payload).await;
        assert!(result.is_err());
    }
}

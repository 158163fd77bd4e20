use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    body::EitherBody,
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use futures::future::LocalBoxFuture;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "docquiz_session";

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies session cookie values of the form `<uuid>.<tag>`, where
/// the tag is the base64url HMAC-SHA256 of the uuid bytes.
#[derive(Clone)]
pub struct SessionKey {
    secret: Arc<SecretString>,
}

impl SessionKey {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret: Arc::new(secret),
        }
    }

    fn mac(&self, session_id: &Uuid) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()).ok()?;
        mac.update(session_id.as_bytes());
        Some(mac)
    }

    pub fn sign(&self, session_id: &Uuid) -> Option<String> {
        let tag = self.mac(session_id)?.finalize().into_bytes();
        Some(format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(tag)))
    }

    /// The session id carried by `value`, if its tag verifies.
    pub fn verify(&self, value: &str) -> Option<Uuid> {
        let (id, tag) = value.split_once('.')?;
        let session_id = Uuid::parse_str(id).ok()?;
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;
        // Constant-time comparison.
        self.mac(&session_id)?.verify_slice(&tag).ok()?;
        Some(session_id)
    }
}

/// Attaches a [`SessionId`] to every request, issuing a fresh signed cookie
/// when the request carries none or a tampered one.
pub struct SessionMiddleware {
    key: SessionKey,
}

impl SessionMiddleware {
    pub fn new(secret: SecretString) -> Self {
        Self {
            key: SessionKey::new(secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            key: self.key.clone(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    key: SessionKey,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let existing = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| self.key.verify(cookie.value()));

        let (session_id, issued) = match existing {
            Some(session_id) => (session_id, false),
            None => (Uuid::new_v4(), true),
        };
        req.extensions_mut().insert(SessionId(session_id));

        let service = Rc::clone(&self.service);
        let key = self.key.clone();

        Box::pin(async move {
            let mut res = service.call(req).await?;

            if issued {
                match key.sign(&session_id) {
                    Some(value) => {
                        let cookie = Cookie::build(SESSION_COOKIE, value)
                            .path("/")
                            .http_only(true)
                            .same_site(SameSite::Lax)
                            .finish();
                        if let Err(e) = res.response_mut().add_cookie(&cookie) {
                            log::warn!("Failed to set session cookie: {}", e);
                        }
                        log::debug!("Issued session {}", session_id);
                    }
                    None => log::warn!("Failed to sign session {}", session_id),
                }
            }

            Ok(res.map_into_left_body())
        })
    }
}

/// Extractor for the current request's session, set by [`SessionMiddleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req
            .extensions()
            .get::<SessionId>()
            .copied()
            .ok_or_else(|| AppError::InternalError("Session middleware not installed".to_string()));

        ready(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test as actix_test, App, HttpResponse};

    #[get("/whoami")]
    async fn whoami(session: SessionId) -> HttpResponse {
        HttpResponse::Ok().body(session.0.to_string())
    }

    fn key() -> SessionKey {
        SessionKey::new(SecretString::from("test_session_secret".to_string()))
    }

    #[test]
    fn signed_value_round_trips() {
        let key = key();
        let session = Uuid::new_v4();

        let signed = key.sign(&session).unwrap();

        assert_eq!(key.verify(&signed), Some(session));
    }

    #[test]
    fn tampered_or_foreign_values_are_rejected() {
        let key = key();
        let session = Uuid::new_v4();
        let signed = key.sign(&session).unwrap();
        let (_, tag) = signed.split_once('.').unwrap();

        let forged = format!("{}.{}", Uuid::new_v4(), tag);
        let truncated = &signed[..signed.len() - 2];
        let other_key = SessionKey::new(SecretString::from("another_secret".to_string()));

        assert_eq!(key.verify(&forged), None);
        assert_eq!(key.verify(truncated), None);
        assert_eq!(key.verify(&format!("{}.not*base64", session)), None);
        assert_eq!(key.verify("not-a-session"), None);
        assert_eq!(other_key.verify(&signed), None);
    }

    #[actix_web::test]
    async fn issues_cookie_for_new_sessions_and_reuses_valid_ones() {
        let app = actix_test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(SecretString::from(
                    "test_session_secret".to_string(),
                )))
                .service(whoami),
        )
        .await;

        let first = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/whoami").to_request()).await;
        let cookie = first
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie should be issued")
            .into_owned();
        let first_id = actix_test::read_body(first).await;

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert!(second.response().cookies().next().is_none());
        let second_id = actix_test::read_body(second).await;

        assert_eq!(first_id, second_id);
    }

    #[actix_web::test]
    async fn extractor_without_middleware_is_an_error() {
        let app = actix_test::init_service(App::new().service(whoami)).await;

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/whoami").to_request()).await;

        assert!(resp.status().is_server_error());
    }
}

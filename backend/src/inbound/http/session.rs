//! Session adapter keeping HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so the account flows only see the domain
//! [`SessionHandle`] port: read or persist a user id, or destroy the record.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::{SessionError, SessionHandle};
use crate::domain::UserId;

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper exposing the domain session contract over an Actix
/// session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

impl SessionHandle for SessionContext {
    fn user_id(&self) -> Result<Option<UserId>, SessionError> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|err| SessionError::new(format!("failed to read session: {err}")))?;
        match raw {
            Some(raw) => match UserId::new(&raw) {
                Ok(id) => Ok(Some(id)),
                Err(err) => {
                    // A tampered or stale cookie reads as anonymous.
                    warn!(error = %err, "invalid user id in session state");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    fn set_user_id(&self, user_id: &UserId) -> Result<(), SessionError> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|err| SessionError::new(format!("failed to persist session: {err}")))
    }

    fn destroy(&self) -> bool {
        // Removal of the server-side record is carried out by the session
        // middleware when the response is written; purging the handle cannot
        // fail at this point.
        self.0.purge();
        true
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use crate::domain::Error;

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6")
                            .expect("fixture id");
                        session
                            .set_user_id(&id)
                            .map_err(|err| Error::internal(err.to_string()))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session
                            .user_id()
                            .map_err(|err| Error::internal(err.to_string()))?
                            .ok_or_else(|| Error::unauthorized("login required"))?;
                        Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "sid")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[actix_web::test]
    async fn missing_user_reads_as_anonymous() {
        let app = test::init_service(session_test_app().route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                let id = session
                    .user_id()
                    .map_err(|err| Error::internal(err.to_string()))?
                    .ok_or_else(|| Error::unauthorized("login required"))?;
                Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_user_id_reads_as_anonymous() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("set invalid user id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session
                            .user_id()
                            .map_err(|err| Error::internal(err.to_string()))?;
                        Ok::<_, Error>(HttpResponse::Ok().body(format!("{:?}", id.is_some())))
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "sid")
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "false");
    }

    #[actix_web::test]
    async fn destroy_clears_state_and_reports_success() {
        let app = test::init_service(session_test_app().route(
            "/cycle",
            web::get().to(|session: SessionContext| async move {
                let id = UserId::random();
                session
                    .set_user_id(&id)
                    .map_err(|err| Error::internal(err.to_string()))?;
                let destroyed = session.destroy();
                let after = session
                    .user_id()
                    .map_err(|err| Error::internal(err.to_string()))?;
                Ok::<_, Error>(
                    HttpResponse::Ok().body(format!("{destroyed}:{}", after.is_some())),
                )
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/cycle").to_request()).await;
        let body = test::read_body(res).await;
        assert_eq!(body, "true:false");
    }
}

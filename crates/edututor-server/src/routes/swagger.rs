use super::api;
use super::login;

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder};
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_rapidoc::RapiDoc;
use utoipa_swagger_ui::SwaggerUi;

struct SecurityAddon;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::user::get_user_info,
        api::v0::quiz::get_catalog,
        api::v0::quiz::start_session,
        api::v0::quiz::get_session,
        api::v0::quiz::submit_answer,
        api::v0::quiz::finish_session,
        api::v0::quiz::abandon_session,
        api::v0::quiz::get_scores,
        api::v0::analytics::get_student_dashboard,
        api::v0::analytics::get_educator_dashboard,
        api::v0::analytics::get_student_reports,
        api::v0::assistant::ask_question,
        api::v0::assistant::ask_pdf,
        login::register,
        login::login_password,
        login::logout,
    ),
    modifiers(&SecurityAddon),
    tags()
)]
pub(crate) struct ApiDoc;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // we can unwrap safely, since there already are components registered.
        let components = openapi.components.as_mut().expect("components not registered");
        components.add_security_scheme(
            "token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Api Token"))
                    .build(),
            ),
        );
    }
}

pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // There is no need to create `RapiDoc::with_openapi` because the OpenApi is served
        // via SwaggerUi instead we only make rapidoc to point to the existing doc.
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
}

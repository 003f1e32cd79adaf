//! Router assembly
//!
//! Binds every API route to its handler and stitches the middleware stack:
//! CORS, request tracing, and the rate limiter.

pub mod auth;
pub mod camps;
pub mod designs;
pub mod leads;
pub mod logistics;
pub mod mailbox;
pub mod navigation;
pub mod orders;
pub mod research;
pub mod rosters;
pub mod users;

use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::rate_limit::rate_limit_middleware;
use crate::state::AppContext;

/// Build the application router
pub fn app(state: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/navigation", get(navigation::get_navigation))
        .route("/api/leads", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/api/leads/{id}",
            get(leads::get_lead)
                .patch(leads::update_lead)
                .delete(leads::delete_lead),
        )
        .route("/api/leads/{id}/progress", patch(leads::update_progress))
        .route("/api/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/api/orders/{id}",
            get(orders::get_order)
                .patch(orders::update_order)
                .delete(orders::delete_order),
        )
        .route(
            "/api/orders/{id}/status",
            get(orders::list_status_updates).post(orders::add_status_update),
        )
        .route(
            "/api/designs",
            get(designs::list_projects).post(designs::create_project),
        )
        .route(
            "/api/designs/{id}",
            get(designs::get_project)
                .patch(designs::update_project)
                .delete(designs::delete_project),
        )
        .route("/api/designs/{id}/assign", post(designs::assign_designer))
        .route(
            "/api/designs/{id}/versions",
            get(designs::list_versions).post(designs::add_version),
        )
        .route(
            "/api/designs/{id}/versions/{version_id}/approve",
            post(designs::approve_version),
        )
        .route("/api/camps", get(camps::list_camps).post(camps::create_camp))
        .route(
            "/api/camps/{id}",
            get(camps::get_camp)
                .patch(camps::update_camp)
                .delete(camps::delete_camp),
        )
        .route(
            "/api/camps/{id}/registrations",
            get(camps::list_registrations).post(camps::create_registration),
        )
        .route("/api/registrations/{id}", patch(camps::update_registration))
        .route(
            "/api/registrations/{id}/cancel",
            post(camps::cancel_registration),
        )
        .route(
            "/api/camps/{id}/participants",
            get(rosters::list_participants).post(rosters::create_participant),
        )
        .route(
            "/api/participants/{id}",
            get(rosters::get_participant)
                .patch(rosters::update_participant)
                .delete(rosters::delete_participant),
        )
        .route("/api/staff", get(rosters::list_staff).post(rosters::create_staff))
        .route(
            "/api/staff/{id}",
            get(rosters::get_staff)
                .patch(rosters::update_staff)
                .delete(rosters::delete_staff),
        )
        .route(
            "/api/camps/{id}/staff",
            get(rosters::list_camp_staff).post(rosters::assign_staff),
        )
        .route(
            "/api/camps/{id}/staff/{staff_id}",
            delete(rosters::remove_camp_staff),
        )
        .route(
            "/api/camps/{id}/schedule",
            get(logistics::list_schedule).post(logistics::create_schedule_event),
        )
        .route(
            "/api/schedule/{id}",
            get(logistics::get_schedule_event)
                .patch(logistics::update_schedule_event)
                .delete(logistics::delete_schedule_event),
        )
        .route(
            "/api/camps/{id}/travel",
            get(logistics::list_travel).post(logistics::create_travel),
        )
        .route(
            "/api/travel/{id}",
            get(logistics::get_travel)
                .patch(logistics::update_travel)
                .delete(logistics::delete_travel),
        )
        .route(
            "/api/research",
            get(research::list_notes).post(research::create_note),
        )
        .route(
            "/api/research/{id}",
            get(research::get_note)
                .patch(research::update_note)
                .delete(research::delete_note),
        )
        .route("/api/mail/messages", post(mailbox::compose))
        .route("/api/mail/folders/{folder}", get(mailbox::list_folder))
        .route(
            "/api/mail/messages/{id}",
            get(mailbox::get_message).delete(mailbox::delete),
        )
        .route("/api/mail/messages/{id}/star", post(mailbox::star))
        .route("/api/mail/messages/{id}/unstar", post(mailbox::unstar))
        .route("/api/mail/messages/{id}/archive", post(mailbox::archive))
        .route("/api/mail/messages/{id}/restore", post(mailbox::restore))
        .route("/api/mail/summary", get(mailbox::summary))
        .route(
            "/api/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/users/{id}/visible-pages",
            put(users::set_visible_pages),
        )
        .route("/api/users/{id}/deactivate", post(users::deactivate_user))
        .route("/healthz", get(healthz))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

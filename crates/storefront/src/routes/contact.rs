//! Contact form route handlers.
//!
//! The form validates each field as the user leaves it and the whole form on
//! submit. Rejected submissions come back with status 200 so HTMX swaps the
//! re-rendered form (with messages) into place.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use corner_shop_core::{ContactField, ContactForm, FieldErrors, UnknownField};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::nav::{Layout, Page};
use crate::state::AppState;

/// Per-field messages; an empty string means the field is fine.
#[derive(Debug, Clone, Default)]
pub struct ContactErrorsView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl From<&FieldErrors> for ContactErrorsView {
    fn from(errors: &FieldErrors) -> Self {
        Self {
            name: errors.message(ContactField::Name),
            email: errors.message(ContactField::Email),
            phone: errors.message(ContactField::Phone),
            message: errors.message(ContactField::Message),
        }
    }
}

/// Contact form display data for templates.
#[derive(Debug, Clone, Default)]
pub struct ContactFormView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub errors: ContactErrorsView,
    /// Show the success notice (the fields are then blank).
    pub submitted: bool,
}

impl ContactFormView {
    /// Redisplay what the user typed alongside the rejection messages.
    fn rejected(form: ContactForm, errors: &FieldErrors) -> Self {
        Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            message: form.message,
            errors: ContactErrorsView::from(errors),
            submitted: false,
        }
    }

    fn submitted() -> Self {
        Self {
            submitted: true,
            ..Self::default()
        }
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/show.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub form: ContactFormView,
}

/// Contact form fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/contact_form.html")]
pub struct ContactFormTemplate {
    pub form: ContactFormView,
}

/// Single field message fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/field_error.html")]
pub struct FieldErrorTemplate {
    pub field: &'static str,
    pub message: String,
}

/// Display the contact page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(ContactTemplate {
        layout: Layout::new(Page::Contact, state.cart_count().await?),
        form: ContactFormView::default(),
    })
}

/// Handle a contact form submission (HTMX).
///
/// A valid request is appended to the request log and the form comes back
/// blank with the success notice. An invalid one comes back filled in with
/// a message under every rejected field and nothing is recorded.
#[instrument(skip(state, form))]
pub async fn submit(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Result<Response> {
    match form.validate(Utc::now()) {
        Ok(request) => {
            let email_domain = request.email.domain().to_owned();
            state
                .with_contacts(move |log| log.append(&request))
                .await??;
            tracing::debug!(%email_domain, "Contact form accepted");

            Ok(ContactFormTemplate {
                form: ContactFormView::submitted(),
            }
            .into_response())
        }
        Err(errors) => {
            tracing::debug!(
                fields = ?errors.fields().map(ContactField::as_str).collect::<Vec<_>>(),
                "Contact form rejected"
            );

            Ok(ContactFormTemplate {
                form: ContactFormView::rejected(form, &errors),
            }
            .into_response())
        }
    }
}

/// Validate a single field while the user types (HTMX).
///
/// Returns the message slot for that field, empty when the value is valid.
#[instrument(skip(form))]
pub async fn validate_field(
    Path(field): Path<String>,
    Form(form): Form<ContactForm>,
) -> Result<FieldErrorTemplate> {
    let field: ContactField = field
        .parse()
        .map_err(|e: UnknownField| AppError::NotFound(e.to_string()))?;

    let message = form
        .validate_field(field)
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default();

    Ok(FieldErrorTemplate {
        field: field.as_str(),
        message,
    })
}

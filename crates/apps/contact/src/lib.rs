//! Contact desktop app: form with inline validation and backend submission.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod form;

use std::rc::Rc;

use leptos::*;
use platform_host::{ContactService, HealthCheck};
use portfolio_contract::ContactField;

pub use form::{submit_form, ContactFormState, SubmitStatus};

fn field_dom_id(field: ContactField) -> String {
    format!("contact-field-{}", field.as_str())
}

fn health_class(health: Option<&HealthCheck>) -> &'static str {
    match health {
        None => "contact-health pending",
        Some(h) if h.online => "contact-health online",
        Some(_) => "contact-health offline",
    }
}

#[component]
/// Contact window body. Checks backend health on mount and submits through `service`.
pub fn ContactApp(
    /// Backend client used for the health check and submissions.
    service: Rc<dyn ContactService>,
) -> impl IntoView {
    let form = create_rw_signal(ContactFormState::default());
    let health = create_rw_signal(None::<HealthCheck>);

    {
        let service = service.clone();
        spawn_local(async move {
            let result = service.check_health().await;
            health.set(Some(result));
        });
    }

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let mut pending = None;
        form.update(|f| pending = f.prepare_submit());
        let Some(submission) = pending else {
            return;
        };
        let service = service.clone();
        spawn_local(async move {
            let outcome = service.submit_contact(&submission).await;
            if !outcome.success {
                logging::warn!("contact submission failed: {}", outcome.message);
            }
            form.update(|f| f.apply_outcome(outcome));
        });
    };

    let fields = ContactField::ALL
        .into_iter()
        .map(|field| {
            let dom_id = field_dom_id(field);
            let error_id = format!("{dom_id}-error");
            let value = move || form.with(|f| f.draft.value(field).to_string());
            let error = move || form.with(|f| f.error_for(field).map(str::to_string));
            let invalid = move || error().is_some().to_string();
            let on_input = move |ev: ev::Event| {
                let text = event_target_value(&ev);
                form.update(|f| f.set_field(field, text));
            };
            let on_blur = move |_| form.update(|f| f.touch_field(field));

            let control = if field == ContactField::Message {
                view! {
                    <textarea
                        id=dom_id.clone()
                        name=field.as_str()
                        rows="6"
                        aria-invalid=invalid
                        aria-describedby=error_id.clone()
                        prop:value=value
                        on:input=on_input
                        on:blur=on_blur
                    />
                }
                .into_view()
            } else {
                let input_type = if field == ContactField::Email { "email" } else { "text" };
                view! {
                    <input
                        id=dom_id.clone()
                        name=field.as_str()
                        type=input_type
                        aria-invalid=invalid
                        aria-describedby=error_id.clone()
                        prop:value=value
                        on:input=on_input
                        on:blur=on_blur
                    />
                }
                .into_view()
            };

            view! {
                <div class="contact-field">
                    <label for=dom_id>{field.label()}</label>
                    {control}
                    <p id=error_id class="contact-field-error" role="alert">
                        {move || error().unwrap_or_default()}
                    </p>
                </div>
            }
        })
        .collect_view();

    let status_line = move || {
        form.with(|f| match &f.status {
            SubmitStatus::Idle => None,
            SubmitStatus::Submitting => Some(("contact-status pending", "Sending...".to_string())),
            SubmitStatus::Sent(message) => Some(("contact-status sent", message.clone())),
            SubmitStatus::Failed(message) => Some(("contact-status failed", message.clone())),
        })
        .map(|(class, message)| view! { <p class=class role="status">{message}</p> })
    };

    view! {
        <div class="contact-app">
            <p class=move || health.with(|h| health_class(h.as_ref()))>
                {move || {
                    health.with(|h| {
                        h.as_ref()
                            .map(|h| h.message.clone())
                            .unwrap_or_else(|| "Checking server...".to_string())
                    })
                }}
            </p>
            <form class="contact-form" novalidate=true on:submit=on_submit>
                {fields}
                <button type="submit" disabled=move || form.with(|f| f.is_submitting())>
                    {move || {
                        if form.with(|f| f.is_submitting()) { "Sending..." } else { "Send message" }
                    }}
                </button>
            </form>
            {status_line}
        </div>
    }
}

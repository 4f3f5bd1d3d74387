use crate::{
    maud_conveniences::{form_element, form_submit_button, simple_form_element, title},
    state::RegistryState,
};
use axum::{
    extract::State,
    http::{HeaderMap, header::HOST},
};
use maud::{Markup, PreEscaped, html};

pub const PRODUCTION_API_BASE: &str = "https://student-app-dun.vercel.app";
pub const LOCAL_API_BASE: &str = "http://localhost:3000";

pub const COURSES: [&str; 5] = ["Science", "Math", "Arts", "Commerce", "CS"];
pub const DEFAULT_COURSE: &str = "Science";

// the form is submitted whatever the browser thinks of it, hence `novalidate` on the form
const AFTER_REQUEST: &str = r"
document.body.addEventListener('htmx:afterRequest', function (event) {
    const form = event.detail.elt;
    if (form.id !== 'registration_form') {
        return;
    }
    if (event.detail.successful) {
        alert('Student registered successfully!');
        form.reset();
    } else {
        alert('Registration failed. Please try again.');
    }
});
";

/// Deployed pages talk to the deployed API, everything else to a local dev server.
/// Without a host to go on, assume production.
pub fn api_base_for_host(host: Option<&str>) -> &'static str {
    match host {
        Some(host) => {
            let hostname = host.split(':').next().unwrap_or(host);
            if hostname.contains("vercel.app") {
                PRODUCTION_API_BASE
            } else {
                LOCAL_API_BASE
            }
        }
        None => PRODUCTION_API_BASE,
    }
}

pub async fn get_registration_form(State(state): State<RegistryState>, headers: HeaderMap) -> Markup {
    let host = headers.get(HOST).and_then(|value| value.to_str().ok());
    let api_base = api_base_for_host(host);

    state.render(html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
            (title("Student Registration"))
            form id="registration_form" novalidate hx-post={(api_base) "/api/student"} hx-ext="json-enc" hx-swap="none" class="p-4" {
                (simple_form_element("firstName", "First Name", true, None))
                (simple_form_element("lastName", "Last Name", true, None))
                (simple_form_element("email", "Email", true, Some("email")))
                (form_element("course", "Course", html! {
                    select id="course" name="course" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {
                        @for course in COURSES {
                            option value=(course) selected[course == DEFAULT_COURSE] {(course)}
                        }
                    }
                }))

                (form_submit_button(Some("Register")))
            }
            script { (PreEscaped(AFTER_REQUEST)) }
        }
    })
}

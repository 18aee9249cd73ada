//! Static HTML pages: consent landing page and the questionnaire form.

use axum::response::Html;

const LANDING: &str = include_str!("../assets/index.html");
const FORM: &str = include_str!("../assets/phq9.html");

/// `GET /`
pub async fn landing() -> Html<&'static str> { Html(LANDING) }

/// `GET /phq9`
pub async fn form() -> Html<&'static str> { Html(FORM) }

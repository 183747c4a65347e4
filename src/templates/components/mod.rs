use maud::{html, Markup};

pub mod error;

pub use error::{error_notice, html_error_response};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

mod app;
mod details;
mod gallery;
mod lightbox;
mod lists;
mod projects;

use gloo_console::warn;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use web_sys::{window, Document, Storage};

pub(crate) fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

pub(crate) fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

// Load failures degrade to `None`; callers substitute an empty collection or
// dictionary so one missing file never blocks another section's render.
pub(crate) async fn fetch_json<T: DeserializeOwned>(path: &str) -> Option<T> {
    let response = match Request::get(path).send().await {
        Ok(response) => response,
        Err(error) => {
            warn!(format!("failed to fetch {path}: {error}"));
            return None;
        }
    };
    if !response.ok() {
        warn!(format!("failed to fetch {path}: HTTP {}", response.status()));
        return None;
    }
    match response.json::<T>().await {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(format!("failed to parse {path}: {error}"));
            None
        }
    }
}

pub(crate) fn current_fragment_id() -> Option<String> {
    let hash = window()?.location().hash().ok()?;
    crate::nav::parse_fragment(&hash).map(ToString::to_string)
}

pub fn run() {
    yew::Renderer::<app::App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}

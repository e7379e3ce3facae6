//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and runs catalog fetches.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and resize event handling
//! - `navigation`: View switching, search, detail overlay, fetch orchestration

mod input;
mod navigation;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{AppModel, CatalogError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    pub(crate) fn format_error(error: &CatalogError) -> String {
        match error {
            CatalogError::Status { status, .. } if status.as_u16() == 401 => {
                "Catalog rejected the API key. Check TMDB_API_KEY.".to_string()
            }
            CatalogError::Status { status, .. } if status.as_u16() == 404 => {
                "Catalog endpoint not found.".to_string()
            }
            CatalogError::Status { status, .. } if status.as_u16() == 429 => {
                "Rate limited. Please wait a moment and press r.".to_string()
            }
            CatalogError::Transport { .. } => {
                "Could not reach the catalog. Press r to retry.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_errors_get_friendly_text() {
        let err = CatalogError::Status {
            endpoint: "movie/popular".into(),
            status: StatusCode::UNAUTHORIZED,
        };
        assert!(AppController::format_error(&err).contains("API key"));

        let err = CatalogError::Status {
            endpoint: "movie/popular".into(),
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(
            AppController::format_error(&err),
            "Error: movie/popular returned 502 Bad Gateway"
        );
    }
}

//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (feeds, items, UI state)
//! - `pagination`: Page index arithmetic for carousels
//! - `transition`: Per-carousel slide state machine
//! - `carousel`: A paginated row bound to one source
//! - `detail`: Overlay selection and resolution
//! - `navigation`: Locations and history
//! - `content`: All carousels plus history
//! - `catalog_client`: Remote catalog API client
//! - `app_model`: Main application model with state management methods

mod types;
mod pagination;
mod transition;
mod carousel;
mod detail;
mod navigation;
mod content;
mod catalog_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, Feed, Item, MediaKind, ResultSet, Source, UiState,
};

pub use pagination::Direction;

pub use transition::TransitionState;

pub use carousel::{Carousel, FeedState};

pub use detail::{layout_key, Selection};

pub use navigation::{Location, View};

pub use content::{ContentState, LoadRequest};

pub use catalog_client::{
    image_url, CatalogClient, CatalogError, CatalogSource, DEFAULT_API_BASE, DEFAULT_IMAGE_BASE,
};

pub use app_model::AppModel;

//! Rendering of the league catalog page: cards, the responsive grid and the
//! badge modal.
//!
//! Everything here produces [`text::Line`]s from plain data. Terminal state
//! and input live in [`crate::ui`].

pub mod cards;
pub mod colors;
pub mod layout;
pub mod loading_indicator;
pub mod modal;
pub mod page;
pub mod text;

pub use layout::{Direction, GridLayout, Rect, column_count, modal_rect};
pub use loading_indicator::LoadingIndicator;
pub use modal::{ModalPhase, ModalView};
pub use page::{
    BODY_TOP, PageView, body_height, catalog_listing, page_to_string, render_buffered,
    render_page,
};
pub use text::{Line, Span, Tone};

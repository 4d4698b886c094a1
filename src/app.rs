//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the state store, the
//! current screen, selection and dialog state.

mod model;

pub use model::*;

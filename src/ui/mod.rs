//! Terminal output for the CLI
//!
//! Styled with `console` when attached to a terminal, with plain `[OK]`
//! style prefixes in CI and when piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use kiln::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! ui::step_ok_detail(&ctx, "android-ndk r26d", "cached");
//! ui::step_warn_hint(&ctx, "No checksum declared", "Add sha256 to the manifest");
//! ```

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    key_value, remark, step_error, step_info, step_ok, step_ok_detail, step_warn, step_warn_hint,
};
pub use progress::transfer_bar;

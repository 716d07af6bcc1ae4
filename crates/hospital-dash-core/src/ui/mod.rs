//! Client-side UI mechanics: toasts, modals, routing, debouncing.

mod chrome;
mod debounce;
mod generation;
mod modal;
mod router;
mod toast;

pub use chrome::*;
pub use debounce::*;
pub use generation::*;
pub use modal::*;
pub use router::*;
pub use toast::*;

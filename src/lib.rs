// Herald - a typed, in-process publish/subscribe event service
//
// Components register handlers under integer event keys and broadcast zero to
// four typed values to them, without knowing about each other.

// Re-export core functionality
pub use herald_events::*;

// Re-export optional crates
#[cfg(feature = "keys")]
pub use herald_keys;

#[cfg(feature = "keys")]
pub use herald_keys::event_kinds;

#[cfg(feature = "log")]
pub use herald_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        EventKey, EventService, EventServiceBuilder, EventServiceConfig, EventServiceError,
        Handler, HandlerError, HandlerResult,
    };

    #[cfg(feature = "keys")]
    pub use crate::herald_keys::{EventKind, EventServiceExt};
}

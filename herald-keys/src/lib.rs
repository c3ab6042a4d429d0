//! Named event identifiers for Herald
//!
//! The event service only knows integer keys. This crate lets an application
//! describe its events as an enum and use the variants wherever a key is
//! expected. It does nothing beyond translating a name into an
//! [`EventKey`] and forwarding to [`EventService`].
//!
//! # Usage
//!
//! ```rust
//! use herald_keys::{event_kinds, EventKind, EventServiceExt};
//! use herald_events::{EventService, Handler};
//!
//! event_kinds! {
//!     /// Events raised by the game loop
//!     pub enum GameEvent {
//!         EnemyDied = 1,
//!         BoosterUsed = 2,
//!         ScreenTapped = 3,
//!     }
//! }
//!
//! let service = EventService::new();
//! let on_tap = Handler::new(|x: &f32, y: &f32| println!("tap at {}, {}", x, y));
//!
//! service.register_event(GameEvent::ScreenTapped, &on_tap);
//! service.broadcast_event(GameEvent::ScreenTapped, (100.0f32, 550.0f32)).unwrap();
//!
//! // Variants also convert straight into keys
//! assert_eq!(service.handler_count(GameEvent::ScreenTapped), 1);
//! assert_eq!(GameEvent::from_key(3.into()), Some(GameEvent::ScreenTapped));
//! ```

pub use herald_events::EventKey;

use herald_events::{EventService, Handler, Payload, Result};

/// A closed set of named events backed by integer keys
pub trait EventKind: Copy + Send + Sync + 'static {
    /// Every variant, in declaration order
    const ALL: &'static [Self];

    /// Integer key this name stands for
    fn key(self) -> EventKey;

    /// Variant name
    fn name(self) -> &'static str;

    /// Reverse lookup of a key
    fn from_key(key: EventKey) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.key() == key)
    }
}

/// Declare an enum of named events.
///
/// Variants may carry explicit discriminants; those become their keys.
/// The macro derives the usual traits and implements [`EventKind`],
/// `From<Enum> for EventKey` and `Display`.
#[macro_export]
macro_rules! event_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $value:expr)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $value)?
            ),+
        }

        impl $crate::EventKind for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn key(self) -> $crate::EventKey {
                $crate::EventKey::new(self as i32)
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::core::convert::From<$name> for $crate::EventKey {
            fn from(kind: $name) -> Self {
                $crate::EventKind::key(kind)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::EventKind::name(*self))
            }
        }
    };
}

/// Named-event forms of the [`EventService`] operations
pub trait EventServiceExt {
    /// [`EventService::register`] under a named event
    fn register_event<E, P>(&self, kind: E, handler: &Handler<P>)
    where
        E: EventKind,
        P: Payload;

    /// [`EventService::unregister`] under a named event
    fn unregister_event<E, P>(&self, kind: E, handler: &Handler<P>) -> bool
    where
        E: EventKind,
        P: Payload;

    /// [`EventService::broadcast`] under a named event
    fn broadcast_event<E, P>(&self, kind: E, payload: P) -> Result<()>
    where
        E: EventKind,
        P: Payload;
}

impl EventServiceExt for EventService {
    fn register_event<E, P>(&self, kind: E, handler: &Handler<P>)
    where
        E: EventKind,
        P: Payload,
    {
        self.register(kind.key(), handler);
    }

    fn unregister_event<E, P>(&self, kind: E, handler: &Handler<P>) -> bool
    where
        E: EventKind,
        P: Payload,
    {
        self.unregister(kind.key(), handler)
    }

    fn broadcast_event<E, P>(&self, kind: E, payload: P) -> Result<()>
    where
        E: EventKind,
        P: Payload,
    {
        self.broadcast(kind.key(), payload)
    }
}

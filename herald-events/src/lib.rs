//! Typed in-process event service for Herald
//!
//! This crate provides the event registry and dispatcher: components register
//! handlers under integer event keys, and any component broadcasts to a key
//! with zero to four payload values, without either side knowing the other.
//!
//! ## Features
//!
//! - **Integer keys** - Any `i32` is a valid [`EventKey`], no declaration needed
//! - **Typed payloads** - Handlers take `(A, B, ..)` by reference, up to four values
//! - **Checked dispatch** - A broadcast whose payload types differ from a
//!   handler's registration is reported as a [`EventServiceError::SignatureMismatch`]
//! - **Identity removal** - [`EventService::unregister`] removes one registration
//!   of exactly the handler passed in
//! - **Thread-safe** - Handlers run on a snapshot, so they may register,
//!   unregister or broadcast themselves
//!
//! ## Quick Start
//!
//! ```rust
//! use herald_events::{EventService, Handler};
//! use std::sync::{Arc, Mutex};
//!
//! let service = EventService::new();
//! let boosters = Arc::new(Mutex::new(Vec::new()));
//!
//! let seen = boosters.clone();
//! let on_booster = Handler::new(move |name: &String| {
//!     seen.lock().unwrap().push(name.clone());
//! });
//!
//! service.register(1, &on_booster);
//! service.broadcast(1, ("Potion".to_string(),)).unwrap();
//!
//! assert_eq!(*boosters.lock().unwrap(), vec!["Potion".to_string()]);
//!
//! service.unregister(1, &on_booster);
//! assert_eq!(service.handler_count(1), 0);
//! ```
//!
//! ## Process-wide Service
//!
//! ```rust,ignore
//! let events = EventService::instance();
//! events.register(3, &Handler::new(|x: &f32, y: &f32| println!("tap at {}, {}", x, y)));
//! events.broadcast(3, (100.0f32, 550.0f32))?;
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! let service = EventServiceBuilder::new()
//!     .continue_on_error(true)   // Run every handler even if one fails
//!     .enable_logging(false)     // No tracing output
//!     .build();
//!
//! // Or from a file / the environment
//! let config = EventServiceConfig::from_file("herald.toml")?;
//! let config = EventServiceConfig::from_env(); // HERALD_CONTINUE_ON_ERROR, HERALD_ENABLE_LOGGING
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! match service.broadcast(3, (100, 550)) {
//!     Ok(()) => println!("All handlers succeeded"),
//!     Err(EventServiceError::SignatureMismatch { expected, actual, .. }) => {
//!         eprintln!("handler wants {}, got {}", expected, actual);
//!     }
//!     Err(e) => eprintln!("Broadcast error: {}", e),
//! }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod key;
pub mod service;
pub mod signature;

pub use config::{EventServiceBuilder, EventServiceConfig};
pub use error::{ConfigError, EventServiceError, Result};
pub use handler::{Handler, HandlerError, HandlerId, HandlerOutput, HandlerResult, IntoHandler};
pub use key::EventKey;
pub use service::EventService;
pub use signature::{MAX_ARITY, Param, Payload, Signature};

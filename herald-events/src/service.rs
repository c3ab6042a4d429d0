//! Event registry and dispatcher

use crate::config::EventServiceConfig;
use crate::error::{EventServiceError, Result};
use crate::handler::{Handler, HandlerEntry, HandlerId};
use crate::key::EventKey;
use crate::signature::Payload;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, trace, warn};

/// Process-wide service, configured from the environment on first access.
static INSTANCE: Lazy<EventService> =
    Lazy::new(|| EventService::with_config(EventServiceConfig::from_env()));

/// Typed in-process event service.
///
/// Maps [`EventKey`]s to ordered lists of handlers. Handlers of any arity
/// from zero to four share one registry; each registration remembers its
/// payload [`Signature`](crate::Signature) so broadcasts can be checked
/// against it.
///
/// The service is thread-safe. Each operation is atomic with respect to the
/// others, and a broadcast works on a snapshot of the handler list taken when
/// it starts: handlers registered or removed while it runs (including by the
/// handlers themselves) only affect later broadcasts. Handlers run on the
/// broadcasting thread, in registration order, with no registry lock held.
#[derive(Clone)]
pub struct EventService {
    /// Handlers registered for each event key
    handlers: Arc<DashMap<EventKey, Vec<Arc<HandlerEntry>>>>,

    /// Source of registration ids
    next_id: Arc<AtomicU64>,

    /// Configuration
    config: Arc<EventServiceConfig>,
}

impl EventService {
    /// Create new event service
    pub fn new() -> Self {
        Self::with_config(EventServiceConfig::default())
    }

    /// Create event service with custom config
    pub fn with_config(config: EventServiceConfig) -> Self {
        Self {
            handlers: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            config: Arc::new(config),
        }
    }

    /// The process-wide event service.
    ///
    /// Created lazily on first call from [`EventServiceConfig::from_env`] and
    /// kept for the lifetime of the process.
    pub fn instance() -> &'static EventService {
        &INSTANCE
    }

    /// Active configuration
    pub fn config(&self) -> &EventServiceConfig {
        &self.config
    }

    /// Register a handler under `key`.
    ///
    /// The handler is appended to the key's list and will be invoked after
    /// every handler registered before it. Registering the same handler
    /// twice creates two registrations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use herald_events::{EventService, Handler};
    ///
    /// let service = EventService::new();
    /// let on_booster = Handler::new(|name: &String| println!("Booster used: {}", name));
    ///
    /// service.register(2, &on_booster);
    /// assert_eq!(service.handler_count(2), 1);
    /// ```
    pub fn register<K, P>(&self, key: K, handler: &Handler<P>)
    where
        K: Into<EventKey>,
        P: Payload,
    {
        let key = key.into();
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let entry = Arc::new(HandlerEntry::new(id, handler));

        if self.config.enable_logging {
            debug!(
                "Registered handler {} for event {} with signature {}",
                id, key, entry.signature
            );
        }

        self.handlers.entry(key).or_default().push(entry);
    }

    /// Remove one registration of `handler` from `key`.
    ///
    /// Only the first registration holding this handler (or a clone of it) is
    /// removed. Returns whether anything was removed; unregistering a handler
    /// that is not registered, or one whose signature differs from every
    /// registration under `key`, does nothing.
    pub fn unregister<K, P>(&self, key: K, handler: &Handler<P>) -> bool
    where
        K: Into<EventKey>,
        P: Payload,
    {
        let key = key.into();

        let removed = match self.handlers.get_mut(&key) {
            Some(mut entries) => entries
                .iter()
                .position(|entry| entry.holds(handler))
                .map(|index| entries.remove(index)),
            None => None,
        };

        let Some(entry) = removed else {
            if self.config.enable_logging {
                trace!("No matching handler to unregister for event {}", key);
            }
            return false;
        };

        // Keys without handlers are not kept around
        self.handlers.remove_if(&key, |_, entries| entries.is_empty());

        if self.config.enable_logging {
            debug!("Unregistered handler {} from event {}", entry.id, key);
        }

        true
    }

    /// Broadcast `payload` to every handler registered under `key`.
    ///
    /// Handlers run in registration order. A handler registered with a
    /// different signature is never invoked; it is reported as
    /// [`EventServiceError::SignatureMismatch`] once the remaining handlers
    /// have run. A handler returning an error stops the broadcast unless
    /// `continue_on_error` is set, in which case every handler is attempted.
    /// All recorded failures are returned; more than one is wrapped in
    /// [`EventServiceError::BroadcastFailed`].
    ///
    /// Broadcasting a key with no handlers does nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use herald_events::{EventService, Handler};
    ///
    /// let service = EventService::new();
    /// let on_tap = Handler::new(|x: &f32, y: &f32| println!("Screen tapped at {}, {}", x, y));
    /// service.register(3, &on_tap);
    ///
    /// service.broadcast(3, (100.0f32, 550.0f32)).unwrap();
    ///
    /// // Wrong payload types are reported, not silently dropped
    /// assert!(service.broadcast(3, (100, 550)).is_err());
    /// ```
    pub fn broadcast<K, P>(&self, key: K, payload: P) -> Result<()>
    where
        K: Into<EventKey>,
        P: Payload,
    {
        let key = key.into();

        let snapshot = match self.handlers.get(&key) {
            Some(entries) => entries.value().clone(),
            None => {
                if self.config.enable_logging {
                    trace!("No handlers registered for event {}", key);
                }
                return Ok(());
            }
        };

        let actual = P::signature();

        if self.config.enable_logging {
            trace!(
                "Broadcasting event {} with signature {} to {} handlers",
                key,
                actual,
                snapshot.len()
            );
        }

        let mut failures = Vec::new();

        for entry in &snapshot {
            let Some(handler) = entry.typed::<P>(&actual) else {
                if self.config.enable_logging {
                    warn!(
                        "Handler {} for event {} expects {}, broadcast supplied {}",
                        entry.id, key, entry.signature, actual
                    );
                }
                failures.push(EventServiceError::SignatureMismatch {
                    key,
                    handler: entry.id,
                    expected: entry.signature.clone(),
                    actual: actual.clone(),
                });
                continue;
            };

            if let Err(source) = handler.call(&payload) {
                if self.config.enable_logging {
                    error!("Handler {} for event {} failed: {}", entry.id, key, source);
                }
                failures.push(EventServiceError::HandlerFailed {
                    key,
                    handler: entry.id,
                    source,
                });
                if !self.config.continue_on_error {
                    break;
                }
            }
        }

        EventServiceError::collect(key, failures)
    }

    /// Remove every handler registered under `key`, returning how many were removed
    pub fn unregister_all<K: Into<EventKey>>(&self, key: K) -> usize {
        let key = key.into();
        let removed = self
            .handlers
            .remove(&key)
            .map(|(_, entries)| entries.len())
            .unwrap_or(0);

        if self.config.enable_logging && removed > 0 {
            debug!("Unregistered all {} handlers for event {}", removed, key);
        }

        removed
    }

    /// Clear all handlers
    pub fn clear(&self) {
        self.handlers.clear();
        if self.config.enable_logging {
            debug!("Cleared all event handlers");
        }
    }

    /// Get handler count for an event key
    pub fn handler_count<K: Into<EventKey>>(&self, key: K) -> usize {
        self.handlers
            .get(&key.into())
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Whether any handler is registered under `key`
    pub fn has_handlers<K: Into<EventKey>>(&self, key: K) -> bool {
        self.handler_count(key) > 0
    }

    /// Whether `handler` (or a clone of it) is registered under `key`
    pub fn contains<K, P>(&self, key: K, handler: &Handler<P>) -> bool
    where
        K: Into<EventKey>,
        P: Payload,
    {
        self.handlers
            .get(&key.into())
            .is_some_and(|entries| entries.iter().any(|entry| entry.holds(handler)))
    }

    /// Keys that currently have handlers, in ascending order
    pub fn keys(&self) -> Vec<EventKey> {
        let mut keys: Vec<EventKey> = self.handlers.iter().map(|entry| *entry.key()).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for EventService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService")
            .field("keys", &self.keys())
            .field("config", &self.config)
            .finish()
    }
}

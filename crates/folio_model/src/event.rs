//! Change events and the observer registry that delivers them.

use crate::error::ObserverError;
use crate::file_model::FileModel;
use folio_source::UidDefinition;
use std::fmt;

/// An event a [`FileModel`] publishes to its observers.
pub trait ModelEvent {
    /// Name used when logging delivery failures.
    const NAME: &'static str;
}

/// The document's base directory or relative path changed.
///
/// Carries no payload: observers re-read [`FileModel::identity`] for the new
/// value. Previous values are not surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentityChanged;

impl ModelEvent for IdentityChanged {
    const NAME: &'static str = "identity_changed";
}

/// The set of uids a document exports was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UidsChanged {
    /// Name of the property that changed.
    pub property: &'static str,
    /// The exported uids before the change.
    pub original: Vec<UidDefinition>,
    /// The exported uids after the change.
    pub current: Vec<UidDefinition>,
}

impl ModelEvent for UidsChanged {
    const NAME: &'static str = "uids_changed";
}

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Returns the raw value of this id.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}

/// An observer that returned an error during delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverFailure {
    /// The failing observer.
    pub observer: ObserverId,
    /// Name of the event being delivered.
    pub event: &'static str,
    /// The error the observer returned.
    pub error: ObserverError,
}

/// Outcome of delivering one event to every registered observer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Number of observers invoked, including ones that failed.
    pub delivered: usize,
    /// Observers that returned an error, in delivery order.
    pub failures: Vec<ObserverFailure>,
}

impl Dispatch {
    /// Returns `true` if no observer failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

type Callback<C, E> = Box<dyn Fn(&FileModel<C>, &E) -> Result<(), ObserverError> + Send + Sync>;

/// Ordered registry of callbacks for one event type.
///
/// Callbacks run synchronously in registration order. Each one sees the model
/// after the mutation has been applied.
pub struct Observers<C, E> {
    next_id: u64,
    entries: Vec<(ObserverId, Callback<C, E>)>,
}

impl<C, E: ModelEvent> Observers<C, E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Registers a callback and returns its handle.
    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&FileModel<C>, &E) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Returns the number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every callback.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Delivers `event` to every callback in registration order.
    ///
    /// A failing callback is logged and recorded; the remaining callbacks
    /// still run.
    pub(crate) fn notify(&self, model: &FileModel<C>, event: &E) -> Dispatch {
        let mut dispatch = Dispatch::default();
        for (id, callback) in &self.entries {
            dispatch.delivered += 1;
            if let Err(error) = callback(model, event) {
                tracing::warn!(
                    key = %model.key(),
                    observer = %id,
                    event = E::NAME,
                    %error,
                    "observer failed"
                );
                dispatch.failures.push(ObserverFailure {
                    observer: *id,
                    event: E::NAME,
                    error,
                });
            }
        }
        dispatch
    }
}

impl<C, E: ModelEvent> Default for Observers<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> fmt::Debug for Observers<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish()
    }
}

use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// Dashboard-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Common dashboard events
pub mod events {
    use super::Event;
    use crate::selection::SelectionSlot;

    /// A table was fetched and accepted by the store
    #[derive(Debug, Clone)]
    pub struct TableLoaded {
        pub source_name: String,
        pub row_count: usize,
        pub patient_count: usize,
        pub variable_count: usize,
    }

    /// Fetching or accepting a table failed
    #[derive(Debug, Clone)]
    pub struct DataSourceError {
        pub source_name: String,
        pub error: String,
    }

    /// One selection slot changed value
    #[derive(Debug, Clone)]
    pub struct SelectionChanged {
        pub slot: SelectionSlot,
    }

    /// A new image was loaded into the pipeline
    #[derive(Debug, Clone)]
    pub struct ImageLoaded {
        pub width: usize,
        pub height: usize,
        pub channels: usize,
    }

    /// The working image changed form
    #[derive(Debug, Clone)]
    pub struct ImageTransformed {
        pub kind: String,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        TableLoaded,
        DataSourceError,
        SelectionChanged,
        ImageLoaded,
        ImageTransformed
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::events::{TableLoaded, DataSourceError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_publish_reaches_typed_subscribers_only() {
        let bus = EventBus::new();
        let loaded = Arc::new(AtomicUsize::new(0));
        let counter = loaded.clone();

        bus.subscribe::<TableLoaded>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<TableLoaded>() {
                counter.fetch_add(e.row_count, Ordering::SeqCst);
            }
        }));

        bus.publish(TableLoaded {
            source_name: "vitals.db".to_string(),
            row_count: 12,
            patient_count: 3,
            variable_count: 4,
        });
        bus.publish(DataSourceError {
            source_name: "vitals.db".to_string(),
            error: "connection refused".to_string(),
        });

        assert_eq!(loaded.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::default();
        bus.publish(DataSourceError {
            source_name: "x".to_string(),
            error: "y".to_string(),
        });
    }
}

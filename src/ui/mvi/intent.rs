/// Marker trait for intent objects.
///
/// Intents are either user edits (typing into a form field) or API outcomes
/// delivered by the worker.
pub trait Intent: Send + 'static {}

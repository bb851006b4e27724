//! Alert sink seam.
//!
//! The engine signals zero-crossings through completion events; it never
//! plays audio itself. Frontends supply an `AlertSink` and call it when
//! they see an alert event.

/// Destination for audible alerts.
pub trait AlertSink {
    /// Play the alert once. Called at each zero-crossing.
    fn play(&mut self);

    /// Stop playback and rewind to the beginning. Called on reset.
    fn rewind(&mut self);
}

/// Sink that swallows alerts. For headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAlert;

impl AlertSink for NullAlert {
    fn play(&mut self) {}
    fn rewind(&mut self) {}
}

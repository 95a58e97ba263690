use super::{Sink, SinkError};
use std::fmt;

/// Handler receiving each rendered text blob.
///
/// Registered at configuration time as a concrete closure; there is no
/// name-based lookup and no call-time validation.
pub type SinkFn = Box<dyn FnMut(&str)>;

/// Hands rendered text to a registered closure.
pub struct CallbackSink {
    handler: SinkFn,
}

impl CallbackSink {
    pub fn new(handler: SinkFn) -> Self {
        Self { handler }
    }
}

impl Sink for CallbackSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        (self.handler)(text);
        Ok(())
    }
}

impl fmt::Debug for CallbackSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSink").finish_non_exhaustive()
    }
}

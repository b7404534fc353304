use std::sync::mpsc::Sender;

/// Receives candidate actions as soon as a search produces them.
/// The most recent value received before the search is cut off is the committed move.
pub trait ActionSink<A> {
    fn put(&mut self, action: A);
}

/// Keeps only the most recently received action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastAction<A>(pub Option<A>);

impl<A> Default for LastAction<A> {
    fn default() -> Self {
        Self(None)
    }
}

impl<A> LastAction<A> {
    #[inline]
    pub fn get(&self) -> Option<&A> {
        self.0.as_ref()
    }

    #[inline]
    pub fn into_inner(self) -> Option<A> {
        self.0
    }
}

impl<A> ActionSink<A> for LastAction<A> {
    #[inline]
    fn put(&mut self, action: A) {
        self.0 = Some(action);
    }
}

impl<A> ActionSink<A> for Vec<A> {
    #[inline]
    fn put(&mut self, action: A) {
        self.push(action);
    }
}

/// The receiving end may already have stopped listening once its timer expired.
impl<A> ActionSink<A> for Sender<A> {
    #[inline]
    fn put(&mut self, action: A) {
        let _ = self.send(action);
    }
}

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::Completion;

struct Inner {
    remaining: Cell<usize>,
    abandoned: Cell<bool>,
    on_zero: RefCell<Option<Completion>>,
    on_abandon: RefCell<Option<Completion>>,
}

/// Collapses `n` per-item completions into a single callback.
///
/// The callback runs exactly once, when the last outstanding completion is released. A latch
/// created with `n == 0` fires immediately.
///
/// A completion from [`CompletionLatch::completion`] that is dropped without being called
/// abandons the latch: the batch can no longer finish, so `on_zero` is dropped unrun and the
/// [`CompletionLatch::on_abandon`] callback runs instead. Exactly one of the two ever runs.
///
/// Cloning a latch shares the same counter.
#[derive(Clone)]
pub struct CompletionLatch {
    inner: Rc<Inner>,
}

impl CompletionLatch {
    pub fn new(count: usize, on_zero: Option<Completion>) -> Self {
        let latch = Self {
            inner: Rc::new(Inner {
                remaining: Cell::new(count),
                abandoned: Cell::new(false),
                on_zero: RefCell::new(on_zero),
                on_abandon: RefCell::new(None),
            }),
        };
        if count == 0 {
            latch.fire();
        }
        latch
    }

    /// Sets the callback run if the latch is abandoned before it is released.
    pub fn on_abandon(self, f: Completion) -> Self {
        if !self.is_released() && !self.is_abandoned() {
            *self.inner.on_abandon.borrow_mut() = Some(f);
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining.get()
    }

    pub fn is_released(&self) -> bool {
        self.remaining() == 0
    }

    pub fn is_abandoned(&self) -> bool {
        self.inner.abandoned.get()
    }

    /// Releases one outstanding completion.
    ///
    /// Releasing an already-released latch is a host contract violation; it is ignored.
    pub fn count_down(&self) {
        if self.is_abandoned() {
            ftrace!("CompletionLatch: count_down after abandon");
            return;
        }
        let remaining = self.inner.remaining.get();
        if remaining == 0 {
            fwarn!("CompletionLatch: count_down after release");
            debug_assert!(remaining > 0, "CompletionLatch: count_down after release");
            return;
        }
        let next = remaining - 1;
        self.inner.remaining.set(next);
        ftrace!(remaining = next, "CompletionLatch::count_down");
        if next == 0 {
            self.fire();
        }
    }

    /// Gives up on the outstanding completions. No-op once released or abandoned.
    pub fn abandon(&self) {
        if self.is_released() || self.is_abandoned() {
            return;
        }
        self.inner.abandoned.set(true);
        fdebug!(remaining = self.remaining(), "CompletionLatch::abandon");
        let on_zero = self.inner.on_zero.borrow_mut().take();
        drop(on_zero);
        let on_abandon = self.inner.on_abandon.borrow_mut().take();
        if let Some(f) = on_abandon {
            f();
        }
    }

    /// A one-shot completion that counts this latch down when invoked, and abandons it if
    /// dropped uncalled.
    pub fn completion(&self) -> Completion {
        let pending = Pending(Some(self.clone()));
        Box::new(move || pending.release())
    }

    fn fire(&self) {
        let on_abandon = self.inner.on_abandon.borrow_mut().take();
        drop(on_abandon);
        // Take the callback out before running it so it can freely touch this latch.
        let on_zero = self.inner.on_zero.borrow_mut().take();
        if let Some(f) = on_zero {
            f();
        }
    }
}

/// One outstanding completion of a latch.
struct Pending(Option<CompletionLatch>);

impl Pending {
    fn release(mut self) {
        if let Some(latch) = self.0.take() {
            latch.count_down();
        }
    }
}

impl Drop for Pending {
    fn drop(&mut self) {
        if let Some(latch) = self.0.take() {
            latch.abandon();
        }
    }
}

impl fmt::Debug for CompletionLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionLatch")
            .field("remaining", &self.remaining())
            .field("abandoned", &self.is_abandoned())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<u32>>, Completion) {
        let fired = Rc::new(Cell::new(0u32));
        let f = Rc::clone(&fired);
        let cb: Completion = Box::new(move || f.set(f.get() + 1));
        (fired, cb)
    }

    #[test]
    fn zero_count_fires_on_construction() {
        let (fired, cb) = counter();
        let latch = CompletionLatch::new(0, Some(cb));
        assert_eq!(fired.get(), 1);
        assert!(latch.is_released());
    }

    #[test]
    fn fires_once_after_last_completion() {
        let (fired, cb) = counter();
        let latch = CompletionLatch::new(3, Some(cb));
        let completions: alloc::vec::Vec<_> = (0..3).map(|_| latch.completion()).collect();
        drop(latch);

        for (i, c) in completions.into_iter().enumerate() {
            assert_eq!(fired.get(), 0, "fired early at completion {i}");
            c();
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn dropped_completion_abandons_instead_of_firing() {
        let (fired, cb) = counter();
        let (abandoned, on_abandon) = counter();
        let latch = CompletionLatch::new(3, Some(cb)).on_abandon(on_abandon);
        let mut completions: alloc::vec::Vec<_> = (0..3).map(|_| latch.completion()).collect();

        let first = completions.remove(0);
        first();
        assert_eq!(latch.remaining(), 2);

        drop(completions.pop());
        assert!(latch.is_abandoned());
        assert_eq!(abandoned.get(), 1);

        // The survivor still runs, but the batch can no longer complete.
        for c in completions {
            c();
        }
        drop(latch);
        assert_eq!(fired.get(), 0);
        assert_eq!(abandoned.get(), 1);
    }

    #[test]
    fn released_latch_ignores_late_abandon() {
        let (fired, cb) = counter();
        let (abandoned, on_abandon) = counter();
        let latch = CompletionLatch::new(1, Some(cb)).on_abandon(on_abandon);
        let c = latch.completion();
        c();
        latch.abandon();
        assert_eq!((fired.get(), abandoned.get()), (1, 0));
        assert!(!latch.is_abandoned());
    }

    #[test]
    fn missing_callback_is_fine() {
        let latch = CompletionLatch::new(2, None);
        latch.count_down();
        latch.count_down();
        assert!(latch.is_released());
    }
}

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::{
    AnimationDescriptor, AnimationDuration, AnimationPlan, Animator, BusyPolicy, CellAnimation,
    Completion, CompletionLatch, FlipError, FlipOptions, ItemPosition, ListView, Scope,
    TableAnimation, resolve_targets,
};

/// Runs batch transitions over a list view.
///
/// The flipper does not hold the list. Callers pass it to each operation; the flipper only
/// asks it which rows are visible and for their display handles. The host animator is owned,
/// so adapters reach it through [`Flipper::animator_mut`] to drive their frame loop.
///
/// One batch at a time: with the default [`BusyPolicy::Reject`], `run` refuses to start while a
/// previous batch still has outstanding completions. A batch whose host drops a per-item
/// completion without calling it is abandoned: its callback never runs and the flipper is free
/// again.
pub struct Flipper<A> {
    animator: A,
    options: FlipOptions,
    /// Batches with outstanding completions.
    pub(crate) in_flight: Rc<Cell<usize>>,
}

impl<A: Animator> Flipper<A> {
    pub fn new(animator: A) -> Self {
        Self::with_options(animator, FlipOptions::default())
    }

    pub fn with_options(animator: A, options: FlipOptions) -> Self {
        Self {
            animator,
            options,
            in_flight: Rc::new(Cell::new(0)),
        }
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn into_animator(self) -> A {
        self.animator
    }

    pub fn options(&self) -> &FlipOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FlipOptions) {
        self.options = options;
    }

    /// Whether a batch still has outstanding completions.
    pub fn is_busy(&self) -> bool {
        self.in_flight.get() > 0
    }

    /// Animates the list container as a whole.
    pub fn animate_table<L>(
        &mut self,
        list: &L,
        animation: TableAnimation,
        on_complete: Option<Completion>,
    ) -> Result<(), FlipError>
    where
        L: ListView<Handle = A::Target> + ?Sized,
    {
        self.run(list, &animation.into(), None, on_complete)
    }

    /// Animates the visible rows, optionally only those listed in `positions`.
    pub fn animate_cells<L>(
        &mut self,
        list: &L,
        animation: CellAnimation,
        positions: Option<&[ItemPosition]>,
        on_complete: Option<Completion>,
    ) -> Result<(), FlipError>
    where
        L: ListView<Handle = A::Target> + ?Sized,
    {
        self.run(list, &animation.into(), positions, on_complete)
    }

    /// Starts one batch.
    ///
    /// Returns once every per-item animation has been issued. `on_complete` runs exactly once,
    /// after the last of them reports completion; if nothing is targeted it runs before `run`
    /// returns. `positions` only applies to cell scope.
    ///
    /// On `Err`, nothing is issued and `on_complete` is dropped without ever being called.
    pub fn run<L>(
        &mut self,
        list: &L,
        descriptor: &AnimationDescriptor,
        positions: Option<&[ItemPosition]>,
        on_complete: Option<Completion>,
    ) -> Result<(), FlipError>
    where
        L: ListView<Handle = A::Target> + ?Sized,
    {
        self.check_idle()?;

        let targets: Vec<_> = match descriptor.scope() {
            Scope::Table => {
                let container = list.container_handle();
                Vec::from([(container, list.container_size())])
            }
            Scope::Cell => resolve_targets(list, positions)
                .into_iter()
                .map(|(_, handle)| {
                    let size = list.item_size(&handle);
                    (handle, size)
                })
                .collect(),
        };

        let plan = AnimationPlan::build(descriptor, targets, &self.options);
        fdebug!(
            scope = ?descriptor.scope(),
            count = plan.len(),
            staggered = descriptor.is_staggered(),
            "Flipper::run"
        );

        if plan.is_empty() {
            if let Some(f) = on_complete {
                f();
            }
            return Ok(());
        }

        self.in_flight.set(self.in_flight.get() + 1);
        let in_flight = Rc::clone(&self.in_flight);
        let abandoned = Rc::clone(&self.in_flight);
        let latch = CompletionLatch::new(
            plan.len(),
            Some(Box::new(move || {
                in_flight.set(in_flight.get().saturating_sub(1));
                if let Some(f) = on_complete {
                    f();
                }
            })),
        )
        .on_abandon(Box::new(move || {
            fwarn!("Flipper::run: batch abandoned by the host");
            abandoned.set(abandoned.get().saturating_sub(1));
        }));

        for step in plan.into_steps() {
            ftrace!(
                delay_secs = step.timing.delay_secs,
                damping = step.timing.damping_ratio,
                "Flipper::run: issue"
            );
            self.animator.set_immediate_state(&step.target, step.from);
            self.animator
                .animate(&step.target, step.to, step.timing, latch.completion());
        }
        Ok(())
    }

    /// Reloads the list's data.
    ///
    /// With `smoothly`, host animations are suspended for the reload and an empty update bracket,
    /// which suppresses the default row flash; the previous setting is restored afterwards.
    pub fn reload<L>(&mut self, list: &mut L, smoothly: bool, on_complete: Option<Completion>)
    where
        L: ListView + ?Sized,
    {
        if smoothly {
            fdebug!("Flipper::reload: smooth");
            let _suspended = AnimationsSuspended::new(&mut self.animator);
            list.reload_data();
            list.begin_updates();
            list.end_updates();
        } else {
            list.reload_data();
        }

        if let Some(f) = on_complete {
            f();
        }
    }

    /// Reloads the list's data, then fades the whole container in.
    ///
    /// Busy rejection happens before the reload, so an `Err` leaves the list untouched and drops
    /// `on_complete` unrun.
    pub fn reload_with_fade<L>(
        &mut self,
        list: &mut L,
        duration: AnimationDuration,
        on_complete: Option<Completion>,
    ) -> Result<(), FlipError>
    where
        L: ListView<Handle = A::Target> + ?Sized,
    {
        self.check_idle()?;
        list.reload_data();
        self.run(&*list, &TableAnimation::Fade(duration).into(), None, on_complete)
    }

    fn check_idle(&self) -> Result<(), FlipError> {
        if self.is_busy() && self.options.busy_policy == BusyPolicy::Reject {
            fwarn!("Flipper: rejected, a batch is still in flight");
            return Err(FlipError::Busy);
        }
        Ok(())
    }
}

impl<A: core::fmt::Debug> core::fmt::Debug for Flipper<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Flipper")
            .field("animator", &self.animator)
            .field("options", &self.options)
            .field("in_flight", &self.in_flight.get())
            .finish()
    }
}

/// Disables host animations until dropped, then restores the previous setting.
pub struct AnimationsSuspended<'a, A: Animator> {
    animator: &'a mut A,
    was_enabled: bool,
}

impl<'a, A: Animator> AnimationsSuspended<'a, A> {
    pub fn new(animator: &'a mut A) -> Self {
        let was_enabled = animator.animations_enabled();
        animator.set_animations_enabled(false);
        Self {
            animator,
            was_enabled,
        }
    }
}

impl<A: Animator> Drop for AnimationsSuspended<'_, A> {
    fn drop(&mut self) {
        self.animator.set_animations_enabled(self.was_enabled);
    }
}

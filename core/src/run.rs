//! Run a [`CssAnimation`] on an element and know when it's really done.
//!
//! An animation is done when the element dispatches its animation-end event,
//! or, because some animations never dispatch it, when its computed
//! `animation-duration` plus a grace margin elapsed. Whichever comes first
//! wins, the other one is detached.
//!
//! ```
//! use cssanim_core::prelude::*;
//!
//! async fn shake<E: AnimationTarget>(el: &E) -> Result<(), AnimateError> {
//!   animate(el, "shake", false).await
//! }
//! ```

use std::{
  fmt,
  future::{Future, IntoFuture},
  pin::Pin,
  task::{Context, Poll, ready},
  time::Duration,
};

use futures::{FutureExt, channel::oneshot, future::LocalBoxFuture};

use crate::{
  animation::{AnimationInput, CssAnimation},
  config::DEFAULT_GRACE,
  duration::computed_duration,
  error::AnimateError,
  scheduler,
  target::AnimationTarget,
};

/// Create an animation of `el`, nothing happens until it's run.
///
/// If `synchronous` is true, the end action is performed right after the
/// start action and the run completes as soon as it's polled. This is mostly
/// useful in tests, when you don't want animations to take any time.
pub fn animate<E: AnimationTarget>(
  el: &E, animation: impl Into<AnimationInput<E>>, synchronous: bool,
) -> Animation<E> {
  Animation {
    element: el.clone(),
    animation: animation.into().resolve(),
    synchronous,
    grace: DEFAULT_GRACE,
  }
}

/// A lazy handle of an animation on an element.
///
/// Every call of [`Animation::run`] creates a new independent run, which plays
/// the whole animation again.
pub struct Animation<E> {
  element: E,
  animation: CssAnimation<E>,
  synchronous: bool,
  grace: Duration,
}

impl<E: AnimationTarget> Animation<E> {
  /// Change how long after the computed animation duration the animation is
  /// considered done if no animation-end event was dispatched.
  pub fn with_grace(mut self, grace: Duration) -> Self {
    self.grace = grace;
    self
  }

  pub fn element(&self) -> &E { &self.element }

  pub fn is_synchronous(&self) -> bool { self.synchronous }

  pub fn grace(&self) -> Duration { self.grace }

  /// Create a new run of this animation. The start action is performed when the
  /// run is polled for the first time.
  pub fn run(&self) -> AnimationRun<E> {
    AnimationRun { animation: self.clone(), state: RunState::Idle }
  }
}

impl<E: AnimationTarget> Clone for Animation<E> {
  fn clone(&self) -> Self {
    Self {
      element: self.element.clone(),
      animation: self.animation.clone(),
      synchronous: self.synchronous,
      grace: self.grace,
    }
  }
}

impl<E: AnimationTarget + fmt::Debug> fmt::Debug for Animation<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Animation")
      .field("element", &self.element)
      .field("animation", &self.animation)
      .field("synchronous", &self.synchronous)
      .field("grace", &self.grace)
      .finish()
  }
}

impl<E: AnimationTarget> IntoFuture for Animation<E> {
  type Output = Result<(), AnimateError>;
  type IntoFuture = AnimationRun<E>;

  fn into_future(self) -> Self::IntoFuture { AnimationRun { animation: self, state: RunState::Idle } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
  /// Not polled yet, nothing happened on the element.
  Idle,
  /// Started, waiting for the animation-end event or the timeout.
  Running,
  /// The end action was performed because the animation is done.
  Finished,
  /// The run was cancelled, the end action was performed if it had started.
  Cancelled,
}

/// A single run of an [`Animation`].
///
/// Resolves once the end action was performed. Dropping or
/// [cancelling](AnimationRun::cancel) a running run detaches everything it
/// waits for and still performs the end action, so the element is never left
/// in the middle of an animation.
pub struct AnimationRun<E: AnimationTarget> {
  animation: Animation<E>,
  state: RunState<E>,
}

enum RunState<E: AnimationTarget> {
  Idle,
  Running(Race<E>),
  Done { cancelled: bool },
}

/// The animation-end event of the element racing against the timeout.
struct Race<E: AnimationTarget> {
  timeout: LocalBoxFuture<'static, ()>,
  /// `None` once the listener went away without an animation-end event, only
  /// the timeout is left then.
  ended: Option<oneshot::Receiver<()>>,
  _listener: E::Listener,
}

#[derive(Debug, Clone, Copy)]
enum Winner {
  AnimationEnd,
  Timeout,
}

impl<E: AnimationTarget> Race<E> {
  fn poll_winner(&mut self, cx: &mut Context<'_>) -> Poll<Winner> {
    if let Some(ended) = self.ended.as_mut() {
      match ended.poll_unpin(cx) {
        Poll::Ready(Ok(())) => return Poll::Ready(Winner::AnimationEnd),
        Poll::Ready(Err(oneshot::Canceled)) => self.ended = None,
        Poll::Pending => {}
      }
    }
    self
      .timeout
      .poll_unpin(cx)
      .map(|_| Winner::Timeout)
  }
}

impl<E: AnimationTarget> AnimationRun<E> {
  pub fn status(&self) -> RunStatus {
    match self.state {
      RunState::Idle => RunStatus::Idle,
      RunState::Running(_) => RunStatus::Running,
      RunState::Done { cancelled: false } => RunStatus::Finished,
      RunState::Done { cancelled: true } => RunStatus::Cancelled,
    }
  }

  /// Cancel the run. If the animation is running, what it waits for is
  /// detached and the end action is performed.
  ///
  /// Polling a cancelled run resolves to [`AnimateError::Cancelled`].
  pub fn cancel(&mut self) -> Result<(), AnimateError> {
    match self.state {
      RunState::Idle => {
        self.state = RunState::Done { cancelled: true };
        Ok(())
      }
      RunState::Running(_) => {
        log::debug!("cancel a running animation.");
        self.settle(true)
      }
      RunState::Done { .. } => Ok(()),
    }
  }

  /// Perform the start action and arm the race. Return the result if the run
  /// is already over.
  fn activate(&mut self) -> Option<Result<(), AnimateError>> {
    let Animation { element, animation, synchronous, grace } = &self.animation;
    if let Err(err) = animation.start(element) {
      self.state = RunState::Done { cancelled: false };
      return Some(Err(AnimateError::Start(err)));
    }

    if *synchronous {
      self.state = RunState::Done { cancelled: false };
      return Some(animation.end(element).map_err(AnimateError::End));
    }

    let delay = computed_duration(element).saturating_add(*grace);
    let (sender, receiver) = oneshot::channel();
    let mut sender = Some(sender);
    let target = element.clone();
    let listener = element.listen_animation_end(Box::new(move |event: &E::Event| {
      if target.is_event_target(event)
        && let Some(sender) = sender.take()
      {
        let _ = sender.send(());
      }
    }));
    log::debug!("animation started, time out in {delay:?}.");

    self.state = RunState::Running(Race {
      timeout: scheduler::timer(delay),
      ended: Some(receiver),
      _listener: listener,
    });
    None
  }

  /// Leave the running state and perform the end action. The only way out of
  /// `Running`.
  fn settle(&mut self, cancelled: bool) -> Result<(), AnimateError> {
    let race = std::mem::replace(&mut self.state, RunState::Done { cancelled });
    // Detach the listener and the timer before the end action.
    drop(race);
    let Animation { element, animation, .. } = &self.animation;
    animation.end(element).map_err(AnimateError::End)
  }
}

impl<E: AnimationTarget> Unpin for AnimationRun<E> {}

impl<E: AnimationTarget> Future for AnimationRun<E> {
  type Output = Result<(), AnimateError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let this = self.get_mut();
    if let RunState::Idle = this.state
      && let Some(res) = this.activate()
    {
      return Poll::Ready(res);
    }

    match &mut this.state {
      RunState::Running(race) => {
        let winner = ready!(race.poll_winner(cx));
        log::trace!("animation done by {winner:?}.");
        Poll::Ready(this.settle(false))
      }
      RunState::Done { cancelled: true } => Poll::Ready(Err(AnimateError::Cancelled)),
      RunState::Idle | RunState::Done { cancelled: false } => {
        panic!("`AnimationRun` polled after completion")
      }
    }
  }
}

impl<E: AnimationTarget> Drop for AnimationRun<E> {
  fn drop(&mut self) {
    if let RunState::Running(_) = self.state
      && let Err(err) = self.cancel()
    {
      log::warn!("failed to end a dropped animation: {err}");
    }
  }
}

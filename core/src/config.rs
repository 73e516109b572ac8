use std::{cell::Cell, time::Duration};

use crate::{
  animation::AnimationInput,
  run::{Animation, animate},
  target::AnimationTarget,
};

/// How long after the declared animation duration the animation is
/// considered done even if the element never dispatched its animation-end
/// event.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(20);

/// Configuration shared by every [`Animator`](crate::animator::Animator) it is
/// given to.
///
/// Share it with `Rc<AnimationConfig>`, changes are observed by every
/// animation started after them. Tests usually disable the animations, so that
/// the end action of an animation runs right after its start action, and the
/// animation completes as soon as it's run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct AnimationConfig {
  animations_disabled: Cell<bool>,
  grace: Cell<Duration>,
}

impl Default for AnimationConfig {
  fn default() -> Self {
    Self { animations_disabled: Cell::new(false), grace: Cell::new(DEFAULT_GRACE) }
  }
}

impl AnimationConfig {
  pub fn animations_disabled(&self) -> bool { self.animations_disabled.get() }

  /// Disable or re-enable animations for all the animations started after
  /// this call.
  pub fn set_animations_disabled(&self, disabled: bool) {
    log::debug!("animations disabled: {disabled}");
    self.animations_disabled.set(disabled);
  }

  pub fn grace(&self) -> Duration { self.grace.get() }

  pub fn set_grace(&self, grace: Duration) { self.grace.set(grace); }

  pub fn with_grace(self, grace: Duration) -> Self {
    self.set_grace(grace);
    self
  }

  /// Create an animation of `el` which honors this configuration.
  pub fn animate<E: AnimationTarget>(
    &self, el: &E, animation: impl Into<AnimationInput<E>>,
  ) -> Animation<E> {
    animate(el, animation, self.animations_disabled()).with_grace(self.grace())
  }
}

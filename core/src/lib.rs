//! Play CSS animations on elements and get notified once they are really
//! done.
//!
//! The animation-end event of an element is raced against a timeout computed
//! from its `animation-duration`, so a run always completes, even if the
//! animation never dispatches its event.

pub mod animation;
pub mod animator;
pub mod config;
pub mod duration;
pub mod error;
pub mod run;
pub mod scheduler;
pub mod target;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_helper;
#[cfg(feature = "web")]
pub mod web;

pub mod prelude {
  pub use crate::{
    animation::{AnimationInput, CssAnimation, class_based_animation},
    animator::Animator,
    config::{AnimationConfig, DEFAULT_GRACE},
    error::{ActionError, AnimateError},
    run::{Animation, AnimationRun, RunStatus, animate},
    target::AnimationTarget,
  };
}

//! Describe what to do on an element to start a CSS animation, and what to do
//! once it's done.
//!
//! Most animations just add a class defining a CSS `animation` to the element
//! and remove it afterwards, so the animation can be played again later. Use
//! [`class_based_animation`] for that.
//!
//! ```
//! use cssanim_core::prelude::*;
//!
//! fn shake<E: AnimationTarget>(el: &E) -> Result<(), ActionError> {
//!   let shake = class_based_animation::<E>("shake");
//!   shake.start(el)?;
//!   shake.end(el)
//! }
//! ```

use std::{fmt, rc::Rc};

use crate::{error::ActionError, target::AnimationTarget};

/// An action performed on the animated element.
pub type AnimationAction<E> = Rc<dyn Fn(&E) -> Result<(), ActionError>>;

/// A start action and an optional end action to perform on an element.
pub struct CssAnimation<E> {
  on_start: AnimationAction<E>,
  on_end: Option<AnimationAction<E>>,
}

impl<E> CssAnimation<E> {
  /// Create an animation which only has a start action, nothing happens on the
  /// element when the animation is done.
  pub fn new(on_start: impl Fn(&E) -> Result<(), ActionError> + 'static) -> Self {
    Self { on_start: Rc::new(on_start), on_end: None }
  }

  /// Set the action to perform once the animation is done.
  pub fn with_end(mut self, on_end: impl Fn(&E) -> Result<(), ActionError> + 'static) -> Self {
    self.on_end = Some(Rc::new(on_end));
    self
  }

  pub fn has_end(&self) -> bool { self.on_end.is_some() }

  /// Perform the start action on `el`.
  pub fn start(&self, el: &E) -> Result<(), ActionError> { (self.on_start)(el) }

  /// Perform the end action on `el`, does nothing if there is no end action.
  pub fn end(&self, el: &E) -> Result<(), ActionError> {
    match &self.on_end {
      Some(on_end) => on_end(el),
      None => Ok(()),
    }
  }
}

impl<E> Clone for CssAnimation<E> {
  fn clone(&self) -> Self { Self { on_start: self.on_start.clone(), on_end: self.on_end.clone() } }
}

impl<E> fmt::Debug for CssAnimation<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CssAnimation")
      .field("has_end", &self.has_end())
      .finish_non_exhaustive()
  }
}

/// Create an animation which adds `class` to the element when it starts, and
/// removes it when it's done.
pub fn class_based_animation<E: AnimationTarget>(class: impl Into<String>) -> CssAnimation<E> {
  let class: Rc<str> = class.into().into();
  let remove = class.clone();
  CssAnimation::new(move |el: &E| el.add_class(&class))
    .with_end(move |el: &E| el.remove_class(&remove))
}

/// What can be accepted as an animation: a full descriptor or just the name of
/// a class to add and remove.
pub enum AnimationInput<E> {
  Descriptor(CssAnimation<E>),
  Class(String),
}

impl<E: AnimationTarget> AnimationInput<E> {
  /// Resolve to the descriptor the runner works with.
  pub fn resolve(self) -> CssAnimation<E> {
    match self {
      AnimationInput::Descriptor(animation) => animation,
      AnimationInput::Class(class) => class_based_animation(class),
    }
  }
}

impl<E> From<CssAnimation<E>> for AnimationInput<E> {
  fn from(animation: CssAnimation<E>) -> Self { AnimationInput::Descriptor(animation) }
}

impl<E> From<&CssAnimation<E>> for AnimationInput<E> {
  fn from(animation: &CssAnimation<E>) -> Self { AnimationInput::Descriptor(animation.clone()) }
}

impl<E> From<String> for AnimationInput<E> {
  fn from(class: String) -> Self { AnimationInput::Class(class) }
}

impl<E> From<&str> for AnimationInput<E> {
  fn from(class: &str) -> Self { AnimationInput::Class(class.to_owned()) }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;
  use crate::test_helper::MockElement;

  #[test]
  fn class_based_animation_adds_and_removes_the_class() {
    let el = MockElement::new();
    let foo = class_based_animation::<MockElement>("foo");
    assert!(!el.has_class("foo"));

    foo.start(&el).unwrap();
    assert!(el.has_class("foo"));

    foo.end(&el).unwrap();
    assert!(!el.has_class("foo"));
  }

  #[test]
  fn building_does_not_touch_the_element() {
    let el = MockElement::new();
    let _ = class_based_animation::<MockElement>("foo");
    assert!(el.classes().is_empty());
  }

  #[test]
  fn missing_end_is_a_noop() {
    let el = MockElement::new();
    let started = Rc::new(Cell::new(0));
    let c_started = started.clone();
    let animation = CssAnimation::new(move |el: &MockElement| {
      c_started.set(c_started.get() + 1);
      el.add_class("foo")
    });

    assert!(!animation.has_end());
    animation.start(&el).unwrap();
    animation.end(&el).unwrap();
    assert_eq!(started.get(), 1);
    assert!(el.has_class("foo"));
  }

  #[test]
  fn class_input_resolves_to_class_animation() {
    let el = MockElement::new();
    let animation = AnimationInput::<MockElement>::from("bump").resolve();
    assert!(animation.has_end());

    animation.start(&el).unwrap();
    assert_eq!(el.classes(), vec!["bump".to_owned()]);
    animation.end(&el).unwrap();
    assert!(el.classes().is_empty());
  }

  #[test]
  fn descriptor_input_is_kept() {
    let el = MockElement::new();
    let animation = CssAnimation::new(|el: &MockElement| el.add_class("in"));
    let resolved = AnimationInput::from(&animation).resolve();
    assert!(!resolved.has_end());

    resolved.start(&el).unwrap();
    assert!(el.has_class("in"));
  }
}

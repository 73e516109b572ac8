use std::{
  cell::{Cell, RefCell},
  fmt,
  rc::{Rc, Weak},
  sync::atomic::{AtomicUsize, Ordering},
};

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
pub use wasm_bindgen_test::wasm_bindgen_test;

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use crate::{
  error::ActionError,
  target::{AnimationEndHandler, AnimationTarget},
};

static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(0);

/// An in-memory element that assists in writing tests without a browser.
///
/// The computed animation duration is whatever was set by
/// [`MockElement::set_animation_duration`], and animation-end events are only
/// dispatched when [`MockElement::dispatch_animation_end`] is called. Events
/// bubble from an element to its ancestors.
#[derive(Clone)]
pub struct MockElement(Rc<ElementInner>);

struct ElementInner {
  id: usize,
  parent: Option<MockElement>,
  classes: RefCell<Vec<String>>,
  animation_duration: RefCell<Option<String>>,
  listeners: RefCell<Vec<(usize, Rc<RefCell<AnimationEndHandler<MockEvent>>>)>>,
  next_listener: Cell<usize>,
}

/// The animation-end event of a [`MockElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockEvent {
  target: usize,
}

/// Detach its handler from the element when dropped.
pub struct MockListener {
  element: Weak<ElementInner>,
  id: usize,
}

impl MockElement {
  pub fn new() -> Self { Self::with_parent(None) }

  /// Create a new element inside this one.
  pub fn child(&self) -> Self { Self::with_parent(Some(self.clone())) }

  fn with_parent(parent: Option<MockElement>) -> Self {
    Self(Rc::new(ElementInner {
      id: NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed),
      parent,
      classes: RefCell::default(),
      animation_duration: RefCell::default(),
      listeners: RefCell::default(),
      next_listener: Cell::new(0),
    }))
  }

  /// Set the computed `animation-duration` of the element, e.g. `"0.3s"`.
  pub fn set_animation_duration(&self, value: impl Into<String>) {
    *self.0.animation_duration.borrow_mut() = Some(value.into());
  }

  pub fn has_class(&self, class: &str) -> bool {
    self.0.classes.borrow().iter().any(|c| c == class)
  }

  pub fn classes(&self) -> Vec<String> { self.0.classes.borrow().clone() }

  /// The number of animation-end handlers attached to this element.
  pub fn listener_count(&self) -> usize { self.0.listeners.borrow().len() }

  /// Dispatch an animation-end event targeting this element, then bubble it to
  /// the ancestors.
  pub fn dispatch_animation_end(&self) {
    let event = MockEvent { target: self.0.id };
    let mut current = Some(self.clone());
    while let Some(el) = current {
      // Handlers may attach or detach listeners.
      let handlers: Vec<_> = el
        .0
        .listeners
        .borrow()
        .iter()
        .map(|(_, h)| h.clone())
        .collect();
      for h in handlers {
        let mut handler = h.borrow_mut();
        (&mut **handler)(&event);
      }
      current = el.0.parent.clone();
    }
  }
}

impl Default for MockElement {
  fn default() -> Self { Self::new() }
}

impl fmt::Debug for MockElement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MockElement")
      .field("id", &self.0.id)
      .field("classes", &self.0.classes.borrow())
      .finish()
  }
}

impl AnimationTarget for MockElement {
  type Event = MockEvent;
  type Listener = MockListener;

  fn add_class(&self, class: &str) -> Result<(), ActionError> {
    if !self.has_class(class) {
      self.0.classes.borrow_mut().push(class.to_owned());
    }
    Ok(())
  }

  fn remove_class(&self, class: &str) -> Result<(), ActionError> {
    self.0.classes.borrow_mut().retain(|c| c != class);
    Ok(())
  }

  fn animation_duration(&self) -> Option<String> { self.0.animation_duration.borrow().clone() }

  fn listen_animation_end(&self, handler: AnimationEndHandler<MockEvent>) -> MockListener {
    let id = self.0.next_listener.get();
    self.0.next_listener.set(id + 1);
    self
      .0
      .listeners
      .borrow_mut()
      .push((id, Rc::new(RefCell::new(handler))));
    MockListener { element: Rc::downgrade(&self.0), id }
  }

  fn is_event_target(&self, event: &MockEvent) -> bool { event.target == self.0.id }
}

impl Drop for MockListener {
  fn drop(&mut self) {
    if let Some(element) = self.element.upgrade() {
      element
        .listeners
        .borrow_mut()
        .retain(|(id, _)| *id != self.id);
    }
  }
}

use crate::error::ActionError;

/// Handler invoked for every animation-end event an element observes,
/// including the ones bubbled from its descendants.
pub type AnimationEndHandler<Ev> = Box<dyn FnMut(&Ev)>;

/// An element that CSS animations can run on.
///
/// Implementors are cheap handles to the real element, cloning one must refer
/// to the same element.
pub trait AnimationTarget: Clone + 'static {
  /// The animation-end event dispatched to the element.
  type Event;
  /// Keeps an animation-end handler attached, dropping it detaches the
  /// handler.
  type Listener;

  fn add_class(&self, class: &str) -> Result<(), ActionError>;

  fn remove_class(&self, class: &str) -> Result<(), ActionError>;

  /// The computed `animation-duration` style value of the element, `None` if
  /// the element has no style information.
  fn animation_duration(&self) -> Option<String>;

  /// Attach `handler` to the animation-end events observed by this element.
  fn listen_animation_end(&self, handler: AnimationEndHandler<Self::Event>) -> Self::Listener;

  /// Return if `event` was dispatched by this element itself and not bubbled
  /// from a descendant.
  fn is_event_target(&self, event: &Self::Event) -> bool;
}

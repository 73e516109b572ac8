//! Bind an animation to an element, so that it can be played whenever
//! something happens.
//!
//! ```ignore
//! let config = Rc::new(AnimationConfig::default());
//! let to_shake = Animator::new(&div, "shake", config.clone());
//! to_shake.on_animation_end(|| println!("shook"));
//!
//! // When the button is clicked.
//! to_shake.animate_now();
//! ```

use std::{cell::RefCell, future::Future, rc::Rc};

use crate::{
  animation::{AnimationInput, CssAnimation},
  config::AnimationConfig,
  error::AnimateError,
  run::Animation,
  scheduler,
  target::AnimationTarget,
};

type EndObservers = Rc<RefCell<Vec<Box<dyn FnMut()>>>>;

/// An animation bound to its element, honoring a shared [`AnimationConfig`].
pub struct Animator<E> {
  element: E,
  animation: CssAnimation<E>,
  config: Rc<AnimationConfig>,
  animate_on_init: bool,
  end_observers: EndObservers,
}

impl<E: AnimationTarget> Animator<E> {
  pub fn new(el: &E, animation: impl Into<AnimationInput<E>>, config: Rc<AnimationConfig>) -> Self {
    Self {
      element: el.clone(),
      animation: animation.into().resolve(),
      config,
      animate_on_init: false,
      end_observers: EndObservers::default(),
    }
  }

  /// Play the animation as soon as the element is mounted.
  pub fn with_animate_on_init(mut self, animate_on_init: bool) -> Self {
    self.animate_on_init = animate_on_init;
    self
  }

  pub fn element(&self) -> &E { &self.element }

  pub fn config(&self) -> &Rc<AnimationConfig> { &self.config }

  /// Call `f` every time a run of this animator completes.
  pub fn on_animation_end(&self, f: impl FnMut() + 'static) {
    self.end_observers.borrow_mut().push(Box::new(f));
  }

  /// The animation as configured right now.
  pub fn animation(&self) -> Animation<E> {
    self
      .config
      .animate(&self.element, &self.animation)
  }

  /// Return a future that plays the animation, so you can do something once
  /// it's done. Nothing happens until the future is polled, and dropping it
  /// before it completes ends the animation.
  pub fn animate(&self) -> impl Future<Output = Result<(), AnimateError>> + use<E> {
    let run = self.animation().run();
    let observers = self.end_observers.clone();
    async move {
      run.await?;
      notify(&observers);
      Ok(())
    }
  }

  /// Play the animation and forget about it.
  ///
  /// The start action is performed before this method returns, and so is the
  /// whole animation when animations are disabled.
  pub fn animate_now(&self) {
    let run = self.animate();
    scheduler::run_local(async move {
      if let Err(err) = run.await {
        log::error!("animation failed: {err}");
      }
    });
  }

  /// Call once the element is mounted.
  pub fn mounted(&self) {
    if self.animate_on_init {
      self.animate_now();
    }
  }
}

fn notify(observers: &EndObservers) {
  // Observers may register new observers.
  let mut current = std::mem::take(&mut *observers.borrow_mut());
  for f in current.iter_mut() {
    f();
  }
  let mut observers = observers.borrow_mut();
  current.append(&mut observers);
  *observers = current;
}

#[cfg(test)]
#[cfg(not(target_arch = "wasm32"))]
mod tests {
  use std::{cell::Cell, time::Duration};

  use tokio::{task::LocalSet, time::sleep};

  use super::*;
  use crate::test_helper::MockElement;

  fn env() -> (MockElement, Rc<AnimationConfig>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let el = MockElement::new();
    el.set_animation_duration("300ms");
    (el, Rc::new(AnimationConfig::default()))
  }

  fn done_flag(animator: &Animator<MockElement>) -> Rc<Cell<bool>> {
    let done = Rc::new(Cell::new(false));
    let c_done = done.clone();
    animator.on_animation_end(move || c_done.set(true));
    done
  }

  #[tokio::test(start_paused = true)]
  async fn animate_imperatively() {
    let (el, config) = env();
    let animator = Animator::new(&el, "animated", config);
    let done = done_flag(&animator);

    LocalSet::new()
      .run_until(async {
        assert!(!el.has_class("animated"));
        animator.animate_now();
        assert!(el.has_class("animated"));
        assert!(!done.get());

        sleep(Duration::from_millis(350)).await;
        assert!(!el.has_class("animated"));
        assert!(done.get());
      })
      .await;
  }

  #[tokio::test(start_paused = true)]
  async fn animate_on_init() {
    let (el, config) = env();
    let animator = Animator::new(&el, "animated", config).with_animate_on_init(true);
    let done = done_flag(&animator);

    LocalSet::new()
      .run_until(async {
        animator.mounted();
        assert!(el.has_class("animated"));
        assert!(!done.get());

        sleep(Duration::from_millis(350)).await;
        assert!(!el.has_class("animated"));
        assert!(done.get());
      })
      .await;
  }

  #[test]
  fn mounted_without_animate_on_init() {
    let (el, config) = env();
    let animator = Animator::new(&el, "animated", config);
    animator.mounted();
    assert!(!el.has_class("animated"));
  }

  #[test]
  fn synchronous_when_animations_disabled() {
    let (el, config) = env();
    config.set_animations_disabled(true);
    let animator = Animator::new(&el, "animated", config);
    let done = done_flag(&animator);

    animator.animate_now();
    assert!(!el.has_class("animated"));
    assert!(done.get());
  }

  #[tokio::test(start_paused = true)]
  async fn do_something_after_the_animation() {
    let (el, config) = env();
    let animator = Animator::new(&el, "animated", config);
    let done = done_flag(&animator);
    let something_done = Rc::new(Cell::new(false));

    let c_something_done = something_done.clone();
    let animation = animator.animate();
    LocalSet::new()
      .run_until(async {
        tokio::task::spawn_local(async move {
          animation.await.unwrap();
          c_something_done.set(true);
        });
        tokio::task::yield_now().await;
        assert!(el.has_class("animated"));
        assert!(!done.get());
        assert!(!something_done.get());

        sleep(Duration::from_millis(350)).await;
        assert!(!el.has_class("animated"));
        assert!(done.get());
        assert!(something_done.get());
      })
      .await;
  }

  #[tokio::test(start_paused = true)]
  async fn dropping_the_handle_ends_the_animation() {
    let (el, config) = env();
    let animator = Animator::new(&el, "animated", config);
    let done = done_flag(&animator);

    let mut animation = Box::pin(animator.animate());
    assert!(futures::poll!(animation.as_mut()).is_pending());
    assert!(el.has_class("animated"));

    drop(animation);
    assert!(!el.has_class("animated"));
    assert!(!done.get());
  }

  #[test]
  fn config_is_read_when_animating() {
    let (el, config) = env();
    let animator = Animator::new(&el, "animated", config.clone());
    assert!(!animator.animation().is_synchronous());

    config.set_animations_disabled(true);
    assert!(animator.animation().is_synchronous());
    assert_eq!(animator.animation().grace(), config.grace());
  }

  #[test]
  fn observers_are_notified_every_run() {
    let (el, config) = env();
    config.set_animations_disabled(true);
    let animator = Animator::new(&el, CssAnimation::new(|el: &MockElement| el.add_class("in")), config);
    let count = Rc::new(Cell::new(0));
    let c_count = count.clone();
    animator.on_animation_end(move || c_count.set(c_count.get() + 1));

    animator.animate_now();
    animator.animate_now();
    assert_eq!(count.get(), 2);
    assert!(el.has_class("in"));
  }

  #[test]
  fn failed_animation_does_not_notify() {
    let (el, config) = env();
    config.set_animations_disabled(true);
    let ended = Rc::new(Cell::new(false));
    let c_ended = ended.clone();
    let broken = CssAnimation::new(|_: &MockElement| Err("no such element".into())).with_end(
      move |_: &MockElement| {
        c_ended.set(true);
        Ok(())
      },
    );
    let animator = Animator::new(&el, broken, config);
    let done = done_flag(&animator);

    animator.animate_now();
    assert!(!done.get());
    assert!(!ended.get());

    let res = futures::FutureExt::now_or_never(animator.animate());
    assert!(matches!(res, Some(Err(AnimateError::Start(_)))));
    assert!(!done.get());
  }
}

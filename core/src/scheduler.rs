use std::{
  future::Future,
  task::{Context, Poll},
  time::Duration,
};

use futures::future::LocalBoxFuture;

/// The longest delay a browser `setTimeout` waits, longer ones fire at once.
pub const MAX_BROWSER_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

/// Clamp `duration` to what a browser timer can wait for.
pub fn browser_timeout(duration: Duration) -> Duration { duration.min(MAX_BROWSER_TIMEOUT) }

cfg_if::cfg_if! {
  if #[cfg(target_arch = "wasm32")] {
    /// A future resolved once `duration` elapsed.
    pub fn timer(duration: Duration) -> LocalBoxFuture<'static, ()> {
      Box::pin(gloo_timers::future::sleep(browser_timeout(duration)))
    }

    /// Spawn `fut` on the executor of the current thread.
    pub fn spawn_local(fut: impl Future<Output = ()> + 'static) {
      wasm_bindgen_futures::spawn_local(fut);
    }
  } else {
    /// A future resolved once `duration` elapsed.
    ///
    /// Must be called in the context of a tokio runtime.
    pub fn timer(duration: Duration) -> LocalBoxFuture<'static, ()> {
      Box::pin(tokio::time::sleep(duration))
    }

    /// Spawn `fut` on the executor of the current thread.
    ///
    /// Must be called inside a tokio `LocalSet`.
    pub fn spawn_local(fut: impl Future<Output = ()> + 'static) {
      tokio::task::spawn_local(fut);
    }
  }
}

/// Poll `fut` once right away, and only spawn it if it's not finished yet.
///
/// Everything `fut` does before its first suspension happens before this
/// function returns.
pub fn run_local(fut: impl Future<Output = ()> + 'static) {
  let mut fut = Box::pin(fut);
  let mut cx = Context::from_waker(futures::task::noop_waker_ref());
  if let Poll::Pending = fut.as_mut().poll(&mut cx) {
    spawn_local(fut);
  }
}

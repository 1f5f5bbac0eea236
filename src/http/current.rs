//! The exchange being handled by the current worker thread.
//!
//! Handlers normally receive the [`Exchange`] explicitly. Code deep in a call
//! chain that was not handed one can still reach it through
//! [`with_current`], as long as the worker wrapped its handling in
//! [`scope`]. The binding is removed when `scope` returns or unwinds, so a
//! pooled thread never sees the exchange of a previous request.
//!
//! The slot is thread-local: do not hold it across an `.await` that may
//! resume on another thread.

use std::cell::RefCell;
use std::fmt;

use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;

/// A request with the response being built for it.
pub struct Exchange {
    pub request: HttpRequest,
    pub response: HttpResponse,
}

impl Exchange {
    pub fn new(request: HttpRequest, response: HttpResponse) -> Self {
        Self { request, response }
    }
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("request", &format_args!("{}", self.request))
            .field("status", &self.response.status)
            .finish_non_exhaustive()
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Exchange>> = const { RefCell::new(None) };
}

struct Binding {
    previous: Option<Exchange>,
    released: bool,
}

impl Binding {
    /// Gives `exchange` back when the slot is borrowed by [`with_current`].
    fn enter(exchange: Exchange) -> Result<Self, Exchange> {
        CURRENT.with(|slot| match slot.try_borrow_mut() {
            Ok(mut slot) => Ok(Self {
                previous: slot.replace(exchange),
                released: false,
            }),
            Err(_) => Err(exchange),
        })
    }

    fn leave(mut self) -> Exchange {
        self.released = true;
        let previous = self.previous.take();
        CURRENT
            .with(|slot| slot.replace(previous))
            .expect("exchange bound for the whole scope")
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let previous = self.previous.take();
        // May run during thread teardown; nothing left to clear then.
        let stale = CURRENT.try_with(|slot| slot.replace(previous)).ok().flatten();
        drop(stale);
    }
}

/// Binds `exchange` to this thread while `f` runs, then hands it back with
/// `f`'s result. The binding is cleared on every exit path, panics included.
/// A binding already present is restored afterwards.
///
/// Called from inside a [`with_current`] closure, the bind is refused:
/// `f` does not run and `exchange` comes back as the error.
pub fn scope<R>(exchange: Exchange, f: impl FnOnce() -> R) -> Result<(Exchange, R), Exchange> {
    let binding = Binding::enter(exchange)?;
    let result = f();
    Ok((binding.leave(), result))
}

/// Runs `f` on the bound exchange.
///
/// Returns `None` when nothing is bound, or when called from inside another
/// `with_current` closure, which would alias the exchange.
pub fn with_current<R>(f: impl FnOnce(&mut Exchange) -> R) -> Option<R> {
    CURRENT.with(|slot| {
        let mut slot = slot.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    })
}

pub fn with_request<R>(f: impl FnOnce(&mut HttpRequest) -> R) -> Option<R> {
    with_current(|ex| f(&mut ex.request))
}

pub fn with_response<R>(f: impl FnOnce(&mut HttpResponse) -> R) -> Option<R> {
    with_current(|ex| f(&mut ex.response))
}

pub fn is_bound() -> bool {
    CURRENT.with(|slot| slot.try_borrow().map(|s| s.is_some()).unwrap_or(true))
}

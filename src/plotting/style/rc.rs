//! Process-wide style parameters and their scoped override.
//!
//! Figures and tick formatters read the active [`RcParams`] when they are
//! created or rendered. [`rc_context`] swaps in a new parameter set for the
//! lifetime of the returned guard and restores the previous set on drop,
//! whatever path the scope exits through (return, `?`, or panic unwinding).
//! Only one context can be active at a time; a second caller blocks until the
//! first guard is dropped.

use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use log::debug;

/// Global rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RcParams {
    /// Typeset tick labels and text as math (TeX-like) text
    pub math_text: bool,
    /// Font family list used for all text
    pub font_family: String,
    /// Base font size in points
    pub font_size: f64,
    /// Render minus signs with the unicode minus glyph
    pub unicode_minus: bool,
    /// Preamble lines for math text rendering
    pub preamble: Vec<String>,
}

impl RcParams {
    /// Style for publication figures: Latin Modern serif at 8pt with math text.
    pub fn publication() -> Self {
        RcParams {
            math_text: true,
            font_family: "Latin Modern Roman, lmodern, serif".to_string(),
            font_size: 8.0,
            unicode_minus: true,
            preamble: vec![
                r"\usepackage{lmodern}".to_string(),
                r"\usepackage{amsfonts,amsmath,amssymb}".to_string(),
                r#"\mathchardef\mhyphen="2D"#.to_string(),
                r"\DeclareMathOperator{\ms}{m\!\cdot\!s^{-1}}".to_string(),
                r"\DeclareMathOperator{\kms}{km\!\cdot\!s^{-1}}".to_string(),
            ],
        }
    }
}

impl Default for RcParams {
    fn default() -> Self {
        RcParams {
            math_text: false,
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            unicode_minus: true,
            preamble: Vec::new(),
        }
    }
}

static RC_PARAMS: LazyLock<Mutex<RcParams>> = LazyLock::new(|| Mutex::new(RcParams::default()));

/// Held by the active context; serializes concurrent contexts.
static CONTEXT_LOCK: Mutex<()> = Mutex::new(());

fn params_lock() -> MutexGuard<'static, RcParams> {
    RC_PARAMS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Snapshot of the currently active parameters.
pub fn rc_params() -> RcParams {
    params_lock().clone()
}

/// Guard returned by [`rc_context`]. Restores the previous parameters on drop.
#[must_use = "the style context is reverted as soon as the guard is dropped"]
pub struct RcContext {
    saved: Option<RcParams>,
    // Declared last so the lock is released after the parameters are restored.
    _exclusive: MutexGuard<'static, ()>,
}

/// Apply `params` until the returned guard is dropped.
///
/// Not reentrant: calling this again on the same thread while a guard is alive
/// deadlocks.
pub fn rc_context(params: RcParams) -> RcContext {
    // A poisoned lock only means an earlier holder panicked; its guard has
    // already put the previous parameters back while unwinding.
    let exclusive = CONTEXT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let saved = std::mem::replace(&mut *params_lock(), params);
    debug!("entered style context (math_text={})", rc_params().math_text);
    RcContext {
        saved: Some(saved),
        _exclusive: exclusive,
    }
}

impl Drop for RcContext {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            *params_lock() = saved;
            debug!("style context restored");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::panic;

    /// Serializes tests that depend on the global parameters.
    pub(crate) static SERIAL: Mutex<()> = Mutex::new(());

    pub(crate) fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn test_context_applies_and_restores() {
        let _serial = serial();
        let before = rc_params();
        {
            let _ctx = rc_context(RcParams::publication());
            let active = rc_params();
            assert!(active.math_text);
            assert_eq!(active.font_size, 8.0);
            assert_eq!(active.preamble.len(), 5);
        }
        assert_eq!(rc_params(), before);
    }

    #[test]
    fn test_context_restored_after_panic() {
        let _serial = serial();
        let before = rc_params();
        let result = panic::catch_unwind(|| {
            let _ctx = rc_context(RcParams::publication());
            panic!("drawing exploded");
        });
        assert!(result.is_err());
        assert_eq!(rc_params(), before);

        // The lock is usable again after the poisoning panic.
        let ctx = rc_context(RcParams::publication());
        assert!(rc_params().math_text);
        drop(ctx);
        assert_eq!(rc_params(), before);
    }

    #[test]
    fn test_contexts_serialize_across_threads() {
        let _serial = serial();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let params = RcParams {
                        font_size: 20.0 + i as f64,
                        ..RcParams::default()
                    };
                    let _ctx = rc_context(params);
                    std::thread::yield_now();
                    // Nobody else can change the parameters while we hold the context.
                    assert_eq!(rc_params().font_size, 20.0 + i as f64);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(rc_params(), RcParams::default());
    }
}

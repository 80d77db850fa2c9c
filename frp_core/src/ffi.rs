//! C ABI for the HMI host.
//!
//! Exposes one process-wide [`Accumulator`] through flat `extern "C"`
//! functions. The record layout of [`FrpResult`] and the entry point names
//! match the header in `frp_core/include/frp_core.h`; existing callers that
//! declare the functions as `void` keep working and simply ignore the
//! status code.
//!
//! Every entry point returns an `i32` status and never unwinds into the
//! caller: panics are caught and reported as [`FRP_ERR_INTERNAL`].
//! Operations before `frp_init*` fail with [`FRP_ERR_NOT_INITIALIZED`].

use std::ffi::{CStr, c_char};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::OnceLock;

use frp::config::{FrpConfig, load_config};
use frp::scan::result::FrpResult;
use tracing::error;

use crate::accumulator::Accumulator;
use crate::error::CoreError;

// ─── Status codes ───────────────────────────────────────────────────

/// Success.
pub const FRP_OK: i32 = 0;
/// Called before `frp_init` / `frp_init_with_config`.
pub const FRP_ERR_NOT_INITIALIZED: i32 = -1;
/// Sample rejected; accumulator unchanged.
pub const FRP_ERR_INVALID_SAMPLE: i32 = -2;
/// Null pointer argument.
pub const FRP_ERR_NULL_POINTER: i32 = -3;
/// Configuration could not be loaded or validated.
pub const FRP_ERR_CONFIG: i32 = -4;
/// `frp_init_with_config` on an initialized engine.
pub const FRP_ERR_ALREADY_INITIALIZED: i32 = -5;
/// Internal failure (caught panic).
pub const FRP_ERR_INTERNAL: i32 = -99;

impl CoreError {
    /// Status code reported across the C boundary.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InvalidSample { .. } => FRP_ERR_INVALID_SAMPLE,
            Self::Config(_) => FRP_ERR_CONFIG,
            Self::NotInitialized => FRP_ERR_NOT_INITIALIZED,
            Self::AlreadyInitialized => FRP_ERR_ALREADY_INITIALIZED,
        }
    }
}

static ENGINE: OnceLock<Accumulator> = OnceLock::new();

fn engine() -> Result<&'static Accumulator, CoreError> {
    ENGINE.get().ok_or(CoreError::NotInitialized)
}

/// Run `f`, mapping errors and panics to status codes.
fn guarded(op: &'static str, f: impl FnOnce() -> Result<(), CoreError>) -> i32 {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => FRP_OK,
        Ok(Err(e)) => e.status_code(),
        Err(_) => {
            error!("{op}: panic caught at the C boundary");
            FRP_ERR_INTERNAL
        }
    }
}

/// Validate `config`, then install logging and the engine.
///
/// A rejected configuration leaves the process without a subscriber.
fn install(config: FrpConfig) -> Result<(), CoreError> {
    config.validate()?;
    crate::init_tracing(config.shared.log_level);
    let acc = Accumulator::new(config)?;
    ENGINE.set(acc).map_err(|_| CoreError::AlreadyInitialized)
}

// ─── Entry points ───────────────────────────────────────────────────

/// Initialize the engine with default configuration.
///
/// The defaults set no tolerance bands, so every non-empty scan is OK;
/// use `frp_init_with_config` to gate results. Calling it again on an initialized engine clears the scan and succeeds.
#[unsafe(no_mangle)]
pub extern "C" fn frp_init() -> i32 {
    guarded("frp_init", || {
        if let Some(acc) = ENGINE.get() {
            acc.reset();
            return Ok(());
        }
        match install(FrpConfig::default()) {
            // Lost an init race: the engine exists, which is all we need.
            Err(CoreError::AlreadyInitialized) => Ok(()),
            other => other,
        }
    })
}

/// Initialize the engine from a TOML configuration file.
///
/// # Safety
///
/// `path` must be null or point to a NUL-terminated string valid for reads.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn frp_init_with_config(path: *const c_char) -> i32 {
    if path.is_null() {
        return FRP_ERR_NULL_POINTER;
    }
    // SAFETY: non-null and NUL-terminated per the contract above.
    let path = unsafe { CStr::from_ptr(path) };

    guarded("frp_init_with_config", || {
        if ENGINE.get().is_some() {
            return Err(CoreError::AlreadyInitialized);
        }
        let path = path
            .to_str()
            .map_err(|e| CoreError::Config(format!("config path is not UTF-8: {e}")))?;
        install(load_config(Path::new(path))?)
    })
}

/// Discard all accumulated data.
#[unsafe(no_mangle)]
pub extern "C" fn frp_reset() -> i32 {
    guarded("frp_reset", || {
        engine()?.reset();
        Ok(())
    })
}

/// Feed one probe reading.
#[unsafe(no_mangle)]
pub extern "C" fn frp_add_sample(angle_deg: f64, outer_d_mm: f64, inner_d_mm: f64) -> i32 {
    guarded("frp_add_sample", || {
        engine()?.add_sample(angle_deg, outer_d_mm, inner_d_mm)?;
        Ok(())
    })
}

/// Compute the result into caller-provided storage.
///
/// Before initialization `*result` is zero-filled (`ok_flag = 0`) and
/// [`FRP_ERR_NOT_INITIALIZED`] is returned.
///
/// # Safety
///
/// `result` must be null or valid for writing one `FrpResult`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn frp_compute(result: *mut FrpResult) -> i32 {
    if result.is_null() {
        return FRP_ERR_NULL_POINTER;
    }

    let mut record = FrpResult::default();
    let status = guarded("frp_compute", || {
        record = engine()?.compute().to_ffi();
        Ok(())
    });
    if status == FRP_ERR_INTERNAL {
        record = FrpResult::default();
    }

    // SAFETY: non-null and writable per the contract above.
    unsafe { result.write(record) };
    status
}

/// Number of sections a compute pass would see, or a negative status.
#[unsafe(no_mangle)]
pub extern "C" fn frp_section_count() -> i32 {
    let mut count = 0;
    let status = guarded("frp_section_count", || {
        count = i32::try_from(engine()?.section_count()).unwrap_or(i32::MAX);
        Ok(())
    });
    if status == FRP_OK { count } else { status }
}

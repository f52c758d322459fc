//! Operation lifecycle macros
//!
//! Every comparison stage that reports timing goes through these. All three
//! expand to one [`__log_op_event!`](crate::__log_op_event) call, so each
//! event carries the same `component` / `op` / `event` prefix followed by
//! whatever fields the caller adds.

/// Emit one lifecycle event at `$level` with the canonical prefix fields.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::specdiff_core_types::schema::$event,
            $($($field)*)?
        )
    };
}

/// `start` event for an operation.
///
/// ```
/// # use specdiff_core::log_op_start;
/// log_op_start!("compare");
/// log_op_start!("compare", comparison_id = "c123");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, EVENT_START $(, $($field)*)?)
    };
}

/// `end` event for an operation; `duration_ms` is mandatory.
///
/// ```
/// # use specdiff_core::log_op_end;
/// log_op_end!("compare", duration_ms = 42, change_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info, $op, EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// `end_error` event for an operation.
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
/// Its stable kind and code are recorded as `err.kind` / `err.code`, and the
/// offending document as `err.side` when the error names one.
///
/// ```
/// # use specdiff_core::{log_op_error, errors::SpecDiffError};
/// let err = SpecDiffError::MissingKey { key: "paths".to_string() };
/// log_op_error!("normalize", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error, $op, EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.side = ex_err.side().map(|side| side.as_str())
            $(, $($field)*)?
        )
    }};
}

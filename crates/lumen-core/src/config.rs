//! Dispatch configuration.

/// Read-only configuration injected at dispatcher construction.
///
/// There is deliberately no process-wide flag: each dispatcher carries its
/// own copy, decided once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Log every decoded request as
    /// `<interface>@<objectId>.<request>(<arg>: <value>, ...)` at debug
    /// level before invoking its handler. Observational only; has no effect
    /// on dispatch outcomes.
    pub trace_requests: bool,
}

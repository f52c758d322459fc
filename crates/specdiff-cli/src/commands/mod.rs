pub mod compare;

/// How a successful command run maps onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exit 0
    Clean,
    /// Exit 1: changes at or above the `--fail-on` severity were found
    ThresholdReached,
}

//! Type aliases for domain concepts.

/// Raw output returned by the engine, passed through unmodified.
pub type EngineOutput = String;

/// An engine flag name such as `--storage-location`.
pub type FlagName = String;

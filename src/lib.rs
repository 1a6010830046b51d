//! Workspace root package; exists only to host tooling (pre-commit hooks).

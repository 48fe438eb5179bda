//! Workspace tooling package that carries the pre-commit hook configuration.

//! Unit tests for sqci configuration types.
//!
//! This module contains tests organised into:
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Defaults, normalisation and serialisation tests
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence tests

mod helpers;

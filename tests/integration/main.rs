//! End-to-end tests for the authoring host modules.

mod default_plugins_test;
mod helpers;
mod lifecycle_test;

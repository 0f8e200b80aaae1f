//! Test doubles shared by unit, integration, and behaviour tests.
pub mod support;

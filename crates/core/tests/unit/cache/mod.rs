//! Cache component tests.

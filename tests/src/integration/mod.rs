//! Cross-subsystem integration tests.

#[cfg(test)]
mod fixtures;
mod flows;
mod properties;

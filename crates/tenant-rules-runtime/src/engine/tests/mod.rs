//! Test modules for condition evaluation

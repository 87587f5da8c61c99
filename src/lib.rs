//! stacksweep - cleanup reaper for OpenStack-style clouds.
//!
//! Reclaims resources left behind by API test runs while protecting
//! everything that existed before the run (the baseline snapshot) and the
//! harness's own permanent fixtures (the preserve list).

pub mod cloud;
pub mod config;
pub mod sweep;

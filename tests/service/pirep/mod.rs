//! Tests for PirepService::submit.

mod submit;

use super::*;

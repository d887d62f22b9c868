//! Tests for the logbook job handler and worker loop.

mod handler;

use crewdesk_test_utils::prelude::*;

use crate::util::TestContextExt;

const IFC_USER_ID: &str = "ifc-1001";

//! Exit codes shared by the driver and the stage executables
//!
//! Codes 0-9 mean a plan was found, 10-19 that no plan exists or none was
//! found, 20-29 that a resource limit was hit, and 30-39 an error.

pub const SUCCESS: i32 = 0;
pub const SEARCH_PLAN_FOUND_AND_OUT_OF_MEMORY: i32 = 1;
pub const SEARCH_PLAN_FOUND_AND_OUT_OF_TIME: i32 = 2;
pub const SEARCH_PLAN_FOUND_AND_OUT_OF_MEMORY_AND_TIME: i32 = 3;

pub const TRANSLATE_UNSOLVABLE: i32 = 10;
pub const SEARCH_UNSOLVABLE: i32 = 11;
pub const SEARCH_UNSOLVED_INCOMPLETE: i32 = 12;

pub const TRANSLATE_OUT_OF_MEMORY: i32 = 20;
pub const TRANSLATE_OUT_OF_TIME: i32 = 21;
pub const SEARCH_OUT_OF_MEMORY: i32 = 22;
pub const SEARCH_OUT_OF_TIME: i32 = 23;
pub const SEARCH_OUT_OF_MEMORY_AND_TIME: i32 = 24;

pub const TRANSLATE_CRITICAL_ERROR: i32 = 30;
pub const TRANSLATE_INPUT_ERROR: i32 = 31;
pub const SEARCH_CRITICAL_ERROR: i32 = 32;
pub const SEARCH_INPUT_ERROR: i32 = 33;
pub const SEARCH_UNSUPPORTED: i32 = 34;
pub const DRIVER_CRITICAL_ERROR: i32 = 35;
pub const DRIVER_INPUT_ERROR: i32 = 36;
pub const DRIVER_UNSUPPORTED: i32 = 37;

/// Whether a search exit code means a plan was written
pub fn plan_found(exit_code: i32) -> bool {
    (SUCCESS..=SEARCH_PLAN_FOUND_AND_OUT_OF_MEMORY_AND_TIME).contains(&exit_code)
}

//! Process exit codes for the `holdstats` binary.
//! These codes are part of the public contract; scripts branch on them.

pub const SUCCESS: i32 = 0;
pub const COLLABORATOR_FAILURE: i32 = 1; // Source, scorer or store failed
pub const CONFIG_ERROR: i32 = 2; // Invalid config file, flag or environment
pub const CANCELLED: i32 = 3; // Interrupted before every holder was resolved

/// Exit code for a failed command. Errors outside the holdstats taxonomy
/// (output serialization, a closed stdout) count as failures, not config errors.
pub fn for_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<holdstats_core::StatsError>()
        .map_or(COLLABORATOR_FAILURE, holdstats_core::StatsError::exit_code)
}

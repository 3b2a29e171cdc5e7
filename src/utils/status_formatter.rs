/// Display label for a server state reported by the API.
pub fn format_state(state: &str) -> String {
    match state.to_lowercase().as_str() {
        "running" => "Running".to_string(),
        "stopped" => "Stopped".to_string(),
        "stopped in place" => "Stopped (in place)".to_string(),
        "starting" => "Starting".to_string(),
        "stopping" => "Stopping".to_string(),
        "locked" => "Locked".to_string(),
        _ => state.to_string(),
    }
}

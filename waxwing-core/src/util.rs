use waxwing_state::AlbumCluster;

/// Convert a number of seconds to a string in the format "HH:MM:SS".
/// If the number of hours is 0, it will be omitted.
pub fn seconds_to_hms_string(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// The total duration of an album cluster, for its header.
pub fn cluster_duration_string(cluster: &AlbumCluster) -> String {
    seconds_to_hms_string(cluster.duration_secs)
}

use std::fmt;

/// Availability of a title in the media library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Unknown,
    Pending,
    Processing,
    PartiallyAvailable,
    Available,
    Other(i64),
}

impl MediaStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => MediaStatus::Unknown,
            2 => MediaStatus::Pending,
            3 => MediaStatus::Processing,
            4 => MediaStatus::PartiallyAvailable,
            5 => MediaStatus::Available,
            other => MediaStatus::Other(other),
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaStatus::Unknown => write!(f, "Unknown"),
            MediaStatus::Pending => write!(f, "Pending"),
            MediaStatus::Processing => write!(f, "Processing"),
            MediaStatus::PartiallyAvailable => write!(f, "Partially Available"),
            MediaStatus::Available => write!(f, "Available"),
            MediaStatus::Other(code) => write!(f, "Status({})", code),
        }
    }
}

/// Approval state of a media request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    PendingApproval,
    Approved,
    Declined,
    Failed,
    Other(i64),
}

impl RequestStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => RequestStatus::PendingApproval,
            2 => RequestStatus::Approved,
            3 => RequestStatus::Declined,
            4 => RequestStatus::Failed,
            other => RequestStatus::Other(other),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::PendingApproval => write!(f, "Pending Approval"),
            RequestStatus::Approved => write!(f, "Approved"),
            RequestStatus::Declined => write!(f, "Declined"),
            RequestStatus::Failed => write!(f, "Failed"),
            RequestStatus::Other(code) => write!(f, "Status({})", code),
        }
    }
}

/// Label for an optional status, "Unknown" when absent
pub fn status_label<S: fmt::Display>(status: Option<S>) -> String {
    status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Display label for the API's `mediaType` string
pub fn media_type_label(media_type: Option<&str>) -> &str {
    match media_type {
        None => "Unknown",
        Some("movie") => "Movie",
        Some("tv") => "TV",
        Some(other) => other,
    }
}

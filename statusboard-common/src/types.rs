use serde::{Deserialize, Serialize};

/// Derived operational state of a service or of one of its locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Degraded,
    Down,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Up => "up",
            ServiceStatus::Degraded => "degraded",
            ServiceStatus::Down => "down",
            ServiceStatus::Unknown => "unknown",
        }
    }

    /// Rank used by the worst-case fold. `Unknown` carries no information
    /// and never outranks a real reading.
    pub fn severity(&self) -> u8 {
        match self {
            ServiceStatus::Unknown => 0,
            ServiceStatus::Up => 1,
            ServiceStatus::Degraded => 2,
            ServiceStatus::Down => 3,
        }
    }

    /// Fixed human-readable phrase shown on the service card
    pub fn message(&self) -> &'static str {
        match self {
            ServiceStatus::Up => "All systems operational",
            ServiceStatus::Degraded => "Degraded performance",
            ServiceStatus::Down => "Service outage",
            ServiceStatus::Unknown => "Status unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ServiceStatus::Unknown)
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(ServiceStatus::Up),
            "degraded" => Ok(ServiceStatus::Degraded),
            "down" => Ok(ServiceStatus::Down),
            "unknown" => Ok(ServiceStatus::Unknown),
            _ => Err(format!("Unknown service status: {}", s)),
        }
    }
}

/// How a service is monitored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceKind {
    /// Vendor exposes a status API (statuspage-style summary)
    #[serde(rename = "status-api")]
    StatusApi,
    /// Plain website availability check
    #[serde(rename = "website")]
    Website,
    #[default]
    #[serde(rename = "unknown")]
    #[serde(other)]
    Unknown,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::StatusApi => "status-api",
            ServiceKind::Website => "website",
            ServiceKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "status-api" | "status_api" | "statusapi" => Ok(ServiceKind::StatusApi),
            "website" => Ok(ServiceKind::Website),
            _ => Err(format!("Unknown service kind: {}", s)),
        }
    }
}

/// Statuspage-style overall indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusIndicator {
    None,
    Minor,
    Major,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusIndicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusIndicator::None => "none",
            StatusIndicator::Minor => "minor",
            StatusIndicator::Major => "major",
            StatusIndicator::Critical => "critical",
            StatusIndicator::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StatusIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use crate::types::{Agent, Generator};
use chrono::{SecondsFormat, Utc};

pub const AGENT_ID: &str = "https://example.org/agent/annotation-service";
pub const AGENT_NAME: &str = "Annotation Service";
pub const AGENT_TYPE: &str = "SoftwareAgent";

pub const GENERATOR_ID: &str = "https://wildlive.senckenberg.de/wlmo/current/";
pub const GENERATOR_TYPE: &str = "wlmo:Software";
pub const GENERATOR_NAME: &str = "WildLive Detection Service";

/// The fixed software agent recorded as the creator of every annotation.
pub fn software_agent() -> Agent {
    Agent {
        id: AGENT_ID.to_string(),
        name: AGENT_NAME.to_string(),
        agent_type: AGENT_TYPE.to_string(),
    }
}

/// The fixed descriptor of the service that generated the annotation.
pub fn generator() -> Generator {
    Generator {
        id: GENERATOR_ID.to_string(),
        generator_type: GENERATOR_TYPE.to_string(),
        name: GENERATOR_NAME.to_string(),
    }
}

/// Current UTC time as an ISO-8601 string with a `Z` suffix.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

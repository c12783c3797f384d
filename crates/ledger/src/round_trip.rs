use serde::Serialize;

/// Snapshot of a session's resumption state, handed to the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionIdentifiers {
    pub session_token: String,
    pub round_trip_index: u64,
    pub round_trip_token: String,
}

/// Monotonic turn counter bound to an immutable session token.
///
/// Tokens are `"{session_token}-{index:04}"`. Four digits is a minimum width: past 9999
/// the index keeps growing and the suffix widens (`-10000`), it never wraps.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    session_token: String,
    index: u64,
}

impl RoundTrip {
    pub fn new(session_token: impl Into<String>) -> Self {
        Self {
            session_token: session_token.into(),
            index: 0,
        }
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn token(&self) -> String {
        format_round_trip_token(&self.session_token, self.index)
    }

    pub fn advance(&mut self) -> u64 {
        self.index += 1;
        self.index
    }

    pub fn identifiers(&self) -> SessionIdentifiers {
        SessionIdentifiers {
            session_token: self.session_token.clone(),
            round_trip_index: self.index,
            round_trip_token: self.token(),
        }
    }
}

pub fn format_round_trip_token(session_token: &str, index: u64) -> String {
    format!("{session_token}-{index:04}")
}

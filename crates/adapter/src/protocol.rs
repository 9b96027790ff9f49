//! Protocol module - JSON message types for the probe adapter
//!
//! Line-delimited JSON: every request is one line, answered by exactly one
//! line. All messages carry `type` and `seq`; replies add `ts` (ms since epoch).

use serde::{Deserialize, Serialize};

use crate::types::{CellPos, CellState, Grid, GridError, StateGrid};

// ============== Client -> Core Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollideType {
    #[serde(rename = "collide")]
    Collide,
}

impl Default for CollideType {
    fn default() -> Self {
        Self::Collide
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStateType {
    #[serde(rename = "checkState")]
    CheckState,
}

impl Default for CheckStateType {
    fn default() -> Self {
        Self::CheckState
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PingType {
    #[serde(rename = "ping")]
    Ping,
}

impl Default for PingType {
    fn default() -> Self {
        Self::Ping
    }
}

/// Grid snapshot on the wire: `grid[y][x]` is a color or null
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridPayload(pub Vec<Vec<Option<i32>>>);

impl GridPayload {
    pub fn to_grid(&self) -> Result<Grid, GridError> {
        Grid::from_rows(self.0.clone())
    }
}

impl From<&Grid> for GridPayload {
    fn from(grid: &Grid) -> Self {
        Self(grid.to_rows())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPayload {
    pub x: i32,
    pub y: i32,
}

impl From<CellPos> for CellPayload {
    fn from(value: CellPos) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

impl From<CellPayload> for CellPos {
    fn from(value: CellPayload) -> Self {
        CellPos::new(value.x, value.y)
    }
}

/// Per-frame collision query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollideMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CollideType,
    pub seq: u64,
    pub x: i32,
    pub y: i32,
    pub grid: GridPayload,
    /// Overrides the server's squared collision radius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_distance: Option<i32>,
}

/// Resolution query after a bubble attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckStateMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CheckStateType,
    pub seq: u64,
    pub cell: CellPayload,
    pub color: i32,
    pub grid: GridPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: PingType,
    pub seq: u64,
}

// ============== Core -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionType {
    #[serde(rename = "collision")]
    Collision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateType {
    #[serde(rename = "state")]
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PongType {
    #[serde(rename = "pong")]
    Pong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_json")]
    InvalidJson,
    #[serde(rename = "invalid_grid")]
    InvalidGrid,
    #[serde(rename = "unknown_type")]
    UnknownType,
}

/// `states[y][x]` carried as the camelCase names from [`CellState::as_str`]
mod state_rows {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::types::CellState;

    pub fn serialize<S>(rows: &[Vec<CellState>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.iter().map(CellState::as_str).collect())
            .collect();
        names.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<CellState>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Vec<String>>::deserialize(deserializer)?
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|name| {
                        CellState::from_str(name)
                            .ok_or_else(|| D::Error::custom(format!("invalid cell state: {}", name)))
                    })
                    .collect()
            })
            .collect()
    }
}

/// Reply to `collide`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionMessage {
    #[serde(rename = "type")]
    pub msg_type: CollisionType,
    pub seq: u64,
    pub ts: u64,
    pub collided: bool,
    pub attach: Option<CellPayload>,
}

/// Reply to `checkState`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMessage {
    #[serde(rename = "type")]
    pub msg_type: StateType,
    pub seq: u64,
    pub ts: u64,
    pub cluster_size: usize,
    pub poppable: bool,
    /// `states[y][x]`
    #[serde(with = "state_rows")]
    pub states: Vec<Vec<CellState>>,
    /// Cells the caller takes off the grid right away
    pub remove: Vec<CellPayload>,
    /// Cells that fall
    pub detached: Vec<CellPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PongMessage {
    #[serde(rename = "type")]
    pub msg_type: PongType,
    pub seq: u64,
    pub ts: u64,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    /// None when the request was too broken to read a seq from
    pub seq: Option<u64>,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Any outbound line
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Collision(CollisionMessage),
    State(StateMessage),
    Pong(PongMessage),
    Error(ErrorMessage),
}

impl Reply {
    pub fn seq(&self) -> Option<u64> {
        match self {
            Reply::Collision(m) => Some(m.seq),
            Reply::State(m) => Some(m.seq),
            Reply::Pong(m) => Some(m.seq),
            Reply::Error(m) => m.seq,
        }
    }
}

/// Parse an incoming line
///
/// A well-formed object with an unrecognized `type` is not a hard error; it
/// comes back as [`ParsedMessage::Unknown`] so the server can answer it.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "collide")]
        Collide(CollideMessage),
        #[serde(rename = "checkState")]
        CheckState(CheckStateMessage),
        #[serde(rename = "ping")]
        Ping(PingMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Collide(m)) => Ok(ParsedMessage::Collide(m)),
        Ok(InboundMessage::CheckState(m)) => Ok(ParsedMessage::CheckState(m)),
        Ok(InboundMessage::Ping(m)) => Ok(ParsedMessage::Ping(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                #[serde(borrow)]
                msg_type: Option<&'a str>,
                seq: Option<u64>,
            }
            let head = serde_json::from_str::<TypeOnly>(json)?;
            let msg_type = head.msg_type.unwrap_or("unknown");
            if !matches!(msg_type, "collide" | "checkState" | "ping") {
                return Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: head.seq,
                    msg_type: msg_type.to_string(),
                }));
            }
            Err(e)
        }
    }
}

/// Best-effort `seq` of a line that failed to parse
pub fn extract_seq(json: &str) -> Option<u64> {
    #[derive(Deserialize)]
    struct SeqOnly {
        seq: Option<u64>,
    }
    serde_json::from_str::<SeqOnly>(json).ok().and_then(|s| s.seq)
}

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Collide(CollideMessage),
    CheckState(CheckStateMessage),
    Ping(PingMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: Option<u64>,
    pub msg_type: String,
}

// ============== Utility Functions ==============

/// Create a collide request
pub fn create_collide(seq: u64, x: i32, y: i32, grid: &Grid) -> CollideMessage {
    CollideMessage {
        msg_type: CollideType::Collide,
        seq,
        x,
        y,
        grid: GridPayload::from(grid),
        min_distance: None,
    }
}

/// Create a checkState request
pub fn create_check_state(seq: u64, cell: CellPos, color: i32, grid: &Grid) -> CheckStateMessage {
    CheckStateMessage {
        msg_type: CheckStateType::CheckState,
        seq,
        cell: cell.into(),
        color,
        grid: GridPayload::from(grid),
    }
}

/// Create a collision reply
pub fn create_collision(seq: u64, attach: Option<CellPos>) -> CollisionMessage {
    CollisionMessage {
        msg_type: CollisionType::Collision,
        seq,
        ts: current_timestamp_ms(),
        collided: attach.is_some(),
        attach: attach.map(CellPayload::from),
    }
}

/// Create a state reply from a resolution result
pub fn create_state(seq: u64, states: &StateGrid) -> StateMessage {
    let mut remove = Vec::new();
    let mut detached = Vec::new();
    for (state, cell) in CellState::ALL
        .into_iter()
        .filter(CellState::leaves_grid)
        .flat_map(|state| states.cells_in(state).map(move |cell| (state, cell)))
    {
        if state == CellState::Remove {
            remove.push(CellPayload::from(cell));
        } else {
            detached.push(CellPayload::from(cell));
        }
    }

    StateMessage {
        msg_type: StateType::State,
        seq,
        ts: current_timestamp_ms(),
        cluster_size: states.cluster_size(),
        poppable: states.is_poppable(),
        states: states.to_rows(),
        remove,
        detached,
    }
}

/// Create a pong
pub fn create_pong(seq: u64) -> PongMessage {
    PongMessage {
        msg_type: PongType::Pong,
        seq,
        ts: current_timestamp_ms(),
    }
}

/// Create an error message
pub fn create_error(seq: Option<u64>, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

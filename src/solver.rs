//! Client side of the external solver: request encoding, trace decoding and
//! the HTTP round trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::SolveError;
use crate::model::{GridModel, Position, Step, StepKind, StepTrace};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
    Greedy,
}

pub struct AlgorithmInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub complexity: &'static str,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Greedy,
    ];

    /// Identifier used on the wire and in the selector.
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Greedy => "greedy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn info(self) -> AlgorithmInfo {
        match self {
            Algorithm::Bfs => AlgorithmInfo {
                name: "Breadth-First Search (BFS)",
                description: "Explores all neighbors level by level. Guarantees shortest path in unweighted grids.",
                complexity: "O(V + E)",
            },
            Algorithm::Dfs => AlgorithmInfo {
                name: "Depth-First Search (DFS)",
                description: "Explores as deep as possible before backtracking. Not guaranteed shortest path.",
                complexity: "O(V + E)",
            },
            Algorithm::Dijkstra => AlgorithmInfo {
                name: "Dijkstra's Algorithm",
                description: "Uses a priority queue to expand lowest-cost nodes. Guarantees shortest path.",
                complexity: "O((V + E) log V)",
            },
            Algorithm::AStar => AlgorithmInfo {
                name: "A* Algorithm",
                description: "Uses a heuristic to prioritize nodes closer to goal. Efficient and finds shortest path.",
                complexity: "O(E)",
            },
            Algorithm::Greedy => AlgorithmInfo {
                name: "Greedy Best-First Search",
                description: "Prioritizes nodes closest to goal. Very fast, but not guaranteed shortest path.",
                complexity: "O(E)",
            },
        }
    }
}

/// Body of `POST /solve`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolveRequest {
    pub grid: Vec<Vec<u8>>,
    pub start: Position,
    pub goal: Position,
    pub algorithm: Algorithm,
}

impl SolveRequest {
    /// Snapshot of the grid at the moment the solve was requested.
    pub fn snapshot(grid: &GridModel, algorithm: Algorithm) -> Self {
        Self {
            grid: grid.to_wire(),
            start: grid.start(),
            goal: grid.goal(),
            algorithm,
        }
    }
}

#[derive(Deserialize)]
struct SolveResponse {
    #[serde(default)]
    steps: Option<Vec<Value>>,
}

fn decode_position(value: &Value) -> Option<Position> {
    let pair = value.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    let row = u32::try_from(pair[0].as_u64()?).ok()?;
    let col = u32::try_from(pair[1].as_u64()?).ok()?;
    Some(Position::new(row, col))
}

/// `None` for entries without a known `type` or a `[row, col]` `pos`.
fn decode_step(value: &Value) -> Option<Step> {
    let kind = StepKind::from_wire(value.get("type")?.as_str()?)?;
    let position = decode_position(value.get("pos")?)?;
    Some(Step { kind, position })
}

/// Parses a success body. A missing or null `steps` is an empty trace;
/// malformed entries are kept as gaps.
pub fn decode_trace(body: &str) -> Result<StepTrace, SolveError> {
    let response: SolveResponse = serde_json::from_str(body)?;
    let entries = response
        .steps
        .unwrap_or_default()
        .iter()
        .map(decode_step)
        .collect();
    Ok(StepTrace::new(entries))
}

fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn network(value: JsValue) -> SolveError {
    SolveError::Network(js_message(&value))
}

/// POSTs the request and decodes the trace. No timeout and no retry.
pub async fn solve(url: &str, request: &SolveRequest) -> Result<StepTrace, SolveError> {
    let body = serde_json::to_string(request).map_err(SolveError::Encode)?;
    let window =
        web_sys::window().ok_or_else(|| SolveError::Network("no global `window`".into()))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&JsValue::from_str(&body));
    let req = Request::new_with_str_and_init(url, &init).map_err(network)?;
    req.headers()
        .set("Content-Type", "application/json")
        .map_err(network)?;

    let resp: Response = JsFuture::from(window.fetch_with_request(&req))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;
    let text = JsFuture::from(resp.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Err(SolveError::Server {
            status: resp.status(),
            body: text,
        });
    }
    decode_trace(&text)
}

/// Identifies one solve request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveTicket(u64);

/// Hands out increasing tickets so only the newest in-flight response is
/// applied; anything older arrives stale and is dropped.
#[derive(Debug, Default)]
pub struct SolveTracker {
    latest: u64,
}

impl SolveTracker {
    pub fn begin(&mut self) -> SolveTicket {
        self.latest += 1;
        SolveTicket(self.latest)
    }

    pub fn is_current(&self, ticket: SolveTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Makes every outstanding ticket stale, e.g. on reset.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

use tokio::io::BufReader;
use tokio_test::io::Builder;

use bubble_shooter::adapter::protocol::{create_check_state, create_collide};
use bubble_shooter::adapter::server::{serve_lines, ServerConfig};
use bubble_shooter::types::{Bubble, CellPos, Grid};

fn replies(output: &[u8]) -> Vec<serde_json::Value> {
    std::str::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn adapter_stdio_answers_every_request_in_order() {
    let mut grid = Grid::default();
    for x in 2..=4 {
        grid.set(x, 0, Some(Bubble::new(1)));
    }
    grid.set(3, 1, Some(Bubble::new(2)));

    let collide = serde_json::to_string(&create_collide(1, 112, 20, &grid)).unwrap();
    let check = serde_json::to_string(&create_check_state(2, CellPos::new(3, 0), 1, &grid)).unwrap();

    // Lines arrive split across reads the way a pipe delivers them.
    let (head, tail) = check.split_at(check.len() / 2);
    let reader = Builder::new()
        .read(collide.as_bytes())
        .read(b"\n\n")
        .read(head.as_bytes())
        .read(tail.as_bytes())
        .read(b"\n{\"type\":\"ping\",\"seq\":3}\n")
        .build();

    let mut output: Vec<u8> = Vec::new();
    let config = ServerConfig::default();
    let count = tokio_test::block_on(serve_lines(BufReader::new(reader), &mut output, &config)).unwrap();
    assert_eq!(count, 3);

    let replies = replies(&output);
    assert_eq!(replies.len(), 3);

    assert_eq!(replies[0]["type"], "collision");
    assert_eq!(replies[0]["seq"], 1);
    assert_eq!(replies[0]["collided"], true);

    assert_eq!(replies[1]["type"], "state");
    assert_eq!(replies[1]["seq"], 2);
    assert_eq!(replies[1]["cluster_size"], 3);
    assert_eq!(replies[1]["poppable"], true);
    assert_eq!(replies[1]["states"][0][3], "remove");
    assert_eq!(replies[1]["states"][1][3], "detached");
    assert_eq!(replies[1]["remove"].as_array().unwrap().len(), 3);
    assert_eq!(replies[1]["detached"][0]["x"], 3);
    assert_eq!(replies[1]["detached"][0]["y"], 1);

    assert_eq!(replies[2]["type"], "pong");
    assert_eq!(replies[2]["seq"], 3);
}

#[test]
fn adapter_stdio_keeps_serving_after_bad_lines() {
    let reader = Builder::new()
        .read(b"not json\n")
        .read(b"{\"type\":\"collide\",\"seq\":5,\"x\":0,\"y\":0,\"grid\":[[1],[1,1]]}\n")
        .read(b"{\"type\":\"explode\",\"seq\":6}\n")
        .read(b"{\"type\":\"ping\",\"seq\":7}\n")
        .build();

    let mut output: Vec<u8> = Vec::new();
    let config = ServerConfig::default();
    let count = tokio_test::block_on(serve_lines(BufReader::new(reader), &mut output, &config)).unwrap();
    assert_eq!(count, 4);

    let replies = replies(&output);
    assert_eq!(replies[0]["type"], "error");
    assert_eq!(replies[0]["code"], "invalid_json");
    assert!(replies[0]["seq"].is_null());

    assert_eq!(replies[1]["code"], "invalid_grid");
    assert_eq!(replies[1]["seq"], 5);

    assert_eq!(replies[2]["code"], "unknown_type");
    assert_eq!(replies[2]["seq"], 6);

    assert_eq!(replies[3]["type"], "pong");
}

#[test]
fn adapter_stdio_empty_input_writes_nothing() {
    let reader = Builder::new().build();
    let mut output: Vec<u8> = Vec::new();
    let count = tokio_test::block_on(serve_lines(
        BufReader::new(reader),
        &mut output,
        &ServerConfig::default(),
    ))
    .unwrap();
    assert_eq!(count, 0);
    assert!(output.is_empty());
}

use once_cell::sync::Lazy;

use crate::board::{NODE_COUNT, Node};

/// Sea edges cost this many times their length to a traveller without money.
pub const SEA_PENALTY: f64 = 1.75;

type DistanceRow = [f64; NODE_COUNT];

/// `[rich, poor]` all-pairs tables, filled on first use.
static DISTANCES: Lazy<[Vec<DistanceRow>; 2]> = Lazy::new(|| {
    let table = |poor| Node::ALL.iter().map(|&source| dijkstra(source, poor)).collect();
    [table(false), table(true)]
});

/// Shortest land/sea distance from `source` to every node, indexed by node.
///
/// Air routes are ignored. With `poor` set, sea edges are stretched by
/// [`SEA_PENALTY`].
pub fn shortest_distances(source: Node, poor: bool) -> &'static DistanceRow {
    &DISTANCES[usize::from(poor)][source.index()]
}

fn dijkstra(source: Node, poor: bool) -> DistanceRow {
    let mut dist = [f64::INFINITY; NODE_COUNT];
    let mut visited = [false; NODE_COUNT];
    dist[source.index()] = 0.0;

    // Dense O(V^2) scan: 42 nodes, and ties go to the lowest index.
    while let Some(current) = (0..NODE_COUNT)
        .filter(|&i| !visited[i] && dist[i].is_finite())
        .min_by(|&a, &b| dist[a].total_cmp(&dist[b]))
    {
        let node = Node::from_index(current);
        for &(next, weight) in node.land_routes() {
            let candidate = dist[current] + f64::from(weight);
            let slot = &mut dist[next.index()];
            *slot = slot.min(candidate);
        }
        for &(next, weight) in node.sea_routes() {
            let cost = if poor {
                SEA_PENALTY * f64::from(weight)
            } else {
                f64::from(weight)
            };
            let candidate = dist[current] + cost;
            let slot = &mut dist[next.index()];
            *slot = slot.min(candidate);
        }
        visited[current] = true;
    }
    dist
}

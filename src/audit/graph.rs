use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// File-level import graph: an edge `a -> b` means `a` imports `b`.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: HashSet<PathBuf>,
    edges: HashMap<PathBuf, HashSet<PathBuf>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, path: PathBuf) {
        self.nodes.insert(path);
    }

    pub fn add_edge(&mut self, from: PathBuf, to: PathBuf) {
        self.nodes.insert(from.clone());
        self.nodes.insert(to.clone());
        self.edges.entry(from).or_default().insert(to);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashSet::len).sum()
    }

    /// Files imported by `path`.
    pub fn dependencies_of(&self, path: &Path) -> impl Iterator<Item = &PathBuf> {
        self.edges.get(path).into_iter().flatten()
    }

    /// Number of files within `sources` that import `target`.
    pub fn inbound_count(&self, target: &Path, sources: &HashSet<PathBuf>) -> usize {
        sources
            .iter()
            .filter(|source| self.edges.get(*source).is_some_and(|deps| deps.contains(target)))
            .count()
    }

    /// Breadth-first walk from `seeds` over import edges.
    ///
    /// Every node is enqueued at most once, so cycles terminate. Seeds are part of the
    /// result even when they are not graph nodes.
    pub fn reachable_from<'a, I>(&self, seeds: I) -> HashSet<PathBuf>
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut queue: VecDeque<PathBuf> = VecDeque::new();

        for seed in seeds {
            if visited.insert(seed.clone()) {
                queue.push_back(seed.clone());
            }
        }

        while let Some(current) = queue.pop_front() {
            for dep in self.dependencies_of(&current) {
                if visited.insert(dep.clone()) {
                    queue.push_back(dep.clone());
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/site/src/{}.ts", name))
    }

    #[test]
    fn test_cycle_is_fully_reached_and_terminates() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(p("a"), p("b"));
        graph.add_edge(p("b"), p("c"));
        graph.add_edge(p("c"), p("a"));
        graph.add_node(p("orphan"));

        let used = graph.reachable_from(&[p("a")]);
        assert_eq!(used.len(), 3);
        assert!(used.contains(&p("a")));
        assert!(used.contains(&p("b")));
        assert!(used.contains(&p("c")));
        assert!(!used.contains(&p("orphan")));
    }

    #[test]
    fn test_reachability_is_transitive() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(p("page"), p("hero"));
        graph.add_edge(p("hero"), p("button"));
        graph.add_edge(p("button"), p("icon"));
        graph.add_edge(p("unused"), p("icon"));

        let used = graph.reachable_from(&[p("page")]);
        assert!(used.contains(&p("icon")));
        assert!(!used.contains(&p("unused")));
    }

    #[test]
    fn test_edges_are_deduplicated() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(p("a"), p("b"));
        graph.add_edge(p("a"), p("b"));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_count(), 2);

        let sources: HashSet<PathBuf> = [p("a")].into_iter().collect();
        assert_eq!(graph.inbound_count(&p("b"), &sources), 1);
        assert_eq!(graph.inbound_count(&p("a"), &sources), 0);
    }
}

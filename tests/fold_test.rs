use lemmagraph::graph::{fold, DependencyGraph, FoldConfig, GraphBuilder, GraphEdge, Vocabulary};
use lemmagraph::token::{TokenRecord, Upos};
use std::collections::HashMap;

fn tok(doc: u64, sent: u32, id: u32, head: u32, lemma: &str, upos: Upos) -> TokenRecord {
    TokenRecord::new(doc, sent, id, head, lemma, upos)
}

fn degree_map(graph: &DependencyGraph) -> HashMap<&str, u64> {
    graph.nodes.iter().map(|n| (n.label.as_str(), n.degree)).collect()
}

/// A small two-document corpus with repeated relations and a dangling head
fn corpus() -> Vec<TokenRecord> {
    vec![
        // "the blade cuts the sheet"
        tok(0, 0, 1, 2, "the", Upos::Det),
        tok(0, 0, 2, 3, "blade", Upos::Noun),
        tok(0, 0, 3, 0, "cut", Upos::Verb),
        tok(0, 0, 4, 5, "the", Upos::Det),
        tok(0, 0, 5, 3, "sheet", Upos::Noun),
        // "the blade rotates"
        tok(0, 1, 1, 2, "the", Upos::Det),
        tok(0, 1, 2, 3, "blade", Upos::Noun),
        tok(0, 1, 3, 0, "rotate", Upos::Verb),
        // "cut sheet" with a head pointing outside the sentence
        tok(1, 0, 1, 0, "cut", Upos::Verb),
        tok(1, 0, 2, 1, "sheet", Upos::Noun),
        tok(1, 0, 3, 9, "blade", Upos::Noun),
    ]
}

#[test]
fn test_no_dangling_edge_ids() {
    let tokens = corpus();
    for config in [
        FoldConfig::default(),
        FoldConfig::default().undirected(),
        FoldConfig::default().deduplicated(),
        FoldConfig::default().undirected().deduplicated(),
    ] {
        let vocab = Vocabulary::build(&tokens);
        let graph = fold(&tokens, &vocab, &config).unwrap();
        for edge in &graph.edges {
            assert!(vocab.contains(edge.from));
            assert!(vocab.contains(edge.to));
        }
        assert_eq!(graph.node_count(), vocab.len());
    }
}

#[test]
fn test_chain_root_a_b() {
    // root <- a <- b
    let tokens = vec![
        tok(0, 0, 1, 0, "root", Upos::Verb),
        tok(0, 0, 2, 1, "a", Upos::Noun),
        tok(0, 0, 3, 2, "b", Upos::Adj),
    ];
    let vocab = Vocabulary::build(&tokens);
    let id = |l: &str| vocab.id_of(l).unwrap();

    let directed = fold(&tokens, &vocab, &FoldConfig::default()).unwrap();
    assert_eq!(directed.edge_count(), 2);
    assert!(directed.edges.contains(&GraphEdge::new(id("root"), id("a"), 1)));
    assert!(directed.edges.contains(&GraphEdge::new(id("a"), id("b"), 1)));

    let degrees = degree_map(&directed);
    assert_eq!(degrees["root"], 1);
    assert_eq!(degrees["a"], 2);
    assert_eq!(degrees["b"], 1);

    let undirected = fold(&tokens, &vocab, &FoldConfig::default().undirected()).unwrap();
    // each directed edge is present in both directions
    assert_eq!(undirected.edge_count(), 4);
    for node in &undirected.nodes {
        assert_eq!(node.degree, degrees[node.label.as_str()]);
    }
}

#[test]
fn test_undirected_degree_is_half_of_mirrored_endpoint_count() {
    let tokens = corpus();
    let vocab = Vocabulary::build(&tokens);
    for config in [
        FoldConfig::default().undirected(),
        FoldConfig::default().undirected().deduplicated(),
    ] {
        let graph = fold(&tokens, &vocab, &config).unwrap();
        let directed = fold(&tokens, &vocab, &FoldConfig { directed: true, ..config }).unwrap();

        // every edge stands for `weight` relation rows
        let mut endpoints = vec![0u64; vocab.len()];
        for edge in &graph.edges {
            endpoints[edge.from.index()] += edge.weight;
            endpoints[edge.to.index()] += edge.weight;
        }
        for node in &graph.nodes {
            assert_eq!(endpoints[node.id.index()] % 2, 0);
            assert_eq!(node.degree, endpoints[node.id.index()] / 2);
            assert_eq!(node.degree, directed.nodes[node.id.index()].degree);
        }
    }
}

#[test]
fn test_degree_depends_on_edge_mode() {
    // "sharp blade" twice, "dull blade" once
    let tokens = vec![
        tok(0, 0, 1, 2, "sharp", Upos::Adj),
        tok(0, 0, 2, 0, "blade", Upos::Noun),
        tok(1, 0, 1, 2, "sharp", Upos::Adj),
        tok(1, 0, 2, 0, "blade", Upos::Noun),
        tok(2, 0, 1, 2, "dull", Upos::Adj),
        tok(2, 0, 2, 0, "blade", Upos::Noun),
    ];
    let vocab = Vocabulary::build(&tokens);

    let weighted = fold(&tokens, &vocab, &FoldConfig::default()).unwrap();
    let dedup = fold(&tokens, &vocab, &FoldConfig::default().deduplicated()).unwrap();
    assert_ne!(weighted.nodes, dedup.nodes);

    let w = degree_map(&weighted);
    assert_eq!((w["blade"], w["sharp"], w["dull"]), (3, 2, 1));
    let d = degree_map(&dedup);
    assert_eq!((d["blade"], d["sharp"], d["dull"]), (2, 1, 1));

    let size = |graph: &DependencyGraph, lemma: &str| {
        graph.node(vocab.id_of(lemma).unwrap()).unwrap().size
    };
    // governed twice outranks governed once only while multiplicity is kept
    assert_eq!(size(&weighted, "sharp"), 17.5);
    assert_eq!(size(&weighted, "dull"), 5.0);
    assert_eq!(size(&dedup, "sharp"), size(&dedup, "dull"));
    assert_eq!(size(&weighted, "blade"), 30.0);
    assert_eq!(size(&dedup, "blade"), 30.0);
}

#[test]
fn test_weighted_counts_are_exact() {
    let tokens = corpus();
    let vocab = Vocabulary::build(&tokens);
    let id = |l: &str| vocab.id_of(l).unwrap();

    let weighted = fold(&tokens, &vocab, &FoldConfig::default()).unwrap();
    let weight = |from: &str, to: &str| {
        weighted
            .edges
            .iter()
            .find(|e| e.from == id(from) && e.to == id(to))
            .map(|e| e.weight)
    };

    assert_eq!(weight("blade", "the"), Some(2));
    assert_eq!(weight("cut", "blade"), Some(1));
    assert_eq!(weight("cut", "sheet"), Some(2));
    assert_eq!(weight("sheet", "the"), Some(1));
    assert_eq!(weight("rotate", "blade"), Some(1));
    // the dangling head contributes nothing
    assert_eq!(weighted.total_weight(), 7);

    // degree keeps multiplicity: "cut" heads sheet twice and blade once
    assert_eq!(weighted.node(id("cut")).unwrap().degree, 3);

    let dedup = fold(&tokens, &vocab, &FoldConfig::default().deduplicated()).unwrap();
    assert_eq!(dedup.node(id("cut")).unwrap().degree, 2);
    assert_eq!(dedup.edge_count(), weighted.edge_count());
    assert!(dedup.edges.iter().all(|e| e.weight == 1));
    assert!(dedup.edge_count() as u64 <= weighted.total_weight());
}

#[test]
fn test_size_monotonic_in_degree() {
    let tokens = corpus();
    for config in [FoldConfig::default(), FoldConfig::default().undirected()] {
        let (_, graph) = GraphBuilder::new(config).build(&tokens).unwrap();
        for u in &graph.nodes {
            assert!(u.size >= 5.0 && u.size <= 30.0);
            for v in &graph.nodes {
                if u.degree <= v.degree {
                    assert!(u.size <= v.size);
                }
            }
        }
    }
}

#[test]
fn test_root_rows_contribute_no_edges() {
    // every token is a root
    let tokens: Vec<TokenRecord> = (0..5)
        .map(|s| tok(0, s, 1, 0, &format!("w{}", s % 3), Upos::Noun))
        .collect();
    let (_, graph) = GraphBuilder::default().build(&tokens).unwrap();
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.nodes.iter().all(|n| n.degree == 0 && n.size == 5.0));
}

#[test]
fn test_the_cat_sat_end_to_end() {
    let tokens = vec![
        tok(0, 0, 1, 2, "The", Upos::Det),
        tok(0, 0, 2, 3, "cat", Upos::Noun),
        tok(0, 0, 3, 0, "sat", Upos::Verb),
    ];
    let (vocab, graph) = GraphBuilder::default().build(&tokens).unwrap();
    assert_eq!(vocab.len(), 3);

    let weights: HashMap<(&str, &str), u64> = graph
        .edges
        .iter()
        .map(|e| ((graph.label(e.from).unwrap(), graph.label(e.to).unwrap()), e.weight))
        .collect();
    assert_eq!(weights.len(), 2);
    assert_eq!(weights[&("sat", "cat")], 1);
    assert_eq!(weights[&("cat", "The")], 1);

    let degrees = degree_map(&graph);
    assert_eq!(degrees["sat"], 1);
    assert_eq!(degrees["cat"], 2);
    assert_eq!(degrees["The"], 1);

    let cat = graph.node(vocab.id_of("cat").unwrap()).unwrap();
    assert_eq!(cat.upos, Upos::Noun);
    assert_eq!(cat.size, 30.0);
}

#[test]
fn test_refold_is_deterministic() {
    let tokens = corpus();
    let mut shuffled = tokens.clone();
    shuffled.reverse();

    let builder = GraphBuilder::default();
    let (va, a) = builder.build(&tokens).unwrap();
    let (vb, b) = builder.build(&shuffled).unwrap();
    assert_eq!(va, vb);
    assert_eq!(a, b);
}

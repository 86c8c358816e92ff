pub mod claims_graph;

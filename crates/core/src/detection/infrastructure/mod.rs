pub mod skin_edge_detector;

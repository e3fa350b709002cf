//! Property tests for the normalization and trimming invariants.

use nalgebra_sparse::convert::serial::convert_coo_dense;
use proptest::prelude::*;

use csn_core::{Csn, TrimConfig};
use csn_core::matrix::{row_stochastic, row_totals, symmetrize};

/// Random square count matrices: dimension 1..7, entries 0 or up to 20.0,
/// biased toward zero so sparse rows (including all-zero rows) are common.
fn arb_counts() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..7).prop_flat_map(|n| {
        prop::collection::vec(
            prop::collection::vec(
                prop_oneof![3 => Just(0.0), 2 => (0.5..20.0f64)],
                n,
            ),
            n,
        )
    })
}

fn to_coo(rows: &[Vec<f64>]) -> nalgebra_sparse::CooMatrix<f64> {
    let n = rows.len();
    let mut coo = nalgebra_sparse::CooMatrix::new(n, n);
    for (i, row) in rows.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            if v != 0.0 {
                coo.push(i, j, v);
            }
        }
    }
    coo
}

proptest! {
    #[test]
    fn transition_rows_sum_to_one_or_zero(rows in arb_counts()) {
        let counts = to_coo(&rows);
        let totals = row_totals(&counts);
        let trans = convert_coo_dense(&row_stochastic(&counts));
        for (i, total) in totals.iter().enumerate() {
            let row_sum: f64 = trans.row(i).sum();
            if *total > 0.0 {
                prop_assert!((row_sum - 1.0).abs() < 1e-9, "row {} sums to {}", i, row_sum);
            } else {
                prop_assert!(row_sum.abs() < 1e-12, "zero row {} got sum {}", i, row_sum);
            }
        }
    }

    #[test]
    fn symmetrize_is_idempotent_after_first_application(rows in arb_counts()) {
        let counts = to_coo(&rows);
        let once = symmetrize(&counts);
        let twice = symmetrize(&once);
        prop_assert_eq!(convert_coo_dense(&once), convert_coo_dense(&twice));
    }

    #[test]
    fn graph_matches_transition_support(rows in arb_counts()) {
        let n = rows.len();
        let csn = Csn::new(rows, false).expect("square input builds");
        prop_assert_eq!(csn.nnodes(), n);
        prop_assert_eq!(csn.graph().node_count(), n);

        let trans = convert_coo_dense(csn.transmat());
        for i in 0..n {
            for j in 0..n {
                let has_edge = csn.graph().contains_edge(
                    petgraph::graph::NodeIndex::new(i),
                    petgraph::graph::NodeIndex::new(j),
                );
                prop_assert_eq!(
                    has_edge,
                    trans[(i, j)] > 0.0,
                    "edge ({}, {}) disagrees with transmat", i, j
                );
            }
        }
    }

    #[test]
    fn trim_with_everything_disabled_keeps_all_nodes(rows in arb_counts()) {
        let n = rows.len();
        let csn = Csn::new(rows, false).expect("builds");
        let view = csn.trim(&TrimConfig { by_inflow: false, by_outflow: false, min_count: 0.0 });
        prop_assert_eq!(view.indices, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn trim_retains_the_msn_under_flow_filters(rows in arb_counts()) {
        let csn = Csn::new(rows, false).expect("builds");
        let msn = csn.most_sampled_node();
        let view = csn.trim(&TrimConfig::default());
        prop_assert!(view.indices.contains(&msn), "MSN {} missing from {:?}", msn, view.indices);
    }

    #[test]
    fn trim_indices_ascend_and_match_matrix_dims(rows in arb_counts()) {
        let csn = Csn::new(rows, false).expect("builds");
        let view = csn.trim(&TrimConfig::default());
        prop_assert!(view.indices.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(view.indices.len(), view.countmat.nrows());
        prop_assert_eq!(view.indices.len(), view.countmat.ncols());
        prop_assert_eq!(view.indices.len(), view.transmat.nrows());
        prop_assert_eq!(view.indices.len(), view.graph.node_count());
    }
}

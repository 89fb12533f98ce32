#![no_main]
use engine::{link_unit, LinkerConfig};
use featgraph::bundle::UnitBundle;
use libfuzzer_sys::fuzz_target;

// Linking a validated unit must not panic, and a second run must be a no-op.
fuzz_target!(|data: &[u8]| {
    if let Ok(mut bundle) = serde_json::from_slice::<UnitBundle>(data) {
        if bundle.validate().is_ok() {
            let config = LinkerConfig::default();
            link_unit(&bundle.tree, &bundle.analysis, &mut bundle.graph, &config);
            let again = link_unit(&bundle.tree, &bundle.analysis, &mut bundle.graph, &config);
            assert_eq!(again.edges_added, 0);
        }
    }
});

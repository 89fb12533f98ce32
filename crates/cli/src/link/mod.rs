//! `featgraph link` and `featgraph check`.

use anyhow::{bail, Result};
use engine::{link_unit, LinkStats, LinkerConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};

use crate::args::{CheckArgs, LinkArgs};
use crate::bundle::{load_unit, save_unit, UnitBundle};
use crate::config::load_config;
use crate::output::{print_summary, FailedUnit, Summary, UnitReport};
use crate::ui;

fn init_logging(debug: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::OFF
    } else if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads, links and reports one unit. The linked bundle is handed back only
/// when `keep` is set, so the caller can write it out.
fn link_one(
    path: &Path,
    config: &LinkerConfig,
    keep: bool,
) -> Result<(UnitReport, Option<UnitBundle>)> {
    let mut bundle = load_unit(path)?;
    debug!(path = %path.display(), nodes = bundle.graph.node_count(), "unit loaded");
    let stats = link_unit(&bundle.tree, &bundle.analysis, &mut bundle.graph, config);
    let report = UnitReport {
        path: path.to_path_buf(),
        nodes: bundle.graph.node_count(),
        edges: bundle.graph.edge_counts(),
        stats,
    };
    Ok((report, keep.then_some(bundle)))
}

pub fn run_link(args: LinkArgs) -> Result<()> {
    init_logging(args.debug, args.quiet);
    if args.output.is_some() && args.units.len() != 1 {
        bail!("--output requires exactly one unit");
    }
    let config = load_config(args.config.as_deref())?.linker;
    debug!(?config, "linker configuration");
    info!(units = args.units.len(), "Link started");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build()?;
    let keep = args.output.is_some();
    let results: Vec<(PathBuf, Result<(UnitReport, Option<UnitBundle>)>)> = pool.install(|| {
        args.units
            .par_iter()
            .map(|path| (path.clone(), link_one(path, &config, keep)))
            .collect()
    });

    let mut summary = Summary {
        units: Vec::new(),
        failed: Vec::new(),
        total: LinkStats::default(),
    };
    for (path, result) in results {
        match result {
            Ok((report, bundle)) => {
                if let (Some(out), Some(bundle)) = (&args.output, &bundle) {
                    save_unit(out, bundle)?;
                    info!(path = %out.display(), "linked unit written");
                }
                summary.total += report.stats;
                summary.units.push(report);
            }
            Err(e) => {
                error!(path = %path.display(), "{e:#}");
                summary.failed.push(FailedUnit {
                    path,
                    error: format!("{e:#}"),
                });
            }
        }
    }
    info!(
        linked = summary.units.len(),
        failed = summary.failed.len(),
        "Link completed"
    );
    print_summary(&summary, args.format)?;
    if !summary.failed.is_empty() {
        bail!("{} unit(s) failed to load", summary.failed.len());
    }
    Ok(())
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    let mut failed = 0usize;
    for path in &args.units {
        match load_unit(path) {
            Ok(bundle) => ui::print_success(
                "OK",
                &format!(
                    "{} ({} tree elements, {} nodes, {} analysed methods)",
                    path.display(),
                    bundle.tree.len(),
                    bundle.graph.node_count(),
                    bundle.analysis.len()
                ),
            ),
            Err(e) => {
                failed += 1;
                ui::print_error("INVALID", &format!("{}: {e:#}", path.display()));
            }
        }
    }
    if failed > 0 {
        bail!("{failed} unit(s) failed validation");
    }
    Ok(())
}

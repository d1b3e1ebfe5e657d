use std::path::PathBuf;
use std::process;

use structopt::StructOpt;

use fprint_cli::{
    ensure_dir, index_dataset, list_candidates, load_gray, render_matches, run_contest,
    write_csv, PipelineConfig, PipelineError, PipelineResult,
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fprint",
    about = "Fingerprint identification: match altered samples against original captures"
)]
enum Opt {
    /// Find the original that best matches an altered sample
    Match {
        /// Altered sample image
        #[structopt(parse(from_os_str))]
        probe: PathBuf,
        /// Directory of original candidate images
        #[structopt(parse(from_os_str))]
        candidates: PathBuf,
        /// TOML config file; defaults apply when omitted
        #[structopt(short, long, parse(from_os_str))]
        config: Option<PathBuf>,
        /// Override the ratio-test threshold from the config
        #[structopt(short, long)]
        ratio: Option<f32>,
        /// Write a side-by-side overlay of the winning correspondences
        #[structopt(short = "o", long, parse(from_os_str))]
        render: Option<PathBuf>,
    },
    /// Index a dataset tree into a metadata CSV
    Index {
        /// Dataset root (person directories below it)
        #[structopt(parse(from_os_str))]
        dataset: PathBuf,
        /// Output CSV path
        #[structopt(short, long, parse(from_os_str), default_value = "metadata.csv")]
        out: PathBuf,
    },
}

fn main() {
    pretty_env_logger::init();
    if let Err(e) = run(Opt::from_args()) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(opt: Opt) -> PipelineResult<()> {
    match opt {
        Opt::Match {
            probe,
            candidates,
            config,
            ratio,
            render,
        } => {
            let mut cfg = match config {
                Some(path) => PipelineConfig::load_toml(&path)?,
                None => PipelineConfig::default(),
            };
            if let Some(r) = ratio {
                cfg.ratio_threshold = r;
            }
            cfg.validate()?;

            fprint_core::init_thread_pool(cfg.detect.n_threads)?;

            let probe_img = load_gray(&probe)?;
            let candidate_files = list_candidates(&candidates)?;
            log::info!(
                "matching {} against {} candidates",
                probe.display(),
                candidate_files.len()
            );

            let report = run_contest(&probe_img, &candidate_files, &cfg)?;
            for skipped in &report.skipped {
                log::warn!("candidate {} was skipped: {}", skipped.name, skipped.reason);
            }

            println!("BEST MATCH: {}", report.best.name);
            println!("SCORE: {}", report.best.score);

            if let Some(out) = render {
                if let Some(parent) = out.parent() {
                    ensure_dir(parent).map_err(|source| PipelineError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                let canvas = render_matches(
                    &probe_img,
                    &report.probe_keypoints,
                    &report.best.image,
                    &report.best.keypoints,
                    &report.best.correspondences,
                    cfg.magnification,
                );
                canvas.save(&out).map_err(|source| PipelineError::Save {
                    path: out.clone(),
                    source,
                })?;
                log::info!("wrote match overlay to {}", out.display());
            }
        }
        Opt::Index { dataset, out } => {
            let records = index_dataset(&dataset)?;
            if let Some(parent) = out.parent() {
                ensure_dir(parent).map_err(|source| PipelineError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            write_csv(&records, &out)?;
            println!("Indexed {} samples -> {}", records.len(), out.display());
        }
    }
    Ok(())
}
